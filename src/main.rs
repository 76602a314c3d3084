//! Solana swap link bot for Telegram - Main executable
//!
//! Paste a link carrying `input`, `output` and `amount` into a chat with the
//! bot, connect the configured wallet and swap through Jupiter, either on
//! Jupiter's own page or signed and submitted by the bot.
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use solana_swap_link_bot::{AppConfig, Router, ServiceContainer, State, TelegramRouter};
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::InMemStorage, dptree, prelude::*, types::BotCommand, Bot,
};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Solana Swap Link Bot v{}",
        solana_swap_link_bot::VERSION
    );

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Create Telegram bot instance
    let bot = Bot::new(config.telegram_bot_token.clone());

    // Publish the command menu
    let commands = solana_swap_link_bot::commands::register_commands()
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description));
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!("Failed to register bot commands: {}", e);
    }

    info!("Initializing bot application...");
    let services = Arc::new(ServiceContainer::new(&config).context("Failed to initialize services")?);
    let router = TelegramRouter::new(services.clone());
    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services, InMemStorage::<State>::new()])
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    Ok(())
}
