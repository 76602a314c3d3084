use anyhow::Result;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage},
    prelude::*,
};

use crate::di::ServiceContainer;
use crate::entity::State;

pub mod callback;
pub mod help;
pub mod inline;
pub mod start;
pub mod swap;
pub mod wallet;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            swap::SwapCommand::command_name(),
            swap::SwapCommand::description(),
        ),
        (
            wallet::ConnectCommand::command_name(),
            wallet::ConnectCommand::description(),
        ),
        (
            wallet::DisconnectCommand::command_name(),
            wallet::DisconnectCommand::description(),
        ),
        (
            wallet::WalletCommand::command_name(),
            wallet::WalletCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
    ]
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot")]
    Start,
    #[command(description = "open a swap link: /swap ?input=MINT&output=MINT&amount=AMOUNT")]
    Swap(String),
    #[command(description = "connect your wallet")]
    Connect,
    #[command(description = "disconnect your wallet")]
    Disconnect,
    #[command(description = "show the connected wallet")]
    Wallet,
    #[command(description = "display this help message")]
    Help,
}

/// Text after the leading `/command` (and optional `@botname`)
pub fn command_args(text: &str) -> &str {
    match text.trim_start().strip_prefix('/') {
        Some(rest) => rest
            .split_once(char::is_whitespace)
            .map(|(_, args)| args.trim())
            .unwrap_or(""),
        None => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_args_strip_the_command() {
        assert_eq!(command_args("/swap ?input=A&output=B&amount=5"), "?input=A&output=B&amount=5");
        assert_eq!(command_args("/swap@swap_bot  https://x/?input=A "), "https://x/?input=A");
        assert_eq!(command_args("/swap"), "");
        assert_eq!(command_args("?input=A"), "?input=A");
    }

    #[test]
    fn every_command_is_registered() {
        let names: Vec<&str> = register_commands().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["start", "swap", "connect", "disconnect", "wallet", "help"]);
    }
}
