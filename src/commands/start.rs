use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::presenter::SwapPresenter;

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!("Start command received in chat {}", chat_id);

        dialogue.update(State::Start).await?;

        bot.send_message(
            chat_id,
            format!(
                "<b>SolanaGPT Swap</b>\n\nSwaps run through Jupiter ({}).",
                services.strategy()
            ),
        )
        .parse_mode(ParseMode::Html)
        .await?;

        let presenter = services.swap_presenter(bot, chat_id);
        presenter.show_wallet(chat_id.0).await?;

        Ok(())
    }
}
