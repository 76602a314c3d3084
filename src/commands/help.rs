use anyhow::Result;
use log::warn;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;

use super::{BotCommands, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _dialogue: MyDialogue,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let mut text = format!(
            "{}\n\n\
             You can also paste a swap link directly. \
             Any link ending in ?input=INPUT_MINT&output=OUTPUT_MINT&amount=AMOUNT works.",
            BotCommands::descriptions()
        );

        match bot.get_me().await {
            Ok(me) => text.push_str(&format!(
                "\n\nType @{} followed by a link in any chat to share a summary.",
                me.username()
            )),
            Err(e) => warn!("Failed to read the bot's username: {}", e),
        }

        bot.send_message(msg.chat.id, text).await?;

        Ok(())
    }
}
