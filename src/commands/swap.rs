use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{command_args, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::query_interactor::QuerySource;
use crate::presenter::swap_presenter::SwapPresenter;

pub struct SwapCommand;

impl CommandHandler for SwapCommand {
    fn command_name() -> &'static str {
        "swap"
    }

    fn description() -> &'static str {
        "open a swap link (format: /swap ?input=MINT&output=MINT&amount=AMOUNT)"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let link = command_args(msg.text().unwrap_or(""));
        open_link(bot, msg.chat.id, link, dialogue, services).await
    }
}

/// A link pasted into a private chat opens the swap page
pub async fn receive_link(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let text = msg.text().unwrap_or("");
    open_link(bot, msg.chat.id, text, dialogue, services).await
}

async fn open_link(
    bot: Bot,
    chat_id: ChatId,
    link: &str,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    info!("Opening swap link in chat {}", chat_id);

    let previous = dialogue.get().await?.and_then(|state| state.page().cloned());

    let presenter = services.swap_presenter(bot, chat_id);
    let page = presenter
        .open_link(chat_id.0, QuerySource::from_text(Some(link)), previous.as_ref())
        .await?;

    dialogue.update(State::viewing(page)).await?;

    Ok(())
}
