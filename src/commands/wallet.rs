use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::presenter::swap_presenter::SwapPresenter;

/// Telegram user who sent the message
pub fn sender_id(msg: &Message) -> u64 {
    msg.from().map_or(msg.chat.id.0 as u64, |user| user.id.0)
}

pub struct ConnectCommand;

impl CommandHandler for ConnectCommand {
    fn command_name() -> &'static str {
        "connect"
    }

    fn description() -> &'static str {
        "connect your wallet"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;
        let page = dialogue.get().await?.and_then(|state| state.page().cloned());

        let presenter = services.swap_presenter(bot, chat_id);
        if presenter
            .connect_wallet(chat_id.0, sender_id(&msg))
            .await?
            .is_some()
        {
            dialogue
                .update(State::AwaitingWalletApproval { page })
                .await?;
        }

        Ok(())
    }
}

pub struct DisconnectCommand;

impl CommandHandler for DisconnectCommand {
    fn command_name() -> &'static str {
        "disconnect"
    }

    fn description() -> &'static str {
        "disconnect your wallet"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;
        let page = dialogue.get().await?.and_then(|state| state.page().cloned());

        let presenter = services.swap_presenter(bot, chat_id);
        let page = presenter
            .disconnect_wallet(chat_id.0, sender_id(&msg), page.as_ref())
            .await?;

        dialogue.update(State::viewing(page)).await?;

        Ok(())
    }
}

pub struct WalletCommand;

impl CommandHandler for WalletCommand {
    fn command_name() -> &'static str {
        "wallet"
    }

    fn description() -> &'static str {
        "show the connected wallet"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _dialogue: MyDialogue,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;
        let presenter = services.swap_presenter(bot, chat_id);
        presenter.show_wallet(chat_id.0).await
    }
}
