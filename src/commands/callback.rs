use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use teloxide::prelude::*;

use super::MyDialogue;
use crate::di::ServiceContainer;
use crate::entity::{BotError, State};
use crate::presenter::swap_presenter::SwapPresenter;
use crate::view::page::{APPROVE_CONNECT, CONNECT, DISCONNECT, REJECT_CONNECT, SWAP, SWAP_PENDING};

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let callback_data = match q.data.clone() {
        Some(data) => data,
        None => return Ok(()),
    };

    let chat_id = dialogue.chat_id();
    let telegram_id = q.from.id.0;
    // Message whose button was pressed
    let pressed_in = q.message.as_ref().map(|message| message.id().0);

    info!(
        "Received callback: {} from user {} in chat {}",
        callback_data, telegram_id, chat_id
    );

    // Acknowledge the callback query to stop loading animation
    let answer = bot.answer_callback_query(q.id.clone());
    let answer = if callback_data == SWAP_PENDING {
        answer.text(BotError::OperationInProgress.to_string())
    } else {
        answer
    };
    if let Err(err) = answer.await {
        info!("Failed to answer callback query: {}", err);
    }

    let page = dialogue.get().await?.and_then(|state| state.page().cloned());
    let presenter = services.swap_presenter(bot, chat_id);

    match callback_data.as_str() {
        CONNECT => {
            if presenter
                .connect_wallet(chat_id.0, telegram_id)
                .await?
                .is_some()
            {
                dialogue
                    .update(State::AwaitingWalletApproval { page })
                    .await?;
            }
        }
        APPROVE_CONNECT => {
            let page = presenter
                .approve_connection(chat_id.0, telegram_id, page.as_ref())
                .await?;
            dialogue.update(State::viewing(page)).await?;
        }
        REJECT_CONNECT => {
            presenter.reject_connection(chat_id.0, telegram_id).await?;
            dialogue.update(State::viewing(page)).await?;
        }
        DISCONNECT => {
            let page = presenter
                .disconnect_wallet(chat_id.0, telegram_id, page.as_ref())
                .await?;
            dialogue.update(State::viewing(page)).await?;
        }
        SWAP => {
            // Updates of one chat are handled in order, so the swap runs in
            // its own task to let a second press reach the busy check.
            tokio::spawn(async move {
                if let Err(e) = presenter
                    .swap(chat_id.0, telegram_id, page.as_ref(), pressed_in)
                    .await
                {
                    error!("Swap in chat {} failed to render: {}", chat_id, e);
                }
            });
        }
        SWAP_PENDING => {}
        other => {
            info!("Ignoring unknown callback: {}", other);
        }
    }

    Ok(())
}
