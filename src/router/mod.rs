use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::InMemStorage, dispatching::UpdateHandler, prelude::*,
};

use crate::commands::{
    self, callback::handle_callback, inline::handle_inline_query, BotCommands, CommandHandler,
    MyDialogue,
};
use crate::di::ServiceContainer;
use crate::entity::State;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;
        use teloxide::dispatching::UpdateFilterExt;

        let services_for_start = self.services.clone();
        let services_for_swap = self.services.clone();
        let services_for_connect = self.services.clone();
        let services_for_disconnect = self.services.clone();
        let services_for_wallet = self.services.clone();
        let services_for_help = self.services.clone();

        // Use BotCommands enum with teloxide's command filter
        let command_handler = teloxide::filter_command::<BotCommands, _>()
            .branch(case![BotCommands::Start].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_start.clone();
                    async move {
                        commands::start::StartCommand::execute(bot, msg, dialogue, services).await
                    }
                },
            ))
            .branch(case![BotCommands::Swap(link)].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_swap.clone();
                    async move {
                        commands::swap::SwapCommand::execute(bot, msg, dialogue, services).await
                    }
                },
            ))
            .branch(case![BotCommands::Connect].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_connect.clone();
                    async move {
                        commands::wallet::ConnectCommand::execute(bot, msg, dialogue, services)
                            .await
                    }
                },
            ))
            .branch(case![BotCommands::Disconnect].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_disconnect.clone();
                    async move {
                        commands::wallet::DisconnectCommand::execute(bot, msg, dialogue, services)
                            .await
                    }
                },
            ))
            .branch(case![BotCommands::Wallet].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_wallet.clone();
                    async move {
                        commands::wallet::WalletCommand::execute(bot, msg, dialogue, services)
                            .await
                    }
                },
            ))
            .branch(case![BotCommands::Help].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_help.clone();
                    async move {
                        commands::help::HelpCommand::execute(bot, msg, dialogue, services).await
                    }
                },
            ));

        // Any other text in a private chat is treated as a swap link
        let services_for_links = self.services.clone();
        let link_handler = dptree::filter(|msg: Message| msg.chat.is_private() && msg.text().is_some())
            .endpoint(move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                let services = services_for_links.clone();
                async move { commands::swap::receive_link(bot, msg, dialogue, services).await }
            });

        let message_handler = Update::filter_message()
            .branch(command_handler)
            .branch(link_handler);

        // Add callback query handler for our buttons
        let services_for_callbacks = self.services.clone();
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, dialogue, services).await }
            },
        );

        // Inline queries carry no chat, so they bypass the dialogue
        let services_for_inline = self.services.clone();
        let inline_handler = Update::filter_inline_query().endpoint(
            move |bot: Bot, q: InlineQuery| {
                let services = services_for_inline.clone();
                async move { handle_inline_query(bot, q, services).await }
            },
        );

        dptree::entry().branch(inline_handler).branch(
            teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
                .branch(message_handler)
                .branch(callback_handler),
        )
    }
}
