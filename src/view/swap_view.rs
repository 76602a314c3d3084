use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use reqwest::Url;
use solana_sdk::pubkey::Pubkey;
use teloxide::{
    prelude::*,
    types::{
        InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Message, MessageId, ParseMode,
    },
    utils::html,
    Bot,
};

use crate::entity::{BotError, SwapRequest, SwapResult, WalletSession};
use crate::qrcodeutils::qr_code_png;
use crate::utils::{shorten_address, Explorer};
use crate::view::page::{
    connection_prompt_keyboard, page_keyboard, render_error, render_page_text, render_swap_result,
    PageState,
};

#[async_trait]
pub trait SwapView: Send + Sync {
    async fn display_usage(&self) -> Result<()>;
    /// Send the page; returns the id of the message holding its buttons
    async fn render_page(&self, page: &PageState) -> Result<i32>;
    /// Remove the buttons of a page that has been replaced
    async fn retire_page(&self, message_id: i32) -> Result<()>;
    async fn display_connection_prompt(&self, provider_name: &str, wallet: &Pubkey) -> Result<()>;
    async fn display_wallet(&self, session: &WalletSession) -> Result<()>;
    async fn display_processing(&self, request: &SwapRequest) -> Result<Option<Message>>;
    async fn display_swap_result(&self, result: &SwapResult, message: Option<Message>)
        -> Result<()>;
    async fn display_error(&self, error: &BotError) -> Result<()>;
}

pub struct TelegramSwapView {
    bot: Bot,
    chat_id: ChatId,
    explorer: Explorer,
}

impl TelegramSwapView {
    pub fn new(bot: Bot, chat_id: ChatId, explorer: Explorer) -> Self {
        Self {
            bot,
            chat_id,
            explorer,
        }
    }

    async fn send_deep_link(&self, link: &str, text: String) -> Result<()> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(_) => {
                self.bot
                    .send_message(self.chat_id, format!("{}\n\n{}", text, html::escape(link)))
                    .parse_mode(ParseMode::Html)
                    .await?;
                return Ok(());
            }
        };

        let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
            "🔁 Swap in Jupiter",
            url,
        )]]);

        match qr_code_png(link) {
            Ok(png) => {
                self.bot
                    .send_photo(self.chat_id, InputFile::memory(png))
                    .caption(text)
                    .reply_markup(keyboard)
                    .await?;
            }
            Err(e) => {
                warn!("Failed to render QR code for deep link: {}", e);
                self.bot
                    .send_message(self.chat_id, text)
                    .reply_markup(keyboard)
                    .await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl SwapView for TelegramSwapView {
    async fn display_usage(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "Send me a swap link to get started.\n\n\
                 Any link ending in ?input=INPUT_MINT&output=OUTPUT_MINT&amount=AMOUNT works.\n\n\
                 Example: /swap ?input=SOL&output=USDC&amount=0.5",
            )
            .await?;

        Ok(())
    }

    async fn render_page(&self, page: &PageState) -> Result<i32> {
        let request = self
            .bot
            .send_message(self.chat_id, render_page_text(page))
            .parse_mode(ParseMode::Html);

        let message = match page_keyboard(page) {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };

        Ok(message.id.0)
    }

    async fn retire_page(&self, message_id: i32) -> Result<()> {
        self.bot
            .edit_message_reply_markup(self.chat_id, MessageId(message_id))
            .await?;

        Ok(())
    }

    async fn display_connection_prompt(&self, provider_name: &str, wallet: &Pubkey) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "<b>{}</b> wants to connect wallet <code>{}</code> to this chat.\n\nApprove the connection?",
                    html::escape(provider_name),
                    wallet
                ),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(connection_prompt_keyboard())
            .await?;

        Ok(())
    }

    async fn display_wallet(&self, session: &WalletSession) -> Result<()> {
        let text = match session.account() {
            Some(key) => format!(
                "🟢 Wallet connected: <code>{}</code> ({})",
                key,
                shorten_address(&key)
            ),
            None => "⚪ No wallet connected. Use /connect to connect one.".to_string(),
        };

        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(())
    }

    async fn display_processing(&self, request: &SwapRequest) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(
                self.chat_id,
                format!(
                    "Preparing swap of {} {} to {}...",
                    request.amount, request.input_mint, request.output_mint
                ),
            )
            .await?;

        Ok(Some(message))
    }

    async fn display_swap_result(
        &self,
        result: &SwapResult,
        message: Option<Message>,
    ) -> Result<()> {
        let text = render_swap_result(result, &self.explorer);

        if let (Some(link), true) = (&result.deep_link, result.success()) {
            return self.send_deep_link(link, text).await;
        }

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Ok(())
    }

    async fn display_error(&self, error: &BotError) -> Result<()> {
        self.bot
            .send_message(self.chat_id, render_error(error))
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(())
    }
}
