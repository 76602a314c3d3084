//! Rendering of the swap page from its current state.
//!
//! Everything here is a pure function of [`PageState`]; views only decide
//! where the text and keyboard end up.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html;

use crate::entity::{BotError, Environment, ErrorKind, QueryState, SwapResult};
use crate::solana::executor::SwapStrategy;
use crate::utils::{shorten_address, truncate_signature, Explorer};

// Callback data of the page buttons
pub const CONNECT: &str = "connect";
pub const APPROVE_CONNECT: &str = "approve_connect";
pub const REJECT_CONNECT: &str = "reject_connect";
pub const DISCONNECT: &str = "disconnect";
pub const SWAP: &str = "swap";
pub const SWAP_PENDING: &str = "swap_pending";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub query: QueryState,
    pub environment: Environment,
    pub busy: bool,
    pub strategy: SwapStrategy,
}

/// Buttons the page offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affordances {
    pub connect: bool,
    pub disconnect: bool,
    pub swap: bool,
    /// Swap button is shown but inert while a swap is running
    pub swap_pending: bool,
}

impl Affordances {
    pub fn any(&self) -> bool {
        self.connect || self.disconnect || self.swap || self.swap_pending
    }
}

impl PageState {
    pub fn affordances(&self) -> Affordances {
        if self.query.request().is_none() {
            return Affordances::default();
        }

        match self.environment {
            Environment::Uninitialized => Affordances::default(),
            Environment::ClientReady(session) if session.connected => Affordances {
                connect: false,
                disconnect: true,
                swap: !self.busy,
                swap_pending: self.busy,
            },
            Environment::ClientReady(_) => Affordances {
                connect: true,
                ..Affordances::default()
            },
        }
    }
}

pub fn render_page_text(page: &PageState) -> String {
    let request = match &page.query {
        QueryState::Pending => return "Waiting for swap parameters...".to_string(),
        QueryState::Invalid(message) => return format!("❌ {}", html::escape(message)),
        QueryState::Ready(request) => request,
    };

    let mut text = format!(
        "<b>SolanaGPT Swap</b>\n\n\
         <b>Input Mint:</b> {}\n\
         <b>Output Mint:</b> {}\n\
         <b>Amount:</b> {}",
        html::escape(&request.input_mint),
        html::escape(&request.output_mint),
        html::escape(&request.amount),
    );

    if let Environment::ClientReady(session) = page.environment {
        match session.account() {
            Some(key) => text.push_str(&format!(
                "\n\n<b>Wallet:</b> <code>{}</code>",
                shorten_address(&key)
            )),
            None => text.push_str("\n\n<b>Wallet:</b> not connected"),
        }
    }

    if page.busy {
        text.push_str("\n\n⏳ Swap in progress...");
    }

    text
}

pub fn page_keyboard(page: &PageState) -> Option<InlineKeyboardMarkup> {
    let affordances = page.affordances();
    if !affordances.any() {
        return None;
    }

    let mut rows = Vec::new();
    if affordances.connect {
        rows.push(vec![InlineKeyboardButton::callback(
            "🔌 Connect wallet",
            CONNECT,
        )]);
    }
    if affordances.swap {
        rows.push(vec![InlineKeyboardButton::callback(
            swap_button_label(page.strategy),
            SWAP,
        )]);
    }
    if affordances.swap_pending {
        rows.push(vec![InlineKeyboardButton::callback(
            "⏳ Swapping...",
            SWAP_PENDING,
        )]);
    }
    if affordances.disconnect {
        rows.push(vec![InlineKeyboardButton::callback(
            "Disconnect",
            DISCONNECT,
        )]);
    }

    Some(InlineKeyboardMarkup::new(rows))
}

pub fn connection_prompt_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Approve", APPROVE_CONNECT),
        InlineKeyboardButton::callback("❌ Reject", REJECT_CONNECT),
    ]])
}

fn swap_button_label(strategy: SwapStrategy) -> &'static str {
    match strategy {
        SwapStrategy::DeepLink => "🔁 Swap in Jupiter",
        SwapStrategy::Transactional => "🔁 Swap",
    }
}

/// Error banner, titled by the kind of failure
pub fn render_error(error: &BotError) -> String {
    let title = match error.kind() {
        ErrorKind::Parameter => "⚠️ <b>Check your link</b>",
        ErrorKind::Wallet => "🔌 <b>Wallet</b>",
        ErrorKind::Swap => "❌ <b>Swap failed</b>",
        ErrorKind::Unclassified => "❌ <b>Error</b>",
    };

    let mut text = format!("{}\n{}", title, html::escape(&error.to_string()));
    if error.is_retryable() {
        text.push_str("\n\nYou can try again.");
    }
    text
}

/// Result message for a finished swap
pub fn render_swap_result(result: &SwapResult, explorer: &Explorer) -> String {
    if let Some(error) = &result.error_message {
        let mut text = format!("❌ {}", html::escape(error));
        if result.retryable {
            text.push_str("\n\nYou can press the swap button again.");
        }
        return text;
    }

    if let Some(signature) = &result.signature {
        return format!(
            "✅ Swap confirmed!\n\n\
             <b>Signature:</b> <code>{}</code>\n\
             <a href=\"{}\">View on explorer</a>",
            truncate_signature(signature),
            explorer.transaction_url(signature)
        );
    }

    if result.deep_link.is_some() {
        return "Your swap is ready in Jupiter. Open the link below or scan the QR code."
            .to_string();
    }

    "Swap finished.".to_string()
}
