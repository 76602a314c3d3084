use teloxide::types::{
    InlineQueryResult, InlineQueryResultArticle, InputMessageContent, InputMessageContentText,
    ParseMode,
};

use crate::entity::QueryState;
use crate::view::page::{render_page_text, PageState};

/// Inline answers for a page rendered outside any chat.
///
/// Inline results are sent on the user's behalf into arbitrary chats, so the
/// page must be in `Environment::Uninitialized`: summary only, no wallet.
pub fn inline_results(page: &PageState) -> Vec<InlineQueryResult> {
    debug_assert!(!page.environment.is_client_ready());

    let (id, title, description) = match &page.query {
        QueryState::Pending => return Vec::new(),
        QueryState::Invalid(message) => ("usage", "Invalid swap link".to_string(), message.clone()),
        QueryState::Ready(request) => (
            "swap",
            format!(
                "Swap {} {} → {}",
                request.amount, request.input_mint, request.output_mint
            ),
            "Share this swap summary".to_string(),
        ),
    };

    let content = InputMessageContent::Text(
        InputMessageContentText::new(render_page_text(page)).parse_mode(ParseMode::Html),
    );
    let article = InlineQueryResultArticle::new(id, title, content).description(description);

    vec![InlineQueryResult::Article(article)]
}
