use anyhow::Result;
use log::debug;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::di::ServiceContainer;
use crate::entity::Environment;
use crate::interactor::query_interactor::{read_swap_request, QuerySource};
use crate::view::inline_view::inline_results;
use crate::view::page::PageState;

/// `@bot <link>` from any chat: the summary only, never wallet state.
pub async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    debug!("Inline query from user {}: {}", q.from.id, q.query);

    let page = PageState {
        query: read_swap_request(&QuerySource::from_text(Some(&q.query))),
        environment: Environment::Uninitialized,
        busy: false,
        strategy: services.strategy(),
    };

    bot.answer_inline_query(q.id, inline_results(&page))
        .cache_time(0)
        .await?;

    Ok(())
}
