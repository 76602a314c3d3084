use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use reqwest::Url;

use crate::entity::{QueryState, SwapRequest, USAGE_HINT};

/// Where swap parameters come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// Nothing delivered yet (empty inline query, message without text).
    Unresolved,
    Text(String),
}

impl QuerySource {
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            Some(text) if !text.trim().is_empty() => QuerySource::Text(text.to_string()),
            _ => QuerySource::Unresolved,
        }
    }
}

/// Read the swap request from its source. An unresolved source is `Pending`,
/// never a missing-parameters error.
pub fn read_swap_request(source: &QuerySource) -> QueryState {
    match source {
        QuerySource::Unresolved => QueryState::Pending,
        QuerySource::Text(text) => match extract_swap_link(text) {
            Some(link) => parse_swap_query(link),
            None => QueryState::Invalid(USAGE_HINT.to_string()),
        },
    }
}

/// Find the first URL or query string inside free text.
pub fn extract_swap_link(text: &str) -> Option<&str> {
    lazy_static! {
        static ref LINK: Regex =
            Regex::new(r"(?i)(https?://\S+|\?\S*=\S*|\b[a-z_]+=\S*)").unwrap();
    }

    LINK.find(text).map(|m| m.as_str())
}

/// Parse `input`, `output` and `amount` from a URL or a bare query string.
///
/// Values are percent-decoded once; the first occurrence of a repeated key
/// wins; other keys are ignored.
pub fn parse_swap_query(link: &str) -> QueryState {
    let link = link.trim();
    // Schemes are case-insensitive; `Url` normalizes them to lowercase
    let parsed = match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Url::parse(&format!("https://localhost/?{}", link.trim_start_matches('?'))),
    };

    let url = match parsed {
        Ok(url) => url,
        Err(e) => {
            debug!("Unparseable swap link '{}': {}", link, e);
            return QueryState::Invalid(USAGE_HINT.to_string());
        }
    };

    let mut input = None;
    let mut output = None;
    let mut amount = None;
    for (key, value) in url.query_pairs() {
        let slot = match key.as_ref() {
            "input" => &mut input,
            "output" => &mut output,
            "amount" => &mut amount,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    match SwapRequest::from_parts(input, output, amount) {
        Some(request) => QueryState::Ready(request),
        None => QueryState::Invalid(USAGE_HINT.to_string()),
    }
}
