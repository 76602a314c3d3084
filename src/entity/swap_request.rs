use serde::{Deserialize, Serialize};

/// Swap parameters exactly as they arrived in the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: String,
}

impl SwapRequest {
    /// Builds a request only when every field is present and non-blank.
    pub fn from_parts(
        input_mint: Option<String>,
        output_mint: Option<String>,
        amount: Option<String>,
    ) -> Option<Self> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Some(Self {
            input_mint: non_blank(input_mint)?,
            output_mint: non_blank(output_mint)?,
            amount: non_blank(amount)?,
        })
    }
}

/// Outcome of reading the swap link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    /// The source has not delivered its parameters yet.
    Pending,
    Invalid(String),
    Ready(SwapRequest),
}

impl QueryState {
    pub fn request(&self) -> Option<&SwapRequest> {
        match self {
            QueryState::Ready(request) => Some(request),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_make_the_request_invalid() {
        let some = |s: &str| Some(s.to_string());

        assert!(SwapRequest::from_parts(some("A"), some("B"), some("5")).is_some());
        assert!(SwapRequest::from_parts(some("A"), None, some("5")).is_none());
        assert!(SwapRequest::from_parts(some("A"), some("B"), some("  ")).is_none());
        assert!(SwapRequest::from_parts(some(""), some("B"), some("5")).is_none());
    }
}
