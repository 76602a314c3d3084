use crate::entity::BotError;

/// What the dispatcher produced for one activation of the swap button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapResult {
    pub signature: Option<String>,
    pub deep_link: Option<String>,
    pub error_message: Option<String>,
    pub retryable: bool,
}

impl SwapResult {
    pub fn confirmed(signature: String) -> Self {
        Self {
            signature: Some(signature),
            ..Self::default()
        }
    }

    pub fn deep_link(url: String) -> Self {
        Self {
            deep_link: Some(url),
            ..Self::default()
        }
    }

    pub fn failed(error: &BotError) -> Self {
        Self {
            error_message: Some(error.to_string()),
            retryable: error.is_retryable(),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.error_message.is_none()
    }
}
