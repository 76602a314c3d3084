use crate::entity::SwapPage;

/// Per-chat dialogue state.
#[derive(Clone, Default, Debug)]
pub enum State {
    #[default]
    Start,
    Viewing {
        page: SwapPage,
    },
    AwaitingWalletApproval {
        page: Option<SwapPage>,
    },
}

impl State {
    /// The chat's current swap page, if any.
    pub fn page(&self) -> Option<&SwapPage> {
        match self {
            State::Start => None,
            State::Viewing { page } => Some(page),
            State::AwaitingWalletApproval { page } => page.as_ref(),
        }
    }

    /// `Viewing` the page, or `Start` when there is none
    pub fn viewing(page: Option<SwapPage>) -> Self {
        match page {
            Some(page) => State::Viewing { page },
            None => State::Start,
        }
    }
}
