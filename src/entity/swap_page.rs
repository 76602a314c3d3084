use crate::entity::SwapRequest;

/// A rendered swap page: the request it shows and the message holding its
/// buttons. A button press only acts on the request of the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPage {
    pub request: SwapRequest,
    pub message_id: i32,
}

impl SwapPage {
    pub fn new(request: SwapRequest, message_id: i32) -> Self {
        Self {
            request,
            message_id,
        }
    }

    /// Whether a button on `message_id` belongs to this page
    pub fn is_shown_in(&self, message_id: Option<i32>) -> bool {
        message_id == Some(self.message_id)
    }
}
