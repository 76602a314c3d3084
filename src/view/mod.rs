pub mod inline_view;
pub mod page;
pub mod swap_view;

pub use page::PageState;
pub use swap_view::{SwapView, TelegramSwapView};
