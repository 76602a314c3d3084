mod bot_error;
mod environment;
mod state;
mod swap_page;
mod swap_request;
mod swap_result;
mod token;
mod wallet_session;

pub use bot_error::{BotError, ErrorKind, USAGE_HINT};
pub use environment::Environment;
pub use state::State;
pub use swap_page::SwapPage;
pub use swap_request::{QueryState, SwapRequest};
pub use swap_result::SwapResult;
pub use token::Token;
pub use wallet_session::WalletSession;
