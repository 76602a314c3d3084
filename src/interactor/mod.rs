pub mod busy_guard;
pub mod query_interactor;
pub mod swap_interactor;
pub mod wallet_interactor;

pub use busy_guard::{BusyGuard, BusyRegistry};
pub use query_interactor::{read_swap_request, QuerySource};
pub use swap_interactor::{SwapInteractor, SwapInteractorImpl};
pub use wallet_interactor::{ConnectOutcome, WalletInteractor, WalletInteractorImpl};
