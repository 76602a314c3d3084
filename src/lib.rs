pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod qrcodeutils;
pub mod router;
pub mod solana;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use crate::config::AppConfig;
pub use di::ServiceContainer;
pub use entity::*;
pub use router::{Router, TelegramRouter};
pub use solana::{create_solana_client, SwapStrategy};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
