pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod runner;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::TelegramClient;
pub use config::{cli::LocalStorage, toml_config::BotConfig, BotSettings};
pub use crate::core::{engine::BotEngine, link_bot::LinkBot, product_bot::ProductBot};
pub use utils::error::{BotError, Result};
