// Adapters layer: concrete implementations for external systems.

pub mod telegram;

pub use telegram::TelegramClient;
