pub mod catalog;
pub mod commands;
pub mod engine;
pub mod keywords;
pub mod link_bot;
pub mod links;
pub mod product_bot;

pub use crate::domain::model::{Message, OutgoingMessage, Update};
pub use crate::domain::ports::{ConfigProvider, MessagingApi, Storage, UpdateHandler};
pub use crate::utils::error::Result;
