use crate::domain::model::{BotUser, OutgoingMessage, Update};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn bot_token(&self) -> &str;
    fn poll_timeout_seconds(&self) -> u64;
}

/// Outbound side of the messaging platform.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    async fn get_me(&self) -> Result<BotUser>;
    async fn get_updates(&self, offset: Option<i64>, timeout_seconds: u64) -> Result<Vec<Update>>;
    async fn send_message(&self, message: &OutgoingMessage) -> Result<()>;
}

/// Turns one update into the replies to send. Sending is left to the engine.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, update: &Update) -> Vec<OutgoingMessage>;
}
