use crate::domain::model::Update;
use crate::domain::ports::{MessagingApi, UpdateHandler};
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;

/// Long-polls the platform and feeds updates, one at a time, to a handler.
pub struct BotEngine<A: MessagingApi, H: UpdateHandler> {
    api: A,
    handler: H,
    poll_timeout_seconds: u64,
    error_delay: Duration,
    offset: Option<i64>,
}

impl<A: MessagingApi, H: UpdateHandler> BotEngine<A, H> {
    pub fn new(api: A, handler: H) -> Self {
        Self {
            api,
            handler,
            poll_timeout_seconds: 30,
            error_delay: Duration::from_secs(3),
            offset: None,
        }
    }

    pub fn with_poll_timeout(mut self, seconds: u64) -> Self {
        self.poll_timeout_seconds = seconds;
        self
    }

    pub fn with_error_delay(mut self, delay: Duration) -> Self {
        self.error_delay = delay;
        self
    }

    /// Offset the next `getUpdates` call will acknowledge from.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Confirms the token works and logs the bot account name.
    pub async fn authorize(&self) -> Result<()> {
        let me = self.api.get_me().await?;
        tracing::info!(
            "Authorized on account {}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );
        Ok(())
    }

    /// Handles one update and sends its replies. Send failures are logged and skipped.
    /// Returns the number of replies delivered.
    pub async fn dispatch(&self, update: &Update) -> usize {
        let replies = self.handler.handle(update).await;
        let mut delivered = 0;

        for reply in &replies {
            match self.api.send_message(reply).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::error!(
                    "❌ Failed to send reply to chat {} for update {}: {}",
                    reply.chat_id,
                    update.update_id,
                    e
                ),
            }
        }

        tracing::debug!(
            "Update {} handled, {}/{} replies sent",
            update.update_id,
            delivered,
            replies.len()
        );
        delivered
    }

    /// One `getUpdates` round. Returns how many updates were handled.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self
            .api
            .get_updates(self.offset, self.poll_timeout_seconds)
            .await?;

        for update in &updates {
            // Acknowledge before handling so a failing update is never redelivered
            self.offset = Some(update.update_id + 1);
            self.dispatch(update).await;
        }

        Ok(updates.len())
    }

    /// Polls until `shutdown` resolves. Polling errors are logged and polling
    /// resumes after the error delay.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!("🚀 Listening for updates");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("🛑 Shutdown requested, stopping update loop");
                    break;
                }
                result = self.poll_once() => {
                    if let Err(e) = result {
                        tracing::warn!(
                            "Failed to get updates, retrying in {:?}: {}",
                            self.error_delay,
                            e
                        );
                        tokio::select! {
                            _ = &mut shutdown => break,
                            _ = tokio::time::sleep(self.error_delay) => {}
                        }
                    }
                }
            }
        }
    }
}
