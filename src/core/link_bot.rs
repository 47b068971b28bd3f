use crate::config::toml_config::BotConfig;
use crate::core::commands::{parse_command, CommandReplies};
use crate::core::links::LinkDirectory;
use crate::domain::model::{Message, OutgoingMessage, Update};
use crate::domain::ports::{Storage, UpdateHandler};
use async_trait::async_trait;

/// Replies to a message with the URL filed under that exact keyword in the links file.
pub struct LinkBot<S: Storage> {
    links: LinkDirectory<S>,
    replies: CommandReplies,
}

impl<S: Storage> LinkBot<S> {
    pub fn new(storage: S, config: &BotConfig) -> Self {
        Self {
            links: LinkDirectory::new(storage, config.files.links_file.clone()),
            replies: CommandReplies::from_config(config),
        }
    }

    fn handle_command(&self, message: &Message, text: &str) -> Vec<OutgoingMessage> {
        let Some(command) = parse_command(text) else {
            return Vec::new();
        };

        match command.name.as_str() {
            "start" => self.replies.start(message),
            "help" => self.replies.help(message),
            other => {
                tracing::debug!("Ignoring unknown command /{}", other);
                Vec::new()
            }
        }
    }

    async fn resolve(&self, message: &Message, keyword: &str) -> OutgoingMessage {
        let table = match self.links.load().await {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("❌ Could not read links file: {}", e);
                return OutgoingMessage::reply(message, self.replies.messages().link_error.clone());
            }
        };

        match table.lookup(keyword) {
            Some(url) => OutgoingMessage::reply(message, url),
            None => {
                OutgoingMessage::reply(message, self.replies.messages().link_not_found.clone())
            }
        }
    }
}

#[async_trait]
impl<S: Storage> UpdateHandler for LinkBot<S> {
    async fn handle(&self, update: &Update) -> Vec<OutgoingMessage> {
        let Some(message) = &update.message else {
            return Vec::new();
        };
        let Some(text) = message.text.as_deref() else {
            return Vec::new();
        };

        tracing::info!("[{}] {}", message.sender_mention(), text);

        if text.starts_with('/') {
            self.handle_command(message, text)
        } else {
            vec![self.resolve(message, text.trim()).await]
        }
    }
}
