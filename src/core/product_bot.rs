use crate::config::toml_config::{BotConfig, LookupErrorMessages};
use crate::core::catalog::ProductCatalog;
use crate::core::commands::{parse_command, CommandReplies};
use crate::core::keywords::{self, Keyword};
use crate::domain::model::{Message, OutgoingMessage, Update};
use crate::domain::ports::{Storage, UpdateHandler};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::DateTime;

/// Answers keyword questions from the product document and handles
/// `/start`, `/help` and `/product`.
pub struct ProductBot<S: Storage> {
    catalog: ProductCatalog<S>,
    replies: CommandReplies,
}

impl<S: Storage> ProductBot<S> {
    pub fn new(storage: S, config: &BotConfig) -> Self {
        Self {
            catalog: ProductCatalog::new(storage, config.files.product_file.clone()),
            replies: CommandReplies::from_config(config),
        }
    }

    fn errors(&self) -> &LookupErrorMessages {
        &self.replies.messages().errors
    }

    async fn handle_command(&self, message: &Message, text: &str) -> Vec<OutgoingMessage> {
        let Some(command) = parse_command(text) else {
            return Vec::new();
        };

        match command.name.as_str() {
            "start" => self.replies.start(message),
            "help" => self.replies.help(message),
            "product" if command.args.is_empty() => vec![self.replies.product_prompt(message)],
            "product" => vec![self.search(message, command.args).await],
            other => {
                tracing::debug!("Ignoring unknown command /{}", other);
                Vec::new()
            }
        }
    }

    async fn search(&self, message: &Message, term: &str) -> OutgoingMessage {
        match self.catalog.search_products(term).await {
            Ok(names) if names.is_empty() => OutgoingMessage::reply(
                message,
                self.replies.messages().product_not_found.clone(),
            ),
            Ok(names) => OutgoingMessage::reply(message, names.join("\n")),
            Err(e) => {
                tracing::error!("❌ Product search for '{}' failed: {}", term, e);
                OutgoingMessage::reply(message, self.errors().search.clone())
            }
        }
    }

    /// Replies for each keyword in order. The first failed lookup answers with that
    /// field's error text and ends the update.
    async fn handle_keywords(&self, message: &Message, text: &str) -> Vec<OutgoingMessage> {
        let mut replies = Vec::new();

        for keyword in keywords::scan(text) {
            match self.lookup(keyword, message).await {
                Ok(mut answer) => replies.append(&mut answer),
                Err(e) => {
                    tracing::error!("❌ Lookup for '{}' failed: {}", keyword, e);
                    replies.push(OutgoingMessage::reply(
                        message,
                        self.error_text(keyword).to_string(),
                    ));
                    break;
                }
            }
        }

        replies
    }

    async fn lookup(&self, keyword: Keyword, message: &Message) -> Result<Vec<OutgoingMessage>> {
        let chat_id = message.chat.id;
        let replies = match keyword {
            Keyword::Description => {
                vec![OutgoingMessage::reply(message, self.catalog.description().await?)]
            }
            Keyword::ProductName => {
                vec![OutgoingMessage::reply(message, self.catalog.product_name().await?)]
            }
            Keyword::Url => self
                .catalog
                .unique_urls()
                .await?
                .into_iter()
                .map(|url| OutgoingMessage::new(chat_id, format!("URL: {}", url)))
                .collect(),
            Keyword::Category => {
                let categories = self.catalog.categories().await?;
                vec![OutgoingMessage::new(
                    chat_id,
                    list_message("Kategori:", &categories),
                )]
            }
            Keyword::Image => {
                let images = self.catalog.image_summaries().await?;
                vec![OutgoingMessage::new(
                    chat_id,
                    list_message("Informasi Gambar:", &images),
                )]
            }
            Keyword::CreateTime => {
                let created = self.catalog.create_time().await?;
                vec![OutgoingMessage::reply(message, format_create_time(created))]
            }
        };
        Ok(replies)
    }

    fn error_text(&self, keyword: Keyword) -> &str {
        let errors = self.errors();
        match keyword {
            Keyword::Description => &errors.description,
            Keyword::ProductName => &errors.product_name,
            Keyword::Url => &errors.url,
            Keyword::Category => &errors.category,
            Keyword::Image => &errors.image,
            Keyword::CreateTime => &errors.create_time,
        }
    }
}

fn list_message(header: &str, items: &[String]) -> String {
    let mut text = header.to_string();
    for item in items {
        text.push('\n');
        text.push_str(item);
    }
    text
}

pub fn format_create_time(unix_seconds: i64) -> String {
    match DateTime::from_timestamp(unix_seconds, 0) {
        Some(utc) => format!(
            "Waktu Pembuatan: {} ({} UTC)",
            unix_seconds,
            utc.format("%Y-%m-%d %H:%M:%S")
        ),
        None => format!("Waktu Pembuatan: {}", unix_seconds),
    }
}

#[async_trait]
impl<S: Storage> UpdateHandler for ProductBot<S> {
    async fn handle(&self, update: &Update) -> Vec<OutgoingMessage> {
        let Some(message) = &update.message else {
            return Vec::new();
        };
        let Some(text) = message.text.as_deref() else {
            return Vec::new();
        };

        tracing::info!("[{}] {}", message.sender_mention(), text);

        if text.starts_with('/') {
            self.handle_command(message, text).await
        } else {
            self.handle_keywords(message, text).await
        }
    }
}
