use crate::config::toml_config::{BotConfig, MessagesConfig};
use crate::domain::model::{InlineKeyboard, Message, OutgoingMessage};

/// A `/name[@bot] args` command. `name` is lower-cased with the bot suffix dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub name: String,
    pub args: &'a str,
}

pub fn parse_command(text: &str) -> Option<Command<'_>> {
    let rest = text.strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or(head);
    if name.is_empty() {
        return None;
    }
    Some(Command {
        name: name.to_lowercase(),
        args,
    })
}

/// Replies shared by both bots: greeting, help and the keyboard prompt.
#[derive(Debug, Clone)]
pub struct CommandReplies {
    messages: MessagesConfig,
    keyboard: Option<InlineKeyboard>,
    operator_chat_id: Option<i64>,
}

impl CommandReplies {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            messages: config.messages.clone(),
            keyboard: config.inline_keyboard(),
            operator_chat_id: config.telegram.operator_chat_id,
        }
    }

    pub fn messages(&self) -> &MessagesConfig {
        &self.messages
    }

    fn with_keyboard(&self, reply: OutgoingMessage) -> OutgoingMessage {
        match &self.keyboard {
            Some(keyboard) => reply.with_keyboard(keyboard.clone()),
            None => reply,
        }
    }

    /// Greeting with the keyboard, plus a notice to the operator chat when one is set.
    pub fn start(&self, message: &Message) -> Vec<OutgoingMessage> {
        let mention = message.sender_mention();
        tracing::info!(
            "👋 /start from {} (chat {})",
            mention,
            message.chat.id
        );

        let greeting = self.messages.greeting.replace("{mention}", &mention);
        let mut replies = vec![self.with_keyboard(OutgoingMessage::reply(message, greeting))];

        match self.operator_chat_id {
            Some(operator) => {
                let notice = self
                    .messages
                    .operator_notice
                    .replace("{mention}", &mention)
                    .replace("{chat_id}", &message.chat.id.to_string());
                replies.push(OutgoingMessage::new(operator, notice));
            }
            None => tracing::warn!("No operator chat configured, skipping /start notice"),
        }

        replies
    }

    pub fn help(&self, message: &Message) -> Vec<OutgoingMessage> {
        vec![OutgoingMessage::reply(message, self.messages.help.clone())]
    }

    pub fn product_prompt(&self, message: &Message) -> OutgoingMessage {
        self.with_keyboard(OutgoingMessage::reply(
            message,
            self.messages.product_prompt.clone(),
        ))
    }
}
