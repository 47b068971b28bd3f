pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use toml_config::BotConfig;

#[cfg(feature = "cli")]
use clap::Parser;

/// Command line flags shared by both bot binaries. Flags win over the TOML file.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(about = "Telegram bot answering product questions from a JSON document")]
pub struct CliConfig {
    /// Bot API token issued by @BotFather
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Chat that receives a notice whenever someone sends /start
    #[arg(long, env = "SECRET", hide_env_values = true)]
    pub operator_chat_id: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the product document and the links file
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Bot API base URL, e.g. a local Bot API server
    #[arg(long)]
    pub api_base: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file if one was given and applies the flag overrides.
    pub fn resolve(&self) -> Result<BotSettings> {
        let mut bot = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                BotConfig::from_file(path)?
            }
            None => BotConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            bot.files.data_dir = data_dir.clone();
        }
        if let Some(api_base) = &self.api_base {
            bot.telegram.api_base = api_base.clone();
        }
        if let Some(raw) = &self.operator_chat_id {
            bot.telegram.operator_chat_id = Some(parse_chat_id("operator_chat_id", raw)?);
        }

        Ok(BotSettings::new(self.token.clone(), bot))
    }
}

pub fn parse_chat_id(field_name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|e| BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: format!("Expected a numeric chat id: {}", e),
        })
}

/// The resolved configuration: the token plus everything from the TOML file.
#[derive(Clone)]
pub struct BotSettings {
    token: String,
    pub bot: BotConfig,
}

impl BotSettings {
    pub fn new(token: impl Into<String>, bot: BotConfig) -> Self {
        Self {
            token: token.into(),
            bot,
        }
    }
}

impl std::fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotSettings")
            .field("token", &"<redacted>")
            .field("bot", &self.bot)
            .finish()
    }
}

impl ConfigProvider for BotSettings {
    fn api_base(&self) -> &str {
        &self.bot.telegram.api_base
    }

    fn bot_token(&self) -> &str {
        &self.token
    }

    fn poll_timeout_seconds(&self) -> u64 {
        self.bot.telegram.poll_timeout_seconds
    }
}

impl Validate for BotSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_bot_token("token", &self.token)?;
        self.bot.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_id() {
        assert_eq!(parse_chat_id("operator_chat_id", " 12345 ").unwrap(), 12345);
        assert_eq!(
            parse_chat_id("operator_chat_id", "-1001234567890").unwrap(),
            -1001234567890
        );
        assert!(parse_chat_id("operator_chat_id", "budi").is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let settings = BotSettings::new("123456:SECRET-PART", BotConfig::default());
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("SECRET-PART"));
    }

    #[test]
    fn test_settings_validation() {
        assert!(BotSettings::new("123456:abc", BotConfig::default())
            .validate()
            .is_ok());
        assert!(BotSettings::new("", BotConfig::default())
            .validate()
            .is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[files]\ndata_dir = \"/from/toml\"\nproduct_file = \"p.json\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "product-lookup-bot",
            "--token",
            "123456:abc",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--data-dir",
            "/from/cli",
            "--operator-chat-id",
            "777",
        ]);
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.bot.files.data_dir, "/from/cli");
        assert_eq!(settings.bot.files.product_file, "p.json");
        assert_eq!(settings.bot.telegram.operator_chat_id, Some(777));
        assert_eq!(settings.bot_token(), "123456:abc");
    }
}
