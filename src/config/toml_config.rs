use crate::domain::model::{InlineButton, InlineKeyboard};
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Everything the bots read from the optional TOML file. Every section has defaults,
/// so an empty file (or no file at all) yields a working configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub files: FilesConfig,
    pub messages: MessagesConfig,
    pub keyboard: KeyboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_base: String,
    pub poll_timeout_seconds: u64,
    pub poll_error_delay_seconds: u64,
    pub operator_chat_id: Option<i64>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_timeout_seconds: 30,
            poll_error_delay_seconds: 3,
            operator_chat_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub data_dir: String,
    pub product_file: String,
    pub links_file: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            product_file: "file.json".to_string(),
            links_file: "links.txt".to_string(),
        }
    }
}

/// User-facing texts. `{mention}` and `{chat_id}` are filled in where noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Supports `{mention}`.
    pub greeting: String,
    /// Supports `{mention}` and `{chat_id}`.
    pub operator_notice: String,
    pub help: String,
    pub product_prompt: String,
    pub product_not_found: String,
    pub link_not_found: String,
    pub link_error: String,
    pub errors: LookupErrorMessages,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            greeting: "Hallo, {mention}! Selamat datang di bot saya, bagaimana saya bisa membantumu hari ini?"
                .to_string(),
            operator_notice: "User {mention} with ID:{chat_id} masuk".to_string(),
            help: "hallo ini help".to_string(),
            product_prompt: "silahkan pilih".to_string(),
            product_not_found: "Produk tidak ditemukan.".to_string(),
            link_not_found: "Kata kunci tidak ditemukan.".to_string(),
            link_error: "Terjadi kesalahan saat membaca daftar link.".to_string(),
            errors: LookupErrorMessages::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupErrorMessages {
    pub description: String,
    pub product_name: String,
    pub url: String,
    pub category: String,
    pub image: String,
    pub create_time: String,
    pub search: String,
}

impl Default for LookupErrorMessages {
    fn default() -> Self {
        Self {
            description: "Terjadi kesalahan saat mengambil deskripsi.".to_string(),
            product_name: "Terjadi kesalahan saat mengambil nama.".to_string(),
            url: "Terjadi kesalahan saat mengambil URL.".to_string(),
            category: "Terjadi kesalahan saat mengambil kategori.".to_string(),
            image: "Terjadi kesalahan saat mengambil informasi gambar.".to_string(),
            create_time: "Terjadi kesalahan saat mengambil waktu pembuatan.".to_string(),
            search: "Terjadi kesalahan saat mencari produk.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub rows: Vec<KeyboardRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardRow {
    pub buttons: Vec<InlineButton>,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        let button = |text: &str, url: &str| InlineButton {
            text: text.to_string(),
            url: url.to_string(),
        };
        Self {
            rows: vec![
                KeyboardRow {
                    buttons: vec![
                        button("Twitter🐦", "https://twitter.com"),
                        button("Github🐙", "https://github.com"),
                    ],
                },
                KeyboardRow {
                    buttons: vec![
                        button("Railway🚂", "https://railway.app"),
                        button("Replit🚀", "https://replit.com"),
                    ],
                },
            ],
        }
    }
}

impl KeyboardConfig {
    pub fn to_inline_keyboard(&self) -> InlineKeyboard {
        InlineKeyboard {
            rows: self.rows.iter().map(|row| row.buttons.clone()).collect(),
        }
    }
}

impl BotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static PLACEHOLDER: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder pattern"));

        PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("telegram.api_base", &self.telegram.api_base)?;
        validation::validate_range(
            "telegram.poll_timeout_seconds",
            self.telegram.poll_timeout_seconds,
            1,
            50,
        )?;

        validation::validate_path("files.data_dir", &self.files.data_dir)?;
        validation::validate_path("files.product_file", &self.files.product_file)?;
        validation::validate_path("files.links_file", &self.files.links_file)?;

        for (r, row) in self.keyboard.rows.iter().enumerate() {
            for (b, button) in row.buttons.iter().enumerate() {
                let field = format!("keyboard.rows[{}].buttons[{}]", r, b);
                validation::validate_non_empty_string(&field, &button.text)?;
                validation::validate_url(&field, &button.url)?;
            }
        }

        Ok(())
    }

    pub fn inline_keyboard(&self) -> Option<InlineKeyboard> {
        if self.keyboard.rows.iter().all(|row| row.buttons.is_empty()) {
            None
        } else {
            Some(self.keyboard.to_inline_keyboard())
        }
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
