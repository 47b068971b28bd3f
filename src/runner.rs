//! Startup shared by the bot binaries: build the Telegram client from the resolved
//! settings, confirm the token, then poll until Ctrl-C.

use crate::adapters::TelegramClient;
use crate::config::BotSettings;
use crate::core::engine::BotEngine;
use crate::domain::ports::{ConfigProvider, UpdateHandler};
use crate::utils::error::{BotError, ErrorSeverity, Result};
use std::time::Duration;

pub async fn serve<H: UpdateHandler>(settings: &BotSettings, handler: H) -> Result<()> {
    let client = TelegramClient::from_config(settings)?;
    tracing::debug!("Using {:?}", client);

    let mut engine = BotEngine::new(client, handler)
        .with_poll_timeout(settings.poll_timeout_seconds())
        .with_error_delay(Duration::from_secs(
            settings.bot.telegram.poll_error_delay_seconds,
        ));

    engine.authorize().await?;
    engine
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Could not listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

/// Process exit code for a fatal error, by severity.
pub fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Exit code for an error that ends the process. Never 0.
pub fn fatal_exit_code(e: &BotError) -> i32 {
    exit_code(e.severity()).max(1)
}

/// Logs a fatal error with its category, severity and suggestion, then exits.
pub fn fail(e: &BotError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(fatal_exit_code(e));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::BotConfig;
    use crate::core::link_bot::LinkBot;
    use crate::LocalStorage;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_serve_fails_fast_on_bad_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/bot123456:wrong/getMe");
            then.status(401).json_body(serde_json::json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            }));
        });

        let mut config = BotConfig::default();
        config.telegram.api_base = server.base_url();
        let settings = BotSettings::new("123456:wrong", config.clone());
        let handler = LinkBot::new(LocalStorage::new("."), &config);

        let err = serve(&settings, handler).await.unwrap_err();
        mock.assert();
        assert_eq!(exit_code(err.severity()), 3);
    }

    #[test]
    fn test_fatal_exit_code_is_never_zero() {
        let cases = [
            (
                BotError::InvalidConfigValueError {
                    field: "operator_chat_id".to_string(),
                    value: "budi".to_string(),
                    reason: "Expected a numeric chat id".to_string(),
                },
                3,
            ),
            (
                BotError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "links.txt",
                )),
                1,
            ),
            (
                BotError::TelegramError {
                    method: "getUpdates".to_string(),
                    code: 409,
                    description: "Conflict".to_string(),
                },
                2,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(fatal_exit_code(&err), expected, "{}", err);
        }
        assert_eq!(exit_code(ErrorSeverity::Low).max(1), 1);
    }
}
