use anyhow::Result;
use httpmock::prelude::*;
use product_lookup_bot::{BotConfig, BotEngine, LocalStorage, ProductBot, TelegramClient};
use std::time::Duration;
use tempfile::TempDir;

const TOKEN: &str = "123456:INTEGRATION";

fn product_json() -> serde_json::Value {
    serde_json::json!({
        "data": {
            "description": "<p>Sepatu lari <b>ringan</b></p>",
            "product_name": "Sepatu Lari X",
            "category_list": [{"local_display_name": "Olahraga"}, {"local_display_name": "Sepatu"}],
            "images": [
                {"id": "a1", "width": 640, "height": 480, "thumb_url_list": ["https://img.example.com/1.jpg"]},
                {"id": "a2", "width": 320, "height": 240, "thumb_url_list": ["https://img.example.com/1.jpg", "https://img.example.com/2.jpg"]}
            ],
            "create_time": 1700000000
        }
    })
}

fn updates(texts: &[(i64, &str)]) -> serde_json::Value {
    let result: Vec<serde_json::Value> = texts
        .iter()
        .map(|(id, text)| {
            serde_json::json!({
                "update_id": id,
                "message": {
                    "message_id": id * 100,
                    "date": 1700000000,
                    "from": {"id": 77, "is_bot": false, "first_name": "Ani", "username": "ani"},
                    "chat": {"id": 77, "type": "private"},
                    "text": text
                }
            })
        })
        .collect();
    serde_json::json!({"ok": true, "result": result})
}

fn sent_ok() -> serde_json::Value {
    serde_json::json!({"ok": true, "result": {"message_id": 1}})
}

fn client(server: &MockServer) -> Result<TelegramClient> {
    Ok(TelegramClient::new(
        server.base_url(),
        TOKEN,
        Duration::from_secs(1),
    )?)
}

#[tokio::test]
async fn test_keyword_message_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("file.json"), product_json().to_string()).await?;

    let server = MockServer::start();
    let updates_mock = server.mock(|when, then| {
        when.method(POST).path(format!("/bot{}/getUpdates", TOKEN));
        then.status(200)
            .json_body(updates(&[(500, "tolong deskripsi dan url")]));
    });
    let description_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(
                r#"{"chat_id": 77, "text": "Sepatu lari ringan", "reply_parameters": {"message_id": 50000}}"#,
            );
        then.status(200).json_body(sent_ok());
    });
    let first_url_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(r#"{"text": "URL: https://img.example.com/1.jpg"}"#);
        then.status(200).json_body(sent_ok());
    });
    let second_url_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(r#"{"text": "URL: https://img.example.com/2.jpg"}"#);
        then.status(200).json_body(sent_ok());
    });

    let config = BotConfig::default();
    let api = client(&server)?;
    let bot = ProductBot::new(LocalStorage::new(temp_dir.path()), &config);
    let mut engine = BotEngine::new(api, bot).with_poll_timeout(0);

    let handled = engine.poll_once().await?;

    assert_eq!(handled, 1);
    assert_eq!(engine.offset(), Some(501));
    updates_mock.assert();
    description_mock.assert();
    first_url_mock.assert_hits(1);
    second_url_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_missing_document_sends_field_error() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(format!("/bot{}/getUpdates", TOKEN));
        then.status(200)
            .json_body(updates(&[(9, "kategori lalu gambar")]));
    });
    let error_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(r#"{"text": "Terjadi kesalahan saat mengambil kategori."}"#);
        then.status(200).json_body(sent_ok());
    });

    let config = BotConfig::default();
    let api = client(&server)?;
    let bot = ProductBot::new(LocalStorage::new(temp_dir.path()), &config);
    let mut engine = BotEngine::new(api, bot).with_poll_timeout(0);

    engine.poll_once().await?;

    // Only the first failing keyword is answered
    error_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_start_notifies_operator() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(format!("/bot{}/getUpdates", TOKEN));
        then.status(200).json_body(updates(&[(3, "/start")]));
    });
    let greeting_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .body_contains("Hallo, @ani!")
            .body_contains("inline_keyboard")
            .body_contains("Railway🚂");
        then.status(200).json_body(sent_ok());
    });
    let operator_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(r#"{"chat_id": 999, "text": "User @ani with ID:77 masuk"}"#);
        then.status(200).json_body(sent_ok());
    });

    let mut config = BotConfig::default();
    config.telegram.operator_chat_id = Some(999);
    let api = client(&server)?;
    let bot = ProductBot::new(LocalStorage::new(temp_dir.path()), &config);
    let mut engine = BotEngine::new(api, bot).with_poll_timeout(0);

    engine.poll_once().await?;

    greeting_mock.assert();
    operator_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_rejected_send_does_not_stop_next_update() -> Result<()> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("file.json"), product_json().to_string()).await?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(format!("/bot{}/getUpdates", TOKEN));
        then.status(200)
            .json_body(updates(&[(1, "nama_produk"), (2, "waktu_pembuatan")]));
    });
    let blocked_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .json_body_partial(r#"{"text": "Sepatu Lari X"}"#);
        then.status(403).json_body(serde_json::json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        }));
    });
    let time_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/bot{}/sendMessage", TOKEN))
            .body_contains("Waktu Pembuatan: 1700000000 (2023-11-14 22:13:20 UTC)");
        then.status(200).json_body(sent_ok());
    });

    let config = BotConfig::default();
    let api = client(&server)?;
    let bot = ProductBot::new(LocalStorage::new(temp_dir.path()), &config);
    let mut engine = BotEngine::new(api, bot).with_poll_timeout(0);

    assert_eq!(engine.poll_once().await?, 2);
    blocked_mock.assert();
    time_mock.assert();
    assert_eq!(engine.offset(), Some(3));
    Ok(())
}
