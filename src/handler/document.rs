//! Document handlers module
//!
//! The two operations on the stored JSON document: read it back out of the
//! backing file, or overwrite it with a submitted body. Failures the caller
//! can act on are reported inside the response body, not via status codes.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::io;

use crate::config::AppState;
use crate::http;
use crate::json;
use crate::logger;

/// Body returned when the backing file has not been created yet.
/// Reproduced verbatim, existing consumers match on this exact string.
const MISSING_FILE_MESSAGE: &str = "File doesn't exists, create it!";

/// Single-key JSON envelope with 4-space indentation
fn envelope(key: &str, message: &str) -> String {
    let mut map = serde_json::Map::new();
    map.insert(
        key.to_string(),
        serde_json::Value::String(message.to_string()),
    );
    let value = serde_json::Value::Object(map);
    json::to_pretty(&value).unwrap_or_else(|_| value.to_string())
}

/// Handle `GET /`: return the stored document re-serialized with indentation
pub async fn read_document(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let raw = match state.store.load().await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return http::build_text_response(MISSING_FILE_MESSAGE, &state.config.http, is_head);
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read {}: {e}",
                state.store.path().display()
            ));
            return http::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope("error", "Failed to read file"),
                &state.config.http,
                is_head,
            );
        }
    };

    let value = match json::parse(&raw) {
        Ok(value) => value,
        Err(e) => {
            logger::log_error(&format!(
                "Stored document {} is not valid JSON: {e}",
                state.store.path().display()
            ));
            return http::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope("error", "Stored document is not valid JSON"),
                &state.config.http,
                is_head,
            );
        }
    };

    match json::to_pretty(&value) {
        Ok(body) => http::build_json_response(StatusCode::OK, body, &state.config.http, is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize stored document: {e}"));
            http::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope("error", "Internal server error"),
                &state.config.http,
                is_head,
            )
        }
    }
}

/// Handle `POST /`: overwrite the stored document with the request body
pub async fn write_document(state: &AppState, body: &[u8]) -> Response<Full<Bytes>> {
    // Any content-type is accepted, only the body shape matters
    let value = match json::parse_bytes(body) {
        Ok(value) => value,
        // Malformed input still answers 200, callers inspect the body shape
        Err(_) => {
            return http::build_json_response(
                StatusCode::OK,
                envelope("error", "Incorrect json"),
                &state.config.http,
                false,
            );
        }
    };

    let compact = match json::to_compact(&value) {
        Ok(compact) => compact,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize document: {e}"));
            return http::build_json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope("error", "Internal server error"),
                &state.config.http,
                false,
            );
        }
    };

    if let Err(e) = state.store.store(&compact).await {
        logger::log_error(&format!(
            "Failed to write {}: {e}",
            state.store.path().display()
        ));
        return http::build_json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            envelope("error", "Failed to write file"),
            &state.config.http,
            false,
        );
    }

    http::build_json_response(
        StatusCode::OK,
        envelope("successful", "Json saved to file"),
        &state.config.http,
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StorageConfig,
    };
    use http_body_util::BodyExt;
    use std::path::Path;

    fn test_state(file: &Path) -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            storage: StorageConfig {
                file: file.to_string_lossy().into_owned(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                show_headers: false,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "test/0".to_string(),
                enable_cors: false,
                max_body_size: 1024,
            },
        };
        AppState::new(&config)
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_read_missing_file_returns_plain_text_hint() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir.path().join("form.json"));

        let response = read_document(&state, false).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_string(response).await, "File doesn't exists, create it!");
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir.path().join("form.json"));

        write_document(&state, br#"{"name": "alice", "tags": [1, 2]}"#).await;
        let response = read_document(&state, false).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );

        let returned: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(returned, serde_json::json!({"name": "alice", "tags": [1, 2]}));
    }

    #[tokio::test]
    async fn test_successful_write_envelope_and_compact_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("form.json");
        let state = test_state(&file);

        let response = write_document(&state, br#"{"a": 1}"#).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_string(response).await,
            "{\n    \"successful\": \"Json saved to file\"\n}"
        );
        // Document is stored compact regardless of the submitted formatting
        assert_eq!(std::fs::read_to_string(&file).unwrap(), r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_malformed_write_is_rejected_and_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("form.json");
        let state = test_state(&file);
        std::fs::write(&file, r#"{"keep":"me"}"#).unwrap();

        let response = write_document(&state, b"not json").await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_string(response).await,
            "{\n    \"error\": \"Incorrect json\"\n}"
        );
        assert_eq!(std::fs::read_to_string(&file).unwrap(), r#"{"keep":"me"}"#);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("form.json");
        let state = test_state(&file);

        write_document(&state, br#"{"a":1}"#).await;
        write_document(&state, br#"{"b":2}"#).await;
        assert_eq!(std::fs::read_to_string(&file).unwrap(), r#"{"b":2}"#);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir.path().join("form.json"));

        write_document(&state, br#"[1, 2, 3]"#).await;
        let first = body_string(read_document(&state, false).await).await;
        let second = body_string(read_document(&state, false).await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_scalar_documents_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("form.json");
        let state = test_state(&file);

        let response = write_document(&state, b"42").await;
        assert_eq!(response.status(), 200);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "42");

        let body = body_string(read_document(&state, false).await).await;
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn test_corrupt_stored_document_maps_to_500() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("form.json");
        let state = test_state(&file);
        std::fs::write(&file, "{truncated").unwrap();

        let response = read_document(&state, false).await;
        assert_eq!(response.status(), 500);
        assert_eq!(
            body_string(response).await,
            "{\n    \"error\": \"Stored document is not valid JSON\"\n}"
        );
    }

    #[tokio::test]
    async fn test_head_read_has_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir.path().join("form.json"));

        write_document(&state, br#"{"a":1}"#).await;
        let response = read_document(&state, true).await;
        assert_eq!(response.status(), 200);
        assert!(response.headers().contains_key("content-length"));
        assert!(body_string(response).await.is_empty());
    }
}
