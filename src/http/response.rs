//! HTTP response building module
//!
//! Provides builders for the JSON/text bodies and the various HTTP status
//! code responses, decoupled from specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;

/// Build a JSON response with the given status and pre-serialized body
pub fn build_json_response(
    status: StatusCode,
    json: String,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(json) };

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("JSON", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build a 200 plain-text response
pub fn build_text_response(
    text: &str,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = text.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(text.to_string())
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", content_length)
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("text", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, POST, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, POST, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build 400 Bad Request response with a JSON error body
pub fn build_400_response(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::from("Bad Request")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_http_config() -> HttpConfig {
        HttpConfig {
            server_name: "test/0".to_string(),
            enable_cors: false,
            max_body_size: 1024,
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_headers_and_body() {
        let response = build_json_response(
            StatusCode::OK,
            r#"{"a": 1}"#.to_string(),
            &test_http_config(),
            false,
        );
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );
        assert_eq!(response.headers()["server"].to_str().unwrap(), "test/0");
        assert_eq!(body_string(response).await, r#"{"a": 1}"#);
    }

    #[tokio::test]
    async fn test_head_response_keeps_length_but_drops_body() {
        let response = build_json_response(
            StatusCode::OK,
            r#"{"a": 1}"#.to_string(),
            &test_http_config(),
            true,
        );
        assert_eq!(response.headers()["content-length"].to_str().unwrap(), "8");
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_text_response_content_type() {
        let response = build_text_response("hello", &test_http_config(), false);
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_string(response).await, "hello");
    }

    #[tokio::test]
    async fn test_cors_header_only_when_enabled() {
        let mut config = test_http_config();
        let without = build_text_response("x", &config, false);
        assert!(!without.headers().contains_key("access-control-allow-origin"));

        config.enable_cors = true;
        let with = build_text_response("x", &config, false);
        assert_eq!(
            with.headers()["access-control-allow-origin"].to_str().unwrap(),
            "*"
        );
    }

    #[test]
    fn test_status_helpers() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_405_response().status(), 405);
        assert_eq!(build_413_response().status(), 413);
        assert_eq!(build_options_response(false).status(), 204);
        assert_eq!(build_400_response("bad").status(), 400);
    }

    #[test]
    fn test_405_lists_allowed_methods() {
        let response = build_405_response();
        assert_eq!(
            response.headers()["allow"].to_str().unwrap(),
            "GET, HEAD, POST, OPTIONS"
        );
    }
}
