//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, body size limits, and dispatching to the document handlers.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::document;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let version = req.version();

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(&method, req.uri(), version);
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let response = dispatch(req, &state, &path, &method).await;

    if access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = version_str(version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response_body_bytes(&response);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route the request to a document handler
async fn dispatch<B>(
    req: Request<B>,
    state: &Arc<AppState>,
    path: &str,
    method: &Method,
) -> Response<Full<Bytes>>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    // Single-resource service, the document lives at "/"
    if path != "/" {
        return http::build_404_response();
    }

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    // 2. Check declared body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Dispatch
    match *method {
        Method::GET | Method::HEAD => {
            document::read_document(state, *method == Method::HEAD).await
        }
        Method::POST => match req.collect().await {
            Ok(collected) => document::write_document(state, &collected.to_bytes()).await,
            Err(e) => {
                logger::log_warning(&format!("Failed to read request body: {e}"));
                http::build_400_response("Failed to read request body")
            }
        },
        _ => http::build_405_response(),
    }
}

/// Check HTTP method and return an early response for unsupported ones
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD | &Method::POST => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Render the HTTP version for access logging
fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

/// Exact response body size, used for access logging
fn response_body_bytes(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body;
    usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX)
}
