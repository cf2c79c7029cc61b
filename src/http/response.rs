//! HTTP response building module
//!
//! Builders for the demo server's response shapes. Every builder degrades to
//! an empty response with an error log if header assembly fails; none panic.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::Response;
use serde::Serialize;

/// Inject `Access-Control-Allow-Origin: *` unless the handler already set it.
/// The demo pages are opened from file:// or other origins, so every route
/// must be readable cross-origin.
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    if !headers.contains_key(ACCESS_CONTROL_ALLOW_ORIGIN) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

/// Build 200 JSON response from any serializable payload
pub fn build_json_response<T: Serialize>(body: &T, is_head: bool) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };

    let content_length = json.len();
    let payload = if is_head { Bytes::new() } else { Bytes::from(json) };

    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(payload))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 plain text response
pub fn build_text_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let payload = if is_head { Bytes::new() } else { Bytes::from(content) };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Content-Length", content_length)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(payload))
        .unwrap_or_else(|e| {
            log_build_error("text", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 static file response with `ETag` and cache control
pub fn build_file_response(
    data: &[u8],
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
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
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(
            r#"{"error":"Internal server error"}"#,
        )))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))))
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_cors_inserts_header() {
        let mut resp = build_404_response();
        assert!(!resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
        apply_cors(&mut resp);
        assert_eq!(
            resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[test]
    fn apply_cors_is_idempotent() {
        let mut resp = build_text_response("hello".to_string(), false);
        apply_cors(&mut resp);
        let values: Vec<_> = resp
            .headers()
            .get_all(ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .collect();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn text_response_headers() {
        let resp = build_text_response("payload".to_string(), false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(resp.headers()["Content-Length"], "7");
    }

    #[test]
    fn head_omits_body_but_keeps_length() {
        let resp = build_text_response("payload".to_string(), true);
        assert_eq!(resp.headers()["Content-Length"], "7");
    }

    #[test]
    fn options_response_allows_cross_origin() {
        let resp = build_options_response();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
