//! Mock endpoint handlers
//!
//! The two endpoints the ScriptGuard extension is pointed at during manual
//! testing: an analytics beacon and a simulated miner payload download.
//! Both are stateless; each response is built fresh and discarded.

use crate::http;
use crate::logger;
use chrono::{Local, SecondsFormat, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use url::form_urlencoded;

const MINER_PAYLOAD_PREFIX: &str = "miner-payload-";
const MINER_PAYLOAD_FILLER: usize = 100;

const TRACK_MESSAGE: &str = "Tracked by ScriptGuard demo server";

/// Beacon confirmation payload.
/// Field order is the serialization order.
#[derive(Debug, Serialize)]
struct TrackResponse {
    status: &'static str,
    ts: TsValue,
    received_at: String,
    message: &'static str,
}

/// The `ts` field echoes the caller's value as raw text; when the caller
/// omits it, the server substitutes its own clock as integer milliseconds.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
enum TsValue {
    Echoed(String),
    Millis(i64),
}

/// Handle the analytics tracking endpoint
pub fn track(query: Option<&str>, is_head: bool) -> Response<Full<Bytes>> {
    let ts = extract_ts(query).map_or_else(
        || TsValue::Millis(Utc::now().timestamp_millis()),
        TsValue::Echoed,
    );

    let payload = TrackResponse {
        status: "ok",
        ts,
        received_at: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        message: TRACK_MESSAGE,
    };

    logger::log_track();
    http::build_json_response(&payload, is_head)
}

/// First `ts` value from the query string, if any.
/// Decoding is lenient: pairs that don't parse are simply skipped.
fn extract_ts(query: Option<&str>) -> Option<String> {
    let query = query?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "ts")
        .map(|(_, value)| value.into_owned())
}

/// Handle the miner payload endpoint. Consults nothing from the request;
/// the body is byte-identical on every invocation.
pub fn miner_payload(is_head: bool) -> Response<Full<Bytes>> {
    logger::log_miner();
    http::build_text_response(miner_payload_body(), is_head)
}

fn miner_payload_body() -> String {
    let mut body = String::with_capacity(MINER_PAYLOAD_PREFIX.len() + MINER_PAYLOAD_FILLER);
    body.push_str(MINER_PAYLOAD_PREFIX);
    body.push_str(&"x".repeat(MINER_PAYLOAD_FILLER));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body()
            .collect()
            .await
            .expect("body collect")
            .to_bytes()
    }

    #[tokio::test]
    async fn track_echoes_ts_verbatim() {
        let resp = track(Some("ts=12345"), false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        let body = body_bytes(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        assert_eq!(json["status"], "ok");
        // Echoed values stay raw text even when numeric-looking
        assert_eq!(json["ts"], "12345");
        assert_eq!(json["message"], TRACK_MESSAGE);
        assert!(json["received_at"].is_string());
    }

    #[tokio::test]
    async fn track_echoes_percent_decoded_ts() {
        let resp = track(Some("ts=hello%20world&other=1"), false);
        let body = body_bytes(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        assert_eq!(json["ts"], "hello world");
    }

    #[tokio::test]
    async fn track_defaults_ts_to_current_millis() {
        let before = Utc::now().timestamp_millis();
        let resp = track(None, false);
        let after = Utc::now().timestamp_millis();

        let body = body_bytes(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        let ts = json["ts"].as_i64().expect("defaulted ts is a number");
        assert!(ts >= before && ts <= after);
    }

    #[tokio::test]
    async fn track_defaults_ts_when_key_absent() {
        let resp = track(Some("other=value"), false);
        let body = body_bytes(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).expect("valid json");
        assert!(json["ts"].is_i64());
    }

    #[tokio::test]
    async fn track_serializes_fields_in_order() {
        let resp = track(Some("ts=1"), false);
        let body = body_bytes(resp).await;
        let text = std::str::from_utf8(&body).expect("utf-8 body");
        assert!(text.starts_with(r#"{"status":"ok","ts":"1","received_at":"#));
        assert!(text.ends_with(&format!(r#""message":"{TRACK_MESSAGE}"}}"#)));
    }

    #[test]
    fn track_sets_cors_header() {
        let resp = track(Some("ts=1"), false);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn extract_ts_takes_first_value() {
        assert_eq!(extract_ts(Some("ts=a&ts=b")), Some("a".to_string()));
        assert_eq!(extract_ts(Some("x=1&ts=42")), Some("42".to_string()));
        assert_eq!(extract_ts(Some("x=1")), None);
        assert_eq!(extract_ts(None), None);
    }

    #[test]
    fn extract_ts_is_lenient_on_garbage() {
        // Arbitrary input never raises; unparseable pairs are dropped
        assert_eq!(extract_ts(Some("&&==&ts=ok&%%")), Some("ok".to_string()));
    }

    #[tokio::test]
    async fn miner_payload_is_fixed_format() {
        let resp = miner_payload(false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = body_bytes(resp).await;
        assert_eq!(body.len(), 114);
        let expected = format!("miner-payload-{}", "x".repeat(100));
        assert_eq!(body, expected.as_bytes());
    }

    #[tokio::test]
    async fn miner_payload_is_deterministic() {
        let first = body_bytes(miner_payload(false)).await;
        let second = body_bytes(miner_payload(false)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn miner_payload_head_has_empty_body() {
        let resp = miner_payload(true);
        assert_eq!(resp.headers()["Content-Length"], "114");
        let body = body_bytes(resp).await;
        assert!(body.is_empty());
    }
}
