//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, exact-match
//! route dispatch, and the finalize step shared by every route.

use crate::config::Config;
use crate::handler::{mock, static_files};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Uri};
use std::convert::Infallible;
use std::sync::Arc;

/// Analytics beacon mock route
pub const TRACK_PATH: &str = "/fake/track";
/// Miner payload mock route
pub const MINER_PAYLOAD_PATH: &str = "/fake/miner_payload";

/// Request context encapsulating what the route handlers need
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let access_log = config.logging.access_log;

    // 1. Method gate
    if let Some(resp) = check_http_method(&method) {
        return Ok(finalize(resp, &method, &uri, access_log));
    }

    logger::log_headers_count(req.headers().len(), config.logging.show_headers);

    // 2. Dispatch on the untouched path
    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        is_head: method == Method::HEAD,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    let response = route_request(&ctx, &config).await;
    Ok(finalize(response, &method, &uri, access_log))
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Exact-match routing, first match wins
async fn route_request(ctx: &RequestContext<'_>, config: &Config) -> Response<Full<Bytes>> {
    match ctx.path {
        TRACK_PATH => mock::track(ctx.query, ctx.is_head),
        MINER_PAYLOAD_PATH => mock::miner_payload(ctx.is_head),
        _ => static_files::serve(ctx, &config.static_files).await,
    }
}

/// Uniform final step for every response regardless of route: inject the
/// cross-origin header and write the access log line.
fn finalize(
    mut response: Response<Full<Bytes>>,
    method: &Method,
    uri: &Uri,
    access_log: bool,
) -> Response<Full<Bytes>> {
    http::apply_cors(&mut response);
    if access_log {
        logger::log_request(method, uri, response.status());
    }
    response
}
