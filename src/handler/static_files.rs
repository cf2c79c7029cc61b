//! Static demo file serving
//!
//! Serves the demo pages the extension is tested against. Files are read-only
//! inputs; anything outside the demo root is refused.

use crate::config::StaticConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve the demo file matching the request path
pub async fn serve(ctx: &RequestContext<'_>, cfg: &StaticConfig) -> Response<Full<Bytes>> {
    match load(&cfg.root, ctx.path, &cfg.index_files).await {
        Some((content, content_type)) => {
            let etag = cache::generate_etag(&content);
            if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
                return http::build_304_response(&etag);
            }
            http::build_file_response(&content, content_type, &etag, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Load a file from the demo root with index file support
async fn load(root: &str, path: &str, index_files: &[String]) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and prevent directory traversal
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let mut file_path = Path::new(root).join(&clean_path);

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!("Demo root not found or inaccessible '{root}': {e}"));
            return None;
        }
    };

    // Directory requests fall back to index files
    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in index_files {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // Missing files are ordinary 404s, no need to log at warning level
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}
