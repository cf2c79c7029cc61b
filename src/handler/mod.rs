//! Request handler module
//!
//! Routing dispatch for the demo server: the two mock endpoints plus the
//! static demo file fallback.

pub mod mock;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
