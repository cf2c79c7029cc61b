//! HTTP protocol layer module
//!
//! Response builders, MIME detection and conditional-request helpers,
//! decoupled from the demo's business logic.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    apply_cors, build_304_response, build_404_response, build_405_response, build_file_response,
    build_json_response, build_options_response, build_text_response,
};
