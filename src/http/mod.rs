//! HTTP protocol layer module
//!
//! Response building and MIME guessing, decoupled from request dispatch.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{build_405_response, build_error_response, build_file_response};
