//! File serving module
//!
//! Existence check, file read and response building for the `data` mode.
//!
//! The path is served exactly as the client supplied it, absolute or
//! relative to the server's working directory. There is no sandboxing and
//! no traversal protection: any file the process can read is reachable, so
//! the listening address must be treated as trusted-network only.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use tokio::fs;

use crate::config::HttpConfig;
use crate::http::{mime, response};
use crate::logger;

/// Whether `file_path` names an existing regular file
pub async fn file_exists(file_path: &str) -> bool {
    fs::metadata(file_path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Read the file and respond with its raw bytes (`mode=data`)
///
/// Existence was checked before dispatch, so a failed read here is a real
/// fault (permissions, or the file vanished in between) and maps to a 500.
pub async fn serve_data(file_path: &str, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    match fs::read(file_path).await {
        Ok(content) => {
            let content_type = mime::guess_content_type(Path::new(file_path));
            response::build_file_response(content, content_type, http_config)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{file_path}': {e}"));
            response::build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to read file: {file_path}"),
                http_config,
            )
        }
    }
}
