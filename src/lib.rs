//! Yet another Rust file server.
//!
//! Serves local file contents selected entirely by query parameters:
//! `GET /<any-path>?mode=data&file_path=<path>` answers with the file's raw
//! bytes and a content type guessed from the extension, while `mode=result`
//! is a placeholder that always reports a server error. Everything else is
//! rejected with an HTML error page.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
