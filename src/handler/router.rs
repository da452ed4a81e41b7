//! Request dispatch module
//!
//! Entry point for HTTP request processing: method check, query validation,
//! file existence check, then the mode branch. Each request begins and ends
//! within one invocation; nothing carries over between requests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes, Incoming};
use hyper::{Method, Request, Response, StatusCode, Version};

use crate::config::{AppState, HttpConfig};
use crate::handler::{files, query};
use crate::http::response;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);

    let response = match check_http_method(req.method()) {
        Some(resp) => resp,
        None => respond(req.uri().query(), &state.config.http).await,
    };

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_size(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Produce the response for a GET request's query string
///
/// This is the whole server contract: the request path is ignored, only the
/// query parameters matter.
pub async fn respond(query: Option<&str>, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let request = match query::parse_file_request(query) {
        Ok(request) => request,
        Err(e) => return reject(StatusCode::BAD_REQUEST, &e.to_string(), http_config),
    };

    if !files::file_exists(&request.file_path).await {
        return reject(
            StatusCode::NOT_FOUND,
            &format!("No such file exists: {}", request.file_path),
            http_config,
        );
    }

    match request.mode {
        query::Mode::Data => files::serve_data(&request.file_path, http_config).await,
        query::Mode::Result => reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Not supported yet :(",
            http_config,
        ),
    }
}

/// Only GET is implemented; everything else is rejected up front
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    if method == Method::GET {
        return None;
    }
    logger::log_warning(&format!("Method not allowed: {method}"));
    Some(response::build_405_response())
}

/// Log the failure and answer with the HTML error page
fn reject(status: StatusCode, message: &str, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    logger::log_error(message);
    response::build_error_response(status, message, http_config)
}

/// Seed an access log entry from the request line and headers
fn access_entry(req: &Request<Incoming>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version());
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry
}

fn header_value(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: Version) -> String {
    if version == Version::HTTP_10 {
        "1.0".to_string()
    } else if version == Version::HTTP_11 {
        "1.1".to_string()
    } else if version == Version::HTTP_2 {
        "2".to_string()
    } else {
        format!("{version:?}")
    }
}

fn body_size(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|size| usize::try_from(size).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io::Write;
    use std::path::PathBuf;

    fn test_http_config() -> HttpConfig {
        HttpConfig {
            server_name: "yarfs/test".to_string(),
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    struct TempFile {
        path: PathBuf,
    }

    impl TempFile {
        fn create(name: &str, contents: &[u8]) -> Self {
            let path =
                std::env::temp_dir().join(format!("yarfs-router-{}-{name}", std::process::id()));
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(contents).unwrap();
            Self { path }
        }

        fn path_str(&self) -> &str {
            self.path.to_str().unwrap()
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[tokio::test]
    async fn no_query_string_is_missing_mode() {
        let resp = respond(None, &test_http_config()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(resp)
            .await
            .contains("No 'mode' parameter found in url"));
    }

    #[tokio::test]
    async fn missing_file_path_is_bad_request() {
        let resp = respond(Some("mode=data"), &test_http_config()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(resp)
            .await
            .contains("No 'file_path' parameter found in url"));
    }

    #[tokio::test]
    async fn invalid_mode_lists_the_permitted_set() {
        let file = TempFile::create("present.txt", b"x");
        let query = format!("mode=foo&file_path={}", file.path_str());
        let resp = respond(Some(&query), &test_http_config()).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_string(resp).await;
        assert!(body.contains("foo"));
        assert!(body.contains("['data', 'result']"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found_and_names_the_path() {
        let resp = respond(
            Some("mode=data&file_path=./definitely-absent.txt"),
            &test_http_config(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_string(resp)
            .await
            .contains("No such file exists: ./definitely-absent.txt"));
    }

    #[tokio::test]
    async fn data_mode_round_trips_file_bytes() {
        let file = TempFile::create("hello.txt", b"hello");
        let query = format!("mode=data&file_path={}", file.path_str());
        let resp = respond(Some(&query), &test_http_config()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_string(resp).await, "hello");
    }

    #[tokio::test]
    async fn result_mode_is_unimplemented_even_for_existing_files() {
        let file = TempFile::create("result.txt", b"anything");
        let query = format!("mode=result&file_path={}", file.path_str());
        let resp = respond(Some(&query), &test_http_config()).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(resp).await.contains("Not supported yet :("));
    }

    #[tokio::test]
    async fn validation_order_puts_mode_before_file_check() {
        // Invalid mode with a nonexistent file: 400 wins over 404
        let resp = respond(
            Some("mode=foo&file_path=./definitely-absent.txt"),
            &test_http_config(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn only_get_passes_the_method_check() {
        assert!(check_http_method(&Method::GET).is_none());

        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let resp = check_http_method(&method).expect("non-GET must be rejected");
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[test]
    fn version_labels_match_access_log_convention() {
        assert_eq!(http_version_label(Version::HTTP_11), "1.1");
        assert_eq!(http_version_label(Version::HTTP_10), "1.0");
        assert_eq!(http_version_label(Version::HTTP_2), "2");
    }
}
