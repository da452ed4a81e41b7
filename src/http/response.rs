//! HTTP response building module
//!
//! Builders for the handful of responses the server produces: raw file
//! bytes, HTML error pages, and method rejections.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;
use crate::logger;

/// Build an error response rendering `message` as an HTML page
///
/// The same markup is used for every rejection the server can issue, with
/// the status code carrying the actual distinction.
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    let body = format!("<html><body><h1>{message}</h1></body></html>");
    Response::builder()
        .status(status)
        .header("Content-Type", "text/html")
        .header("Content-Length", body.len())
        .header("Server", &http_config.server_name)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 OK carrying a file's raw bytes
///
/// The Content-Type header is omitted entirely when no guess is available
/// for the file's extension.
pub fn build_file_response(
    content: Vec<u8>,
    content_type: Option<&'static str>,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Length", content.len())
        .header("Server", &http_config.server_name);

    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }

    builder
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_http_config() -> HttpConfig {
        HttpConfig {
            server_name: "yarfs/test".to_string(),
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn error_page_wraps_message_in_html() {
        let resp = build_error_response(
            StatusCode::BAD_REQUEST,
            "No 'mode' parameter found in url",
            &test_http_config(),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()["Content-Type"], "text/html");
        assert_eq!(resp.headers()["Server"], "yarfs/test");
        assert_eq!(
            body_string(resp).await,
            "<html><body><h1>No 'mode' parameter found in url</h1></body></html>"
        );
    }

    #[tokio::test]
    async fn file_response_carries_exact_bytes() {
        let resp = build_file_response(b"hello".to_vec(), Some("text/plain"), &test_http_config());
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert_eq!(body_string(resp).await, "hello");
    }

    #[test]
    fn file_response_without_guess_omits_content_type() {
        let resp = build_file_response(vec![0, 1, 2], None, &test_http_config());
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("Content-Type").is_none());
    }

    #[test]
    fn method_not_allowed_advertises_get() {
        let resp = build_405_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "GET");
    }
}
