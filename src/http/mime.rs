//! MIME type guessing module
//!
//! Maps a file path's extension to a Content-Type through a static lookup
//! table. The guess is best-effort: an unknown or missing extension yields
//! `None` and the response carries no Content-Type header at all.

use std::path::Path;

/// Guess the Content-Type for a file path from its extension
///
/// # Examples
/// ```
/// use std::path::Path;
/// use yarfs::http::mime::guess_content_type;
/// assert_eq!(guess_content_type(Path::new("index.html")), Some("text/html"));
/// assert_eq!(guess_content_type(Path::new("clip.mp4")), Some("video/mp4"));
/// assert_eq!(guess_content_type(Path::new("data.bin")), None);
/// ```
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    match extension.to_ascii_lowercase().as_str() {
        // Text
        "html" | "htm" => Some("text/html"),
        "css" => Some("text/css"),
        "txt" | "md" => Some("text/plain"),
        "xml" => Some("application/xml"),

        // JavaScript/WASM
        "js" | "mjs" => Some("application/javascript"),
        "json" => Some("application/json"),
        "wasm" => Some("application/wasm"),

        // Images
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "webp" => Some("image/webp"),

        // Video
        "mp4" => Some("video/mp4"),
        "webm" => Some("video/webm"),
        "ogg" | "ogv" => Some("video/ogg"),
        "mov" => Some("video/quicktime"),
        "avi" => Some("video/x-msvideo"),

        // Audio
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "flac" => Some("audio/flac"),
        "m4a" => Some("audio/mp4"),

        // Fonts
        "woff" => Some("font/woff"),
        "woff2" => Some("font/woff2"),
        "ttf" => Some("font/ttf"),
        "otf" => Some("font/otf"),

        // Documents and archives
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        "gz" | "gzip" => Some("application/gzip"),
        "tar" => Some("application/x-tar"),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_types() {
        assert_eq!(guess_content_type(Path::new("test.txt")), Some("text/plain"));
        assert_eq!(guess_content_type(Path::new("a/b/page.html")), Some("text/html"));
        assert_eq!(guess_content_type(Path::new("style.css")), Some("text/css"));
        assert_eq!(guess_content_type(Path::new("app.js")), Some("application/javascript"));
        assert_eq!(guess_content_type(Path::new("logo.png")), Some("image/png"));
        assert_eq!(guess_content_type(Path::new("clip.mp4")), Some("video/mp4"));
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(guess_content_type(Path::new("PHOTO.JPG")), Some("image/jpeg"));
        assert_eq!(guess_content_type(Path::new("Readme.TXT")), Some("text/plain"));
    }

    #[test]
    fn unknown_or_missing_extension_yields_no_guess() {
        assert_eq!(guess_content_type(Path::new("data.xyz")), None);
        assert_eq!(guess_content_type(Path::new("Makefile")), None);
        assert_eq!(guess_content_type(Path::new(".bashrc")), None);
    }
}
