//! Query parameter extraction module
//!
//! The query string carries the entire request contract: `mode` selects the
//! server behavior and `file_path` names the file to read. Parsing yields
//! either a validated [`FileRequest`] or a tagged [`QueryError`] whose
//! display form is the exact message sent back to the client.

use std::fmt;

const MODE: &str = "mode";
const FILE_PATH: &str = "file_path";

/// Server behavior selected by the `mode` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Return the file's raw bytes
    Data,
    /// Computed results; permanently unimplemented
    Result,
}

impl Mode {
    /// Value set advertised to clients on an invalid `mode`
    pub const SUGGESTED: &'static str = "['data', 'result']";

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "data" => Some(Self::Data),
            "result" => Some(Self::Result),
            _ => None,
        }
    }
}

/// A validated file request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub mode: Mode,
    pub file_path: String,
}

/// Why a query string failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    MissingMode,
    MissingFilePath,
    InvalidMode(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMode => write!(f, "No 'mode' parameter found in url"),
            Self::MissingFilePath => write!(f, "No 'file_path' parameter found in url"),
            Self::InvalidMode(value) => write!(
                f,
                "Invalid mode value - '{value}', use suggested: {}",
                Mode::SUGGESTED
            ),
        }
    }
}

impl std::error::Error for QueryError {}

/// Parse and validate the two required parameters from a raw query string
///
/// Pair handling follows common form decoding: pairs split on `&`, keys and
/// values decode percent-escapes and `+`, a parameter given with an empty
/// value counts as absent, and only the first value of a repeated parameter
/// is consulted.
pub fn parse_file_request(query: Option<&str>) -> Result<FileRequest, QueryError> {
    let mode_value = first_param(query, MODE).ok_or(QueryError::MissingMode)?;
    let file_path = first_param(query, FILE_PATH).ok_or(QueryError::MissingFilePath)?;

    match Mode::from_value(&mode_value) {
        Some(mode) => Ok(FileRequest { mode, file_path }),
        None => Err(QueryError::InvalidMode(mode_value)),
    }
}

/// First decoded value for `name`; pairs with an empty raw value are skipped
fn first_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if value.is_empty() || decode_component(key) != name {
                return None;
            }
            Some(decode_component(value))
        })
}

/// Decode percent-escapes and `+` in a query component
///
/// Invalid escapes are kept literally; decoded bytes are interpreted as
/// UTF-8 with replacement for invalid sequences.
fn decode_component(component: &str) -> String {
    let bytes = component.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        decoded.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        decoded.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
