use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelkit operations.
///
/// `InvalidFormat` and `InvalidExtent` represent caller programming errors
/// (contract violations upstream), never recoverable runtime conditions.
/// They are surfaced immediately and nothing is retried.
#[derive(Debug, Error)]
pub enum LabelKitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized box format '{0}' (expected XYWH, XYXY, CXYWH or a REL_-prefixed variant)")]
    InvalidFormat(String),

    #[error("Invalid image extent {width}x{height} (both dimensions must be positive)")]
    InvalidExtent { width: u32, height: u32 },

    #[error("Label index {index} is out of range for label list with {len} entry(ies)")]
    LabelIndexOutOfRange { index: usize, len: usize },

    #[error("Failed to probe image dimensions of {path}: {message}")]
    ImageProbe { path: PathBuf, message: String },

    #[error("Failed to parse box list CSV at record {record}: {message}")]
    BoxCsvParse { record: usize, message: String },

    #[error("Failed to parse box list JSON: {0}")]
    BoxJsonParse(#[source] serde_json::Error),

    #[error("Failed to parse widget result: {0}")]
    ResultParse(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
