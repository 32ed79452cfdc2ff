use thiserror::Error;
use verso_layout::LayoutError;
use verso_style::StyleParseError;

/// Error type for laying out a serialized document.
#[derive(Error, Debug)]
pub enum VersoError {
    #[error("Parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid style: {0}")]
    Style(#[from] StyleParseError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}
