use std::path::PathBuf;

use thiserror::Error;

/// Failures of the layers around classification.
///
/// Classification itself never fails; these cover reading input, loading
/// configuration and rendering.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Typst compilation failed: {0}")]
    TypstCompile(String),

    #[error("PDF generation failed: {0}")]
    PdfExport(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
