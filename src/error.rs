use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A block could not be placed even on an empty page.
    #[error("layout error: {0}")]
    Layout(String),
}
