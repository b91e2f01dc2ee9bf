use crate::format::OutputFormat;

/// Errors from rendering a diff result.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The structured record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The format produces bytes that cannot be shown as text.
    #[error("{0} output is binary; write it to a file with --output")]
    BinaryOutput(OutputFormat),

    /// Drawing or encoding an image failed.
    #[error("image error: {0}")]
    Image(String),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}

/// Result alias for rendering.
pub type RenderResult<T> = Result<T, RenderError>;
