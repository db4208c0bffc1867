//! Error types for package reading and comment extraction

use std::path::PathBuf;
use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Everything that can stop an extraction. None of these are recoverable
/// for the current package.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid .docx package: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("invalid .docx package: missing {member}")]
    MissingMember { member: String },

    #[error("failed to read {member}: {source}")]
    Read {
        member: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {part}: {message}")]
    Markup { part: String, message: String },

    #[error("<{element}> in {part} has no {attribute} attribute")]
    MissingAttribute {
        part: String,
        element: String,
        attribute: String,
    },
}

impl ExtractError {
    pub(crate) fn markup(part: &str, message: impl Into<String>) -> Self {
        ExtractError::Markup {
            part: part.to_string(),
            message: message.into(),
        }
    }
}
