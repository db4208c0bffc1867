//! docx-comments: review comment extraction for .docx files
//!
//! This library reads Microsoft Word documents, pairs every reviewer comment
//! with the text it is anchored to, and renders the result as plain text or
//! JSON.

pub mod config;
pub mod document;
pub mod render;

use serde::{Deserialize, Serialize};

/// Display format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// One header per text segment, one line per comment
    #[default]
    Original,
    /// First comment as parent, the rest as indented children
    Relationship,
    /// Boxed listing with a title banner and quoted text
    Enhanced,
    /// Pretty-printed JSON array
    Json,
}

// Re-export commonly used types
pub use config::Config;
pub use document::{AssociationGroup, CommentRecord, ExtractError, Extraction};
pub use render::{render, RenderOptions};
