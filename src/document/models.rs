//! Core data structures for extracted comments
//!
//! This module defines the public types produced by the comment associator
//! and consumed by the renderers.

use serde::{Deserialize, Serialize};

/// One `<w:comment>` from the comments part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Range identifier; several comments may share one
    pub id: String,
    pub body: String,
    pub author: Option<String>,
    pub date: Option<String>,
    pub initials: Option<String>,
}

/// A distinct piece of anchor text and every comment attached to it.
///
/// Ranges that enclose identical text share one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationGroup {
    pub associated_text: String,
    pub comments: Vec<String>,
}

/// Full result of extracting one package
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub groups: Vec<AssociationGroup>,
    /// All comment records in comments-part order
    pub records: Vec<CommentRecord>,
}
