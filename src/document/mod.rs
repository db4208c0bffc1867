//! Package reading and comment extraction module
//!
//! This module opens Microsoft Word (.docx) packages, parses the document and
//! comments parts, and associates every review comment with the text it
//! annotates.

pub mod associate;
pub mod error;
pub mod io;
pub(crate) mod markup;
pub mod models;

// Re-export models and the extraction entry points
pub use associate::{associate, extract, extract_comments, extract_groups};
pub use error::{ExtractError, Result};
pub use io::{read_package, read_package_from_reader, PackageParts};
pub use models::*;
