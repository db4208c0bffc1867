//! Package I/O
//!
//! Opens a .docx container and pulls out the two markup parts the comment
//! associator needs.

use log::debug;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::error::{ExtractError, Result};

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const COMMENTS_PART: &str = "word/comments.xml";

/// Raw markup of the parts read from a package
#[derive(Debug, Clone)]
pub struct PackageParts {
    pub document: Vec<u8>,
    pub comments: Vec<u8>,
}

/// Read both required parts from the package at `file_path`
pub fn read_package(file_path: &Path) -> Result<PackageParts> {
    let file = File::open(file_path).map_err(|source| ExtractError::Open {
        path: file_path.to_path_buf(),
        source,
    })?;

    read_package_from_reader(file)
}

/// Same as [`read_package`] over any seekable source, e.g. an in-memory buffer
pub fn read_package_from_reader<R: Read + Seek>(reader: R) -> Result<PackageParts> {
    let mut archive = ZipArchive::new(reader)?;

    // a missing comments part is reported before a missing document part
    let comments = read_member(&mut archive, COMMENTS_PART)?;
    let document = read_member(&mut archive, DOCUMENT_PART)?;

    Ok(PackageParts { document, comments })
}

fn read_member<R: Read + Seek>(archive: &mut ZipArchive<R>, member: &str) -> Result<Vec<u8>> {
    let mut entry = match archive.by_name(member) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ExtractError::MissingMember {
                member: member.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut bytes)
        .map_err(|source| ExtractError::Read {
            member: member.to_string(),
            source,
        })?;

    debug!("read {member}: {} bytes", bytes.len());
    Ok(bytes)
}
