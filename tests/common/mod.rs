//! Helpers for building .docx packages in tests

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

pub fn document_xml(paragraphs: &[String]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<w:p>{p}</w:p>")).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {W_NS}><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

pub fn comments_xml(comments: &[(&str, &str)]) -> String {
    let inner: String = comments
        .iter()
        .map(|(id, text)| {
            format!(
                r#"<w:comment w:id="{id}" w:author="Reviewer" w:date="2024-03-01T10:00:00Z" w:initials="R"><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:comment>"#
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:comments {W_NS}>{inner}</w:comments>"#
    )
}

pub fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

/// A comment range with id `id` wrapping `inner`
pub fn range(id: &str, inner: &str) -> String {
    format!(r#"<w:commentRangeStart w:id="{id}"/>{inner}<w:commentRangeEnd w:id="{id}"/><w:r><w:commentReference w:id="{id}"/></w:r>"#)
}

/// Zip the given members into an in-memory package
pub fn package(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer
        .start_file("[Content_Types].xml", options)
        .expect("Failed to start content types");
    writer
        .write_all(br#"<?xml version="1.0"?><Types/>"#)
        .expect("Failed to write content types");

    for (name, content) in members {
        writer.start_file(*name, options).expect("Failed to start member");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write member");
    }

    writer.finish().expect("Failed to finish package").into_inner()
}

pub fn docx(document: &str, comments: &str) -> Vec<u8> {
    package(&[
        ("word/document.xml", document),
        ("word/comments.xml", comments),
    ])
}

/// Write `bytes` to `name` inside a fresh temp dir; keep the dir alive while the path is used
pub fn write_fixture(bytes: &[u8], name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    (dir, path)
}
