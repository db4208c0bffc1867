mod common;

use common::*;
use docx_comments::document::{
    extract_comments, extract_groups, read_package_from_reader, AssociationGroup, ExtractError,
};
use std::collections::HashSet;
use std::io::Cursor;

#[cfg(test)]
mod extraction_tests {
    use super::*;

    fn group(text: &str, comments: &[&str]) -> AssociationGroup {
        AssociationGroup {
            associated_text: text.to_string(),
            comments: comments.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_single_comment_on_greeting() {
        let document = document_xml(&[range("0", &run("Hello world"))]);
        let comments = comments_xml(&[("0", "Nice greeting")]);
        let (_dir, path) = write_fixture(&docx(&document, &comments), "greeting.docx");

        let groups = extract_groups(&path).expect("Failed to extract comments");
        assert_eq!(groups, vec![group("Hello world", &["Nice greeting"])]);
    }

    #[test]
    fn test_identical_anchor_text_merges() {
        let document = document_xml(&[
            format!("{}{}", run("Status: "), range("1", &run("Draft"))),
            range("2", &run("Draft")),
        ]);
        let comments = comments_xml(&[("1", "fix this"), ("2", "agreed")]);
        let (_dir, path) = write_fixture(&docx(&document, &comments), "draft.docx");

        let groups = extract_groups(&path).unwrap();
        assert_eq!(groups, vec![group("Draft", &["fix this", "agreed"])]);
    }

    #[test]
    fn test_unterminated_range_keeps_comment() {
        let document = document_xml(&[format!(
            r#"<w:commentRangeStart w:id="3"/>{}"#,
            run("never closed")
        )]);
        let comments = comments_xml(&[("3", "where does this end?")]);
        let (_dir, path) = write_fixture(&docx(&document, &comments), "open.docx");

        let groups = extract_groups(&path).unwrap();
        assert_eq!(groups, vec![group("", &["where does this end?"])]);
    }

    #[test]
    fn test_missing_comments_member() {
        let document = document_xml(&[run("No reviews here")]);
        let bytes = package(&[("word/document.xml", document.as_str())]);
        let (_dir, path) = write_fixture(&bytes, "clean.docx");

        let err = extract_comments(&path).unwrap_err();
        assert!(
            matches!(err, ExtractError::MissingMember { ref member } if member == "word/comments.xml"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_missing_document_member() {
        let comments = comments_xml(&[("0", "orphan")]);
        let bytes = package(&[("word/comments.xml", comments.as_str())]);

        let err = read_package_from_reader(Cursor::new(bytes)).unwrap_err();
        assert!(
            matches!(err, ExtractError::MissingMember { ref member } if member == "word/document.xml")
        );
    }

    #[test]
    fn test_nonexistent_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_comments(&dir.path().join("nope.docx")).unwrap_err();
        assert!(matches!(err, ExtractError::Open { .. }));
    }

    #[test]
    fn test_not_a_zip_archive() {
        let (_dir, path) = write_fixture(b"this is plain text, not a package", "fake.docx");
        let err = extract_comments(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Archive(_)));
    }

    #[test]
    fn test_malformed_document_markup() {
        let comments = comments_xml(&[("0", "fine")]);
        let bytes = docx("<w:document><w:body>", &comments);
        let (_dir, path) = write_fixture(&bytes, "broken.docx");

        let err = extract_comments(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Markup { ref part, .. } if part == "word/document.xml"));
    }

    #[test]
    fn test_in_memory_package_matches_file() {
        let document = document_xml(&[range("0", &run("Hello world"))]);
        let comments = comments_xml(&[("0", "Nice greeting")]);
        let bytes = docx(&document, &comments);

        let parts = read_package_from_reader(Cursor::new(bytes.clone())).unwrap();
        let from_memory = docx_comments::document::associate(&parts.document, &parts.comments)
            .unwrap();

        let (_dir, path) = write_fixture(&bytes, "same.docx");
        assert_eq!(from_memory, extract_groups(&path).unwrap());
    }

    #[test]
    fn test_records_carry_author_details() {
        let document = document_xml(&[range("0", &run("Budget"))]);
        let comments = comments_xml(&[("0", "Too high")]);
        let (_dir, path) = write_fixture(&docx(&document, &comments), "budget.docx");

        let extraction = extract_comments(&path).unwrap();
        let record = &extraction.records[0];
        assert_eq!(record.author.as_deref(), Some("Reviewer"));
        assert_eq!(record.date.as_deref(), Some("2024-03-01T10:00:00Z"));
        assert_eq!(record.initials.as_deref(), Some("R"));
    }

    #[test]
    fn test_group_count_bounded_by_distinct_ids() {
        let document = document_xml(&[
            format!("{}{}", range("1", &run("alpha")), range("2", &run("beta"))),
            format!("{}{}", range("3", &run("alpha")), range("4", &run("gamma"))),
            range("5", &run("beta")),
        ]);
        let comments = comments_xml(&[
            ("1", "a1"),
            ("2", "b1"),
            ("3", "a2"),
            ("4", "g1"),
            ("5", "b2"),
        ]);
        let (_dir, path) = write_fixture(&docx(&document, &comments), "many.docx");

        let groups = extract_groups(&path).unwrap();
        let distinct_ids: HashSet<&str> = ["1", "2", "3", "4", "5"].into_iter().collect();
        assert!(groups.len() <= distinct_ids.len());
        assert_eq!(
            groups,
            vec![
                group("alpha", &["a1", "a2"]),
                group("beta", &["b1", "b2"]),
                group("gamma", &["g1"]),
            ]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let document = document_xml(&[
            range("0", &(run("one ") + &run("two"))),
            range("1", &run("three")),
        ]);
        let comments = comments_xml(&[("0", "first"), ("1", ""), ("0", "reply")]);
        let (_dir, path) = write_fixture(&docx(&document, &comments), "twice.docx");

        let first = extract_comments(&path).unwrap();
        let second = extract_comments(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.groups[1].comments, vec![String::new()]);
    }
}
