//! Comment-to-text association
//!
//! Every `<w:commentRangeStart>` in the document body opens a comment range.
//! The runs lying between it and the matching `<w:commentRangeEnd>` under the
//! same parent make up the range's anchor text, and every `<w:comment>` with
//! the same identifier is attached to it. Results are grouped by anchor text
//! content, so two ranges wrapping identical wording produce a single group.

use log::{debug, trace};
use std::collections::HashMap;
use std::path::Path;

use super::error::{ExtractError, Result};
use super::io::{read_package, COMMENTS_PART, DOCUMENT_PART};
use super::markup::Element;
use super::models::{AssociationGroup, CommentRecord, Extraction};

/// Read a .docx package and extract its comments
pub fn extract_comments(file_path: &Path) -> Result<Extraction> {
    let parts = read_package(file_path)?;
    extract(&parts.document, &parts.comments)
}

/// Read a .docx package and return only the association groups
pub fn extract_groups(file_path: &Path) -> Result<Vec<AssociationGroup>> {
    Ok(extract_comments(file_path)?.groups)
}

/// Associate comment bodies with the text they annotate
pub fn associate(document_markup: &[u8], comments_markup: &[u8]) -> Result<Vec<AssociationGroup>> {
    Ok(extract(document_markup, comments_markup)?.groups)
}

/// Parse both parts and build the association groups plus the raw comment records
pub fn extract(document_markup: &[u8], comments_markup: &[u8]) -> Result<Extraction> {
    let comments_root = Element::parse(comments_markup, COMMENTS_PART)?;
    let document_root = Element::parse(document_markup, DOCUMENT_PART)?;

    let records = collect_comment_records(&comments_root);

    let mut bodies_by_id: HashMap<&str, Vec<&str>> = HashMap::new();
    for record in &records {
        bodies_by_id
            .entry(record.id.as_str())
            .or_default()
            .push(record.body.as_str());
    }

    let range_ids = collect_range_ids(&document_root)?;
    debug!(
        "found {} comment ranges and {} comments",
        range_ids.len(),
        records.len()
    );

    let mut groups: Vec<AssociationGroup> = Vec::new();
    let mut group_by_text: HashMap<String, usize> = HashMap::new();

    for id in range_ids {
        let mut associated_text = String::new();
        collect_enclosed_text(&document_root, id, &mut associated_text);
        if associated_text.is_empty() {
            trace!("comment range {id} encloses no runs");
        }

        let bodies = bodies_by_id.get(id).map(Vec::as_slice).unwrap_or_default();
        if bodies.is_empty() {
            trace!("comment range {id} has no comments");
        }

        match group_by_text.get(&associated_text) {
            Some(&index) => groups[index]
                .comments
                .extend(bodies.iter().map(|body| body.to_string())),
            None => {
                group_by_text.insert(associated_text.clone(), groups.len());
                groups.push(AssociationGroup {
                    associated_text,
                    comments: bodies.iter().map(|body| body.to_string()).collect(),
                });
            }
        }
    }

    debug!("built {} association groups", groups.len());

    Ok(Extraction { groups, records })
}

/// Identifiers of every range start marker, in document order
fn collect_range_ids(document_root: &Element) -> Result<Vec<&str>> {
    document_root
        .descendants()
        .filter(|element| element.is_w("commentRangeStart"))
        .map(|marker| {
            marker
                .w_attr("id")
                .ok_or_else(|| ExtractError::MissingAttribute {
                    part: DOCUMENT_PART.to_string(),
                    element: "w:commentRangeStart".to_string(),
                    attribute: "w:id".to_string(),
                })
        })
        .collect()
}

fn collect_comment_records(comments_root: &Element) -> Vec<CommentRecord> {
    comments_root
        .descendants()
        .filter(|element| element.is_w("comment"))
        .filter_map(|comment| {
            let Some(id) = comment.w_attr("id") else {
                debug!("skipping <w:comment> without w:id");
                return None;
            };

            Some(CommentRecord {
                id: id.to_string(),
                body: comment.string_value(),
                author: comment.w_attr("author").map(str::to_string),
                date: comment.w_attr("date").map(str::to_string),
                initials: comment.w_attr("initials").map(str::to_string),
            })
        })
        .collect()
}

/// Append the text of every run that sits after a start marker and before an
/// end marker with identifier `id` under the same parent, in document order.
fn collect_enclosed_text(parent: &Element, id: &str, out: &mut String) {
    let children: Vec<&Element> = parent.child_elements().collect();

    let first_start = children
        .iter()
        .position(|child| is_marker(child, "commentRangeStart", id));
    let last_end = children
        .iter()
        .rposition(|child| is_marker(child, "commentRangeEnd", id));

    for (index, child) in children.iter().enumerate() {
        let enclosed = matches!(
            (first_start, last_end),
            (Some(start), Some(end)) if start < index && index < end
        );
        if enclosed && child.is_w("r") {
            out.push_str(&child.string_value());
        }
        collect_enclosed_text(child, id, out);
    }
}

fn is_marker(element: &Element, marker: &str, id: &str) -> bool {
    element.is_w(marker) && element.w_attr("id") == Some(id)
}
