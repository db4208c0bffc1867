use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use unicode_segmentation::UnicodeSegmentation;

use crate::{document::AssociationGroup, DisplayFormat};

const RULE_WIDTH: usize = 50;
const SEGMENT_RULE_WIDTH: usize = 15;
const BANNER_TITLE: &str = "Extracted Comments and Associated Text";

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Accepted for author/date display; no layout renders them yet
    pub include_details: bool,
}

/// Render the groups in the requested layout
pub fn render(
    groups: &[AssociationGroup],
    format: DisplayFormat,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        DisplayFormat::Original => render_original(groups, options),
        DisplayFormat::Relationship => render_relationship(groups),
        DisplayFormat::Enhanced => render_enhanced(groups),
        DisplayFormat::Json => render_json(groups),
    }
}

pub fn render_original(groups: &[AssociationGroup], _options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for (index, group) in groups.iter().enumerate() {
        writeln!(output, "Text Segment {}: {}", index + 1, group.associated_text)?;
        for comment in &group.comments {
            writeln!(output, "  Comment: {comment}")?;
        }
        writeln!(output, "{}", "-".repeat(RULE_WIDTH))?;
    }

    Ok(output)
}

/// First comment of a group is shown as the parent, the rest as its children
pub fn render_relationship(groups: &[AssociationGroup]) -> Result<String> {
    let mut output = String::new();

    for (index, group) in groups.iter().enumerate() {
        writeln!(output, "Text Segment {}: {}", index + 1, group.associated_text)?;
        match group.comments.as_slice() {
            [only] => writeln!(output, "  Comment: {only}")?,
            [parent, children @ ..] => {
                writeln!(output, "  Parent Comment: {parent}")?;
                for child in children {
                    writeln!(output, "    |- Child Comment: {child}")?;
                }
            }
            [] => writeln!(output, "  Parent Comment: ")?,
        }
        writeln!(output, "{}", "-".repeat(RULE_WIDTH))?;
    }

    Ok(output)
}

pub fn render_enhanced(groups: &[AssociationGroup]) -> Result<String> {
    let mut output = String::new();
    let rule = "-".repeat(RULE_WIDTH);
    let segment_rule = "-".repeat(SEGMENT_RULE_WIDTH);

    output.push('\n');
    writeln!(output, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(output, "{}", center(BANNER_TITLE, RULE_WIDTH))?;
    writeln!(output, "{}", "=".repeat(RULE_WIDTH))?;
    output.push('\n');

    for (index, group) in groups.iter().enumerate() {
        writeln!(output, "Text Segment {}:", index + 1)?;
        writeln!(output, "{segment_rule}")?;
        writeln!(output, "\"{}\"", group.associated_text)?;
        writeln!(output, "{segment_rule}")?;
        for comment in &group.comments {
            writeln!(output, "Comment: {comment}")?;
        }
        writeln!(output, "{rule}")?;
        output.push('\n');
    }

    Ok(output)
}

/// Pretty JSON array of `{"associated_text", "comments"}` objects
pub fn render_json(groups: &[AssociationGroup]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    groups.serialize(&mut serializer)?;

    let mut output = String::from_utf8(buffer)?;
    output.push('\n');
    Ok(output)
}

/// Center `text` in `width` columns; odd padding leans right unless the width is odd
fn center(text: &str, width: usize) -> String {
    let len = text.graphemes(true).count();
    if len >= width {
        return text.to_string();
    }

    let pad = width - len;
    let left = pad / 2 + (pad & width & 1);
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
