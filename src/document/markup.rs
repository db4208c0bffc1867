//! Namespace-aware markup tree
//!
//! The comment queries need sibling relationships and whole-subtree text, so
//! each part is read with `quick_xml` into a small owned tree instead of being
//! processed as a flat event stream.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::error::{ExtractError, Result};

/// WordprocessingML main namespace
pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Deepest element nesting accepted, same as libxml2's default
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Parse a complete markup document and return its root element.
    ///
    /// `part` names the package member in error messages.
    pub fn parse(bytes: &[u8], part: &str) -> Result<Element> {
        let mut reader = NsReader::from_reader(bytes);
        reader.config_mut().trim_text(false); // run text is whitespace-significant

        let mut buf = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let (resolved, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| ExtractError::markup(part, e.to_string()))?;
            let namespace = owned_namespace(resolved, part)?;

            match event {
                Event::Start(ref e) => {
                    let element = start_element(&reader, e, namespace, part)?;
                    if open.is_empty() && root.is_some() {
                        return Err(ExtractError::markup(part, "more than one root element"));
                    }
                    if open.len() >= MAX_NESTING_DEPTH {
                        return Err(ExtractError::markup(part, "nesting too deep"));
                    }
                    open.push(element);
                }
                Event::Empty(ref e) => {
                    let element = start_element(&reader, e, namespace, part)?;
                    attach(&mut open, &mut root, element, part)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| ExtractError::markup(part, "unexpected closing tag"))?;
                    attach(&mut open, &mut root, element, part)?;
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|e| ExtractError::markup(part, e.to_string()))?;
                    push_text(&mut open, &text, part)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| ExtractError::markup(part, e.to_string()))?
                        .to_string();
                    push_text(&mut open, &text, part)?;
                }
                Event::Eof => break,
                // declarations, comments and processing instructions carry no text
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(ExtractError::markup(
                part,
                format!("unexpected end of input inside <{}>", unclosed.name),
            ));
        }

        root.ok_or_else(|| ExtractError::markup(part, "no root element"))
    }

    /// True when this element is `<w:local>` in the WordprocessingML namespace
    pub fn is_w(&self, local: &str) -> bool {
        self.name == local && self.namespace.as_deref() == Some(WORDPROCESSING_NS)
    }

    /// Value of the WordprocessingML-qualified attribute `w:local`
    pub fn w_attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == local && a.namespace.as_deref() == Some(WORDPROCESSING_NS))
            .map(|a| a.value.as_str())
    }

    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// This element and all of its descendant elements, in document order
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.child_elements().rev());
            Some(next)
        })
    }

    /// Concatenated text of every descendant text node
    pub fn string_value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

fn owned_namespace(resolved: ResolveResult<'_>, part: &str) -> Result<Option<String>> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => std::str::from_utf8(uri)
            .map(|uri| Some(uri.to_string()))
            .map_err(|e| ExtractError::markup(part, e.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ExtractError::markup(
            part,
            format!(
                "undeclared namespace prefix `{}`",
                String::from_utf8_lossy(&prefix)
            ),
        )),
    }
}

fn start_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    namespace: Option<String>,
    part: &str,
) -> Result<Element> {
    let name = utf8(start.local_name().as_ref(), part)?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ExtractError::markup(part, e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let (resolved, local) = reader.resolve_attribute(attr.key);
        let attr_namespace = owned_namespace(resolved, part)?;
        let value = attr
            .unescape_value()
            .map_err(|e| ExtractError::markup(part, e.to_string()))?;

        attributes.push(Attribute {
            namespace: attr_namespace,
            name: utf8(local.as_ref(), part)?,
            value: value.into_owned(),
        });
    }

    Ok(Element {
        namespace,
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    part: &str,
) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(ExtractError::markup(part, "more than one root element")),
    }
    Ok(())
}

fn push_text(open: &mut [Element], text: &str, part: &str) -> Result<()> {
    match open.last_mut() {
        Some(parent) => {
            if let Some(Node::Text(previous)) = parent.children.last_mut() {
                previous.push_str(text);
            } else {
                parent.children.push(Node::Text(text.to_string()));
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ExtractError::markup(part, "text outside the root element")),
    }
}

fn utf8(bytes: &[u8], part: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ExtractError::markup(part, e.to_string()))
}
