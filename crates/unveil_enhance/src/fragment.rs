//! Fragment loader
//!
//! Loads an HTML-ish template fragment from a file, extracts the first
//! element carrying a marker class, and splices it into the document as a
//! template element. When no source is available (no path, read failure, or
//! no matching block) the loader synthesizes a minimal stand-in fragment
//! instead, so offline and local runs keep working.
//!
//! Extraction is deliberately shallow: it balances opening/closing tags of
//! the marked element's name and understands self-closing tags, which is all
//! a static template fragment needs. This is not an HTML parser.

use crate::error::{EnhanceError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use unveil_core::{Document, Element, ElementId, Rect};

/// Attribute naming the spliced template.
pub const TEMPLATE_ID_ATTR: &str = "template-id";

/// Attribute carrying the raw fragment text.
pub const TEMPLATE_CONTENT_ATTR: &str = "template-content";

fn class_attr_contains(attr_value: &str, token: &str) -> bool {
    attr_value.split_whitespace().any(|t| t == token)
}

/// Tag name starting right after `<` (or `</`), empty-checked.
fn tag_name(tag_inner: &str) -> Option<&str> {
    let end = tag_inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(tag_inner.len());
    if end == 0 {
        None
    } else {
        Some(&tag_inner[..end])
    }
}

/// Extract the element starting at `start` (a `<` position) by balancing
/// tags of its name.
fn extract_element(source: &str, start: usize) -> Option<String> {
    let first = &source[start + 1..start + 1 + source[start + 1..].find('>')?];
    let name = tag_name(first)?.to_string();

    let mut depth = 0i32;
    let mut pos = start;
    while let Some(rel) = source[pos..].find('<') {
        let lt = pos + rel;
        let gt = lt + source[lt..].find('>')?;
        let inner = &source[lt + 1..gt];

        if let Some(closing) = inner.strip_prefix('/') {
            if tag_name(closing) == Some(name.as_str()) {
                depth -= 1;
                if depth == 0 {
                    return Some(source[start..=gt].to_string());
                }
            }
        } else if tag_name(inner) == Some(name.as_str()) {
            if inner.trim_end().ends_with('/') {
                // Self-closing: complete on its own at the top level
                if depth == 0 {
                    return Some(source[start..=gt].to_string());
                }
            } else {
                depth += 1;
            }
        }
        pos = gt + 1;
    }
    None
}

/// Find and extract the first element whose class attribute contains
/// `marker_class`.
pub fn extract_fragment(source: &str, marker_class: &str) -> Option<String> {
    let mut search_from = 0;
    while let Some(rel) = source[search_from..].find("class=\"") {
        let attr_start = search_from + rel + "class=\"".len();
        let attr_end = attr_start + source[attr_start..].find('"')?;
        if class_attr_contains(&source[attr_start..attr_end], marker_class) {
            let tag_start = source[..attr_start].rfind('<')?;
            return extract_element(source, tag_start);
        }
        search_from = attr_end + 1;
    }
    None
}

/// The minimal stand-in used when no real fragment is available.
pub fn fallback_fragment(marker_class: &str) -> String {
    format!("<div class=\"{marker_class}\"></div>")
}

/// Loads and splices template fragments identified by a marker class.
pub struct FragmentLoader {
    marker_class: String,
}

impl FragmentLoader {
    pub fn new(marker_class: impl Into<String>) -> Self {
        Self {
            marker_class: marker_class.into(),
        }
    }

    /// Read a fragment source file and extract the marked block.
    pub fn load_file(&self, path: &Path) -> Result<String> {
        let source = fs::read_to_string(path)
            .map_err(|e| EnhanceError::FragmentRead(format!("{}: {e}", path.display())))?;
        extract_fragment(&source, &self.marker_class)
            .ok_or_else(|| EnhanceError::FragmentMarkerMissing(self.marker_class.clone()))
    }

    /// Load from `path`, falling back to the synthesized stand-in when no
    /// path is given or loading fails.
    pub fn load_or_fallback(&self, path: Option<&Path>) -> String {
        match path {
            Some(path) => match self.load_file(path) {
                Ok(fragment) => fragment,
                Err(e) => {
                    warn!("fragment load failed ({e}); using stand-in");
                    fallback_fragment(&self.marker_class)
                }
            },
            None => {
                debug!("no fragment source configured; using stand-in");
                fallback_fragment(&self.marker_class)
            }
        }
    }

    /// Splice a fragment into the document under `anchor`.
    ///
    /// A missing anchor is a silent no-op (`None`): one absent container
    /// never blocks unrelated features.
    pub fn splice(
        &self,
        doc: &mut Document,
        anchor: ElementId,
        fragment: &str,
        template_id: &str,
    ) -> Option<ElementId> {
        if !doc.contains(anchor) {
            return None;
        }
        Some(
            doc.insert_child(
                anchor,
                Element::new(Rect::default())
                    .with_classes(&self.marker_class)
                    .with_attr(TEMPLATE_ID_ATTR, template_id)
                    .with_attr(TEMPLATE_CONTENT_ATTR, fragment),
            ),
        )
    }
}
