//! Page description files
//!
//! A page is a TOML list of named elements with class tokens, vertical
//! geometry, and optional attributes:
//!
//! ```toml
//! viewport_height = 800.0
//!
//! [[element]]
//! name = "hero"
//! classes = "animate"
//! y = 0.0
//! height = 400.0
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use unveil_core::{Document, Element, ElementId, Rect};

fn default_viewport_height() -> f32 {
    800.0
}

/// A page description loaded from TOML.
#[derive(Debug, Deserialize)]
pub struct PageFile {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementSpec>,
}

/// One element of the page.
#[derive(Debug, Deserialize)]
pub struct ElementSpec {
    pub name: String,
    /// Whitespace-separated class tokens.
    #[serde(default)]
    pub classes: String,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl PageFile {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read page file {}", path.display()))?;
        toml::from_str(&source)
            .with_context(|| format!("failed to parse page file {}", path.display()))
    }

    /// A built-in demo page: a marketing layout with a navbar, reveal
    /// sections, and a lazy image.
    pub fn demo() -> Self {
        let section = |name: &str, classes: &str, y: f32, height: f32| ElementSpec {
            name: name.to_string(),
            classes: classes.to_string(),
            y,
            height,
            attrs: BTreeMap::new(),
        };
        let mut gallery = section("gallery-image", "animate-fade", 2600.0, 500.0);
        gallery
            .attrs
            .insert("data-src".to_string(), "gallery-01.webp".to_string());
        Self {
            viewport_height: default_viewport_height(),
            elements: vec![
                section("navbar", "navbar", 0.0, 80.0),
                section("hero", "animate", 80.0, 600.0),
                section("intro", "animate-fade stagger", 900.0, 400.0),
                section("feature-left", "slide-left", 1400.0, 350.0),
                section("feature-right", "slide-right", 1800.0, 350.0),
                section("pricing", "animate-scale", 2200.0, 380.0),
                gallery,
                section("footer-cta", "animate", 3200.0, 300.0),
            ],
        }
    }

    /// Materialize the page into a document, returning name/id pairs in
    /// document order.
    pub fn build_document(&self) -> (Document, Vec<(String, ElementId)>) {
        let mut doc = Document::new();
        let mut names = Vec::with_capacity(self.elements.len());
        for spec in &self.elements {
            let mut element =
                Element::new(Rect::new(spec.y, spec.height)).with_classes(&spec.classes);
            for (name, value) in &spec.attrs {
                element.set_attr(name, value);
            }
            let id = doc.insert(element);
            names.push((spec.name.clone(), id));
        }
        (doc, names)
    }

    /// Scroll offset at which the page bottoms out.
    pub fn max_scroll(&self) -> f32 {
        let content_bottom = self
            .elements
            .iter()
            .map(|e| e.y + e.height)
            .fold(0.0_f32, f32::max);
        (content_bottom - self.viewport_height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_file() {
        let source = r#"
viewport_height = 900.0

[[element]]
name = "hero"
classes = "animate stagger"
y = 100.0
height = 400.0

[element.attrs]
data-src = "hero.webp"
"#;
        let page: PageFile = toml::from_str(source).unwrap();
        assert_eq!(page.viewport_height, 900.0);
        assert_eq!(page.elements.len(), 1);
        assert_eq!(page.elements[0].name, "hero");
        assert_eq!(page.elements[0].attrs["data-src"], "hero.webp");

        let (doc, names) = page.build_document();
        let (_, id) = &names[0];
        let element = doc.get(*id).unwrap();
        assert!(element.classes().contains("stagger"));
        assert_eq!(element.attr("data-src"), Some("hero.webp"));
    }

    #[test]
    fn test_demo_page_has_reveal_candidates() {
        let page = PageFile::demo();
        let (doc, _) = page.build_document();
        assert!(!unveil_reveal::scan(&doc).is_empty());
        assert!(page.max_scroll() > 0.0);
    }
}
