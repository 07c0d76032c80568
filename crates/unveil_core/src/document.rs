//! Headless document model
//!
//! A [`Document`] is a flat, insertion-ordered collection of [`Element`]s
//! keyed by slotmap handles. Elements carry a class list, string attributes,
//! an optional parent link (for containment queries), and a vertical rect in
//! document coordinates. This is the whole surface the enhancement
//! controllers operate on; there is no layout, styling, or rendering here.

use crate::class_list::ClassList;
use crate::geometry::Rect;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Unique identifier for a document element
    pub struct ElementId;
}

/// A single document element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    classes: ClassList,
    attrs: FxHashMap<String, String>,
    rect: Rect,
    parent: Option<ElementId>,
}

impl Element {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Default::default()
        }
    }

    /// Builder-style class assignment (`Element::new(rect).with_classes("animate stagger")`).
    pub fn with_classes(mut self, classes: &str) -> Self {
        self.classes = ClassList::parse(classes);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassList {
        &mut self.classes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// The document: element storage plus insertion order.
///
/// Slotmap iteration order is unspecified, so queries that promise document
/// order walk a separate `order` vector maintained on insert/remove.
#[derive(Default)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    order: Vec<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = self.elements.insert(element);
        self.order.push(id);
        id
    }

    /// Insert an element as a child of `parent`.
    ///
    /// The parent link only feeds containment queries; it implies no layout
    /// relationship. A missing parent id is accepted and recorded as-is.
    pub fn insert_child(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        element.parent = Some(parent);
        self.insert(element)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(id);
        if removed.is_some() {
            self.order.retain(|&e| e != id);
        }
        removed
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().copied()
    }

    /// Elements carrying `token`, in document order.
    pub fn query_class(&self, token: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.elements
                    .get(id)
                    .is_some_and(|el| el.classes.contains(token))
            })
            .collect()
    }

    /// Elements carrying any of `tokens`, in document order, no duplicates.
    pub fn query_any(&self, tokens: &[&str]) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.elements
                    .get(id)
                    .is_some_and(|el| el.classes.contains_any(tokens))
            })
            .collect()
    }

    /// Elements carrying attribute `name`, in document order.
    pub fn query_attr(&self, name: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| {
                self.elements
                    .get(id)
                    .is_some_and(|el| el.attr(name).is_some())
            })
            .collect()
    }

    /// Whether `id` is `ancestor` or sits anywhere below it.
    pub fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        // Parent chains are at most `len()` deep; the bound guards against
        // accidental cycles introduced through future parent mutation.
        let mut remaining = self.elements.len() + 1;
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            current = self.elements.get(node).and_then(|el| el.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_class_in_document_order() {
        let mut doc = Document::new();
        let a = doc.insert(Element::new(Rect::new(0.0, 10.0)).with_classes("animate"));
        let _b = doc.insert(Element::new(Rect::new(20.0, 10.0)).with_classes("navbar"));
        let c = doc.insert(Element::new(Rect::new(40.0, 10.0)).with_classes("animate stagger"));

        assert_eq!(doc.query_class("animate"), vec![a, c]);
    }

    #[test]
    fn test_query_any_no_duplicates() {
        let mut doc = Document::new();
        let a = doc.insert(Element::new(Rect::default()).with_classes("animate animate-fade"));
        let b = doc.insert(Element::new(Rect::default()).with_classes("slide-left"));

        let hits = doc.query_any(&["animate", "animate-fade", "slide-left"]);
        assert_eq!(hits, vec![a, b]);
    }

    #[test]
    fn test_remove_drops_from_order() {
        let mut doc = Document::new();
        let a = doc.insert(Element::new(Rect::default()).with_classes("animate"));
        let b = doc.insert(Element::new(Rect::default()).with_classes("animate"));

        assert!(doc.remove(a).is_some());
        assert_eq!(doc.query_class("animate"), vec![b]);
        assert!(!doc.contains(a));
    }

    #[test]
    fn test_attrs() {
        let mut doc = Document::new();
        let img = doc.insert(Element::new(Rect::default()).with_attr("data-src", "hero.webp"));

        assert_eq!(doc.query_attr("data-src"), vec![img]);
        let el = doc.get_mut(img).unwrap();
        assert_eq!(el.remove_attr("data-src").as_deref(), Some("hero.webp"));
        assert!(el.attr("data-src").is_none());
    }

    #[test]
    fn test_is_within() {
        let mut doc = Document::new();
        let dropdown = doc.insert(Element::new(Rect::default()).with_classes("dropdown"));
        let list = doc.insert_child(dropdown, Element::new(Rect::default()));
        let link = doc.insert_child(list, Element::new(Rect::default()));
        let outside = doc.insert(Element::new(Rect::default()));

        assert!(doc.is_within(link, dropdown));
        assert!(doc.is_within(list, dropdown));
        assert!(doc.is_within(dropdown, dropdown));
        assert!(!doc.is_within(outside, dropdown));
    }
}
