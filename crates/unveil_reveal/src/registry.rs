//! Element registry
//!
//! Discovers reveal candidates by class selector. An element is eligible
//! when it carries any of the six animation tokens and does not yet bear the
//! reveal marker, so re-scanning after dynamic content insertion never
//! re-registers an already-revealed element.

use unveil_core::{Document, Element, ElementId};

/// Class tokens that make an element a reveal candidate.
pub const REVEAL_CLASSES: [&str; 6] = [
    "animate",
    "animate-scale",
    "animate-fade",
    "stagger",
    "slide-left",
    "slide-right",
];

/// Marker token applied once when an element is revealed. An external
/// stylesheet keys the entry transition off this token.
pub const REVEALED_CLASS: &str = "animate-in";

/// Whether an element is a candidate: tagged for animation and not yet
/// revealed.
pub fn is_eligible(element: &Element) -> bool {
    element.classes().contains_any(&REVEAL_CLASSES) && !element.classes().contains(REVEALED_CLASS)
}

/// Scan the document for reveal candidates, in document order.
///
/// Re-runnable: the result reflects the current document, independent of any
/// previous scan.
pub fn scan(doc: &Document) -> Vec<ElementId> {
    doc.query_any(&REVEAL_CLASSES)
        .into_iter()
        .filter(|&id| doc.get(id).is_some_and(is_eligible))
        .collect()
}
