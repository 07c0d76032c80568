//! Reveal controller
//!
//! Applies the reveal policy to visibility entries: an element is revealed
//! the first time it intersects with at least [`REVEAL_RATIO`] of itself
//! inside the trigger span. Reveal is one-shot; the marker class makes any
//! later entry for the same element a no-op, so duplicate or stale entries
//! can never re-reveal.

use crate::registry::REVEALED_CLASS;
use tracing::debug;
use unveil_core::{Document, ElementId, EventDispatcher, RevealEvent, VisibilityEntry};

/// Minimum intersection ratio required to reveal.
pub const REVEAL_RATIO: f32 = 0.1;

/// Whether an entry satisfies the reveal gate.
pub fn should_reveal(entry: &VisibilityEntry) -> bool {
    entry.is_intersecting && entry.intersection_ratio >= REVEAL_RATIO
}

/// Process one visibility entry.
///
/// On reveal: applies the marker class, dispatches a [`RevealEvent`] scoped
/// to the element, and returns `true` so the caller can unobserve it.
/// Entries below the gate, for missing elements, or for already-revealed
/// elements leave all state untouched and return `false`.
pub fn process_entry(
    doc: &mut Document,
    dispatcher: &EventDispatcher,
    entry: VisibilityEntry,
) -> bool {
    if !should_reveal(&entry) {
        return false;
    }
    let Some(element) = doc.get_mut(entry.element) else {
        return false;
    };
    if !element.classes_mut().add(REVEALED_CLASS) {
        // Already revealed: monotonic, nothing to do.
        return false;
    }
    debug!(ratio = entry.intersection_ratio, "element revealed");
    dispatcher.dispatch(&RevealEvent {
        element: entry.element,
        entry,
    });
    true
}

/// Capability-absent fallback: mark every candidate revealed immediately,
/// with no notifications and no watcher interaction. Returns how many
/// elements were marked.
pub fn fallback_reveal_all(doc: &mut Document, candidates: &[ElementId]) -> usize {
    let mut marked = 0;
    for &id in candidates {
        if let Some(element) = doc.get_mut(id) {
            if element.classes_mut().add(REVEALED_CLASS) {
                marked += 1;
            }
        }
    }
    debug!(marked, "fallback reveal applied");
    marked
}
