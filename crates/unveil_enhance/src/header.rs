//! Header scroll state
//!
//! Applies `navbar-scrolled` to the navbar once the page has scrolled past a
//! fixed offset, and removes it back above. Scroll signals arrive in bursts,
//! so the class update runs behind a short debounce.

use std::time::{Duration, Instant};
use unveil_core::{Debouncer, Document, ElementId};

/// Token on the navbar while scrolled.
pub const SCROLLED_CLASS: &str = "navbar-scrolled";

/// Scroll offset past which the navbar counts as scrolled.
pub const SCROLL_THRESHOLD: f32 = 100.0;

/// Quiet period for scroll signal bursts.
pub const SCROLL_QUIET_PERIOD: Duration = Duration::from_millis(10);

/// Tracks scroll position and mirrors it onto the navbar element.
pub struct HeaderScrollState {
    navbar: ElementId,
    pending_scroll: Debouncer<f32>,
}

impl HeaderScrollState {
    /// Returns `None` when the navbar anchor is missing.
    pub fn new(doc: &Document, navbar: ElementId) -> Option<Self> {
        if !doc.contains(navbar) {
            return None;
        }
        Some(Self {
            navbar,
            pending_scroll: Debouncer::new(SCROLL_QUIET_PERIOD),
        })
    }

    /// Record a scroll signal.
    pub fn notify_scrolled(&mut self, now: Instant, scroll_y: f32) {
        self.pending_scroll.schedule(now, scroll_y);
    }

    /// Apply a pending debounced update if its deadline has passed.
    pub fn poll(&mut self, now: Instant, doc: &mut Document) {
        if let Some(scroll_y) = self.pending_scroll.poll(now) {
            if let Some(navbar) = doc.get_mut(self.navbar) {
                navbar
                    .classes_mut()
                    .set(SCROLLED_CLASS, scroll_y > SCROLL_THRESHOLD);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::{Element, Rect};

    #[test]
    fn test_class_follows_scroll_offset() {
        let mut doc = Document::new();
        let navbar = doc.insert(Element::new(Rect::new(0.0, 80.0)).with_classes("navbar"));
        let mut header = HeaderScrollState::new(&doc, navbar).unwrap();
        let t0 = Instant::now();

        header.notify_scrolled(t0, 250.0);
        header.poll(t0 + Duration::from_millis(10), &mut doc);
        assert!(doc.get(navbar).unwrap().classes().contains(SCROLLED_CLASS));

        header.notify_scrolled(t0 + Duration::from_millis(20), 50.0);
        header.poll(t0 + Duration::from_millis(30), &mut doc);
        assert!(!doc.get(navbar).unwrap().classes().contains(SCROLLED_CLASS));
    }

    #[test]
    fn test_burst_applies_final_offset() {
        let mut doc = Document::new();
        let navbar = doc.insert(Element::new(Rect::new(0.0, 80.0)).with_classes("navbar"));
        let mut header = HeaderScrollState::new(&doc, navbar).unwrap();
        let t0 = Instant::now();

        header.notify_scrolled(t0, 500.0);
        header.notify_scrolled(t0 + Duration::from_millis(5), 0.0);
        header.poll(t0 + Duration::from_millis(15), &mut doc);

        assert!(!doc.get(navbar).unwrap().classes().contains(SCROLLED_CLASS));
    }
}
