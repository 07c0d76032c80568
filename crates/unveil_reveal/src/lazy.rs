//! Lazy media loader
//!
//! A second consumer of the visibility watcher: elements carrying a
//! `data-src` attribute get their real source applied the first time any
//! part of them becomes visible, then leave the watch set. No trigger
//! margin, single threshold at zero. When intersection observation is
//! unavailable everything loads eagerly at start.

use std::sync::{Arc, Mutex};
use tracing::debug;
use unveil_core::{Document, ElementId, EnvCapabilities, Viewport, VisibilityEntry};
use unveil_observe::{ObserverConfig, VisibilityObserver};

/// Attribute holding the deferred source.
pub const LAZY_SRC_ATTR: &str = "data-src";

/// Attribute the source is promoted to on load.
pub const SRC_ATTR: &str = "src";

/// Elements with a pending deferred source, in document order.
pub fn scan(doc: &Document) -> Vec<ElementId> {
    doc.query_attr(LAZY_SRC_ATTR)
}

/// Promote `data-src` to `src`. Returns `true` if a load happened.
fn load(doc: &mut Document, id: ElementId) -> bool {
    let Some(element) = doc.get_mut(id) else {
        return false;
    };
    match element.remove_attr(LAZY_SRC_ATTR) {
        Some(src) => {
            element.set_attr(SRC_ATTR, &src);
            true
        }
        None => false,
    }
}

/// Watches deferred-source elements and loads each on first visibility.
pub struct LazyLoader {
    caps: EnvCapabilities,
    observer: Option<VisibilityObserver>,
    inbox: Arc<Mutex<Vec<VisibilityEntry>>>,
}

impl LazyLoader {
    pub fn new(caps: EnvCapabilities) -> Self {
        Self {
            caps,
            observer: None,
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    /// Scan and begin watching. Without intersection observation, loads
    /// every candidate eagerly instead.
    pub fn start(&mut self, doc: &mut Document) {
        let candidates = scan(doc);
        if candidates.is_empty() {
            return;
        }

        if !self.caps.intersection_observer {
            let loaded = candidates
                .iter()
                .filter(|&&id| load(doc, id))
                .count();
            debug!(loaded, "intersection observation unavailable; loaded eagerly");
            return;
        }

        let inbox = self.inbox.clone();
        let mut observer = VisibilityObserver::new(
            ObserverConfig::any_visible(),
            Box::new(move |entries, _ops| {
                inbox.lock().unwrap().extend_from_slice(entries);
            }),
        );
        for id in &candidates {
            observer.observe(*id);
        }
        debug!(watching = candidates.len(), "lazy loader started");
        self.observer = Some(observer);
    }

    pub fn teardown(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            self.inbox.lock().unwrap().clear();
        }
    }

    /// Poll the watcher and load any newly visible elements. Returns the
    /// number loaded this turn.
    pub fn poll(&mut self, doc: &mut Document, viewport: Viewport) -> usize {
        if let Some(observer) = self.observer.as_mut() {
            observer.poll(doc, viewport);
        }
        let entries: Vec<VisibilityEntry> = {
            let mut inbox = self.inbox.lock().unwrap();
            inbox.drain(..).collect()
        };
        let mut loaded = 0;
        for entry in entries {
            if entry.is_intersecting && load(doc, entry.element) {
                if let Some(observer) = self.observer.as_mut() {
                    observer.unobserve(entry.element);
                }
                loaded += 1;
            }
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::{Element, Rect};

    fn lazy_image(y: f32) -> Element {
        Element::new(Rect::new(y, 100.0)).with_attr(LAZY_SRC_ATTR, "hero.webp")
    }

    #[test]
    fn test_loads_on_first_visibility() {
        let mut doc = Document::new();
        let near = doc.insert(lazy_image(100.0));
        let far = doc.insert(lazy_image(5000.0));

        let mut loader = LazyLoader::new(EnvCapabilities::default());
        loader.start(&mut doc);
        assert!(loader.is_active());

        let loaded = loader.poll(&mut doc, Viewport::new(0.0, 1000.0));
        assert_eq!(loaded, 1);
        assert_eq!(doc.get(near).unwrap().attr(SRC_ATTR), Some("hero.webp"));
        assert!(doc.get(near).unwrap().attr(LAZY_SRC_ATTR).is_none());
        assert!(doc.get(far).unwrap().attr(SRC_ATTR).is_none());

        // Scrolling down loads the second one
        let loaded = loader.poll(&mut doc, Viewport::new(4500.0, 1000.0));
        assert_eq!(loaded, 1);
        assert_eq!(doc.get(far).unwrap().attr(SRC_ATTR), Some("hero.webp"));
    }

    #[test]
    fn test_eager_load_without_capability() {
        let mut doc = Document::new();
        let far = doc.insert(lazy_image(9000.0));

        let mut loader = LazyLoader::new(EnvCapabilities::without_intersection_observer());
        loader.start(&mut doc);

        assert!(!loader.is_active());
        assert_eq!(doc.get(far).unwrap().attr(SRC_ATTR), Some("hero.webp"));
    }

    #[test]
    fn test_no_candidates_no_observer() {
        let mut doc = Document::new();
        doc.insert(Element::new(Rect::new(0.0, 100.0)));

        let mut loader = LazyLoader::new(EnvCapabilities::default());
        loader.start(&mut doc);
        assert!(!loader.is_active());
    }
}
