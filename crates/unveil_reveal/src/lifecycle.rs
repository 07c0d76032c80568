//! Reveal lifecycle manager
//!
//! [`ScrollReveal`] is the single owner of the optional visibility watcher:
//! `start`, `teardown`, and `reinit` are its only mutators, so two watcher
//! instances can never overlap. The initial start is debounced behind a
//! 100 ms quiet period after the content-loaded signal; `reinit` bypasses
//! the debounce for callers that just injected new animatable content.
//!
//! The watcher produces visibility batches into an inbox; the controller
//! consumes them on the same polling turn. A process-wide handle can be
//! installed once for external re-init, mirroring the page-global hook of
//! the original environment.

use crate::{controller, registry};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use unveil_core::{
    Debouncer, Document, ElementId, EnvCapabilities, EventDispatcher, RevealEvent, SubscriptionId,
    Viewport, VisibilityEntry,
};
use unveil_observe::{ObserverConfig, VisibilityObserver};

/// Quiet period between the content-loaded signal and the actual scan.
pub const START_QUIET_PERIOD: Duration = Duration::from_millis(100);

/// Batches delivered by the watcher, pending consumption by the controller.
type Inbox = Arc<Mutex<Vec<VisibilityEntry>>>;

/// Owns the watcher lifecycle and the reveal notification dispatcher.
pub struct ScrollReveal {
    caps: EnvCapabilities,
    observer: Option<VisibilityObserver>,
    inbox: Inbox,
    dispatcher: EventDispatcher,
    pending_start: Debouncer<()>,
}

impl ScrollReveal {
    pub fn new(caps: EnvCapabilities) -> Self {
        Self {
            caps,
            observer: None,
            inbox: Arc::new(Mutex::new(Vec::new())),
            dispatcher: EventDispatcher::new(),
            pending_start: Debouncer::new(START_QUIET_PERIOD),
        }
    }

    /// Whether a watcher instance is currently alive.
    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    /// Number of elements still being watched.
    pub fn watched_count(&self) -> usize {
        self.observer
            .as_ref()
            .map(VisibilityObserver::watched_count)
            .unwrap_or(0)
    }

    /// Subscribe to reveals of one element.
    pub fn subscribe<F>(&mut self, element: ElementId, callback: F) -> SubscriptionId
    where
        F: Fn(&RevealEvent) + Send + Sync + 'static,
    {
        self.dispatcher.subscribe(element, callback)
    }

    /// Subscribe to every reveal.
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&RevealEvent) + Send + Sync + 'static,
    {
        self.dispatcher.subscribe_all(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Signal that the document's structural content has finished loading.
    ///
    /// The actual scan-and-register pass is deferred by the quiet period;
    /// repeated signals inside the window coalesce into one pass.
    pub fn notify_content_loaded(&mut self, now: Instant) {
        self.pending_start.schedule(now, ());
    }

    /// Scan the document and construct the watcher, or take the fallback
    /// path when the host has no intersection-observation capability.
    ///
    /// Safe to call after a prior teardown. Calling while already active
    /// tears the previous watcher down first, preserving the single-instance
    /// invariant.
    pub fn start(&mut self, doc: &mut Document) {
        if self.observer.is_some() {
            warn!("start() while a watcher is active; tearing the old one down");
            self.teardown();
        }

        let candidates = registry::scan(doc);
        if candidates.is_empty() {
            // No eligible elements: skip watcher construction entirely.
            debug!("no reveal candidates; watcher not constructed");
            return;
        }

        if !self.caps.intersection_observer {
            let marked = controller::fallback_reveal_all(doc, &candidates);
            info!(marked, "intersection observation unavailable; revealed all candidates");
            return;
        }

        let inbox = self.inbox.clone();
        let mut observer = VisibilityObserver::new(
            ObserverConfig::default(),
            Box::new(move |entries, _ops| {
                inbox.lock().unwrap().extend_from_slice(entries);
            }),
        );
        for id in &candidates {
            observer.observe(*id);
        }
        info!(watching = candidates.len(), "scroll reveal started");
        self.observer = Some(observer);
    }

    /// Disconnect and drop the watcher, if any. Pending visibility entries
    /// from the old watcher are discarded so they can never be delivered
    /// across a reinit. No-op when already absent.
    pub fn teardown(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            self.inbox.lock().unwrap().clear();
            info!("scroll reveal torn down");
        }
    }

    /// Teardown then start, synchronously, with no debounce delay.
    ///
    /// For callers that have just inserted new animatable content.
    pub fn reinit(&mut self, doc: &mut Document) {
        self.pending_start.cancel();
        self.teardown();
        self.start(doc);
    }

    /// Drive one turn of the lifecycle: fire a pending debounced start, poll
    /// the watcher, and consume any delivered visibility entries.
    ///
    /// Returns the number of elements revealed this turn.
    pub fn poll(&mut self, now: Instant, doc: &mut Document, viewport: Viewport) -> usize {
        if self.pending_start.poll(now).is_some() {
            self.start(doc);
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.poll(doc, viewport);
        }

        let entries: Vec<VisibilityEntry> = {
            let mut inbox = self.inbox.lock().unwrap();
            inbox.drain(..).collect()
        };
        let mut revealed = 0;
        for entry in entries {
            if controller::process_entry(doc, &self.dispatcher, entry) {
                if let Some(observer) = self.observer.as_mut() {
                    observer.unobserve(entry.element);
                }
                revealed += 1;
            }
        }
        revealed
    }
}

// ============================================================================
// Global re-init hook
// ============================================================================

/// Shared handle to the process-wide reveal lifecycle.
pub type SharedScrollReveal = Arc<Mutex<ScrollReveal>>;

static GLOBAL_REVEAL: OnceLock<SharedScrollReveal> = OnceLock::new();

/// Install the process-wide reveal handle.
///
/// # Panics
///
/// Panics if called more than once.
pub fn install_global(handle: SharedScrollReveal) {
    if GLOBAL_REVEAL.set(handle).is_err() {
        panic!("install_global() called more than once");
    }
}

/// Get the process-wide handle, if installed.
pub fn try_global() -> Option<SharedScrollReveal> {
    GLOBAL_REVEAL.get().cloned()
}

/// Re-initialize the process-wide lifecycle against the current document.
///
/// Intended for external code that dynamically injects new animatable
/// markup. Returns `false` when no global handle is installed.
pub fn reinit_global(doc: &mut Document) -> bool {
    match try_global() {
        Some(handle) => {
            handle.lock().unwrap().reinit(doc);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::REVEALED_CLASS;
    use unveil_core::{Element, Rect};

    fn doc_with_candidates() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new();
        let above = doc.insert(Element::new(Rect::new(100.0, 200.0)).with_classes("animate"));
        let below = doc.insert(Element::new(Rect::new(5000.0, 200.0)).with_classes("slide-left"));
        (doc, above, below)
    }

    #[test]
    fn test_noop_guard_on_empty_document() {
        let mut doc = Document::new();
        doc.insert(Element::new(Rect::new(0.0, 100.0)).with_classes("navbar"));

        let mut reveal = ScrollReveal::new(EnvCapabilities::default());
        reveal.start(&mut doc);
        assert!(!reveal.is_active());
    }

    #[test]
    fn test_start_watches_candidates() {
        let (mut doc, _, _) = doc_with_candidates();
        let mut reveal = ScrollReveal::new(EnvCapabilities::default());
        reveal.start(&mut doc);

        assert!(reveal.is_active());
        assert_eq!(reveal.watched_count(), 2);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let (mut doc, _, _) = doc_with_candidates();
        let mut reveal = ScrollReveal::new(EnvCapabilities::default());

        reveal.teardown(); // absent: no-op
        reveal.start(&mut doc);
        reveal.teardown();
        assert!(!reveal.is_active());
        reveal.teardown(); // again: no-op

        // Safe to start after teardown
        reveal.start(&mut doc);
        assert!(reveal.is_active());
    }

    #[test]
    fn test_poll_reveals_visible_candidates() {
        let (mut doc, above, below) = doc_with_candidates();
        let mut reveal = ScrollReveal::new(EnvCapabilities::default());
        reveal.start(&mut doc);

        let now = Instant::now();
        let revealed = reveal.poll(now, &mut doc, Viewport::new(0.0, 1000.0));
        assert_eq!(revealed, 1);
        assert!(doc.get(above).unwrap().classes().contains(REVEALED_CLASS));
        assert!(!doc.get(below).unwrap().classes().contains(REVEALED_CLASS));
        // The revealed element left the watch set in the same step
        assert_eq!(reveal.watched_count(), 1);
    }

    #[test]
    fn test_debounced_start_fires_once() {
        let (mut doc, _, _) = doc_with_candidates();
        let mut reveal = ScrollReveal::new(EnvCapabilities::default());
        let t0 = Instant::now();

        reveal.notify_content_loaded(t0);
        reveal.notify_content_loaded(t0 + Duration::from_millis(30));
        reveal.notify_content_loaded(t0 + Duration::from_millis(40));

        let vp = Viewport::new(0.0, 1000.0);
        reveal.poll(t0 + Duration::from_millis(139), &mut doc, vp);
        assert!(!reveal.is_active());

        reveal.poll(t0 + Duration::from_millis(140), &mut doc, vp);
        assert!(reveal.is_active());
    }

    #[test]
    fn test_reinit_is_synchronous_and_rescans() {
        let (mut doc, _, _) = doc_with_candidates();
        let mut reveal = ScrollReveal::new(EnvCapabilities::default());
        reveal.start(&mut doc);
        assert_eq!(reveal.watched_count(), 2);

        // New content arrives
        let injected = doc.insert(Element::new(Rect::new(8000.0, 100.0)).with_classes("stagger"));
        reveal.reinit(&mut doc);
        assert!(reveal.is_active());
        assert_eq!(reveal.watched_count(), 3);
        assert!(!doc
            .get(injected)
            .unwrap()
            .classes()
            .contains(REVEALED_CLASS));
    }

    #[test]
    fn test_fallback_path_reveals_everything() {
        let (mut doc, above, below) = doc_with_candidates();
        let mut reveal = ScrollReveal::new(EnvCapabilities::without_intersection_observer());
        reveal.start(&mut doc);

        assert!(!reveal.is_active());
        assert!(doc.get(above).unwrap().classes().contains(REVEALED_CLASS));
        assert!(doc.get(below).unwrap().classes().contains(REVEALED_CLASS));
    }

    #[test]
    fn test_global_hook() {
        let (mut doc, _, _) = doc_with_candidates();
        assert!(!reinit_global(&mut doc));

        install_global(Arc::new(Mutex::new(ScrollReveal::new(
            EnvCapabilities::default(),
        ))));
        assert!(reinit_global(&mut doc));
        assert!(try_global().unwrap().lock().unwrap().is_active());
    }
}
