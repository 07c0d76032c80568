//! Visibility records and reveal notifications
//!
//! The watcher produces [`VisibilityEntry`] batches; the reveal controller
//! consumes them and, on each reveal, dispatches a [`RevealEvent`] through an
//! [`EventDispatcher`]. Subscriptions can be scoped to a single element (the
//! DOM contract: the event is dispatched on the revealed element itself) or
//! to every reveal.

use crate::document::ElementId;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// One intersection observation for one element.
///
/// Immutable record: produced once per threshold crossing, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Fraction of the element inside the trigger span, in `[0, 1]`.
    pub intersection_ratio: f32,
}

/// Notification payload emitted when an element is revealed.
#[derive(Debug, Clone, Copy)]
pub struct RevealEvent {
    pub element: ElementId,
    /// The visibility entry that triggered the reveal.
    pub entry: VisibilityEntry,
}

new_key_type! {
    /// Handle to an active subscription
    pub struct SubscriptionId;
}

type RevealCallback = Box<dyn Fn(&RevealEvent) + Send + Sync>;

struct Subscriber {
    /// `None` subscribes to every reveal.
    target: Option<ElementId>,
    callback: RevealCallback,
}

/// Dispatches reveal notifications to element-scoped and global subscribers.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: SlotMap<SubscriptionId, Subscriber>,
    /// Element-scoped subscription ids, for targeted dispatch.
    by_element: FxHashMap<ElementId, SmallVec<[SubscriptionId; 4]>>,
    /// Subscriptions receiving every event.
    broadcast: SmallVec<[SubscriptionId; 4]>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to reveals of one element.
    pub fn subscribe<F>(&mut self, element: ElementId, callback: F) -> SubscriptionId
    where
        F: Fn(&RevealEvent) + Send + Sync + 'static,
    {
        let id = self.subscribers.insert(Subscriber {
            target: Some(element),
            callback: Box::new(callback),
        });
        self.by_element.entry(element).or_default().push(id);
        id
    }

    /// Subscribe to every reveal.
    pub fn subscribe_all<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&RevealEvent) + Send + Sync + 'static,
    {
        let id = self.subscribers.insert(Subscriber {
            target: None,
            callback: Box::new(callback),
        });
        self.broadcast.push(id);
        id
    }

    /// Drop a subscription. Returns `true` if it was still active.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(sub) = self.subscribers.remove(id) else {
            return false;
        };
        match sub.target {
            Some(element) => {
                if let Some(ids) = self.by_element.get_mut(&element) {
                    ids.retain(|&mut s| s != id);
                    if ids.is_empty() {
                        self.by_element.remove(&element);
                    }
                }
            }
            None => self.broadcast.retain(|&mut s| s != id),
        }
        true
    }

    /// Deliver an event to the element's subscribers, then to broadcast
    /// subscribers. Zero subscribers is a successful no-op.
    pub fn dispatch(&self, event: &RevealEvent) {
        if let Some(ids) = self.by_element.get(&event.element) {
            for &id in ids {
                if let Some(sub) = self.subscribers.get(id) {
                    (sub.callback)(event);
                }
            }
        }
        for &id in &self.broadcast {
            if let Some(sub) = self.subscribers.get(id) {
                (sub.callback)(event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Element};
    use crate::geometry::Rect;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn entry(element: ElementId) -> VisibilityEntry {
        VisibilityEntry {
            element,
            is_intersecting: true,
            intersection_ratio: 0.3,
        }
    }

    #[test]
    fn test_targeted_dispatch() {
        let mut doc = Document::new();
        let a = doc.insert(Element::new(Rect::default()));
        let b = doc.insert(Element::new(Rect::default()));

        let mut dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_a = hits.clone();
        dispatcher.subscribe(a, move |_| {
            hits_a.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch(&RevealEvent {
            element: b,
            entry: entry(b),
        });
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        dispatcher.dispatch(&RevealEvent {
            element: a,
            entry: entry(a),
        });
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_broadcast_and_unsubscribe() {
        let mut doc = Document::new();
        let a = doc.insert(Element::new(Rect::default()));

        let mut dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_all = hits.clone();
        let sub = dispatcher.subscribe_all(move |_| {
            hits_all.fetch_add(1, Ordering::SeqCst);
        });

        let event = RevealEvent {
            element: a,
            entry: entry(a),
        };
        dispatcher.dispatch(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert!(dispatcher.unsubscribe(sub));
        assert!(!dispatcher.unsubscribe(sub));
        dispatcher.dispatch(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_without_subscribers_is_noop() {
        let mut doc = Document::new();
        let a = doc.insert(Element::new(Rect::default()));
        let dispatcher = EventDispatcher::new();
        dispatcher.dispatch(&RevealEvent {
            element: a,
            entry: entry(a),
        });
    }
}
