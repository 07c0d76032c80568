//! Visibility observer
//!
//! Watches a set of document elements and reports, through a caller-supplied
//! callback, whenever an element's intersection with the viewport crosses
//! one of the configured ratio thresholds. Delivery is batched: one callback
//! invocation per poll covers every element whose state changed, with no
//! ordering guarantee between elements.
//!
//! The observer is a polling adapter over the browser's push-style
//! primitive: the host event loop calls [`VisibilityObserver::poll`] with
//! the current document and viewport, and the observer fires the callback
//! zero or one times per poll.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use unveil_core::{Document, ElementId, Viewport, VisibilityEntry};

/// Watcher configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct ObserverConfig {
    /// Fraction of the viewport height subtracted from the bottom boundary.
    /// Elements must cross this much higher up the viewport to count as
    /// visible.
    pub bottom_margin_fraction: f32,
    /// Ratio thresholds at which the callback fires. Sorted and deduped at
    /// construction.
    pub thresholds: Vec<f32>,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            bottom_margin_fraction: 0.10,
            thresholds: vec![0.0, 0.1, 0.3],
        }
    }
}

impl ObserverConfig {
    /// A config with no trigger margin and a single threshold at zero:
    /// fires as soon as any part of the element is visible.
    pub fn any_visible() -> Self {
        Self {
            bottom_margin_fraction: 0.0,
            thresholds: vec![0.0],
        }
    }
}

/// Operations available to the callback while a batch is being delivered.
///
/// Mirrors the second argument of the browser callback: the consumer can
/// stop watching an element from inside the callback without aliasing the
/// observer itself. Requests are applied after the callback returns.
pub struct ObserverOps<'a> {
    removals: &'a mut SmallVec<[ElementId; 4]>,
}

impl ObserverOps<'_> {
    /// Stop watching `element` once the current batch has been delivered.
    pub fn unobserve(&mut self, element: ElementId) {
        if !self.removals.contains(&element) {
            self.removals.push(element);
        }
    }
}

/// Callback receiving visibility batches.
pub type ObserverCallback = Box<dyn FnMut(&[VisibilityEntry], &mut ObserverOps) + Send>;

/// Last state reported for a watched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Report {
    is_intersecting: bool,
    /// Number of thresholds at or below the last ratio (0 when out).
    bucket: usize,
}

#[derive(Debug, Default)]
struct WatchState {
    /// `None` until the first poll after `observe`, which always reports.
    last: Option<Report>,
}

/// Watches elements for viewport-intersection threshold crossings.
pub struct VisibilityObserver {
    bottom_margin_fraction: f32,
    thresholds: Vec<f32>,
    callback: ObserverCallback,
    watched: FxHashMap<ElementId, WatchState>,
}

impl VisibilityObserver {
    pub fn new(config: ObserverConfig, callback: ObserverCallback) -> Self {
        let mut thresholds: Vec<f32> = config
            .thresholds
            .iter()
            .map(|t| t.clamp(0.0, 1.0))
            .collect();
        thresholds.sort_by(|a, b| a.total_cmp(b));
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        Self {
            bottom_margin_fraction: config.bottom_margin_fraction.clamp(0.0, 1.0),
            thresholds,
            callback,
            watched: FxHashMap::default(),
        }
    }

    /// Begin monitoring an element. Watching an already-watched element is a
    /// no-op and does not reset its reporting state.
    pub fn observe(&mut self, element: ElementId) {
        self.watched.entry(element).or_default();
    }

    /// Stop monitoring a single element. Returns `true` if it was watched.
    pub fn unobserve(&mut self, element: ElementId) -> bool {
        self.watched.remove(&element).is_some()
    }

    /// Stop monitoring everything. All outstanding watches are dropped
    /// atomically from the caller's perspective.
    pub fn disconnect(&mut self) {
        let dropped = self.watched.len();
        self.watched.clear();
        tracing::debug!("visibility observer disconnected ({dropped} watches dropped)");
    }

    pub fn is_watching(&self, element: ElementId) -> bool {
        self.watched.contains_key(&element)
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Evaluate every watched element against the current viewport and
    /// deliver one batch of changed entries to the callback.
    ///
    /// Returns the number of entries delivered. Elements no longer present
    /// in the document are reported once as not intersecting and then
    /// silently dropped from the watch set.
    pub fn poll(&mut self, doc: &Document, viewport: Viewport) -> usize {
        if self.watched.is_empty() {
            return 0;
        }
        let (top, bottom) = viewport.trigger_span(self.bottom_margin_fraction);

        let mut batch: Vec<VisibilityEntry> = Vec::new();
        let mut gone: SmallVec<[ElementId; 4]> = SmallVec::new();

        for (&id, state) in self.watched.iter_mut() {
            let Some(element) = doc.get(id) else {
                if state.last.map(|r| r.is_intersecting) != Some(false) {
                    batch.push(VisibilityEntry {
                        element: id,
                        is_intersecting: false,
                        intersection_ratio: 0.0,
                    });
                }
                gone.push(id);
                continue;
            };

            let rect = element.rect();
            let (is_intersecting, ratio) = if rect.height > 0.0 {
                let overlap = rect.overlap_height(top, bottom);
                (overlap > 0.0, (overlap / rect.height).clamp(0.0, 1.0))
            } else if rect.point_within(top, bottom) {
                (true, 1.0)
            } else {
                (false, 0.0)
            };

            let bucket = if is_intersecting {
                self.thresholds.iter().filter(|&&t| ratio >= t).count()
            } else {
                0
            };
            let report = Report {
                is_intersecting,
                bucket,
            };
            if state.last != Some(report) {
                state.last = Some(report);
                batch.push(VisibilityEntry {
                    element: id,
                    is_intersecting,
                    intersection_ratio: ratio,
                });
            }
        }

        for id in gone {
            self.watched.remove(&id);
        }

        if batch.is_empty() {
            return 0;
        }

        let mut removals: SmallVec<[ElementId; 4]> = SmallVec::new();
        {
            let mut ops = ObserverOps {
                removals: &mut removals,
            };
            (self.callback)(&batch, &mut ops);
        }
        for id in removals {
            self.watched.remove(&id);
        }

        batch.len()
    }
}
