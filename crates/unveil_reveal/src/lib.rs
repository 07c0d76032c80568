//! Unveil Scroll Reveal Tracker
//!
//! One-shot reveal of tagged elements as they scroll into view:
//!
//! - **Element Registry**: selector scan for the six animation class tokens
//! - **Reveal Controller**: threshold-gated, monotonic reveal with
//!   element-scoped notifications
//! - **Lifecycle Manager**: debounced start, teardown, synchronous reinit,
//!   and the process-wide re-init hook
//! - **Lazy Loader**: deferred-source loading on first visibility, sharing
//!   the same watcher primitive
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use unveil_core::{Document, Element, EnvCapabilities, Rect, Viewport};
//! use unveil_reveal::{ScrollReveal, REVEALED_CLASS};
//!
//! let mut doc = Document::new();
//! let hero = doc.insert(Element::new(Rect::new(100.0, 300.0)).with_classes("animate"));
//!
//! let mut reveal = ScrollReveal::new(EnvCapabilities::default());
//! reveal.start(&mut doc);
//! reveal.poll(Instant::now(), &mut doc, Viewport::new(0.0, 1000.0));
//!
//! assert!(doc.get(hero).unwrap().classes().contains(REVEALED_CLASS));
//! ```

pub mod controller;
pub mod lazy;
pub mod lifecycle;
pub mod registry;

pub use controller::{fallback_reveal_all, process_entry, should_reveal, REVEAL_RATIO};
pub use lazy::{LazyLoader, LAZY_SRC_ATTR, SRC_ATTR};
pub use lifecycle::{
    install_global, reinit_global, try_global, ScrollReveal, SharedScrollReveal,
    START_QUIET_PERIOD,
};
pub use registry::{is_eligible, scan, REVEALED_CLASS, REVEAL_CLASSES};
