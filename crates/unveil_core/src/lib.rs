//! Unveil Core
//!
//! Foundational primitives for the Unveil page-enhancement engine:
//!
//! - **Document Model**: a headless, slotmap-keyed element tree with class
//!   tokens, attributes, and vertical geometry
//! - **Events**: visibility records, reveal notifications, and a scoped
//!   event dispatcher
//! - **Debounce**: a single-slot deferred-task holder polled from the host
//!   event loop
//! - **State Machines**: flat FSMs for widget open/close interactions
//! - **Capabilities**: the host environment query surface gating fallback
//!   behavior
//!
//! # Example
//!
//! ```rust
//! use unveil_core::{Document, Element, Rect};
//!
//! let mut doc = Document::new();
//! let hero = doc.insert(Element::new(Rect::new(0.0, 400.0)).with_classes("animate"));
//!
//! assert_eq!(doc.query_class("animate"), vec![hero]);
//! doc.get_mut(hero).unwrap().classes_mut().add("animate-in");
//! assert!(doc.get(hero).unwrap().classes().contains("animate-in"));
//! ```

pub mod caps;
pub mod class_list;
pub mod debounce;
pub mod document;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use caps::EnvCapabilities;
pub use class_list::ClassList;
pub use debounce::Debouncer;
pub use document::{Document, Element, ElementId};
pub use events::{EventDispatcher, RevealEvent, SubscriptionId, VisibilityEntry};
pub use fsm::{EventId, FsmId, FsmRuntime, StateId, StateMachine, Transition};
pub use geometry::{Rect, Viewport};
