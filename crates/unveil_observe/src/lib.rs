//! Unveil Visibility Watcher
//!
//! An intersection-observer style primitive over the headless document
//! model. The watcher is a producer of visibility-entry batches; consumers
//! (the reveal controller, the lazy loader) register elements and receive a
//! callback at every threshold crossing, driven by the host polling loop.

pub mod observer;

pub use observer::{ObserverCallback, ObserverConfig, ObserverOps, VisibilityObserver};
