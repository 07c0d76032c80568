//! Dropdown controller
//!
//! FSM-driven open/close for a dropdown made of a container, a toggle, and a
//! list element. Opening sets the `dropdown-open` token on the container and
//! `aria-expanded` on the toggle; closing reverses both. A click-outside
//! check closes the dropdown unless the click target sits inside the
//! container.

use tracing::debug;
use unveil_core::{Document, ElementId, StateMachine};

/// Token on the container while open.
pub const OPEN_CLASS: &str = "dropdown-open";

/// Accessibility attribute mirrored onto the toggle element.
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Dropdown states
pub mod states {
    pub const CLOSED: u32 = 0;
    pub const OPEN: u32 = 1;
}

/// Dropdown events
pub mod events {
    pub const TOGGLE: u32 = 0;
    pub const CLOSE: u32 = 1;
}

fn machine() -> StateMachine {
    StateMachine::builder(states::CLOSED)
        .on(states::CLOSED, events::TOGGLE, states::OPEN)
        .on(states::OPEN, events::TOGGLE, states::CLOSED)
        .on(states::OPEN, events::CLOSE, states::CLOSED)
        .build()
}

/// One dropdown's anchors and interaction state.
pub struct Dropdown {
    container: ElementId,
    toggle: ElementId,
    machine: StateMachine,
}

impl Dropdown {
    /// Returns `None` when the container, toggle, or list anchor is missing;
    /// the dropdown then independently no-ops.
    pub fn new(
        doc: &mut Document,
        container: ElementId,
        toggle: ElementId,
        list: ElementId,
    ) -> Option<Self> {
        if !doc.contains(container) || !doc.contains(list) {
            return None;
        }
        doc.get_mut(toggle)?.set_attr(ARIA_EXPANDED, "false");
        Some(Self {
            container,
            toggle,
            machine: machine(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.machine.current() == states::OPEN
    }

    /// Flip between open and closed.
    pub fn toggle(&mut self, doc: &mut Document) {
        self.machine.send(events::TOGGLE);
        self.apply(doc);
    }

    /// Close if open; no-op otherwise.
    pub fn close(&mut self, doc: &mut Document) {
        if self.machine.send(events::CLOSE) {
            self.apply(doc);
        }
    }

    /// Close when a click lands outside the container subtree.
    pub fn close_on_outside(&mut self, doc: &mut Document, target: ElementId) {
        if !doc.is_within(target, self.container) {
            self.close(doc);
        }
    }

    fn apply(&self, doc: &mut Document) {
        let open = self.is_open();
        if let Some(container) = doc.get_mut(self.container) {
            container.classes_mut().set(OPEN_CLASS, open);
        }
        if let Some(toggle) = doc.get_mut(self.toggle) {
            toggle.set_attr(ARIA_EXPANDED, if open { "true" } else { "false" });
        }
        debug!(open, "dropdown state applied");
    }
}
