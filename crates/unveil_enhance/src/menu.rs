//! Slide-out side menu controller
//!
//! Same machine as the dropdown on a single root element: the `menu-open`
//! token on the page root drives the slide transition in the stylesheet.

use unveil_core::{Document, ElementId, StateMachine};

/// Token on the page root while the menu is out.
pub const OPEN_CLASS: &str = "menu-open";

/// Menu states
pub mod states {
    pub const CLOSED: u32 = 0;
    pub const OPEN: u32 = 1;
}

/// Menu events
pub mod events {
    pub const TOGGLE: u32 = 0;
    pub const CLOSE: u32 = 1;
}

/// Slide-out menu interaction state.
pub struct SideMenu {
    root: ElementId,
    machine: StateMachine,
}

impl SideMenu {
    /// Returns `None` when the root anchor is missing.
    pub fn new(doc: &Document, root: ElementId) -> Option<Self> {
        if !doc.contains(root) {
            return None;
        }
        Some(Self {
            root,
            machine: StateMachine::builder(states::CLOSED)
                .on(states::CLOSED, events::TOGGLE, states::OPEN)
                .on(states::OPEN, events::TOGGLE, states::CLOSED)
                .on(states::OPEN, events::CLOSE, states::CLOSED)
                .build(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.machine.current() == states::OPEN
    }

    pub fn toggle(&mut self, doc: &mut Document) {
        self.machine.send(events::TOGGLE);
        self.apply(doc);
    }

    /// Close if open (escape key, overlay click).
    pub fn close(&mut self, doc: &mut Document) {
        if self.machine.send(events::CLOSE) {
            self.apply(doc);
        }
    }

    fn apply(&self, doc: &mut Document) {
        if let Some(root) = doc.get_mut(self.root) {
            root.classes_mut().set(OPEN_CLASS, self.is_open());
        }
    }
}
