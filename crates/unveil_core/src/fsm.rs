//! Minimal finite state machine runtime
//!
//! States and events are plain `u32` constants so widget code can define
//! them in a `states`/`events` module and keep transitions in one builder
//! chain. A machine only ever moves along declared transitions; undeclared
//! events are ignored.

use slotmap::{new_key_type, SlotMap};

/// State identifier (caller-defined constant).
pub type StateId = u32;

/// Event identifier (caller-defined constant).
pub type EventId = u32;

/// A declared transition: `from --event--> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

/// A flat state machine.
#[derive(Debug, Clone)]
pub struct StateMachine {
    initial: StateId,
    current: StateId,
    transitions: Vec<Transition>,
}

impl StateMachine {
    pub fn builder(initial: StateId) -> StateMachineBuilder {
        StateMachineBuilder {
            initial,
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    /// Feed an event. Returns `true` if a transition fired.
    pub fn send(&mut self, event: EventId) -> bool {
        let next = self
            .transitions
            .iter()
            .find(|t| t.from == self.current && t.event == event)
            .map(|t| t.to);
        match next {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

/// Builder for [`StateMachine`].
pub struct StateMachineBuilder {
    initial: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition { from, event, to });
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            initial: self.initial,
            current: self.initial,
            transitions: self.transitions,
        }
    }
}

new_key_type! {
    /// Handle to a machine registered with [`FsmRuntime`]
    pub struct FsmId;
}

/// Owns a set of state machines for callers that manage many at once.
#[derive(Default)]
pub struct FsmRuntime {
    machines: SlotMap<FsmId, StateMachine>,
}

impl FsmRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, machine: StateMachine) -> FsmId {
        self.machines.insert(machine)
    }

    pub fn remove(&mut self, id: FsmId) -> Option<StateMachine> {
        self.machines.remove(id)
    }

    pub fn send(&mut self, id: FsmId, event: EventId) -> bool {
        self.machines
            .get_mut(id)
            .map(|m| m.send(event))
            .unwrap_or(false)
    }

    pub fn current_state(&self, id: FsmId) -> Option<StateId> {
        self.machines.get(id).map(|m| m.current())
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED: u32 = 0;
    const OPEN: u32 = 1;
    const TOGGLE: u32 = 0;
    const CLOSE: u32 = 1;

    fn toggle_machine() -> StateMachine {
        StateMachine::builder(CLOSED)
            .on(CLOSED, TOGGLE, OPEN)
            .on(OPEN, TOGGLE, CLOSED)
            .on(OPEN, CLOSE, CLOSED)
            .build()
    }

    #[test]
    fn test_declared_transitions() {
        let mut machine = toggle_machine();
        assert_eq!(machine.current(), CLOSED);
        assert!(machine.send(TOGGLE));
        assert_eq!(machine.current(), OPEN);
        assert!(machine.send(CLOSE));
        assert_eq!(machine.current(), CLOSED);
    }

    #[test]
    fn test_undeclared_event_is_ignored() {
        let mut machine = toggle_machine();
        assert!(!machine.send(CLOSE)); // no CLOSED --CLOSE--> transition
        assert_eq!(machine.current(), CLOSED);
    }

    #[test]
    fn test_runtime() {
        let mut runtime = FsmRuntime::new();
        let id = runtime.create(toggle_machine());

        assert_eq!(runtime.current_state(id), Some(CLOSED));
        assert!(runtime.send(id, TOGGLE));
        assert_eq!(runtime.current_state(id), Some(OPEN));

        runtime.remove(id);
        assert!(!runtime.send(id, TOGGLE));
        assert_eq!(runtime.current_state(id), None);
    }
}
