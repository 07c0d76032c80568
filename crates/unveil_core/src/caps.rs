//! Host environment capability queries
//!
//! The only environmental input the reveal core consults is whether the host
//! provides an intersection-observation primitive; when it does not, the
//! lifecycle takes the synchronous fallback path instead of constructing a
//! watcher. Touch capability feeds the device classifier. Absence of a
//! capability is never an error, just a different code path.

/// Capabilities reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvCapabilities {
    /// Whether visibility watching is available. When `false`, reveal falls
    /// back to marking every eligible element immediately.
    pub intersection_observer: bool,
    /// Whether the host reports touch input.
    pub touch: bool,
}

impl Default for EnvCapabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
            touch: false,
        }
    }
}

impl EnvCapabilities {
    /// Capabilities of a host without visibility watching.
    pub fn without_intersection_observer() -> Self {
        Self {
            intersection_observer: false,
            ..Default::default()
        }
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }
}
