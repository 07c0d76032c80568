//! Ordered class-token sets
//!
//! Class tokens drive everything in Unveil: eligibility for reveal, the
//! reveal marker itself, device classification, and open/close widget
//! states. A [`ClassList`] behaves like the DOM's `classList`: insertion
//! order is preserved, adding an existing token is a no-op, and membership
//! checks are exact string matches.

use smallvec::SmallVec;

/// An ordered set of class tokens.
///
/// Most elements carry a handful of tokens, so storage is inline up to four.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassList {
    tokens: SmallVec<[String; 4]>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from whitespace-separated tokens (`"animate stagger"`).
    pub fn parse(source: &str) -> Self {
        let mut list = Self::new();
        for token in source.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Add a token. Returns `true` if it was not already present.
    pub fn add(&mut self, token: &str) -> bool {
        if self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns `true` if it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Add the token if absent, remove it if present. Returns the new
    /// membership state.
    pub fn toggle(&mut self, token: &str) -> bool {
        if self.remove(token) {
            false
        } else {
            self.tokens.push(token.to_string());
            true
        }
    }

    /// Set membership explicitly (DOM `classList.toggle(token, force)`).
    pub fn set(&mut self, token: &str, present: bool) {
        if present {
            self.add(token);
        } else {
            self.remove(token);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Whether any of the given tokens is present.
    pub fn contains_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|t| self.contains(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for token in iter {
            list.add(token.as_ref());
        }
        list
    }
}
