//! History-based navigation over a [`Router`].

use super::{RouteMatch, Router};

/// Stack of visited locations with a cursor, like the browser history the
/// web front end drives.
#[derive(Debug, Clone)]
pub struct History {
    router: Router,
    entries: Vec<String>,
    index: usize,
}

impl History {
    /// Starts a history at `initial`.
    pub fn new(router: Router, initial: &str) -> Self {
        Self {
            router,
            entries: vec![absolute(initial)],
            index: 0,
        }
    }

    /// Navigates to `location`, dropping any forward entries.
    pub fn push(&mut self, location: &str) -> Option<RouteMatch> {
        self.entries.truncate(self.index + 1);
        self.entries.push(absolute(location));
        self.index = self.entries.len() - 1;
        tracing::trace!(location = %self.location(), "history push");
        self.current()
    }

    /// Replaces the current entry with `location`.
    pub fn replace(&mut self, location: &str) -> Option<RouteMatch> {
        self.entries[self.index] = absolute(location);
        tracing::trace!(location = %self.location(), "history replace");
        self.current()
    }

    /// Moves one entry back. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves one entry forward. Returns false at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Returns the current location.
    pub fn location(&self) -> &str {
        &self.entries[self.index]
    }

    /// Resolves the current location.
    pub fn current(&self) -> Option<RouteMatch> {
        self.router.resolve(self.location())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn absolute(location: &str) -> String {
    if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{}", location)
    }
}
