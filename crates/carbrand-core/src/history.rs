//! Navigation history
//!
//! The router records committed locations through a `History`. The
//! in-memory stack here serves native hosts and tests; the browser
//! implementation lives in carbrand-wasm.

use crate::{Location, Result};

/// How a navigation enters the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
    /// New entry after the current one
    Push,
    /// Overwrite the current entry
    Replace,
    /// Host already moved through existing entries (back/forward)
    Pop,
}

/// History backend
pub trait History: Send {
    fn push(&mut self, location: &Location) -> Result<()>;

    fn replace(&mut self, location: &Location) -> Result<()>;

    /// Step back; returns the entry now current, if the backend knows it
    fn back(&mut self) -> Result<Option<Location>>;

    /// Step forward; returns the entry now current, if the backend knows it
    fn forward(&mut self) -> Result<Option<Location>>;
}

/// Entry stack with a cursor
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
}

impl MemoryHistory {
    /// History holding a single entry
    pub fn new(start: Location) -> Self {
        Self {
            entries: vec![start],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::root())
    }
}

impl History for MemoryHistory {
    fn push(&mut self, location: &Location) -> Result<()> {
        // Forward entries are discarded, as in a browser
        self.entries.truncate(self.index + 1);
        self.entries.push(location.clone());
        self.index += 1;
        Ok(())
    }

    fn replace(&mut self, location: &Location) -> Result<()> {
        self.entries[self.index] = location.clone();
        Ok(())
    }

    fn back(&mut self) -> Result<Option<Location>> {
        if !self.can_go_back() {
            return Ok(None);
        }
        self.index -= 1;
        Ok(Some(self.current().clone()))
    }

    fn forward(&mut self) -> Result<Option<Location>> {
        if !self.can_go_forward() {
            return Ok(None);
        }
        self.index += 1;
        Ok(Some(self.current().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_back() {
        let mut history = MemoryHistory::default();
        history.push(&Location::parse("/login")).unwrap();
        history.push(&Location::parse("/cars")).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.back().unwrap(), Some(Location::parse("/login")));
        assert_eq!(history.back().unwrap(), Some(Location::root()));
        assert_eq!(history.back().unwrap(), None);
        assert_eq!(history.forward().unwrap(), Some(Location::parse("/login")));
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push(&Location::parse("/login")).unwrap();
        history.push(&Location::parse("/cars")).unwrap();
        history.back().unwrap();

        history.push(&Location::parse("/cars/1")).unwrap();
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().path, "/cars/1");
    }

    #[test]
    fn test_replace() {
        let mut history = MemoryHistory::default();
        history.replace(&Location::parse("/login")).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().path, "/login");
    }
}
