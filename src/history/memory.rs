//! In-memory history.

use crate::history::{normalize_base, strip_base, History};

/// Entry stack with a cursor, the way a browser tab keeps its session
/// history.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    base: String,
    entries: Vec<String>,
    position: usize,
}

impl MemoryHistory {
    /// History with no base, starting at `/`.
    pub fn new() -> Self {
        Self::with_base("")
    }

    pub fn with_base(base: &str) -> Self {
        let base = normalize_base(base);
        let entries = vec![format!("{}/", base)];
        Self {
            base,
            entries,
            position: 0,
        }
    }

    /// Start at `href` (relative to the base) instead of `/`.
    pub fn starting_at(mut self, href: &str) -> Self {
        self.entries = vec![self.create_href(href)];
        self.position = 0;
        self
    }

    /// Full hrefs of all entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        strip_base(&self.base, &self.entries[self.position])
    }

    fn push(&mut self, href: &str) {
        let full = self.create_href(href);
        self.entries.truncate(self.position + 1);
        self.entries.push(full);
        self.position = self.entries.len() - 1;
    }

    fn replace(&mut self, href: &str) {
        self.entries[self.position] = self.create_href(href);
    }

    fn go(&mut self, delta: isize) -> Option<String> {
        if delta == 0 {
            return None;
        }
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        Some(self.location())
    }

    fn base(&self) -> &str {
        &self.base
    }
}
