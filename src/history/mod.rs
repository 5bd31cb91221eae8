//! History collaborator.
//!
//! # Data Flow
//! ```text
//! resolver activation
//!     → History::push / History::replace (reflect new address)
//!
//! back / forward
//!     → History::go(delta)
//!     → new location handed back to the resolver (pop navigation)
//! ```
//!
//! # Design Decisions
//! - Locations handed to and from the resolver never include the base
//! - Entries stored by an implementation always include the base
//! - `go` reports whether the position actually moved

pub mod memory;

use std::fmt;

pub use memory::MemoryHistory;

/// Address-bar abstraction driven by the resolver.
pub trait History: Send + fmt::Debug {
    /// Current location, relative to [`base`](Self::base).
    fn location(&self) -> String;

    /// Append a new entry, discarding any forward entries.
    fn push(&mut self, href: &str);

    /// Overwrite the current entry.
    fn replace(&mut self, href: &str);

    /// Move `delta` entries. Returns the new location, or `None` if the
    /// move would leave the entry stack (nothing changes then).
    fn go(&mut self, delta: isize) -> Option<String>;

    /// Normalized base prefix (`""` or `/segment...` without trailing slash).
    fn base(&self) -> &str;

    /// Full href as it appears in the address bar.
    fn create_href(&self, href: &str) -> String {
        format!("{}{}", self.base(), href)
    }
}

/// Normalize a configured base: leading slash, no trailing slash, `/` → `""`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Remove `base` from a full href. Hrefs outside the base are returned as is.
pub fn strip_base(base: &str, href: &str) -> String {
    if base.is_empty() {
        return href.to_string();
    }
    match href.strip_prefix(base) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        Some(rest) if rest.starts_with('?') || rest.starts_with('#') => format!("/{}", rest),
        _ => href.to_string(),
    }
}
