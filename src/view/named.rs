//! View that only records its lifecycle in the log.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::routing::types::Resolved;
use crate::view::View;

/// Placeholder view identified by name.
///
/// Used where the real view lives outside the process, e.g. by the CLI when
/// inspecting a configured table.
#[derive(Debug)]
pub struct NamedView {
    id: String,
    mounted: AtomicBool,
}

impl NamedView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mounted: AtomicBool::new(false),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }
}

impl View for NamedView {
    fn id(&self) -> &str {
        &self.id
    }

    fn mount(&self, route: &Resolved) {
        self.mounted.store(true, Ordering::Release);
        tracing::info!(view = %self.id, route = %route.name(), href = %route.href(), "View mounted");
    }

    fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
        tracing::info!(view = %self.id, "View unmounted");
    }

    fn update(&self, route: &Resolved) {
        tracing::info!(view = %self.id, href = %route.href(), "View updated");
    }
}
