//! View collaborators.
//!
//! # Data Flow
//! ```text
//! host application
//!     → registers views (ViewRegistry)
//!     → route table holds shared references (Arc<dyn View>)
//!     → resolver mounts / unmounts / updates on activation
//! ```
//!
//! # Design Decisions
//! - A view is a capability ("mountable"), not a base type
//! - The resolver never inspects a view beyond its id
//! - Views are owned by the host; the table only shares them

pub mod named;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::types::Resolved;

pub use named::NamedView;

/// Anything the host can mount in place of the current view.
pub trait View: Send + Sync + fmt::Debug {
    /// Stable identifier used by config files to reference the view.
    fn id(&self) -> &str;

    /// Called when the view becomes active.
    fn mount(&self, route: &Resolved);

    /// Called when another route's view replaces this one.
    fn unmount(&self);

    /// Called when the active route stays the same but params, query or
    /// hash change.
    fn update(&self, route: &Resolved) {
        let _ = route;
    }
}

/// Views available to config-driven route tables, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct ViewRegistry {
    views: HashMap<String, Arc<dyn View>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under its own id. A later registration with the same
    /// id replaces the earlier one.
    pub fn register(&mut self, view: Arc<dyn View>) -> &mut Self {
        self.views.insert(view.id().to_string(), view);
        self
    }

    /// Registry with a [`NamedView`] for every given id.
    pub fn named<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for id in ids {
            registry.register(Arc::new(NamedView::new(id)));
        }
        registry
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn View>> {
        self.views.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.views.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
