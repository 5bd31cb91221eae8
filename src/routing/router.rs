//! Route resolution and navigation.
//!
//! # Responsibilities
//! - Resolve a path or a route name against the table
//! - Keep the currently active route
//! - Reflect activations in the history and swap mounted views
//! - Turn back / forward moves into navigations
//!
//! # States
//! ```text
//! Unresolved → Resolved(r): first successful navigation
//! Resolved(r) → Resolved(r'): every later successful navigation
//! ```
//! A failed navigation leaves the state untouched.
//!
//! # Design Decisions
//! - Explicitly constructed and passed around; no global instance
//! - Single owner of the current-route pointer (`&mut self`)
//! - Navigating to the exact current href is a no-op
//! - Same route with different params updates the view instead of remounting

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::history::{History, MemoryHistory};
use crate::observability::metrics;
use crate::routing::location::Location;
use crate::routing::table::RouteTable;
use crate::routing::types::{
    NotFoundTarget, Params, Resolved, Route, RouteError, RouteResult,
};

/// How an activation reached the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    /// A new history entry was written.
    Push,
    /// The current history entry was overwritten.
    Replace,
    /// The history moved (back / forward); nothing was written.
    Pop,
}

impl NavigationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationKind::Push => "push",
            NavigationKind::Replace => "replace",
            NavigationKind::Pop => "pop",
        }
    }
}

/// Resolver state.
#[derive(Debug, Clone, Default)]
pub enum RouterState {
    #[default]
    Unresolved,
    Resolved(Resolved),
}

/// Signal handed to activation listeners after every navigation.
#[derive(Debug, Clone)]
pub struct Activation {
    pub from: Option<Resolved>,
    pub to: Resolved,
    pub kind: NavigationKind,
}

type Listener = Box<dyn FnMut(&Activation) + Send>;

/// Navigation to a route by name.
#[derive(Debug, Clone)]
pub struct NamedNavigation<'a> {
    name: &'a str,
    params: Params,
    query: Vec<(&'a str, &'a str)>,
    hash: Option<&'a str>,
    kind: NavigationKind,
}

impl<'a> NamedNavigation<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            params: Params::new(),
            query: Vec::new(),
            hash: None,
            kind: NavigationKind::Push,
        }
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn query(mut self, key: &'a str, value: &'a str) -> Self {
        self.query.push((key, value));
        self
    }

    pub fn hash(mut self, hash: &'a str) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Overwrite the current history entry instead of pushing.
    pub fn replace(mut self) -> Self {
        self.kind = NavigationKind::Replace;
        self
    }
}

/// Stateful resolver over an immutable route table.
pub struct Resolver<H: History = MemoryHistory> {
    table: Arc<RouteTable>,
    history: H,
    state: RouterState,
    listeners: Vec<Listener>,
}

impl<H: History> Resolver<H> {
    pub fn new(table: Arc<RouteTable>, history: H) -> Self {
        Self {
            table,
            history,
            state: RouterState::Unresolved,
            listeners: Vec::new(),
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    /// Current resolution, `None` before the first navigation.
    pub fn current(&self) -> Option<&Resolved> {
        match &self.state {
            RouterState::Resolved(r) => Some(r),
            RouterState::Unresolved => None,
        }
    }

    /// Currently active route, `None` before the first navigation.
    pub fn current_route(&self) -> Option<&Arc<Route>> {
        self.current().map(Resolved::route)
    }

    /// Register a listener called after every successful activation.
    pub fn on_activate<F>(&mut self, listener: F)
    where
        F: FnMut(&Activation) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Initial navigation: resolve whatever the history currently shows,
    /// replacing its entry.
    pub fn start(&mut self) -> RouteResult<Resolved> {
        let href = self.history.location();
        self.visit(&href, NavigationKind::Replace)
    }

    /// Resolve `href` and activate the match, pushing a history entry.
    pub fn resolve(&mut self, href: &str) -> RouteResult<Resolved> {
        self.visit(href, NavigationKind::Push)
    }

    /// Like [`resolve`](Self::resolve), but replaces the current entry.
    pub fn replace(&mut self, href: &str) -> RouteResult<Resolved> {
        self.visit(href, NavigationKind::Replace)
    }

    /// Navigate to a route by name, substituting `params`.
    pub fn navigate(&mut self, name: &str, params: &Params) -> RouteResult<Resolved> {
        self.navigate_with(NamedNavigation::new(name).params(params.clone()))
    }

    pub fn navigate_with(&mut self, nav: NamedNavigation<'_>) -> RouteResult<Resolved> {
        let resolved = self
            .table
            .resolve_named(nav.name, &nav.params, &nav.query, nav.hash)
            .inspect_err(|e| self.report_failure(e))?;
        Ok(self.activate(resolved, nav.kind))
    }

    /// Href for a named route, for building links.
    pub fn href_for(&self, name: &str, params: &Params) -> RouteResult<String> {
        let href = self.table.href_for(name, params)?;
        Ok(self.history.create_href(&href))
    }

    pub fn back(&mut self) -> RouteResult<Option<Resolved>> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> RouteResult<Option<Resolved>> {
        self.go(1)
    }

    /// Move the history by `delta` and activate the route at the new
    /// position. `Ok(None)` when the history could not move.
    ///
    /// If the new location matches nothing, the history has still moved but
    /// the resolver keeps its previous state.
    pub fn go(&mut self, delta: isize) -> RouteResult<Option<Resolved>> {
        match self.history.go(delta) {
            Some(href) => self.visit(&href, NavigationKind::Pop).map(Some),
            None => {
                tracing::debug!(delta, "History did not move");
                Ok(None)
            }
        }
    }

    fn visit(&mut self, href: &str, kind: NavigationKind) -> RouteResult<Resolved> {
        let resolved = Location::parse(href)
            .map_err(|_| RouteError::NotFound(NotFoundTarget::Path(href.to_string())))
            .and_then(|location| self.table.resolve_location_or_fallback(location))
            .inspect_err(|e| self.report_failure(e))?;
        Ok(self.activate(resolved, kind))
    }

    fn report_failure(&self, err: &RouteError) {
        if let RouteError::NotFound(target) = err {
            metrics::record_not_found(target);
        }
        tracing::warn!(
            error = %err,
            current = self.current().map(Resolved::name).unwrap_or("none"),
            "Navigation failed"
        );
    }

    fn activate(&mut self, to: Resolved, kind: NavigationKind) -> Resolved {
        let from = self.current().cloned();

        if let Some(prev) = &from {
            if kind != NavigationKind::Pop && prev.same_route(&to) && prev.href() == to.href() {
                tracing::debug!(href = %to.href(), "Already at requested location");
                return prev.clone();
            }
        }

        let href = to.href();
        match kind {
            NavigationKind::Push => self.history.push(&href),
            NavigationKind::Replace => self.history.replace(&href),
            NavigationKind::Pop => {}
        }

        match &from {
            Some(prev) if prev.same_route(&to) => to.route().view().update(&to),
            Some(prev) => {
                prev.route().view().unmount();
                to.route().view().mount(&to);
            }
            None => to.route().view().mount(&to),
        }

        metrics::record_navigation(to.name(), kind);
        tracing::debug!(
            route = %to.name(),
            href = %href,
            kind = kind.as_str(),
            from = from.as_ref().map(Resolved::name).unwrap_or("none"),
            fallback = to.is_fallback(),
            "Route activated"
        );

        self.state = RouterState::Resolved(to.clone());

        let activation = Activation {
            from,
            to: to.clone(),
            kind,
        };
        for listener in &mut self.listeners {
            listener(&activation);
        }

        to
    }
}

impl<H: History> fmt::Debug for Resolver<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("routes", &self.table.len())
            .field("history", &self.history)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
