//! Routing types and error definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::routing::location::Location;
use crate::routing::matcher::PathPattern;
use crate::view::View;

/// Path parameters, keyed by parameter name.
///
/// Rest parameters hold the remaining segments joined with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A single binding in the route table.
///
/// The view is shared with the hosting application, which owns its lifetime.
pub struct Route {
    pub(crate) pattern: PathPattern,
    pub(crate) name: String,
    pub(crate) view: Arc<dyn View>,
}

impl Route {
    /// The path pattern as declared.
    pub fn path(&self) -> &str {
        self.pattern.source()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path())
            .field("name", &self.name)
            .field("view", &self.view.id())
            .finish()
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolved {
    route: Arc<Route>,
    params: Params,
    location: Location,
    fallback: bool,
}

impl Resolved {
    pub(crate) fn new(route: Arc<Route>, params: Params, location: Location) -> Self {
        Self {
            route,
            params,
            location,
            fallback: false,
        }
    }

    pub(crate) fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn name(&self) -> &str {
        self.route.name()
    }

    /// The declared pattern of the matched route.
    pub fn path(&self) -> &str {
        self.route.path()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Full href (path, query and hash) this resolution was made for.
    pub fn href(&self) -> String {
        self.location.href()
    }

    /// True when the fallback route was activated for an unmatched path.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Whether both resolutions point at the same table entry.
    pub fn same_route(&self, other: &Resolved) -> bool {
        Arc::ptr_eq(&self.route, &other.route)
    }
}

/// Serializable summary used by the CLI and activation listeners.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSummary {
    pub name: String,
    pub path: String,
    pub view: String,
    pub href: String,
    pub params: Params,
    pub fallback: bool,
}

impl From<&Resolved> for ResolvedSummary {
    fn from(r: &Resolved) -> Self {
        Self {
            name: r.name().to_string(),
            path: r.path().to_string(),
            view: r.route.view().id().to_string(),
            href: r.href(),
            params: r.params.clone(),
            fallback: r.fallback,
        }
    }
}

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundTarget {
    Path(String),
    Name(String),
}

impl fmt::Display for NotFoundTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundTarget::Path(p) => write!(f, "path '{}'", p),
            NotFoundTarget::Name(n) => write!(f, "route name '{}'", n),
        }
    }
}

/// Errors surfaced by resolution and navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route matches the requested path or name.
    #[error("No route found for {0}")]
    NotFound(NotFoundTarget),

    /// Named navigation did not supply a required parameter.
    #[error("Missing required param '{param}' for route '{route}'")]
    MissingParam { route: String, param: String },

    /// A param value would be folded away as a `.` or `..` path segment.
    #[error("Param '{param}' of route '{route}' cannot be '{value}'")]
    InvalidParam {
        route: String,
        param: String,
        value: String,
    },
}

impl RouteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteError::NotFound(_))
    }
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("Invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route '{route}' references unknown view '{view}'")]
    UnknownView { route: String, view: String },

    #[error("Fallback route '{0}' is not in the table")]
    UnknownFallback(String),
}

/// Result type for resolution and navigation.
pub type RouteResult<T> = Result<T, RouteError>;
