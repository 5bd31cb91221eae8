//! Route table.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route matching a path
//! - Look up routes by name and build their hrefs
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - O(1) name lookup via HashMap
//! - O(n) path scan in declaration order, first match wins
//! - Explicit NotFound rather than silent default; the fallback route is
//!   only used when the caller asks for it

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::schema::RouterConfig;
use crate::routing::location::Location;
use crate::routing::matcher::{BuildError, MatchOptions, PathPattern};
use crate::routing::types::{NotFoundTarget, Params, Resolved, Route, RouteError, RouteResult, TableError};
use crate::view::{View, ViewRegistry};

/// Declaration of a single route before compilation.
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub path: String,
    pub name: String,
    pub view: Arc<dyn View>,
}

impl RouteDef {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: Arc<dyn View>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }
}

/// Immutable, ordered set of routes.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    by_name: HashMap<String, usize>,
    options: MatchOptions,
    fallback: Option<Arc<Route>>,
}

impl RouteTable {
    /// Compile route declarations into a table.
    pub fn new(defs: Vec<RouteDef>, options: MatchOptions) -> Result<Self, TableError> {
        Self::with_fallback(defs, options, None)
    }

    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    fn with_fallback(
        defs: Vec<RouteDef>,
        options: MatchOptions,
        fallback: Option<&str>,
    ) -> Result<Self, TableError> {
        let mut routes = Vec::with_capacity(defs.len());
        let mut by_name = HashMap::with_capacity(defs.len());
        let mut paths = HashSet::with_capacity(defs.len());

        for def in defs {
            let pattern = PathPattern::parse(&def.path)?;
            if !paths.insert(pattern.key(options)) {
                return Err(TableError::DuplicatePath(def.path));
            }
            if by_name.contains_key(&def.name) {
                return Err(TableError::DuplicateName(def.name));
            }
            by_name.insert(def.name.clone(), routes.len());
            routes.push(Arc::new(Route {
                pattern,
                name: def.name,
                view: def.view,
            }));
        }

        let fallback = match fallback {
            Some(name) => {
                let idx = by_name
                    .get(name)
                    .ok_or_else(|| TableError::UnknownFallback(name.to_string()))?;
                Some(routes[*idx].clone())
            }
            None => None,
        };

        tracing::debug!(
            routes = routes.len(),
            strict = options.strict,
            sensitive = options.sensitive,
            fallback = fallback.as_ref().map(|r| r.name()).unwrap_or("none"),
            "Route table compiled"
        );

        Ok(Self {
            routes,
            by_name,
            options,
            fallback,
        })
    }

    /// Build a table from a loaded config, resolving view ids through `views`.
    pub fn from_config(config: &RouterConfig, views: &ViewRegistry) -> Result<Self, TableError> {
        let defs = config
            .routes
            .iter()
            .map(|r| {
                let view = views.get(&r.view).ok_or_else(|| TableError::UnknownView {
                    route: r.name.clone(),
                    view: r.view.clone(),
                })?;
                Ok(RouteDef::new(r.path.clone(), r.name.clone(), view))
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Self::with_fallback(defs, config.options.matching(), config.options.fallback.as_deref())
    }

    /// Resolve an href to the first matching route, in declaration order.
    pub fn resolve(&self, href: &str) -> RouteResult<Resolved> {
        let location = Location::parse(href)
            .map_err(|_| RouteError::NotFound(NotFoundTarget::Path(href.to_string())))?;
        self.resolve_location(location)
    }

    pub fn resolve_location(&self, location: Location) -> RouteResult<Resolved> {
        for route in &self.routes {
            if let Some(params) = route.pattern.matches(location.path(), self.options) {
                return Ok(Resolved::new(route.clone(), params, location));
            }
        }
        Err(RouteError::NotFound(NotFoundTarget::Path(location.href())))
    }

    /// Like [`resolve`](Self::resolve), but activates the fallback route (if
    /// configured) when nothing matches. The requested location is kept.
    pub fn resolve_or_fallback(&self, href: &str) -> RouteResult<Resolved> {
        let location = Location::parse(href)
            .map_err(|_| RouteError::NotFound(NotFoundTarget::Path(href.to_string())))?;
        self.resolve_location_or_fallback(location)
    }

    pub fn resolve_location_or_fallback(&self, location: Location) -> RouteResult<Resolved> {
        match self.resolve_location(location.clone()) {
            Ok(resolved) => Ok(resolved),
            Err(err) => match &self.fallback {
                Some(route) => {
                    Ok(Resolved::new(route.clone(), Params::new(), location).as_fallback())
                }
                None => Err(err),
            },
        }
    }

    /// Resolve a named route with params, query pairs and hash.
    pub fn resolve_named(
        &self,
        name: &str,
        params: &Params,
        query: &[(&str, &str)],
        hash: Option<&str>,
    ) -> RouteResult<Resolved> {
        let route = self
            .by_name(name)
            .ok_or_else(|| RouteError::NotFound(NotFoundTarget::Name(name.to_string())))?;

        let path = route
            .pattern
            .build(params)
            .map_err(|err| match err {
                BuildError::Missing(param) => RouteError::MissingParam {
                    route: name.to_string(),
                    param,
                },
                BuildError::DotSegment { param, value } => RouteError::InvalidParam {
                    route: name.to_string(),
                    param,
                    value,
                },
            })?;

        let unused: Vec<&str> = params
            .iter()
            .map(|(k, _)| k)
            .filter(|k| !route.pattern.param_names().any(|n| n == *k))
            .collect();
        if !unused.is_empty() {
            tracing::debug!(route = %name, ?unused, "Ignoring params not used by route");
        }

        let location = Location::from_parts(path, query.iter().copied(), hash);
        let params = route
            .pattern
            .matches(location.path(), self.options)
            .unwrap_or_default();
        Ok(Resolved::new(route.clone(), params, location))
    }

    /// Build the href of a named route without resolving anything else.
    pub fn href_for(&self, name: &str, params: &Params) -> RouteResult<String> {
        self.resolve_named(name, params, &[], None).map(|r| r.href())
    }

    pub fn by_name(&self, name: &str) -> Option<&Arc<Route>> {
        self.by_name.get(name).map(|idx| &self.routes[*idx])
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    pub fn fallback(&self) -> Option<&Arc<Route>> {
        self.fallback.as_ref()
    }
}

/// Incremental construction of a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    defs: Vec<RouteDef>,
    options: MatchOptions,
    fallback: Option<String>,
}

impl RouteTableBuilder {
    pub fn route(
        mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        view: Arc<dyn View>,
    ) -> Self {
        self.defs.push(RouteDef::new(path, name, view));
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.options.sensitive = sensitive;
        self
    }

    /// Name of the route activated for unmatched paths.
    pub fn fallback(mut self, name: impl Into<String>) -> Self {
        self.fallback = Some(name.into());
        self
    }

    pub fn build(self) -> Result<RouteTable, TableError> {
        RouteTable::with_fallback(self.defs, self.options, self.fallback.as_deref())
    }
}
