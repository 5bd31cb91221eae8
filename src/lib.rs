//! Client-side route table and resolver.
//!
//! An ordered table of `(path, name, view)` bindings, a resolver that turns
//! paths or route names into activations, and the history and view
//! collaborators it drives.

pub mod config;
pub mod history;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::RouterConfig;
pub use history::{History, MemoryHistory};
pub use routing::{
    Activation, NamedNavigation, NavigationKind, NotFoundTarget, Params, Resolved, Resolver,
    Route, RouteError, RouteTable, TableError,
};
pub use view::{View, ViewRegistry};
