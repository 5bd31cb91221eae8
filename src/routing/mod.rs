//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation trigger (href, or name + params, or back/forward)
//!     → router.rs (resolver state, history, view activation)
//!     → table.rs (ordered lookup, name index)
//!     → matcher.rs (segment-wise pattern matching)
//!     → Return: Resolved or NotFound
//!
//! Table Compilation (at startup):
//!     RouteDef[] / RouteConfig[]
//!     → Parse patterns, check unique paths and names
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the lookup path
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod location;
pub mod matcher;
pub mod router;
pub mod table;
pub mod types;

pub use location::Location;
pub use matcher::{BuildError, MatchOptions, PathPattern};
pub use router::{Activation, NamedNavigation, NavigationKind, Resolver, RouterState};
pub use table::{RouteDef, RouteTable, RouteTableBuilder};
pub use types::{NotFoundTarget, Params, Resolved, ResolvedSummary, Route, RouteError, RouteResult, TableError};
