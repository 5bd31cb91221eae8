//! Navigation metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): activations by route and kind
//! - `router_not_found_total` (counter): failed lookups by target kind

use crate::routing::router::NavigationKind;
use crate::routing::types::NotFoundTarget;

pub fn record_navigation(route: &str, kind: NavigationKind) {
    ::metrics::counter!(
        "router_navigations_total",
        "route" => route.to_string(),
        "kind" => kind.as_str()
    )
    .increment(1);
}

pub fn record_not_found(target: &NotFoundTarget) {
    let by = match target {
        NotFoundTarget::Path(_) => "path",
        NotFoundTarget::Name(_) => "name",
    };
    ::metrics::counter!("router_not_found_total", "by" => by).increment(1);
}
