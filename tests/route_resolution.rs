//! Resolution and navigation over the application's route tables.

use std::sync::Arc;

use route_table::{MemoryHistory, NotFoundTarget, Params, Resolver, RouteError, RouteTable};

mod common;

fn resolver(table: RouteTable) -> Resolver {
    Resolver::new(Arc::new(table), MemoryHistory::new())
}

#[test]
fn test_concrete_scenarios_full_table() {
    let events = common::events();
    let mut router = resolver(common::full_table(&events));

    assert_eq!(router.resolve("/").unwrap().name(), "Home");
    assert_eq!(router.resolve("/about").unwrap().name(), "About");
    assert_eq!(
        router.resolve("/nope").unwrap_err(),
        RouteError::NotFound(NotFoundTarget::Path("/nope".into()))
    );

    router.navigate("Grouped", &Params::new()).unwrap();
    assert_eq!(router.current_route().unwrap().path(), "/grouped");
}

#[test]
fn test_table_without_about() {
    let events = common::events();
    let table = common::table_without_about(&events);
    assert_eq!(table.len(), 4);

    let mut router = resolver(table);
    assert!(router.resolve("/about").unwrap_err().is_not_found());
    assert!(router.navigate("About", &Params::new()).unwrap_err().is_not_found());
    assert_eq!(router.resolve("/terms").unwrap().name(), "Terms");
}

#[test]
fn test_every_declared_path_resolves_to_itself() {
    let events = common::events();
    let table = common::full_table(&events);
    for route in table.routes() {
        let resolved = table.resolve(route.path()).unwrap();
        assert_eq!(resolved.path(), route.path());
        assert!(Arc::ptr_eq(resolved.route(), route));
    }
}

#[test]
fn test_undeclared_paths_are_not_found() {
    let events = common::events();
    let table = common::full_table(&events);
    for path in ["/nope", "/about/team", "/help/me", "/termsx", "/grouped/1"] {
        assert!(
            table.resolve(path).unwrap_err().is_not_found(),
            "{path} should not resolve"
        );
    }
}

#[test]
fn test_navigate_by_every_name() {
    let events = common::events();
    let table = Arc::new(common::full_table(&events));
    let mut router = Resolver::new(table.clone(), MemoryHistory::new());

    for route in table.routes() {
        router.navigate(route.name(), &Params::new()).unwrap();
        assert_eq!(router.current_route().unwrap().name(), route.name());
    }
    assert_eq!(router.history().len(), 1 + table.len());
}

#[test]
fn test_resolution_is_idempotent() {
    let events = common::events();
    let table = common::full_table(&events);
    let first = table.resolve("/help").unwrap();
    let second = table.resolve("/help").unwrap();
    assert_eq!(first.name(), second.name());
    assert!(Arc::ptr_eq(first.route().view(), second.route().view()));
}

#[test]
fn test_independent_resolvers() {
    let events = common::events();
    let mut a = resolver(common::full_table(&events));
    let mut b = resolver(common::table_without_about(&events));

    a.resolve("/about").unwrap();
    assert!(b.resolve("/about").is_err());
    assert_eq!(a.current_route().unwrap().name(), "About");
    assert!(b.current_route().is_none());
}

#[test]
fn test_view_swapping_and_history() {
    let events = common::events();
    let mut router = resolver(common::full_table(&events));

    router.start().unwrap();
    router.resolve("/about").unwrap();
    router.resolve("/help?topic=billing").unwrap();
    router.back().unwrap();
    router.forward().unwrap();

    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[
            "mount:HomeView:/",
            "unmount:HomeView",
            "mount:AboutView:/about",
            "unmount:AboutView",
            "mount:HelpView:/help?topic=billing",
            "unmount:HelpView",
            "mount:AboutView:/about",
            "unmount:AboutView",
            "mount:HelpView:/help?topic=billing",
        ]
    );
    assert_eq!(router.history().entries().len(), 3);
    assert_eq!(
        router.current().unwrap().location().query_pairs(),
        vec![("topic".to_string(), "billing".to_string())]
    );
}

#[test]
fn test_catch_all_route() {
    let events = common::events();
    let table = RouteTable::builder()
        .route("/", "Home", common::RecordingView::new("HomeView", &events))
        .route("/:path*", "NotFound", common::RecordingView::new("NotFoundView", &events))
        .fallback("NotFound")
        .build()
        .unwrap();
    let mut router = resolver(table);

    let r = router.resolve("/missing/page").unwrap();
    assert_eq!(r.name(), "NotFound");
    assert_eq!(r.params().get("path"), Some("missing/page"));
    assert_eq!(router.history().entries().last().unwrap(), "/missing/page");
    // Matched as an ordinary route, the fallback is never consulted
    assert!(!r.is_fallback());
}

#[test]
fn test_configured_fallback_keeps_requested_href() {
    let events = common::events();
    let table = RouteTable::builder()
        .route("/", "Home", common::RecordingView::new("HomeView", &events))
        .route("/404", "NotFound", common::RecordingView::new("NotFoundView", &events))
        .fallback("NotFound")
        .build()
        .unwrap();
    let mut router = resolver(table);

    let r = router.resolve("/gone?ref=mail").unwrap();
    assert!(r.is_fallback());
    assert_eq!(router.current_route().unwrap().name(), "NotFound");
    assert_eq!(router.history().entries().last().unwrap(), "/gone?ref=mail");

    // Named navigation never falls back
    assert!(router.navigate("Gone", &Params::new()).unwrap_err().is_not_found());
}

#[test]
fn test_base_path_history() {
    let events = common::events();
    let table = Arc::new(common::full_table(&events));
    let mut router = Resolver::new(table, MemoryHistory::with_base("/app/").starting_at("/terms"));

    assert_eq!(router.start().unwrap().name(), "Terms");
    router.navigate("Help", &Params::new()).unwrap();
    assert_eq!(
        router.history().entries(),
        &["/app/terms".to_string(), "/app/help".to_string()]
    );
    assert_eq!(router.href_for("About", &Params::new()).unwrap(), "/app/about");
}
