//! Building route tables from routes files.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use route_table::config::{parse_config, ReloadError, TableWatcher};
use route_table::{MemoryHistory, Params, Resolver, RouteTable, TableError, ViewRegistry};

mod common;

const ROUTES: &str = r#"
[[routes]]
path = "/"
name = "Home"
view = "HomeView"

[[routes]]
path = "/grouped"
name = "Grouped"
view = "HomeGroupedView"

[[routes]]
path = "/terms"
name = "Terms"
view = "TermsView"

[[routes]]
path = "/help"
name = "Help"
view = "HelpView"
"#;

fn registry(events: &common::Events) -> ViewRegistry {
    let mut views = ViewRegistry::new();
    for id in ["HomeView", "HomeGroupedView", "AboutView", "TermsView", "HelpView"] {
        views.register(common::RecordingView::new(id, events));
    }
    views
}

#[test]
fn test_table_from_config() {
    let events = common::events();
    let config = parse_config(ROUTES).unwrap();
    let table = RouteTable::from_config(&config, &registry(&events)).unwrap();

    assert_eq!(
        table.routes().map(|r| r.name()).collect::<Vec<_>>(),
        vec!["Home", "Grouped", "Terms", "Help"]
    );
    assert!(table.resolve("/about").unwrap_err().is_not_found());

    let mut router = Resolver::new(Arc::new(table), config.history.memory_history());
    router.navigate("Grouped", &Params::new()).unwrap();
    assert_eq!(events.lock().unwrap().as_slice(), &["mount:HomeGroupedView:/grouped"]);
}

#[test]
fn test_unknown_view_rejected() {
    let config = parse_config(ROUTES).unwrap();
    let err = RouteTable::from_config(&config, &ViewRegistry::named(["HomeView"])).unwrap_err();
    assert_eq!(
        err,
        TableError::UnknownView {
            route: "Grouped".into(),
            view: "HomeGroupedView".into()
        }
    );
}

#[test]
fn test_options_from_config() {
    let text = format!("[options]\nstrict = true\nsensitive = true\nfallback = \"Home\"\n{}", ROUTES);
    let config = parse_config(&text).unwrap();
    let events = common::events();
    let table = RouteTable::from_config(&config, &registry(&events)).unwrap();

    assert!(table.resolve("/terms/").is_err());
    assert!(table.resolve("/Terms").is_err());
    assert_eq!(table.fallback().unwrap().name(), "Home");
    assert!(table.resolve_or_fallback("/Terms").unwrap().is_fallback());
}

#[tokio::test]
async fn test_watcher_delivers_rebuilt_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ROUTES.as_bytes()).unwrap();
    file.flush().unwrap();

    let events = common::events();
    let (watcher, mut updates) = TableWatcher::new(file.path(), registry(&events));
    let _handle = watcher.run().unwrap();

    let extended = format!(
        "{}\n[[routes]]\npath = \"/about\"\nname = \"About\"\nview = \"AboutView\"\n",
        ROUTES
    );
    std::fs::write(file.path(), extended).unwrap();

    let table = loop {
        let update = tokio::time::timeout(Duration::from_secs(10), updates.recv())
            .await
            .expect("no reload within timeout")
            .expect("watcher channel closed");
        // Editors may produce intermediate writes; wait for the full file
        match update {
            Ok(reloaded) if reloaded.table.len() == 5 => break reloaded.table,
            _ => continue,
        }
    };
    assert_eq!(table.resolve("/about").unwrap().name(), "About");

    let mut router = Resolver::new(table, MemoryHistory::new());
    router.resolve("/about").unwrap();
    assert_eq!(events.lock().unwrap().as_slice(), &["mount:AboutView:/about"]);
}

#[tokio::test]
async fn test_watcher_rejects_unregistered_view() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), ROUTES).unwrap();

    let (watcher, mut updates) = TableWatcher::new(file.path(), ViewRegistry::named(["HomeView"]));
    let _handle = watcher.run().unwrap();
    std::fs::write(file.path(), format!("{}\n", ROUTES)).unwrap();

    let rejection = loop {
        let update = tokio::time::timeout(Duration::from_secs(10), updates.recv())
            .await
            .expect("no reload within timeout")
            .expect("watcher channel closed");
        if let Err(ReloadError::Table(e)) = update {
            break e;
        }
    };
    assert!(matches!(rejection, TableError::UnknownView { .. }));
}
