//! Shared fixtures for integration tests.

use std::sync::{Arc, Mutex};

use route_table::{Resolved, RouteTable, View};

/// Shared log of view lifecycle calls.
pub type Events = Arc<Mutex<Vec<String>>>;

/// View that records every lifecycle call into a shared log.
#[derive(Debug)]
pub struct RecordingView {
    id: String,
    events: Events,
}

impl RecordingView {
    pub fn new(id: &str, events: &Events) -> Arc<dyn View> {
        Arc::new(Self {
            id: id.to_string(),
            events: events.clone(),
        })
    }
}

impl View for RecordingView {
    fn id(&self) -> &str {
        &self.id
    }

    fn mount(&self, route: &Resolved) {
        self.events
            .lock()
            .unwrap()
            .push(format!("mount:{}:{}", self.id, route.href()));
    }

    fn unmount(&self) {
        self.events.lock().unwrap().push(format!("unmount:{}", self.id));
    }

    fn update(&self, route: &Resolved) {
        self.events
            .lock()
            .unwrap()
            .push(format!("update:{}:{}", self.id, route.href()));
    }
}

/// Route table with the `/about` entry (five routes).
#[allow(dead_code)]
pub fn full_table(events: &Events) -> RouteTable {
    RouteTable::builder()
        .route("/", "Home", RecordingView::new("HomeView", events))
        .route("/grouped", "Grouped", RecordingView::new("HomeGroupedView", events))
        .route("/about", "About", RecordingView::new("AboutView", events))
        .route("/terms", "Terms", RecordingView::new("TermsView", events))
        .route("/help", "Help", RecordingView::new("HelpView", events))
        .build()
        .unwrap()
}

/// Route table without the `/about` entry (four routes).
#[allow(dead_code)]
pub fn table_without_about(events: &Events) -> RouteTable {
    RouteTable::builder()
        .route("/", "Home", RecordingView::new("HomeView", events))
        .route("/grouped", "Grouped", RecordingView::new("HomeGroupedView", events))
        .route("/terms", "Terms", RecordingView::new("TermsView", events))
        .route("/help", "Help", RecordingView::new("HelpView", events))
        .build()
        .unwrap()
}

pub fn events() -> Events {
    Arc::new(Mutex::new(Vec::new()))
}
