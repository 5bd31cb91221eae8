//! Route table hot reload.
//!
//! # Responsibilities
//! - Watch a routes file through notify
//! - Load, validate and compile a fresh [`RouteTable`] on every change
//! - Deliver the new table, or the reason it was rejected, over a channel
//!
//! # Design Decisions
//! - The view registry is fixed when the watcher is created; a reloaded file
//!   naming a view the host never registered is rejected, not half-applied
//! - A live table is never touched. Swapping in the new one (and building a
//!   new `Resolver` around it) is the receiver's job

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::RouterConfig;
use crate::routing::table::RouteTable;
use crate::routing::types::TableError;
use crate::view::ViewRegistry;

/// Why a reload produced no table.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Route table rejected: {0}")]
    Table(#[from] TableError),
}

/// A table compiled from a freshly loaded routes file.
#[derive(Debug, Clone)]
pub struct Reloaded {
    pub config: RouterConfig,
    pub table: Arc<RouteTable>,
}

pub type TableUpdate = Result<Reloaded, ReloadError>;

/// Watches a routes file and rebuilds the table against a fixed registry.
pub struct TableWatcher {
    path: PathBuf,
    views: ViewRegistry,
    update_tx: mpsc::UnboundedSender<TableUpdate>,
}

impl TableWatcher {
    /// Returns the watcher and the receiving end for table updates.
    pub fn new(path: &Path, views: ViewRegistry) -> (Self, mpsc::UnboundedReceiver<TableUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                views,
                update_tx,
            },
            update_rx,
        )
    }

    /// Load and compile the file once, without watching.
    pub fn reload(&self) -> TableUpdate {
        reload_table(&self.path, &self.views)
    }

    /// Start watching on notify's background thread. The returned handle
    /// must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            views,
            update_tx,
        } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let update = reload_table(&path, &views);
                    match &update {
                        Ok(reloaded) => tracing::info!(
                            path = ?path,
                            routes = reloaded.table.len(),
                            "Route table rebuilt"
                        ),
                        Err(e) => tracing::error!(
                            path = ?path,
                            error = %e,
                            "Reload rejected, keeping current table"
                        ),
                    }
                    if update_tx.send(update).is_err() {
                        tracing::warn!(path = ?path, "Table receiver dropped, reload discarded");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?watched, "Routes watcher started");
        Ok(watcher)
    }
}

fn reload_table(path: &Path, views: &ViewRegistry) -> TableUpdate {
    let config = load_config(path)?;
    let table = RouteTable::from_config(&config, views)?;
    Ok(Reloaded {
        config,
        table: Arc::new(table),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &str = r#"
[[routes]]
path = "/"
name = "Home"
view = "HomeView"
"#;

    fn write(text: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), text).unwrap();
        file
    }

    #[test]
    fn test_reload_builds_table() {
        let file = write(ROUTES);
        let (watcher, _rx) = TableWatcher::new(file.path(), ViewRegistry::named(["HomeView"]));

        let reloaded = watcher.reload().unwrap();
        assert_eq!(reloaded.table.len(), 1);
        assert_eq!(reloaded.config.routes[0].name, "Home");
    }

    #[test]
    fn test_reload_reports_rejections() {
        let file = write(ROUTES);
        let (watcher, _rx) = TableWatcher::new(file.path(), ViewRegistry::named(["OtherView"]));
        assert!(matches!(
            watcher.reload(),
            Err(ReloadError::Table(TableError::UnknownView { .. }))
        ));

        std::fs::write(file.path(), "[[routes]\n").unwrap();
        assert!(matches!(
            watcher.reload(),
            Err(ReloadError::Config(ConfigError::Parse(_)))
        ));
    }
}
