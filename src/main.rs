//! route-table CLI
//!
//! Inspect and exercise a route table defined in a TOML file.
//!
//! ```text
//! route-table --config routes.toml list
//! route-table --config routes.toml resolve / /about /nope
//! route-table --config routes.toml navigate User -p id=7 -q tab=posts
//! route-table --config routes.toml session /grouped @About back forward
//! route-table --config routes.toml watch
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use serde::Serialize;

use route_table::config::TableWatcher;
use route_table::config::{load_config, RouterConfig};
use route_table::observability::logging::init_logging;
use route_table::routing::{NamedNavigation, ResolvedSummary};
use route_table::{Params, Resolver, RouteTable, ViewRegistry};

#[derive(Parser)]
#[command(name = "route-table")]
#[command(about = "Inspect and exercise a client-side route table", long_about = None)]
struct Cli {
    /// Routes file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    List,
    /// Validate the routes file and build the table
    Check,
    /// Resolve paths against the table
    Resolve {
        paths: Vec<String>,
        /// Use the configured fallback route for unmatched paths
        #[arg(long)]
        fallback: bool,
    },
    /// Build the href of a named route
    Navigate {
        name: String,
        /// Path param, key=value
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
        /// Query pair, key=value
        #[arg(short, long = "query", value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },
    /// Run a navigation session: paths, @Name, back, forward
    Session { steps: Vec<String> },
    /// Watch the routes file and rebuild the table on change
    Watch,
}

#[derive(Serialize)]
struct RouteListing<'a> {
    path: &'a str,
    name: &'a str,
    view: &'a str,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability);
    tracing::debug!(path = ?cli.config, routes = config.routes.len(), "Configuration loaded");

    let table = Arc::new(build_table(&config)?);

    match cli.command {
        Commands::List => {
            let routes: Vec<RouteListing<'_>> = table
                .routes()
                .map(|r| RouteListing {
                    path: r.path(),
                    name: r.name(),
                    view: r.view().id(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Check => {
            println!(
                "ok: {} routes, fallback: {}",
                table.len(),
                table.fallback().map(|r| r.name()).unwrap_or("none")
            );
        }
        Commands::Resolve { paths, fallback } => {
            let mut failed = false;
            for path in &paths {
                let result = if fallback {
                    table.resolve_or_fallback(path)
                } else {
                    table.resolve(path)
                };
                match result {
                    Ok(resolved) => print_json(&ResolvedSummary::from(&resolved))?,
                    Err(e) => {
                        eprintln!("{}", e);
                        failed = true;
                    }
                }
            }
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Navigate { name, params, query } => {
            let params: Params = params.into_iter().collect();
            let query: Vec<(&str, &str)> =
                query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            match table.resolve_named(&name, &params, &query, None) {
                Ok(resolved) => print_json(&ResolvedSummary::from(&resolved))?,
                Err(e) => {
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Session { steps } => {
            if !run_session(table, &config, &steps)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Watch => watch(&cli.config, &config).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn build_table(config: &RouterConfig) -> Result<RouteTable, route_table::TableError> {
    RouteTable::from_config(config, &registry_for(config))
}

/// Views the CLI stands in for: one tracing-backed view per id in the file.
fn registry_for(config: &RouterConfig) -> ViewRegistry {
    ViewRegistry::named(config.routes.iter().map(|r| r.view.clone()))
}

fn run_session(
    table: Arc<RouteTable>,
    config: &RouterConfig,
    steps: &[String],
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut router = Resolver::new(table, config.history.memory_history());
    let activations = Arc::new(Mutex::new(Vec::new()));
    let sink = activations.clone();
    router.on_activate(move |a| {
        if let Ok(mut log) = sink.lock() {
            log.push(serde_json::json!({
                "kind": a.kind,
                "from": a.from.as_ref().map(|r| r.name().to_string()),
                "to": ResolvedSummary::from(&a.to),
            }));
        }
    });

    let mut ok = true;
    if let Err(e) = router.start() {
        eprintln!("start: {}", e);
        ok = false;
    }
    for step in steps {
        let result = match step.as_str() {
            "back" => router.back().map(|_| ()),
            "forward" => router.forward().map(|_| ()),
            s => match s.strip_prefix('@') {
                Some(name) => router.navigate_with(NamedNavigation::new(name)).map(|_| ()),
                None => router.resolve(s).map(|_| ()),
            },
        };
        if let Err(e) = result {
            eprintln!("{}: {}", step, e);
            ok = false;
        }
    }

    let log = activations
        .lock()
        .map(|log| log.clone())
        .unwrap_or_default();
    print_json(&serde_json::json!({
        "activations": log,
        "current": router.current().map(ResolvedSummary::from),
        "history": router.history().entries(),
    }))?;
    Ok(ok)
}

async fn watch(path: &Path, initial: &RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut updates) = TableWatcher::new(path, registry_for(initial));
    let _handle = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(update) = update else { break };
                if let Ok(reloaded) = update {
                    let names: Vec<&str> = reloaded.table.routes().map(|r| r.name()).collect();
                    println!("{}", names.join(" "));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}
