//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route table / resolver produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (navigation counters)
//!
//! Consumers:
//!     → stderr (CLI), or whatever subscriber the host installs
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; subscriber and recorder setup belong to the binary
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
