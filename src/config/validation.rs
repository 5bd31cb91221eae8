//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check path patterns parse and are unique under the matching options
//! - Check route names are unique and the fallback names a route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::matcher::PathPattern;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes defined")]
    NoRoutes,

    #[error("route #{index}: {field} must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error("route '{name}': {reason}")]
    InvalidPath { name: String, reason: String },

    #[error("duplicate path '{0}'")]
    DuplicatePath(String),

    #[error("duplicate name '{0}'")]
    DuplicateName(String),

    #[error("fallback '{0}' does not name a route")]
    UnknownFallback(String),

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let matching = config.options.matching();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut paths = HashSet::new();
    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        for (field, value) in [("path", &route.path), ("name", &route.name), ("view", &route.view)] {
            if value.trim().is_empty() {
                errors.push(ValidationError::EmptyField { index, field });
            }
        }

        match PathPattern::parse(&route.path) {
            Ok(pattern) => {
                if !paths.insert(pattern.key(matching)) {
                    errors.push(ValidationError::DuplicatePath(route.path.clone()));
                }
            }
            Err(e) => errors.push(ValidationError::InvalidPath {
                name: route.name.clone(),
                reason: e.to_string(),
            }),
        }
        if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }
    }

    if let Some(fallback) = &config.options.fallback {
        if !names.contains(fallback.as_str()) {
            errors.push(ValidationError::UnknownFallback(fallback.clone()));
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
