//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIVE_ROUTES: &str = r#"
[options]
fallback = "Home"

[history]
base = "/app/"

[[routes]]
path = "/"
name = "Home"
view = "HomeView"

[[routes]]
path = "/grouped"
name = "Grouped"
view = "HomeGroupedView"

[[routes]]
path = "/about"
name = "About"
view = "AboutView"

[[routes]]
path = "/terms"
name = "Terms"
view = "TermsView"

[[routes]]
path = "/help"
name = "Help"
view = "HelpView"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FIVE_ROUTES).unwrap();
        assert_eq!(config.routes.len(), 5);
        assert_eq!(config.routes[2].name, "About");
        assert_eq!(config.options.fallback.as_deref(), Some("Home"));
        assert!(!config.options.strict);
        assert_eq!(config.history.base, "/app/");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIVE_ROUTES.as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.routes[1].path, "/grouped");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            load_config(Path::new("/definitely/not/here.toml")),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(parse_config("routes = 3"), Err(ConfigError::Parse(_))));

        let missing_field = "[[routes]]\npath = \"/\"\nname = \"Home\"\n";
        assert!(matches!(parse_config(missing_field), Err(ConfigError::Parse(_))));

        let err = parse_config("").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: no routes defined");
    }

    #[test]
    fn test_error_display_and_source() {
        use std::error::Error as _;

        let two = "[observability]\nlog_level = \"loud\"\n\n[[routes]]\npath = \"x\"\nname = \"X\"\nview = \"V\"\n";
        assert_eq!(
            parse_config(two).unwrap_err().to_string(),
            "Validation failed: route 'X': Invalid path pattern 'x': must start with '/', \
             unknown log level 'loud'"
        );

        let io = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(io.to_string().starts_with("IO error: "));
        assert!(io.source().is_some());

        let parse = parse_config("routes = 3").unwrap_err();
        assert!(parse.to_string().starts_with("Parse error: "));
        assert!(parse.source().is_some());
        assert!(parse_config("").unwrap_err().source().is_none());
    }
}
