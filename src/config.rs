//! Compiler configuration.
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! placeholder_style = "numbered"
//! default_limit = 50
//! max_limit = 1000
//! ```

use std::path::Path;

use rql_core::PlaceholderStyle;
use serde::Deserialize;

use crate::error::ConfigError;

/// Page size of the list endpoints when a query asks for no limit.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Settings shared by every statement a [`crate::Compiler`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// How placeholders are rendered in SQL text.
    pub placeholder_style: PlaceholderStyle,
    /// Limit applied when the query does not request one.
    pub default_limit: Option<u64>,
    /// Upper bound for any requested limit.
    pub max_limit: Option<u64>,
}

impl CompilerConfig {
    pub const fn new() -> Self {
        Self {
            placeholder_style: PlaceholderStyle::Numbered,
            default_limit: None,
            max_limit: None,
        }
    }

    /// Numbered placeholders with the list endpoints' default page size.
    pub const fn paginated() -> Self {
        Self::new().with_default_limit(DEFAULT_PAGE_SIZE)
    }

    pub const fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder_style = style;
        self
    }

    pub const fn with_default_limit(mut self, limit: u64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    pub const fn with_max_limit(mut self, limit: u64) -> Self {
        self.max_limit = Some(limit);
        self
    }

    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from specific path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.into())
            } else {
                ConfigError::Io(path.into(), e)
            }
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(default), Some(max)) = (self.default_limit, self.max_limit)
            && default > max
        {
            return Err(ConfigError::LimitRange { default, max });
        }
        Ok(())
    }

    /// Limit that ends up in the statement; `0` means no LIMIT clause.
    pub fn effective_limit(&self, requested: u64) -> u64 {
        let limit = if requested > 0 {
            requested
        } else {
            self.default_limit.unwrap_or(0)
        };
        match self.max_limit {
            Some(max) if max > 0 => limit.min(max),
            _ => limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CompilerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, CompilerConfig::new());
        assert_eq!(cfg.placeholder_style, PlaceholderStyle::Numbered);
        assert_eq!(cfg.effective_limit(0), 0);
        assert_eq!(cfg.effective_limit(25), 25);
    }

    #[test]
    fn parse_full() {
        let cfg = CompilerConfig::from_toml_str(
            r#"
            placeholder_style = "positional"
            default_limit = 50
            max_limit = 200
            "#,
        )
        .unwrap();
        assert_eq!(cfg.placeholder_style, PlaceholderStyle::Positional);
        assert_eq!(cfg.effective_limit(0), 50);
        assert_eq!(cfg.effective_limit(500), 200);
    }

    #[test]
    fn postgres_alias() {
        let cfg = CompilerConfig::from_toml_str(r#"placeholder_style = "postgres""#).unwrap();
        assert_eq!(cfg.placeholder_style, PlaceholderStyle::Numbered);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_ranges() {
        assert!(matches!(
            CompilerConfig::from_toml_str("page_size = 3"),
            Err(ConfigError::Parse(_))
        ));
        let err = CompilerConfig::from_toml_str("default_limit = 100\nmax_limit = 10");
        let Err(ConfigError::LimitRange { default, max }) = err else {
            panic!("expected a limit range error");
        };
        assert_eq!((default, max), (100, 10));
    }

    #[test]
    fn missing_file() {
        let err = CompilerConfig::from_path("/definitely/not/here/rql.toml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
