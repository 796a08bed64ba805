use std::path::PathBuf;

use thiserror::Error;

use crate::schema::{DataType, ScopeKey};

/// Where a field reference appeared in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldContext {
    Filter,
    Sort,
    GroupBy,
}

impl FieldContext {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filter => "filters",
            Self::Sort => "sort",
            Self::GroupBy => "group by",
        }
    }
}

impl std::fmt::Display for FieldContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of a resource query. No SQL is produced when any of these occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("{field} is not supported in {context} for {resource}")]
    UnsupportedField {
        resource: String,
        field: String,
        context: FieldContext,
    },

    #[error("operator '{operator}' is not supported for {field}")]
    UnsupportedOperator { field: String, operator: String },

    #[error("invalid value {value} for {field}: expected {expected}")]
    TypeMismatch {
        field: String,
        expected: DataType,
        value: String,
    },

    #[error("{option} is not supported for {resource}")]
    UnsupportedOption {
        resource: String,
        option: &'static str,
    },

    #[error("group by requires a key")]
    EmptyGroupBy,

    #[error("only one group by key is supported, got {count}")]
    TooManyGroupKeys { count: usize },

    #[error("{resource} requires the {key} scope")]
    MissingScope { resource: String, key: ScopeKey },

    #[error("unknown resource: {0}")]
    UnknownResource(String),
}

impl CompileError {
    /// Every rejection is caused by the caller's input and maps to a client
    /// "bad request".
    pub const fn is_bad_request(&self) -> bool {
        match self {
            Self::UnsupportedField { .. }
            | Self::UnsupportedOperator { .. }
            | Self::UnsupportedOption { .. }
            | Self::TypeMismatch { .. }
            | Self::EmptyGroupBy
            | Self::TooManyGroupKeys { .. }
            | Self::MissingScope { .. }
            | Self::UnknownResource(_) => true,
        }
    }

    pub(crate) fn unsupported_field(resource: &str, field: &str, context: FieldContext) -> Self {
        Self::UnsupportedField {
            resource: resource.to_owned(),
            field: field.to_owned(),
            context,
        }
    }
}

/// Result type for query compilation
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors raised while loading a [`crate::CompilerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("default_limit ({default}) exceeds max_limit ({max})")]
    LimitRange { default: u64, max: u64 },
}
