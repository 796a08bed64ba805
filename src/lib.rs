//! # RQL
//!
//! Compiles declarative resource queries (filters, free-text search, sort,
//! a single group-by key, limit/offset) into parameterized SQL against a
//! catalog of resources.
//!
//! ## Quick Start
//!
//! ```rust
//! use rql::{Filter, Operator, ResourceQuery, ResourceKind, Scope, SortSpec};
//!
//! # fn main() -> rql::Result<()> {
//! let query = ResourceQuery::new()
//!     .filter(Filter::new("amount", Operator::Gte, 1000))
//!     .sort(SortSpec::desc("created_at"))
//!     .limit(10);
//!
//! let statement = rql::compile(ResourceKind::OrgInvoices, &query, &Scope::org("org-1"))?;
//! assert!(statement.sql().ends_with("LIMIT $3"));
//! assert_eq!(statement.params().len(), statement.placeholder_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Statements
//!
//! | Function          | Produces                                         |
//! |-------------------|--------------------------------------------------|
//! | [`compile`]       | the filtered, searched, sorted and paged rows    |
//! | [`compile_group`] | `COUNT(*) AS "count", key AS "values"` per group |
//! | [`compile_count`] | `COUNT(*) AS "total"` over the filtered rows     |

pub mod compiler;
pub mod config;
pub mod error;
pub mod query;
pub mod resources;
pub mod schema;
pub mod value;

// =============================================================================
// Root-level exports
// =============================================================================

pub use compiler::{Compiler, Predicate, Term};
pub use config::{CompilerConfig, DEFAULT_PAGE_SIZE};
pub use error::{CompileError, ConfigError, FieldContext, Result};
pub use query::{Filter, Operator, ResourceQuery, SortOrder, SortSpec};
pub use resources::ResourceKind;
pub use schema::{
    DataType, FieldDescriptor, FieldTarget, Layer, OperatorSet, Registry, ResourceSchema, Scope,
    ScopeKey,
};
pub use value::Value;

pub use rql_core;
pub use rql_core::{PlaceholderStyle, Statement};

/// Compiles the list statement for a built-in resource with the default
/// configuration.
pub fn compile(
    resource: impl AsRef<str>,
    query: &ResourceQuery,
    scope: &Scope,
) -> Result<Statement<Value>> {
    Compiler::default().compile(resource, query, scope)
}

/// Compiles the group-count statement for a built-in resource.
pub fn compile_group(
    resource: impl AsRef<str>,
    query: &ResourceQuery,
    scope: &Scope,
) -> Result<Statement<Value>> {
    Compiler::default().compile_group(resource, query, scope)
}

/// Compiles the total-count statement for a built-in resource.
pub fn compile_count(
    resource: impl AsRef<str>,
    query: &ResourceQuery,
    scope: &Scope,
) -> Result<Statement<Value>> {
    Compiler::default().compile_count(resource, query, scope)
}
