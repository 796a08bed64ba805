//! Tracing utilities for query compilation.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level tracing event for a compiled statement.
///
/// ```ignore
/// rql_trace_compile!("org_invoices", "select", statement.sql(), statement.params().len());
/// ```
#[macro_export]
macro_rules! rql_trace_compile {
    ($resource:expr, $kind:expr, $sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            resource = %$resource,
            kind = $kind,
            sql = %$sql,
            params = $param_count,
            "rql.compile"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (&$resource, &$kind, &$sql, &$param_count);
    };
}

/// Emit a warn-level tracing event when a query is rejected.
///
/// ```ignore
/// rql_trace_reject!("org_users", &err);
/// ```
#[macro_export]
macro_rules! rql_trace_reject {
    ($resource:expr, $error:expr) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(resource = %$resource, error = %$error, "rql.reject");
        #[cfg(not(feature = "tracing"))]
        let _ = (&$resource, &$error);
    };
}
