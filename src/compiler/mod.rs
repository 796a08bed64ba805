//! Compiles a [`ResourceQuery`] into a parameterized [`Statement`].

mod assemble;
mod filter;
mod group;
mod predicate;
mod search;
mod sort;

pub use predicate::{Predicate, Term};

use rql_core::expr::{self, Direction};
use rql_core::{SQL, Statement, Token, rql_trace_compile, rql_trace_reject};

use self::assemble::{Binder, Shape};
use self::filter::LayeredPredicates;
use self::predicate::Sql;
use crate::config::CompilerConfig;
use crate::error::{CompileError, Result};
use crate::query::ResourceQuery;
use crate::schema::{Layer, Registry, ResourceSchema, Scope};
use crate::value::Value;

/// Turns resource queries into statements against a [`Registry`].
///
/// Stateless apart from its configuration; one instance can serve any number
/// of threads.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r Registry,
    config: CompilerConfig,
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Self::new(Registry::builtin(), CompilerConfig::default())
    }
}

impl<'r> Compiler<'r> {
    pub const fn new(registry: &'r Registry, config: CompilerConfig) -> Self {
        Self { registry, config }
    }

    #[inline]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    #[inline]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The list statement: filters, search, sort and pagination.
    pub fn compile(
        &self,
        resource: impl AsRef<str>,
        query: &ResourceQuery,
        scope: &Scope,
    ) -> Result<Statement<Value>> {
        let resource = resource.as_ref();
        let result = self
            .registry
            .schema(resource)
            .and_then(|schema| self.rows(schema, query, scope));
        self.finish(resource, "select", result)
    }

    /// `COUNT(*)` per value of the query's single group-by key, ordered by
    /// the key. Sort and pagination are ignored.
    pub fn compile_group(
        &self,
        resource: impl AsRef<str>,
        query: &ResourceQuery,
        scope: &Scope,
    ) -> Result<Statement<Value>> {
        let resource = resource.as_ref();
        let result = self.registry.schema(resource).and_then(|schema| {
            let (binder, predicates) = prepare(schema, query, scope)?;
            let key = group::group_key(schema, &query.group_by)?;
            let key = key.ok_or(CompileError::EmptyGroupBy)?;
            let (sql, wrapped) = assemble::select(&binder, predicates, Shape::Group(key))?;
            let layer = if wrapped { Layer::Outer } else { Layer::Inner };
            let order = expr::ordered(binder.field_term(key, layer), Direction::Asc);
            Ok(sql.push(Token::ORDER).push(Token::BY).append(order))
        });
        self.finish(resource, "group", result)
    }

    /// Total number of rows matching the query's filters and search.
    pub fn compile_count(
        &self,
        resource: impl AsRef<str>,
        query: &ResourceQuery,
        scope: &Scope,
    ) -> Result<Statement<Value>> {
        let resource = resource.as_ref();
        let result = self.registry.schema(resource).and_then(|schema| {
            let (binder, predicates) = prepare(schema, query, scope)?;
            let (sql, _) = assemble::select(&binder, predicates, Shape::Count)?;
            Ok(sql)
        });
        self.finish(resource, "count", result)
    }

    fn rows(&self, schema: &ResourceSchema, query: &ResourceQuery, scope: &Scope) -> Result<Sql> {
        let (binder, predicates) = prepare(schema, query, scope)?;
        let group_key = group::group_key(schema, &query.group_by)?;
        let (mut sql, wrapped) = assemble::select(&binder, predicates, Shape::Rows)?;

        let physical = !wrapped && !schema.source().is_composite();
        let order = sort::compile_sort(schema, &query.sort, group_key, physical)?;
        if !order.is_empty() {
            sql = sql
                .push(Token::ORDER)
                .push(Token::BY)
                .append(SQL::join(order, Token::COMMA));
        }

        if schema.is_fixed() {
            return Ok(sql);
        }
        let limit = self.config.effective_limit(query.limit);
        if limit > 0 {
            let limit = SQL::param(Value::from(limit));
            sql = sql.push(Token::LIMIT).append(limit);
        }
        if query.offset > 0 {
            sql = sql
                .push(Token::OFFSET)
                .append(SQL::param(Value::from(query.offset)));
        }
        Ok(sql)
    }

    fn finish(
        &self,
        resource: &str,
        kind: &'static str,
        result: Result<Sql>,
    ) -> Result<Statement<Value>> {
        match result {
            Ok(sql) => {
                let statement = sql.into_statement(self.config.placeholder_style);
                rql_trace_compile!(resource, kind, statement.sql(), statement.params().len());
                Ok(statement)
            }
            Err(err) => {
                rql_trace_reject!(resource, &err);
                Err(err)
            }
        }
    }
}

/// Validates scope, filters and search, returning the layered predicates.
fn prepare<'c>(
    schema: &'c ResourceSchema,
    query: &ResourceQuery,
    scope: &'c Scope,
) -> Result<(Binder<'c>, LayeredPredicates)> {
    if schema.is_fixed() {
        reject_options(schema, query)?;
    }
    let binder = Binder::new(schema, scope)?;
    let mut predicates = filter::compile_filters(&binder, &query.filters)?;
    if let Some((layer, predicate)) = search::compile_search(&binder, &query.search) {
        predicates.push(layer, predicate);
    }
    Ok((binder, predicates))
}

/// A fixed resource accepts none of the query's options.
fn reject_options(schema: &ResourceSchema, query: &ResourceQuery) -> Result<()> {
    let option = if !query.filters.is_empty() {
        "filters"
    } else if !query.search.is_empty() {
        "search"
    } else if !query.sort.is_empty() {
        "sort"
    } else if !query.group_by.is_empty() {
        "group by"
    } else if query.limit != 0 {
        "limit"
    } else if query.offset != 0 {
        "offset"
    } else {
        return Ok(());
    };
    Err(CompileError::UnsupportedOption {
        resource: schema.name().to_owned(),
        option,
    })
}
