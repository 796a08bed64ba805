//! Statement assembly: the base source, its scoping predicate and the
//! optional derived-table wrapper that outer-layer predicates attach to.

use rql_core::{SQL, ToSQL, Token, expr};

use super::filter::LayeredPredicates;
use super::predicate::{Predicate, Sql, Term};
use crate::error::{CompileError, Result};
use crate::schema::{
    Aggregate, BaseSource, Condition, FieldDescriptor, Join, JoinKind, Layer, Membership, Operand,
    Projection, ResourceSchema, Scope, ScopeKey, TableRef,
};
use crate::value::Value;

/// Resolves schema references against the caller's scope.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Binder<'c> {
    pub schema: &'c ResourceSchema,
    pub scope: &'c Scope,
}

impl<'c> Binder<'c> {
    /// Fails when the scope lacks a key the base source needs.
    pub fn new(schema: &'c ResourceSchema, scope: &'c Scope) -> Result<Self> {
        let binder = Self { schema, scope };
        for key in schema.source().required_scopes() {
            binder.scope_value(key)?;
        }
        Ok(binder)
    }

    pub fn scope_value(&self, key: ScopeKey) -> Result<Value> {
        self.scope
            .get(key)
            .map(Value::from)
            .ok_or_else(|| CompileError::MissingScope {
                resource: self.schema.name().to_owned(),
                key,
            })
    }

    fn operand(&self, operand: &Operand) -> Result<Term> {
        Ok(match operand {
            Operand::Column(column) => Term::Column(*column),
            Operand::Scope(key) => Term::Param(self.scope_value(*key)?),
            Operand::Text(text) => Term::param(*text),
        })
    }

    pub fn condition(&self, condition: &Condition) -> Result<Predicate> {
        Ok(match condition {
            Condition::Compare { left, op, right } => {
                Predicate::compare(Term::Column(*left), *op, self.operand(right)?)
            }
            Condition::IsNull(column) => Predicate::is_null(Term::Column(*column)),
            Condition::Raw(sql) => Predicate::Raw(sql),
        })
    }

    pub fn conditions(&self, conditions: &[Condition]) -> Result<Vec<Predicate>> {
        conditions.iter().map(|c| self.condition(c)).collect()
    }

    /// How `field` is referenced from the given layer.
    pub fn field_term(&self, field: &FieldDescriptor, layer: Layer) -> Term {
        match (layer, field.column_ref()) {
            (Layer::Inner, Some(column)) => Term::Column(column),
            (Layer::Inner, None) => Term::Alias(field.output_name()),
            (Layer::Outer, _) => Term::Output {
                qualifier: self.schema.source().outer_alias(),
                name: field.output_name(),
            },
        }
    }
}

/// What the statement selects.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shape<'s> {
    /// The resource's output columns.
    Rows,
    /// `COUNT(*) AS "total"`
    Count,
    /// `COUNT(*) AS "count", key AS "values"` grouped by key.
    Group(&'s FieldDescriptor),
}

/// Whether the base query must be read through a derived table.
pub(crate) fn needs_wrap(
    source: &BaseSource,
    predicates: &LayeredPredicates,
    shape: Shape<'_>,
) -> bool {
    source.always_wrapped()
        || !predicates.outer.is_empty()
        || match shape {
            Shape::Rows => false,
            Shape::Count => source.is_composite(),
            Shape::Group(key) => source.is_composite() || key.column_ref().is_none(),
        }
}

/// `FROM table [JOIN ...]`
pub(crate) fn from_clause(binder: &Binder<'_>, from: &TableRef, joins: &[Join]) -> Result<Sql> {
    let mut sql = SQL::token(Token::FROM).append(from.to_sql());
    for join in joins {
        let kind = match join.kind {
            JoinKind::Inner => Token::INNER,
            JoinKind::Left => Token::LEFT,
        };
        sql = sql
            .push(kind)
            .push(Token::JOIN)
            .append(join.table.to_sql())
            .push(Token::ON)
            .append(Predicate::And(binder.conditions(join.on)?).into_sql());
    }
    Ok(sql)
}

fn projection(projection: &Projection) -> Sql {
    match *projection {
        Projection::Column { column, alias } => column.to_sql().alias(alias),
        Projection::Aggregate {
            func,
            column,
            alias,
        } => {
            let sql: Sql = match func {
                Aggregate::Min => SQL::func("MIN", column.to_sql()),
                Aggregate::CountDistinct => {
                    let distinct = SQL::token(Token::DISTINCT).append(column.to_sql());
                    SQL::func("COUNT", distinct)
                }
                Aggregate::ArrayAgg => SQL::func("array_agg", column.to_sql()),
                Aggregate::ArrayAggDistinct => expr::array_agg_distinct(column),
            };
            sql.alias(alias)
        }
        Projection::Raw { sql, alias } => SQL::raw(sql).alias(alias),
    }
}

fn base_projections(source: &BaseSource) -> Sql {
    let list = SQL::join(
        source.source().projections.iter().map(projection),
        Token::COMMA,
    );
    match *source {
        BaseSource::Windowed {
            partition_by,
            order_by,
            rank_alias,
            ..
        } => {
            let rank = expr::row_number_over(partition_by, order_by, expr::Direction::Desc);
            list.push(Token::COMMA).append(rank.alias(rank_alias))
        }
        _ => list,
    }
}

fn membership_subquery(binder: &Binder<'_>, membership: &Membership) -> Result<Sql> {
    let filter = Predicate::And(binder.conditions(membership.conditions)?);
    let mut sql = SQL::token(Token::SELECT)
        .append(membership.select.to_sql())
        .append(from_clause(binder, &membership.from, membership.joins)?);
    if !filter.is_empty() {
        sql = sql.push(Token::WHERE).append(filter.into_sql());
    }
    Ok(sql)
}

/// `SELECT projections FROM ... WHERE scope AND inner [GROUP BY ...]`
fn inner_query(
    binder: &Binder<'_>,
    projections: Sql,
    predicates: Vec<Predicate>,
    group_by: Sql,
) -> Result<Sql> {
    let base = binder.schema.source();
    let source = base.source();

    let mut filter = binder.conditions(source.scope)?;
    if let BaseSource::CorrelatedFilter {
        key, membership, ..
    } = base
    {
        filter.push(Predicate::InSubquery {
            term: Term::Column(*key),
            subquery: membership_subquery(binder, membership)?,
        });
    }
    filter.extend(predicates);
    let filter = Predicate::And(filter);

    let mut sql = SQL::token(Token::SELECT)
        .append(projections)
        .append(from_clause(binder, &source.from, source.joins)?);
    if !filter.is_empty() {
        sql = sql.push(Token::WHERE).append(filter.into_sql());
    }
    if !group_by.is_empty() {
        sql = sql.push(Token::GROUP).push(Token::BY).append(group_by);
    }
    Ok(sql)
}

fn source_group_by(source: &BaseSource) -> Sql {
    SQL::join(source.source().group_by.iter(), Token::COMMA)
}

fn group_projections(key: Sql) -> Sql {
    expr::count_all()
        .alias("count")
        .push(Token::COMMA)
        .append(key.alias("values"))
}

/// Builds the SELECT for `shape` without ORDER BY or pagination. Returns the
/// statement and whether the base query was wrapped.
pub(crate) fn select(
    binder: &Binder<'_>,
    predicates: LayeredPredicates,
    shape: Shape<'_>,
) -> Result<(Sql, bool)> {
    let source = binder.schema.source();

    if !needs_wrap(source, &predicates, shape) {
        let (projections, group_by) = match shape {
            Shape::Rows => (base_projections(source), source_group_by(source)),
            Shape::Count => (expr::count_all().alias("total"), SQL::empty()),
            Shape::Group(key) => {
                let term = binder.field_term(key, Layer::Inner);
                (group_projections(term.to_sql()), term.into_sql())
            }
        };
        let sql = inner_query(binder, projections, predicates.inner, group_by)?;
        return Ok((sql, false));
    }

    let alias = source.outer_alias();
    let inner = inner_query(
        binder,
        base_projections(source),
        predicates.inner,
        source_group_by(source),
    )?;

    let (projections, group_by) = match shape {
        Shape::Rows => {
            let columns = source.source().projections.iter();
            let outputs = columns.map(|p| SQL::qualified(alias, p.alias()));
            (SQL::join(outputs, Token::COMMA), SQL::empty())
        }
        Shape::Count => (expr::count_all().alias("total"), SQL::empty()),
        Shape::Group(key) => {
            let term = binder.field_term(key, Layer::Outer);
            (group_projections(term.to_sql()), term.into_sql())
        }
    };

    let mut filter = Vec::with_capacity(predicates.outer.len() + 1);
    if let BaseSource::Windowed { rank_alias, .. } = source {
        let rank = Term::Output {
            qualifier: alias,
            name: rank_alias,
        };
        filter.push(Predicate::eq(rank, Term::Number(1)));
    }
    filter.extend(predicates.outer);
    let filter = Predicate::And(filter);

    let mut sql = SQL::token(Token::SELECT)
        .append(projections)
        .push(Token::FROM)
        .append(inner.parens().alias(alias));
    if !filter.is_empty() {
        sql = sql.push(Token::WHERE).append(filter.into_sql());
    }
    if !group_by.is_empty() {
        sql = sql.push(Token::GROUP).push(Token::BY).append(group_by);
    }
    Ok((sql, true))
}
