//! Table expressions a resource is read from.

use rql_core::{SQL, ToSQL, Token};

use crate::schema::ScopeKey;
use crate::value::Value;

/// A table in a FROM or JOIN clause, optionally aliased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub name: &'static str,
    pub alias: Option<&'static str>,
}

impl TableRef {
    pub const fn new(name: &'static str) -> Self {
        Self { name, alias: None }
    }

    pub const fn aliased(name: &'static str, alias: &'static str) -> Self {
        Self {
            name,
            alias: Some(alias),
        }
    }

    /// Name columns of this table are qualified with.
    pub const fn qualifier(&self) -> &'static str {
        match self.alias {
            Some(alias) => alias,
            None => self.name,
        }
    }

    pub const fn col(&self, name: &'static str) -> ColumnRef {
        ColumnRef::new(self.qualifier(), name)
    }
}

impl<'a> ToSQL<'a, Value> for TableRef {
    fn to_sql(&self) -> SQL<'a, Value> {
        let sql = SQL::ident(self.name);
        match self.alias {
            Some(alias) => sql.alias(alias),
            None => sql,
        }
    }
}

/// A qualified column: `"table"."column"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: &'static str,
    pub name: &'static str,
}

impl ColumnRef {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self { table, name }
    }
}

impl<'a> ToSQL<'a, Value> for ColumnRef {
    fn to_sql(&self) -> SQL<'a, Value> {
        SQL::qualified(self.table, self.name)
    }
}

/// Comparison operators usable in static conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CmpOp {
    pub const fn token(self) -> Token {
        match self {
            Self::Eq => Token::EQ,
            Self::Neq => Token::NE,
            Self::Gt => Token::GT,
            Self::Gte => Token::GE,
            Self::Lt => Token::LT,
            Self::Lte => Token::LE,
        }
    }
}

/// Right-hand side of a static condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    Column(ColumnRef),
    /// Bound from the caller's [`crate::Scope`].
    Scope(ScopeKey),
    /// Constant text, bound as a parameter.
    Text(&'static str),
}

/// A fixed predicate in a join, scope or membership clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Compare {
        left: ColumnRef,
        op: CmpOp,
        right: Operand,
    },
    IsNull(ColumnRef),
    /// Verbatim SQL without parameters.
    Raw(&'static str),
}

impl Condition {
    pub const fn eq(left: ColumnRef, right: Operand) -> Self {
        Self::Compare {
            left,
            op: CmpOp::Eq,
            right,
        }
    }

    pub const fn neq(left: ColumnRef, right: Operand) -> Self {
        Self::Compare {
            left,
            op: CmpOp::Neq,
            right,
        }
    }

    pub const fn columns(left: ColumnRef, right: ColumnRef) -> Self {
        Self::eq(left, Operand::Column(right))
    }

    pub const fn scope(left: ColumnRef, key: ScopeKey) -> Self {
        Self::eq(left, Operand::Scope(key))
    }

    pub const fn text(left: ColumnRef, value: &'static str) -> Self {
        Self::eq(left, Operand::Text(value))
    }

    pub const fn scope_key(&self) -> Option<ScopeKey> {
        match self {
            Self::Compare {
                right: Operand::Scope(key),
                ..
            } => Some(*key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
}

/// `INNER|LEFT JOIN table ON (conditions...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    pub on: &'static [Condition],
}

impl Join {
    pub const fn inner(table: TableRef, on: &'static [Condition]) -> Self {
        Self {
            kind: JoinKind::Inner,
            table,
            on,
        }
    }

    pub const fn left(table: TableRef, on: &'static [Condition]) -> Self {
        Self {
            kind: JoinKind::Left,
            table,
            on,
        }
    }
}

/// Aggregate functions over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Min,
    CountDistinct,
    ArrayAgg,
    ArrayAggDistinct,
}

/// One output column of a base query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    Column {
        column: ColumnRef,
        alias: &'static str,
    },
    Aggregate {
        func: Aggregate,
        column: ColumnRef,
        alias: &'static str,
    },
    /// Verbatim expression without parameters.
    Raw {
        sql: &'static str,
        alias: &'static str,
    },
}

impl Projection {
    pub const fn column(column: ColumnRef, alias: &'static str) -> Self {
        Self::Column { column, alias }
    }

    pub const fn aggregate(func: Aggregate, column: ColumnRef, alias: &'static str) -> Self {
        Self::Aggregate {
            func,
            column,
            alias,
        }
    }

    pub const fn raw(sql: &'static str, alias: &'static str) -> Self {
        Self::Raw { sql, alias }
    }

    /// Output column name.
    pub const fn alias(&self) -> &'static str {
        match self {
            Self::Column { alias, .. }
            | Self::Aggregate { alias, .. }
            | Self::Raw { alias, .. } => alias,
        }
    }
}

/// A static join chain with a fixed scoping predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinedSource {
    pub from: TableRef,
    pub joins: &'static [Join],
    pub projections: &'static [Projection],
    /// ANDed ahead of every filter.
    pub scope: &'static [Condition],
    /// Non-empty when the base query aggregates rows.
    pub group_by: &'static [ColumnRef],
}

impl JoinedSource {
    pub const fn new(from: TableRef, projections: &'static [Projection]) -> Self {
        Self {
            from,
            joins: &[],
            projections,
            scope: &[],
            group_by: &[],
        }
    }

    pub const fn joins(mut self, joins: &'static [Join]) -> Self {
        self.joins = joins;
        self
    }

    pub const fn scope(mut self, scope: &'static [Condition]) -> Self {
        self.scope = scope;
        self
    }

    pub const fn group_by(mut self, columns: &'static [ColumnRef]) -> Self {
        self.group_by = columns;
        self
    }

    #[inline]
    pub const fn is_aggregated(&self) -> bool {
        !self.group_by.is_empty()
    }

    fn conditions(&self) -> impl Iterator<Item = &'static Condition> {
        let joins: &'static [Join] = self.joins;
        let scope: &'static [Condition] = self.scope;
        let on = joins.iter().flat_map(|join| join.on.iter());
        on.chain(scope.iter())
    }
}

/// `SELECT select FROM from JOIN ... WHERE conditions`, used as an
/// `IN (...)` membership list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Membership {
    pub from: TableRef,
    pub joins: &'static [Join],
    pub select: ColumnRef,
    pub conditions: &'static [Condition],
}

/// The table expression a resource reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseSource {
    /// A join chain, optionally aggregated.
    Joined(JoinedSource),
    /// The latest row per partition: the join chain is ranked with
    /// `ROW_NUMBER() OVER (PARTITION BY partition_by ORDER BY order_by DESC)`
    /// and the outer query keeps rank 1.
    Windowed {
        source: JoinedSource,
        partition_by: ColumnRef,
        order_by: ColumnRef,
        rank_alias: &'static str,
        alias: &'static str,
    },
    /// Parent rows whose `key` is in a membership subquery.
    CorrelatedFilter {
        source: JoinedSource,
        key: ColumnRef,
        membership: Membership,
    },
}

/// Alias of the derived table that wraps a base query.
pub const BASE_ALIAS: &str = "base";

impl BaseSource {
    pub const fn source(&self) -> &JoinedSource {
        match self {
            Self::Joined(source)
            | Self::Windowed { source, .. }
            | Self::CorrelatedFilter { source, .. } => source,
        }
    }

    /// Qualifier for outer-layer columns.
    pub const fn outer_alias(&self) -> &'static str {
        match self {
            Self::Windowed { alias, .. } => alias,
            _ => BASE_ALIAS,
        }
    }

    /// Windowed sources are always read through their derived table.
    pub const fn always_wrapped(&self) -> bool {
        matches!(self, Self::Windowed { .. })
    }

    /// True for aggregated, windowed and membership sources, which are
    /// grouped and counted through a derived table.
    pub const fn is_composite(&self) -> bool {
        match self {
            Self::Joined(source) => source.is_aggregated(),
            Self::Windowed { .. } | Self::CorrelatedFilter { .. } => true,
        }
    }

    /// Scope keys referenced by the source's fixed conditions, deduplicated
    /// in first-use order.
    pub fn required_scopes(&self) -> Vec<ScopeKey> {
        let membership: &[Condition] = match self {
            Self::CorrelatedFilter { membership, .. } => {
                let joins: &'static [Join] = membership.joins;
                return dedup(
                    self.source()
                        .conditions()
                        .chain(joins.iter().flat_map(|join| join.on.iter()))
                        .chain(membership.conditions.iter())
                        .filter_map(Condition::scope_key),
                );
            }
            _ => &[],
        };
        dedup(
            self.source()
                .conditions()
                .chain(membership.iter())
                .filter_map(Condition::scope_key),
        )
    }
}

fn dedup(keys: impl Iterator<Item = ScopeKey>) -> Vec<ScopeKey> {
    let mut out: Vec<ScopeKey> = Vec::with_capacity(3);
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}
