//! Comparison predicates.
//!
//! Each comparison renders as a parenthesized leaf: `("t"."c" = $1)`.

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};

// =============================================================================
// Internal Helper
// =============================================================================

fn binary_op<'a, V, L, R>(left: L, operator: Token, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    let right_sql = right.into_sql();
    // Wrap subqueries (starting with SELECT) in parentheses
    let right_sql = if right_sql.is_subquery() {
        right_sql.parens()
    } else {
        right_sql
    };
    left.into_sql().push(operator).append(right_sql).parens()
}

/// Comparison with an operator chosen at runtime.
pub fn compare<'a, V, L, R>(left: L, operator: Token, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, operator, right)
}

/// Equality comparison (`=`).
pub fn eq<'a, V, L, R>(left: L, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, Token::EQ, right)
}

/// Inequality comparison (`!=`).
pub fn neq<'a, V, L, R>(left: L, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, Token::NE, right)
}

/// Greater-than comparison (`>`).
pub fn gt<'a, V, L, R>(left: L, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, Token::GT, right)
}

/// Greater-than-or-equal comparison (`>=`).
pub fn gte<'a, V, L, R>(left: L, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, Token::GE, right)
}

/// Less-than comparison (`<`).
pub fn lt<'a, V, L, R>(left: L, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, Token::LT, right)
}

/// Less-than-or-equal comparison (`<=`).
pub fn lte<'a, V, L, R>(left: L, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    binary_op(left, Token::LE, right)
}
