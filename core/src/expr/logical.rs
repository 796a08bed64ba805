//! Logical operators (AND, OR, NOT).

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};

use super::is_parenthesized;

fn join_group<'a, V, I, E>(conditions: I, separator: Token) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    I: IntoIterator<Item = E>,
    E: ToSQL<'a, V>,
{
    let mut iter = conditions
        .into_iter()
        .map(ToSQL::into_sql)
        .filter(|sql| !sql.is_empty());

    let Some(first) = iter.next() else {
        return SQL::empty();
    };
    let Some(second) = iter.next() else {
        return first;
    };
    let all_conditions = core::iter::once(first)
        .chain(core::iter::once(second))
        .chain(iter);
    SQL::join(all_conditions, separator).parens()
}

/// Logical AND of multiple conditions.
///
/// Empty conditions are skipped. A single remaining condition is returned
/// as-is; two or more are joined and wrapped: `(a AND b AND c)`.
pub fn and<'a, V, I, E>(conditions: I) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    I: IntoIterator<Item = E>,
    E: ToSQL<'a, V>,
{
    join_group(conditions, Token::AND)
}

/// Logical OR of multiple conditions, with the same grouping rules as [`and`].
pub fn or<'a, V, I, E>(conditions: I) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    I: IntoIterator<Item = E>,
    E: ToSQL<'a, V>,
{
    join_group(conditions, Token::OR)
}

/// Logical NOT.
pub fn not<'a, V, E>(expr: E) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
{
    let expr_sql = expr.into_sql();
    let needs_paren = expr_sql.chunks.len() > 1 && !is_parenthesized(&expr_sql);

    if needs_paren {
        SQL::token(Token::NOT).append(expr_sql.parens())
    } else {
        SQL::token(Token::NOT).append(expr_sql)
    }
}
