//! Set membership (IN, NOT IN).

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};

fn membership<'a, V, E, I, R>(expr: E, negated: bool, values: I) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    I: IntoIterator<Item = R>,
    R: ToSQL<'a, V>,
{
    let mut sql = expr.into_sql();
    let mut values_iter = values.into_iter();

    let Some(first_value) = values_iter.next() else {
        // Empty list: IN () is invalid SQL, render a constant instead
        let constant = if negated { "1=1" } else { "1=0" };
        return SQL::raw(constant).parens();
    };

    if negated {
        sql.push_mut(Token::NOT);
    }
    let first = first_value.into_sql();
    // A lone subquery already carries the list parentheses
    if first.is_subquery() {
        return sql.push(Token::IN).append(first.parens()).parens();
    }

    let mut list = first;
    for value in values_iter {
        list = list.push(Token::COMMA).append(value.into_sql());
    }
    sql.push(Token::IN).append(list.parens()).parens()
}

/// `(expr IN (v1, v2, ...))`
///
/// Passing a single `SELECT` fragment renders `(expr IN (SELECT ...))`.
pub fn in_list<'a, V, E, I, R>(expr: E, values: I) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    I: IntoIterator<Item = R>,
    R: ToSQL<'a, V>,
{
    membership(expr, false, values)
}

/// `(expr NOT IN (v1, v2, ...))`
pub fn not_in_list<'a, V, E, I, R>(expr: E, values: I) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    I: IntoIterator<Item = R>,
    R: ToSQL<'a, V>,
{
    membership(expr, true, values)
}
