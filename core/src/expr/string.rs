//! Text casts and pattern matching.

use crate::sql::{SQL, SQLChunk, Token};
use crate::traits::{SQLParam, ToSQL};

/// `CAST(expr AS TEXT)`
pub fn cast_text<'a, V, E>(expr: E) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
{
    SQL::func(
        "CAST",
        expr.into_sql()
            .push(Token::AS)
            .push(SQLChunk::raw_static("TEXT")),
    )
}

fn pattern<'a, V, E, P>(expr: E, negated: bool, operator: Token, pattern: P) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    P: ToSQL<'a, V>,
{
    let mut sql = expr.into_sql();
    if negated {
        sql.push_mut(Token::NOT);
    }
    sql.push(operator).append(pattern.into_sql()).parens()
}

/// Case-sensitive match: `(expr LIKE pattern)`
pub fn like<'a, V, E, P>(expr: E, pat: P) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    P: ToSQL<'a, V>,
{
    pattern(expr, false, Token::LIKE, pat)
}

/// `(expr NOT LIKE pattern)`
pub fn not_like<'a, V, E, P>(expr: E, pat: P) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    P: ToSQL<'a, V>,
{
    pattern(expr, true, Token::LIKE, pat)
}

/// Case-insensitive match: `(expr ILIKE pattern)`
pub fn ilike<'a, V, E, P>(expr: E, pat: P) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    P: ToSQL<'a, V>,
{
    pattern(expr, false, Token::ILIKE, pat)
}

/// `(expr NOT ILIKE pattern)`
pub fn not_ilike<'a, V, E, P>(expr: E, pat: P) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
    P: ToSQL<'a, V>,
{
    pattern(expr, true, Token::ILIKE, pat)
}
