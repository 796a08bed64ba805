//! Aggregate functions.

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};

/// `COUNT(*)`
pub fn count_all<'a, V: SQLParam + 'a>() -> SQL<'a, V> {
    SQL::func("COUNT", SQL::token(Token::STAR))
}

/// `array_agg(DISTINCT expr)`
pub fn array_agg_distinct<'a, V, E>(expr: E) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
{
    SQL::func(
        "array_agg",
        SQL::token(Token::DISTINCT).append(expr.into_sql()),
    )
}
