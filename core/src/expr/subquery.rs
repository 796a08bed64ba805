//! Subquery predicates (EXISTS, NOT EXISTS).

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};

/// `EXISTS (subquery)`
pub fn exists<'a, V, S>(subquery: S) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    S: ToSQL<'a, V>,
{
    SQL::token(Token::EXISTS).append(subquery.into_sql().parens())
}

/// `NOT EXISTS (subquery)`
pub fn not_exists<'a, V, S>(subquery: S) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    S: ToSQL<'a, V>,
{
    SQL::token(Token::NOT).append(exists(subquery))
}
