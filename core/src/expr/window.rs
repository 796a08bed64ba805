//! Window functions.

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};

/// Sort direction inside a window or ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub const fn token(self) -> Token {
        match self {
            Direction::Asc => Token::ASC,
            Direction::Desc => Token::DESC,
        }
    }
}

/// `expr ASC` / `expr DESC`
pub fn ordered<'a, V, E>(expr: E, direction: Direction) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: ToSQL<'a, V>,
{
    expr.into_sql().push(direction.token())
}

/// `ROW_NUMBER() OVER (PARTITION BY partition ORDER BY order direction)`
pub fn row_number_over<'a, V, P, O>(partition: P, order: O, direction: Direction) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    P: ToSQL<'a, V>,
    O: ToSQL<'a, V>,
{
    let spec = SQL::token(Token::PARTITION)
        .push(Token::BY)
        .append(partition.into_sql())
        .push(Token::ORDER)
        .push(Token::BY)
        .append(ordered(order, direction));
    SQL::func("ROW_NUMBER", SQL::empty())
        .push(Token::OVER)
        .append(spec.parens())
}
