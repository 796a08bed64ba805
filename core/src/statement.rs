use crate::{dialect::PlaceholderStyle, traits::SQLParam};
use core::fmt::Display;

/// A fully rendered, parameterized SQL statement.
///
/// Parameters are stored in the order their placeholders appear in `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<V: SQLParam> {
    sql: String,
    params: Vec<V>,
    style: PlaceholderStyle,
}

impl<V: SQLParam> Statement<V> {
    pub fn new(sql: String, params: Vec<V>, style: PlaceholderStyle) -> Self {
        Self { sql, params, style }
    }

    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[inline]
    pub fn params(&self) -> &[V] {
        &self.params
    }

    #[inline]
    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Number of placeholders present in the rendered text.
    pub fn placeholder_count(&self) -> usize {
        self.style.count_in(&self.sql)
    }

    pub fn into_parts(self) -> (String, Vec<V>) {
        (self.sql, self.params)
    }
}

impl<V: SQLParam> Display for Statement<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, r#"sql: "{}", params: {:?}"#, self.sql, self.params)
    }
}
