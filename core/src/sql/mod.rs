mod chunk;
mod tokens;

use std::borrow::Cow;

use crate::{
    dialect::{PlaceholderStyle, write_placeholder},
    param::Param,
    statement::Statement,
    traits::{SQLParam, ToSQL},
};
pub use chunk::*;
use core::fmt::Display;
use smallvec::SmallVec;
pub use tokens::*;

/// SQL fragment builder with flat chunk storage.
///
/// Uses `SmallVec<[SQLChunk; 8]>` for inline storage of typical SQL fragments
/// without heap allocation.
#[derive(Debug, Clone)]
pub struct SQL<'a, V: SQLParam> {
    pub chunks: SmallVec<[SQLChunk<'a, V>; 8]>,
}

impl<'a, V: SQLParam> SQL<'a, V> {
    // ==================== constructors ====================

    /// Creates an empty SQL fragment
    #[inline]
    pub const fn empty() -> Self {
        Self {
            chunks: SmallVec::new_const(),
        }
    }

    /// Creates SQL with a single token
    #[inline]
    pub fn token(t: Token) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Token(t)],
        }
    }

    /// Creates SQL with a quoted identifier
    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Ident(name.into())],
        }
    }

    /// Creates SQL with a qualified identifier: "qualifier"."name"
    #[inline]
    pub fn qualified(qualifier: impl Into<Cow<'a, str>>, name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Qualified {
                qualifier: qualifier.into(),
                name: name.into(),
            }],
        }
    }

    /// Creates SQL with raw text (unquoted)
    #[inline]
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Raw(text.into())],
        }
    }

    /// Creates SQL with a single unsigned integer literal.
    #[inline]
    pub fn number(value: u64) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Number(value)],
        }
    }

    /// Creates SQL with a single parameter value
    #[inline]
    pub fn param(value: impl Into<Cow<'a, V>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Param(Param::new(value.into()))],
        }
    }

    /// Creates SQL for a function call: NAME(args)
    /// Subqueries are automatically wrapped in parentheses: NAME((SELECT ...))
    #[inline]
    pub fn func(name: &'static str, args: SQL<'a, V>) -> Self {
        let args = if args.is_subquery() {
            args.parens()
        } else {
            args
        };
        SQL::raw(name)
            .push(Token::LPAREN)
            .append(args)
            .push(Token::RPAREN)
    }

    // ==================== builder methods ====================

    /// Append another SQL fragment (flat extend)
    #[inline]
    pub fn append(mut self, other: impl Into<SQL<'a, V>>) -> Self {
        let other = other.into();

        if self.chunks.is_empty() {
            return other;
        }
        if other.chunks.is_empty() {
            return self;
        }

        self.chunks.extend(other.chunks);
        self
    }

    /// Push a single chunk
    #[inline]
    pub fn push(mut self, chunk: impl Into<SQLChunk<'a, V>>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    #[inline]
    pub fn push_mut(&mut self, chunk: impl Into<SQLChunk<'a, V>>) {
        self.chunks.push(chunk.into());
    }

    // ==================== combinators ====================

    /// Joins multiple SQL fragments with a separator
    pub fn join<T>(sqls: T, separator: Token) -> SQL<'a, V>
    where
        T: IntoIterator,
        T::Item: ToSQL<'a, V>,
    {
        let mut iter = sqls.into_iter();
        let Some(first) = iter.next() else {
            return SQL::empty();
        };

        let mut result = first.into_sql();
        let (lower, upper) = iter.size_hint();
        if let Some(upper) = upper {
            result.chunks.reserve(upper.saturating_mul(2));
        } else if lower > 0 {
            result.chunks.reserve(lower * 2);
        }

        for item in iter {
            result.chunks.push(SQLChunk::Token(separator));
            let other = item.into_sql();
            if !other.chunks.is_empty() {
                result.chunks.extend(other.chunks);
            }
        }
        result
    }

    /// Wrap in parentheses: (self)
    #[inline]
    pub fn parens(self) -> Self {
        SQL::token(Token::LPAREN).append(self).push(Token::RPAREN)
    }

    /// Check if this SQL fragment is a subquery (starts with SELECT)
    #[inline]
    pub fn is_subquery(&self) -> bool {
        matches!(self.chunks.first(), Some(SQLChunk::Token(Token::SELECT)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Creates an aliased version: self AS "name"
    pub fn alias(self, name: impl Into<Cow<'a, str>>) -> SQL<'a, V> {
        self.push(Token::AS).push(SQLChunk::Ident(name.into()))
    }

    // ==================== output methods ====================

    /// Returns the SQL string with placeholders in the given style.
    pub fn sql(&self, style: PlaceholderStyle) -> String {
        let sql_cap = self.chunks.len().saturating_mul(8).max(128);
        let mut buf = String::with_capacity(sql_cap);
        self.write_to(&mut buf, style);
        buf
    }

    /// Renders into an owned [`Statement`], consuming the fragment.
    pub fn into_statement(self, style: PlaceholderStyle) -> Statement<V> {
        let sql = self.sql(style);
        let params = self
            .chunks
            .into_iter()
            .filter_map(|chunk| match chunk {
                SQLChunk::Param(param) => Some(param.into_value()),
                _ => None,
            })
            .collect();
        Statement::new(sql, params, style)
    }

    /// Write SQL to a buffer with placeholders in the given style.
    fn write_to(&self, buf: &mut impl core::fmt::Write, style: PlaceholderStyle) {
        let mut param_index = 1usize;
        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                SQLChunk::Param(_) => {
                    write_placeholder(style, param_index, buf);
                    param_index += 1;
                }
                _ => chunk.write(buf),
            }

            if self.needs_space(i) {
                let _ = buf.write_char(' ');
            }
        }
    }

    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks.get(index + 1) else {
            return false;
        };

        let current = &self.chunks[index];
        chunk_needs_space(current, next)
    }

    /// Returns an iterator over references to parameter values
    /// (avoids allocating a Vec - callers can collect if needed)
    pub fn params(&self) -> impl Iterator<Item = &V> {
        self.chunks.iter().filter_map(|chunk| {
            if let SQLChunk::Param(param) = chunk {
                Some(param.value.as_ref())
            } else {
                None
            }
        })
    }
}

/// Canonical spacing logic for SQL chunk rendering.
pub(crate) fn chunk_needs_space<V: SQLParam>(
    current: &SQLChunk<'_, V>,
    next: &SQLChunk<'_, V>,
) -> bool {
    // No space if current raw text ends with space
    if let SQLChunk::Raw(text) = current
        && text.ends_with(' ')
    {
        return false;
    }

    // No space if next raw text starts with space
    if let SQLChunk::Raw(text) = next
        && text.starts_with(' ')
    {
        return false;
    }

    match (current, next) {
        // No space before closing/separator punctuation
        (_, SQLChunk::Token(Token::RPAREN | Token::COMMA | Token::SEMI | Token::DOT)) => false,
        // No space after opening punctuation
        (SQLChunk::Token(Token::LPAREN | Token::DOT), _) => false,
        // Space after comma
        (SQLChunk::Token(Token::COMMA), _) => true,
        // Space after closing paren if next is word-like (e.g., ") FROM")
        (SQLChunk::Token(Token::RPAREN), next) => next.is_word_like(),
        // Function names hug their argument list (e.g., "COUNT(")
        (SQLChunk::Raw(_), SQLChunk::Token(Token::LPAREN)) => false,
        // Space before opening paren if preceded by word-like (e.g., "IN (")
        (current, SQLChunk::Token(Token::LPAREN)) => current.is_word_like(),
        // Space around comparison operators
        (SQLChunk::Token(t), _) if t.is_operator() => true,
        (_, SQLChunk::Token(t)) if t.is_operator() => true,
        // Space between all word-like chunks
        _ => current.is_word_like() && next.is_word_like(),
    }
}

// ==================== trait implementations ====================

impl<'a, V: SQLParam> Default for SQL<'a, V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, V: SQLParam> From<Token> for SQL<'a, V> {
    fn from(value: Token) -> Self {
        SQL::token(value)
    }
}

impl<'a, V: SQLParam> Display for SQL<'a, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let params: Vec<_> = self.params().collect();
        write!(
            f,
            r#"sql: "{}", params: {:?}"#,
            self.sql(PlaceholderStyle::default()),
            params
        )
    }
}

impl<'a, V: SQLParam + 'a> ToSQL<'a, V> for SQL<'a, V> {
    fn to_sql(&self) -> SQL<'a, V> {
        self.clone()
    }

    fn into_sql(self) -> SQL<'a, V> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestValue(i64);

    impl SQLParam for TestValue {}

    impl<'a> From<TestValue> for Cow<'a, TestValue> {
        fn from(value: TestValue) -> Self {
            Cow::Owned(value)
        }
    }

    type Sql = SQL<'static, TestValue>;

    #[test]
    fn comparison_renders_with_operator_spacing() {
        let sql = Sql::qualified("users", "age")
            .push(Token::GE)
            .append(Sql::param(TestValue(18)))
            .parens();
        assert_eq!(
            sql.sql(PlaceholderStyle::Numbered),
            r#"("users"."age" >= $1)"#
        );
        assert_eq!(
            sql.sql(PlaceholderStyle::Positional),
            r#"("users"."age" >= ?)"#
        );
    }

    #[test]
    fn function_call_hugs_parens() {
        let sql = Sql::func("COUNT", Sql::token(Token::STAR)).alias("count");
        assert_eq!(
            sql.sql(PlaceholderStyle::Numbered),
            r#"COUNT(*) AS "count""#
        );
    }

    #[test]
    fn numbers_are_inlined_not_bound() {
        let sql = Sql::ident("rank").push(Token::EQ).append(Sql::number(1));
        let statement = sql.into_statement(PlaceholderStyle::Numbered);
        assert_eq!(statement.sql(), r#""rank" = 1"#);
        assert!(statement.params().is_empty());
    }

    #[test]
    fn join_inserts_separator_tokens() {
        let parts = vec![
            Sql::ident("a")
                .push(Token::EQ)
                .append(Sql::param(TestValue(1)))
                .parens(),
            Sql::ident("b").push(Token::IS).push(Token::NULL).parens(),
        ];
        let sql = Sql::join(parts, Token::AND).parens();
        assert_eq!(
            sql.sql(PlaceholderStyle::Numbered),
            r#"(("a" = $1) AND ("b" IS NULL))"#
        );
    }

    #[test]
    fn into_statement_keeps_params_in_textual_order() {
        let sql = Sql::token(Token::SELECT)
            .push(Token::STAR)
            .push(Token::FROM)
            .append(Sql::ident("t"))
            .push(Token::LIMIT)
            .append(Sql::param(TestValue(10)))
            .push(Token::OFFSET)
            .append(Sql::param(TestValue(20)));
        let statement = sql.into_statement(PlaceholderStyle::Numbered);
        assert_eq!(statement.sql(), r#"SELECT * FROM "t" LIMIT $1 OFFSET $2"#);
        assert_eq!(statement.params(), &[TestValue(10), TestValue(20)]);
    }
}
