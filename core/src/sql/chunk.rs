use std::borrow::Cow;

use crate::{Param, SQLParam, sql::tokens::Token};

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("table_name", "column_name")
/// - `Qualified` - Qualified identifiers ("table"."column")
/// - `Raw` - Unquoted raw SQL text (function names, literals)
/// - `Number` - Inline unsigned integer literal
/// - `Param` - Positional parameter placeholders with values
#[derive(Clone)]
pub enum SQLChunk<'a, V: SQLParam> {
    /// SQL keywords and operators: SELECT, FROM, WHERE, =, AND, etc.
    /// Renders as: keyword with automatic spacing rules
    Token(Token),

    /// Quoted identifier
    /// Renders as: "name" (with quotes)
    Ident(Cow<'a, str>),

    /// Quoted identifier with a qualifier
    /// Renders as: "qualifier"."name"
    Qualified {
        qualifier: Cow<'a, str>,
        name: Cow<'a, str>,
    },

    /// Raw SQL text (unquoted) for function names and literals
    /// Renders as: text (no quotes, as-is)
    Raw(Cow<'a, str>),

    /// Inline integer literal, never bound
    Number(u64),

    /// Parameter with value
    /// Renders as: ? or $n depending on placeholder style
    Param(Param<'a, V>),
}

impl<'a, V: SQLParam> SQLChunk<'a, V> {
    /// Creates a token chunk - const
    #[inline]
    pub const fn token(t: Token) -> Self {
        Self::Token(t)
    }

    /// Creates a quoted identifier from a static string - const
    #[inline]
    pub const fn ident_static(name: &'static str) -> Self {
        Self::Ident(Cow::Borrowed(name))
    }

    /// Creates raw SQL text from a static string - const
    #[inline]
    pub const fn raw_static(text: &'static str) -> Self {
        Self::Raw(Cow::Borrowed(text))
    }

    /// Creates a quoted identifier from a runtime string
    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self::Ident(name.into())
    }

    /// Creates raw SQL text from a runtime string
    #[inline]
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Raw(text.into())
    }

    /// Creates a parameter chunk with owned value
    #[inline]
    pub fn param(value: impl Into<Cow<'a, V>>) -> Self {
        Self::Param(Param::new(value.into()))
    }

    /// Write chunk content to buffer. Params are rendered by the caller,
    /// which owns the running placeholder index.
    pub(crate) fn write(&self, buf: &mut impl core::fmt::Write) {
        match self {
            SQLChunk::Token(token) => {
                let _ = buf.write_str(token.as_str());
            }
            SQLChunk::Ident(name) => {
                let _ = buf.write_char('"');
                let _ = buf.write_str(name);
                let _ = buf.write_char('"');
            }
            SQLChunk::Qualified { qualifier, name } => {
                let _ = buf.write_char('"');
                let _ = buf.write_str(qualifier);
                let _ = buf.write_str("\".\"");
                let _ = buf.write_str(name);
                let _ = buf.write_char('"');
            }
            SQLChunk::Raw(text) => {
                let _ = buf.write_str(text);
            }
            SQLChunk::Number(n) => {
                let _ = write!(buf, "{}", n);
            }
            SQLChunk::Param(_) => {
                let _ = buf.write_char('?');
            }
        }
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !t.is_punctuation() && !t.is_operator(),
            SQLChunk::Ident(_)
            | SQLChunk::Qualified { .. }
            | SQLChunk::Raw(_)
            | SQLChunk::Number(_)
            | SQLChunk::Param(_) => true,
        }
    }
}

impl<'a, V: SQLParam> core::fmt::Debug for SQLChunk<'a, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SQLChunk::Token(token) => f.debug_tuple("Token").field(token).finish(),
            SQLChunk::Ident(name) => f.debug_tuple("Ident").field(name).finish(),
            SQLChunk::Qualified { qualifier, name } => f
                .debug_tuple("Qualified")
                .field(&format!("{}.{}", qualifier, name))
                .finish(),
            SQLChunk::Raw(text) => f.debug_tuple("Raw").field(text).finish(),
            SQLChunk::Number(n) => f.debug_tuple("Number").field(n).finish(),
            SQLChunk::Param(param) => f.debug_tuple("Param").field(param).finish(),
        }
    }
}

impl<'a, V: SQLParam> From<Token> for SQLChunk<'a, V> {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl<'a, V: SQLParam> From<Param<'a, V>> for SQLChunk<'a, V> {
    #[inline]
    fn from(value: Param<'a, V>) -> Self {
        Self::Param(value)
    }
}
