//! Placeholder rendering.

use core::fmt::Write;
use std::borrow::Cow;

/// How bound parameters appear in rendered SQL text.
///
/// # Examples
/// - `Numbered`: `$1`, `$2`, `$3` (PostgreSQL wire protocol)
/// - `Positional`: `?` (database/sql style drivers, SQLite, MySQL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaceholderStyle {
    /// `$1, $2, ...`
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "postgres", alias = "dollar"))]
    Numbered,
    /// `?`
    #[cfg_attr(feature = "serde", serde(alias = "question"))]
    Positional,
}

impl PlaceholderStyle {
    /// Renders a placeholder for the given 1-based index.
    ///
    /// Returns `Cow::Borrowed("?")` for positional placeholders (zero allocation).
    #[inline]
    pub fn render(&self, index: usize) -> Cow<'static, str> {
        match self {
            PlaceholderStyle::Numbered => Cow::Owned(format!("${}", index)),
            PlaceholderStyle::Positional => Cow::Borrowed("?"),
        }
    }

    /// Counts the placeholders of this style that appear in `sql`.
    pub fn count_in(&self, sql: &str) -> usize {
        match self {
            PlaceholderStyle::Positional => sql.matches('?').count(),
            PlaceholderStyle::Numbered => {
                let bytes = sql.as_bytes();
                bytes
                    .iter()
                    .enumerate()
                    .filter(|(i, b)| {
                        **b == b'$' && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit())
                    })
                    .count()
            }
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            PlaceholderStyle::Numbered => "numbered",
            PlaceholderStyle::Positional => "positional",
        }
    }
}

/// Writes a placeholder straight into `buf` without an intermediate allocation.
#[inline]
pub(crate) fn write_placeholder(style: PlaceholderStyle, index: usize, buf: &mut impl Write) {
    match style {
        PlaceholderStyle::Numbered => {
            let _ = write!(buf, "${}", index);
        }
        PlaceholderStyle::Positional => {
            let _ = buf.write_char('?');
        }
    }
}

impl core::fmt::Display for PlaceholderStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
