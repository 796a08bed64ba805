use std::borrow::Cow;

use crate::traits::SQLParam;

/// A positional SQL parameter.
///
/// Placeholders are assigned at render time from the parameter's position in
/// the chunk list, so a `Param` only carries its value.
#[derive(Debug, Clone)]
pub struct Param<'a, V: SQLParam> {
    /// The value to bind
    pub value: Cow<'a, V>,
}

impl<'a, V: SQLParam> Param<'a, V> {
    pub fn new(value: Cow<'a, V>) -> Self {
        Self { value }
    }

    /// Creates a parameter owning its value
    pub const fn owned(value: V) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }

    /// Creates a parameter borrowing its value
    pub const fn borrowed(value: &'a V) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }

    pub fn into_value(self) -> V {
        self.value.into_owned()
    }
}
