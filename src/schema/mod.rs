//! Static description of queryable resources: which fields exist, how they
//! map onto SQL, and which operations they allow.

mod field;
mod registry;
mod source;

pub use field::*;
pub use registry::*;
pub use source::*;

use crate::query::Operator;

/// Declared type of a field; drives value coercion and default operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    String,
    Number,
    Bool,
    Datetime,
}

impl DataType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
        }
    }

    /// Operators permitted on a field of this type unless overridden.
    pub const fn default_operators(self) -> OperatorSet {
        match self {
            Self::String => OperatorSet::STRING,
            Self::Number => OperatorSet::NUMBER,
            Self::Bool => OperatorSet::BOOL,
            Self::Datetime => OperatorSet::DATETIME,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitset of [`Operator`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperatorSet(u16);

impl OperatorSet {
    pub const EMPTY: Self = Self(0);

    pub const STRING: Self = Self::of(&[
        Operator::Eq,
        Operator::Neq,
        Operator::Like,
        Operator::NotLike,
        Operator::In,
        Operator::NotIn,
        Operator::Empty,
        Operator::NotEmpty,
    ]);

    pub const NUMBER: Self = Self::of(&[
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::NotIn,
        Operator::Empty,
        Operator::NotEmpty,
    ]);

    pub const BOOL: Self = Self::of(&[Operator::Eq, Operator::Neq]);

    pub const DATETIME: Self = Self::of(&[
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Empty,
        Operator::NotEmpty,
    ]);

    /// Relationship filters only support membership tests.
    pub const RELATION: Self = Self::of(&[Operator::Eq, Operator::Neq]);

    pub const fn of(ops: &[Operator]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < ops.len() {
            bits |= ops[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, op: Operator) -> bool {
        self.0 & op.bit() != 0
    }

    #[inline]
    pub const fn with(self, op: Operator) -> Self {
        Self(self.0 | op.bit())
    }

    #[inline]
    pub const fn without(self, op: Operator) -> Self {
        Self(self.0 & !op.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = Operator> {
        let all = Operator::ALL.into_iter();
        all.filter(move |op| self.contains(*op))
    }
}

/// How `like`/`notlike` filters are rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LikePolicy {
    /// `CAST(ref AS TEXT) [NOT ]ILIKE ?`
    #[default]
    CaseInsensitive,
    /// `ref [NOT ]LIKE ?`
    CaseSensitive,
}

/// How datetime comparison values reach the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatetimeBinding {
    /// The validated input string is bound as a parameter.
    #[default]
    Param,
    /// The parsed timestamp is re-formatted into an inline
    /// `timestamp '...'` literal.
    TypedLiteral,
}

/// Query layer that owns a field's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The base query (before aggregation or ranking).
    Inner,
    /// A derived table wrapping the base query.
    Outer,
}

/// Identifiers that scope a base source to a tenant or principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    OrgId,
    UserId,
    ProjectId,
}

impl ScopeKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrgId => "org_id",
            Self::UserId => "user_id",
            Self::ProjectId => "project_id",
        }
    }
}

impl std::fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoping identifiers supplied by the caller alongside a query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope {
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub project_id: Option<String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn org(org_id: impl Into<String>) -> Self {
        Self::new().with_org(org_id)
    }

    pub fn project(project_id: impl Into<String>) -> Self {
        Self::new().with_project(project_id)
    }

    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn get(&self, key: ScopeKey) -> Option<&str> {
        match key {
            ScopeKey::OrgId => self.org_id.as_deref(),
            ScopeKey::UserId => self.user_id.as_deref(),
            ScopeKey::ProjectId => self.project_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_sets() {
        assert!(OperatorSet::STRING.contains(Operator::Like));
        assert!(!OperatorSet::STRING.contains(Operator::Gt));
        assert!(OperatorSet::NUMBER.contains(Operator::Gte));
        assert!(!OperatorSet::BOOL.contains(Operator::In));
        assert!(OperatorSet::RELATION.contains(Operator::Neq));

        let set = OperatorSet::EMPTY.with(Operator::Eq).with(Operator::In);
        let ops: Vec<_> = set.iter().collect();
        assert_eq!(ops, [Operator::Eq, Operator::In]);
        assert!(!set.without(Operator::In).contains(Operator::In));
    }

    #[test]
    fn scope_lookup() {
        let scope = Scope::org("o1").with_user("u1");
        assert_eq!(scope.get(ScopeKey::OrgId), Some("o1"));
        assert_eq!(scope.get(ScopeKey::UserId), Some("u1"));
        assert_eq!(scope.get(ScopeKey::ProjectId), None);
    }
}
