//! The resource-query model produced by the transport layer.

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Filter operators understood by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Like,
    NotLike,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
    Empty,
    NotEmpty,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Self::Eq,
        Self::Neq,
        Self::Like,
        Self::NotLike,
        Self::In,
        Self::NotIn,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Empty,
        Self::NotEmpty,
    ];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Like => "like",
            Self::NotLike => "notlike",
            Self::In => "in",
            Self::NotIn => "notin",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Empty => "empty",
            Self::NotEmpty => "notempty",
        }
    }

    /// Parses the wire spelling. Unknown spellings return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }

    #[inline]
    pub(crate) const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `name operator value` condition.
///
/// The operator is kept as received so that unknown spellings surface as
/// compile errors rather than deserialization failures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Filter {
    pub name: String,
    pub operator: String,
    #[serde(default)]
    pub value: JsonValue,
}

impl Filter {
    pub fn new(name: impl Into<String>, operator: Operator, value: impl Into<JsonValue>) -> Self {
        Self {
            name: name.into(),
            operator: operator.as_str().to_owned(),
            value: value.into(),
        }
    }

    /// A filter whose operator ignores the value (`empty`, `notempty`).
    pub fn unary(name: impl Into<String>, operator: Operator) -> Self {
        Self::new(name, operator, JsonValue::Null)
    }
}

/// Sort direction. Any spelling other than `asc`/`desc` is `Unspecified`
/// and produces no ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum SortOrder {
    Asc,
    Desc,
    #[default]
    Unspecified,
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        SortOrder::from(value.as_str())
    }
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        match value {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => SortOrder::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortSpec {
    pub name: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }

    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Asc)
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Desc)
    }
}

/// A declarative list query against one resource.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ResourceQuery {
    pub filters: Vec<Filter>,
    pub search: String,
    pub sort: Vec<SortSpec>,
    pub group_by: Vec<String>,
    pub limit: u64,
    pub offset: u64,
}

impl ResourceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort.push(spec);
        self
    }

    pub fn group_by(mut self, key: impl Into<String>) -> Self {
        self.group_by.push(key.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Parse the JSON shape produced by the transport layer.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
