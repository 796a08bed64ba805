use crate::schema::{
    ColumnRef, Condition, DataType, DatetimeBinding, Join, Layer, LikePolicy, OperatorSet,
    TableRef,
};

/// A correlated subquery answering "does the owning row have this value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub from: TableRef,
    pub joins: &'static [Join],
    /// Correlation with the owning row plus any fixed restrictions.
    pub conditions: &'static [Condition],
    /// Column compared against the filter value.
    pub value_column: ColumnRef,
}

/// What a field refers to in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTarget {
    /// A physical column of the base query.
    Column(ColumnRef),
    /// An output column that only exists once the base query is wrapped,
    /// e.g. an aggregate.
    Output(&'static str),
    /// A related attribute tested with `EXISTS`.
    Relation(Relation),
}

/// Everything the compiler knows about one logical field of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub target: FieldTarget,
    /// Name of the base query's output column for this field, when it
    /// differs from the column name.
    pub output: Option<&'static str>,
    pub data_type: DataType,
    pub searchable: bool,
    pub sortable: bool,
    pub groupable: bool,
    /// Empty when the field cannot be filtered on.
    pub operators: OperatorSet,
    pub like: LikePolicy,
    pub datetime: DatetimeBinding,
}

impl FieldDescriptor {
    const fn new(name: &'static str, target: FieldTarget, data_type: DataType) -> Self {
        Self {
            name,
            target,
            output: None,
            data_type,
            searchable: false,
            sortable: false,
            groupable: false,
            operators: data_type.default_operators(),
            like: LikePolicy::CaseInsensitive,
            datetime: DatetimeBinding::Param,
        }
    }

    /// A filterable physical column.
    pub const fn column(name: &'static str, column: ColumnRef, data_type: DataType) -> Self {
        Self::new(name, FieldTarget::Column(column), data_type)
    }

    /// A filterable output column of the wrapped base query.
    pub const fn output(name: &'static str, data_type: DataType) -> Self {
        Self::new(name, FieldTarget::Output(name), data_type)
    }

    /// A relationship filter; only `eq` and `neq` are allowed.
    pub const fn relation(name: &'static str, relation: Relation) -> Self {
        let mut field = Self::new(name, FieldTarget::Relation(relation), DataType::String);
        field.operators = OperatorSet::RELATION;
        field
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn groupable(mut self) -> Self {
        self.groupable = true;
        self
    }

    pub const fn operators(mut self, operators: OperatorSet) -> Self {
        self.operators = operators;
        self
    }

    /// Search/sort only.
    pub const fn unfilterable(self) -> Self {
        self.operators(OperatorSet::EMPTY)
    }

    pub const fn case_sensitive_like(mut self) -> Self {
        self.like = LikePolicy::CaseSensitive;
        self
    }

    pub const fn typed_datetime(mut self) -> Self {
        self.datetime = DatetimeBinding::TypedLiteral;
        self
    }

    pub const fn output_as(mut self, alias: &'static str) -> Self {
        self.output = Some(alias);
        self
    }

    #[inline]
    pub const fn is_filterable(&self) -> bool {
        !self.operators.is_empty()
    }

    pub const fn layer(&self) -> Layer {
        match self.target {
            FieldTarget::Column(_) | FieldTarget::Relation(_) => Layer::Inner,
            FieldTarget::Output(_) => Layer::Outer,
        }
    }

    pub const fn column_ref(&self) -> Option<ColumnRef> {
        match self.target {
            FieldTarget::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Output column name in the base query.
    pub const fn output_name(&self) -> &'static str {
        if let Some(alias) = self.output {
            return alias;
        }
        match self.target {
            FieldTarget::Column(column) => column.name,
            FieldTarget::Output(name) => name,
            FieldTarget::Relation(_) => self.name,
        }
    }
}
