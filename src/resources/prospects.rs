//! Marketing prospects.

use crate::schema::{
    BaseSource, DataType, FieldDescriptor, JoinedSource, Projection, ResourceSchema, TableRef,
};

const PROSPECTS: TableRef = TableRef::new("prospects");

const fn col(name: &'static str) -> Projection {
    Projection::column(PROSPECTS.col(name), name)
}

static SOURCE: BaseSource = BaseSource::Joined(JoinedSource::new(
    PROSPECTS,
    &[
        col("id"),
        col("name"),
        col("email"),
        col("phone"),
        col("activity"),
        col("status"),
        col("changed_at"),
        col("source"),
        col("verified"),
        col("metadata"),
        col("created_at"),
        col("updated_at"),
    ],
));

fn field(name: &'static str, data_type: DataType) -> FieldDescriptor {
    let field = FieldDescriptor::column(name, PROSPECTS.col(name), data_type).sortable();
    match data_type {
        DataType::Datetime => field,
        _ => field.searchable(),
    }
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::Prospects.as_str(), SOURCE).fields([
        field("id", DataType::String),
        field("name", DataType::String),
        field("email", DataType::String),
        field("phone", DataType::String),
        field("activity", DataType::String).groupable(),
        field("status", DataType::String).groupable(),
        field("changed_at", DataType::Datetime),
        field("source", DataType::String).groupable(),
        field("verified", DataType::Bool).groupable(),
        field("created_at", DataType::Datetime),
        field("updated_at", DataType::Datetime),
    ])
}
