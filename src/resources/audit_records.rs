//! The audit log.

use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, JoinedSource, Projection, ResourceSchema,
    TableRef,
};

const AUDIT_RECORDS: TableRef = TableRef::new("auditrecords");

const fn col(name: &'static str) -> Projection {
    Projection::column(AUDIT_RECORDS.col(name), name)
}

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        AUDIT_RECORDS,
        &[
            col("id"),
            col("idempotency_key"),
            col("event"),
            col("actor_id"),
            col("actor_type"),
            col("actor_name"),
            col("actor_metadata"),
            col("resource_id"),
            col("resource_type"),
            col("resource_name"),
            col("resource_metadata"),
            col("target_id"),
            col("target_type"),
            col("target_name"),
            col("target_metadata"),
            col("occurred_at"),
            col("org_id"),
            col("org_name"),
            col("request_id"),
            col("metadata"),
            col("created_at"),
        ],
    )
    .scope(&[Condition::IsNull(AUDIT_RECORDS.col("deleted_at"))]),
);

fn text(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::column(name, AUDIT_RECORDS.col(name), DataType::String)
        .searchable()
        .sortable()
}

fn timestamp(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::column(name, AUDIT_RECORDS.col(name), DataType::Datetime).sortable()
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::AuditRecords.as_str(), SOURCE).fields([
        text("id"),
        text("event").groupable(),
        text("actor_id"),
        text("actor_type").groupable(),
        text("actor_name"),
        text("resource_id"),
        text("resource_type").groupable(),
        text("resource_name"),
        text("target_id"),
        text("target_type").groupable(),
        text("target_name"),
        timestamp("occurred_at"),
        text("org_id").groupable(),
        text("org_name").groupable(),
        text("request_id"),
        timestamp("created_at"),
        text("idempotency_key"),
    ])
}
