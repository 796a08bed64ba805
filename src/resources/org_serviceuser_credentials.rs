//! Credentials of every service user in one organization.

use super::SERVICE_USERS;
use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey, TableRef,
};

const CREDENTIALS: TableRef = TableRef::new("serviceuser_credentials");

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        CREDENTIALS,
        &[
            Projection::column(CREDENTIALS.col("title"), "credential_title"),
            Projection::column(SERVICE_USERS.col("title"), "serviceuser_title"),
            Projection::column(CREDENTIALS.col("created_at"), "credential_created_at"),
            Projection::column(SERVICE_USERS.col("org_id"), "org_id"),
        ],
    )
    .joins(&[Join::inner(
        SERVICE_USERS,
        &[Condition::columns(CREDENTIALS.col("serviceuser_id"), SERVICE_USERS.col("id"))],
    )])
    .scope(&[Condition::scope(SERVICE_USERS.col("org_id"), ScopeKey::OrgId)]),
);

pub(super) fn schema() -> ResourceSchema {
    let name = super::ResourceKind::OrgServiceUserCredentials.as_str();
    ResourceSchema::new(name, SOURCE).fields([
        FieldDescriptor::column("title", CREDENTIALS.col("title"), DataType::String)
            .output_as("credential_title")
            .case_sensitive_like()
            .searchable()
            .sortable(),
        FieldDescriptor::column(
            "serviceuser_title",
            SERVICE_USERS.col("title"),
            DataType::String,
        )
        .output_as("serviceuser_title")
        .case_sensitive_like()
        .searchable()
        .sortable(),
        FieldDescriptor::column(
            "created_at",
            CREDENTIALS.col("created_at"),
            DataType::Datetime,
        )
        .output_as("credential_created_at")
        .sortable(),
    ])
}
