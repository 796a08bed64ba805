//! Service users of one organization with the projects they can access.

use rql_core::expr::Direction;

use super::{NAMESPACE_PROJECT, POLICIES, PRINCIPAL_SERVICE_USER, PROJECTS, SERVICE_USERS};
use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey,
};

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        SERVICE_USERS,
        &[
            Projection::column(SERVICE_USERS.col("id"), "id"),
            Projection::column(SERVICE_USERS.col("title"), "title"),
            Projection::column(SERVICE_USERS.col("org_id"), "org_id"),
            Projection::column(SERVICE_USERS.col("created_at"), "created_at"),
            Projection::raw(
                r#"JSON_AGG(JSON_BUILD_OBJECT('id', "projects"."id", 'title', "projects"."title", 'name', "projects"."name"))"#,
                "project_data",
            ),
        ],
    )
    .joins(&[
        Join::inner(
            POLICIES,
            &[
                Condition::columns(SERVICE_USERS.col("id"), POLICIES.col("principal_id")),
                Condition::text(POLICIES.col("principal_type"), PRINCIPAL_SERVICE_USER),
                Condition::text(POLICIES.col("resource_type"), NAMESPACE_PROJECT),
            ],
        ),
        Join::inner(
            PROJECTS,
            &[Condition::columns(POLICIES.col("resource_id"), PROJECTS.col("id"))],
        ),
    ])
    .scope(&[Condition::scope(SERVICE_USERS.col("org_id"), ScopeKey::OrgId)])
    .group_by(&[SERVICE_USERS.col("id")]),
);

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::OrgServiceUsers.as_str(), SOURCE)
        .fields([
            FieldDescriptor::column("title", SERVICE_USERS.col("title"), DataType::String)
                .case_sensitive_like()
                .searchable()
                .sortable(),
            FieldDescriptor::column(
                "created_at",
                SERVICE_USERS.col("created_at"),
                DataType::Datetime,
            )
            .sortable(),
        ])
        .default_order("title", Direction::Asc)
}
