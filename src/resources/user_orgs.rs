//! Organizations a user holds a policy on, with their roles and project
//! counts. Always listed whole, ordered by organization name.

use rql_core::expr::Direction;

use super::{NAMESPACE_ORGANIZATION, ORGANIZATIONS, POLICIES, ROLES, USERS};
use crate::schema::{
    Aggregate, BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey,
};

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        POLICIES,
        &[
            Projection::column(POLICIES.col("principal_id"), "principal_id"),
            Projection::column(POLICIES.col("resource_id"), "org_id"),
            Projection::column(ORGANIZATIONS.col("name"), "org_name"),
            Projection::column(ORGANIZATIONS.col("title"), "org_title"),
            Projection::column(ORGANIZATIONS.col("avatar"), "org_avatar"),
            Projection::aggregate(Aggregate::Min, POLICIES.col("created_at"), "org_joined_on"),
            Projection::raw(r#"ARRAY_AGG("roles"."name")"#, "role_names"),
            Projection::raw(r#"ARRAY_AGG("roles"."title")"#, "role_titles"),
            Projection::raw(r#"ARRAY_AGG("roles"."id")"#, "role_ids"),
            Projection::raw(
                r#"COALESCE((SELECT COUNT("projects"."id") FROM "projects" WHERE "projects"."org_id" = "organizations"."id" AND "projects"."deleted_at" IS NULL AND "projects"."state" = 'enabled'), 0)"#,
                "project_count",
            ),
        ],
    )
    .joins(&[
        Join::inner(
            ROLES,
            &[Condition::columns(POLICIES.col("role_id"), ROLES.col("id"))],
        ),
        Join::inner(
            ORGANIZATIONS,
            &[Condition::columns(POLICIES.col("resource_id"), ORGANIZATIONS.col("id"))],
        ),
        Join::inner(
            USERS,
            &[Condition::columns(POLICIES.col("principal_id"), USERS.col("id"))],
        ),
    ])
    .scope(&[
        Condition::text(POLICIES.col("resource_type"), NAMESPACE_ORGANIZATION),
        Condition::scope(POLICIES.col("principal_id"), ScopeKey::UserId),
    ])
    .group_by(&[
        POLICIES.col("principal_id"),
        USERS.col("email"),
        POLICIES.col("resource_id"),
        ORGANIZATIONS.col("id"),
        ORGANIZATIONS.col("name"),
        ORGANIZATIONS.col("title"),
        ORGANIZATIONS.col("avatar"),
    ]),
);

fn org(name: &'static str, column: &'static str) -> FieldDescriptor {
    FieldDescriptor::column(name, ORGANIZATIONS.col(column), DataType::String)
        .output_as(name)
        .unfilterable()
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::UserOrgs.as_str(), SOURCE)
        .fields([
            FieldDescriptor::column("org_id", POLICIES.col("resource_id"), DataType::String)
                .output_as("org_id")
                .unfilterable(),
            org("org_name", "name"),
            org("org_title", "title"),
            org("org_avatar", "avatar"),
            FieldDescriptor::output("project_count", DataType::Number).unfilterable(),
            FieldDescriptor::output("org_joined_on", DataType::Datetime).unfilterable(),
        ])
        .default_order("org_name", Direction::Asc)
        .fixed()
}
