//! Users holding a policy on one project, with their roles folded into
//! comma-separated lists.

use super::{NAMESPACE_PROJECT, POLICIES, PRINCIPAL_USER, ROLES, USERS};
use crate::schema::{
    Aggregate, BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey,
};

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        POLICIES,
        &[
            Projection::column(USERS.col("id"), "id"),
            Projection::column(USERS.col("name"), "name"),
            Projection::column(USERS.col("email"), "email"),
            Projection::column(USERS.col("title"), "title"),
            Projection::column(USERS.col("state"), "state"),
            Projection::column(POLICIES.col("resource_id"), "project_id"),
            Projection::aggregate(
                Aggregate::Min,
                POLICIES.col("created_at"),
                "project_joined_at",
            ),
            Projection::raw(r#"string_agg(DISTINCT "roles"."name", ',')"#, "role_names"),
            Projection::raw(
                r#"string_agg(DISTINCT "roles"."title", ',')"#,
                "role_titles",
            ),
            Projection::raw(
                r#"string_agg(DISTINCT CAST("roles"."id" AS TEXT), ',')"#,
                "role_ids",
            ),
        ],
    )
    .joins(&[
        Join::inner(
            USERS,
            &[Condition::columns(POLICIES.col("principal_id"), USERS.col("id"))],
        ),
        Join::inner(
            ROLES,
            &[Condition::columns(POLICIES.col("role_id"), ROLES.col("id"))],
        ),
    ])
    .scope(&[
        Condition::scope(POLICIES.col("resource_id"), ScopeKey::ProjectId),
        Condition::text(POLICIES.col("resource_type"), NAMESPACE_PROJECT),
        Condition::text(POLICIES.col("principal_type"), PRINCIPAL_USER),
    ])
    .group_by(&[
        USERS.col("id"),
        USERS.col("name"),
        USERS.col("email"),
        USERS.col("title"),
        USERS.col("state"),
        POLICIES.col("resource_id"),
    ]),
);

fn user(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::column(name, USERS.col(name), DataType::String)
        .searchable()
        .sortable()
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::ProjectUsers.as_str(), SOURCE)
        .fields([
            user("name"),
            user("email"),
            user("title"),
            user("state").groupable(),
            FieldDescriptor::output("project_joined_at", DataType::Datetime).sortable(),
            FieldDescriptor::output("role_names", DataType::String).searchable(),
            FieldDescriptor::output("role_titles", DataType::String).searchable(),
            FieldDescriptor::output("role_ids", DataType::String).searchable(),
        ])
        .search_outer()
}
