//! Users holding a policy on one organization, with their roles.

use super::{NAMESPACE_ORGANIZATION, POLICIES, PRINCIPAL_USER, ROLES, USERS};
use crate::schema::{
    Aggregate, BaseSource, ColumnRef, Condition, DataType, FieldDescriptor, Join, JoinedSource,
    Projection, Relation, ResourceSchema, ScopeKey, TableRef,
};

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        POLICIES,
        &[
            Projection::column(POLICIES.col("resource_id"), "org_id"),
            Projection::column(USERS.col("id"), "id"),
            Projection::column(USERS.col("name"), "name"),
            Projection::column(USERS.col("title"), "title"),
            Projection::column(USERS.col("email"), "email"),
            Projection::column(USERS.col("state"), "state"),
            Projection::column(USERS.col("avatar"), "avatar"),
            Projection::aggregate(Aggregate::Min, POLICIES.col("created_at"), "org_joined_at"),
            Projection::raw(r#"ARRAY_AGG("roles"."name")"#, "role_names"),
            Projection::raw(r#"ARRAY_AGG(COALESCE("roles"."title", ''))"#, "role_titles"),
            Projection::raw(r#"ARRAY_AGG(CAST("roles"."id" AS TEXT))"#, "role_ids"),
        ],
    )
    .joins(&[
        Join::inner(
            USERS,
            &[Condition::columns(USERS.col("id"), POLICIES.col("principal_id"))],
        ),
        Join::left(
            ROLES,
            &[Condition::columns(ROLES.col("id"), POLICIES.col("role_id"))],
        ),
    ])
    .scope(&[
        Condition::scope(POLICIES.col("resource_id"), ScopeKey::OrgId),
        Condition::text(POLICIES.col("resource_type"), NAMESPACE_ORGANIZATION),
        Condition::text(POLICIES.col("principal_type"), PRINCIPAL_USER),
        Condition::IsNull(USERS.col("deleted_at")),
        Condition::IsNull(ROLES.col("deleted_at")),
    ])
    .group_by(&[
        POLICIES.col("resource_id"),
        USERS.col("id"),
        USERS.col("name"),
        USERS.col("title"),
        USERS.col("email"),
        USERS.col("state"),
        USERS.col("created_at"),
        USERS.col("updated_at"),
    ]),
);

const POL: TableRef = TableRef::aliased("policies", "pol");
const R: TableRef = TableRef::aliased("roles", "r");

static ROLE_JOINS: &[Join] = &[Join::inner(R, ROLE_ON)];

static ROLE_ON: &[Condition] = &[Condition::columns(R.col("id"), POL.col("role_id"))];

static ROLE_CONDITIONS: &[Condition] = &[
    Condition::columns(POL.col("principal_id"), USERS.col("id")),
    Condition::scope(POL.col("resource_id"), ScopeKey::OrgId),
    Condition::text(POL.col("resource_type"), NAMESPACE_ORGANIZATION),
];

fn role(value_column: ColumnRef) -> Relation {
    Relation {
        from: POL,
        joins: ROLE_JOINS,
        conditions: ROLE_CONDITIONS,
        value_column,
    }
}

fn user(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::column(name, USERS.col(name), DataType::String)
        .searchable()
        .sortable()
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::OrgUsers.as_str(), SOURCE).fields([
        user("name"),
        user("title"),
        user("email"),
        user("state").groupable(),
        FieldDescriptor::column(
            "org_joined_at",
            POLICIES.col("created_at"),
            DataType::Datetime,
        )
        .output_as("org_joined_at")
        .sortable(),
        FieldDescriptor::relation("role_names", role(R.col("name"))),
        FieldDescriptor::relation("role_titles", role(R.col("title"))),
        FieldDescriptor::relation("role_ids", role(R.col("id"))),
    ])
}
