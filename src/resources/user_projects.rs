//! Projects one user is a member of, with every member of each project.

use rql_core::expr::Direction;

use super::{NAMESPACE_PROJECT, PRINCIPAL_USER};
use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Membership, Projection,
    ResourceSchema, ScopeKey, TableRef,
};

const P: TableRef = TableRef::aliased("projects", "p");
const POL: TableRef = TableRef::aliased("policies", "pol");
const U: TableRef = TableRef::aliased("users", "u");
const P2: TableRef = TableRef::aliased("projects", "p2");
const POL2: TableRef = TableRef::aliased("policies", "pol2");

static SOURCE: BaseSource = BaseSource::CorrelatedFilter {
    source: JoinedSource::new(
        P,
        &[
            Projection::column(P.col("id"), "project_id"),
            Projection::column(P.col("title"), "project_title"),
            Projection::column(P.col("name"), "project_name"),
            Projection::column(P.col("created_at"), "project_created_on"),
            Projection::raw(
                r#"array_agg(DISTINCT "u"."id" ORDER BY "u"."id")"#,
                "user_ids",
            ),
            Projection::raw(
                r#"array_agg(DISTINCT "u"."avatar" ORDER BY "u"."avatar")"#,
                "user_avatars",
            ),
            Projection::raw(
                r#"array_agg(DISTINCT "u"."name" ORDER BY "u"."name")"#,
                "user_names",
            ),
            Projection::raw(
                r#"array_agg(DISTINCT "u"."title" ORDER BY "u"."title")"#,
                "user_titles",
            ),
        ],
    )
    .joins(&[
        Join::inner(
            POL,
            &[
                Condition::columns(P.col("id"), POL.col("resource_id")),
                Condition::text(POL.col("resource_type"), NAMESPACE_PROJECT),
                Condition::IsNull(POL.col("deleted_at")),
            ],
        ),
        Join::inner(
            U,
            &[
                Condition::columns(POL.col("principal_id"), U.col("id")),
                Condition::text(POL.col("principal_type"), PRINCIPAL_USER),
            ],
        ),
    ])
    .group_by(&[P.col("id"), P.col("name"), P.col("created_at")]),
    key: P.col("id"),
    membership: Membership {
        from: P2,
        joins: &[Join::inner(
            POL2,
            &[Condition::columns(P2.col("id"), POL2.col("resource_id"))],
        )],
        select: P2.col("id"),
        conditions: &[
            Condition::scope(P2.col("org_id"), ScopeKey::OrgId),
            Condition::scope(POL2.col("principal_id"), ScopeKey::UserId),
            Condition::text(POL2.col("resource_type"), NAMESPACE_PROJECT),
            Condition::text(POL2.col("principal_type"), PRINCIPAL_USER),
            Condition::IsNull(POL2.col("deleted_at")),
        ],
    },
};

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::UserProjects.as_str(), SOURCE)
        .fields([
            FieldDescriptor::column("title", P.col("title"), DataType::String)
                .output_as("project_title")
                .searchable()
                .sortable(),
            FieldDescriptor::column("name", P.col("name"), DataType::String)
                .output_as("project_name")
                .searchable()
                .sortable(),
            FieldDescriptor::column("created_at", P.col("created_at"), DataType::Datetime)
                .output_as("project_created_on")
                .sortable(),
        ])
        .default_order("name", Direction::Asc)
        .search_outer()
}
