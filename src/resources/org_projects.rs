//! Projects of one organization with member counts.

use super::{POLICIES, PRINCIPAL_USER, PROJECTS, USERS};
use crate::schema::{
    Aggregate, BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey,
};

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        POLICIES,
        &[
            Projection::column(PROJECTS.col("id"), "id"),
            Projection::column(PROJECTS.col("name"), "name"),
            Projection::column(PROJECTS.col("title"), "title"),
            Projection::column(PROJECTS.col("state"), "state"),
            Projection::column(PROJECTS.col("created_at"), "created_at"),
            Projection::column(PROJECTS.col("org_id"), "org_id"),
            Projection::aggregate(
                Aggregate::CountDistinct,
                POLICIES.col("principal_id"),
                "member_count",
            ),
            Projection::aggregate(Aggregate::ArrayAggDistinct, USERS.col("id"), "user_ids"),
        ],
    )
    .joins(&[
        Join::inner(
            PROJECTS,
            &[Condition::columns(POLICIES.col("resource_id"), PROJECTS.col("id"))],
        ),
        Join::inner(
            USERS,
            &[Condition::columns(POLICIES.col("principal_id"), USERS.col("id"))],
        ),
    ])
    .scope(&[
        Condition::scope(PROJECTS.col("org_id"), ScopeKey::OrgId),
        Condition::text(POLICIES.col("principal_type"), PRINCIPAL_USER),
    ])
    .group_by(&[
        PROJECTS.col("id"),
        PROJECTS.col("name"),
        PROJECTS.col("title"),
        PROJECTS.col("state"),
        PROJECTS.col("created_at"),
        PROJECTS.col("org_id"),
    ]),
);

fn project(name: &'static str, data_type: DataType) -> FieldDescriptor {
    FieldDescriptor::column(name, PROJECTS.col(name), data_type)
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::OrgProjects.as_str(), SOURCE).fields([
        project("id", DataType::String),
        project("title", DataType::String).searchable().sortable(),
        project("name", DataType::String).searchable().sortable(),
        project("state", DataType::String)
            .searchable()
            .sortable()
            .groupable(),
        project("created_at", DataType::Datetime)
            .typed_datetime()
            .sortable(),
        FieldDescriptor::output("member_count", DataType::Number).sortable(),
    ])
}
