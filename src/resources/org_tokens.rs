//! Credit transactions of one organization's billing account.

use super::{BILLING_CUSTOMERS, USERS};
use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey, TableRef,
};

const TRANSACTIONS: TableRef = TableRef::new("billing_transactions");

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        TRANSACTIONS,
        &[
            Projection::column(TRANSACTIONS.col("amount"), "token_amount"),
            Projection::column(TRANSACTIONS.col("type"), "token_type"),
            Projection::column(TRANSACTIONS.col("description"), "token_description"),
            Projection::column(TRANSACTIONS.col("user_id"), "token_user_id"),
            Projection::column(USERS.col("title"), "user_title"),
            Projection::column(USERS.col("avatar"), "user_avatar"),
            Projection::column(TRANSACTIONS.col("created_at"), "token_created_at"),
            Projection::column(BILLING_CUSTOMERS.col("org_id"), "org_id"),
        ],
    )
    .joins(&[
        Join::inner(
            BILLING_CUSTOMERS,
            &[Condition::columns(TRANSACTIONS.col("account_id"), BILLING_CUSTOMERS.col("id"))],
        ),
        // user_id is free text and may be empty
        Join::left(
            USERS,
            &[Condition::Raw(
                r#"CASE WHEN "billing_transactions"."user_id" IS NOT NULL AND "billing_transactions"."user_id" != '' THEN CAST("billing_transactions"."user_id" AS uuid) = "users"."id" ELSE false END"#,
            )],
        ),
    ])
    .scope(&[Condition::scope(BILLING_CUSTOMERS.col("org_id"), ScopeKey::OrgId)]),
);

fn token(name: &'static str, alias: &'static str, data_type: DataType) -> FieldDescriptor {
    FieldDescriptor::column(name, TRANSACTIONS.col(name), data_type).output_as(alias)
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::OrgTokens.as_str(), SOURCE).fields([
        FieldDescriptor::column("title", USERS.col("title"), DataType::String)
            .output_as("user_title")
            .case_sensitive_like()
            .searchable(),
        FieldDescriptor::column("user_title", USERS.col("title"), DataType::String)
            .unfilterable()
            .sortable(),
        token("description", "token_description", DataType::String)
            .case_sensitive_like()
            .searchable()
            .sortable(),
        token("type", "token_type", DataType::String)
            .case_sensitive_like()
            .searchable()
            .sortable(),
        token("amount", "token_amount", DataType::Number)
            .searchable()
            .sortable(),
        token("created_at", "token_created_at", DataType::Datetime).sortable(),
    ])
}
