//! Every organization with its latest non-canceled subscription.

use super::{BILLING_CUSTOMERS, ORGANIZATIONS};
use crate::schema::{
    BaseSource, CmpOp, Condition, DataType, FieldDescriptor, Join, JoinedSource, Operand,
    Projection, ResourceSchema, TableRef,
};

const SUBSCRIPTIONS: TableRef = TableRef::new("billing_subscriptions");
const PLANS: TableRef = TableRef::new("billing_plans");

static SOURCE: BaseSource = BaseSource::Windowed {
    source: JoinedSource::new(
        ORGANIZATIONS,
        &[
            Projection::column(ORGANIZATIONS.col("id"), "org_id"),
            Projection::column(ORGANIZATIONS.col("title"), "org_title"),
            Projection::column(ORGANIZATIONS.col("name"), "org_name"),
            Projection::column(ORGANIZATIONS.col("avatar"), "avatar"),
            Projection::column(ORGANIZATIONS.col("created_at"), "org_created_at"),
            Projection::column(ORGANIZATIONS.col("updated_at"), "org_updated_at"),
            Projection::column(ORGANIZATIONS.col("state"), "org_state"),
            Projection::raw(r#""organizations"."metadata"->'country'"#, "country"),
            Projection::raw(r#""organizations"."metadata"->'poc'"#, "org_created_by"),
            Projection::column(PLANS.col("id"), "plan_id"),
            Projection::column(PLANS.col("name"), "plan"),
            Projection::column(PLANS.col("interval"), "plan_interval"),
            Projection::column(SUBSCRIPTIONS.col("state"), "subscription_state"),
            Projection::column(SUBSCRIPTIONS.col("trial_ends_at"), "trial_ends_at"),
            Projection::column(
                SUBSCRIPTIONS.col("current_period_end_at"),
                "current_period_end_at",
            ),
            Projection::column(SUBSCRIPTIONS.col("created_at"), "subscription_created_at"),
        ],
    )
    .joins(&[
        Join::left(
            BILLING_CUSTOMERS,
            &[Condition::columns(ORGANIZATIONS.col("id"), BILLING_CUSTOMERS.col("org_id"))],
        ),
        Join::left(
            SUBSCRIPTIONS,
            &[
                Condition::columns(
                    SUBSCRIPTIONS.col("customer_id"),
                    BILLING_CUSTOMERS.col("id"),
                ),
                Condition::Compare {
                    left: SUBSCRIPTIONS.col("state"),
                    op: CmpOp::Neq,
                    right: Operand::Text("canceled"),
                },
            ],
        ),
        Join::left(
            PLANS,
            &[Condition::columns(PLANS.col("id"), SUBSCRIPTIONS.col("plan_id"))],
        ),
    ]),
    partition_by: ORGANIZATIONS.col("id"),
    order_by: SUBSCRIPTIONS.col("created_at"),
    rank_alias: "row_num",
    alias: "ranked_subscriptions",
};

fn output(name: &'static str, data_type: DataType) -> FieldDescriptor {
    FieldDescriptor::output(name, data_type).sortable()
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::OrgBilling.as_str(), SOURCE).fields([
        output("org_id", DataType::String),
        output("org_title", DataType::String).searchable(),
        output("org_name", DataType::String).searchable(),
        output("org_state", DataType::String).groupable(),
        output("org_created_at", DataType::Datetime),
        output("org_updated_at", DataType::Datetime),
        output("country", DataType::String).unfilterable(),
        output("plan", DataType::String).searchable().groupable(),
        output("plan_interval", DataType::String).groupable(),
        output("subscription_state", DataType::String)
            .searchable()
            .groupable(),
        output("subscription_created_at", DataType::Datetime),
        output("trial_ends_at", DataType::Datetime),
        output("current_period_end_at", DataType::Datetime),
    ])
}
