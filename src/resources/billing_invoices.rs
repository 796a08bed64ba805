//! Invoices across every organization, joined with the owning org.

use super::{BILLING_CUSTOMERS, BILLING_INVOICES, ORGANIZATIONS};
use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, TableRef,
};

const INVOICES: TableRef = BILLING_INVOICES;

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        INVOICES,
        &[
            Projection::column(INVOICES.col("id"), "id"),
            Projection::column(INVOICES.col("amount"), "amount"),
            Projection::column(INVOICES.col("currency"), "currency"),
            Projection::column(INVOICES.col("state"), "state"),
            Projection::column(INVOICES.col("hosted_url"), "hosted_url"),
            Projection::column(INVOICES.col("created_at"), "created_at"),
            Projection::column(ORGANIZATIONS.col("id"), "org_id"),
            Projection::column(ORGANIZATIONS.col("name"), "org_name"),
            Projection::column(ORGANIZATIONS.col("title"), "org_title"),
        ],
    )
    .joins(&[
        Join::inner(
            BILLING_CUSTOMERS,
            &[Condition::columns(INVOICES.col("customer_id"), BILLING_CUSTOMERS.col("id"))],
        ),
        Join::inner(
            ORGANIZATIONS,
            &[Condition::columns(BILLING_CUSTOMERS.col("org_id"), ORGANIZATIONS.col("id"))],
        ),
    ]),
);

fn invoice(name: &'static str, data_type: DataType) -> FieldDescriptor {
    FieldDescriptor::column(name, INVOICES.col(name), data_type).case_sensitive_like()
}

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::BillingInvoices.as_str(), SOURCE).fields([
        invoice("id", DataType::String),
        invoice("amount", DataType::Number).searchable().sortable(),
        invoice("currency", DataType::String).searchable(),
        invoice("state", DataType::String)
            .searchable()
            .sortable()
            .groupable(),
        invoice("hosted_url", DataType::String).searchable(),
        invoice("created_at", DataType::Datetime).sortable(),
        FieldDescriptor::column("org_id", ORGANIZATIONS.col("id"), DataType::String)
            .output_as("org_id"),
        FieldDescriptor::column("org_name", ORGANIZATIONS.col("name"), DataType::String)
            .output_as("org_name")
            .searchable()
            .sortable(),
        FieldDescriptor::column("org_title", ORGANIZATIONS.col("title"), DataType::String)
            .output_as("org_title")
            .searchable()
            .sortable(),
    ])
}
