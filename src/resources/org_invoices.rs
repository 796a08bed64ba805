//! Invoices of one organization's billing customers.

use super::{BILLING_CUSTOMERS, BILLING_INVOICES};
use crate::schema::{
    BaseSource, Condition, DataType, FieldDescriptor, Join, JoinedSource, Projection,
    ResourceSchema, ScopeKey,
};

const INVOICES: crate::schema::TableRef = BILLING_INVOICES;

static SOURCE: BaseSource = BaseSource::Joined(
    JoinedSource::new(
        INVOICES,
        &[
            Projection::column(INVOICES.col("id"), "invoice_id"),
            Projection::column(INVOICES.col("amount"), "invoice_amount"),
            Projection::column(INVOICES.col("currency"), "invoice_currency"),
            Projection::column(INVOICES.col("state"), "invoice_state"),
            Projection::column(INVOICES.col("hosted_url"), "invoice_hosted_url"),
            Projection::column(INVOICES.col("created_at"), "invoice_created_at"),
            Projection::column(BILLING_CUSTOMERS.col("org_id"), "org_id"),
        ],
    )
    .joins(&[Join::inner(
        BILLING_CUSTOMERS,
        &[Condition::columns(INVOICES.col("customer_id"), BILLING_CUSTOMERS.col("id"))],
    )])
    .scope(&[Condition::scope(BILLING_CUSTOMERS.col("org_id"), ScopeKey::OrgId)]),
);

pub(super) fn schema() -> ResourceSchema {
    ResourceSchema::new(super::ResourceKind::OrgInvoices.as_str(), SOURCE).fields([
        FieldDescriptor::column("id", INVOICES.col("id"), DataType::String)
            .output_as("invoice_id")
            .case_sensitive_like(),
        FieldDescriptor::column("state", INVOICES.col("state"), DataType::String)
            .output_as("invoice_state")
            .case_sensitive_like()
            .searchable()
            .sortable()
            .groupable(),
        FieldDescriptor::column("amount", INVOICES.col("amount"), DataType::Number)
            .output_as("invoice_amount")
            .searchable()
            .sortable(),
        FieldDescriptor::column("currency", INVOICES.col("currency"), DataType::String)
            .output_as("invoice_currency")
            .case_sensitive_like(),
        FieldDescriptor::column("hosted_url", INVOICES.col("hosted_url"), DataType::String)
            .output_as("invoice_hosted_url")
            .case_sensitive_like()
            .searchable(),
        FieldDescriptor::column("created_at", INVOICES.col("created_at"), DataType::Datetime)
            .output_as("invoice_created_at")
            .sortable(),
    ])
}
