#![allow(dead_code)]

use rql::rql_core::expr::Direction;
use rql::schema::{BaseSource, ColumnRef, JoinedSource, Projection, TableRef};
use rql::{
    Compiler, CompilerConfig, DataType, FieldDescriptor, Registry, ResourceKind, ResourceQuery,
    ResourceSchema, Scope, Statement, Value,
};

pub const INVOICES: TableRef = TableRef::new("invoices");

static INVOICE_COLUMNS: &[Projection] = &[
    Projection::column(ColumnRef::new("invoices", "id"), "id"),
    Projection::column(ColumnRef::new("invoices", "state"), "state"),
    Projection::column(ColumnRef::new("invoices", "hosted_url"), "hosted_url"),
    Projection::column(ColumnRef::new("invoices", "amount"), "amount"),
];

/// An unscoped single-table resource with two searchable columns.
pub fn invoices() -> ResourceSchema {
    let source = BaseSource::Joined(JoinedSource::new(INVOICES, INVOICE_COLUMNS));
    ResourceSchema::new("invoices", source)
        .fields([
            FieldDescriptor::column("state", INVOICES.col("state"), DataType::String)
                .searchable()
                .sortable()
                .groupable(),
            FieldDescriptor::column("hosted_url", INVOICES.col("hosted_url"), DataType::String)
                .searchable(),
            FieldDescriptor::column("amount", INVOICES.col("amount"), DataType::Number).sortable(),
        ])
        .default_order("amount", Direction::Desc)
}

pub fn registry() -> Registry {
    Registry::new().with(invoices())
}

pub fn compile(kind: ResourceKind, query: &ResourceQuery, scope: &Scope) -> Statement<Value> {
    let statement = rql::compile(kind, query, scope).unwrap();
    assert_balanced(&statement);
    statement
}

pub fn compile_with(
    config: CompilerConfig,
    kind: ResourceKind,
    query: &ResourceQuery,
    scope: &Scope,
) -> Statement<Value> {
    let statement = Compiler::new(Registry::builtin(), config)
        .compile(kind, query, scope)
        .unwrap();
    assert_balanced(&statement);
    statement
}

/// Every bound value has exactly one placeholder.
pub fn assert_balanced(statement: &Statement<Value>) {
    assert_eq!(
        statement.placeholder_count(),
        statement.params().len(),
        "{}",
        statement.sql()
    );
}

pub fn text(value: &str) -> Value {
    Value::from(value)
}

pub fn int(value: i64) -> Value {
    Value::Integer(value)
}
