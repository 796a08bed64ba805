mod common;

use common::{assert_balanced, int, registry, text};
use rql::{
    CompileError, Compiler, CompilerConfig, FieldContext, Filter, Operator, ResourceKind,
    ResourceQuery, Scope, SortSpec,
};

#[test]
fn group_counts_by_physical_column() {
    let query = ResourceQuery::new()
        .filter(Filter::new("actor_type", Operator::Eq, "app/user"))
        .group_by("event")
        .sort(SortSpec::desc("created_at"))
        .limit(10);
    let statement = rql::compile_group(ResourceKind::AuditRecords, &query, &Scope::new()).unwrap();
    assert_balanced(&statement);
    assert_eq!(
        statement.sql(),
        r#"SELECT COUNT(*) AS "count", "auditrecords"."event" AS "values" FROM "auditrecords" WHERE (("auditrecords"."deleted_at" IS NULL) AND ("auditrecords"."actor_type" = $1)) GROUP BY "auditrecords"."event" ORDER BY "auditrecords"."event" ASC"#
    );
    assert_eq!(statement.params(), &[text("app/user")]);
}

#[test]
fn group_over_windowed_source_uses_outputs() {
    let query = ResourceQuery::new().group_by("plan");
    let statement = rql::compile_group(ResourceKind::OrgBilling, &query, &Scope::new()).unwrap();
    assert_balanced(&statement);
    let sql = statement.sql();
    assert!(sql.starts_with(
        r#"SELECT COUNT(*) AS "count", "ranked_subscriptions"."plan" AS "values" FROM (SELECT "#
    ));
    assert!(sql.ends_with(
        r#") AS "ranked_subscriptions" WHERE ("ranked_subscriptions"."row_num" = 1) GROUP BY "ranked_subscriptions"."plan" ORDER BY "ranked_subscriptions"."plan" ASC"#
    ));
    assert_eq!(statement.params(), &[text("canceled")]);
}

#[test]
fn group_over_aggregated_source_wraps() {
    let query = ResourceQuery::new().group_by("state");
    let scope = Scope::org("o");
    let statement = rql::compile_group(ResourceKind::OrgProjects, &query, &scope).unwrap();
    let sql = statement.sql();
    assert!(sql.starts_with(
        r#"SELECT COUNT(*) AS "count", "base"."state" AS "values" FROM (SELECT "projects"."id" AS "id""#
    ));
    assert!(sql.ends_with(r#") AS "base" GROUP BY "base"."state" ORDER BY "base"."state" ASC"#));
}

#[test]
fn group_rows_are_ordered_by_key() {
    let query = ResourceQuery::new().group_by("state").search("a");
    let statement = rql::compile_group(ResourceKind::OrgUsers, &query, &Scope::org("o")).unwrap();
    assert_balanced(&statement);
    let sql = statement.sql();
    assert!(sql.ends_with(r#" GROUP BY "base"."state" ORDER BY "base"."state" ASC"#));
    assert_eq!(sql.matches("ORDER BY").count(), 1);
    assert!(!sql.contains("LIMIT"));
}

#[test]
fn group_key_sorts_first_in_list_statement() {
    let registry = registry();
    let compiler = Compiler::new(&registry, CompilerConfig::new());
    let query = ResourceQuery::new()
        .group_by("state")
        .sort(SortSpec::desc("amount"));
    let statement = compiler.compile("invoices", &query, &Scope::new()).unwrap();
    let sql = statement.sql();
    assert!(sql.ends_with(r#"ORDER BY "invoices"."state" ASC, "invoices"."amount" DESC"#));
    assert!(!sql.contains("GROUP BY"));
}

#[test]
fn group_key_validation() {
    let scope = Scope::new();
    assert_eq!(
        rql::compile_group(ResourceKind::Prospects, &ResourceQuery::new(), &scope).unwrap_err(),
        CompileError::EmptyGroupBy
    );
    assert_eq!(
        rql::compile_group(
            ResourceKind::Prospects,
            &ResourceQuery::new().group_by("status").group_by("source"),
            &scope
        )
        .unwrap_err(),
        CompileError::TooManyGroupKeys { count: 2 }
    );
    let email = ResourceQuery::new().group_by("email");
    assert_eq!(
        rql::compile_group(ResourceKind::Prospects, &email, &scope).unwrap_err(),
        CompileError::UnsupportedField {
            resource: "prospects".into(),
            field: "email".into(),
            context: FieldContext::GroupBy,
        }
    );
    let unknown = ResourceQuery::new().group_by("nope");
    assert_eq!(
        rql::compile(ResourceKind::Prospects, &unknown, &scope).unwrap_err(),
        CompileError::UnsupportedField {
            resource: "prospects".into(),
            field: "nope".into(),
            context: FieldContext::GroupBy,
        }
    );
}

#[test]
fn count_ignores_sort_and_pagination() {
    let query = ResourceQuery::new()
        .filter(Filter::new("amount", Operator::Gte, 1000))
        .sort(SortSpec::desc("created_at"))
        .limit(10)
        .offset(50);
    let scope = Scope::org("org-1");
    let statement = rql::compile_count(ResourceKind::OrgInvoices, &query, &scope).unwrap();
    assert_balanced(&statement);
    let sql = statement.sql();
    assert!(sql.starts_with(r#"SELECT COUNT(*) AS "total" FROM "billing_invoices""#));
    assert!(!sql.contains("ORDER BY"));
    assert!(!sql.contains("LIMIT"));
    assert_eq!(statement.params(), &[text("org-1"), int(1000)]);
}

#[test]
fn count_over_aggregated_source_counts_groups() {
    let query = ResourceQuery::new();
    let scope = Scope::org("o");
    let statement = rql::compile_count(ResourceKind::OrgServiceUsers, &query, &scope).unwrap();
    let sql = statement.sql();
    assert!(sql.starts_with(
        r#"SELECT COUNT(*) AS "total" FROM (SELECT "serviceusers"."id" AS "id""#
    ));
    assert!(sql.ends_with(r#"GROUP BY "serviceusers"."id") AS "base""#));
}
