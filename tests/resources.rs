mod common;

use common::{assert_balanced, compile, compile_with, int, text};
use rql::{
    CompileError, CompilerConfig, Filter, Operator, PlaceholderStyle, ResourceKind, ResourceQuery,
    Scope, SortSpec,
};

#[test]
fn every_resource_compiles_an_empty_query() {
    let scope = Scope::org("o").with_user("u").with_project("p");
    for kind in ResourceKind::ALL {
        for statement in [
            rql::compile(kind, &ResourceQuery::new(), &scope),
            rql::compile_count(kind, &ResourceQuery::new(), &scope),
        ] {
            assert_balanced(&statement.unwrap());
        }
    }
}

#[test]
fn every_searchable_resource_balances_search() {
    let scope = Scope::org("o").with_user("u").with_project("p");
    let query = ResourceQuery::new().search("a").limit(3).offset(6);
    for kind in ResourceKind::ALL {
        if kind.schema().is_fixed() {
            continue;
        }
        let statement = rql::compile(kind, &query, &scope).unwrap();
        assert_balanced(&statement);
        let offset = format!("OFFSET ${}", statement.params().len());
        let sql = statement.sql();
        assert!(sql.ends_with(&offset), "{kind}: {sql}");
        assert_eq!(statement.params().last(), Some(&int(6)));
    }
}

#[test]
fn windowed_source_keeps_latest_rank() {
    let query = ResourceQuery::new()
        .filter(Filter::new("plan", Operator::Eq, "pro"))
        .sort(SortSpec::desc("org_created_at"))
        .limit(25);
    let statement = compile(ResourceKind::OrgBilling, &query, &Scope::new());
    let sql = statement.sql();
    assert!(sql.starts_with(
        r#"SELECT "ranked_subscriptions"."org_id", "ranked_subscriptions"."org_title""#
    ));
    assert!(sql.contains(
        r#"ROW_NUMBER() OVER (PARTITION BY "organizations"."id" ORDER BY "billing_subscriptions"."created_at" DESC) AS "row_num""#
    ));
    assert!(sql.contains(r#""billing_subscriptions"."state" != $1"#));
    assert!(sql.ends_with(
        r#") AS "ranked_subscriptions" WHERE (("ranked_subscriptions"."row_num" = 1) AND ("ranked_subscriptions"."plan" = $2)) ORDER BY "org_created_at" DESC LIMIT $3"#
    ));
    assert_eq!(
        statement.params(),
        &[text("canceled"), text("pro"), int(25)]
    );
}

#[test]
fn correlated_membership_filters_parent_rows() {
    let scope = Scope::org("org-1").with_user("user-1");
    let query = ResourceQuery::new().filter(Filter::new("title", Operator::Like, "web"));
    let statement = compile(ResourceKind::UserProjects, &query, &scope);
    let sql = statement.sql();
    assert!(sql.contains(
        r#"("p"."id" IN (SELECT "p2"."id" FROM "projects" AS "p2" INNER JOIN "policies" AS "pol2" ON ("p2"."id" = "pol2"."resource_id") WHERE"#
    ));
    assert!(sql.contains(r#"(CAST("p"."title" AS TEXT) ILIKE $"#));
    assert!(sql.ends_with(
        r#"GROUP BY "p"."id", "p"."name", "p"."created_at" ORDER BY "project_name" ASC"#
    ));
    assert_eq!(
        statement.params(),
        &[
            text("app/project"),
            text("app/user"),
            text("org-1"),
            text("user-1"),
            text("app/project"),
            text("app/user"),
            text("%web%"),
        ]
    );
}

#[test]
fn correlated_search_reads_derived_table() {
    let scope = Scope::org("org-1").with_user("user-1");
    let query = ResourceQuery::new().search("web");
    let statement = compile(ResourceKind::UserProjects, &query, &scope);
    let sql = statement.sql();
    assert!(sql.contains(
        r#") AS "base" WHERE ((CAST("base"."project_title" AS TEXT) ILIKE $7) OR (CAST("base"."project_name" AS TEXT) ILIKE $8))"#
    ));
}

#[test]
fn relation_filter_uses_exists() {
    let query = ResourceQuery::new().filter(Filter::new("role_names", Operator::Eq, "owner"));
    let statement = compile(ResourceKind::OrgUsers, &query, &Scope::org("org-1"));
    let sql = statement.sql();
    assert!(sql.contains(
        r#"EXISTS (SELECT 1 FROM "policies" AS "pol" INNER JOIN "roles" AS "r" ON ("r"."id" = "pol"."role_id") WHERE (("pol"."principal_id" = "users"."id") AND ("pol"."resource_id" = $4) AND ("pol"."resource_type" = $5) AND ("r"."name" = $6)) LIMIT 1)"#
    ));
    let tail = [text("org-1"), text("app/organization"), text("owner")];
    assert_eq!(&statement.params()[3..], &tail);
}

#[test]
fn relation_neq_requires_some_other_value() {
    let query = ResourceQuery::new().filter(Filter::new("role_ids", Operator::Neq, "r-1"));
    let statement = compile(ResourceKind::OrgUsers, &query, &Scope::org("org-1"));
    let sql = statement.sql();
    assert_eq!(sql.matches("NOT EXISTS").count(), 1);
    assert_eq!(sql.matches("EXISTS (SELECT 1").count(), 2);
    assert_eq!(statement.params().last(), Some(&text("app/organization")));

    let query = ResourceQuery::new().filter(Filter::new("role_ids", Operator::Like, "r"));
    assert!(rql::compile(ResourceKind::OrgUsers, &query, &Scope::org("o")).is_err());
}

#[test]
fn token_user_join_is_verbatim() {
    let query = ResourceQuery::new();
    let statement = compile(ResourceKind::OrgTokens, &query, &Scope::org("o"));
    let sql = statement.sql();
    assert!(sql.contains(
        r#"LEFT JOIN "users" ON (CASE WHEN "billing_transactions"."user_id" IS NOT NULL"#
    ));
    assert_eq!(statement.params(), &[text("o")]);
}

#[test]
fn positional_placeholders_and_paging_config() {
    let config = CompilerConfig::paginated()
        .with_placeholder_style(PlaceholderStyle::Positional)
        .with_max_limit(100);
    let query = ResourceQuery::new().filter(Filter::new("status", Operator::Eq, "new"));
    let statement = compile_with(config, ResourceKind::Prospects, &query, &Scope::new());
    let sql = statement.sql();
    assert!(sql.ends_with(r#"WHERE ("prospects"."status" = ?) LIMIT ?"#));
    assert_eq!(statement.params(), &[text("new"), int(50)]);

    let query = ResourceQuery::new().limit(500);
    let statement = compile_with(config, ResourceKind::Prospects, &query, &Scope::new());
    assert_eq!(statement.params(), &[int(100)]);
}

#[test]
fn user_orgs_lists_whole_by_org_name() {
    let config = CompilerConfig::paginated();
    let query = ResourceQuery::new();
    let scope = Scope::new().with_user("u-1");
    let statement = compile_with(config, ResourceKind::UserOrgs, &query, &scope);
    assert_balanced(&statement);
    let sql = statement.sql();
    assert!(sql.starts_with(
        r#"SELECT "policies"."principal_id" AS "principal_id", "policies"."resource_id" AS "org_id""#
    ));
    assert!(sql.contains(
        r#"WHERE (("policies"."resource_type" = $1) AND ("policies"."principal_id" = $2))"#
    ));
    assert!(sql.contains(r#"AS "project_count" FROM "policies" INNER JOIN "roles""#));
    assert!(sql.ends_with(r#"ORDER BY "org_name" ASC"#));
    assert_eq!(statement.params(), &[text("app/organization"), text("u-1")]);
}

#[test]
fn user_orgs_rejects_query_options() {
    let scope = Scope::new().with_user("u-1");
    let acme = Filter::new("org_name", Operator::Eq, "acme");
    let rejected = [
        ("filters", ResourceQuery::new().filter(acme)),
        ("search", ResourceQuery::new().search("acme")),
        ("sort", ResourceQuery::new().sort(SortSpec::asc("org_name"))),
        ("group by", ResourceQuery::new().group_by("org_name")),
        ("limit", ResourceQuery::new().limit(10)),
        ("offset", ResourceQuery::new().offset(10)),
    ];
    for (option, query) in rejected {
        let err = rql::compile(ResourceKind::UserOrgs, &query, &scope).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnsupportedOption {
                resource: "user_orgs".into(),
                option,
            }
        );
        assert!(err.is_bad_request());
    }
}
