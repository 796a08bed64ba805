use criterion::{Criterion, criterion_group, criterion_main};
use rql::{Compiler, Filter, Operator, ResourceKind, ResourceQuery, Scope, SortSpec};
use std::hint::black_box;

fn invoice_query() -> ResourceQuery {
    ResourceQuery::new()
        .filter(Filter::new("amount", Operator::Gte, 1000))
        .filter(Filter::new("state", Operator::In, "draft,open,paid"))
        .search("acme")
        .sort(SortSpec::desc("created_at"))
        .limit(50)
        .offset(100)
}

fn compile(c: &mut Criterion) {
    let compiler = Compiler::default();
    let scope = Scope::org("org-1").with_user("user-1");

    let mut group = c.benchmark_group("compile");
    group.bench_function("org_invoices", |b| {
        let query = invoice_query();
        b.iter(|| {
            black_box(
                compiler
                    .compile(ResourceKind::OrgInvoices, black_box(&query), &scope)
                    .unwrap(),
            )
        });
    });

    group.bench_function("org_billing_windowed", |b| {
        let query = ResourceQuery::new()
            .filter(Filter::new("plan", Operator::Eq, "pro"))
            .search("acme")
            .limit(50);
        b.iter(|| {
            black_box(
                compiler
                    .compile(ResourceKind::OrgBilling, black_box(&query), &scope)
                    .unwrap(),
            )
        });
    });

    group.bench_function("user_projects_correlated", |b| {
        let query = ResourceQuery::new().search("web").limit(20);
        b.iter(|| {
            black_box(
                compiler
                    .compile(ResourceKind::UserProjects, black_box(&query), &scope)
                    .unwrap(),
            )
        });
    });

    group.bench_function("audit_records_group", |b| {
        let query = ResourceQuery::new()
            .filter(Filter::new("actor_type", Operator::Eq, "app/user"))
            .group_by("event");
        b.iter(|| {
            black_box(
                compiler
                    .compile_group(ResourceKind::AuditRecords, black_box(&query), &scope)
                    .unwrap(),
            )
        });
    });
    group.finish();
}

fn parse_and_compile(c: &mut Criterion) {
    let compiler = Compiler::default();
    let scope = Scope::org("org-1");
    let json = r#"{
        "filters": [{"name": "role_names", "operator": "eq", "value": "owner"}],
        "search": "ann",
        "sort": [{"name": "name", "order": "asc"}],
        "limit": 25
    }"#;
    c.bench_function("parse_and_compile/org_users", |b| {
        b.iter(|| {
            let query = ResourceQuery::from_json(black_box(json)).unwrap();
            let statement = compiler.compile(ResourceKind::OrgUsers, &query, &scope);
            black_box(statement.unwrap())
        });
    });
}

criterion_group!(benches, compile, parse_and_compile);
criterion_main!(benches);
