use super::assemble::Binder;
use super::predicate::Predicate;
use crate::schema::Layer;
use crate::value::Value;

/// One case-insensitive substring match per searchable field, ORed together
/// in declaration order. `None` for an empty term or a resource without
/// searchable fields.
pub(crate) fn compile_search(binder: &Binder<'_>, term: &str) -> Option<(Layer, Predicate)> {
    if term.is_empty() {
        return None;
    }
    let layer = binder.schema.search_layer();
    let pattern = format!("%{term}%");
    let matches: Vec<Predicate> = binder
        .schema
        .searchable()
        .map(|field| Predicate::Like {
            term: binder.field_term(field, layer),
            pattern: Value::Text(pattern.clone()),
            negated: false,
            case_insensitive: true,
        })
        .collect();
    if matches.is_empty() {
        return None;
    }
    Some((layer, Predicate::Or(matches)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        BaseSource, DataType, FieldDescriptor, JoinedSource, Projection, ResourceSchema, Scope,
        TableRef,
    };
    use rql_core::{PlaceholderStyle, ToSQL};

    const NOTES: TableRef = TableRef::new("notes");
    static PROJECTIONS: &[Projection] = &[Projection::column(NOTES.col("body"), "body")];

    fn notes() -> ResourceSchema {
        let source = BaseSource::Joined(JoinedSource::new(NOTES, PROJECTIONS));
        let title = FieldDescriptor::column("title", NOTES.col("title"), DataType::String);
        let size = FieldDescriptor::column("size", NOTES.col("size"), DataType::Number);
        let body = FieldDescriptor::column("body", NOTES.col("body"), DataType::String);
        ResourceSchema::new("notes", source).fields([title.searchable(), size, body.searchable()])
    }

    #[test]
    fn one_term_per_searchable_field() {
        let schema = notes();
        let scope = Scope::new();
        let binder = Binder::new(&schema, &scope).unwrap();
        let (layer, predicate) = compile_search(&binder, "paid").unwrap();
        assert_eq!(layer, Layer::Inner);
        let (sql, params) = predicate
            .into_sql()
            .into_statement(PlaceholderStyle::Numbered)
            .into_parts();
        assert_eq!(
            sql,
            r#"((CAST("notes"."title" AS TEXT) ILIKE $1) OR (CAST("notes"."body" AS TEXT) ILIKE $2))"#
        );
        assert_eq!(params, vec![Value::from("%paid%"), Value::from("%paid%")]);
    }

    #[test]
    fn outer_search_reads_derived_columns() {
        let schema = notes().search_outer();
        let scope = Scope::new();
        let binder = Binder::new(&schema, &scope).unwrap();
        let (layer, predicate) = compile_search(&binder, "x").unwrap();
        assert_eq!(layer, Layer::Outer);
        let sql = predicate.into_sql().sql(PlaceholderStyle::Numbered);
        assert!(sql.starts_with(r#"((CAST("base"."title" AS TEXT) ILIKE $1)"#));
    }

    #[test]
    fn empty_term_or_no_fields_is_noop() {
        let schema = notes();
        let scope = Scope::new();
        let binder = Binder::new(&schema, &scope).unwrap();
        assert!(compile_search(&binder, "").is_none());

        let source = BaseSource::Joined(JoinedSource::new(NOTES, PROJECTIONS));
        let bare = ResourceSchema::new("bare", source);
        let binder = Binder::new(&bare, &scope).unwrap();
        assert!(compile_search(&binder, "x").is_none());
    }
}
