use rql_core::ToSQL;
use rql_core::expr::{self, Direction};

use super::predicate::{Sql, Term};
use crate::error::{CompileError, FieldContext, Result};
use crate::query::{SortOrder, SortSpec};
use crate::schema::{FieldDescriptor, ResourceSchema};

/// ORDER BY entries: the group key first, then each explicit spec in order.
/// The resource's default order applies only when nothing else does.
///
/// `physical` selects qualified base columns; otherwise entries name the
/// output columns of the statement.
pub(crate) fn compile_sort(
    schema: &ResourceSchema,
    specs: &[SortSpec],
    group_key: Option<&FieldDescriptor>,
    physical: bool,
) -> Result<Vec<Sql>> {
    let term = |field: &FieldDescriptor| match field.column_ref() {
        Some(column) if physical => Term::Column(column),
        _ => Term::Alias(field.output_name()),
    };

    let mut entries = Vec::with_capacity(specs.len() + 1);
    if let Some(key) = group_key {
        entries.push(expr::ordered(term(key).into_sql(), Direction::Asc));
    }
    for spec in specs {
        let field = schema
            .get(&spec.name)
            .filter(|field| field.sortable)
            .ok_or_else(|| {
                CompileError::unsupported_field(schema.name(), &spec.name, FieldContext::Sort)
            })?;
        let direction = match spec.order {
            SortOrder::Asc => Direction::Asc,
            SortOrder::Desc => Direction::Desc,
            SortOrder::Unspecified => continue,
        };
        entries.push(expr::ordered(term(field).into_sql(), direction));
    }
    if entries.is_empty() {
        for default in schema.default_orders() {
            if let Some(field) = schema.get(default.field) {
                entries.push(expr::ordered(term(field).into_sql(), default.direction));
            }
        }
    }
    Ok(entries)
}
