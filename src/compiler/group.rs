use crate::error::{CompileError, FieldContext, Result};
use crate::schema::{FieldDescriptor, ResourceSchema};

/// Validates the group-by list: at most one key, which must be groupable.
pub(crate) fn group_key<'s>(
    schema: &'s ResourceSchema,
    keys: &[String],
) -> Result<Option<&'s FieldDescriptor>> {
    match keys {
        [] => Ok(None),
        [key] => {
            let field = schema.resolve(key, FieldContext::GroupBy)?;
            if !field.groupable {
                return Err(CompileError::unsupported_field(
                    schema.name(),
                    key,
                    FieldContext::GroupBy,
                ));
            }
            Ok(Some(field))
        }
        _ => Err(CompileError::TooManyGroupKeys { count: keys.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BaseSource, DataType, JoinedSource, TableRef};

    const EVENTS: TableRef = TableRef::new("events");

    fn events() -> ResourceSchema {
        let source = BaseSource::Joined(JoinedSource::new(EVENTS, &[]));
        let kind = FieldDescriptor::column("kind", EVENTS.col("kind"), DataType::String);
        let id = FieldDescriptor::column("id", EVENTS.col("id"), DataType::String);
        ResourceSchema::new("events", source).fields([kind.groupable(), id])
    }

    #[test]
    fn keys() {
        let schema = events();
        assert!(group_key(&schema, &[]).unwrap().is_none());
        let kind = group_key(&schema, &["kind".to_owned()]).unwrap();
        assert_eq!(kind.unwrap().name, "kind");
        assert_eq!(
            group_key(&schema, &["kind".to_owned(), "id".to_owned()]).unwrap_err(),
            CompileError::TooManyGroupKeys { count: 2 }
        );
        for key in ["id", "missing"] {
            let result = group_key(&schema, &[key.to_owned()]);
            let Err(CompileError::UnsupportedField { context, .. }) = result else {
                panic!("{key} should not group");
            };
            assert_eq!(context, FieldContext::GroupBy);
        }
    }
}
