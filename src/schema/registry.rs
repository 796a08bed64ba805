use std::sync::LazyLock;

use hashbrown::HashMap;
use rql_core::expr::Direction;

use crate::error::{CompileError, FieldContext, Result};
use crate::schema::{BaseSource, FieldDescriptor, Layer};

/// A sort applied when the query asks for none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultOrder {
    pub field: &'static str,
    pub direction: Direction,
}

/// The fields and base source of one queryable resource.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    name: &'static str,
    source: BaseSource,
    fields: Vec<FieldDescriptor>,
    index: HashMap<&'static str, usize>,
    default_order: Vec<DefaultOrder>,
    outer_search: bool,
    fixed: bool,
}

impl ResourceSchema {
    pub fn new(name: &'static str, source: BaseSource) -> Self {
        Self {
            name,
            source,
            fields: Vec::new(),
            index: HashMap::new(),
            default_order: Vec::new(),
            outer_search: false,
            fixed: false,
        }
    }

    /// Adds a field. A later field with the same name replaces the earlier
    /// one in place.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        match self.index.get(field.name) {
            Some(&i) => self.fields[i] = field,
            None => {
                self.index.insert(field.name, self.fields.len());
                self.fields.push(field);
            }
        }
        self
    }

    pub fn fields(self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        fields.into_iter().fold(self, Self::field)
    }

    pub fn default_order(mut self, field: &'static str, direction: Direction) -> Self {
        self.default_order.push(DefaultOrder { field, direction });
        self
    }

    /// Searches the wrapped base query even when every searchable field is a
    /// physical column.
    pub fn search_outer(mut self) -> Self {
        self.outer_search = true;
        self
    }

    /// Lists the resource whole: every query option is rejected and no
    /// pagination is applied.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn source(&self) -> &BaseSource {
        &self.source
    }

    /// Fields in declaration order.
    #[inline]
    pub fn all_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[inline]
    pub fn default_orders(&self) -> &[DefaultOrder] {
        &self.default_order
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Looks up a field, rejecting unknown names.
    pub fn resolve(&self, name: &str, context: FieldContext) -> Result<&FieldDescriptor> {
        self.get(name)
            .ok_or_else(|| CompileError::unsupported_field(self.name, name, context))
    }

    pub fn searchable(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.searchable)
    }

    /// Layer the search predicate belongs to.
    pub fn search_layer(&self) -> Layer {
        if self.outer_search || self.searchable().any(|f| f.layer() == Layer::Outer) {
            Layer::Outer
        } else {
            Layer::Inner
        }
    }
}

/// Resource schemas keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemas: HashMap<&'static str, ResourceSchema>,
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    let schemas = crate::resources::all();
    schemas.into_iter().fold(Registry::new(), Registry::with)
});

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of built-in resources.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub fn with(mut self, schema: ResourceSchema) -> Self {
        self.schemas.insert(schema.name(), schema);
        self
    }

    pub fn schema(&self, resource: &str) -> Result<&ResourceSchema> {
        self.schemas
            .get(resource)
            .ok_or_else(|| CompileError::UnknownResource(resource.to_owned()))
    }

    pub fn resolve(
        &self,
        resource: &str,
        name: &str,
        context: FieldContext,
    ) -> Result<&FieldDescriptor> {
        self.schema(resource)?.resolve(name, context)
    }

    pub fn resources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DataType, JoinedSource, Projection, TableRef};

    const ITEMS: TableRef = TableRef::new("items");
    static PROJECTIONS: &[Projection] = &[Projection::column(ITEMS.col("name"), "name")];

    fn items() -> ResourceSchema {
        let source = BaseSource::Joined(JoinedSource::new(ITEMS, PROJECTIONS));
        let name = FieldDescriptor::column("name", ITEMS.col("name"), DataType::String);
        let size = FieldDescriptor::column("size", ITEMS.col("size"), DataType::Number);
        ResourceSchema::new("items", source).fields([name.searchable(), size.sortable()])
    }

    #[test]
    fn resolve_known_and_unknown() {
        let registry = Registry::new().with(items());
        let size = registry.resolve("items", "size", FieldContext::Sort);
        assert_eq!(size.unwrap().data_type, DataType::Number);

        let weight = registry.resolve("items", "weight", FieldContext::Filter);
        assert_eq!(
            weight.unwrap_err(),
            CompileError::UnsupportedField {
                resource: "items".into(),
                field: "weight".into(),
                context: FieldContext::Filter,
            }
        );
        assert_eq!(
            registry.schema("nope").unwrap_err(),
            CompileError::UnknownResource("nope".into())
        );
    }

    #[test]
    fn redeclared_field_keeps_position() {
        let title = FieldDescriptor::column("name", ITEMS.col("title"), DataType::String);
        let schema = items().field(title);
        let names: Vec<_> = schema.all_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["name", "size"]);
        assert!(!schema.get("name").unwrap().searchable);
    }

    #[test]
    fn search_layer_defaults_to_inner() {
        assert_eq!(items().search_layer(), Layer::Inner);
        assert_eq!(items().search_outer().search_layer(), Layer::Outer);
    }

    #[test]
    fn builtin_registry_is_populated() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 13);
        assert!(registry.schema("org_invoices").is_ok());
    }
}
