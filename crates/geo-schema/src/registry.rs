//! Schema registry keyed by entity name

use std::collections::HashMap;

use crate::model::Schema;

/// Registry of loaded schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema
    pub fn register(&mut self, entity: impl Into<String>, schema: Schema) {
        self.schemas.insert(entity.into(), schema);
    }

    /// Builder form of [`SchemaRegistry::register`]
    #[must_use]
    pub fn with(mut self, entity: impl Into<String>, schema: Schema) -> Self {
        self.register(entity, schema);
        self
    }

    /// Get a schema by entity name
    pub fn get(&self, entity: &str) -> Option<&Schema> {
        self.schemas.get(entity)
    }

    /// Check if a schema exists
    pub fn contains(&self, entity: &str) -> bool {
        self.schemas.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
