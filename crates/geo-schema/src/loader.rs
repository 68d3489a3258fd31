//! Schema loader
//!
//! Reads JSON Schema documents (JSON or YAML) and lowers the honored keyword
//! subset into [`Schema`]. Unknown keywords are ignored; a keyword with an
//! unusable value (a non-integer `maxLength`, an empty `enum`) is dropped
//! rather than rejected.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::model::{Constraint, FieldFormat, PropertyDef, Schema, TypeName, TypeSet};
use crate::{Error, Result};

/// Serializable schema document
#[derive(Debug, Deserialize)]
struct SchemaFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: Map<String, Value>,
}

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads entity schemas from a spec directory
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    spec_dir: PathBuf,
}

impl SchemaLoader {
    pub fn new(spec_dir: impl Into<PathBuf>) -> Self {
        Self {
            spec_dir: spec_dir.into(),
        }
    }

    /// Path of the schema document for `entity`, trying `.json`, `.yaml`,
    /// then `.yml`. Returns the `.json` path when none exists.
    pub fn locate(&self, entity: &str) -> PathBuf {
        EXTENSIONS
            .iter()
            .map(|ext| self.spec_dir.join(format!("{entity}.{ext}")))
            .find(|path| path.exists())
            .unwrap_or_else(|| self.spec_dir.join(format!("{entity}.json")))
    }

    /// Load the schema for `entity` from the spec directory
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no document exists, [`Error::InvalidFormat`]
    /// when it does not parse.
    pub fn load(&self, entity: &str) -> Result<Schema> {
        let path = self.locate(entity);
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let mut schema = self.load_from_file(&path)?;
        if schema.name.is_empty() {
            schema.name = entity.to_string();
        }
        Ok(schema)
    }

    /// Load a schema from a specific file path
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load_from_file(&self, path: &Path) -> Result<Schema> {
        trace!(path = %path.display(), "Loading schema file");
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            self.load_from_yaml(&content)
        } else {
            self.load_from_json(&content)
        }
    }

    /// Load a schema from JSON string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] when the document does not parse.
    pub fn load_from_json(&self, json: &str) -> Result<Schema> {
        let file: SchemaFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;
        Ok(convert_schema_file(file))
    }

    /// Load a schema from YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] when the document does not parse.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<Schema> {
        let file: SchemaFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;
        Ok(convert_schema_file(file))
    }
}

fn convert_schema_file(file: SchemaFile) -> Schema {
    let properties: Vec<PropertyDef> = file
        .properties
        .into_iter()
        .map(|(name, prop)| convert_property(name, &prop))
        .collect();

    debug!(
        title = file.title.as_deref().unwrap_or(""),
        properties = properties.len(),
        required = file.required.len(),
        "Converted schema document"
    );

    Schema {
        name: file.title.unwrap_or_default(),
        required: file.required,
        properties,
    }
}

fn convert_property(name: String, prop: &Value) -> PropertyDef {
    let mut def = PropertyDef::new(name);

    let types = match prop.get("type") {
        Some(Value::String(t)) if !t.is_empty() => vec![TypeName::parse(t)],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(t) => TypeName::parse(t),
                other => TypeName::Other(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    };
    def = def.with(Constraint::Type(TypeSet::new(types)));

    if let Some(max) = prop.get("maxLength").and_then(Value::as_u64) {
        def = def.max_length(usize::try_from(max).unwrap_or(usize::MAX));
    }

    if let Some(Value::String(format)) = prop.get("format") {
        def = def.with(Constraint::Format(FieldFormat::parse(format)));
    }

    if let Some(Value::Array(values)) = prop.get("enum") {
        if !values.is_empty() {
            def = def.with(Constraint::Enum(values.clone()));
        }
    }

    def
}
