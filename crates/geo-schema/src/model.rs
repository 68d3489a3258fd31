//! Schema model definitions

use std::fmt;

use serde_json::Value;

/// A declared JSON type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Integer,
    Number,
    String,
    Null,
    /// Any type the validator does not implement (`boolean`, `object`, ...).
    Other(String),
}

impl TypeName {
    pub fn parse(name: &str) -> Self {
        match name {
            "integer" => Self::Integer,
            "number" => Self::Number,
            "string" => Self::String,
            "null" => Self::Null,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Null => "null",
            Self::Other(name) => name,
        }
    }
}

/// Which check a non-null value is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDispatch {
    Integer,
    Number,
    String,
    /// Declared types exist but none is implemented.
    Unsupported,
    /// No type, or only `null`: nothing to check.
    Unchecked,
}

/// The union of types declared for a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet {
    types: Vec<TypeName>,
}

impl TypeSet {
    pub fn new(types: Vec<TypeName>) -> Self {
        Self { types }
    }

    /// Build from type names, e.g. `&["string", "null"]`.
    pub fn of(names: &[&str]) -> Self {
        Self::new(names.iter().map(|n| TypeName::parse(n)).collect())
    }

    pub fn types(&self) -> &[TypeName] {
        &self.types
    }

    /// `null` is allowed when declared, or when no type is declared at all.
    pub fn allows_null(&self) -> bool {
        self.types.is_empty() || self.types.contains(&TypeName::Null)
    }

    /// Integer wins over number, number over string.
    pub fn dispatch(&self) -> TypeDispatch {
        if self.types.contains(&TypeName::Integer) {
            TypeDispatch::Integer
        } else if self.types.contains(&TypeName::Number) {
            TypeDispatch::Number
        } else if self.types.contains(&TypeName::String) {
            TypeDispatch::String
        } else if self.types.iter().any(|t| *t != TypeName::Null) {
            TypeDispatch::Unsupported
        } else {
            TypeDispatch::Unchecked
        }
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types.iter().map(TypeName::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// String formats recognised by the `format` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFormat {
    DateTime,
    /// Unrecognised formats are carried but not checked.
    Other(String),
}

impl FieldFormat {
    pub fn parse(name: &str) -> Self {
        match name {
            "date-time" => Self::DateTime,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One typed check attached to a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Type(TypeSet),
    MaxLength(usize),
    Enum(Vec<Value>),
    Format(FieldFormat),
}

/// A property and its constraint list.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Shorthand for `with(Constraint::Type(TypeSet::of(names)))`.
    #[must_use]
    pub fn typed(self, names: &[&str]) -> Self {
        self.with(Constraint::Type(TypeSet::of(names)))
    }

    #[must_use]
    pub fn max_length(self, len: usize) -> Self {
        self.with(Constraint::MaxLength(len))
    }

    #[must_use]
    pub fn date_time(self) -> Self {
        self.with(Constraint::Format(FieldFormat::DateTime))
    }

    pub fn type_set(&self) -> Option<&TypeSet> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Type(set) => Some(set),
            _ => None,
        })
    }
}

/// Validation schema of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub name: String,
    pub required: Vec<String>,
    pub properties: Vec<PropertyDef>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_required(mut self, keys: &[&str]) -> Self {
        self.required.extend(keys.iter().map(|k| (*k).to_string()));
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}
