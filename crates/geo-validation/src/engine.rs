//! Schema validator
//!
//! Checks one record against one [`Schema`] and returns every violation it
//! finds. Never stops at the first problem and never fails: the result is
//! always the complete, ordered list.
//!
//! Order of findings for a record: missing required keys (schema order),
//! unknown keys (record order), then per declared property (schema order)
//! its null/type check, string checks, and enum check.

use geo_model::{Record, is_integer, is_number};
use geo_schema::{Constraint, FieldFormat, PropertyDef, Schema, TypeDispatch, TypeSet};
use serde_json::Value;
use tracing::trace;

use crate::reporter::{Issue, IssueKind};
use crate::rules::{has_edge_whitespace, is_iso8601_datetime, json_eq};

/// Validate one record against `schema`. `context` prefixes every issue,
/// e.g. `[provinces] row 3`.
#[must_use]
pub fn validate_record(record: &Record, schema: &Schema, context: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    for key in &schema.required {
        if !record.contains_key(key) {
            issues.push(
                Issue::error(
                    IssueKind::MissingRequired,
                    context,
                    format!("missing required key '{key}'"),
                )
                .with_field(key),
            );
        }
    }

    for key in record.keys() {
        if !schema.has_property(key) {
            issues.push(
                Issue::warning(
                    IssueKind::UnknownKey,
                    context,
                    format!("unknown key '{key}' not in schema"),
                )
                .with_field(key),
            );
        }
    }

    for property in &schema.properties {
        if let Some(value) = record.get(&property.name) {
            check_property(property, value, context, &mut issues);
        }
    }

    trace!(context, issues = issues.len(), "Validated record");
    issues
}

/// Validate every row of a table. Rows that are not JSON objects are
/// reported and skipped; rows are numbered from 1.
#[must_use]
pub fn validate_rows(table: &str, rows: &[Value], schema: &Schema) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let context = row_context(table, idx + 1);
        match row.as_object() {
            Some(record) => issues.extend(validate_record(record, schema, &context)),
            None => issues.push(Issue::error(
                IssueKind::NotAnObject,
                context,
                "item must be an object",
            )),
        }
    }
    issues
}

/// `[table] row N`
pub fn row_context(table: &str, row: usize) -> String {
    format!("[{table}] row {row}")
}

fn check_property(property: &PropertyDef, value: &Value, context: &str, issues: &mut Vec<Issue>) {
    let key = property.name.as_str();
    let unconstrained = TypeSet::default();
    let types = property.type_set().unwrap_or(&unconstrained);

    if value.is_null() {
        if !types.allows_null() {
            issues.push(
                Issue::error(
                    IssueKind::NullNotAllowed,
                    context,
                    format!("key '{key}' is null but schema type disallows null"),
                )
                .with_field(key),
            );
        }
        return;
    }

    let mismatch = |expected: &str| {
        Issue::error(
            IssueKind::TypeMismatch,
            context,
            format!("key '{key}' should be {expected}"),
        )
        .with_field(key)
    };

    match types.dispatch() {
        TypeDispatch::Integer => {
            if !is_integer(value) {
                issues.push(mismatch("integer"));
            }
        }
        TypeDispatch::Number => {
            if !is_number(value) {
                issues.push(mismatch("number"));
            }
        }
        TypeDispatch::String => match value.as_str() {
            Some(text) => check_string(property, text, context, issues),
            None => issues.push(mismatch("string")),
        },
        TypeDispatch::Unsupported => issues.push(
            Issue::warning(
                IssueKind::UnsupportedType,
                context,
                format!("key '{key}' type {types} not fully validated by lightweight validator"),
            )
            .with_field(key),
        ),
        TypeDispatch::Unchecked => {}
    }

    for constraint in &property.constraints {
        if let Constraint::Enum(allowed) = constraint {
            if !allowed.iter().any(|candidate| json_eq(candidate, value)) {
                issues.push(
                    Issue::error(
                        IssueKind::EnumViolation,
                        context,
                        format!("key '{key}' not in enum {}", Value::Array(allowed.clone())),
                    )
                    .with_field(key),
                );
            }
        }
    }
}

fn check_string(property: &PropertyDef, text: &str, context: &str, issues: &mut Vec<Issue>) {
    let key = property.name.as_str();

    for constraint in &property.constraints {
        if let Constraint::MaxLength(max) = constraint {
            if text.chars().count() > *max {
                issues.push(
                    Issue::error(
                        IssueKind::MaxLength,
                        context,
                        format!("key '{key}' exceeds maxLength {max}"),
                    )
                    .with_field(key),
                );
            }
        }
    }

    if has_edge_whitespace(text) {
        issues.push(
            Issue::warning(
                IssueKind::Whitespace,
                context,
                format!("key '{key}' has leading/trailing spaces"),
            )
            .with_field(key),
        );
    }

    let wants_date_time = property
        .constraints
        .iter()
        .any(|c| *c == Constraint::Format(FieldFormat::DateTime));
    if wants_date_time && !is_iso8601_datetime(text) {
        issues.push(
            Issue::error(
                IssueKind::InvalidDateTime,
                context,
                format!("key '{key}' not valid ISO8601 date-time"),
            )
            .with_field(key),
        );
    }
}
