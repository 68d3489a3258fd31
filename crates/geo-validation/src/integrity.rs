//! Table-level integrity checks: primary-key uniqueness and foreign keys

use std::collections::{BTreeSet, HashMap, HashSet};

use geo_model::{Record, as_integer};
use serde_json::Value;
use tracing::debug;

use crate::engine::row_context;
use crate::reporter::{Issue, IssueKind};

/// Check that every row has an integer `id` and that no id repeats.
///
/// A row without a usable id gets its own error and is left out of the
/// duplicate scan. Duplicates are collected over the whole table and
/// reported once, as a sorted list of distinct ids.
#[must_use]
pub fn check_unique_ids(table: &str, rows: &[Value]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();

    for (idx, row) in rows.iter().enumerate() {
        let Some(id) = row.get("id").and_then(as_integer) else {
            issues.push(
                Issue::error(
                    IssueKind::InvalidId,
                    row_context(table, idx + 1),
                    "missing/invalid id",
                )
                .with_field("id"),
            );
            continue;
        };
        if !seen.insert(id) {
            duplicates.insert(id);
        }
    }

    if !duplicates.is_empty() {
        let ids: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
        issues.push(
            Issue::error(
                IssueKind::DuplicateId,
                format!("[{table}]"),
                format!("duplicate id(s): [{}]", ids.join(", ")),
            )
            .with_field("id"),
        );
    }

    debug!(table, rows = rows.len(), duplicates = duplicates.len(), "Checked id uniqueness");
    issues
}

/// Check that `fk_field` of every child row names an existing parent.
///
/// One error per child row whose key is missing or not an integer, and one
/// per child row whose key is absent from `parent_index`.
#[must_use]
pub fn check_foreign_keys(
    child_table: &str,
    child_rows: &[Value],
    fk_field: &str,
    parent_table: &str,
    parent_index: &HashMap<i64, &Record>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, row) in child_rows.iter().enumerate() {
        let context = row_context(child_table, idx + 1);
        match row.get(fk_field).and_then(as_integer) {
            None => issues.push(
                Issue::error(
                    IssueKind::InvalidForeignKey,
                    context,
                    format!("{fk_field} missing/invalid"),
                )
                .with_field(fk_field),
            ),
            Some(fk) if !parent_index.contains_key(&fk) => issues.push(
                Issue::error(
                    IssueKind::DanglingForeignKey,
                    context,
                    format!("{fk_field}={fk} not found in {parent_table}.id"),
                )
                .with_field(fk_field),
            ),
            Some(_) => {}
        }
    }

    debug!(
        child_table,
        parent_table,
        fk_field,
        issues = issues.len(),
        "Checked foreign keys"
    );
    issues
}
