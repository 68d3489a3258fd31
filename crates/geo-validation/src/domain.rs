//! Domain rules that generic schema keywords cannot express

use geo_model::{as_number, cell_text};
use serde_json::Value;

use crate::engine::row_context;
use crate::reporter::{Issue, IssueKind};
use crate::rules::{LATITUDE_RANGE, LONGITUDE_RANGE, has_edge_whitespace, in_range, is_zip_code};

/// Postal code and coordinate checks for sub-district rows.
///
/// `zip_code` is required (absent and `null` both count as missing) and
/// must be five digits after trimming. `lat`/`long` are optional; when
/// present and non-null they must be numbers within range.
#[must_use]
pub fn check_sub_district_fields(table: &str, rows: &[Value]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let context = row_context(table, idx + 1);

        match row.get("zip_code") {
            None | Some(Value::Null) => issues.push(
                Issue::error(IssueKind::InvalidZipCode, context.as_str(), "zip_code missing")
                    .with_field("zip_code"),
            ),
            Some(zip) => {
                let text = cell_text(zip);
                if !is_zip_code(&text) {
                    issues.push(
                        Issue::error(
                            IssueKind::InvalidZipCode,
                            context.as_str(),
                            format!("invalid zip_code '{text}' (expect 5 digits)"),
                        )
                        .with_field("zip_code"),
                    );
                }
            }
        }

        check_coordinate(row, "lat", LATITUDE_RANGE, IssueKind::InvalidLatitude, &context, &mut issues);
        check_coordinate(row, "long", LONGITUDE_RANGE, IssueKind::InvalidLongitude, &context, &mut issues);
    }

    issues
}

fn check_coordinate(
    row: &Value,
    field: &str,
    range: (f64, f64),
    kind: IssueKind,
    context: &str,
    issues: &mut Vec<Issue>,
) {
    let Some(value) = row.get(field).filter(|v| !v.is_null()) else {
        return;
    };
    let valid = as_number(value).is_some_and(|n| in_range(n, range));
    if !valid {
        issues.push(
            Issue::error(kind, context, format!("invalid {field} '{}'", cell_text(value)))
                .with_field(field),
        );
    }
}

/// Whitespace hygiene on designated name fields: a string value that differs
/// from its trimmed form is a warning. Runs independently of the schema
/// validator, so the same value may be reported by both.
#[must_use]
pub fn check_name_whitespace(table: &str, rows: &[Value], fields: &[String]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        for field in fields {
            if let Some(Value::String(text)) = row.get(field.as_str()) {
                if has_edge_whitespace(text) {
                    issues.push(
                        Issue::warning(
                            IssueKind::Whitespace,
                            row_context(table, idx + 1),
                            format!("'{field}' has leading/trailing spaces"),
                        )
                        .with_field(field.as_str()),
                    );
                }
            }
        }
    }
    issues
}
