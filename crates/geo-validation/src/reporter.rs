//! Issue collection and reporting
//!
//! Every check in a validation pass appends to one [`ValidationReport`].
//! Issues are kept in the order they were raised, split only by severity;
//! nothing is merged, deduplicated, or dropped.

use std::fmt;

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks export
    Error,
    /// Reported, blocks export only when warnings are escalated
    Warning,
}

/// What a check found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MissingFile,
    ParseError,
    NotAnArray,
    NotAnObject,
    MissingSchema,
    MissingRequired,
    UnknownKey,
    NullNotAllowed,
    TypeMismatch,
    MaxLength,
    InvalidDateTime,
    EnumViolation,
    UnsupportedType,
    Whitespace,
    InvalidId,
    DuplicateId,
    InvalidForeignKey,
    DanglingForeignKey,
    InvalidZipCode,
    InvalidLatitude,
    InvalidLongitude,
    UnresolvedEmbed,
}

impl IssueKind {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingFile => "MISSING_FILE",
            Self::ParseError => "PARSE_ERROR",
            Self::NotAnArray => "NOT_AN_ARRAY",
            Self::NotAnObject => "NOT_AN_OBJECT",
            Self::MissingSchema => "MISSING_SCHEMA",
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::UnknownKey => "UNKNOWN_KEY",
            Self::NullNotAllowed => "NULL_VALUE",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::MaxLength => "MAX_LENGTH",
            Self::InvalidDateTime => "INVALID_DATE_TIME",
            Self::EnumViolation => "ENUM_VIOLATION",
            Self::UnsupportedType => "UNSUPPORTED_TYPE",
            Self::Whitespace => "WHITESPACE",
            Self::InvalidId => "INVALID_ID",
            Self::DuplicateId => "DUPLICATE_ID",
            Self::InvalidForeignKey => "INVALID_FOREIGN_KEY",
            Self::DanglingForeignKey => "DANGLING_FOREIGN_KEY",
            Self::InvalidZipCode => "INVALID_ZIP_CODE",
            Self::InvalidLatitude => "INVALID_LATITUDE",
            Self::InvalidLongitude => "INVALID_LONGITUDE",
            Self::UnresolvedEmbed => "UNRESOLVED_EMBED",
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Where it was found, e.g. `[provinces] row 3` or a file path
    pub context: String,
    /// The field involved, when there is one
    pub field: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn error(kind: IssueKind, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            context: context.into(),
            field: None,
            message: message.into(),
        }
    }

    pub fn warning(kind: IssueKind, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            context: context.into(),
            field: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.context, self.message)
        }
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Self::Pass
    }
}

/// Accumulated errors and warnings of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one issue to the sequence of its severity
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// Shorthand for pushing an error
    pub fn error(&mut self, kind: IssueKind, context: impl Into<String>, message: impl Into<String>) {
        self.push(Issue::error(kind, context, message));
    }

    /// Shorthand for pushing a warning
    pub fn warn(&mut self, kind: IssueKind, context: impl Into<String>, message: impl Into<String>) {
        self.push(Issue::warning(kind, context, message));
    }

    /// Move every issue of `other` into this report, in order
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Pass only with no errors and, unless `allow_warnings`, no warnings
    pub fn passed(&self, allow_warnings: bool) -> bool {
        !self.has_errors() && (allow_warnings || !self.has_warnings())
    }

    /// [`Verdict`] for a run that does or does not escalate warnings
    pub fn verdict(&self, fail_on_warn: bool) -> Verdict {
        if self.passed(!fail_on_warn) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

impl Extend<Issue> for ValidationReport {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        for issue in iter {
            self.push(issue);
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Errors: {}", self.errors.len())?;
        for issue in &self.errors {
            writeln!(f, "  - {issue}")?;
        }
        writeln!(f, "Warnings: {}", self.warnings.len())?;
        for issue in &self.warnings {
            writeln!(f, "  - {issue}")?;
        }
        Ok(())
    }
}
