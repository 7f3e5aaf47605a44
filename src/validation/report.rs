// Fri Apr 17 2026 - Alex

use std::fmt;

/// One disagreement between the live profile and a captured reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub type_name: String,
    pub field: Option<String>,
    pub kind: IssueKind,
    pub expected: u64,
    pub found: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    SizeMismatch,
    OffsetMismatch,
    FieldSizeMismatch,
    MissingType,
    MissingField,
    ExtraField,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = match &self.field {
            Some(field) => format!("{}::{}", self.type_name, field),
            None => self.type_name.clone(),
        };
        match self.kind {
            IssueKind::SizeMismatch => {
                write!(f, "{}: size {} != reference {}", subject, self.found, self.expected)
            }
            IssueKind::OffsetMismatch => {
                write!(f, "{}: offset 0x{:x} != reference 0x{:x}", subject, self.found, self.expected)
            }
            IssueKind::FieldSizeMismatch => {
                write!(f, "{}: field size {} != reference {}", subject, self.found, self.expected)
            }
            IssueKind::MissingType => write!(f, "{}: not modeled by this profile", subject),
            IssueKind::MissingField => write!(f, "{}: missing from this profile", subject),
            IssueKind::ExtraField => write!(f, "{}: not present in the reference", subject),
        }
    }
}

/// Outcome of one golden-layout comparison.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    types_checked: usize,
    fields_checked: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, issue: ValidationIssue) {
        log::warn!("layout validation: {}", issue);
        self.issues.push(issue);
    }

    pub(crate) fn count_type(&mut self) {
        self.types_checked += 1;
    }

    pub(crate) fn count_field(&mut self) {
        self.fields_checked += 1;
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn types_checked(&self) -> usize {
        self.types_checked
    }

    pub fn fields_checked(&self) -> usize {
        self.fields_checked
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Layout validation: {} types, {} fields, {} issues",
            self.types_checked,
            self.fields_checked,
            self.issues.len()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}
