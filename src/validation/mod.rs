// Fri Apr 17 2026 - Alex

pub mod checker;
pub mod report;

pub use checker::{check_klass_kind, check_metaspace_type, LayoutChecker};
pub use report::{IssueKind, ValidationIssue, ValidationReport};
