// Fri Apr 17 2026 - Alex

use crate::error::Result;
use crate::klass::KlassKind;
use crate::layout::{LayoutProfile, SerializableLayout};
use crate::metadata::MetaspaceObjType;
use crate::validation::report::{IssueKind, ValidationIssue, ValidationReport};

/// Compares a live profile against reference layouts captured from a
/// known-good target build. This is the only guard against the
/// layout-mismatch failure mode: a wrong field table reads garbage without
/// tripping any runtime check, so the comparison runs before any cast is
/// trusted.
pub struct LayoutChecker<'a> {
    profile: &'a LayoutProfile,
}

impl<'a> LayoutChecker<'a> {
    pub fn new(profile: &'a LayoutProfile) -> Self {
        Self { profile }
    }

    pub fn check_against(&self, reference: &[SerializableLayout]) -> ValidationReport {
        let mut report = ValidationReport::new();
        for golden in reference {
            self.check_type(golden, &mut report);
        }
        report
    }

    pub fn check_against_json(&self, json: &str) -> serde_json::Result<ValidationReport> {
        let reference = SerializableLayout::from_json(json)?;
        Ok(self.check_against(&reference))
    }

    fn check_type(&self, golden: &SerializableLayout, report: &mut ValidationReport) {
        let layout = match self.profile.layout(&golden.name) {
            Ok(layout) => layout,
            Err(_) => {
                report.record(ValidationIssue {
                    type_name: golden.name.clone(),
                    field: None,
                    kind: IssueKind::MissingType,
                    expected: golden.size,
                    found: 0,
                });
                return;
            }
        };
        report.count_type();

        if layout.size() != golden.size {
            report.record(ValidationIssue {
                type_name: golden.name.clone(),
                field: None,
                kind: IssueKind::SizeMismatch,
                expected: golden.size,
                found: layout.size(),
            });
        }

        for golden_field in &golden.fields {
            let field = match layout.field(&golden_field.name) {
                Some(field) => field,
                None => {
                    report.record(ValidationIssue {
                        type_name: golden.name.clone(),
                        field: Some(golden_field.name.clone()),
                        kind: IssueKind::MissingField,
                        expected: golden_field.offset,
                        found: 0,
                    });
                    continue;
                }
            };
            report.count_field();
            if field.offset() != golden_field.offset {
                report.record(ValidationIssue {
                    type_name: golden.name.clone(),
                    field: Some(golden_field.name.clone()),
                    kind: IssueKind::OffsetMismatch,
                    expected: golden_field.offset,
                    found: field.offset(),
                });
            }
            if field.size() != golden_field.size {
                report.record(ValidationIssue {
                    type_name: golden.name.clone(),
                    field: Some(golden_field.name.clone()),
                    kind: IssueKind::FieldSizeMismatch,
                    expected: golden_field.size,
                    found: field.size(),
                });
            }
        }

        for field in layout.fields() {
            if !golden.fields.iter().any(|g| g.name == field.name()) {
                report.record(ValidationIssue {
                    type_name: golden.name.clone(),
                    field: Some(field.name().to_string()),
                    kind: IssueKind::ExtraField,
                    expected: 0,
                    found: field.offset(),
                });
            }
        }
    }
}

/// Raw-tag check for a descriptor kind word pulled out of a capture.
pub fn check_klass_kind(raw: u32) -> Result<KlassKind> {
    KlassKind::try_from(raw)
}

/// Raw-tag check for a metaspace record type word.
pub fn check_metaspace_type(raw: u32) -> Result<MetaspaceObjType> {
    MetaspaceObjType::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jtypes::PointerWidth;

    #[test]
    fn test_profile_matches_own_capture() {
        let profile = LayoutProfile::build(PointerWidth::P64);
        let captured = SerializableLayout::capture_profile(&profile);
        let report = LayoutChecker::new(&profile).check_against(&captured);
        assert!(report.passed(), "{}", report);
        assert_eq!(report.types_checked(), profile.len());
    }

    #[test]
    fn test_width_mismatch_detected() {
        // A 32-bit reference against a 64-bit profile must light up.
        let profile64 = LayoutProfile::build(PointerWidth::P64);
        let profile32 = LayoutProfile::build(PointerWidth::P32);
        let captured32 = SerializableLayout::capture_profile(&profile32);
        let report = LayoutChecker::new(&profile64).check_against(&captured32);
        assert!(!report.passed());
    }

    #[test]
    fn test_perturbed_offset_detected() {
        let profile = LayoutProfile::build(PointerWidth::P64);
        let mut captured = SerializableLayout::capture_profile(&profile);
        let klass = captured.iter_mut().find(|l| l.name == "Klass").unwrap();
        let field = klass.fields.iter_mut().find(|f| f.name == "_name").unwrap();
        field.offset += 8;

        let report = LayoutChecker::new(&profile).check_against(&captured);
        assert!(!report.passed());
        assert_eq!(report.issues().len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.kind, IssueKind::OffsetMismatch);
        assert_eq!(issue.field.as_deref(), Some("_name"));
    }

    #[test]
    fn test_unknown_reference_type_detected() {
        let profile = LayoutProfile::build(PointerWidth::P64);
        let captured = vec![SerializableLayout {
            name: "FieldInfo".into(),
            size: 16,
            alignment: 8,
            fields: vec![],
        }];
        let report = LayoutChecker::new(&profile).check_against(&captured);
        assert!(!report.passed());
        assert_eq!(report.issues()[0].kind, IssueKind::MissingType);
    }

    #[test]
    fn test_json_reference_round_trip() {
        let profile = LayoutProfile::build(PointerWidth::P64);
        let json =
            SerializableLayout::to_json(&SerializableLayout::capture_profile(&profile)).unwrap();
        let report = LayoutChecker::new(&profile).check_against_json(&json).unwrap();
        assert!(report.passed());
    }

    #[test]
    fn test_tag_checks() {
        assert!(check_klass_kind(3).is_ok());
        assert!(check_klass_kind(7).is_err());
        assert!(check_metaspace_type(14).is_ok());
        assert!(check_metaspace_type(15).is_err());
    }
}
