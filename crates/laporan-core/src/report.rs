//! The case report record shared by the editor, the draft store and the print view.

use serde::{Deserialize, Serialize};

use crate::field::{NarrativeField, PersonField, ReportField, SignatureField, SignatureRole};

/// School name pre-filled on a fresh report.
pub const DEFAULT_SCHOOL_NAME: &str = "SK BANDAR SRI DAMANSARA 1";

/// Student or officer the case is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InvolvedPerson {
    pub name: String,
    pub ic_number: String,
    /// Class for a student, post for an officer.
    pub position: String,
}

/// One sign-off box at the foot of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Signature {
    pub name: String,
    pub position: String,
    pub phone: String,
    pub date: String,
}

/// A preliminary case report (Laporan Awal Kes).
///
/// Every field may be empty. Edits never mutate a report in place: use
/// [`with_field`](Self::with_field) to derive the next value.
///
/// The serde shape is strict (no defaults, no unknown keys) so a stored draft
/// that does not match exactly is rejected rather than half-loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CaseReport {
    pub title: String,
    pub school_name: String,
    pub school_code: String,
    /// ISO 8601 calendar date, as typed.
    pub incident_date: String,
    pub school_address: String,
    pub involved_person: InvolvedPerson,
    pub chronology: String,
    pub actions_taken: String,
    pub prepared_by: Signature,
    pub checked_by: Signature,
    pub verified_by: Signature,
}

impl Default for CaseReport {
    fn default() -> Self {
        Self {
            title: String::new(),
            school_name: DEFAULT_SCHOOL_NAME.to_string(),
            school_code: String::new(),
            incident_date: String::new(),
            school_address: String::new(),
            involved_person: InvolvedPerson::default(),
            chronology: String::new(),
            actions_taken: String::new(),
            prepared_by: Signature::default(),
            checked_by: Signature::default(),
            verified_by: Signature::default(),
        }
    }
}

impl CaseReport {
    /// Read a single leaf.
    pub fn get(&self, field: ReportField) -> &str {
        match field {
            ReportField::Title => &self.title,
            ReportField::SchoolName => &self.school_name,
            ReportField::SchoolCode => &self.school_code,
            ReportField::IncidentDate => &self.incident_date,
            ReportField::SchoolAddress => &self.school_address,
            ReportField::Person(PersonField::Name) => &self.involved_person.name,
            ReportField::Person(PersonField::IcNumber) => &self.involved_person.ic_number,
            ReportField::Person(PersonField::Position) => &self.involved_person.position,
            ReportField::Chronology => &self.chronology,
            ReportField::ActionsTaken => &self.actions_taken,
            ReportField::Signature(role, f) => {
                let sig = self.signature(role);
                match f {
                    SignatureField::Name => &sig.name,
                    SignatureField::Position => &sig.position,
                    SignatureField::Phone => &sig.phone,
                    SignatureField::Date => &sig.date,
                }
            }
        }
    }

    /// Copy of `self` with exactly one leaf replaced.
    pub fn with_field(&self, field: ReportField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }

    /// The sign-off slot for `role`.
    pub fn signature(&self, role: SignatureRole) -> &Signature {
        match role {
            SignatureRole::Preparer => &self.prepared_by,
            SignatureRole::Checker => &self.checked_by,
            SignatureRole::Verifier => &self.verified_by,
        }
    }

    pub fn narrative(&self, field: NarrativeField) -> &str {
        self.get(field.field())
    }

    /// Leaves that are empty or whitespace only, in form order.
    pub fn blank_fields(&self) -> Vec<ReportField> {
        ReportField::all()
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    fn slot_mut(&mut self, field: ReportField) -> &mut String {
        match field {
            ReportField::Title => &mut self.title,
            ReportField::SchoolName => &mut self.school_name,
            ReportField::SchoolCode => &mut self.school_code,
            ReportField::IncidentDate => &mut self.incident_date,
            ReportField::SchoolAddress => &mut self.school_address,
            ReportField::Person(PersonField::Name) => &mut self.involved_person.name,
            ReportField::Person(PersonField::IcNumber) => &mut self.involved_person.ic_number,
            ReportField::Person(PersonField::Position) => &mut self.involved_person.position,
            ReportField::Chronology => &mut self.chronology,
            ReportField::ActionsTaken => &mut self.actions_taken,
            ReportField::Signature(role, f) => {
                let sig = match role {
                    SignatureRole::Preparer => &mut self.prepared_by,
                    SignatureRole::Checker => &mut self.checked_by,
                    SignatureRole::Verifier => &mut self.verified_by,
                };
                match f {
                    SignatureField::Name => &mut sig.name,
                    SignatureField::Position => &mut sig.position,
                    SignatureField::Phone => &mut sig.phone,
                    SignatureField::Date => &mut sig.date,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled() -> CaseReport {
        ReportField::all()
            .into_iter()
            .fold(CaseReport::default(), |r, f| {
                let v = format!("v:{}", f.path());
                r.with_field(f, v)
            })
    }

    #[test]
    fn defaults_only_carry_school_name() {
        let r = CaseReport::default();
        assert_eq!(r.school_name, DEFAULT_SCHOOL_NAME);
        let blanks = r.blank_fields();
        assert_eq!(blanks.len(), 21);
        assert!(!blanks.contains(&ReportField::SchoolName));
    }

    #[test]
    fn nested_edit_keeps_siblings() {
        let r = CaseReport::default()
            .with_field(ReportField::Person(PersonField::IcNumber), "900101-10-1234");
        let r2 = r.with_field(ReportField::Person(PersonField::Name), "Ali bin Abu");
        assert_eq!(r2.involved_person.name, "Ali bin Abu");
        assert_eq!(r2.involved_person.ic_number, "900101-10-1234");
        // Source value untouched.
        assert_eq!(r.involved_person.name, "");
    }

    #[test]
    fn signature_slots_are_distinct() {
        let r = CaseReport::default().with_field(
            ReportField::Signature(SignatureRole::Checker, SignatureField::Name),
            "Puan Siti",
        );
        assert_eq!(r.checked_by.name, "Puan Siti");
        assert_eq!(r.prepared_by.name, "");
        assert_eq!(r.verified_by.name, "");
    }

    #[test]
    fn json_uses_camel_case() {
        let r = CaseReport::default().with_field(ReportField::ActionsTaken, "1. Hubungi ibu bapa");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["schoolName"], DEFAULT_SCHOOL_NAME);
        assert_eq!(v["actionsTaken"], "1. Hubungi ibu bapa");
        assert!(v["involvedPerson"].get("icNumber").is_some());
        assert!(v["preparedBy"].get("phone").is_some());
    }

    #[test]
    fn strict_shape_rejects_missing_and_extra_fields() {
        let mut v = serde_json::to_value(CaseReport::default()).unwrap();
        v.as_object_mut().unwrap().remove("chronology");
        assert!(serde_json::from_value::<CaseReport>(v).is_err());

        let mut v = serde_json::to_value(CaseReport::default()).unwrap();
        v["extra"] = serde_json::json!(1);
        assert!(serde_json::from_value::<CaseReport>(v).is_err());

        let mut v = serde_json::to_value(CaseReport::default()).unwrap();
        v["title"] = serde_json::json!(42);
        assert!(serde_json::from_value::<CaseReport>(v).is_err());
    }

    proptest! {
        #[test]
        fn edit_changes_exactly_one_leaf(
            target in proptest::sample::select(ReportField::all()),
            value in ".{0,40}",
        ) {
            let before = filled();
            let after = before.with_field(target, value.clone());
            prop_assert_eq!(after.get(target), value.as_str());
            for other in ReportField::all().into_iter().filter(|f| *f != target) {
                prop_assert_eq!(after.get(other), before.get(other), "leaf {} changed", other);
            }
        }
    }
}
