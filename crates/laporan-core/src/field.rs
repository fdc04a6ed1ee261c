//! Addressing for every editable leaf of a [`CaseReport`](crate::CaseReport).
//!
//! A leaf is named by a dotted path that mirrors the JSON encoding:
//! `title`, `involvedPerson.icNumber`, `checkedBy.phone`, ...

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldParseError {
    #[error("unknown report field: {0}")]
    UnknownField(String),
    #[error("unknown narrative field: {0} (expected chronology or actions)")]
    UnknownNarrative(String),
}

// ── Signature roles ──

/// One of the three fixed slots in the sign-off chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureRole {
    Preparer,
    Checker,
    Verifier,
}

impl SignatureRole {
    /// Approval order: preparer, then checker, then verifier.
    pub const CHAIN: [SignatureRole; 3] = [Self::Preparer, Self::Checker, Self::Verifier];

    /// JSON key of the slot.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Preparer => "preparedBy",
            Self::Checker => "checkedBy",
            Self::Verifier => "verifiedBy",
        }
    }

    /// Caption printed above the signature box.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Preparer => "Disediakan oleh",
            Self::Checker => "Disemak oleh",
            Self::Verifier => "Disahkan oleh",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::CHAIN.into_iter().find(|r| r.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureField {
    Name,
    Position,
    Phone,
    Date,
}

impl SignatureField {
    pub const ALL: [SignatureField; 4] = [Self::Name, Self::Position, Self::Phone, Self::Date];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Position => "position",
            Self::Phone => "phone",
            Self::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Name,
    IcNumber,
    Position,
}

impl PersonField {
    pub const ALL: [PersonField; 3] = [Self::Name, Self::IcNumber, Self::Position];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::IcNumber => "icNumber",
            Self::Position => "position",
        }
    }
}

// ── Report leaves ──

/// A single leaf field of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    Title,
    SchoolName,
    SchoolCode,
    IncidentDate,
    SchoolAddress,
    Person(PersonField),
    Chronology,
    ActionsTaken,
    Signature(SignatureRole, SignatureField),
}

impl ReportField {
    /// Every leaf, in form order.
    pub fn all() -> Vec<ReportField> {
        let mut fields = vec![
            Self::Title,
            Self::SchoolName,
            Self::SchoolCode,
            Self::IncidentDate,
            Self::SchoolAddress,
        ];
        fields.extend(PersonField::ALL.into_iter().map(Self::Person));
        fields.push(Self::Chronology);
        fields.push(Self::ActionsTaken);
        for role in SignatureRole::CHAIN {
            fields.extend(
                SignatureField::ALL
                    .into_iter()
                    .map(move |f| Self::Signature(role, f)),
            );
        }
        fields
    }

    /// Dotted path, e.g. `involvedPerson.icNumber`.
    pub fn path(&self) -> String {
        match self {
            Self::Title => "title".into(),
            Self::SchoolName => "schoolName".into(),
            Self::SchoolCode => "schoolCode".into(),
            Self::IncidentDate => "incidentDate".into(),
            Self::SchoolAddress => "schoolAddress".into(),
            Self::Person(f) => format!("involvedPerson.{}", f.key()),
            Self::Chronology => "chronology".into(),
            Self::ActionsTaken => "actionsTaken".into(),
            Self::Signature(role, f) => format!("{}.{}", role.key(), f.key()),
        }
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for ReportField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || FieldParseError::UnknownField(s.to_string());
        let s = s.trim();

        let Some((head, leaf)) = s.split_once('.') else {
            return match s {
                "title" => Ok(Self::Title),
                "schoolName" => Ok(Self::SchoolName),
                "schoolCode" => Ok(Self::SchoolCode),
                "incidentDate" => Ok(Self::IncidentDate),
                "schoolAddress" => Ok(Self::SchoolAddress),
                "chronology" => Ok(Self::Chronology),
                "actionsTaken" => Ok(Self::ActionsTaken),
                _ => Err(unknown()),
            };
        };

        if head == "involvedPerson" {
            return PersonField::ALL
                .into_iter()
                .find(|f| f.key() == leaf)
                .map(Self::Person)
                .ok_or_else(unknown);
        }

        let role = SignatureRole::from_key(head).ok_or_else(unknown)?;
        SignatureField::ALL
            .into_iter()
            .find(|f| f.key() == leaf)
            .map(|f| Self::Signature(role, f))
            .ok_or_else(unknown)
    }
}

// ── Narrative fields ──

/// The two free-text fields that can be sent for polishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrativeField {
    Chronology,
    Actions,
}

impl NarrativeField {
    pub const ALL: [NarrativeField; 2] = [Self::Chronology, Self::Actions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chronology => "chronology",
            Self::Actions => "actions",
        }
    }

    /// Section heading used in the printed report and in the polishing prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Chronology => "Kronologi Kes",
            Self::Actions => "Tindakan Sekolah",
        }
    }

    /// The report leaf this narrative lives in.
    pub fn field(&self) -> ReportField {
        match self {
            Self::Chronology => ReportField::Chronology,
            Self::Actions => ReportField::ActionsTaken,
        }
    }
}

impl fmt::Display for NarrativeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NarrativeField {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "chronology" => Ok(Self::Chronology),
            "actions" | "actionsTaken" => Ok(Self::Actions),
            other => Err(FieldParseError::UnknownNarrative(other.to_string())),
        }
    }
}
