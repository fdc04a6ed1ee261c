pub mod editor;
pub mod field;
pub mod report;

pub use editor::{Editor, PolishOutcome, PolishTicket, StalePolicy};
pub use field::{
    FieldParseError, NarrativeField, PersonField, ReportField, SignatureField, SignatureRole,
};
pub use report::{CaseReport, DEFAULT_SCHOOL_NAME, InvolvedPerson, Signature};
