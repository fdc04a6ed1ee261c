//! Editing session: the single open draft plus per-field polishing flags.
//!
//! The host owns one [`Editor`] and hands out `&`/`&mut` borrows to the form
//! and the print view. Each edit replaces the held [`CaseReport`] wholesale.
//!
//! Polishing is split in two so the network round trip can happen outside
//! the borrow: [`Editor::begin_polish`] marks the field busy and hands back a
//! ticket with the text to send; [`Editor::finish_polish`] applies whatever
//! came back and clears the flag.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::field::{NarrativeField, ReportField};
use crate::report::CaseReport;

/// What to do with a polish result whose field was edited while in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Apply the result regardless; a newer raw edit is overwritten.
    #[default]
    Overwrite,
    /// Drop the result if the field no longer holds the text it was issued for.
    DiscardIfChanged,
}

/// An outstanding polish request for one narrative field.
#[derive(Debug)]
pub struct PolishTicket {
    field: NarrativeField,
    snapshot: String,
}

impl PolishTicket {
    pub fn field(&self) -> NarrativeField {
        self.field
    }

    /// Field text at the moment the request was issued.
    pub fn text(&self) -> &str {
        &self.snapshot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolishOutcome {
    Applied,
    /// Field changed under the request and the policy said to keep the edit.
    Discarded,
}

pub struct Editor {
    report: CaseReport,
    busy: HashSet<NarrativeField>,
    policy: StalePolicy,
    revision: u64,
    saved_revision: Option<u64>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(CaseReport::default())
    }
}

impl Editor {
    pub fn new(report: CaseReport) -> Self {
        Self {
            report,
            busy: HashSet::new(),
            policy: StalePolicy::default(),
            revision: 0,
            saved_revision: None,
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn report(&self) -> &CaseReport {
        &self.report
    }

    /// Bumped on every replacement of the held report.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace one leaf.
    pub fn set(&mut self, field: ReportField, value: impl Into<String>) -> &CaseReport {
        let next = self.report.with_field(field, value);
        self.replace(next);
        &self.report
    }

    /// Swap in a whole new report (e.g. a loaded draft).
    pub fn replace(&mut self, report: CaseReport) {
        self.report = report;
        self.revision += 1;
    }

    /// Back to a fresh report. Busy flags stay: in-flight requests still settle.
    pub fn reset(&mut self) {
        self.replace(CaseReport::default());
        self.saved_revision = None;
    }

    pub fn mark_saved(&mut self) {
        self.saved_revision = Some(self.revision);
    }

    /// True when the held report differs from the last save (or was never saved).
    pub fn is_dirty(&self) -> bool {
        self.saved_revision != Some(self.revision)
    }

    pub fn is_polishing(&self, field: NarrativeField) -> bool {
        self.busy.contains(&field)
    }

    /// Mark `field` busy and snapshot its text. `None` if a request for
    /// this field is already outstanding.
    pub fn begin_polish(&mut self, field: NarrativeField) -> Option<PolishTicket> {
        if !self.busy.insert(field) {
            debug!(field = %field, "polish already in flight");
            return None;
        }
        Some(PolishTicket {
            field,
            snapshot: self.report.narrative(field).to_string(),
        })
    }

    /// Settle a request. The busy flag is cleared whatever the outcome.
    pub fn finish_polish(&mut self, ticket: PolishTicket, polished: String) -> PolishOutcome {
        let field = ticket.field;
        self.busy.remove(&field);

        let current = self.report.narrative(field);
        if self.policy == StalePolicy::DiscardIfChanged && current != ticket.snapshot {
            info!(field = %field, "discarding stale polish result");
            return PolishOutcome::Discarded;
        }
        if current == polished {
            return PolishOutcome::Applied;
        }
        self.set(field.field(), polished);
        PolishOutcome::Applied
    }
}
