//! The single draft slot.
//!
//! A draft is one JSON-encoded [`CaseReport`] under [`DRAFT_KEY`]. Reading
//! never fails from the caller's point of view: a missing, unreadable or
//! malformed slot all come back as `None`, with the reason logged.

use laporan_core::CaseReport;
use tracing::{info, warn};

use crate::StoreError;
use crate::kv::KeyValueStore;

/// Storage key of the draft.
pub const DRAFT_KEY: &str = "draft_report";

pub struct DraftStore<S> {
    kv: S,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// The underlying key-value area.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Serialize `report` and overwrite the slot.
    pub fn save(&self, report: &CaseReport) -> Result<(), StoreError> {
        let json = serde_json::to_string(report)?;
        self.kv.set(DRAFT_KEY, &json)?;
        info!(bytes = json.len(), "draft saved");
        Ok(())
    }

    /// The saved draft, or `None` when there is none usable.
    pub fn load(&self) -> Option<CaseReport> {
        let raw = match self.kv.get(DRAFT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read draft");
                return None;
            }
        };

        match serde_json::from_str::<CaseReport>(&raw) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "failed to load draft, ignoring stored value");
                None
            }
        }
    }

    /// Remove the slot. Clearing an empty slot is a no-op.
    pub fn clear(&self) {
        match self.kv.remove(DRAFT_KEY) {
            Ok(true) => info!("draft cleared"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "failed to clear draft"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileStore, MemoryStore};
    use laporan_core::{PersonField, ReportField, SignatureField, SignatureRole};

    fn sample() -> CaseReport {
        CaseReport::default()
            .with_field(ReportField::Title, "Murid cedera di padang")
            .with_field(ReportField::IncidentDate, "2026-03-14")
            .with_field(ReportField::Person(PersonField::IcNumber), "120304-10-5566")
            .with_field(
                ReportField::Chronology,
                "1. Murid terjatuh.\n2. Guru bertugas dimaklumkan.",
            )
            .with_field(
                ReportField::Signature(SignatureRole::Verifier, SignatureField::Phone),
                "012-3456789",
            )
    }

    #[test]
    fn round_trip() {
        let store = DraftStore::new(MemoryStore::new());
        let report = sample();
        store.save(&report).unwrap();
        assert_eq!(store.load(), Some(report));
    }

    #[test]
    fn load_without_save_is_absent() {
        let store = DraftStore::new(MemoryStore::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = DraftStore::new(MemoryStore::new());
        store.clear();
        assert_eq!(store.load(), None);

        store.save(&sample()).unwrap();
        store.clear();
        assert_eq!(store.load(), None);
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn malformed_slot_is_absent() {
        let store = DraftStore::new(MemoryStore::new());
        for junk in [
            "not json at all",
            "",
            "[1, 2, 3]",
            r#"{"title": "only a title"}"#,
            "null",
        ] {
            store.kv().set(DRAFT_KEY, junk).unwrap();
            assert_eq!(store.load(), None, "accepted {junk:?}");
        }
    }

    #[test]
    fn foreign_shaped_slot_is_absent() {
        let store = DraftStore::new(MemoryStore::new());
        let mut v = serde_json::to_value(sample()).unwrap();
        v["involvedPerson"]["age"] = serde_json::json!(12);
        store.kv().set(DRAFT_KEY, &v.to_string()).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn saved_json_is_readable_by_the_form_shape() {
        let store = DraftStore::new(MemoryStore::new());
        store.save(&sample()).unwrap();
        let raw = store.kv().get(DRAFT_KEY).unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["title"], "Murid cedera di padang");
        assert_eq!(v["verifiedBy"]["phone"], "012-3456789");
    }

    #[test]
    fn survives_reopen_on_disk() {
        let tmp = tempfile::TempDir::new().unwrap();

        let first = DraftStore::new(FileStore::open(tmp.path()));
        let edited = CaseReport::default().with_field(ReportField::Title, "Case A");
        first.save(&edited).unwrap();
        drop(first);

        let reopened = DraftStore::new(FileStore::open(tmp.path()));
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.title, "Case A");
        assert_eq!(loaded.school_name, "SK BANDAR SRI DAMANSARA 1");
    }

    #[test]
    fn works_through_a_borrowed_store() {
        let kv = MemoryStore::new();
        DraftStore::new(&kv).save(&sample()).unwrap();
        assert!(DraftStore::new(&kv).load().is_some());
    }
}
