//! Record kinds known to the persistence layer.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::assignment::Assignment;
use crate::models::patient::Patient;
use crate::models::physician::Physician;
use crate::models::survey::Survey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Survey,
    Physician,
    Patient,
    Assignment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Survey,
        RecordKind::Physician,
        RecordKind::Patient,
        RecordKind::Assignment,
    ];

    /// Display name used in user-facing messages ("Survey not found").
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Survey => "Survey",
            RecordKind::Physician => "Physician",
            RecordKind::Patient => "Patient",
            RecordKind::Assignment => "Assignment",
        }
    }

    /// Plural collection name, also the route segment and key prefix.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Survey => "surveys",
            RecordKind::Physician => "physicians",
            RecordKind::Patient => "patients",
            RecordKind::Assignment => "assignments",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.collection() == s)
            .ok_or_else(|| CoreError::InvalidRecordKind(s.to_string()))
    }
}

/// A persistable record. The store assigns `id` on first create.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> Option<Uuid>;

    fn set_id(&mut self, id: Uuid);

    /// Serialized field whose value must be unique within the kind.
    fn unique_field() -> Option<&'static str> {
        None
    }

    /// Called by the store before a record is first written.
    fn on_create(&mut self, _now: jiff::Timestamp) {}
}

impl Record for Survey {
    const KIND: RecordKind = RecordKind::Survey;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

impl Record for Assignment {
    const KIND: RecordKind = RecordKind::Assignment;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

impl Record for Physician {
    const KIND: RecordKind = RecordKind::Physician;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn unique_field() -> Option<&'static str> {
        Some("email")
    }

    fn on_create(&mut self, now: jiff::Timestamp) {
        self.created_at.get_or_insert(now);
    }
}

impl Record for Patient {
    const KIND: RecordKind = RecordKind::Patient;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn unique_field() -> Option<&'static str> {
        Some("email")
    }

    fn on_create(&mut self, now: jiff::Timestamp) {
        self.created_at.get_or_insert(now);
    }
}
