//! Reaction journal: an append-only log of user-reported allergic
//! reactions, plus the frequency summaries the statistics screen charts.

use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::ReactionRecord;
use crate::storage::{PrefStore, StorageError};

const KEY_REACTIONS: &str = "saved_reactions";

/// Input for recording a new reaction.
#[derive(Debug, Clone)]
pub struct ReactionEntry {
    pub date: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub possible_triggers: Vec<String>,
    pub notes: String,
}

/// The reaction journal, newest record first, persisted as one named record.
pub struct ReactionTracker {
    store: PrefStore,
    records: Vec<ReactionRecord>,
}

impl ReactionTracker {
    /// Load the persisted journal; malformed or missing data starts empty.
    pub fn load(store: PrefStore) -> Self {
        let records: Vec<ReactionRecord> = store.get(KEY_REACTIONS).unwrap_or_default();
        Self { store, records }
    }

    /// Record a new reaction at the front of the journal.
    pub fn record(&mut self, entry: ReactionEntry) -> Result<Uuid, StorageError> {
        let record = ReactionRecord {
            id: Uuid::new_v4(),
            date: entry.date,
            symptoms: entry.symptoms,
            possible_triggers: entry.possible_triggers,
            notes: entry.notes,
        };
        let id = record.id;

        self.records.insert(0, record);
        self.store.put(KEY_REACTIONS, &self.records)?;

        tracing::debug!(reaction = %id, total = self.records.len(), "Reaction recorded");
        Ok(id)
    }

    /// Delete a record by id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: Uuid) -> Result<(), StorageError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() != before {
            self.store.put(KEY_REACTIONS, &self.records)?;
        }
        Ok(())
    }

    /// All records, newest first.
    pub fn history(&self) -> &[ReactionRecord] {
        &self.records
    }

    /// How often each symptom was reported, most frequent first.
    pub fn symptom_frequency(&self) -> Vec<(String, usize)> {
        frequency(self.records.iter().flat_map(|r| r.symptoms.iter()))
    }

    /// How often each suspected trigger was reported, most frequent first.
    pub fn trigger_frequency(&self) -> Vec<(String, usize)> {
        frequency(self.records.iter().flat_map(|r| r.possible_triggers.iter()))
    }

    /// Reactions per calendar month ("YYYY-MM"), chronological.
    pub fn monthly_counts(&self) -> Vec<(String, usize)> {
        let mut months: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            let key = format!("{:04}-{:02}", record.date.year(), record.date.month());
            *months.entry(key).or_default() += 1;
        }
        months.into_iter().collect()
    }
}

/// Count occurrences case-sensitively and sort by descending count, then
/// name, so chart ordering is stable.
fn frequency<'a>(items: impl Iterator<Item = &'a String>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
