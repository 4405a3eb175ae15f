//! Medication list and reminder schedule computation.
//!
//! The list is CRUD over one named record. `next_due` computes when the
//! next reminder should fire; actually delivering an OS notification at
//! that instant is the embedding shell's job.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::models::{Medication, MedicationFrequency};
use crate::storage::{PrefStore, StorageError};

const KEY_MEDICATIONS: &str = "medications";

/// How many days ahead `next_due` searches before giving up. Covers the
/// sparsest schedule (weekly) twice over.
const SCHEDULE_HORIZON_DAYS: i64 = 15;

/// The user's medication list, persisted as one named record.
pub struct MedicationSchedule {
    store: PrefStore,
    items: Vec<Medication>,
}

impl MedicationSchedule {
    /// Load the persisted list; malformed or missing data starts empty.
    pub fn load(store: PrefStore) -> Self {
        let items: Vec<Medication> = store.get(KEY_MEDICATIONS).unwrap_or_default();
        Self { store, items }
    }

    pub fn add(&mut self, medication: Medication) -> Result<(), StorageError> {
        tracing::debug!(medication = %medication.name, "Medication added");
        self.items.push(medication);
        self.persist()
    }

    /// Replace the medication with the same id. Unknown ids are a no-op.
    pub fn update(&mut self, medication: Medication) -> Result<(), StorageError> {
        let Some(slot) = self.items.iter_mut().find(|m| m.id == medication.id) else {
            return Ok(());
        };
        *slot = medication;
        self.persist()
    }

    /// Mark a medication inactive without deleting its history.
    pub fn deactivate(&mut self, id: Uuid) -> Result<(), StorageError> {
        if let Some(med) = self.items.iter_mut().find(|m| m.id == id) {
            med.active = false;
            return self.persist();
        }
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        if self.items.len() != before {
            return self.persist();
        }
        Ok(())
    }

    pub fn all(&self) -> &[Medication] {
        &self.items
    }

    pub fn active(&self) -> Vec<&Medication> {
        self.items.iter().filter(|m| m.active).collect()
    }

    /// The earliest upcoming reminder across all active medications.
    pub fn next_reminder(&self, after: NaiveDateTime) -> Option<(NaiveDateTime, &Medication)> {
        self.items
            .iter()
            .filter(|m| m.active)
            .filter_map(|m| next_due(m, after).map(|when| (when, m)))
            .min_by_key(|(when, _)| *when)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.put(KEY_MEDICATIONS, &self.items)
    }
}

/// When this medication's next reminder fires, strictly after `after`.
///
/// Returns `None` for inactive or as-needed medications, for schedules with
/// no enabled intake times, and once the end date has passed.
pub fn next_due(medication: &Medication, after: NaiveDateTime) -> Option<NaiveDateTime> {
    if !medication.active || medication.frequency == MedicationFrequency::AsNeeded {
        return None;
    }

    let mut times: Vec<(u8, u8)> = medication
        .times
        .iter()
        .filter(|t| t.enabled)
        .map(|t| (t.hour, t.minute))
        .collect();
    if times.is_empty() {
        return None;
    }
    times.sort_unstable();

    for offset in 0..=SCHEDULE_HORIZON_DAYS {
        let day = after.date() + Duration::days(offset);

        if day < medication.start_date {
            continue;
        }
        if let Some(end) = medication.end_date {
            if day > end {
                return None;
            }
        }
        if !takes_on(medication, day) {
            continue;
        }

        for &(hour, minute) in &times {
            let Some(candidate) = day.and_hms_opt(hour as u32, minute as u32, 0) else {
                continue;
            };
            if candidate > after {
                return Some(candidate);
            }
        }
    }

    None
}

/// Whether the medication is taken on the given day per its frequency.
fn takes_on(medication: &Medication, day: NaiveDate) -> bool {
    match medication.frequency {
        MedicationFrequency::OnceDaily
        | MedicationFrequency::TwiceDaily
        | MedicationFrequency::ThreeTimesDaily
        | MedicationFrequency::FourTimesDaily
        | MedicationFrequency::Custom => true,
        MedicationFrequency::EveryOtherDay => {
            (day - medication.start_date).num_days() % 2 == 0
        }
        MedicationFrequency::Weekly => day.weekday() == medication.start_date.weekday(),
        MedicationFrequency::AsNeeded => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MedicationTime;

    fn time(hour: u8, minute: u8) -> MedicationTime {
        MedicationTime {
            hour,
            minute,
            enabled: true,
        }
    }

    fn med(frequency: MedicationFrequency, times: Vec<MedicationTime>) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            name: "Cetirizine".into(),
            dosage: "10mg".into(),
            frequency,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: None,
            times,
            notes: String::new(),
            active: true,
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn twice_daily_picks_next_time_same_day() {
        let m = med(MedicationFrequency::TwiceDaily, vec![time(8, 0), time(20, 0)]);
        assert_eq!(next_due(&m, at(10, 9, 0)), Some(at(10, 20, 0)));
    }

    #[test]
    fn twice_daily_rolls_to_next_morning() {
        let m = med(MedicationFrequency::TwiceDaily, vec![time(8, 0), time(20, 0)]);
        assert_eq!(next_due(&m, at(10, 21, 0)), Some(at(11, 8, 0)));
    }

    #[test]
    fn due_exactly_at_reminder_time_rolls_forward() {
        // "Strictly after": asking at 08:00 sharp yields the evening dose.
        let m = med(MedicationFrequency::TwiceDaily, vec![time(8, 0), time(20, 0)]);
        assert_eq!(next_due(&m, at(10, 8, 0)), Some(at(10, 20, 0)));
    }

    #[test]
    fn unsorted_times_still_pick_earliest() {
        let m = med(MedicationFrequency::TwiceDaily, vec![time(20, 0), time(8, 0)]);
        assert_eq!(next_due(&m, at(10, 6, 0)), Some(at(10, 8, 0)));
    }

    #[test]
    fn as_needed_never_schedules() {
        let m = med(MedicationFrequency::AsNeeded, vec![time(8, 0)]);
        assert_eq!(next_due(&m, at(10, 6, 0)), None);
    }

    #[test]
    fn inactive_never_schedules() {
        let mut m = med(MedicationFrequency::OnceDaily, vec![time(8, 0)]);
        m.active = false;
        assert_eq!(next_due(&m, at(10, 6, 0)), None);
    }

    #[test]
    fn disabled_times_are_skipped() {
        let mut evening = time(20, 0);
        evening.enabled = false;
        let m = med(MedicationFrequency::TwiceDaily, vec![time(8, 0), evening]);
        assert_eq!(next_due(&m, at(10, 9, 0)), Some(at(11, 8, 0)));
    }

    #[test]
    fn no_enabled_times_never_schedules() {
        let mut morning = time(8, 0);
        morning.enabled = false;
        let m = med(MedicationFrequency::OnceDaily, vec![morning]);
        assert_eq!(next_due(&m, at(10, 6, 0)), None);
    }

    #[test]
    fn every_other_day_skips_odd_days() {
        // Start date 2026-03-01: doses on the 1st, 3rd, 5th, ...
        let m = med(MedicationFrequency::EveryOtherDay, vec![time(9, 0)]);
        assert_eq!(next_due(&m, at(2, 10, 0)), Some(at(3, 9, 0)));
        assert_eq!(next_due(&m, at(3, 10, 0)), Some(at(5, 9, 0)));
    }

    #[test]
    fn weekly_lands_on_start_weekday() {
        // 2026-03-01 is a Sunday.
        let m = med(MedicationFrequency::Weekly, vec![time(9, 0)]);
        assert_eq!(next_due(&m, at(2, 8, 0)), Some(at(8, 9, 0)));
    }

    #[test]
    fn before_start_date_waits_for_start() {
        let mut m = med(MedicationFrequency::OnceDaily, vec![time(8, 0)]);
        m.start_date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        assert_eq!(next_due(&m, at(10, 6, 0)), Some(at(12, 8, 0)));
    }

    #[test]
    fn after_end_date_never_schedules() {
        let mut m = med(MedicationFrequency::OnceDaily, vec![time(8, 0)]);
        m.end_date = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert_eq!(next_due(&m, at(10, 6, 0)), None);
    }

    // ── MedicationSchedule persistence ───────────────────

    fn open_schedule() -> (tempfile::TempDir, MedicationSchedule) {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("medications")).unwrap();
        (dir, MedicationSchedule::load(store))
    }

    #[test]
    fn add_and_list() {
        let (_dir, mut schedule) = open_schedule();
        schedule.add(med(MedicationFrequency::OnceDaily, vec![time(8, 0)])).unwrap();
        assert_eq!(schedule.all().len(), 1);
        assert_eq!(schedule.active().len(), 1);
    }

    #[test]
    fn list_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("medications")).unwrap();

        let mut schedule = MedicationSchedule::load(store.clone());
        schedule.add(med(MedicationFrequency::OnceDaily, vec![time(8, 0)])).unwrap();
        drop(schedule);

        let reloaded = MedicationSchedule::load(store);
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.all()[0].name, "Cetirizine");
    }

    #[test]
    fn update_replaces_by_id() {
        let (_dir, mut schedule) = open_schedule();
        let mut m = med(MedicationFrequency::OnceDaily, vec![time(8, 0)]);
        schedule.add(m.clone()).unwrap();

        m.dosage = "20mg".into();
        schedule.update(m.clone()).unwrap();

        assert_eq!(schedule.all().len(), 1);
        assert_eq!(schedule.all()[0].dosage, "20mg");
    }

    #[test]
    fn deactivate_keeps_but_hides_from_active() {
        let (_dir, mut schedule) = open_schedule();
        let m = med(MedicationFrequency::OnceDaily, vec![time(8, 0)]);
        let id = m.id;
        schedule.add(m).unwrap();

        schedule.deactivate(id).unwrap();
        assert_eq!(schedule.all().len(), 1);
        assert!(schedule.active().is_empty());
    }

    #[test]
    fn remove_deletes() {
        let (_dir, mut schedule) = open_schedule();
        let m = med(MedicationFrequency::OnceDaily, vec![time(8, 0)]);
        let id = m.id;
        schedule.add(m).unwrap();

        schedule.remove(id).unwrap();
        assert!(schedule.all().is_empty());
    }

    #[test]
    fn next_reminder_picks_earliest_across_medications() {
        let (_dir, mut schedule) = open_schedule();
        let mut evening = med(MedicationFrequency::OnceDaily, vec![time(20, 0)]);
        evening.name = "Evening med".into();
        let mut noon = med(MedicationFrequency::OnceDaily, vec![time(12, 0)]);
        noon.name = "Noon med".into();

        schedule.add(evening).unwrap();
        schedule.add(noon).unwrap();

        let (when, which) = schedule.next_reminder(at(10, 9, 0)).unwrap();
        assert_eq!(when, at(10, 12, 0));
        assert_eq!(which.name, "Noon med");
    }
}
