//! The streak store.
//!
//! `StreakStore` is the single owner of [`StreaksData`]. Every mutation
//! follows the same shape: copy the aggregate, apply the change, re-derive the
//! cached streak lengths it touched, write the copy through the persistence
//! adapter, and only then swap it in. A failed write leaves the store exactly
//! as it was.
//!
//! Requests that name an unknown streak are no-ops and perform no write.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use super::model::{Streak, StreakStats, StreaksData};
use crate::date::{canonical_day, Clock};
use crate::error::Result;
use crate::storage::{KeyValueStore, StreakPersistence};

/// Result of a successful [`StreakStore::toggle_day`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayToggle {
    pub streak_id: String,
    pub day: NaiveDate,
    /// Whether the day is completed after the toggle.
    pub completed: bool,
    pub current_streak: u32,
}

pub struct StreakStore<K, C> {
    data: StreaksData,
    persistence: StreakPersistence<K>,
    clock: C,
}

impl<K: KeyValueStore, C: Clock> StreakStore<K, C> {
    /// Load the saved aggregate and repair it for today. Nothing is written
    /// until the first mutation.
    pub fn open(persistence: StreakPersistence<K>, clock: C) -> Self {
        let mut data = persistence.load();
        data.repair(clock.today());
        Self {
            data,
            persistence,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of the whole aggregate.
    pub fn data(&self) -> &StreaksData {
        &self.data
    }

    pub fn list_streaks(&self) -> &[Streak] {
        &self.data.streaks
    }

    pub fn get(&self, id: &str) -> Option<&Streak> {
        self.data.find(id)
    }

    pub fn selected_streak(&self) -> Option<&Streak> {
        self.data.selected()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.data.selected_streak_id.as_deref()
    }

    pub fn stats(&self, id: &str) -> Option<StreakStats> {
        self.get(id).map(Streak::stats)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn persistence(&self) -> &StreakPersistence<K> {
        &self.persistence
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Create a streak and select it. Blank names are refused with `Ok(None)`.
    ///
    /// # Errors
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn create(&mut self, name: &str) -> Result<Option<Streak>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("refusing to create streak with blank name");
            return Ok(None);
        }

        let streak = Streak::new(Uuid::new_v4().to_string(), name, self.clock.now());
        let mut next = self.data.clone();
        next.streaks.push(streak.clone());
        next.selected_streak_id = Some(streak.id.clone());
        self.commit(next)?;

        debug!(id = %streak.id, name = %streak.name, "created streak");
        Ok(Some(streak))
    }

    /// Delete a streak. When it was selected, the first remaining streak is
    /// selected instead, or the selection is cleared. Returns whether a
    /// streak was removed.
    ///
    /// # Errors
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if !self.data.contains(id) {
            return Ok(false);
        }

        let mut next = self.data.clone();
        next.streaks.retain(|s| s.id != id);
        if next.selected_streak_id.as_deref() == Some(id) {
            next.selected_streak_id = next.streaks.first().map(|s| s.id.clone());
        }
        self.commit(next)?;

        debug!(id, selected = ?self.data.selected_streak_id, "deleted streak");
        Ok(true)
    }

    /// Select an existing streak. Unknown ids are refused so the selection
    /// always points at a stored streak. Returns whether the selection
    /// changed.
    ///
    /// # Errors
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn select(&mut self, id: &str) -> Result<bool> {
        if !self.data.contains(id) {
            debug!(id, "refusing to select unknown streak");
            return Ok(false);
        }
        if self.selected_id() == Some(id) {
            return Ok(false);
        }

        let mut next = self.data.clone();
        next.selected_streak_id = Some(id.to_string());
        self.commit(next)?;
        Ok(true)
    }

    /// Flip `day` in the streak's completed days and re-derive its length.
    ///
    /// # Errors
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn toggle_day(&mut self, id: &str, day: NaiveDate) -> Result<Option<DayToggle>> {
        let today = self.clock.today();
        let mut next = self.data.clone();
        let Some(streak) = next.find_mut(id) else {
            return Ok(None);
        };

        let completed = if streak.completed_days.remove(&day) {
            false
        } else {
            streak.completed_days.insert(day);
            true
        };
        streak.recompute(today);

        let toggle = DayToggle {
            streak_id: streak.id.clone(),
            day,
            completed,
            current_streak: streak.current_streak,
        };
        self.commit(next)?;

        debug!(
            id,
            day = %canonical_day(day),
            completed,
            current_streak = toggle.current_streak,
            "toggled day"
        );
        Ok(Some(toggle))
    }

    /// Clear every completed day of a streak. Returns whether a streak was
    /// reset.
    ///
    /// # Errors
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn reset(&mut self, id: &str) -> Result<bool> {
        let mut next = self.data.clone();
        let Some(streak) = next.find_mut(id) else {
            return Ok(false);
        };
        streak.completed_days.clear();
        streak.current_streak = 0;
        self.commit(next)?;

        debug!(id, "reset streak");
        Ok(true)
    }

    /// Re-derive every cached length for the clock's current day, for
    /// sessions that outlive midnight. Writes only when a value changed.
    ///
    /// # Errors
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn refresh(&mut self) -> Result<bool> {
        let today = self.clock.today();
        let mut next = self.data.clone();
        let mut changed = false;
        for streak in &mut next.streaks {
            changed |= streak.recompute(today);
        }
        if !changed {
            return Ok(false);
        }
        self.commit(next)?;

        debug!(today = %canonical_day(today), "refreshed streak lengths");
        Ok(true)
    }

    fn commit(&mut self, next: StreaksData) -> Result<()> {
        self.persistence.save(&next)?;
        self.data = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{days_before, FixedClock};
    use crate::storage::{MemoryStore, STREAKS_KEY};
    use crate::streak::current_streak_length;
    use std::rc::Rc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn ago(offset: u64) -> NaiveDate {
        days_before(today(), offset).unwrap()
    }

    type TestStore = StreakStore<Rc<MemoryStore>, Rc<FixedClock>>;

    fn store() -> (TestStore, Rc<MemoryStore>, Rc<FixedClock>) {
        let kv = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::new(today()));
        let store = StreakStore::open(StreakPersistence::new(kv.clone()), clock.clone());
        (store, kv, clock)
    }

    fn assert_cache_consistent(store: &TestStore) {
        for streak in store.list_streaks() {
            assert_eq!(
                streak.current_streak,
                current_streak_length(&streak.completed_days, store.today()),
                "cached length out of date for {}",
                streak.name
            );
        }
    }

    #[test]
    fn create_appends_and_selects() {
        let (mut store, kv, _) = store();
        let first = store.create("Workout").unwrap().unwrap();
        let second = store.create("  Read  ").unwrap().unwrap();

        assert_eq!(second.name, "Read");
        assert_eq!(second.current_streak, 0);
        assert!(second.completed_days.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(store.list_streaks().len(), 2);
        assert_eq!(store.selected_id(), Some(second.id.as_str()));
        assert_eq!(kv.writes(), 2);
    }

    #[test]
    fn create_refuses_blank_names() {
        let (mut store, kv, _) = store();
        assert_eq!(store.create("").unwrap(), None);
        assert_eq!(store.create("   \t").unwrap(), None);
        assert!(store.list_streaks().is_empty());
        assert_eq!(kv.writes(), 0);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let (mut store, _, _) = store();
        let id = store.create("Workout").unwrap().unwrap().id;

        let on = store.toggle_day(&id, today()).unwrap().unwrap();
        assert!(on.completed);
        assert_eq!(on.current_streak, 1);

        let off = store.toggle_day(&id, today()).unwrap().unwrap();
        assert!(!off.completed);
        assert_eq!(off.current_streak, 0);
        assert!(store.get(&id).unwrap().completed_days.is_empty());
    }

    #[test]
    fn toggling_twice_restores_length() {
        let (mut store, _, _) = store();
        let id = store.create("Workout").unwrap().unwrap().id;
        for offset in [1, 2, 3] {
            store.toggle_day(&id, ago(offset)).unwrap();
        }
        let before = store.get(&id).unwrap().clone();

        store.toggle_day(&id, ago(2)).unwrap();
        assert_eq!(store.get(&id).unwrap().current_streak, 1);
        store.toggle_day(&id, ago(2)).unwrap();

        assert_eq!(store.get(&id).unwrap(), &before);
        assert_eq!(before.current_streak, 3);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let (mut store, kv, _) = store();
        store.create("Workout").unwrap();
        assert_eq!(store.toggle_day("missing", today()).unwrap(), None);
        assert_eq!(kv.writes(), 1);
    }

    #[test]
    fn delete_selected_picks_first_remaining() {
        let (mut store, _, _) = store();
        let a = store.create("A").unwrap().unwrap().id;
        let b = store.create("B").unwrap().unwrap().id;
        let c = store.create("C").unwrap().unwrap().id;
        assert_eq!(store.selected_id(), Some(c.as_str()));

        assert!(store.delete(&c).unwrap());
        assert_eq!(store.selected_id(), Some(a.as_str()));

        store.select(&b).unwrap();
        assert!(store.delete(&a).unwrap());
        assert_eq!(store.selected_id(), Some(b.as_str()));
    }

    #[test]
    fn delete_first_while_selected_moves_to_next() {
        let (mut store, _, _) = store();
        let a = store.create("A").unwrap().unwrap().id;
        let b = store.create("B").unwrap().unwrap().id;
        store.select(&a).unwrap();

        store.delete(&a).unwrap();
        assert_eq!(store.selected_id(), Some(b.as_str()));
    }

    #[test]
    fn delete_last_clears_selection() {
        let (mut store, _, _) = store();
        let a = store.create("A").unwrap().unwrap().id;
        store.delete(&a).unwrap();
        assert_eq!(store.selected_id(), None);
        assert!(store.selected_streak().is_none());
    }

    #[test]
    fn delete_unselected_keeps_selection() {
        let (mut store, _, _) = store();
        let a = store.create("A").unwrap().unwrap().id;
        let b = store.create("B").unwrap().unwrap().id;
        store.delete(&a).unwrap();
        assert_eq!(store.selected_id(), Some(b.as_str()));
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let (mut store, kv, _) = store();
        store.create("A").unwrap();
        assert!(!store.delete("nope").unwrap());
        assert_eq!(kv.writes(), 1);
    }

    #[test]
    fn select_refuses_unknown_ids() {
        let (mut store, kv, _) = store();
        let a = store.create("A").unwrap().unwrap().id;
        assert!(!store.select("ghost").unwrap());
        assert_eq!(store.selected_id(), Some(a.as_str()));
        assert_eq!(kv.writes(), 1);
    }

    #[test]
    fn select_existing_writes_once() {
        let (mut store, kv, _) = store();
        let a = store.create("A").unwrap().unwrap().id;
        store.create("B").unwrap();
        assert!(store.select(&a).unwrap());
        assert!(!store.select(&a).unwrap());
        assert_eq!(kv.writes(), 3);
    }

    #[test]
    fn reset_clears_days_and_length() {
        let (mut store, _, _) = store();
        let id = store.create("A").unwrap().unwrap().id;
        store.toggle_day(&id, today()).unwrap();
        store.toggle_day(&id, ago(1)).unwrap();

        assert!(store.reset(&id).unwrap());
        let streak = store.get(&id).unwrap();
        assert!(streak.completed_days.is_empty());
        assert_eq!(streak.current_streak, 0);
        assert!(!store.reset("missing").unwrap());
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let (mut store, kv, _) = store();
        let id = store.create("A").unwrap().unwrap().id;
        let before = store.data().clone();

        kv.set_read_only(true);
        assert!(store.toggle_day(&id, today()).is_err());
        assert!(store.create("B").is_err());
        assert!(store.delete(&id).is_err());
        assert!(store.reset(&id).is_err());
        assert_eq!(store.data(), &before);

        kv.set_read_only(false);
        assert!(store.toggle_day(&id, today()).unwrap().unwrap().completed);
    }

    #[test]
    fn every_mutation_is_written_through() {
        let (mut store, kv, clock) = store();
        let id = store.create("A").unwrap().unwrap().id;
        store.toggle_day(&id, today()).unwrap();

        let reopened = StreakStore::open(StreakPersistence::new(kv.clone()), clock.clone());
        assert_eq!(reopened.data(), store.data());
        assert!(kv.raw(STREAKS_KEY).unwrap().contains("2026-10-18"));
    }

    #[test]
    fn refresh_rederives_after_midnight() {
        let (mut store, kv, clock) = store();
        let id = store.create("A").unwrap().unwrap().id;
        store.toggle_day(&id, ago(1)).unwrap();
        store.toggle_day(&id, today()).unwrap();
        assert_eq!(store.get(&id).unwrap().current_streak, 2);
        let writes = kv.writes();

        clock.advance_days(1);
        assert!(!store.refresh().unwrap());
        assert_eq!(kv.writes(), writes);

        clock.advance_days(1);
        assert!(store.refresh().unwrap());
        assert_eq!(store.get(&id).unwrap().current_streak, 0);
        assert_cache_consistent(&store);
    }

    #[test]
    fn open_rederives_stale_cache() {
        let (mut store, kv, _) = store();
        let id = store.create("A").unwrap().unwrap().id;
        store.toggle_day(&id, today()).unwrap();

        let later = Rc::new(FixedClock::new(ago(0)));
        later.advance_days(5);
        let reopened = StreakStore::open(StreakPersistence::new(kv), later);
        assert_eq!(reopened.get(&id).unwrap().current_streak, 0);
        assert_eq!(reopened.stats(&id).unwrap().total_completed, 1);
    }
}
