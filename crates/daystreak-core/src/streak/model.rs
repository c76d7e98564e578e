//! Streak entities and the persisted aggregate.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::calculator::{current_streak_length, total_completed};

/// One tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub id: String,
    pub name: String,
    /// Completed local calendar days, serialized as sorted `YYYY-MM-DD` strings.
    #[serde(default)]
    pub completed_days: BTreeSet<NaiveDate>,
    /// Cached [`current_streak_length`] of `completed_days`.
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Streak {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed_days: BTreeSet::new(),
            current_streak: 0,
            created_at,
        }
    }

    pub fn is_completed(&self, day: NaiveDate) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn stats(&self) -> StreakStats {
        StreakStats {
            current_streak: self.current_streak,
            total_completed: total_completed(&self.completed_days),
        }
    }

    /// Re-derive the cached streak length. Returns whether it changed.
    pub(crate) fn recompute(&mut self, today: NaiveDate) -> bool {
        let length = current_streak_length(&self.completed_days, today);
        let changed = length != self.current_streak;
        self.current_streak = length;
        changed
    }
}

/// The two numbers shown for a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    pub current_streak: u32,
    pub total_completed: usize,
}

/// Aggregate root: every streak plus the selection pointer.
///
/// Persisted as one unit. An empty `selectedStreakId` on the wire maps to
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreaksData {
    #[serde(default)]
    pub streaks: Vec<Streak>,
    #[serde(default, with = "empty_as_none")]
    pub selected_streak_id: Option<String>,
}

impl StreaksData {
    pub fn find(&self, id: &str) -> Option<&Streak> {
        self.streaks.iter().find(|s| s.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Streak> {
        self.streaks.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn selected(&self) -> Option<&Streak> {
        self.selected_streak_id
            .as_deref()
            .and_then(|id| self.find(id))
    }

    /// Point the selection at an existing streak: keep it if valid, otherwise
    /// fall back to the first streak, or clear it when there is none.
    pub(crate) fn repair_selection(&mut self) {
        let valid = self
            .selected_streak_id
            .as_deref()
            .is_some_and(|id| self.contains(id));
        if !valid {
            self.selected_streak_id = self.streaks.first().map(|s| s.id.clone());
        }
    }

    /// Bring freshly loaded data in line with the aggregate invariants:
    /// unique ids, up-to-date cached lengths, valid selection.
    pub(crate) fn repair(&mut self, today: NaiveDate) {
        let mut seen = HashSet::new();
        self.streaks.retain(|s| seen.insert(s.id.clone()));
        for streak in &mut self.streaks {
            streak.recompute(today);
        }
        self.repair_selection();
    }
}

mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|id| !id.is_empty()))
    }
}
