//! Calendar controller.
//!
//! Owns the [`StreakStore`] for the session and is the only path from user
//! input to store mutations. It decides which days may be edited, keeps the
//! displayed month, runs the two-step confirmation for destructive actions
//! and turns store changes into [`Event`]s.
//!
//! ## Edit modes
//!
//! ```text
//! Normal <-> Developer   (explicit toggle only)
//! ```
//!
//! In `Normal` only today's cell is editable. `Developer` allows any day and
//! unlocks reset and delete, each of which must be requested and then
//! confirmed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::milestone::MilestoneTracker;
use super::month::{MonthView, YearMonth};
use crate::date::{canonical_day, is_today, parse_day, Clock};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::KeyValueStore;
use crate::streak::{Streak, StreakStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Normal,
    Developer,
}

/// Destructive action waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    Reset { streak_id: String },
    Delete { streak_id: String },
}

pub struct CalendarController<K, C> {
    store: StreakStore<K, C>,
    displayed: YearMonth,
    mode: EditMode,
    milestones: MilestoneTracker,
    pending: Option<PendingAction>,
}

impl<K: KeyValueStore, C: Clock> CalendarController<K, C> {
    /// Take ownership of the store. The displayed month starts at today's
    /// month, and every loaded streak length becomes a milestone baseline.
    pub fn new(store: StreakStore<K, C>) -> Self {
        let mut milestones = MilestoneTracker::new();
        for streak in store.list_streaks() {
            milestones.seed(&streak.id, streak.current_streak);
        }
        Self {
            displayed: YearMonth::containing(store.today()),
            store,
            mode: EditMode::Normal,
            milestones,
            pending: None,
        }
    }

    pub fn with_mode(mut self, mode: EditMode) -> Self {
        self.mode = mode;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &StreakStore<K, C> {
        &self.store
    }

    pub fn list_streaks(&self) -> &[Streak] {
        self.store.list_streaks()
    }

    pub fn selected_streak(&self) -> Option<&Streak> {
        self.store.selected_streak()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_developer_mode(&self) -> bool {
        self.mode == EditMode::Developer
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn displayed_month(&self) -> YearMonth {
        self.displayed
    }

    /// Whether a toggle of `day` would be accepted.
    pub fn can_edit(&self, day: NaiveDate) -> bool {
        self.is_developer_mode() || is_today(day, self.store.clock())
    }

    /// Grid for the selected streak in the displayed month.
    pub fn month_view(&self) -> Option<MonthView> {
        self.store.selected_streak().map(|streak| {
            MonthView::build(
                self.displayed,
                streak,
                self.store.clock(),
                self.is_developer_mode(),
            )
        })
    }

    // ── Mode and navigation ──────────────────────────────────────────

    /// Switch edit mode. Leaving developer mode drops any pending request.
    pub fn set_mode(&mut self, mode: EditMode) {
        if mode == EditMode::Normal {
            self.pending = None;
        }
        if self.mode != mode {
            debug!(?mode, "edit mode changed");
        }
        self.mode = mode;
    }

    pub fn toggle_developer_mode(&mut self) -> EditMode {
        let next = match self.mode {
            EditMode::Normal => EditMode::Developer,
            EditMode::Developer => EditMode::Normal,
        };
        self.set_mode(next);
        next
    }

    pub fn previous_month(&mut self) -> YearMonth {
        self.displayed = self.displayed.previous();
        self.displayed
    }

    pub fn next_month(&mut self) -> YearMonth {
        self.displayed = self.displayed.next();
        self.displayed
    }

    pub fn go_to_today(&mut self) -> YearMonth {
        self.displayed = YearMonth::containing(self.store.today());
        self.displayed
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.displayed = month;
    }

    // ── Streak management ────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the write fails.
    pub fn create(&mut self, name: &str) -> Result<Option<Streak>> {
        let created = self.store.create(name)?;
        if let Some(streak) = &created {
            self.milestones.seed(&streak.id, streak.current_streak);
        }
        Ok(created)
    }

    /// # Errors
    /// Returns an error if the write fails.
    pub fn select(&mut self, id: &str) -> Result<bool> {
        self.store.select(id)
    }

    // ── Day edits ────────────────────────────────────────────────────

    /// Toggle `day` on the selected streak.
    ///
    /// # Errors
    /// Returns [`ValidationError::NoSelection`] without a selected streak,
    /// [`ValidationError::EditNotPermitted`] for a day other than today in
    /// normal mode, or a storage error if the write fails.
    pub fn toggle_day(&mut self, day: NaiveDate) -> Result<Vec<Event>> {
        let id = self
            .store
            .selected_id()
            .ok_or(ValidationError::NoSelection)?
            .to_string();

        if !self.can_edit(day) {
            return Err(ValidationError::EditNotPermitted {
                day: canonical_day(day),
                today: canonical_day(self.store.today()),
            }
            .into());
        }

        let Some(toggle) = self.store.toggle_day(&id, day)? else {
            return Ok(Vec::new());
        };

        let at = self.store.clock().now();
        let mut events = Vec::new();
        if toggle.completed {
            events.push(Event::DayCompleted {
                streak_id: id.clone(),
                day,
                at,
            });
        }
        if self.milestones.observe(&id, toggle.current_streak) {
            info!(streak_id = %id, length = toggle.current_streak, "streak milestone reached");
            events.push(Event::MilestoneReached {
                streak_id: id,
                length: toggle.current_streak,
                at,
            });
        }
        Ok(events)
    }

    /// Toggle a day given as a `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// As [`Self::toggle_day`], plus [`ValidationError::InvalidDay`].
    pub fn toggle_day_str(&mut self, day: &str) -> Result<Vec<Event>> {
        let day = parse_day(day)?;
        self.toggle_day(day)
    }

    /// Toggle the `day_of_month`-th day of the displayed month.
    ///
    /// # Errors
    /// As [`Self::toggle_day`], plus [`ValidationError::DayOutOfMonth`].
    pub fn click_day(&mut self, day_of_month: u32) -> Result<Vec<Event>> {
        let day = self
            .displayed
            .day(day_of_month)
            .ok_or(ValidationError::DayOutOfMonth {
                year: self.displayed.year(),
                month: self.displayed.month(),
                day: day_of_month,
            })?;
        self.toggle_day(day)
    }

    /// Re-derive streak lengths for the current day. Lengths that moved onto
    /// a milestone are announced like any other change.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn refresh(&mut self) -> Result<Vec<Event>> {
        self.store.refresh()?;
        let at = self.store.clock().now();
        let mut events = Vec::new();
        for streak in self.store.list_streaks() {
            if self.milestones.observe(&streak.id, streak.current_streak) {
                events.push(Event::MilestoneReached {
                    streak_id: streak.id.clone(),
                    length: streak.current_streak,
                    at,
                });
            }
        }
        Ok(events)
    }

    // ── Destructive actions ──────────────────────────────────────────

    /// Ask to reset the selected streak. Nothing changes until
    /// [`Self::confirm`].
    ///
    /// # Errors
    /// Returns [`ValidationError::DeveloperModeRequired`] outside developer
    /// mode, [`ValidationError::NoSelection`] without a selected streak.
    pub fn request_reset(&mut self) -> Result<&PendingAction> {
        self.require_developer_mode("reset")?;
        let streak_id = self
            .store
            .selected_id()
            .ok_or(ValidationError::NoSelection)?
            .to_string();
        Ok(&*self.pending.insert(PendingAction::Reset { streak_id }))
    }

    /// Ask to delete a streak. Nothing changes until [`Self::confirm`].
    ///
    /// # Errors
    /// Returns [`ValidationError::DeveloperModeRequired`] outside developer
    /// mode.
    pub fn request_delete(&mut self, streak_id: &str) -> Result<&PendingAction> {
        self.require_developer_mode("delete")?;
        Ok(&*self.pending.insert(PendingAction::Delete {
            streak_id: streak_id.to_string(),
        }))
    }

    /// Carry out the pending action. Returns whether the store changed.
    ///
    /// # Errors
    /// Returns [`ValidationError::NoPendingAction`] when nothing was
    /// requested, or a storage error if the write fails (the request is
    /// dropped either way).
    pub fn confirm(&mut self) -> Result<bool> {
        let action = self.pending.take().ok_or(ValidationError::NoPendingAction)?;
        match action {
            PendingAction::Reset { streak_id } => {
                let applied = self.store.reset(&streak_id)?;
                if applied {
                    self.milestones.observe(&streak_id, 0);
                }
                Ok(applied)
            }
            PendingAction::Delete { streak_id } => {
                let applied = self.store.delete(&streak_id)?;
                if applied {
                    self.milestones.forget(&streak_id);
                }
                Ok(applied)
            }
        }
    }

    /// Drop the pending action, if any.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    fn require_developer_mode(&self, action: &str) -> Result<(), ValidationError> {
        if self.is_developer_mode() {
            Ok(())
        } else {
            Err(ValidationError::DeveloperModeRequired {
                action: action.to_string(),
            })
        }
    }
}
