use super::clock::SessionClock;
use super::ledger::Ledger;
use super::realloc::{extend_current, Reallocation};
use super::review::{build_review, close_and_save, migrate_remaining, Resolved, Review};
use super::selector::Selector;
use crate::domain::{ItemRow, Phase, Resolution, SessionSnapshot, Task, WorkItem};
use crate::error::{SessionError, SessionResult};
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// One timed focus invocation against a task.
///
/// Owns the task for the lifetime of the session together with the clock, the
/// active item selection and the transient ledger. Every mutation goes through
/// `&mut self`, so a tick always sees a reallocation or a switch either fully
/// applied or not at all.
#[derive(Debug, Clone)]
pub struct FocusSession {
    task: Task,
    /// Stand-in work item for a task without subtasks
    implicit: Option<WorkItem>,
    phase: Phase,
    planned_secs: u64,
    clock: Option<SessionClock>,
    selector: Selector,
    ledger: Ledger,
}

impl FocusSession {
    /// Open a session in the editing phase
    pub fn new(task: Task) -> Self {
        let implicit = task.subtasks.is_empty().then(|| task.as_work_item());
        let planned_secs = u64::from(task.planned_duration_minutes) * 60;

        Self {
            task,
            implicit,
            phase: Phase::Editing,
            planned_secs,
            clock: None,
            selector: Selector::new(),
            ledger: Ledger::new(),
        }
    }

    /// Session locked to a single item with its own length
    pub(super) fn pinned(task: Task, item_id: Uuid, total_secs: u64) -> Self {
        let mut session = Self::new(task);
        session.selector = Selector::pinned_to(item_id);
        session.planned_secs = total_secs;
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn active_item_id(&self) -> Option<Uuid> {
        self.selector.active()
    }

    pub fn is_pinned(&self) -> bool {
        self.selector.pinned().is_some()
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit.is_some()
    }

    /// Work items taking part in the session (the synthetic item for a bare task)
    pub fn items(&self) -> &[WorkItem] {
        match &self.implicit {
            Some(item) => std::slice::from_ref(item),
            None => &self.task.subtasks,
        }
    }

    fn parts(&mut self) -> (&mut [WorkItem], &mut Selector, &mut Ledger) {
        let items = match &mut self.implicit {
            Some(item) => std::slice::from_mut(item),
            None => self.task.subtasks.as_mut_slice(),
        };
        (items, &mut self.selector, &mut self.ledger)
    }

    /// Seconds left on the clock (the planned length before it starts)
    pub fn remaining_secs(&self) -> u64 {
        match (&self.clock, self.phase) {
            (Some(clock), _) => clock.remaining_secs(),
            (None, Phase::Editing) => self.planned_secs,
            (None, _) => 0,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.clock
            .as_ref()
            .map_or(self.planned_secs, SessionClock::total_secs)
    }

    /// Override the session length before the clock starts
    pub fn set_total_minutes(&mut self, minutes: u32) -> bool {
        if self.phase != Phase::Editing {
            return false;
        }
        self.planned_secs = u64::from(minutes) * 60;
        true
    }

    /// Adjust an item's budget before the clock starts.
    /// The session length follows the new plan.
    pub fn adjust_allocation(&mut self, item_id: Uuid, delta_minutes: i32) -> bool {
        if self.phase != Phase::Editing {
            return false;
        }
        let (items, _, _) = self.parts();
        let Some(item) = items.iter_mut().find(|item| item.id == item_id) else {
            return false;
        };
        if delta_minutes >= 0 {
            item.increase_allocation(delta_minutes.unsigned_abs());
        } else {
            item.decrease_allocation(delta_minutes.unsigned_abs());
        }

        let planned_minutes = match &self.implicit {
            Some(item) => item.allocated_minutes,
            None => {
                self.task.sync_planned_duration();
                self.task.planned_duration_minutes
            }
        };
        self.planned_secs = u64::from(planned_minutes) * 60;
        true
    }

    /// Start the clock. A zero-length session goes straight to review.
    pub fn start(&mut self, now: Instant) -> Phase {
        if self.phase != Phase::Editing {
            return self.phase;
        }
        self.task.mark_in_progress();

        if self.planned_secs == 0 {
            info!(task = %self.task.title, "zero-length session, reviewing immediately");
            self.enter_review();
            return self.phase;
        }

        self.clock = Some(SessionClock::start(self.planned_secs, now));
        self.phase = Phase::Running;
        let (items, selector, _) = self.parts();
        selector.auto_select(items);

        info!(
            task = %self.task.title,
            seconds = self.planned_secs,
            pinned = self.is_pinned(),
            "focus session started"
        );
        self.phase
    }

    /// Attribute newly elapsed whole seconds to the active item and
    /// move to review once the deadline passes
    pub fn tick(&mut self, now: Instant) -> Phase {
        if self.phase != Phase::Running {
            return self.phase;
        }
        self.account_until(now);

        if self.clock.as_ref().is_some_and(SessionClock::is_expired) {
            info!(task = %self.task.title, "session clock ran out");
            self.enter_review();
        }
        self.phase
    }

    fn account_until(&mut self, now: Instant) {
        let Some(clock) = self.clock.as_mut() else {
            return;
        };
        let fresh = clock.advance(now);
        self.ledger.record_seconds(self.selector.active(), fresh);
    }

    /// Make another item the recording one. Time already attributed stays put.
    pub fn set_active(&mut self, item_id: Uuid) -> bool {
        if !matches!(self.phase, Phase::Editing | Phase::Running) {
            return false;
        }
        let (items, selector, _) = self.parts();
        let switched = selector.set_active(items, item_id);
        if switched {
            debug!(%item_id, "active item switched");
        }
        switched
    }

    /// Tick off an item mid-session; the selector moves on if it was active
    pub fn complete_item(&mut self, item_id: Uuid) -> bool {
        if !matches!(self.phase, Phase::Editing | Phase::Running) {
            return false;
        }
        let (items, selector, _) = self.parts();
        let Some(item) = items
            .iter_mut()
            .find(|item| item.id == item_id && !item.is_completed)
        else {
            return false;
        };
        item.is_completed = true;
        selector.on_item_completed(items, item_id);
        info!(%item_id, "item completed during session");
        true
    }

    /// "Extend +5m": borrow budget from the next item, or extend the clock
    pub fn reallocate(&mut self) -> Option<Reallocation> {
        if self.phase != Phase::Running {
            return None;
        }
        let scope = self.selector.pinned();
        let (items, _, _) = self.parts();
        let outcome = extend_current(items, scope);

        match outcome {
            Reallocation::ClockExtended { seconds } => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.extend(seconds);
                }
            }
            Reallocation::Transferred { .. } => {
                if self.implicit.is_none() {
                    self.task.sync_planned_duration();
                }
            }
        }
        info!(?outcome, "reallocated session budget");
        Some(outcome)
    }

    /// Finish early: account up to `now`, flush, and go to review
    pub fn stop(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.account_until(now);
        info!(task = %self.task.title, "session stopped early");
        self.enter_review();
        true
    }

    fn enter_review(&mut self) {
        if matches!(self.phase, Phase::Reviewing | Phase::Closed) {
            return;
        }
        let (items, _, ledger) = self.parts();
        let added = ledger.flush(items);
        self.phase = Phase::Reviewing;
        info!(task = %self.task.title, added_minutes = added, "session flushed for review");
    }

    /// Per-item breakdown, available while reviewing
    pub fn review(&self) -> Option<Review> {
        (self.phase == Phase::Reviewing)
            .then(|| build_review(&self.task.title, self.items(), &self.ledger))
    }

    /// Apply a terminal choice and close the session
    pub fn resolve(&mut self, choice: Resolution) -> SessionResult<Resolved> {
        if self.phase != Phase::Reviewing {
            return Err(SessionError::InvalidSessionState {
                actual: self.phase,
                expected: Phase::Reviewing,
            });
        }
        let added = self.ledger.total_flushed_minutes();

        let backlog = match choice {
            Resolution::CloseAndSave { complete } => {
                if let Some(pinned) = self.selector.pinned() {
                    // A pinned bare task is its own item, so completing it completes the task
                    let implicit_done = self.fold_implicit();
                    if complete {
                        if let Some(item) = self.task.find_item_mut(pinned) {
                            item.is_completed = true;
                        }
                    }
                    let complete_task = self.is_implicit() && (complete || implicit_done);
                    close_and_save(&mut self.task, added, complete_task);
                } else {
                    let implicit_done = self.fold_implicit();
                    close_and_save(&mut self.task, added, complete || implicit_done);
                }
                Vec::new()
            }
            Resolution::MigrateRemaining => {
                if self.is_pinned() {
                    return Err(SessionError::UnsupportedResolution(
                        "quick-start sessions can only be closed",
                    ));
                }
                if self.implicit.is_some() {
                    // The task is its own only item; nothing can be detached
                    let implicit_done = self.fold_implicit();
                    close_and_save(&mut self.task, added, implicit_done);
                    Vec::new()
                } else {
                    migrate_remaining(&mut self.task, added)
                }
            }
        };

        self.phase = Phase::Closed;
        Ok(Resolved {
            task: self.task.clone(),
            backlog,
        })
    }

    /// Copy the synthetic item's budget back onto the task.
    /// Returns whether it was ticked off during the session.
    fn fold_implicit(&mut self) -> bool {
        match &self.implicit {
            Some(item) => {
                self.task.planned_duration_minutes = item.allocated_minutes;
                item.is_completed && !self.task.is_completed()
            }
            None => false,
        }
    }

    /// Leave the session without choosing: stop the clock if needed and
    /// close without completing anything, so recorded time is kept
    pub fn abandon(&mut self, now: Instant) -> SessionResult<Resolved> {
        match self.phase {
            Phase::Running => {
                self.stop(now);
            }
            Phase::Editing => self.enter_review(),
            Phase::Reviewing | Phase::Closed => {}
        }
        self.resolve(Resolution::CloseAndSave { complete: false })
    }

    /// Plain data for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        let active = self.selector.active();
        let rows = self
            .items()
            .iter()
            .map(|item| ItemRow {
                id: item.id,
                title: item.title.clone(),
                category: item.category,
                allocated_minutes: item.allocated_minutes,
                actual_minutes: item.actual_minutes,
                pending_seconds: self.ledger.pending_seconds(item.id),
                is_completed: item.is_completed,
                is_active: active == Some(item.id),
            })
            .collect();

        SessionSnapshot {
            task_title: self.task.title.clone(),
            phase: self.phase,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs(),
            pinned: self.is_pinned(),
            implicit: self.is_implicit(),
            task_pending_seconds: self.ledger.task_pending_seconds(),
            rows,
        }
    }
}
