use crate::domain::WorkItem;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Convert seconds to whole minutes, rounding up (saturating at `u32::MAX`)
pub fn minutes_for(seconds: u64) -> u32 {
    u32::try_from(seconds.div_ceil(60)).unwrap_or(u32::MAX)
}

/// Transient per-item seconds for one session.
///
/// Seconds accumulate here while the clock runs and are only converted into
/// `actual_minutes` on [`Ledger::flush`]. Time recorded while no item is active
/// goes to a task-level counter instead.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pending: HashMap<Uuid, u64>,
    task_pending: u64,
    /// Minutes each item gained from flushes this session
    flushed: HashMap<Uuid, u32>,
    task_flushed: u32,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record elapsed seconds against an item, or the task when `None`
    pub fn record_seconds(&mut self, item_id: Option<Uuid>, seconds: u64) {
        if seconds == 0 {
            return;
        }
        match item_id {
            Some(id) => *self.pending.entry(id).or_insert(0) += seconds,
            None => self.task_pending += seconds,
        }
    }

    pub fn pending_seconds(&self, item_id: Uuid) -> u64 {
        self.pending.get(&item_id).copied().unwrap_or(0)
    }

    pub fn task_pending_seconds(&self) -> u64 {
        self.task_pending
    }

    /// Move pending seconds into `actual_minutes` (ceil per item) and reset them.
    /// Returns the minutes added by this call; a second call with nothing
    /// pending adds nothing.
    pub fn flush(&mut self, items: &mut [WorkItem]) -> u32 {
        let mut added = 0;

        for item in items.iter_mut() {
            let seconds = self.pending.remove(&item.id).unwrap_or(0);
            if seconds == 0 {
                continue;
            }
            let minutes = minutes_for(seconds);
            item.actual_minutes = item.actual_minutes.saturating_add(minutes);
            *self.flushed.entry(item.id).or_insert(0) += minutes;
            added += minutes;
            debug!(item = %item.title, seconds, minutes, "flushed item time");
        }

        if self.task_pending > 0 {
            let minutes = minutes_for(self.task_pending);
            self.task_flushed += minutes;
            added += minutes;
            debug!(seconds = self.task_pending, minutes, "flushed task-level time");
            self.task_pending = 0;
        }

        // Seconds for ids that are no longer in the list cannot be attributed
        if !self.pending.is_empty() {
            let orphaned: u64 = self.pending.values().sum();
            self.task_flushed += minutes_for(orphaned);
            added += minutes_for(orphaned);
            self.pending.clear();
        }

        added
    }

    /// Minutes flushed into an item during this session
    pub fn flushed_minutes(&self, item_id: Uuid) -> u32 {
        self.flushed.get(&item_id).copied().unwrap_or(0)
    }

    /// Minutes flushed while no item was active
    pub fn task_flushed_minutes(&self) -> u32 {
        self.task_flushed
    }

    /// Every minute this session added, item and task level
    pub fn total_flushed_minutes(&self) -> u32 {
        self.flushed.values().sum::<u32>() + self.task_flushed
    }
}
