use super::ledger::Ledger;
use crate::domain::{Task, WorkItem};
use tracing::info;
use uuid::Uuid;

/// One row of the end-of-session breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReview {
    pub id: Uuid,
    pub title: String,
    pub allocated_minutes: u32,
    pub actual_minutes: u32,
    /// Minutes this session added to `actual_minutes`
    pub added_minutes: u32,
    pub is_completed: bool,
}

impl ItemReview {
    pub fn is_over_budget(&self) -> bool {
        self.actual_minutes > self.allocated_minutes
    }
}

/// Breakdown shown while a session is in review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub task_title: String,
    pub rows: Vec<ItemReview>,
    /// Minutes recorded while no item was active
    pub task_level_minutes: u32,
    pub total_added_minutes: u32,
}

impl Review {
    pub fn incomplete_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_completed).count()
    }
}

/// Build the breakdown from flushed items
pub fn build_review(task_title: &str, items: &[WorkItem], ledger: &Ledger) -> Review {
    let rows = items
        .iter()
        .map(|item| ItemReview {
            id: item.id,
            title: item.title.clone(),
            allocated_minutes: item.allocated_minutes,
            actual_minutes: item.actual_minutes,
            added_minutes: ledger.flushed_minutes(item.id),
            is_completed: item.is_completed,
        })
        .collect();

    Review {
        task_title: task_title.to_string(),
        rows,
        task_level_minutes: ledger.task_flushed_minutes(),
        total_added_minutes: ledger.total_flushed_minutes(),
    }
}

/// Outcome of a terminal resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub task: Task,
    /// Standalone backlog tasks created from unfinished items
    pub backlog: Vec<Task>,
}

/// Keep every item and record the session's minutes on the task
pub fn close_and_save(task: &mut Task, added_minutes: u32, complete: bool) {
    task.actual_duration_minutes = task.actual_duration_minutes.saturating_add(added_minutes);
    if complete {
        task.mark_completed();
    }
    info!(task = %task.title, added_minutes, complete, "closed session");
}

/// Split unfinished items out into backlog tasks.
///
/// The parent keeps only completed items. All flushed minutes stay on the
/// parent, including those of migrated items. The parent is completed only
/// when there was nothing left to migrate.
pub fn migrate_remaining(task: &mut Task, added_minutes: u32) -> Vec<Task> {
    let (completed, incomplete): (Vec<WorkItem>, Vec<WorkItem>) =
        std::mem::take(&mut task.subtasks)
            .into_iter()
            .partition(|item| item.is_completed);

    let backlog: Vec<Task> = incomplete.iter().map(Task::backlog_from_item).collect();

    task.subtasks = completed;
    task.sync_planned_duration();
    task.actual_duration_minutes = task.actual_duration_minutes.saturating_add(added_minutes);
    if incomplete.is_empty() {
        task.mark_completed();
    }

    info!(
        task = %task.title,
        added_minutes,
        migrated = backlog.len(),
        "migrated remaining items to backlog"
    );
    backlog
}
