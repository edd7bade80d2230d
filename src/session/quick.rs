use super::focus::FocusSession;
use crate::domain::{Task, WorkItem};
use crate::error::{SessionError, SessionResult};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Fallback duration for a quick-start when an item has no allocation
pub const DEFAULT_QUICK_MINUTES: u32 = 25;

/// Duration offered in the quick-start prompt
pub fn suggested_minutes(item: &WorkItem, fallback: u32) -> u32 {
    if item.allocated_minutes > 0 {
        item.allocated_minutes
    } else {
        fallback
    }
}

fn is_bare_target(task: &Task, item_id: Uuid) -> bool {
    task.subtasks.is_empty() && item_id == task.id
}

/// The incomplete item a quick action would act on. A task without subtasks
/// is its own item under the task's id.
pub fn quick_target(task: &Task, item_id: Uuid) -> SessionResult<WorkItem> {
    let item = if is_bare_target(task, item_id) {
        task.as_work_item()
    } else {
        task.find_item(item_id)
            .cloned()
            .ok_or(SessionError::ItemNotFound(item_id))?
    };
    if item.is_completed {
        return Err(SessionError::ItemCompleted(item_id));
    }
    Ok(item)
}

/// Time a single item: the chosen duration (at least one minute) becomes the
/// item's allocation and the session is pinned to it.
pub fn quick_start(
    task: &Task,
    item_id: Uuid,
    minutes: u32,
    now: Instant,
) -> SessionResult<FocusSession> {
    quick_target(task, item_id)?;

    let minutes = minutes.max(1);
    let mut task = task.clone();
    if is_bare_target(&task, item_id) {
        task.planned_duration_minutes = minutes;
    } else if let Some(item) = task.find_item_mut(item_id) {
        item.allocated_minutes = minutes;
        task.sync_planned_duration();
    }

    let mut session = FocusSession::pinned(task, item_id, u64::from(minutes) * 60);
    session.start(now);
    info!(%item_id, minutes, "quick-start session");
    Ok(session)
}

/// Tick an item off without timing it. No time is recorded.
pub fn quick_complete(task: &mut Task, item_id: Uuid) -> SessionResult<()> {
    quick_target(task, item_id)?;
    if is_bare_target(task, item_id) {
        task.mark_completed();
    } else if let Some(item) = task.find_item_mut(item_id) {
        item.is_completed = true;
    }
    info!(%item_id, "item completed without timing");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::TaskStatus;
    use crate::domain::{Category, Phase, Resolution};
    use crate::session::Reallocation;
    use std::time::Duration;

    fn task() -> Task {
        let mut task = Task::new("Chores".to_string(), Category::Errand, 0);
        task.add_subtask("Laundry".to_string(), 0);
        task.add_subtask("Groceries".to_string(), 40);
        task
    }

    #[test]
    fn test_suggested_minutes() {
        let task = task();
        assert_eq!(suggested_minutes(&task.subtasks[0], DEFAULT_QUICK_MINUTES), 25);
        assert_eq!(suggested_minutes(&task.subtasks[1], DEFAULT_QUICK_MINUTES), 40);
    }

    #[test]
    fn test_quick_start_pins_and_updates_allocation() {
        let task = task();
        let (laundry, groceries) = (task.subtasks[0].id, task.subtasks[1].id);
        let t0 = Instant::now();

        let mut session = quick_start(&task, laundry, 15, t0).unwrap();
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.active_item_id(), Some(laundry));
        assert_eq!(session.task().find_item(laundry).unwrap().allocated_minutes, 15);
        assert_eq!(session.remaining_secs(), 15 * 60);

        assert!(!session.set_active(groceries));
        assert_eq!(session.active_item_id(), Some(laundry));

        // The original task is untouched until the session resolves
        assert_eq!(task.subtasks[0].allocated_minutes, 0);
    }

    #[test]
    fn test_quick_start_clamps_to_one_minute() {
        let task = task();
        let laundry = task.subtasks[0].id;
        let t0 = Instant::now();

        let mut session = quick_start(&task, laundry, 0, t0).unwrap();
        assert_eq!(session.remaining_secs(), 60);
        assert_eq!(session.tick(t0 + Duration::from_secs(60)), Phase::Reviewing);
    }

    #[test]
    fn test_quick_start_rejects_completed_and_unknown() {
        let mut task = task();
        task.subtasks[1].is_completed = true;
        let t0 = Instant::now();

        assert_eq!(
            quick_start(&task, task.subtasks[1].id, 10, t0).unwrap_err(),
            SessionError::ItemCompleted(task.subtasks[1].id)
        );
        let unknown = Uuid::new_v4();
        assert_eq!(
            quick_start(&task, unknown, 10, t0).unwrap_err(),
            SessionError::ItemNotFound(unknown)
        );
    }

    #[test]
    fn test_quick_session_extend_and_close() {
        let task = task();
        let groceries = task.subtasks[1].id;
        let t0 = Instant::now();

        let mut session = quick_start(&task, groceries, 10, t0).unwrap();
        assert_eq!(
            session.reallocate(),
            Some(Reallocation::ClockExtended { seconds: 300 })
        );
        assert_eq!(session.task().subtasks[0].allocated_minutes, 0);

        session.tick(t0 + Duration::from_secs(100));
        session.stop(t0 + Duration::from_secs(100));
        assert!(matches!(
            session.resolve(Resolution::MigrateRemaining),
            Err(SessionError::UnsupportedResolution(_))
        ));
        assert_eq!(session.phase(), Phase::Reviewing);

        let resolved = session
            .resolve(Resolution::CloseAndSave { complete: true })
            .unwrap();
        let item = resolved.task.find_item(groceries).unwrap();
        assert!(item.is_completed);
        assert_eq!(item.actual_minutes, 2);
        assert!(!resolved.task.is_completed());
        assert_eq!(resolved.task.actual_duration_minutes, 2);
    }

    #[test]
    fn test_quick_complete() {
        let mut task = task();
        let laundry = task.subtasks[0].id;

        quick_complete(&mut task, laundry).unwrap();
        assert!(task.subtasks[0].is_completed);
        assert_eq!(task.subtasks[0].actual_minutes, 0);
        assert_eq!(task.actual_duration_minutes, 0);
        assert_eq!(
            quick_complete(&mut task, laundry).unwrap_err(),
            SessionError::ItemCompleted(laundry)
        );
    }

    #[test]
    fn test_quick_start_on_bare_task() {
        let task = Task::new("Read chapter".to_string(), Category::Study, 20);
        let t0 = Instant::now();

        let mut session = quick_start(&task, task.id, 10, t0).unwrap();
        assert!(session.is_pinned());
        assert_eq!(session.active_item_id(), Some(task.id));
        assert_eq!(session.task().planned_duration_minutes, 10);
        assert_eq!(session.remaining_secs(), 10 * 60);
        assert_eq!(
            session.reallocate(),
            Some(Reallocation::ClockExtended { seconds: 300 })
        );

        session.tick(t0 + Duration::from_secs(90));
        session.stop(t0 + Duration::from_secs(90));
        let resolved = session
            .resolve(Resolution::CloseAndSave { complete: true })
            .unwrap();
        assert_eq!(resolved.task.status, TaskStatus::Completed);
        assert_eq!(resolved.task.actual_duration_minutes, 2);
        assert!(resolved.task.subtasks.is_empty());
        // The plan passed to the original is untouched until applied
        assert_eq!(task.planned_duration_minutes, 20);
    }

    #[test]
    fn test_quick_start_bare_task_closed_without_completion() {
        let task = Task::new("Read chapter".to_string(), Category::Study, 20);
        let t0 = Instant::now();

        let mut session = quick_start(&task, task.id, 5, t0).unwrap();
        session.tick(t0 + Duration::from_secs(30));
        let resolved = session.abandon(t0 + Duration::from_secs(30)).unwrap();
        assert_eq!(resolved.task.status, TaskStatus::InProgress);
        assert_eq!(resolved.task.actual_duration_minutes, 1);
    }

    #[test]
    fn test_quick_complete_on_bare_task() {
        let mut task = Task::new("Read chapter".to_string(), Category::Study, 20);
        let task_id = task.id;

        quick_complete(&mut task, task_id).unwrap();
        assert!(task.is_completed());
        assert_eq!(task.actual_duration_minutes, 0);
        assert_eq!(
            quick_complete(&mut task, task_id).unwrap_err(),
            SessionError::ItemCompleted(task_id)
        );
    }

    #[test]
    fn test_task_id_is_not_an_item_once_it_has_subtasks() {
        let task = task();
        assert_eq!(
            quick_target(&task, task.id).unwrap_err(),
            SessionError::ItemNotFound(task.id)
        );
        assert_eq!(quick_target(&task, task.subtasks[1].id).unwrap().title, "Groceries");
    }
}
