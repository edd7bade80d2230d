use crate::domain::Task;
use crate::session::Resolved;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Every task the user has, backlog entries included (flagged `is_backlog`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    /// Tasks on the main list, in insertion order
    pub fn active(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.is_backlog).collect()
    }

    /// Backlog tasks, in insertion order
    pub fn backlog(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_backlog).collect()
    }

    pub fn add_task(&mut self, task: Task) -> Uuid {
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Resolve a 1-based number from the main list
    pub fn active_id(&self, number: usize) -> Result<Uuid> {
        pick(&self.active(), number).with_context(|| format!("No task #{}", number))
    }

    /// Resolve a 1-based number from the backlog
    pub fn backlog_id(&self, number: usize) -> Result<Uuid> {
        pick(&self.backlog(), number).with_context(|| format!("No backlog task #{}", number))
    }

    /// Resolve a 1-based subtask number within a task
    pub fn subtask_id(&self, task_id: Uuid, number: usize) -> Result<Uuid> {
        let task = self.task(task_id).context("Task not found")?;
        number
            .checked_sub(1)
            .and_then(|idx| task.subtasks.get(idx))
            .map(|item| item.id)
            .with_context(|| format!("Task \"{}\" has no subtask #{}", task.title, number))
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_task(&mut self, id: Uuid) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Store the outcome of a session: replace the task, append new backlog tasks
    pub fn apply_resolution(&mut self, resolved: Resolved) {
        let Resolved { task, backlog } = resolved;
        match self.task_mut(task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
        if !backlog.is_empty() {
            info!(count = backlog.len(), "added migrated items to backlog");
        }
        self.tasks.extend(backlog);
    }

    /// Move a backlog task into another task's work items
    pub fn promote(&mut self, backlog_id: Uuid, into_id: Uuid) -> Result<Uuid> {
        let is_backlog = self.task(backlog_id).is_some_and(|t| t.is_backlog);
        if !is_backlog {
            anyhow::bail!("Task is not in the backlog");
        }
        if self.task(into_id).is_none() {
            anyhow::bail!("Target task not found");
        }

        let backlog_task = self
            .remove_task(backlog_id)
            .context("Backlog task disappeared")?;
        let item = backlog_task.into_work_item();
        let item_id = item.id;
        let target = self.task_mut(into_id).context("Target task not found")?;
        if let Some(lead) = target.push_subtask(item) {
            info!(%lead, target = %target.title, "kept the target's plan as its first item");
        }
        info!(target = %target.title, "promoted backlog task");
        Ok(item_id)
    }
}

fn pick(tasks: &[&Task], number: usize) -> Option<Uuid> {
    number
        .checked_sub(1)
        .and_then(|idx| tasks.get(idx))
        .map(|t| t.id)
}

/// Load the board from board.json (empty board if the file doesn't exist)
pub fn load_board<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = crate::persistence::read_file(path.as_ref())?;
    if content.trim().is_empty() {
        return Ok(Board::default());
    }
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse board: {}", path.as_ref().display()))
}

/// Save the board to board.json
pub fn save_board<P: AsRef<Path>>(path: P, board: &Board) -> Result<()> {
    let json = serde_json::to_string_pretty(board)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::TaskStatus;
    use crate::domain::Category;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn board() -> Board {
        let mut board = Board::default();
        let mut task = Task::new("Ship".to_string(), Category::Work, 0);
        task.add_subtask("Tests".to_string(), 20);
        board.add_task(task);
        board.add_task(Task::new_backlog("Read RFC".to_string(), Category::Study, 15));
        board.add_task(Task::new("Gym".to_string(), Category::Health, 45));
        board
    }

    #[test]
    fn test_active_and_backlog_numbering() {
        let board = board();
        assert_eq!(board.active().len(), 2);
        assert_eq!(board.backlog().len(), 1);

        let gym = board.active_id(2).unwrap();
        assert_eq!(board.task(gym).unwrap().title, "Gym");
        assert!(board.active_id(0).is_err());
        assert!(board.active_id(3).is_err());
        assert_eq!(
            board.task(board.backlog_id(1).unwrap()).unwrap().title,
            "Read RFC"
        );
    }

    #[test]
    fn test_subtask_id() {
        let board = board();
        let ship = board.active_id(1).unwrap();
        let tests = board.subtask_id(ship, 1).unwrap();
        assert_eq!(board.task(ship).unwrap().subtasks[0].id, tests);
        assert!(board.subtask_id(ship, 2).is_err());
    }

    #[test]
    fn test_promote_backlog_task() {
        let mut board = board();
        let ship = board.active_id(1).unwrap();
        let rfc = board.backlog_id(1).unwrap();

        board.promote(rfc, ship).unwrap();

        assert!(board.backlog().is_empty());
        let ship = board.task(ship).unwrap();
        assert_eq!(ship.subtasks.len(), 2);
        assert_eq!(ship.subtasks[1].title, "Read RFC");
        assert_eq!(ship.subtasks[1].category, Category::Study);
        assert_eq!(ship.planned_duration_minutes, 35);
    }

    #[test]
    fn test_promote_into_bare_task_keeps_its_plan() {
        let mut board = board();
        let gym = board.active_id(2).unwrap();
        let rfc = board.backlog_id(1).unwrap();

        board.promote(rfc, gym).unwrap();

        let gym = board.task(gym).unwrap();
        assert_eq!(gym.subtasks.len(), 2);
        assert_eq!(gym.subtasks[0].title, "Gym");
        assert_eq!(gym.subtasks[0].allocated_minutes, 45);
        assert_eq!(gym.subtasks[1].title, "Read RFC");
        assert_eq!(gym.planned_duration_minutes, 60);
    }

    #[test]
    fn test_promote_rejects_non_backlog() {
        let mut board = board();
        let ship = board.active_id(1).unwrap();
        let gym = board.active_id(2).unwrap();
        assert!(board.promote(gym, ship).is_err());
        assert_eq!(board.active().len(), 2);
    }

    #[test]
    fn test_apply_resolution_replaces_and_appends() {
        let mut board = board();
        let ship_id = board.active_id(1).unwrap();
        let mut task = board.task(ship_id).unwrap().clone();
        task.status = TaskStatus::Completed;
        let extra = Task::new_backlog("Docs".to_string(), Category::Work, 10);

        board.apply_resolution(Resolved {
            task,
            backlog: vec![extra],
        });

        assert_eq!(board.task(ship_id).unwrap().status, TaskStatus::Completed);
        assert_eq!(board.active().len(), 2);
        assert_eq!(board.backlog().len(), 2);
    }

    #[test]
    fn test_save_and_load_board() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("board.json");
        let board = board();

        save_board(&path, &board).unwrap();
        let loaded = load_board(&path).unwrap();
        assert_eq!(loaded.tasks, board.tasks);
    }

    #[test]
    fn test_load_missing_board_is_empty() {
        let temp_dir = tempdir().unwrap();
        let loaded = load_board(temp_dir.path().join("board.json")).unwrap();
        assert!(loaded.tasks.is_empty());
    }
}
