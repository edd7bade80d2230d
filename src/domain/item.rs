use super::enums::{Category, TaskStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// An ordered, individually time-tracked sub-objective of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    /// Time budget in minutes
    pub allocated_minutes: u32,
    /// Minutes recorded across all flushed sessions
    pub actual_minutes: u32,
    pub is_completed: bool,
}

impl WorkItem {
    pub fn new(title: String, category: Category, allocated_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            category,
            allocated_minutes,
            actual_minutes: 0,
            is_completed: false,
        }
    }

    /// Increase allocation by a number of minutes
    pub fn increase_allocation(&mut self, minutes: u32) {
        self.allocated_minutes = self.allocated_minutes.saturating_add(minutes);
    }

    /// Decrease allocation by a number of minutes (floored at 0)
    pub fn decrease_allocation(&mut self, minutes: u32) {
        self.allocated_minutes = self.allocated_minutes.saturating_sub(minutes);
    }

    pub fn allocated_formatted(&self) -> String {
        format_minutes(self.allocated_minutes)
    }

    pub fn actual_formatted(&self) -> String {
        format_minutes(self.actual_minutes)
    }
}

/// Format minutes as "Xh Ym" (omits 0 values)
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// A task with its ordered work items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    /// Sum of subtask allocations, or an explicit override for tasks without subtasks
    pub planned_duration_minutes: u32,
    /// Minutes recorded across all sessions
    pub actual_duration_minutes: u32,
    pub status: TaskStatus,
    #[serde(default)]
    pub subtasks: Vec<WorkItem>,
    #[serde(default)]
    pub is_backlog: bool,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    pub fn new(title: String, category: Category, planned_duration_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            category,
            planned_duration_minutes,
            actual_duration_minutes: 0,
            status: TaskStatus::Todo,
            subtasks: Vec::new(),
            is_backlog: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Create a standalone backlog task
    pub fn new_backlog(title: String, category: Category, planned_duration_minutes: u32) -> Self {
        let mut task = Self::new(title, category, planned_duration_minutes);
        task.is_backlog = true;
        task
    }

    /// Detach a work item into a standalone backlog task with no parent link.
    /// Recorded minutes stay with the parent, so the new task starts at zero.
    pub fn backlog_from_item(item: &WorkItem) -> Self {
        Self::new_backlog(item.title.clone(), item.category, item.allocated_minutes)
    }

    /// Turn a backlog task into a work item for another task
    pub fn into_work_item(self) -> WorkItem {
        WorkItem::new(self.title, self.category, self.planned_duration_minutes)
    }

    /// Add a subtask with a budget; it inherits the task's category
    pub fn add_subtask(&mut self, title: String, allocated_minutes: u32) -> Uuid {
        let item = WorkItem::new(title, self.category, allocated_minutes);
        let id = item.id;
        if let Some(lead) = self.push_subtask(item) {
            debug!(%lead, task = %self.title, "kept the task plan as its first item");
        }
        id
    }

    /// Append an existing work item and re-sum the planned duration.
    ///
    /// When the first subtask arrives on a task with a plan, that plan and its
    /// recorded minutes become a leading item named after the task. Returns
    /// the leading item's id when one was created.
    pub fn push_subtask(&mut self, item: WorkItem) -> Option<Uuid> {
        let lead_id = if self.subtasks.is_empty() && self.planned_duration_minutes > 0 {
            let lead = WorkItem {
                id: Uuid::new_v4(),
                ..self.as_work_item()
            };
            let id = lead.id;
            self.subtasks.push(lead);
            Some(id)
        } else {
            None
        };
        self.subtasks.push(item);
        self.sync_planned_duration();
        lead_id
    }

    /// The task seen as its own single work item (same id and title)
    pub fn as_work_item(&self) -> WorkItem {
        WorkItem {
            id: self.id,
            title: self.title.clone(),
            category: self.category,
            allocated_minutes: self.planned_duration_minutes,
            actual_minutes: self.actual_duration_minutes,
            is_completed: self.is_completed(),
        }
    }

    /// Remove a subtask by id
    pub fn remove_subtask(&mut self, item_id: Uuid) -> Option<WorkItem> {
        let index = self.subtasks.iter().position(|st| st.id == item_id)?;
        let item = self.subtasks.remove(index);
        self.sync_planned_duration();
        Some(item)
    }

    /// Planned duration follows the subtask allocations whenever there are any
    pub fn sync_planned_duration(&mut self) {
        if !self.subtasks.is_empty() {
            self.planned_duration_minutes = self.subtask_total_allocation();
        }
    }

    pub fn subtask_total_allocation(&self) -> u32 {
        self.subtasks.iter().map(|st| st.allocated_minutes).sum()
    }

    pub fn find_item(&self, item_id: Uuid) -> Option<&WorkItem> {
        self.subtasks.iter().find(|st| st.id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: Uuid) -> Option<&mut WorkItem> {
        self.subtasks.iter_mut().find(|st| st.id == item_id)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Mark the task itself as completed
    pub fn mark_completed(&mut self) {
        if self.status != TaskStatus::Completed {
            self.status = TaskStatus::Completed;
            self.completed_at = Some(Local::now());
        }
    }

    /// Manual toggle between completed and todo
    pub fn toggle_completed(&mut self) {
        if self.is_completed() {
            self.status = TaskStatus::Todo;
            self.completed_at = None;
        } else {
            self.mark_completed();
        }
    }

    /// A todo task becomes in progress once a session starts on it
    pub fn mark_in_progress(&mut self) {
        if self.status == TaskStatus::Todo {
            self.status = TaskStatus::InProgress;
        }
    }
}
