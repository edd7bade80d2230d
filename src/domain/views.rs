use super::enums::{Category, Phase};
use super::item::Task;
use uuid::Uuid;

/// One work item as the focus screen sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub allocated_minutes: u32,
    pub actual_minutes: u32,
    /// Seconds recorded this session but not flushed yet
    pub pending_seconds: u64,
    pub is_completed: bool,
    pub is_active: bool,
}

impl ItemRow {
    /// Progress including unflushed time, for live display
    pub fn live_ratio(&self) -> f64 {
        if self.allocated_minutes == 0 {
            return 1.0;
        }
        let spent = self.actual_minutes as f64 * 60.0 + self.pending_seconds as f64;
        spent / (self.allocated_minutes as f64 * 60.0)
    }
}

/// Plain data snapshot of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub task_title: String,
    pub phase: Phase,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub pinned: bool,
    /// The task has no subtasks and is timed as a single item
    pub implicit: bool,
    pub task_pending_seconds: u64,
    pub rows: Vec<ItemRow>,
}

impl SessionSnapshot {
    /// Fraction of the clock already used (0.0 to 1.0)
    pub fn clock_ratio(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        1.0 - self.remaining_secs as f64 / self.total_secs as f64
    }

    pub fn active_row(&self) -> Option<&ItemRow> {
        self.rows.iter().find(|row| row.is_active)
    }
}

/// A row of the board listing
#[derive(Debug, Clone)]
pub struct BoardRow {
    /// 1-based number used to refer to the task on the command line
    pub number: usize,
    /// Whether this is the last subtask of its parent
    pub is_last: bool,
    pub task_index: usize,
    pub subtask_index: Option<usize>,
}

/// Flatten tasks and their subtasks into numbered rows.
/// Subtasks are numbered within their task starting at 1.
pub fn flatten_tasks(tasks: &[&Task]) -> Vec<BoardRow> {
    let mut rows = Vec::new();

    for (task_idx, task) in tasks.iter().enumerate() {
        rows.push(BoardRow {
            number: task_idx + 1,
            is_last: false,
            task_index: task_idx,
            subtask_index: None,
        });

        let subtask_count = task.subtasks.len();
        for st_idx in 0..subtask_count {
            rows.push(BoardRow {
                number: st_idx + 1,
                is_last: st_idx == subtask_count - 1,
                task_index: task_idx,
                subtask_index: Some(st_idx),
            });
        }
    }

    rows
}

/// Format seconds as "MM:SS", or "H:MM:SS" past an hour
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Choose plant glyph based on progress ratio
pub fn plant_glyph(ratio: f64, use_emoji: bool) -> &'static str {
    if use_emoji {
        if ratio < 0.25 {
            "🌱"
        } else if ratio < 1.0 {
            "🌿"
        } else {
            "🌵"
        }
    } else if ratio < 0.25 {
        "*"
    } else if ratio < 1.0 {
        "+"
    } else {
        "!"
    }
}

/// Badge for a work item row
pub fn item_badge(row: &ItemRow) -> &'static str {
    if row.is_completed {
        "✓ DONE"
    } else if row.is_active {
        "⏱ REC"
    } else {
        "· WAIT"
    }
}

/// Get tree connector for subtasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_active: bool, is_completed: bool) -> ItemRow {
        ItemRow {
            id: Uuid::new_v4(),
            title: "Row".to_string(),
            category: Category::Work,
            allocated_minutes: 10,
            actual_minutes: 2,
            pending_seconds: 60,
            is_completed,
            is_active,
        }
    }

    #[test]
    fn test_flatten_tasks_with_subtasks() {
        let mut first = Task::new("Parent".to_string(), Category::Work, 0);
        first.add_subtask("Sub 1".to_string(), 10);
        first.add_subtask("Sub 2".to_string(), 10);
        let second = Task::new("Other".to_string(), Category::Work, 30);

        let rows = flatten_tasks(&[&first, &second]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].subtask_index, None);
        assert_eq!(rows[1].number, 1);
        assert!(!rows[1].is_last);
        assert!(rows[2].is_last);
        assert_eq!(rows[3].number, 2);
        assert_eq!(rows[3].subtask_index, None);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1800), "30:00");
        assert_eq!(format_clock(3725), "1:02:05");
    }

    #[test]
    fn test_live_ratio_counts_pending() {
        let row = row(true, false);
        assert_eq!(row.live_ratio(), 0.3);
    }

    #[test]
    fn test_item_badge() {
        assert_eq!(item_badge(&row(true, false)), "⏱ REC");
        assert_eq!(item_badge(&row(false, true)), "✓ DONE");
        assert_eq!(item_badge(&row(false, false)), "· WAIT");
    }

    #[test]
    fn test_plant_glyph() {
        assert_eq!(plant_glyph(0.1, true), "🌱");
        assert_eq!(plant_glyph(0.5, false), "+");
        assert_eq!(plant_glyph(1.2, false), "!");
    }

    #[test]
    fn test_tree_connector() {
        assert_eq!(tree_connector(false), "├─");
        assert_eq!(tree_connector(true), "└─");
    }
}
