use serde::{Deserialize, Serialize};

/// Closed set of categories a task or work item can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Work,
    Study,
    Health,
    Personal,
    Errand,
    Other,
}

impl Category {
    /// Parse a category from a user-supplied label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "work" => Some(Self::Work),
            "study" => Some(Self::Study),
            "health" => Some(Self::Health),
            "personal" => Some(Self::Personal),
            "errand" | "errands" => Some(Self::Errand),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Study => "Study",
            Self::Health => "Health",
            Self::Personal => "Personal",
            Self::Errand => "Errand",
            Self::Other => "Other",
        }
    }

    /// Get all categories as a list
    pub fn all() -> &'static [Category] {
        &[
            Category::Work,
            Category::Study,
            Category::Health,
            Category::Personal,
            Category::Errand,
            Category::Other,
        ]
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Convert status to its tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Phase of a focus session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Budgets can still be adjusted, the clock has not started
    Editing,
    Running,
    /// Clock stopped and ledger flushed, waiting for a resolution
    Reviewing,
    Closed,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Editing => "Editing",
            Self::Running => "Running",
            Self::Reviewing => "Reviewing",
            Self::Closed => "Closed",
        }
    }
}

/// Terminal choice offered while reviewing a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep every item; optionally force the task (or pinned item) to completed
    CloseAndSave { complete: bool },
    /// Move unfinished items out to the backlog as standalone tasks
    MigrateRemaining,
}

/// UI mode for the focus screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Session,
    /// Duration prompt for a quick-start before the clock runs
    QuickPrompt,
    Review,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label() {
        assert_eq!(Category::from_label("work"), Some(Category::Work));
        assert_eq!(Category::from_label(" Study "), Some(Category::Study));
        assert_eq!(Category::from_label("errands"), Some(Category::Errand));
        assert_eq!(Category::from_label("gardening"), None);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_label(category.label()), Some(*category));
        }
    }

    #[test]
    fn test_task_status_tags() {
        assert_eq!(TaskStatus::Todo.to_tag(), "TODO");
        assert_eq!(TaskStatus::InProgress.to_tag(), "IN_PROGRESS");
        assert_eq!(TaskStatus::Completed.to_tag(), "COMPLETED");
        // Persisted form matches the tag
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
    }

    #[test]
    fn test_category_serializes_as_tag() {
        let json = serde_json::to_string(&Category::Errand).unwrap();
        assert_eq!(json, "\"ERRAND\"");
    }
}
