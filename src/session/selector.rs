use crate::domain::WorkItem;
use tracing::debug;
use uuid::Uuid;

/// Index of the first incomplete item in list order
pub fn first_incomplete(items: &[WorkItem]) -> Option<usize> {
    items.iter().position(|item| !item.is_completed)
}

/// Index of the first incomplete item strictly after `index`
pub fn next_incomplete_after(items: &[WorkItem], index: usize) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, item)| !item.is_completed)
        .map(|(idx, _)| idx)
}

/// Tracks which item is currently recording time
#[derive(Debug, Clone, Default)]
pub struct Selector {
    active: Option<Uuid>,
    /// Quick-start sessions cannot switch away from this item
    pinned: Option<Uuid>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned_to(item_id: Uuid) -> Self {
        Self {
            active: None,
            pinned: Some(item_id),
        }
    }

    pub fn active(&self) -> Option<Uuid> {
        self.active
    }

    pub fn pinned(&self) -> Option<Uuid> {
        self.pinned
    }

    /// Pick an item if none is active: the pinned item when there is one,
    /// otherwise the first incomplete item. `None` means time goes to the task.
    pub fn auto_select(&mut self, items: &[WorkItem]) {
        if self.active.is_some_and(|id| is_selectable(items, id)) {
            return;
        }

        self.active = match self.pinned {
            Some(pinned) if is_selectable(items, pinned) => Some(pinned),
            Some(_) => None,
            None => first_incomplete(items).map(|idx| items[idx].id),
        };
        debug!(active = ?self.active, "auto-selected active item");
    }

    /// Switch the active item. Completed, unknown, or non-pinned items are
    /// rejected and leave the selection as it was.
    pub fn set_active(&mut self, items: &[WorkItem], item_id: Uuid) -> bool {
        if self.pinned.is_some_and(|pinned| pinned != item_id) {
            return false;
        }
        if !is_selectable(items, item_id) {
            return false;
        }
        self.active = Some(item_id);
        true
    }

    /// Re-run auto selection if the completed item was the active one
    pub fn on_item_completed(&mut self, items: &[WorkItem], item_id: Uuid) {
        if self.active == Some(item_id) {
            self.active = None;
            self.auto_select(items);
        }
    }
}

fn is_selectable(items: &[WorkItem], item_id: Uuid) -> bool {
    items
        .iter()
        .any(|item| item.id == item_id && !item.is_completed)
}
