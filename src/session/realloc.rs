use super::selector::{first_incomplete, next_incomplete_after};
use crate::domain::WorkItem;
use uuid::Uuid;

/// Minutes moved per "Extend" press
pub const EXTEND_MINUTES: u32 = 5;
/// Seconds added to the clock when there is no item to borrow from
pub const EXTEND_SECONDS: u64 = EXTEND_MINUTES as u64 * 60;

/// Which branch of the extend policy ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reallocation {
    /// `current` gained five minutes, `next` gave up `taken` (at most five)
    Transferred { current: Uuid, next: Uuid, taken: u32 },
    /// Fewer than two incomplete items; the clock itself must be extended
    ClockExtended { seconds: u64 },
}

/// Apply "Extend +5m" to the items.
///
/// `current` is the first incomplete item and `next` the first incomplete item
/// after it. `current` always gains the full five minutes while `next` is
/// floored at zero; a shortfall is not recovered from anywhere else. When
/// `scope` is set only that item takes part, so the clock branch runs.
pub fn extend_current(items: &mut [WorkItem], scope: Option<Uuid>) -> Reallocation {
    let fallback = Reallocation::ClockExtended {
        seconds: EXTEND_SECONDS,
    };
    if scope.is_some() {
        return fallback;
    }

    let Some(current_idx) = first_incomplete(items) else {
        return fallback;
    };
    let Some(next_idx) = next_incomplete_after(items, current_idx) else {
        return fallback;
    };

    let taken = items[next_idx].allocated_minutes.min(EXTEND_MINUTES);
    items[current_idx].increase_allocation(EXTEND_MINUTES);
    items[next_idx].decrease_allocation(EXTEND_MINUTES);

    Reallocation::Transferred {
        current: items[current_idx].id,
        next: items[next_idx].id,
        taken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn item(title: &str, minutes: u32) -> WorkItem {
        WorkItem::new(title.to_string(), Category::Work, minutes)
    }

    #[test]
    fn test_transfer_between_first_two_incomplete() {
        let mut items = vec![item("A", 20), item("B", 10)];
        let result = extend_current(&mut items, None);

        assert_eq!(items[0].allocated_minutes, 25);
        assert_eq!(items[1].allocated_minutes, 5);
        assert_eq!(
            result,
            Reallocation::Transferred {
                current: items[0].id,
                next: items[1].id,
                taken: 5
            }
        );
    }

    #[test]
    fn test_next_floored_at_zero() {
        let mut items = vec![item("A", 20), item("B", 3)];
        let result = extend_current(&mut items, None);

        assert_eq!(items[0].allocated_minutes, 25);
        assert_eq!(items[1].allocated_minutes, 0);
        assert!(matches!(result, Reallocation::Transferred { taken: 3, .. }));

        extend_current(&mut items, None);
        assert_eq!(items[0].allocated_minutes, 30);
        assert_eq!(items[1].allocated_minutes, 0);
    }

    #[test]
    fn test_completed_items_are_skipped() {
        let mut items = vec![item("A", 10), item("B", 10), item("C", 10), item("D", 10)];
        items[0].is_completed = true;
        items[2].is_completed = true;

        extend_current(&mut items, None);

        assert_eq!(items[0].allocated_minutes, 10);
        assert_eq!(items[1].allocated_minutes, 15);
        assert_eq!(items[2].allocated_minutes, 10);
        assert_eq!(items[3].allocated_minutes, 5);
    }

    #[test]
    fn test_single_incomplete_item_extends_clock() {
        let mut items = vec![item("C", 10)];
        let result = extend_current(&mut items, None);

        assert_eq!(result, Reallocation::ClockExtended { seconds: 300 });
        assert_eq!(items[0].allocated_minutes, 10);
    }

    #[test]
    fn test_no_items_extends_clock() {
        let mut items: Vec<WorkItem> = Vec::new();
        assert_eq!(
            extend_current(&mut items, None),
            Reallocation::ClockExtended { seconds: 300 }
        );
    }

    #[test]
    fn test_scoped_extend_leaves_allocations() {
        let mut items = vec![item("A", 20), item("B", 10)];
        let scope = Some(items[1].id);
        let result = extend_current(&mut items, scope);

        assert_eq!(result, Reallocation::ClockExtended { seconds: 300 });
        assert_eq!(items[0].allocated_minutes, 20);
        assert_eq!(items[1].allocated_minutes, 10);
    }
}
