//! Ordering Policy
//!
//! Pure list transforms behind drag reorder and click-to-demote. Both keep
//! the list grouped by priority (highest first); inside a tier the relative
//! order comes from a position snapshot taken before sorting.

use std::cmp::Ordering;

use crate::models::Todo;

/// Server display order: priority desc, order asc, createdAt desc
pub fn display_sort(list: &mut [Todo]) {
    list.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.order.cmp(&b.order))
            .then(b.created_at.cmp(&a.created_at))
    });
}

/// Convert a gap slot in the pre-drag list (0..=len) into an insert index
/// for the list with the dragged row already removed.
pub fn slot_to_destination(source: usize, slot: usize) -> usize {
    if slot > source {
        slot - 1
    } else {
        slot
    }
}

/// Move `source` to `destination` and regroup by priority.
///
/// `None` for a cancelled drag or an out-of-range source. A destination past
/// the end lands on the last position.
pub fn drag_reorder(list: &[Todo], source: usize, destination: Option<usize>) -> Option<Vec<Todo>> {
    let destination = destination?;
    if source >= list.len() {
        return None;
    }

    let mut items = list.to_vec();
    let moved = items.remove(source);
    let destination = destination.min(items.len());
    items.insert(destination, moved);

    Some(sort_by_priority(items, None))
}

/// Send `id` to the bottom of its priority tier. `None` for an unknown id.
pub fn demote(list: &[Todo], id: &str) -> Option<Vec<Todo>> {
    let index = list.iter().position(|t| t.id == id)?;

    let mut items = list.to_vec();
    let clicked = items.remove(index);
    items.push(clicked);

    Some(sort_by_priority(items, Some(id)))
}

/// Rewrite each `order` to its index
pub fn assign_positions(list: &mut [Todo]) {
    for (index, todo) in list.iter_mut().enumerate() {
        todo.order = index as i64;
    }
}

fn sort_by_priority(items: Vec<Todo>, last_in_tier: Option<&str>) -> Vec<Todo> {
    let is_last = |t: &Todo| last_in_tier.is_some_and(|id| t.id == id);

    let mut snapshot: Vec<(usize, Todo)> = items.into_iter().enumerate().collect();
    snapshot.sort_by(|(pos_a, a), (pos_b, b)| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| match (is_last(a), is_last(b)) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            })
            .then(pos_a.cmp(pos_b))
    });
    snapshot.into_iter().map(|(_, todo)| todo).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo(id: &str, priority: i64) -> Todo {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Todo {
            id: id.to_string(),
            title: id.to_uppercase(),
            completed: false,
            priority,
            notes: String::new(),
            media: Vec::new(),
            order: 0,
            created_at: at,
            updated_at: at,
        }
    }

    fn ids(list: &[Todo]) -> Vec<&str> {
        list.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_drag_low_priority_snaps_back_below_higher_tier() {
        let list = vec![todo("c", 1), todo("a", 3), todo("b", 3)];

        let result = drag_reorder(&list, 0, Some(1)).unwrap();
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drag_within_tier_keeps_drop_position() {
        let list = vec![todo("a", 3), todo("b", 3), todo("c", 3)];

        let result = drag_reorder(&list, 2, Some(0)).unwrap();
        assert_eq!(ids(&result), vec!["c", "a", "b"]);

        let result = drag_reorder(&list, 0, Some(1)).unwrap();
        assert_eq!(ids(&result), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_drag_cancel_and_bad_source() {
        let list = vec![todo("a", 3), todo("b", 3)];
        assert_eq!(drag_reorder(&list, 0, None), None);
        assert_eq!(drag_reorder(&list, 5, Some(0)), None);
    }

    #[test]
    fn test_drag_destination_clamps_to_end() {
        let list = vec![todo("a", 3), todo("b", 3), todo("c", 3)];

        let result = drag_reorder(&list, 0, Some(99)).unwrap();
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_drag_mixed_tiers() {
        let list = vec![todo("h", 5), todo("a", 3), todo("b", 3), todo("l", 1)];

        // b above h: the tiers regroup, b still leads its own tier
        let result = drag_reorder(&list, 2, Some(0)).unwrap();
        assert_eq!(ids(&result), vec!["h", "b", "a", "l"]);
    }

    #[test]
    fn test_slot_to_destination() {
        // Rows [a, b, c], dragging b (source 1)
        assert_eq!(slot_to_destination(1, 0), 0);
        assert_eq!(slot_to_destination(1, 1), 1);
        assert_eq!(slot_to_destination(1, 2), 1);
        assert_eq!(slot_to_destination(1, 3), 2);
    }

    #[test]
    fn test_slot_round_trip_through_drag() {
        let list = vec![todo("a", 3), todo("b", 3), todo("c", 3)];

        let result = drag_reorder(&list, 0, Some(slot_to_destination(0, 3))).unwrap();
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_demote_moves_to_tier_end() {
        let list = vec![todo("h", 5), todo("a", 3), todo("b", 3), todo("c", 3), todo("l", 1)];

        let result = demote(&list, "a").unwrap();
        assert_eq!(ids(&result), vec!["h", "b", "c", "a", "l"]);

        let result = demote(&list, "h").unwrap();
        assert_eq!(ids(&result), ids(&list));
    }

    #[test]
    fn test_demote_with_duplicate_ids_is_deterministic() {
        let list = vec![todo("a", 3), todo("x", 3), todo("x", 3), todo("b", 3)];

        let result = demote(&list, "a").unwrap();
        assert_eq!(ids(&result), vec!["x", "x", "b", "a"]);
    }

    #[test]
    fn test_demote_unknown_id() {
        let list = vec![todo("a", 3)];
        assert_eq!(demote(&list, "zzz"), None);
    }

    #[test]
    fn test_assign_positions() {
        let mut list = vec![todo("a", 3), todo("b", 1)];
        list[0].order = 7;
        list[1].order = 7;

        assign_positions(&mut list);
        assert_eq!(list.iter().map(|t| t.order).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_display_sort() {
        let mut older = todo("older", 3);
        older.order = 1;
        let mut newer = todo("newer", 3);
        newer.order = 1;
        newer.created_at = older.created_at + chrono::Duration::seconds(5);
        let mut first = todo("first", 3);
        first.order = 0;

        let mut list = vec![older, todo("low", 1), newer, first, todo("top", 5)];
        display_sort(&mut list);
        assert_eq!(ids(&list), vec!["top", "first", "newer", "older", "low"]);
    }
}
