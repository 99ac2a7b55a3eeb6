//! Editor-side ordering helpers.
//!
//! Every function takes the current sequence by reference and returns a
//! fully renumbered copy, so callers swap in the result in one step and
//! never expose duplicate or gapped `order` values.

use crate::error::OrderError;
use crate::types::FieldDefinition;

/// Stable-sorts by `order` (ties keep sequence position) and reassigns
/// `order` to `0..n`.
pub fn renumber(fields: &[FieldDefinition]) -> Vec<FieldDefinition> {
    let mut sorted = fields.to_vec();
    sorted.sort_by_key(|f| f.order);
    assign_positions(sorted)
}

/// Moves the field at display position `from` so that it ends up at `to`,
/// then renumbers.
///
/// Positions count in display order (stable by `order`), not in the
/// stored sequence.
pub fn move_field(
    fields: &[FieldDefinition],
    from: usize,
    to: usize,
) -> Result<Vec<FieldDefinition>, OrderError> {
    let len = fields.len();
    for index in [from, to] {
        if index >= len {
            return Err(OrderError::IndexOutOfRange { index, len });
        }
    }
    let mut moved = fields.to_vec();
    moved.sort_by_key(|f| f.order);
    let field = moved.remove(from);
    moved.insert(to, field);
    Ok(assign_positions(moved))
}

/// Rebuilds the sequence in the order given by `names`, which must name
/// every field exactly once.
pub fn reorder_by_names<S: AsRef<str>>(
    fields: &[FieldDefinition],
    names: &[S],
) -> Result<Vec<FieldDefinition>, OrderError> {
    if names.len() != fields.len() {
        return Err(OrderError::NotAPermutation);
    }
    let mut remaining: Vec<Option<&FieldDefinition>> = fields.iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(fields.len());
    for name in names {
        let slot = remaining
            .iter_mut()
            .find(|slot| slot.is_some_and(|f| f.name.as_str() == name.as_ref()))
            .ok_or(OrderError::NotAPermutation)?;
        if let Some(field) = slot.take() {
            ordered.push(field.clone());
        }
    }
    Ok(assign_positions(ordered))
}

/// True when `order` values are exactly `0..n` in sequence.
pub fn is_normalized(fields: &[FieldDefinition]) -> bool {
    fields
        .iter()
        .enumerate()
        .all(|(i, f)| f.order == i as i64)
}

fn assign_positions(mut fields: Vec<FieldDefinition>) -> Vec<FieldDefinition> {
    for (position, field) in fields.iter_mut().enumerate() {
        field.order = position as i64;
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldName, FieldType};

    fn field(name: &str, order: i64) -> FieldDefinition {
        FieldDefinition::new(FieldName::new(name).unwrap(), name, FieldType::Text, order)
    }

    fn layout(fields: &[FieldDefinition]) -> Vec<(String, i64)> {
        fields
            .iter()
            .map(|f| (f.name.to_string(), f.order))
            .collect()
    }

    #[test]
    fn move_last_before_first() {
        let fields = vec![field("a", 0), field("b", 1), field("c", 2)];
        let moved = move_field(&fields, 2, 0).unwrap();
        assert_eq!(
            layout(&moved),
            vec![("c".into(), 0), ("a".into(), 1), ("b".into(), 2)]
        );
        // input untouched
        assert_eq!(layout(&fields)[0], ("a".into(), 0));
    }

    #[test]
    fn move_first_to_end() {
        let fields = vec![field("a", 0), field("b", 1), field("c", 2)];
        let moved = move_field(&fields, 0, 2).unwrap();
        assert_eq!(
            layout(&moved),
            vec![("b".into(), 0), ("c".into(), 1), ("a".into(), 2)]
        );
    }

    #[test]
    fn move_to_same_position_renumbers() {
        let fields = vec![field("a", 3), field("b", 9)];
        let moved = move_field(&fields, 1, 1).unwrap();
        assert_eq!(layout(&moved), vec![("a".into(), 0), ("b".into(), 1)]);
    }

    #[test]
    fn move_counts_display_positions_when_stored_unsorted() {
        let fields = vec![field("b", 5), field("a", 1), field("c", 9)];
        let unchanged = move_field(&fields, 0, 0).unwrap();
        assert_eq!(
            layout(&unchanged),
            vec![("a".into(), 0), ("b".into(), 1), ("c".into(), 2)]
        );
        let moved = move_field(&fields, 2, 0).unwrap();
        assert_eq!(
            layout(&moved),
            vec![("c".into(), 0), ("a".into(), 1), ("b".into(), 2)]
        );
    }

    #[test]
    fn move_out_of_range() {
        let fields = vec![field("a", 0)];
        assert_eq!(
            move_field(&fields, 0, 1),
            Err(OrderError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn renumber_keeps_ties_in_sequence_order() {
        let fields = vec![field("z", 5), field("a", 5), field("m", -1)];
        let renumbered = renumber(&fields);
        assert_eq!(
            layout(&renumbered),
            vec![("m".into(), 0), ("z".into(), 1), ("a".into(), 2)]
        );
        assert!(is_normalized(&renumbered));
        assert!(!is_normalized(&fields));
    }

    #[test]
    fn reorder_by_names_permutation() {
        let fields = vec![field("a", 0), field("b", 1), field("c", 2)];
        let reordered = reorder_by_names(&fields, &["b", "c", "a"]).unwrap();
        assert_eq!(
            layout(&reordered),
            vec![("b".into(), 0), ("c".into(), 1), ("a".into(), 2)]
        );
    }

    #[test]
    fn reorder_by_names_rejects_non_permutations() {
        let fields = vec![field("a", 0), field("b", 1)];
        assert_eq!(
            reorder_by_names(&fields, &["a"]),
            Err(OrderError::NotAPermutation)
        );
        assert_eq!(
            reorder_by_names(&fields, &["a", "a"]),
            Err(OrderError::NotAPermutation)
        );
        assert_eq!(
            reorder_by_names(&fields, &["a", "x"]),
            Err(OrderError::NotAPermutation)
        );
    }
}
