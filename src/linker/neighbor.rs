use crate::core::{
    Direction,
    LinkError,
    Note,
};

/// Indices of `notes` in neighbor order: ascending by sort key, ties
/// broken by note id so the relation stays deterministic.
pub fn sorted_order(notes: &[Note]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..notes.len()).collect();
    order.sort_by(|&a, &b| {
        notes[a]
            .sort_key
            .cmp(&notes[b].sort_key)
            .then_with(|| notes[a].id.cmp(&notes[b].id))
    });
    order
}

/// Index into `notes` of the note adjacent to `note_id` in sort order.
/// `NoNeighbor` when the note is not in the slice or sits at the boundary
/// the requested direction would step past. Pure; no side effects.
pub fn find_neighbor(
    notes: &[Note],
    note_id: u64,
    direction: Direction,
) -> Result<usize, LinkError> {
    let order = sorted_order(notes);
    let position = order
        .iter()
        .position(|&i| notes[i].id == note_id)
        .ok_or(LinkError::NoNeighbor)?;

    let neighbor_position = match direction {
        Direction::Previous => position.checked_sub(1),
        Direction::Next => {
            if position + 1 < order.len() {
                Some(position + 1)
            } else {
                None
            }
        }
    };

    neighbor_position.map(|p| order[p]).ok_or(LinkError::NoNeighbor)
}
