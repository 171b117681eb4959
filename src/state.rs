use crate::data::Pos;

/// One puzzle configuration: player position plus box positions.
///
/// Boxes are kept sorted so that two states with the same boxes in a
/// different order are equal and hash identically - the order is a canonical
/// internal representation, never meaningful data. Immutable after creation;
/// every transition builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub player: Pos,
    boxes: Vec<Pos>,
}

impl State {
    pub fn new(player: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        State { player, boxes }
    }

    /// Box positions in canonical (sorted) order.
    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }
}
