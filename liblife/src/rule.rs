use crate::board::CellState;

/// Conway's B3/S23 rule.
pub fn next_state(current: CellState, alive_neighbors: usize) -> CellState {
    match (current, alive_neighbors) {
        (CellState::Alive, 2 | 3) => CellState::Alive,
        (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}
