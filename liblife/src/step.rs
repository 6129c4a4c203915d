//! Generation stepping.
//!
//! A generation is computed in two phases. [`compute_generation`] scans the whole board
//! against one unmodified snapshot and collects the cells whose state changes, then
//! [`apply_generation`] flips exactly those cells. Flipping cells while still scanning
//! would feed half-updated neighbors into later counts.

use crate::{
    board::{Board, CellState},
    error::BoardError,
    pos::Position,
    rule,
};

const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// Positions whose state differs between the current generation and the next, in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipSet {
    positions: Vec<Position>,
}

impl FlipSet {
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.binary_search(&pos).is_ok()
    }
}

/// Counts the live cells in the Moore neighborhood of `pos`. Neighbors outside the grid count as dead.
pub fn count_alive_neighbors(board: &Board, pos: Position) -> Result<usize, BoardError> {
    board.get(pos)?;
    Ok(alive_neighbors(board, pos))
}

/// Scans `board` and returns every position whose next state differs from its current one.
pub fn compute_generation(board: &Board) -> FlipSet {
    let positions = board
        .enumerate_cells()
        .filter(|&(pos, cell)| rule::next_state(cell, alive_neighbors(board, pos)) != cell)
        .map(|(pos, _)| pos)
        .collect();

    FlipSet { positions }
}

/// Toggles exactly the positions in `flips`. Nothing is touched unless every position is on the board.
pub fn apply_generation(board: &mut Board, flips: &FlipSet) -> Result<(), BoardError> {
    for &pos in flips.positions() {
        board.get(pos)?;
    }

    for &pos in flips.positions() {
        board.toggle(pos)?;
    }

    Ok(())
}

/// Advances `board` by one generation and returns the flips that were applied.
pub fn step(board: &mut Board) -> FlipSet {
    let flips = compute_generation(board);

    // SAFETY: The flips were computed from this very board, so every position is in bounds.
    apply_generation(board, &flips).expect("flips computed from the same board");

    flips
}

fn alive_neighbors(board: &Board, pos: Position) -> usize {
    NEIGHBOR_RELATIVE_POSITIONS
        .iter()
        .filter_map(|[d_row, d_col]| pos.offset(*d_row, *d_col))
        .filter(|neighbor| board.get(*neighbor).is_ok_and(CellState::is_alive))
        .count()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn blinker_horizontal() -> Board {
        Board::with_alive(5, 5, [(2, 1), (2, 2), (2, 3)]).unwrap()
    }

    fn blinker_vertical() -> Board {
        Board::with_alive(5, 5, [(1, 2), (2, 2), (3, 2)]).unwrap()
    }

    #[test]
    fn when_counting_an_interior_cell_then_all_eight_neighbors_are_seen() {
        let mut board = Board::new(3, 3);
        board.randomize(&mut rand::rng(), 1.0).unwrap();

        assert_eq!(count_alive_neighbors(&board, Position::new(1, 1)), Ok(8));

        board.set((1, 1), CellState::Dead).unwrap();
        board.set((0, 0), CellState::Dead).unwrap();
        assert_eq!(count_alive_neighbors(&board, Position::new(1, 1)), Ok(7));
    }

    #[test]
    fn when_counting_a_cell_then_the_cell_itself_is_ignored() {
        let board = Board::with_alive(3, 3, [(1, 1)]).unwrap();

        assert_eq!(count_alive_neighbors(&board, Position::new(1, 1)), Ok(0));
        assert_eq!(count_alive_neighbors(&board, Position::new(0, 0)), Ok(1));
    }

    #[test]
    fn when_counting_a_corner_cell_then_off_grid_neighbors_count_as_dead() {
        let mut board = Board::new(4, 4);
        board.randomize(&mut rand::rng(), 1.0).unwrap();

        assert_eq!(count_alive_neighbors(&board, Position::new(0, 0)), Ok(3));
        assert_eq!(count_alive_neighbors(&board, Position::new(3, 3)), Ok(3));
        assert_eq!(count_alive_neighbors(&board, Position::new(0, 2)), Ok(5));
        assert_eq!(count_alive_neighbors(&board, Position::new(2, 3)), Ok(5));
    }

    #[test]
    fn when_counting_outside_the_grid_then_out_of_bounds_is_returned() {
        let board = Board::new(4, 4);

        assert!(matches!(
            count_alive_neighbors(&board, Position::new(4, 0)),
            Err(BoardError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn when_stepping_a_block_then_nothing_changes() {
        let mut board = Board::with_alive(6, 6, [(2, 2), (2, 3), (3, 2), (3, 3)]).unwrap();
        let before = board.clone();

        let flips = step(&mut board);

        assert!(flips.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn when_stepping_a_blinker_then_it_oscillates_with_period_two() {
        let mut board = blinker_horizontal();

        step(&mut board);
        assert_eq!(board, blinker_vertical());

        step(&mut board);
        assert_eq!(board, blinker_horizontal());
    }

    #[test]
    fn when_computing_a_blinker_generation_then_the_flips_are_the_four_tips() {
        let flips = compute_generation(&blinker_horizontal());

        assert_eq!(
            flips.positions(),
            &[
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(2, 3),
                Position::new(3, 2),
            ]
        );
        assert!(flips.contains(Position::new(2, 1)));
        assert!(!flips.contains(Position::new(2, 2)));
    }

    #[test]
    fn when_a_blinker_lies_on_the_edge_then_it_dies_out_instead_of_wrapping() {
        let mut board = Board::with_alive(5, 5, [(0, 1), (0, 2), (0, 3)]).unwrap();

        step(&mut board);
        assert_eq!(board, Board::with_alive(5, 5, [(0, 2), (1, 2)]).unwrap());

        step(&mut board);
        assert!(board.is_empty());
    }

    #[test]
    fn when_every_cell_is_isolated_then_the_board_empties_in_one_step() {
        let mut board = Board::with_alive(7, 7, [(0, 0), (3, 3), (6, 6), (0, 6)]).unwrap();

        step(&mut board);

        assert!(board.is_empty());
    }

    #[test]
    fn when_applying_foreign_flips_then_the_board_is_left_untouched() {
        let big = Board::with_alive(8, 8, [(6, 5), (6, 6), (6, 7)]).unwrap();
        let flips = compute_generation(&big);

        let mut small = Board::with_alive(4, 4, [(1, 1)]).unwrap();
        let before = small.clone();

        assert!(apply_generation(&mut small, &flips).is_err());
        assert_eq!(small, before);
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        (1usize..12, 1usize..12)
            .prop_flat_map(|(width, height)| {
                (Just(width), Just(height), prop::collection::vec(any::<bool>(), width * height))
            })
            .prop_map(|(width, height, cells)| {
                let alive = cells
                    .iter()
                    .enumerate()
                    .filter(|(_, alive)| **alive)
                    .map(|(index, _)| (index / width, index % width));
                Board::with_alive(width, height, alive).unwrap()
            })
    }

    proptest! {
        #[test]
        fn computing_a_generation_is_pure(board in arb_board()) {
            let before = board.clone();

            let first = compute_generation(&board);
            let second = compute_generation(&board);

            prop_assert_eq!(first, second);
            prop_assert_eq!(board, before);
        }

        #[test]
        fn neighbor_counts_never_exceed_eight(board in arb_board()) {
            for pos in board.positions() {
                let count = count_alive_neighbors(&board, pos).unwrap();
                prop_assert!(count <= 8);
            }
        }

        #[test]
        fn applying_flips_matches_a_double_buffered_generation(board in arb_board()) {
            let mut next = Board::new(board.width(), board.height());
            for (pos, cell) in board.enumerate_cells() {
                let count = count_alive_neighbors(&board, pos).unwrap();
                next.set(pos, rule::next_state(cell, count)).unwrap();
            }

            let mut stepped = board.clone();
            step(&mut stepped);

            prop_assert_eq!(stepped, next);
        }
    }
}
