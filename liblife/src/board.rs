use std::fmt;

use itertools::Itertools;
use rand::Rng;

use crate::{error::BoardError, pos::Position};

/// Fixed-size grid of cells, stored row-major.
///
/// Every access is bounds checked. There is no dead border around the grid: anything
/// outside `[0, height) x [0, width)` is an [`BoardError::OutOfBounds`] for direct access
/// and counts as permanently dead for neighbor lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::default(); width * height],
        }
    }

    /// Builds a board where exactly the given positions are alive.
    pub fn with_alive<I, P>(width: usize, height: usize, alive: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        let mut board = Self::new(width, height);
        for pos in alive {
            board.set(pos, CellState::Alive)?;
        }

        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn get<P>(&self, pos: P) -> Result<CellState, BoardError>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos.into())?;
        Ok(self.cells[index])
    }

    pub fn set<P>(&mut self, pos: P, state: CellState) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos.into())?;
        self.cells[index] = state;
        Ok(())
    }

    /// Flips a cell and returns its new state.
    pub fn toggle<P>(&mut self, pos: P) -> Result<CellState, BoardError>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos.into())?;
        let cell = &mut self.cells[index];
        *cell = cell.flipped();
        Ok(*cell)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Overwrites the whole board, bringing each cell alive independently with the given probability.
    pub fn randomize<R>(&mut self, rng: &mut R, probability: f64) -> Result<(), BoardError>
    where
        R: Rng + ?Sized,
    {
        if !(0.0..=1.0).contains(&probability) {
            return Err(BoardError::InvalidProbability(probability));
        }

        self.clear();
        for cell in &mut self.cells {
            if rng.random_bool(probability) {
                *cell = CellState::Alive;
            }
        }

        Ok(())
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..self.height)
            .cartesian_product(0..self.width)
            .map(Position::from)
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), *cell))
    }

    fn pos_to_index(&self, pos: Position) -> Result<usize, BoardError> {
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds {
                pos,
                width: self.width,
                height: self.height,
            });
        }

        Ok(pos.col + pos.row * self.width)
    }

    fn index_to_pos(&self, index: usize) -> Position {
        Position {
            row: index / self.width,
            col: index % self.width,
        }
    }
}

/// Renders alive cells as `#` and dead cells as `.`, one line per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row
                .iter()
                .map(|cell| if cell.is_alive() { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn flipped(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn when_creating_a_board_then_every_cell_is_dead() {
        let board = Board::new(40, 25);

        assert_eq!(board.width(), 40);
        assert_eq!(board.height(), 25);
        assert!(board.is_empty());
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn when_setting_a_cell_then_only_that_cell_changes() {
        let mut board = Board::new(4, 3);
        board.set((2, 3), CellState::Alive).unwrap();

        assert_eq!(board.get((2, 3)), Ok(CellState::Alive));
        assert_eq!(board.get((2, 2)), Ok(CellState::Dead));
        assert_eq!(board.population(), 1);
    }

    #[test]
    fn when_accessing_outside_the_grid_then_out_of_bounds_is_returned() {
        let mut board = Board::new(4, 3);
        let expected = BoardError::OutOfBounds {
            pos: Position::new(3, 0),
            width: 4,
            height: 3,
        };

        assert_eq!(board.get((3, 0)), Err(expected.clone()));
        assert_eq!(board.set((3, 0), CellState::Alive), Err(expected.clone()));
        assert_eq!(board.toggle((3, 0)), Err(expected));
        assert!(board.toggle((0, 4)).is_err());
        assert!(board.is_empty());
    }

    #[test]
    fn when_toggling_twice_then_the_cell_is_restored() {
        let mut board = Board::new(3, 3);

        assert_eq!(board.toggle((1, 1)), Ok(CellState::Alive));
        assert!(!board.is_empty());
        assert_eq!(board.toggle((1, 1)), Ok(CellState::Dead));
        assert!(board.is_empty());
    }

    #[test]
    fn when_clearing_then_the_board_is_empty() {
        let mut board = Board::with_alive(5, 5, [(0, 0), (4, 4), (2, 3)]).unwrap();
        assert_eq!(board.population(), 3);

        board.clear();

        assert!(board.is_empty());
    }

    #[test]
    fn when_randomizing_with_zero_probability_then_the_board_is_all_dead() {
        let mut board = Board::with_alive(6, 4, [(1, 1), (2, 2)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        board.randomize(&mut rng, 0.0).unwrap();

        assert!(board.is_empty());
    }

    #[test]
    fn when_randomizing_with_full_probability_then_the_board_is_all_alive() {
        let mut board = Board::new(6, 4);
        let mut rng = StdRng::seed_from_u64(7);

        board.randomize(&mut rng, 1.0).unwrap();

        assert_eq!(board.population(), 24);
    }

    #[test]
    fn when_randomizing_with_an_invalid_probability_then_the_board_is_untouched() {
        let mut board = Board::with_alive(3, 3, [(1, 1)]).unwrap();
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            board.randomize(&mut rng, -0.1),
            Err(BoardError::InvalidProbability(-0.1))
        );
        assert!(board.randomize(&mut rng, f64::NAN).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn when_randomizing_with_the_default_probability_then_roughly_a_fifth_is_alive() {
        let mut board = Board::new(100, 100);
        let mut rng = StdRng::seed_from_u64(42);

        board.randomize(&mut rng, 0.2).unwrap();

        let population = board.population();
        assert!((1500..2500).contains(&population), "population was {population}");
    }

    #[test]
    fn when_enumerating_cells_then_positions_are_row_major() {
        let board = Board::with_alive(3, 2, [(1, 0)]).unwrap();
        let cells: Vec<_> = board.enumerate_cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1].0, Position::new(0, 1));
        assert_eq!(cells[3], (Position::new(1, 0), CellState::Alive));
        assert!(board.positions().eq(cells.iter().map(|(pos, _)| *pos)));
    }

    #[test]
    fn when_displaying_a_board_then_rows_are_rendered_as_lines() {
        let board = Board::with_alive(3, 2, [(0, 1), (1, 2)]).unwrap();

        assert_eq!(board.to_string(), ".#.\n..#\n");
    }
}
