use crate::pos::Position;

/// A named arrangement of live cells, given as offsets from the pattern's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Positions of the live cells when the pattern's top-left corner sits on `origin`.
    pub fn cells_at(&self, origin: Position) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .map(move |&(row, col)| Position::new(origin.row + row, origin.col + col))
    }

    /// Number of rows and columns the pattern spans.
    pub fn extent(&self) -> (usize, usize) {
        let rows = self.cells.iter().map(|(row, _)| row + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|(_, col)| col + 1).max().unwrap_or(0);
        (rows, cols)
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
};

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

pub const PATTERNS: &[Pattern] = &[BLOCK, BLINKER, TOAD, BEACON, GLIDER, R_PENTOMINO];

/// Looks a built-in pattern up by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Board, step};

    fn stamp(pattern: &Pattern, width: usize, height: usize, origin: Position) -> Board {
        Board::with_alive(width, height, pattern.cells_at(origin)).unwrap()
    }

    #[test]
    fn when_looking_up_a_pattern_then_case_is_ignored() {
        assert_eq!(find("glider"), Some(&GLIDER));
        assert_eq!(find("R-PENTOMINO"), Some(&R_PENTOMINO));
        assert_eq!(find("gun"), None);
    }

    #[test]
    fn when_measuring_a_pattern_then_its_extent_covers_every_cell() {
        assert_eq!(BLOCK.extent(), (2, 2));
        assert_eq!(BLINKER.extent(), (1, 3));
        assert_eq!(BEACON.extent(), (4, 4));
    }

    #[test]
    fn when_stepping_the_oscillators_twice_then_they_return_to_their_start() {
        for pattern in [BLINKER, TOAD, BEACON] {
            let start = stamp(&pattern, 10, 10, Position::new(3, 3));
            let mut board = start.clone();

            step::step(&mut board);
            assert_ne!(board, start, "{} should change after one step", pattern.name);

            step::step(&mut board);
            assert_eq!(board, start, "{} should have period two", pattern.name);
        }
    }

    #[test]
    fn when_a_glider_runs_four_generations_then_it_moves_one_cell_diagonally() {
        let mut board = stamp(&GLIDER, 10, 10, Position::new(1, 1));

        for _ in 0..4 {
            step::step(&mut board);
        }

        assert_eq!(board, stamp(&GLIDER, 10, 10, Position::new(2, 2)));
    }
}
