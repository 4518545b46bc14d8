#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::ops::{Index, IndexMut};

pub mod patterns;

pub use patterns::{Figure, Pattern, PatternError};

pub trait World {
    fn board(&self) -> &Board;
    fn update(&mut self);

    fn width(&self) -> u32 {
        self.board().width()
    }

    fn height(&self) -> u32 {
        self.board().height()
    }
}

/// Fixed-size grid of live/dead cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, loc: Loc) -> Option<bool> {
        loc.grid_index(self.width, self.height)
            .map(|index| self.cells[index])
    }

    /// Out-of-range locations count as dead.
    pub fn is_alive(&self, loc: Loc) -> bool {
        self.get(loc).unwrap_or(false)
    }

    pub fn set(&mut self, loc: Loc, alive: bool) -> Option<()> {
        let index = loc.grid_index(self.width, self.height)?;
        self.cells[index] = alive;
        Some(())
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    pub fn live_locs(&self) -> impl Iterator<Item = Loc> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| Loc::new(index as u32 / width, index as u32 % width))
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn copy_from(&mut self, source: &Self) {
        assert_eq!((self.width, self.height), (source.width, source.height));
        self.cells.copy_from_slice(&source.cells);
    }

    /// Computes the following generation without touching `self`.
    pub fn next(&self) -> Board {
        let mut next = Board::new(self.width, self.height);
        self.update_into(&mut next);
        next
    }

    /// Writes the following generation into `next`, which must have the same
    /// dimensions. Only `self` is read, so every cell sees the old generation.
    pub fn update_into(&self, next: &mut Board) {
        assert_eq!((self.width, self.height), (next.width, next.height));
        for row in 0..self.height {
            for col in 0..self.width {
                let loc = Loc::new(row, col);
                let alive = self[loc];
                let live_neighbors = Neighborhood::new(self, loc).num_live_neighbors();
                next[loc] = CellFate::classify(alive, live_neighbors).next_alive(alive);
            }
        }
    }
}

impl Index<Loc> for Board {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        loc.grid_index(self.width, self.height)
            .map(|index| &self.cells[index])
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl IndexMut<Loc> for Board {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        match loc.grid_index(self.width, self.height) {
            Some(index) => &mut self.cells[index],
            None => panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col),
        }
    }
}

/// What happens to one cell during one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFate {
    Reproduction,
    Underpopulation,
    Overpopulation,
    Unchanged,
}

impl CellFate {
    pub fn classify(alive: bool, live_neighbors: u32) -> Self {
        match (alive, live_neighbors) {
            (true, 2 | 3) => CellFate::Unchanged,
            (true, 0 | 1) => CellFate::Underpopulation,
            (true, _) => CellFate::Overpopulation,
            (false, 3) => CellFate::Reproduction,
            (false, _) => CellFate::Unchanged,
        }
    }

    pub fn next_alive(self, alive: bool) -> bool {
        match self {
            CellFate::Reproduction => true,
            CellFate::Underpopulation | CellFate::Overpopulation => false,
            CellFate::Unchanged => alive,
        }
    }
}

/// The up to eight in-range cells around a center cell. The grid does not
/// wrap: neighbors past an edge are simply missing.
pub struct Neighborhood<'a> {
    board: &'a Board,
    rows: [Option<u32>; 3],
    cols: [Option<u32>; 3],
}

impl<'a> Neighborhood<'a> {
    pub fn new(board: &'a Board, center: Loc) -> Self {
        let (row_above, row_below) = Self::adjacent_indexes(center.row, board.height());
        let (col_left, col_right) = Self::adjacent_indexes(center.col, board.width());
        Self {
            board,
            rows: [row_above, Some(center.row), row_below],
            cols: [col_left, Some(center.col), col_right],
        }
    }

    pub fn num_live_neighbors(&self) -> u32 {
        let mut result = 0;
        self.for_neighbor_cells(|alive| {
            if alive {
                result += 1;
            }
        });
        result
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(bool),
    {
        self.for_cell(0, 0, &mut f);
        self.for_cell(0, 1, &mut f);
        self.for_cell(0, 2, &mut f);

        self.for_cell(1, 0, &mut f);
        self.for_cell(1, 2, &mut f);

        self.for_cell(2, 0, &mut f);
        self.for_cell(2, 1, &mut f);
        self.for_cell(2, 2, &mut f);
    }

    fn for_cell<F>(&self, row: usize, col: usize, f: &mut F)
    where
        F: FnMut(bool),
    {
        if let (Some(row), Some(col)) = (self.rows[row], self.cols[col]) {
            f(self.board[Loc::new(row, col)]);
        }
    }

    fn adjacent_indexes(cell_index: u32, max: u32) -> (Option<u32>, Option<u32>) {
        (
            cell_index.checked_sub(1),
            Some(cell_index + 1).filter(|index| *index < max),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(width: u32, height: u32, live: &[(u32, u32)]) -> Board {
        let mut board = Board::new(width, height);
        for &(row, col) in live {
            board[Loc::new(row, col)] = true;
        }
        board
    }

    #[test]
    fn all_dead_board_is_stable() {
        let board = Board::new(8, 5);
        assert_eq!(board.next(), board);
    }

    #[test]
    fn isolated_cell_dies() {
        let board = board_with(5, 5, &[(2, 2)]);
        let next = board.next();
        assert!(!next[Loc::new(2, 2)]);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn cell_with_two_or_three_neighbors_survives() {
        let two = board_with(5, 5, &[(2, 2), (1, 1), (3, 3)]);
        assert!(two.next()[Loc::new(2, 2)]);

        let three = board_with(5, 5, &[(2, 2), (1, 1), (1, 3), (3, 2)]);
        assert!(three.next()[Loc::new(2, 2)]);
    }

    #[test]
    fn crowded_cell_dies() {
        let board = board_with(5, 5, &[(2, 2), (1, 1), (1, 2), (1, 3), (2, 1)]);
        assert!(!board.next()[Loc::new(2, 2)]);
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let board = board_with(5, 5, &[(1, 1), (1, 3), (3, 2)]);
        assert!(board.next()[Loc::new(2, 2)]);
    }

    #[test]
    fn corner_counts_only_in_range_neighbors() {
        let board = board_with(4, 4, &[(0, 0), (0, 1), (1, 0)]);
        assert_eq!(Neighborhood::new(&board, Loc::new(0, 0)).num_live_neighbors(), 2);
        assert!(board.next()[Loc::new(0, 0)]);
    }

    #[test]
    fn edges_do_not_wrap() {
        // Live cells on the opposite edges would be neighbors on a torus.
        let board = board_with(5, 5, &[(0, 4), (4, 0), (4, 4)]);
        assert_eq!(Neighborhood::new(&board, Loc::new(0, 0)).num_live_neighbors(), 0);
        assert!(!board.next()[Loc::new(0, 0)]);
    }

    #[test]
    fn next_reads_only_the_old_generation() {
        // Blinker: an in-place update would corrupt the vertical phase.
        let horizontal = board_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = board_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(horizontal.next(), vertical);
        assert_eq!(vertical.next(), horizontal);
    }

    #[test]
    fn update_into_overwrites_stale_buffer() {
        let board = board_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let mut next = board_with(5, 5, &[(0, 0), (4, 4)]);
        board.update_into(&mut next);
        assert_eq!(next, board.next());
    }

    #[test]
    fn cell_fate_classification() {
        for neighbors in 0..=8 {
            let alive_fate = CellFate::classify(true, neighbors);
            let expected = match neighbors {
                0 | 1 => CellFate::Underpopulation,
                2 | 3 => CellFate::Unchanged,
                _ => CellFate::Overpopulation,
            };
            assert_eq!(alive_fate, expected, "alive with {neighbors}");

            let dead_fate = CellFate::classify(false, neighbors);
            if neighbors == 3 {
                assert_eq!(dead_fate, CellFate::Reproduction);
            } else {
                assert_eq!(dead_fate, CellFate::Unchanged, "dead with {neighbors}");
                assert!(!dead_fate.next_alive(false));
            }
        }
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut board = Board::new(3, 2);
        assert_eq!(board.set(Loc::new(1, 2), true), Some(()));
        assert_eq!(board.set(Loc::new(2, 0), true), None);
        assert_eq!(board.get(Loc::new(1, 2)), Some(true));
        assert_eq!(board.get(Loc::new(0, 3)), None);
        assert!(!board.is_alive(Loc::new(5, 5)));
        assert_eq!(board.live_locs().collect::<Vec<_>>(), vec![Loc::new(1, 2)]);

        let mut copy = Board::new(3, 2);
        copy.copy_from(&board);
        assert_eq!(copy, board);
        copy.clear();
        assert_eq!(copy.population(), 0);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let board = Board::new(3, 3);
        let _ = board[Loc::new(3, 0)];
    }
}
