use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::{Board, Loc};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Undefined pattern: {0:?}")]
    Unknown(String),
    #[error("Pattern cell {row}, {col} is outside the {width}x{height} board")]
    OutOfBounds {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },
}

/// Cells of a figure, with its placement on the board baked in.
#[derive(Clone, Copy, Debug)]
pub enum Figure {
    Cells(&'static [(u32, u32)]),
    /// Rows of text where `#` is alive and anything else is dead.
    Glyph {
        origin: Loc,
        rows: &'static [&'static str],
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    Glider,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
    LightweightSpaceship,
    GosperGliderGun,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Glider,
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Beacon,
        Pattern::Pulsar,
        Pattern::LightweightSpaceship,
        Pattern::GosperGliderGun,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Glider => "glider",
            Pattern::Blinker => "blinker",
            Pattern::Toad => "toad",
            Pattern::Beacon => "beacon",
            Pattern::Pulsar => "pulsar",
            Pattern::LightweightSpaceship => "lightweight-spaceship",
            Pattern::GosperGliderGun => "gosper-glider-gun",
        }
    }

    #[rustfmt::skip]
    pub fn figure(self) -> Figure {
        match self {
            Pattern::Glider => Figure::Cells(&[
                (2, 4),
                (3, 5),
                (4, 3), (4, 4), (4, 5),
            ]),
            Pattern::Blinker => Figure::Cells(&[
                (2, 1), (2, 2), (2, 3),
            ]),
            Pattern::Toad => Figure::Cells(&[
                (2, 2), (2, 3), (2, 4),
                (3, 1), (3, 2), (3, 3),
            ]),
            Pattern::Beacon => Figure::Glyph {
                origin: Loc::new(1, 1),
                rows: &[
                    "##..",
                    "##..",
                    "..##",
                    "..##",
                ],
            },
            Pattern::Pulsar => Figure::Glyph {
                origin: Loc::new(2, 2),
                rows: &[
                    "..###...###..",
                    ".............",
                    "#....#.#....#",
                    "#....#.#....#",
                    "#....#.#....#",
                    "..###...###..",
                    ".............",
                    "..###...###..",
                    "#....#.#....#",
                    "#....#.#....#",
                    "#....#.#....#",
                    ".............",
                    "..###...###..",
                ],
            },
            Pattern::LightweightSpaceship => Figure::Glyph {
                origin: Loc::new(2, 2),
                rows: &[
                    ".#..#",
                    "#....",
                    "#...#",
                    "####.",
                ],
            },
            Pattern::GosperGliderGun => Figure::Glyph {
                origin: Loc::new(1, 1),
                rows: &[
                    "........................#...........",
                    "......................#.#...........",
                    "............##......##............##",
                    "...........#...#....##............##",
                    "##........#.....#...##..............",
                    "##........#...#.##....#.#...........",
                    "..........#.....#.......#...........",
                    "...........#...#....................",
                    "............##......................",
                ],
            },
        }
    }

    fn normalized_name(name: &str) -> String {
        name.chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = Self::normalized_name(name);
        Self::ALL
            .into_iter()
            .find(|pattern| Self::normalized_name(pattern.name()) == wanted)
            .ok_or_else(|| PatternError::Unknown(name.to_owned()))
    }
}

impl Board {
    pub fn seed(width: u32, height: u32, pattern: Pattern) -> Result<Self, PatternError> {
        match pattern.figure() {
            Figure::Cells(cells) => Self::from_cells(width, height, cells),
            Figure::Glyph { origin, rows } => Self::from_glyph(width, height, origin, rows),
        }
    }

    pub fn from_cells(
        width: u32,
        height: u32,
        cells: &[(u32, u32)],
    ) -> Result<Self, PatternError> {
        let mut board = Self::new(width, height);
        for &(row, col) in cells {
            board.set_seed_cell(Loc::new(row, col))?;
        }
        Ok(board)
    }

    /// Cells past the end of a glyph row are left dead.
    pub fn from_glyph(
        width: u32,
        height: u32,
        origin: Loc,
        rows: &[&str],
    ) -> Result<Self, PatternError> {
        let mut board = Self::new(width, height);
        for (row_offset, glyph_row) in rows.iter().enumerate() {
            for (col_offset, glyph) in glyph_row.chars().enumerate() {
                if glyph == '#' {
                    let loc = Loc::new(
                        origin.row + row_offset as u32,
                        origin.col + col_offset as u32,
                    );
                    board.set_seed_cell(loc)?;
                }
            }
        }
        Ok(board)
    }

    fn set_seed_cell(&mut self, loc: Loc) -> Result<(), PatternError> {
        self.set(loc, true).ok_or(PatternError::OutOfBounds {
            row: loc.row,
            col: loc.col,
            width: self.width(),
            height: self.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLIDER_SHAPE: [(u32, u32); 5] = [(0, 2), (1, 3), (2, 1), (2, 2), (2, 3)];

    fn shape_at(origin: (u32, u32)) -> Vec<Loc> {
        let mut locs: Vec<Loc> = GLIDER_SHAPE
            .iter()
            .map(|&(row, col)| Loc::new(origin.0 + row, origin.1 + col))
            .collect();
        locs.sort();
        locs
    }

    #[test]
    fn glider_translates_diagonally_every_four_generations() {
        let mut board = Board::seed(10, 10, Pattern::Glider).unwrap();
        assert_eq!(board.live_locs().collect::<Vec<_>>(), shape_at((2, 2)));

        for _ in 0..4 {
            board = board.next();
        }
        assert_eq!(board.live_locs().collect::<Vec<_>>(), shape_at((3, 3)));
    }

    #[test]
    fn glyph_decoding_marks_only_hashes() {
        let board = Board::from_glyph(6, 4, Loc::new(1, 2), &["#.#", "x#", ""]).unwrap();
        let live: Vec<Loc> = board.live_locs().collect();
        assert_eq!(live, vec![Loc::new(1, 2), Loc::new(1, 4), Loc::new(2, 3)]);
    }

    #[test]
    fn literal_and_glyph_seeding_agree() {
        let from_cells = Board::from_cells(8, 8, &[(2, 1), (2, 2), (2, 3)]).unwrap();
        let from_glyph = Board::from_glyph(8, 8, Loc::new(2, 1), &["###"]).unwrap();
        assert_eq!(from_cells, from_glyph);
    }

    #[test]
    fn unknown_pattern_name_is_an_error() {
        assert_eq!(
            "spaceship-factory".parse::<Pattern>(),
            Err(PatternError::Unknown("spaceship-factory".to_owned()))
        );
    }

    #[test]
    fn pattern_names_parse_loosely() {
        assert_eq!("Glider".parse::<Pattern>(), Ok(Pattern::Glider));
        assert_eq!("gosper_glider_gun".parse::<Pattern>(), Ok(Pattern::GosperGliderGun));
        assert_eq!(
            "Lightweight Spaceship".parse::<Pattern>(),
            Ok(Pattern::LightweightSpaceship)
        );
        for pattern in Pattern::ALL {
            assert_eq!(pattern.to_string().parse::<Pattern>(), Ok(pattern));
        }
    }

    #[test]
    fn seeding_off_the_board_is_an_error() {
        let result = Board::seed(4, 4, Pattern::Glider);
        assert_eq!(
            result,
            Err(PatternError::OutOfBounds {
                row: 2,
                col: 4,
                width: 4,
                height: 4,
            })
        );
    }

    #[test]
    fn every_pattern_fits_the_default_board() {
        let expected_populations = [5, 3, 6, 8, 48, 9, 36];
        for (pattern, population) in Pattern::ALL.into_iter().zip(expected_populations) {
            let board = Board::seed(70, 30, pattern).unwrap();
            assert_eq!(board.population(), population, "{pattern}");
        }
    }

    #[test]
    fn oscillators_have_period_two() {
        for pattern in [Pattern::Blinker, Pattern::Toad, Pattern::Beacon] {
            let board = Board::seed(10, 10, pattern).unwrap();
            let once = board.next();
            assert_ne!(once, board, "{pattern}");
            assert_eq!(once.next(), board, "{pattern}");
        }
    }
}
