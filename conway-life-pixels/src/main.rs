#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use life_grid::{Board, Pattern, PatternError, World};
use log::{debug, error, info};
use pixels_main_support::{AnimateError, Config, animate};
use std::mem;
use std::process::ExitCode;
use thiserror::Error;

const BOARD_WIDTH: u32 = 70;
const BOARD_HEIGHT: u32 = 30;
const SEED_PATTERN: Pattern = Pattern::GosperGliderGun;

#[derive(Debug, Error)]
enum StartupError {
    #[error("could not seed board")]
    Seed(#[from] PatternError),
    #[error("animation failed")]
    Animate(#[from] AnimateError),
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error("run", &err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    let config = Config::default();
    let world = ConwayWorld::seeded(BOARD_WIDTH, BOARD_HEIGHT, SEED_PATTERN)?;
    animate(&config, world)?;
    Ok(())
}

fn log_error(method_name: &str, err: &StartupError) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}

#[derive(Debug)]
pub struct ConwayWorld {
    board: Board,
    next_board: Board,
    generation: u64,
}

impl ConwayWorld {
    pub fn seeded(width: u32, height: u32, pattern: Pattern) -> Result<Self, PatternError> {
        let board = Board::seed(width, height, pattern)?;
        info!(
            "Seeded {pattern} on {width}x{height} board, population {}",
            board.population()
        );
        Ok(Self::new(board))
    }

    fn new(board: Board) -> Self {
        let next_board = Board::new(board.width(), board.height());
        Self {
            board,
            next_board,
            generation: 0,
        }
    }
}

impl World for ConwayWorld {
    fn board(&self) -> &Board {
        &self.board
    }

    fn update(&mut self) {
        self.board.update_into(&mut self.next_board);
        mem::swap(&mut self.board, &mut self.next_board);
        self.generation += 1;
        debug!(
            "Generation {}: population {}",
            self.generation,
            self.board.population()
        );
    }
}
