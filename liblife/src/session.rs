use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    board::{Board, CellState},
    config::LifeConfig,
    error::{BoardError, ConfigError},
    patterns::Pattern,
    pos::Position,
    step::{self, FlipSet},
    ticker::Ticker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

/// What a tick did to the board. Every variant means the board changed and wants a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A generation was applied and the session keeps running.
    Stepped { generation: u64, flips: usize },

    /// A generation was applied and left the board empty, so the session went idle.
    Halted { generation: u64 },
}

/// Owns the board and drives it through generations on a fixed interval.
///
/// All methods take `now` explicitly instead of reading the clock, so the caller decides
/// what time it is. The event loop passes `Instant::now()` and tests pass whatever they like.
#[derive(Debug, Clone)]
pub struct Session {
    config: LifeConfig,
    board: Board,
    state: SessionState,
    ticker: Ticker,
    generation: u64,
}

impl Session {
    pub fn new(config: LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            board: Board::new(config.width, config.height),
            ticker: Ticker::new(config.tick_interval()),
            state: SessionState::Idle,
            generation: 0,
            config,
        })
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Number of generations applied since the last reset, randomize or pattern load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the next tick is due, if the session is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }

        info!(generation = self.generation, "starting");
        self.state = SessionState::Running;
        self.ticker.schedule(now);
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        info!(generation = self.generation, "stopping");
        self.go_idle();
    }

    /// Runs one tick if the session is running and the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.is_running() || !self.ticker.is_due(now) {
            return None;
        }

        let flips = self.advance();

        if self.board.is_empty() {
            info!(generation = self.generation, "population died out, halting");
            self.go_idle();
            return Some(TickOutcome::Halted {
                generation: self.generation,
            });
        }

        self.ticker.schedule(now);
        Some(TickOutcome::Stepped {
            generation: self.generation,
            flips: flips.len(),
        })
    }

    /// Applies a single generation by hand. A running session is stopped first, so a
    /// manual step never races the pending tick.
    pub fn step_once(&mut self) -> FlipSet {
        self.stop();
        self.advance()
    }

    pub fn toggle(&mut self, pos: Position) -> Result<CellState, BoardError> {
        let state = self.board.toggle(pos)?;
        debug!(%pos, ?state, "toggled cell");
        Ok(state)
    }

    pub fn reset(&mut self) {
        info!("resetting board");
        self.go_idle();
        self.board.clear();
        self.generation = 0;
    }

    /// Refills the board at random using the configured probability.
    pub fn randomize<R>(&mut self, rng: &mut R) -> Result<(), BoardError>
    where
        R: Rng + ?Sized,
    {
        self.go_idle();
        self.board.randomize(rng, self.config.randomize_probability)?;
        self.generation = 0;

        info!(population = self.board.population(), "randomized board");
        Ok(())
    }

    /// Clears the board and stamps `pattern` with its top-left corner on `origin`.
    /// The board is left untouched if any cell of the pattern would fall off the grid.
    pub fn load_pattern(&mut self, pattern: &Pattern, origin: Position) -> Result<(), BoardError> {
        let mut board = Board::new(self.board.width(), self.board.height());
        for pos in pattern.cells_at(origin) {
            board.set(pos, CellState::Alive)?;
        }

        self.go_idle();
        self.board = board;
        self.generation = 0;

        info!(pattern = pattern.name, %origin, "loaded pattern");
        Ok(())
    }

    fn advance(&mut self) -> FlipSet {
        let flips = step::step(&mut self.board);
        self.generation += 1;

        debug!(
            generation = self.generation,
            flips = flips.len(),
            population = self.board.population(),
            "applied generation"
        );

        flips
    }

    fn go_idle(&mut self) {
        self.state = SessionState::Idle;
        self.ticker.cancel();
    }
}
