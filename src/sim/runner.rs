//! Runner handle
//!
//! Owns the RNG, the current [`Run`] and the held steering direction. The
//! browser shell only talks to the simulation through this type.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::generate::generate_rows;
use super::state::{Direction, Outcome, PlayArea, Run, RunStatus};
use super::tick::tick;
use crate::tuning::Tuning;

/// Status text shown before the first run
pub const MSG_IDLE: &str = "Press SPACE to Start!";
/// Status text after hitting a bar
pub const MSG_COLLISION: &str = "💥 Game Over! Press SPACE to Restart";
/// Status text after reaching the finish line
pub const MSG_WIN: &str = "🏁 You Win! Press SPACE to Play Again";

#[derive(Debug, Clone)]
pub struct Runner {
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    run: Option<Run>,
    input: Direction,
    runs_started: u32,
    /// Set on every state transition, cleared by `take_status_change`
    status_changed: bool,
}

impl Runner {
    /// Create an idle runner. The seed fixes the gap layout of every run.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            run: None,
            input: Direction::None,
            runs_started: 0,
            status_changed: true,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current run, if one has been started
    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub fn status(&self) -> RunStatus {
        self.run.as_ref().map_or(RunStatus::Idle, |run| run.status)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status() == RunStatus::Running
    }

    /// Begin a new run sized to `area`
    ///
    /// The previous run, if any, is discarded. Returns `false` (and does
    /// nothing) while a run is still in progress.
    pub fn start(&mut self, area: PlayArea) -> bool {
        if self.is_running() {
            return false;
        }

        self.runs_started += 1;
        let obstacles = generate_rows(&mut self.rng, area, &self.tuning);
        log::info!(
            "Run {} started: area {}x{}, {} rows",
            self.runs_started,
            area.width,
            area.height,
            obstacles.len()
        );

        self.run = Some(Run::new(self.runs_started, area, obstacles, &self.tuning));
        self.input = Direction::None;
        self.status_changed = true;
        true
    }

    /// Set the steering direction used from the next tick on
    pub fn set_horizontal_input(&mut self, direction: Direction) {
        self.input = direction;
    }

    /// Stop steering if `direction` is the one currently held
    pub fn release_horizontal_input(&mut self, direction: Direction) {
        if self.input == direction {
            self.input = Direction::None;
        }
    }

    /// Advance the current run by one tick
    pub fn tick(&mut self) -> Option<Outcome> {
        let run = self.run.as_mut()?;
        let outcome = tick(run, self.input, &self.tuning)?;

        match outcome {
            Outcome::Collision => log::info!(
                "Run {} ended in collision after {} ticks ({} rows cleared)",
                run.number,
                run.time_ticks,
                run.rows_cleared()
            ),
            Outcome::Win => log::info!("Run {} won in {} ticks", run.number, run.time_ticks),
        }
        self.status_changed = true;
        Some(outcome)
    }

    /// Human-readable status for the current state (empty while running)
    pub fn message(&self) -> &'static str {
        match self.status() {
            RunStatus::Idle => MSG_IDLE,
            RunStatus::Running => "",
            RunStatus::Ended(Outcome::Collision) => MSG_COLLISION,
            RunStatus::Ended(Outcome::Win) => MSG_WIN,
        }
    }

    /// Returns `true` once after each state transition
    pub fn take_status_change(&mut self) -> bool {
        std::mem::take(&mut self.status_changed)
    }
}
