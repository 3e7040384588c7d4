//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod generate;
pub mod runner;
pub mod state;
pub mod tick;

pub use collision::{avatar_row_collision, first_collision, reached_finish};
pub use generate::{generate_row, generate_rows};
pub use runner::Runner;
pub use state::{Avatar, Direction, Obstacle, Outcome, PlayArea, Run, RunStatus};
pub use tick::tick;
