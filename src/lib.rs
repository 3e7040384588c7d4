//! Gap Runner - A falling-avatar obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar motion, obstacle rows, collisions)
//! - `renderer`: Scene building and Canvas2D painting
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `stats`: Lifetime run statistics
//! - `camera`: Scroll-follow of the avatar

pub mod camera;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use settings::Settings;
pub use stats::RunStats;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Avatar defaults
    pub const AVATAR_RADIUS: f32 = 10.0;
    /// Spawn height below the top of the play area
    pub const AVATAR_SPAWN_Y: f32 = 50.0;
    /// Constant downward speed (pixels/tick)
    pub const DESCENT_SPEED: f32 = 2.2;
    /// Horizontal speed while an arrow key is held (pixels/tick)
    pub const MOVE_SPEED: f32 = 4.0;

    /// Obstacle rows
    pub const FIRST_ROW_Y: f32 = 300.0;
    pub const ROW_SPACING: f32 = 250.0;
    pub const ROW_HEIGHT: f32 = 20.0;
    pub const GAP_WIDTH: f32 = 150.0;
    /// How far left of the random anchor the gap opens
    pub const GAP_LEAD: f32 = 50.0;

    /// Finish line sits this far above the bottom of the play area
    pub const FINISH_OFFSET: f32 = 100.0;
    pub const FINISH_HEIGHT: f32 = 30.0;
}
