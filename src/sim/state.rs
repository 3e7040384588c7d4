//! Run state and core simulation types
//!
//! A [`Run`] is created by `start()`, mutated only by `tick()`, and thrown
//! away wholesale on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Size of the drawing surface in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Horizontal steering input, sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Per-tick horizontal velocity for this direction
    #[inline]
    pub fn velocity(self, move_speed: f32) -> f32 {
        match self {
            Direction::Left => -move_speed,
            Direction::Right => move_speed,
            Direction::None => 0.0,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Hit an obstacle bar
    Collision,
    /// Reached the finish line
    Win,
}

/// Runner lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    /// Nothing started yet
    #[default]
    Idle,
    /// Avatar is falling
    Running,
    /// Run finished; waiting for restart
    Ended(Outcome),
}

/// The player's falling circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub radius: f32,
}

impl Avatar {
    /// Spawn point: horizontal center, fixed offset below the top
    pub fn spawn(area: PlayArea, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(area.width / 2.0, tuning.spawn_y),
            radius: tuning.avatar_radius,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// One obstacle row: a left bar, a gap, and a right bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top edge of the row
    pub y: f32,
    /// Row thickness
    pub height: f32,
    /// Left bar spans `[0, w1)`
    pub w1: f32,
    /// Right bar spans `[x2, x2 + w2)`
    pub x2: f32,
    pub w2: f32,
}

impl Obstacle {
    /// Horizontal interval where no collision occurs
    #[inline]
    pub fn gap(&self) -> (f32, f32) {
        (self.w1, self.x2)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One playthrough, from `start()` to a terminal outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Sequence number of this run for the owning runner (1-based)
    pub number: u32,
    pub area: PlayArea,
    pub avatar: Avatar,
    /// Obstacle rows, ordered top to bottom
    pub obstacles: Vec<Obstacle>,
    /// Reaching this y wins the run
    pub finish_y: f32,
    pub status: RunStatus,
    /// Ticks simulated so far
    pub time_ticks: u64,
}

impl Run {
    /// Create a running run with a fresh avatar and the given rows
    pub fn new(number: u32, area: PlayArea, obstacles: Vec<Obstacle>, tuning: &Tuning) -> Self {
        Self {
            number,
            area,
            avatar: Avatar::spawn(area, tuning),
            obstacles,
            finish_y: finish_y(area, tuning),
            status: RunStatus::Running,
            time_ticks: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Terminal outcome, if the run has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            RunStatus::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Number of rows whose bottom edge the avatar has fully passed
    pub fn rows_cleared(&self) -> usize {
        let top = self.avatar.top();
        self.obstacles.iter().filter(|o| o.bottom() <= top).count()
    }
}

/// Finish line position for a play area
#[inline]
pub fn finish_y(area: PlayArea, tuning: &Tuning) -> f32 {
    area.height - tuning.finish_offset
}
