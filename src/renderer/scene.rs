//! Frame scene building
//!
//! Turns runner state into a flat, back-to-front list of draw commands.
//! Kept free of any browser types so draw order can be tested natively.

use glam::Vec2;

use crate::sim::{Run, Runner};
use crate::tuning::Tuning;

/// Background fill
pub const COLOR_BACKGROUND: &str = "#0f172a";
/// Finish line bar
pub const COLOR_FINISH: &str = "limegreen";
/// Obstacle bars
pub const COLOR_OBSTACLE: &str = "crimson";
/// Avatar
pub const COLOR_AVATAR: &str = "white";

/// A single primitive to paint
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled axis-aligned rectangle
    Rect {
        pos: Vec2,
        size: Vec2,
        color: &'static str,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
}

/// Build the frame for the runner's current state
///
/// With no run yet only the background is drawn; an ended run keeps showing
/// its final frame.
pub fn build(runner: &Runner, width: f32, height: f32) -> Vec<DrawCmd> {
    match runner.run() {
        Some(run) => build_run(run, runner.tuning()),
        None => vec![background(width, height)],
    }
}

/// Background, finish bar, obstacle bars, avatar
pub fn build_run(run: &Run, tuning: &Tuning) -> Vec<DrawCmd> {
    let width = run.area.width;
    let mut cmds = Vec::with_capacity(3 + run.obstacles.len() * 2);

    cmds.push(background(width, run.area.height));

    cmds.push(DrawCmd::Rect {
        pos: Vec2::new(0.0, run.finish_y),
        size: Vec2::new(width, tuning.finish_height),
        color: COLOR_FINISH,
    });

    for row in &run.obstacles {
        if row.w1 > 0.0 {
            cmds.push(DrawCmd::Rect {
                pos: Vec2::new(0.0, row.y),
                size: Vec2::new(row.w1, row.height),
                color: COLOR_OBSTACLE,
            });
        }
        if row.w2 > 0.0 {
            cmds.push(DrawCmd::Rect {
                pos: Vec2::new(row.x2, row.y),
                size: Vec2::new(row.w2, row.height),
                color: COLOR_OBSTACLE,
            });
        }
    }

    cmds.push(DrawCmd::Circle {
        center: run.avatar.pos,
        radius: run.avatar.radius,
        color: COLOR_AVATAR,
    });

    cmds
}

fn background(width: f32, height: f32) -> DrawCmd {
    DrawCmd::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(width, height),
        color: COLOR_BACKGROUND,
    }
}
