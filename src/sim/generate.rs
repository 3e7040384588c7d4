//! Obstacle row generation
//!
//! Rows are laid out at fixed vertical intervals down the play area. Each
//! row's gap position is drawn independently; nothing guarantees the gap of
//! one row is reachable from the gap of the previous one.

use rand::Rng;

use super::state::{Obstacle, PlayArea, finish_y};
use crate::tuning::Tuning;

/// Upper bound on rows in one run
pub const MAX_ROWS: usize = 4096;

/// Generate every obstacle row above the finish line
///
/// Row positions are computed from their index so float rounding can't
/// stall the walk down the play area; at most [`MAX_ROWS`] are produced.
pub fn generate_rows<R: Rng>(rng: &mut R, area: PlayArea, tuning: &Tuning) -> Vec<Obstacle> {
    let finish = finish_y(area, tuning);
    let mut rows = Vec::new();

    for i in 0..MAX_ROWS {
        let y = tuning.first_row_y + tuning.row_spacing * i as f32;
        if y >= finish || y.is_nan() {
            return rows;
        }
        rows.push(generate_row(rng, y, area.width, tuning));
    }

    log::warn!("Row count capped at {} (spacing {})", MAX_ROWS, tuning.row_spacing);
    rows
}

/// Generate a single row at height `y`
pub fn generate_row<R: Rng>(rng: &mut R, y: f32, width: f32, tuning: &Tuning) -> Obstacle {
    let span = width - tuning.gap_width;
    let anchor = if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    };
    row_with_gap(y, width, anchor - tuning.gap_lead, tuning)
}

/// Build a row whose gap opens at `gap_start` (may be left of the surface)
pub fn row_with_gap(y: f32, width: f32, gap_start: f32, tuning: &Tuning) -> Obstacle {
    let x2 = gap_start + tuning.gap_width;
    Obstacle {
        y,
        height: tuning.row_height,
        w1: gap_start.max(0.0),
        x2,
        w2: (width - x2).max(0.0),
    }
}
