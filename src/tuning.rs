//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a level can be reshaped
//! from a JSON document without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Avatar radius (pixels)
    pub avatar_radius: f32,
    /// Spawn height below the top of the play area
    pub spawn_y: f32,
    /// Downward speed (pixels/tick)
    pub descent_speed: f32,
    /// Horizontal speed while steering (pixels/tick)
    pub move_speed: f32,
    /// Vertical offset of the first obstacle row
    pub first_row_y: f32,
    /// Distance between consecutive rows
    pub row_spacing: f32,
    /// Thickness of each obstacle bar
    pub row_height: f32,
    /// Width of the opening in each row
    pub gap_width: f32,
    /// Offset between the random anchor and the gap's left edge
    pub gap_lead: f32,
    /// Finish line distance from the bottom of the play area
    pub finish_offset: f32,
    /// Drawn height of the finish bar
    pub finish_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            avatar_radius: AVATAR_RADIUS,
            spawn_y: AVATAR_SPAWN_Y,
            descent_speed: DESCENT_SPEED,
            move_speed: MOVE_SPEED,
            first_row_y: FIRST_ROW_Y,
            row_spacing: ROW_SPACING,
            row_height: ROW_HEIGHT,
            gap_width: GAP_WIDTH,
            gap_lead: GAP_LEAD,
            finish_offset: FINISH_OFFSET,
            finish_height: FINISH_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse an override document; absent fields keep their defaults.
    /// Falls back to the full default set if the document is malformed.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.validated(),
            Err(e) => {
                log::warn!("Ignoring malformed tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation can't work with by their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        // Too slow a descent and a run never reaches the finish line
        fix_at_least(&mut self.descent_speed, MIN_DESCENT_SPEED, defaults.descent_speed, "descent_speed");
        fix_at_least(&mut self.avatar_radius, MIN_SIZE, defaults.avatar_radius, "avatar_radius");
        fix_at_least(&mut self.row_height, MIN_SIZE, defaults.row_height, "row_height");
        fix_at_least(&mut self.gap_width, MIN_SIZE, defaults.gap_width, "gap_width");
        // Rows may touch but never overlap
        let min_spacing = self.row_height.max(MIN_SIZE);
        fix_at_least(&mut self.row_spacing, min_spacing, defaults.row_spacing.max(min_spacing), "row_spacing");
        fix_at_least(&mut self.move_speed, 0.0, defaults.move_speed, "move_speed");
        fix_at_least(&mut self.spawn_y, 0.0, defaults.spawn_y, "spawn_y");
        fix_at_least(&mut self.first_row_y, 0.0, defaults.first_row_y, "first_row_y");
        fix_at_least(&mut self.finish_offset, 0.0, defaults.finish_offset, "finish_offset");
        fix_at_least(&mut self.finish_height, 0.0, defaults.finish_height, "finish_height");
        if !self.gap_lead.is_finite() {
            log::warn!("tuning gap_lead={} invalid, using {}", self.gap_lead, defaults.gap_lead);
            self.gap_lead = defaults.gap_lead;
        }

        self
    }

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded tuning override from LocalStorage");
                return Self::from_json(&json);
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gap_runner_tuning";
}

/// Slowest accepted descent (pixels/tick)
pub const MIN_DESCENT_SPEED: f32 = 0.1;
/// Smallest accepted radius, bar height, gap and row spacing (pixels)
pub const MIN_SIZE: f32 = 1.0;

fn fix_at_least(value: &mut f32, min: f32, default: f32, name: &str) {
    if !(value.is_finite() && *value >= min) {
        log::warn!("tuning {}={} must be at least {}, using {}", name, value, min, default);
        *value = default;
    }
}
