//! Scroll-follow camera
//!
//! The play area is taller than the window, so the page scrolls to keep
//! the avatar at the vertical center of the viewport.

/// How the page should move to the new scroll target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Smooth,
    Instant,
}

/// Page scroll offset that centers `avatar_y` in the viewport
///
/// `section_top` is the page offset of the play area's container.
pub fn follow_target(section_top: f64, avatar_y: f64, viewport_height: f64) -> f64 {
    (section_top + avatar_y - viewport_height / 2.0).max(0.0)
}

/// Skips scroll requests that wouldn't visibly move the page
#[derive(Debug, Clone, Default)]
pub struct Camera {
    last_target: Option<f64>,
}

impl Camera {
    /// Smallest change worth issuing a new scroll for (CSS pixels)
    const MIN_STEP: f64 = 0.5;

    pub fn new() -> Self {
        Self::default()
    }

    /// New scroll target for this frame, or `None` if the page is already there
    pub fn update(&mut self, section_top: f64, avatar_y: f64, viewport_height: f64) -> Option<f64> {
        let target = follow_target(section_top, avatar_y, viewport_height);
        match self.last_target {
            Some(last) if (target - last).abs() < Self::MIN_STEP => None,
            _ => {
                self.last_target = Some(target);
                Some(target)
            }
        }
    }

    /// Forget the last target (on restart, so the first frame always scrolls)
    pub fn reset(&mut self) {
        self.last_target = None;
    }
}
