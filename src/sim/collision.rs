//! Collision detection against obstacle rows and the finish line
//!
//! The avatar is treated as its axis-aligned bounding box. Bars are
//! half-open intervals, so an avatar edge exactly touching a bar's far edge
//! does not count as a hit.

use super::state::{Avatar, Obstacle};

/// Whether the avatar's vertical extent overlaps the row
#[inline]
pub fn overlaps_row(avatar: &Avatar, row: &Obstacle) -> bool {
    avatar.bottom() > row.y && avatar.top() < row.bottom()
}

/// Whether the avatar's horizontal extent reaches into either bar
#[inline]
pub fn hits_bars(avatar: &Avatar, row: &Obstacle) -> bool {
    avatar.left() < row.w1 || avatar.right() > row.x2
}

/// Full avatar-vs-row test
#[inline]
pub fn avatar_row_collision(avatar: &Avatar, row: &Obstacle) -> bool {
    overlaps_row(avatar, row) && hits_bars(avatar, row)
}

/// First row the avatar collides with, if any (rows are checked top to bottom)
pub fn first_collision<'a>(avatar: &Avatar, rows: &'a [Obstacle]) -> Option<&'a Obstacle> {
    rows.iter().find(|row| avatar_row_collision(avatar, row))
}

/// Whether the avatar has reached the finish line
#[inline]
pub fn reached_finish(avatar: &Avatar, finish_y: f32) -> bool {
    avatar.pos.y >= finish_y
}
