//! Canvas2D painting
//!
//! The only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Fallible Canvas calls propagate as `Result<(), JsValue>`.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::DrawCmd;

/// Paint a frame's draw list in order
///
/// # Errors
///
/// Returns `Err` if any Canvas2D call fails.
pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) -> Result<(), JsValue> {
    for cmd in cmds {
        match *cmd {
            DrawCmd::Rect { pos, size, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
        }
    }
    Ok(())
}
