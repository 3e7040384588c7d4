//! Rendering module
//!
//! `scene` builds a frame as plain data; `canvas` paints it in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use scene::{DrawCmd, build};
