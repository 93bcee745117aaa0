//! Geometry and colour types shared by the binding and the shell.
//!
//! Canonical space is the canvas:
//! - device pixels
//! - origin top-left
//! - +X right, +Y down

mod canvas;
mod color;
mod rect;
mod vec2;

pub use canvas::CanvasSize;
pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
