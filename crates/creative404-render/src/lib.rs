//! Theme catalog and still-frame renderer for Creative404.
//!
//! Produces a single PNG frame: a two-color gradient, three translucent
//! accent circles, a bold "404", a subtitle and an optional
//! "Powered by {server}" caption taken from an MCP inspection.

mod color;
pub mod error;
pub mod frame;
mod text;
pub mod theme;

pub use error::RenderError;
pub use frame::{Frame, MAX_DIMENSION, caption_for, render_png, render_png_blocking};
pub use theme::{THEMES, Theme, available_themes, get_theme};
