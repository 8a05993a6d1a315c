//! Render model types - color table and interpreter state.
//!
//! - `color` - RGBA colors and the indexed palette (Rgba, Palette)
//! - `state` - Render state and emission style (RenderState, Style)

pub mod color;
pub mod state;

// Re-export main types for convenience
pub use color::{DEFAULT_COLOR_MAP, Palette, Rgba};
pub use state::{RenderState, Style};
