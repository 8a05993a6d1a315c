//! High-level API module for rendering W2D opcode streams.
//!
//! # Example
//!
//! ```ignore
//! use w2d_core::api::{render, RenderParams};
//! use w2d_core::interp::PrimitiveRecorder;
//!
//! let stream = std::fs::read("drawing.w2d")?;
//! let mut device = PrimitiveRecorder::new();
//! let report = render(&stream, &RenderParams::default(), &mut device)?;
//! ```

pub mod params;
pub mod render;

// Re-export for convenience
pub use params::RenderParams;
pub use render::{
    Frame, RenderReport, render, render_frame, render_frame_with, render_frames, render_with,
};
