//! Opcode interpretation and device output.
//!
//! This module contains:
//! - `interpreter`: the per-opcode step function and the pass driver
//! - `device`: output device trait, primitives and the recording device

pub mod device;
pub mod interpreter;

// Re-export main types for convenience
pub use device::{Primitive, PrimitiveRecorder, W2dDevice};
pub use interpreter::{Diagnostic, Emission, PassStats, W2dInterpreter, step};
