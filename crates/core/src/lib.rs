//! w2d - decoder and rendering interpreter for W2D vector opcode streams.
//!
//! A W2D stream (the 2D graphics channel of DWF drawings) is a flat
//! sequence of opcodes. Decoding turns the bytes into `Opcode` values;
//! interpreting folds them over a `RenderState` and hands resolved
//! primitives to a `W2dDevice`.

pub mod api;
pub mod error;
pub mod interp;
pub mod model;
pub mod opcode;
pub mod parser;
pub mod utils;

pub use api::{RenderParams, RenderReport, render};
pub use error::{Result, W2dError};
pub use interp::{Primitive, PrimitiveRecorder, W2dDevice, W2dInterpreter};
pub use model::{Palette, RenderState, Rgba, Style};
pub use opcode::{CoordinateMode, Opcode, OpcodeRegistry};
pub use parser::{OpcodeDecoder, decode_all};
pub use utils::{LogicalPoint, Point};
