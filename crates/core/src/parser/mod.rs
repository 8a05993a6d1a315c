//! W2D opcode stream parsing.
//!
//! - `reader`: little-endian primitive readers and the extended count
//! - `decoder`: opcode iterator driven by the opcode registry

pub mod decoder;
pub mod reader;

// Re-export main types for convenience
pub use decoder::{OpcodeDecoder, decode_all, decode_all_with};
pub use reader::OpcodeReader;
