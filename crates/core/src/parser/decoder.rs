//! Opcode stream decoder.
//!
//! Walks a W2D byte stream one opcode at a time: skips separator
//! whitespace, reads the leading id byte, and hands the payload to the
//! factory registered for that id.
//!
//! A raw id byte without a factory is fatal. Its payload length is unknown,
//! so no later opcode boundary can be trusted. Keyword and binary-framed
//! opcodes are self-delimiting and never hit this path.

use crate::error::{Result, W2dError};
use crate::opcode::Opcode;
use crate::opcode::registry::{OpcodeRegistry, STANDARD_REGISTRY};
use crate::parser::reader::OpcodeReader;
use std::iter::FusedIterator;
use tracing::trace;

const fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Iterator over the opcodes of a stream.
///
/// Yields `Err` at most once; iteration stops after the first error.
pub struct OpcodeDecoder<'a> {
    reader: OpcodeReader<'a>,
    registry: &'a OpcodeRegistry,
    failed: bool,
}

impl<'a> OpcodeDecoder<'a> {
    /// Decoder using the standard registry.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_registry(data, &STANDARD_REGISTRY)
    }

    pub fn with_registry(data: &'a [u8], registry: &'a OpcodeRegistry) -> Self {
        Self {
            reader: OpcodeReader::new(data),
            registry,
            failed: false,
        }
    }

    /// Byte offset of the next opcode (or separator).
    pub fn tell(&self) -> usize {
        self.reader.tell()
    }

    fn skip_separators(&mut self) {
        while self.reader.peek().is_some_and(is_separator) {
            self.reader.advance();
        }
    }

    fn decode_one(&mut self, id: u8, offset: usize) -> Result<Opcode> {
        let Some(factory) = self.registry.factory(id) else {
            return Err(W2dError::UnknownOpcode { id, offset });
        };
        self.reader.skip(1)?;
        let opcode = factory(&mut self.reader, self.registry)?;
        trace!(offset, opcode = opcode.name(), "decoded opcode");
        Ok(opcode)
    }
}

impl Iterator for OpcodeDecoder<'_> {
    type Item = Result<Opcode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_separators();
        let offset = self.reader.tell();
        let id = self.reader.peek()?;
        let result = self.decode_one(id, offset);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl FusedIterator for OpcodeDecoder<'_> {}

/// Decode a whole stream with the standard registry.
pub fn decode_all(data: &[u8]) -> Result<Vec<Opcode>> {
    OpcodeDecoder::new(data).collect()
}

/// Decode a whole stream with a custom registry.
pub fn decode_all_with(data: &[u8], registry: &OpcodeRegistry) -> Result<Vec<Opcode>> {
    OpcodeDecoder::with_registry(data, registry).collect()
}
