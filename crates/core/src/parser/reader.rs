//! Fixed-width primitive readers over an opcode byte stream.
//!
//! All multi-byte fields are little-endian. Any read that runs past the end
//! of the stream fails with `W2dError::TruncatedStream`, carrying the offset
//! of the field that could not be read.

use crate::error::{Result, W2dError};
use crate::utils::{LogicalPoint, Point};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Cursor};

/// Byte cursor used by opcode factories.
#[derive(Debug, Clone)]
pub struct OpcodeReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

fn map_read_error(err: io::Error, offset: usize) -> W2dError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        W2dError::TruncatedStream { offset }
    } else {
        W2dError::Io(err)
    }
}

impl<'a> OpcodeReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current byte offset from the start of the stream.
    pub fn tell(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.tell())
    }

    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.cursor.get_ref().get(self.tell()).copied()
    }

    fn read_with<T>(
        &mut self,
        read: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    ) -> Result<T> {
        let at = self.tell();
        read(&mut self.cursor).map_err(|e| map_read_error(e, at))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_with(|c| c.read_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(|c| c.read_u16::<LittleEndian>())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_with(|c| c.read_i16::<LittleEndian>())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_with(|c| c.read_i32::<LittleEndian>())
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let at = self.tell();
        if self.remaining() < len {
            return Err(W2dError::TruncatedStream { offset: at });
        }
        let data: &'a [u8] = *self.cursor.get_ref();
        self.cursor.set_position((at + len) as u64);
        Ok(&data[at..at + len])
    }

    /// Step over one byte. A no-op at the end of the stream.
    pub fn advance(&mut self) {
        if !self.at_end() {
            self.cursor.set_position(self.cursor.position() + 1);
        }
    }

    /// Advance past `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read an extended count.
    ///
    /// A single byte holds counts 1..=255. A zero byte escapes to a 16-bit
    /// extension and the count is `256 + extension`.
    pub fn read_extended_count(&mut self) -> Result<usize> {
        let count = self.read_u8()?;
        if count == 0 {
            let extra = self.read_u16()?;
            Ok(256 + usize::from(extra))
        } else {
            Ok(usize::from(count))
        }
    }

    pub fn read_point(&mut self) -> Result<Point> {
        let x = self.read_i16()?;
        let y = self.read_i16()?;
        Ok(Point::new(x, y))
    }

    pub fn read_logical_point(&mut self) -> Result<LogicalPoint> {
        let x = self.read_i32()?;
        let y = self.read_i32()?;
        Ok(LogicalPoint::new(x, y))
    }

    /// Read `count` 16-bit points in stream order.
    pub fn read_points(&mut self, count: usize) -> Result<Vec<Point>> {
        // capacity is bounded by what the stream can still hold
        let mut points = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            points.push(self.read_point()?);
        }
        Ok(points)
    }

    /// Read `count` 32-bit points in stream order.
    pub fn read_logical_points(&mut self, count: usize) -> Result<Vec<LogicalPoint>> {
        let mut points = Vec::with_capacity(count.min(self.remaining() / 8));
        for _ in 0..count {
            points.push(self.read_logical_point()?);
        }
        Ok(points)
    }

    /// Read `units` UTF-16LE code units. Unpaired surrogates become U+FFFD.
    pub fn read_utf16(&mut self, units: usize) -> Result<String> {
        let mut buf = Vec::with_capacity(units.min(self.remaining() / 2));
        for _ in 0..units {
            buf.push(self.read_u16()?);
        }
        Ok(char::decode_utf16(buf)
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect())
    }
}
