//! Geometric types shared by the decoder and the interpreter.
//!
//! - `Point`: a 16-bit coordinate pair exactly as it appears on the wire
//! - `LogicalPoint`: a 32-bit coordinate pair in the logical drawing space
//!
//! Relative opcode payloads are deltas; they only become positions once the
//! interpreter adds them to its current point.

use std::fmt;

/// A 16-bit (x, y) pair as stored in the opcode payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A 32-bit (x, y) pair in logical drawing space.
///
/// Arithmetic wraps: the logical space of the format is a 32-bit torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogicalPoint {
    pub x: i32,
    pub y: i32,
}

/// Logical space origin.
pub const ORIGIN: LogicalPoint = LogicalPoint::new(0, 0);

impl LogicalPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise wrapping addition.
    #[inline]
    pub const fn offset_by(self, delta: LogicalPoint) -> Self {
        Self {
            x: self.x.wrapping_add(delta.x),
            y: self.y.wrapping_add(delta.y),
        }
    }
}

impl From<Point> for LogicalPoint {
    fn from(p: Point) -> Self {
        Self {
            x: i32::from(p.x),
            y: i32::from(p.y),
        }
    }
}

impl From<(i32, i32)> for LogicalPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for LogicalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Writes a point list as `(x,y) (x,y) ...`.
pub fn format_points<P: fmt::Display>(points: &[P]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&p.to_string());
    }
    out
}
