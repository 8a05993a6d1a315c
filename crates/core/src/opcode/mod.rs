//! The closed set of decodable W2D opcodes.
//!
//! Factories are grouped by category:
//! - `geometry` - lines, polylines, polymarkers and placeholder triangle lists
//! - `attribute` - current point, visibility, color and line weight
//! - `text` - basic text
//! - `extended` - keyword-form `( ... )` and binary-framed `{ ... }` opcodes
//!
//! `registry` maps leading id bytes and keyword names to those factories.

mod attribute;
mod extended;
mod geometry;
pub mod registry;
mod text;

pub use registry::{KeywordFactory, OpcodeFactory, OpcodeRegistry};

use crate::model::color::Rgba;
use crate::utils::{LogicalPoint, Point, format_points};
use smol_str::SmolStr;
use std::fmt;

/// Leading id bytes of the single-byte opcodes.
pub mod ids {
    pub const SET_COLOR_RGBA: u8 = 0x03;
    pub const DRAW_LINE_LONG: u8 = 0x0C;
    pub const DRAW_POLYMARKER_LONG: u8 = 0x0D;
    pub const DRAW_POLYLINE_LONG: u8 = 0x10;
    pub const DRAW_POLYTRIANGLE: u8 = 0x14;
    pub const SET_LINE_WEIGHT: u8 = 0x17;
    pub const EXTENDED_ASCII: u8 = b'(';
    pub const SET_CURRENT_POINT: u8 = b'O';
    pub const VISIBILITY_ON: u8 = b'V';
    pub const SET_COLOR_INDEX: u8 = b'c';
    pub const DRAW_LINE: u8 = b'l';
    pub const DRAW_POLYLINE: u8 = b'p';
    pub const DRAW_POLYTRIANGLE_LONG: u8 = b't';
    pub const VISIBILITY_OFF: u8 = b'v';
    pub const DRAW_TEXT: u8 = b'x';
    pub const EXTENDED_BINARY: u8 = b'{';
    pub const DRAW_POLYMARKER: u8 = 0x8D;
}

/// Keyword names of the extended ASCII opcodes the registry understands.
pub mod keywords {
    pub const LINE_WEIGHT: &str = "LineWeight";
    pub const URL: &str = "URL";

    /// Unrecognized ids that are expected in streams and need no diagnostic.
    pub const DEFAULT_IGNORED: &[&str] = &[URL];
}

/// Whether payload points are deltas from the current point or positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CoordinateMode {
    Relative,
    Absolute,
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Opcode {
    SetVisibility(bool),
    SetCurrentPoint(Point),
    SetLineWeight(i16),
    DrawLine { start: Point, end: Point },
    DrawLineLong { start: LogicalPoint, end: LogicalPoint },
    DrawPolyline(Vec<Point>),
    DrawPolylineLong(Vec<LogicalPoint>),
    DrawPolymarker(Vec<Point>),
    DrawPolymarkerLong(Vec<LogicalPoint>),
    SetColorIndex(u8),
    SetColorRgba(Rgba),
    DrawText { position: Point, text: String },
    /// Payload consumed but not modelled (triangle lists). Holds the id byte.
    Unsupported(u8),
    /// Self-delimiting opcode with no registered meaning.
    Unrecognized(SmolStr),
}

impl Opcode {
    /// Coordinate mode of this opcode kind.
    ///
    /// Fixed per kind: only `SetCurrentPoint` carries absolute coordinates.
    pub const fn coordinate_mode(&self) -> CoordinateMode {
        match self {
            Opcode::SetCurrentPoint(_) => CoordinateMode::Absolute,
            _ => CoordinateMode::Relative,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Opcode::SetVisibility(_) => "SetVisibility",
            Opcode::SetCurrentPoint(_) => "SetCurrentPoint",
            Opcode::SetLineWeight(_) => "SetLineWeight",
            Opcode::DrawLine { .. } => "DrawLine",
            Opcode::DrawLineLong { .. } => "DrawLineLong",
            Opcode::DrawPolyline(_) => "DrawPolyline",
            Opcode::DrawPolylineLong(_) => "DrawPolylineLong",
            Opcode::DrawPolymarker(_) => "DrawPolymarker",
            Opcode::DrawPolymarkerLong(_) => "DrawPolymarkerLong",
            Opcode::SetColorIndex(_) => "SetColorIndex",
            Opcode::SetColorRgba(_) => "SetColorRgba",
            Opcode::DrawText { .. } => "DrawText",
            Opcode::Unsupported(_) => "Unsupported",
            Opcode::Unrecognized(_) => "Unrecognized",
        }
    }

    /// True for opcodes that can produce primitives.
    pub const fn is_drawing(&self) -> bool {
        matches!(
            self,
            Opcode::DrawLine { .. }
                | Opcode::DrawLineLong { .. }
                | Opcode::DrawPolyline(_)
                | Opcode::DrawPolylineLong(_)
                | Opcode::DrawPolymarker(_)
                | Opcode::DrawPolymarkerLong(_)
                | Opcode::DrawText { .. }
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Opcode::SetVisibility(on) => write!(f, "{name} {on}"),
            Opcode::SetCurrentPoint(p) => write!(f, "{name} {p}"),
            Opcode::SetLineWeight(w) => write!(f, "{name} {w}"),
            Opcode::DrawLine { start, end } => write!(f, "{name} {start} {end}"),
            Opcode::DrawLineLong { start, end } => write!(f, "{name} {start} {end}"),
            Opcode::DrawPolyline(pts) | Opcode::DrawPolymarker(pts) => {
                write!(f, "{name} [{}]", format_points(pts))
            }
            Opcode::DrawPolylineLong(pts) | Opcode::DrawPolymarkerLong(pts) => {
                write!(f, "{name} [{}]", format_points(pts))
            }
            Opcode::SetColorIndex(i) => write!(f, "{name} {i}"),
            Opcode::SetColorRgba(c) => write!(f, "{name} {c}"),
            Opcode::DrawText { position, text } => write!(f, "{name} {position} {text:?}"),
            Opcode::Unsupported(id) => write!(f, "{name} {id:#04x}"),
            Opcode::Unrecognized(id) => write!(f, "{name} {id:?}"),
        }
    }
}
