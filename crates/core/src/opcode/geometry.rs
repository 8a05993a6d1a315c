//! Geometry opcodes.
//!
//! Handles: l, 0x0C (line), p, 0x10 (polyline), 0x8D, 0x0D (polymarker),
//! 0x14, t (polytriangle)
//!
//! Point lists start with an extended count. The 16-bit forms carry `i16`
//! deltas, the long forms `i32` deltas.

use super::{Opcode, OpcodeRegistry};
use crate::error::Result;
use crate::parser::reader::OpcodeReader;

pub(super) fn read_draw_line(r: &mut OpcodeReader<'_>, _: &OpcodeRegistry) -> Result<Opcode> {
    let start = r.read_point()?;
    let end = r.read_point()?;
    Ok(Opcode::DrawLine { start, end })
}

pub(super) fn read_draw_line_long(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let start = r.read_logical_point()?;
    let end = r.read_logical_point()?;
    Ok(Opcode::DrawLineLong { start, end })
}

pub(super) fn read_draw_polyline(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let count = r.read_extended_count()?;
    Ok(Opcode::DrawPolyline(r.read_points(count)?))
}

pub(super) fn read_draw_polyline_long(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let count = r.read_extended_count()?;
    Ok(Opcode::DrawPolylineLong(r.read_logical_points(count)?))
}

pub(super) fn read_draw_polymarker(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let count = r.read_extended_count()?;
    Ok(Opcode::DrawPolymarker(r.read_points(count)?))
}

pub(super) fn read_draw_polymarker_long(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let count = r.read_extended_count()?;
    Ok(Opcode::DrawPolymarkerLong(r.read_logical_points(count)?))
}

// Triangle strips are not modelled yet; the vertices are skipped.

pub(super) fn read_draw_polytriangle(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let count = r.read_extended_count()?;
    r.skip(count * 4)?;
    Ok(Opcode::Unsupported(super::ids::DRAW_POLYTRIANGLE))
}

pub(super) fn read_draw_polytriangle_long(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let count = r.read_extended_count()?;
    r.skip(count * 8)?;
    Ok(Opcode::Unsupported(super::ids::DRAW_POLYTRIANGLE_LONG))
}
