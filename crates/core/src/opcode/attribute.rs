//! Attribute opcodes.
//!
//! Handles: O (current point), 0x17 (line weight), c (color index),
//! 0x03 (RGBA color), V / v (visibility), `(LineWeight n)`

use super::{Opcode, OpcodeRegistry, keywords};
use crate::error::{Result, W2dError};
use crate::model::color::Rgba;
use crate::parser::reader::OpcodeReader;

pub(super) fn read_set_current_point(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    Ok(Opcode::SetCurrentPoint(r.read_point()?))
}

pub(super) fn read_set_line_weight(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    Ok(Opcode::SetLineWeight(r.read_i16()?))
}

pub(super) fn read_set_color_index(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    Ok(Opcode::SetColorIndex(r.read_u8()?))
}

pub(super) fn read_set_color_rgba(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let red = r.read_u8()?;
    let green = r.read_u8()?;
    let blue = r.read_u8()?;
    let alpha = r.read_u8()?;
    Ok(Opcode::SetColorRgba(Rgba::new(red, green, blue, alpha)))
}

pub(super) fn read_visibility_on(_: &mut OpcodeReader<'_>, _: &OpcodeRegistry) -> Result<Opcode> {
    Ok(Opcode::SetVisibility(true))
}

pub(super) fn read_visibility_off(
    _: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    Ok(Opcode::SetVisibility(false))
}

/// `(LineWeight 25)`
pub(super) fn parse_line_weight_keyword(payload: &[u8]) -> Result<Opcode> {
    let invalid = |msg: String| W2dError::InvalidOperand {
        opcode: keywords::LINE_WEIGHT,
        msg,
    };
    let text = std::str::from_utf8(payload).map_err(|e| invalid(e.to_string()))?;
    let weight = text
        .trim()
        .parse::<i16>()
        .map_err(|e| invalid(format!("{text:?}: {e}")))?;
    Ok(Opcode::SetLineWeight(weight))
}
