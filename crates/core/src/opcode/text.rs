//! Text opcodes.
//!
//! Handles: x (draw text basic)
//!
//! Layout: position (2 x i16, relative), extended count of UTF-16 code
//! units, the code units.

use super::{Opcode, OpcodeRegistry};
use crate::error::Result;
use crate::parser::reader::OpcodeReader;

pub(super) fn read_draw_text(r: &mut OpcodeReader<'_>, _: &OpcodeRegistry) -> Result<Opcode> {
    let position = r.read_point()?;
    let units = r.read_extended_count()?;
    let text = r.read_utf16(units)?;
    Ok(Opcode::DrawText { position, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Point;

    #[test]
    fn test_draw_text() {
        let mut data = vec![0x05, 0x00, 0xfb, 0xff, 3];
        for unit in "Ab\u{e9}".encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.push(b'V');
        let mut r = OpcodeReader::new(&data);
        let op = read_draw_text(&mut r, &OpcodeRegistry::new()).unwrap();
        assert_eq!(
            op,
            Opcode::DrawText {
                position: Point::new(5, -5),
                text: "Ab\u{e9}".to_string()
            }
        );
        assert_eq!(r.peek(), Some(b'V'));
    }

    #[test]
    fn test_draw_text_truncated() {
        let data = [0, 0, 0, 0, 4, b'a', 0];
        let mut r = OpcodeReader::new(&data);
        assert!(read_draw_text(&mut r, &OpcodeRegistry::new()).unwrap_err().is_truncated());
    }
}
