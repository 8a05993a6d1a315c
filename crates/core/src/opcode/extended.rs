//! Extended opcodes.
//!
//! Handles: `(` (extended ASCII) and `{` (extended binary)
//!
//! Both forms are self-delimiting, so opcodes nobody registered can be
//! skipped whole and reported as `Opcode::Unrecognized`.
//!
//! - `(Name payload)`: the name runs up to whitespace or a parenthesis. The
//!   payload may nest parentheses and contain `'` or `"` quoted runs.
//! - `{` size:i32 opcode:u16 data `}`: `size` counts every byte after the
//!   size field, the opcode and the closing brace included.

use super::{Opcode, OpcodeRegistry};
use crate::error::{Result, W2dError};
use crate::parser::reader::OpcodeReader;
use smol_str::SmolStr;
use tracing::debug;

const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

const fn is_name_end(b: u8) -> bool {
    is_whitespace(b) || b == b'(' || b == b')'
}

pub(super) fn read_extended_ascii(
    r: &mut OpcodeReader<'_>,
    registry: &OpcodeRegistry,
) -> Result<Opcode> {
    let mut name = Vec::new();
    loop {
        match r.peek() {
            None => return Err(W2dError::TruncatedStream { offset: r.tell() }),
            Some(b) if is_name_end(b) => break,
            Some(b) => {
                name.push(b);
                r.skip(1)?;
            }
        }
    }

    let payload = read_balanced(r)?;
    let name = String::from_utf8_lossy(&name);
    let Some(factory) = registry.keyword(&name) else {
        return Ok(Opcode::Unrecognized(SmolStr::new(name)));
    };
    // the closing ')' is consumed, so a bad operand only loses this opcode
    match factory(payload.trim_ascii()) {
        Ok(opcode) => Ok(opcode),
        Err(e @ W2dError::InvalidOperand { .. }) => {
            debug!(keyword = %name, error = %e, "keyword operand rejected");
            Ok(Opcode::Unrecognized(SmolStr::new(name)))
        }
        Err(e) => Err(e),
    }
}

/// Collect bytes up to the `)` that closes the opcode. The `)` is consumed
/// but not returned.
fn read_balanced(r: &mut OpcodeReader<'_>) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    loop {
        let b = r.read_u8()?;
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'(' => depth += 1,
                b')' if depth == 0 => return Ok(payload),
                b')' => depth -= 1,
                _ => {}
            },
        }
        payload.push(b);
    }
}

pub(super) fn read_extended_binary(
    r: &mut OpcodeReader<'_>,
    _: &OpcodeRegistry,
) -> Result<Opcode> {
    let start = r.tell().saturating_sub(1);
    let size = r.read_i32()?;
    if size < 3 {
        return Err(W2dError::Malformed {
            offset: start,
            msg: format!("extended binary size {size} is smaller than its header"),
        });
    }
    let opcode = r.read_u16()?;
    r.skip(size as usize - 3)?;
    let close = r.read_u8()?;
    if close != b'}' {
        return Err(W2dError::Malformed {
            offset: start,
            msg: format!("expected '}}' to close extended binary opcode, found {close:#04x}"),
        });
    }
    Ok(Opcode::Unrecognized(SmolStr::new(format!("{{{opcode:#06x}}}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii(data: &[u8]) -> (Result<Opcode>, usize) {
        let registry = OpcodeRegistry::standard();
        let mut r = OpcodeReader::new(data);
        let op = read_extended_ascii(&mut r, &registry);
        (op, r.tell())
    }

    #[test]
    fn test_url_skipped_whole() {
        let data = b"URL 1 'http://example.com/(x)' (Nested (deep))) V";
        let (op, pos) = ascii(data);
        assert_eq!(op.unwrap(), Opcode::Unrecognized("URL".into()));
        assert_eq!(&data[pos..], b" V");
    }

    #[test]
    fn test_empty_name() {
        let (op, pos) = ascii(b")");
        assert_eq!(op.unwrap(), Opcode::Unrecognized(SmolStr::default()));
        assert_eq!(pos, 1);
    }

    #[test]
    fn test_line_weight_keyword() {
        let (op, _) = ascii(b"LineWeight 12)");
        assert_eq!(op.unwrap(), Opcode::SetLineWeight(12));
    }

    #[test]
    fn test_bad_keyword_operand_is_unrecognized() {
        let data = b"LineWeight heavy)V";
        let (op, pos) = ascii(data);
        assert_eq!(op.unwrap(), Opcode::Unrecognized("LineWeight".into()));
        assert_eq!(&data[pos..], b"V");
    }

    #[test]
    fn test_unterminated() {
        let (op, _) = ascii(b"Font (Name 'x')");
        assert!(op.unwrap_err().is_truncated());
        let (op, _) = ascii(b"Font");
        assert!(op.unwrap_err().is_truncated());
    }

    #[test]
    fn test_binary_skipped_whole() {
        // '{' already consumed; size 5 = opcode(2) + data(2) + '}'
        let data = [b'{', 5, 0, 0, 0, 0x23, 0x01, 0xaa, 0xbb, b'}', b'v'];
        let mut r = OpcodeReader::new(&data);
        r.skip(1).unwrap();
        let op = read_extended_binary(&mut r, &OpcodeRegistry::new()).unwrap();
        assert_eq!(op, Opcode::Unrecognized("{0x0123}".into()));
        assert_eq!(r.peek(), Some(b'v'));
    }

    #[test]
    fn test_binary_bad_framing() {
        let data = [b'{', 2, 0, 0, 0, 0, 0];
        let mut r = OpcodeReader::new(&data);
        r.skip(1).unwrap();
        let err = read_extended_binary(&mut r, &OpcodeRegistry::new()).unwrap_err();
        assert!(matches!(err, W2dError::Malformed { offset: 0, .. }));

        let data = [b'{', 3, 0, 0, 0, 0x01, 0x00, b')'];
        let mut r = OpcodeReader::new(&data);
        r.skip(1).unwrap();
        let err = read_extended_binary(&mut r, &OpcodeRegistry::new()).unwrap_err();
        assert!(matches!(err, W2dError::Malformed { .. }));
    }
}
