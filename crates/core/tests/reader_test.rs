//! Payload reader tests: primitive fields, extended counts and truncation.

use w2d_core::W2dError;
use w2d_core::parser::OpcodeReader;
use w2d_core::utils::{LogicalPoint, Point};

fn bytes(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).unwrap()
}

// === primitive fields ===

#[test]
fn test_little_endian_fields() {
    let data = bytes("ff 3412 feff 78563412");
    let mut r = OpcodeReader::new(&data);
    assert_eq!(r.read_u8().unwrap(), 0xff);
    assert_eq!(r.read_u16().unwrap(), 0x1234);
    assert_eq!(r.read_i16().unwrap(), -2);
    assert_eq!(r.read_i32().unwrap(), 0x1234_5678);
    assert!(r.at_end());
}

#[test]
fn test_points() {
    let data = bytes("0a00 f6ff ffffff7f 00000080");
    let mut r = OpcodeReader::new(&data);
    assert_eq!(r.read_point().unwrap(), Point::new(10, -10));
    assert_eq!(
        r.read_logical_point().unwrap(),
        LogicalPoint::new(i32::MAX, i32::MIN)
    );
    assert_eq!(r.remaining(), 0);
}

// === extended count ===

#[test]
fn test_extended_count_short_form() {
    let mut r = OpcodeReader::new(&[0x02]);
    assert_eq!(r.read_extended_count().unwrap(), 2);
    assert_eq!(r.tell(), 1);
}

#[test]
fn test_extended_count_escape() {
    // 0 escapes to 256 + the following u16
    let data = bytes("00 0100");
    let mut r = OpcodeReader::new(&data);
    assert_eq!(r.read_extended_count().unwrap(), 257);
    assert_eq!(r.tell(), 3);

    let data = bytes("00 ffff");
    let mut r = OpcodeReader::new(&data);
    assert_eq!(r.read_extended_count().unwrap(), 256 + 65535);
}

#[test]
fn test_extended_count_escape_truncated() {
    let data = bytes("00 01");
    let mut r = OpcodeReader::new(&data);
    let err = r.read_extended_count().unwrap_err();
    assert!(matches!(err, W2dError::TruncatedStream { offset: 1 }));
}

// === truncation ===

#[test]
fn test_truncated_field_reports_its_start() {
    let data = bytes("0100 02");
    let mut r = OpcodeReader::new(&data);
    assert_eq!(r.read_i16().unwrap(), 1);
    let err = r.read_i16().unwrap_err();
    assert!(err.is_truncated());
    assert!(matches!(err, W2dError::TruncatedStream { offset: 2 }));
}

#[test]
fn test_read_points_truncated() {
    let data = bytes("0100 0100 0200");
    let mut r = OpcodeReader::new(&data);
    assert!(r.read_points(2).unwrap_err().is_truncated());
}

#[test]
fn test_utf16_text() {
    let data = bytes("4800 6900 3d04");
    let mut r = OpcodeReader::new(&data);
    assert_eq!(r.read_utf16(3).unwrap(), "Hi\u{43d}");
}
