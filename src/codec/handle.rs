//! Conversion between 8-byte object handles and their minimal hex rendering.
//!
//! Handles are logical 64-bit identifiers assigned by the token. The
//! canonical byte order here is big-endian (`u64::to_be_bytes`); the display
//! form is lowercase hex with every leading `0` digit stripped, so a zero
//! handle renders as the empty string. Callers that print handles must be
//! prepared for that edge case.

use super::error::{CodecError, CodecResult};

/// Width of a handle in bytes
pub const HANDLE_SIZE: usize = 8;

/// Width of a handle in hex digits
const HANDLE_HEX_DIGITS: usize = HANDLE_SIZE * 2;

/// Renders a handle value as minimal lowercase hex. Zero renders as the
/// empty string.
pub fn encode_u64(value: u64) -> String {
    if value == 0 {
        String::new()
    } else {
        format!("{:x}", value)
    }
}

/// Renders a handle buffer of up to 8 bytes as minimal lowercase hex.
///
/// The buffer is zero-extended on the most-significant side to the full
/// handle width before rendering. Buffers wider than 8 bytes fail with
/// [`CodecError::InvalidSize`].
pub fn encode(buffer: &[u8]) -> CodecResult<String> {
    if buffer.len() > HANDLE_SIZE {
        return Err(CodecError::InvalidSize { size: buffer.len() });
    }
    let mut canonical = [0u8; HANDLE_SIZE];
    canonical[HANDLE_SIZE - buffer.len()..].copy_from_slice(buffer);
    Ok(encode_u64(u64::from_be_bytes(canonical)))
}

/// Parses a minimal hex rendering back into an 8-byte big-endian handle
/// buffer.
///
/// The input is left-padded with `0` digits to the full 16-digit width
/// before parsing, so the result is always exactly 8 bytes. Inputs wider
/// than 16 digits fail with [`CodecError::InvalidSize`]; malformed hex
/// fails with [`CodecError::InvalidValue`].
pub fn decode(hex: &str) -> CodecResult<[u8; HANDLE_SIZE]> {
    if hex.len() > HANDLE_HEX_DIGITS {
        return Err(CodecError::InvalidSize {
            size: hex.len().div_ceil(2),
        });
    }
    let padded = format!("{:0>width$}", hex, width = HANDLE_HEX_DIGITS);
    let value = u64::from_str_radix(&padded, 16).map_err(|e| CodecError::InvalidValue {
        message: format!("malformed hex handle {:?}: {}", hex, e),
    })?;
    Ok(value.to_be_bytes())
}

/// Parses a minimal hex rendering into a handle value
pub fn decode_u64(hex: &str) -> CodecResult<u64> {
    decode(hex).map(u64::from_be_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_zero_handle_is_empty() {
        assert_eq!(encode(&[0u8; 8]).unwrap(), "");
        assert_eq!(encode(&[]).unwrap(), "");
        assert_eq!(encode_u64(0), "");
    }

    #[test]
    fn test_encode_single_byte() {
        assert_eq!(encode(&[0x01]).unwrap(), "1");
        assert_eq!(encode(&[0xab]).unwrap(), "ab");
    }

    #[test]
    fn test_encode_strips_leading_zero_digits() {
        assert_eq!(encode(&[0x00, 0x0f, 0x10]).unwrap(), "f10");
    }

    #[test]
    fn test_encode_oversized_buffer_fails() {
        let err = encode(&[1u8; 9]).unwrap_err();
        assert_eq!(err, CodecError::InvalidSize { size: 9 });
    }

    #[test]
    fn test_decode_single_digit() {
        assert_eq!(decode("1").unwrap(), [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_decode_empty_is_zero() {
        assert_eq!(decode("").unwrap(), [0u8; 8]);
    }

    #[test]
    fn test_decode_full_width() {
        assert_eq!(
            decode("0102030405060708").unwrap(),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_decode_oversized_input_fails() {
        let err = decode("010203040506070809").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSize { size: 9 }));
    }

    #[test]
    fn test_decode_malformed_hex_fails() {
        assert!(matches!(
            decode("zz").unwrap_err(),
            CodecError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_round_trip_after_canonicalization() {
        let cases: [&[u8]; 4] = [&[0x01], &[0xde, 0xad], &[0u8; 8], &[1, 2, 3, 4, 5, 6, 7, 8]];
        for buffer in cases {
            let mut canonical = [0u8; 8];
            canonical[8 - buffer.len()..].copy_from_slice(buffer);
            assert_eq!(decode(&encode(buffer).unwrap()).unwrap(), canonical);
        }
    }
}
