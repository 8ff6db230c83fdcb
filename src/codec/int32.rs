//! Conversion between 32-bit unsigned integers and 4-byte big-endian
//! buffers, as used for RSA public exponents in attribute templates.

/// An integer attribute value that may already be in wire form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntValue {
    /// A plain 32-bit integer to be encoded big-endian
    Int(u32),
    /// An already-encoded buffer, passed through unchanged
    Bytes(Vec<u8>),
}

/// Encodes a 32-bit unsigned integer as 4 bytes, most-significant first
pub fn to_buffer(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Converts an [`IntValue`] to its buffer form. Existing buffers pass
/// through unchanged.
pub fn coerce_to_buffer(value: IntValue) -> Vec<u8> {
    match value {
        IntValue::Int(v) => to_buffer(v).to_vec(),
        IntValue::Bytes(buffer) => buffer,
    }
}

/// Reads a 32-bit unsigned integer from `buffer` starting at `offset`.
///
/// With at least 4 bytes remaining this is a standard big-endian read.
/// With 1 to 3 bytes remaining it falls back to a positional-weighted sum,
/// `byte * 16^(2 * positionFromEnd)`, a legacy decode path kept for
/// compatibility with truncated device responses. With nothing remaining
/// the result is `None`.
pub fn from_buffer(buffer: &[u8], offset: usize) -> Option<u32> {
    let remaining = buffer.len().saturating_sub(offset);
    if remaining == 0 {
        return None;
    }
    if remaining >= 4 {
        let bytes: [u8; 4] = buffer[offset..offset + 4].try_into().ok()?;
        Some(u32::from_be_bytes(bytes))
    } else {
        let mut result: u64 = 0;
        let mut weight: u32 = 0;
        let mut index = offset + remaining;
        while index > offset {
            result += (buffer[index - 1] as u64) * 16u64.pow(weight);
            weight += 2;
            index -= 1;
        }
        Some(result as u32)
    }
}
