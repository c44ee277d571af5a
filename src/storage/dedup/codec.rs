// File: src/storage/dedup/codec.rs

//! Fixed-width big-endian encoding of dedup values and the size counter
//!
//! Values are `index ‖ timestamp`, both u64 big-endian, so byte order matches
//! numeric order.

use crate::error::CodecError;

/// Encoded length of a dedup value
pub const VALUE_LEN: usize = 16;

/// Encoded length of the size counter
pub const SIZE_LEN: usize = 8;

/// Concatenate an index and timestamp into a 16-byte value
pub fn encode_value(index: u64, timestamp: u64) -> [u8; VALUE_LEN] {
    let mut out = [0u8; VALUE_LEN];
    out[..8].copy_from_slice(&index.to_be_bytes());
    out[8..].copy_from_slice(&timestamp.to_be_bytes());
    out
}

/// Parse a 16-byte value into `(index, timestamp)`
pub fn decode_value(bytes: &[u8]) -> Result<(u64, u64), CodecError> {
    let value: &[u8; VALUE_LEN] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
        expected: VALUE_LEN,
        actual: bytes.len(),
    })?;

    let (idx, ts) = value.split_at(8);
    Ok((be_u64(idx), be_u64(ts)))
}

/// 8-byte big-endian representation of the size counter
pub fn encode_size(size: u64) -> [u8; SIZE_LEN] {
    size.to_be_bytes()
}

/// Parse the size counter
pub fn decode_size(bytes: &[u8]) -> Result<u64, CodecError> {
    if bytes.len() != SIZE_LEN {
        return Err(CodecError::InvalidLength {
            expected: SIZE_LEN,
            actual: bytes.len(),
        });
    }
    Ok(be_u64(bytes))
}

fn be_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_be_bytes(buf)
}
