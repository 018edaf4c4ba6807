//! Hex <-> binary codec helpers (spec §6: `hexstr2bin`, `bin2hexstr`).
//!
//! Thin wrappers around the `hex` crate that add the buffer-size and
//! odd-length error distinctions the spec requires (§8 property 8), and that
//! tolerate a single trailing NUL byte on the input, matching the original
//! C library's fixed, NUL-padded hex buffers.

use thiserror::Error;

/// Errors from hex/binary conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexCodecError {
    /// The input was empty or otherwise missing required content.
    #[error("missing input")]
    NullArg,
    /// Hex input had an odd number of hex digits.
    #[error("odd-length hex string")]
    OddLength,
    /// The provided output buffer is too small to hold the result.
    #[error("insufficient output buffer size")]
    InsufficientOutputBufferSize,
    /// The input contained a non-hex-digit character.
    #[error("invalid hex digit")]
    InvalidHexDigit,
}

/// Strips a single trailing NUL byte, if present, matching a C caller that
/// passes `sizeof(buf)` including the NUL terminator.
fn trim_trailing_nul(bytes: &[u8]) -> &[u8] {
    match bytes.split_last() {
        Some((0, rest)) => rest,
        _ => bytes,
    }
}

/// Decodes a hex string into binary, returning an owned buffer.
pub fn hex_decode(input: &str) -> Result<Vec<u8>, HexCodecError> {
    let trimmed = trim_trailing_nul(input.as_bytes());
    if trimmed.is_empty() {
        return Err(HexCodecError::NullArg);
    }
    if trimmed.len() % 2 != 0 {
        return Err(HexCodecError::OddLength);
    }
    hex::decode(trimmed).map_err(|e| match e {
        hex::FromHexError::OddLength => HexCodecError::OddLength,
        _ => HexCodecError::InvalidHexDigit,
    })
}

/// Decodes a hex string into the provided output buffer, returning the
/// number of bytes written.
pub fn hex_decode_into(input: &str, out: &mut [u8]) -> Result<usize, HexCodecError> {
    let trimmed = trim_trailing_nul(input.as_bytes());
    if trimmed.is_empty() {
        return Err(HexCodecError::NullArg);
    }
    if trimmed.len() % 2 != 0 {
        return Err(HexCodecError::OddLength);
    }
    let needed = trimmed.len() / 2;
    if out.len() < needed {
        return Err(HexCodecError::InsufficientOutputBufferSize);
    }
    hex::decode_to_slice(trimmed, &mut out[..needed]).map_err(|_| HexCodecError::InvalidHexDigit)?;
    Ok(needed)
}

/// Encodes binary data as a lower-case hex string.
pub fn hex_encode(input: &[u8]) -> Result<String, HexCodecError> {
    if input.is_empty() {
        return Err(HexCodecError::NullArg);
    }
    Ok(hex::encode(input))
}

/// Encodes binary data as lower-case hex into the provided output buffer
/// (ASCII bytes, no NUL terminator written), returning the number of bytes
/// written.
pub fn hex_encode_into(input: &[u8], out: &mut [u8]) -> Result<usize, HexCodecError> {
    if input.is_empty() {
        return Err(HexCodecError::NullArg);
    }
    let needed = input.len() * 2;
    if out.len() < needed {
        return Err(HexCodecError::InsufficientOutputBufferSize);
    }
    hex::encode_to_slice(input, &mut out[..needed]).map_err(|_| HexCodecError::InvalidHexDigit)?;
    Ok(needed)
}
