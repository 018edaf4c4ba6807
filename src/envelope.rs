//! The self-describing ciphertext envelope (spec §3, §4.3).
//!
//! Fixed fields, no separators or length prefixes:
//! `salt[32] || iv[16] || gcm_tag[16] || ephemeral_pub[P] || ciphertext[N]`.
//! Grounded in the teacher's `crates/threshold-bls/src/ecies.rs::EciesCipher`
//! (bundling the AEAD ciphertext with the ephemeral point and nonce), but
//! flattened to the fixed-offset byte layout the spec requires instead of a
//! `bincode`-serialized struct, since the envelope's field order must be a
//! stable, observable wire contract (spec §5 "Ordering").

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

use crate::curve::Curve;
use crate::kdf::{IV_LEN, SALT_LEN};

const TAG_LEN: usize = 16;
/// Offset of the fixed header preceding the ephemeral public key and ciphertext.
const HEADER_LEN: usize = SALT_LEN + IV_LEN + TAG_LEN;

/// Errors from parsing or sizing an envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The envelope is shorter than the fixed header plus at least one
    /// plaintext byte.
    #[error("envelope too short")]
    TooShort,
    /// Base64 decoding failed.
    #[error("invalid base64")]
    InvalidBase64,
}

/// The parsed fields of a binary envelope, borrowing from the input buffer.
pub struct ParsedEnvelope<'a> {
    pub salt: &'a [u8],
    pub iv: &'a [u8],
    pub gcm_tag: &'a [u8],
    pub ephemeral_public_key: &'a [u8],
    pub ciphertext: &'a [u8],
}

/// Size in bytes of the binary envelope for a given plaintext length, on curve `C`.
pub fn binary_envelope_size<C: Curve>(plaintext_len: usize) -> usize {
    HEADER_LEN + C::POINT_LEN + plaintext_len
}

/// Size in bytes of the Base64 encoding of a `binary_len`-byte envelope,
/// including the reserved trailing NUL slot (spec §3).
pub fn base64_envelope_size(binary_len: usize) -> usize {
    binary_len.div_ceil(3) * 4 + 1
}

/// Assembles the binary envelope from its fields.
pub fn encode_binary(
    salt: &[u8; SALT_LEN],
    iv: &[u8; IV_LEN],
    gcm_tag: &[u8],
    ephemeral_public_key: &[u8],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + ephemeral_public_key.len() + ciphertext.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(iv);
    out.extend_from_slice(gcm_tag);
    out.extend_from_slice(ephemeral_public_key);
    out.extend_from_slice(ciphertext);
    out
}

/// Base64-encodes a binary envelope (RFC 4648, standard alphabet, padded).
pub fn encode_base64(binary: &[u8]) -> String {
    BASE64.encode(binary)
}

/// Decodes a possibly-Base64-wrapped envelope and splits it into its fields
/// (spec §4.3 decode algorithm).
pub fn decode<'a, C: Curve>(
    data: &'a [u8],
    scratch: &'a mut Vec<u8>,
    is_base64: bool,
) -> Result<ParsedEnvelope<'a>, EnvelopeError> {
    let binary: &'a [u8] = if is_base64 {
        let text = std::str::from_utf8(data).map_err(|_| EnvelopeError::InvalidBase64)?;
        let text = text.trim_end_matches('\0');
        *scratch = BASE64
            .decode(text)
            .map_err(|_| EnvelopeError::InvalidBase64)?;
        scratch.as_slice()
    } else {
        data
    };

    let min_len = HEADER_LEN + C::POINT_LEN + 1;
    if binary.len() < min_len {
        return Err(EnvelopeError::TooShort);
    }

    let (salt, rest) = binary.split_at(SALT_LEN);
    let (iv, rest) = rest.split_at(IV_LEN);
    let (gcm_tag, rest) = rest.split_at(TAG_LEN);
    let (ephemeral_public_key, ciphertext) = rest.split_at(C::POINT_LEN);

    Ok(ParsedEnvelope {
        salt,
        iv,
        gcm_tag,
        ephemeral_public_key,
        ciphertext,
    })
}
