//! Key material: hex-encoded keypairs and keypair generation (spec §4.1).

use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use thiserror::Error;
use zeroize::Zeroize;

use crate::curve::Curve;
use crate::hex_codec::{hex_decode, hex_encode, HexCodecError};

/// Errors from keypair generation.
#[derive(Debug, Error)]
pub enum KeygenError {
    /// No entropy source and no output destination were usable.
    #[error("missing argument")]
    NullArg,
    /// A primitive (RNG, curve arithmetic) failed in a way that carries no
    /// more specific, safely-disclosable detail.
    #[error("internal error during key generation")]
    InternalError,
}

/// A hex-encoded keypair for a given curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    /// Lower-case hex-encoded private scalar.
    pub private_key: String,
    /// Lower-case hex-encoded compressed public point.
    pub public_key: String,
}

/// Generates a fresh keypair on `C`, mixing system entropy with any
/// caller-supplied `additional_entropy` into the seed (spec §4.1, §9).
///
/// `additional_entropy` may be empty, arbitrarily long, or contain non-ASCII
/// bytes; all are valid inputs (spec §8 property 9).
pub fn generate_keypair<C: Curve>(additional_entropy: &[u8]) -> Result<Keypair, KeygenError> {
    let mut system_entropy = [0u8; 32];
    rand_core::OsRng.fill_bytes(&mut system_entropy);

    let mut hasher = Sha512::new();
    hasher.update(system_entropy);
    hasher.update(additional_entropy);
    let digest = hasher.finalize();

    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    system_entropy.zeroize();

    let mut rng = seeded_rng(seed);
    seed.zeroize();

    let (mut private, public) = C::keypair_from_rng(&mut rng);

    let private_key = hex_encode(&private).map_err(|_| KeygenError::InternalError)?;
    let public_key = hex_encode(&public).map_err(|_| KeygenError::InternalError)?;
    private.zeroize();

    Ok(Keypair {
        private_key,
        public_key,
    })
}

fn seeded_rng(seed: [u8; 32]) -> impl RngCore + CryptoRng {
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;
    ChaCha20Rng::from_seed(seed)
}

/// Decodes a hex private key into a curve-specific scalar, validating its
/// length against `C::SCALAR_LEN`.
pub(crate) fn decode_private_key<C: Curve>(hex: &str) -> Result<Vec<u8>, HexCodecError> {
    let bytes = hex_decode(hex)?;
    if bytes.len() != C::SCALAR_LEN {
        return Err(HexCodecError::InvalidHexDigit);
    }
    Ok(bytes)
}

/// Decodes a hex public key into curve-specific point bytes, validating its
/// length against `C::POINT_LEN`.
pub(crate) fn decode_public_key<C: Curve>(hex: &str) -> Result<Vec<u8>, HexCodecError> {
    let bytes = hex_decode(hex)?;
    if bytes.len() != C::POINT_LEN {
        return Err(HexCodecError::InvalidHexDigit);
    }
    Ok(bytes)
}
