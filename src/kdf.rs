//! HKDF-SHA-512 key derivation (spec §4.2).
//!
//! Grounded in the teacher's `crates/threshold-bls/src/ecies.rs::derive`,
//! generalized from a fixed `None` salt (safe there only because the DH
//! input itself is never reused) to a per-encryption random salt that is
//! carried in the envelope, and from `Sha256`/32-byte output to `Sha512`/48-byte
//! output (32-byte AES key + 16-byte IV) per spec.

use hkdf::Hkdf;
use sha2::Sha512;
use thiserror::Error;
use zeroize::Zeroize;

/// Length in bytes of the derived AES-256 key.
pub const AES_KEY_LEN: usize = 32;
/// Length in bytes of the derived AES-GCM IV (non-standard 16 bytes, spec §9).
pub const IV_LEN: usize = 16;
/// Length in bytes of the HKDF salt carried in the envelope.
pub const SALT_LEN: usize = 32;

/// Failure of the HKDF expand step. In practice HKDF-SHA-512 cannot fail for
/// the fixed 48-byte output this module requests; this type exists so the
/// fallible `hkdf` API has somewhere to report it.
#[derive(Debug, Error)]
#[error("hkdf expand failed")]
pub struct KdfError;

/// Symmetric key material derived from an ECDH shared secret and a salt.
pub struct KeyMaterial {
    /// AES-256 key.
    pub aes_key: [u8; AES_KEY_LEN],
    /// AES-GCM IV.
    pub iv: [u8; IV_LEN],
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.aes_key.zeroize();
        self.iv.zeroize();
    }
}

/// Derives `(aes_key, iv)` from `shared_secret` and `salt` via
/// HKDF-Extract/Expand with HMAC-SHA-512.
pub fn derive(shared_secret: &[u8], salt: &[u8; SALT_LEN]) -> Result<KeyMaterial, KdfError> {
    let hk = Hkdf::<Sha512>::new(Some(salt), shared_secret);

    let mut okm = [0u8; AES_KEY_LEN + IV_LEN];
    hk.expand(&[], &mut okm).map_err(|_| KdfError)?;

    let mut aes_key = [0u8; AES_KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    aes_key.copy_from_slice(&okm[..AES_KEY_LEN]);
    iv.copy_from_slice(&okm[AES_KEY_LEN..]);
    okm.zeroize();

    Ok(KeyMaterial { aes_key, iv })
}
