//! Elliptic Curve Integrated Encryption Scheme (ECIES) over Curve25519 and
//! Curve448.
//!
//! Encrypts arbitrary-length plaintext to a recipient's public key using
//! ephemeral-static ECDH, HKDF-SHA-512, and AES-256-GCM, and bundles the
//! result into a single self-describing envelope (optionally Base64-wrapped)
//! that the recipient's private key alone can open. See [`ecies::encrypt`]
//! and [`ecies::decrypt`] for the main entry points, and [`keys::generate_keypair`]
//! to produce a keypair.
//!
//! ```
//! use ecies_core::curve::Curve25519;
//! use ecies_core::keys::generate_keypair;
//! use ecies_core::ecies::{encrypt, decrypt};
//!
//! let recipient = generate_keypair::<Curve25519>(b"some local entropy").unwrap();
//! let envelope = encrypt::<Curve25519>(b"attack at dawn", &recipient.public_key, true).unwrap();
//! let plaintext = decrypt::<Curve25519>(&envelope, true, &recipient.private_key).unwrap();
//! assert_eq!(plaintext, b"attack at dawn");
//! ```

pub mod curve;
pub mod diagnostics;
pub mod ecies;
pub mod envelope;
pub mod hex_codec;
pub mod kdf;
pub mod keys;

pub use curve::{Curve, Curve25519, Curve448, CurveError};
pub use ecies::{decrypt, decrypt_into, encrypt, encrypt_into, DecryptError, EncryptError};
pub use envelope::{base64_envelope_size, binary_envelope_size};
pub use keys::{generate_keypair, Keypair, KeygenError};
