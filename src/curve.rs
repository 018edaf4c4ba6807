//! Curve selection and scalar-multiplication backends.
//!
//! Mirrors the `Curve`/`Element`/`Point` trait split of the teacher crate's
//! `group` module, collapsed into a single trait because Montgomery curves
//! used for ECDH only ever need a scalar, a compressed point, and one
//! operation (clamped scalar multiplication) rather than a full group API.

use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

/// Errors surfaced by curve-specific key agreement or point validation.
#[derive(Debug, Error)]
pub enum CurveError {
    /// The provided bytes are not `POINT_LEN` long for this curve.
    #[error("not a valid point on the curve")]
    InvalidPoint,
    /// The ECDH result is the identity element (a degenerate/low-order public key).
    #[error("shared secret is degenerate")]
    DegenerateSharedSecret,
}

/// A Montgomery curve usable for ephemeral-static ECDH.
///
/// Implementors fix the scalar and (compressed, X-only) point byte lengths at
/// compile time, matching the per-curve constants in spec §3.
pub trait Curve: Clone + Copy + Send + Sync + 'static {
    /// Length in bytes of a private scalar.
    const SCALAR_LEN: usize;
    /// Length in bytes of a compressed public point (the X-only scalar-mult result).
    const POINT_LEN: usize;

    /// A freshly generated private scalar, paired with its public point.
    fn keypair_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> (Vec<u8>, Vec<u8>);

    /// Recomputes the public point for a given private scalar.
    fn public_from_private(private: &[u8]) -> Result<Vec<u8>, CurveError>;

    /// Performs scalar multiplication `private * public`, returning the shared
    /// secret bytes. Rejects a zero (degenerate) result.
    fn ecdh(private: &[u8], public: &[u8]) -> Result<Vec<u8>, CurveError>;

    /// Checks that `public` is `POINT_LEN` bytes. This is a length-only sanity
    /// check by design: X25519/X448 scalar multiplication (RFC 7748) accepts
    /// every length-correct u-coordinate, including ones not on the curve or
    /// in the twist, so there is no further on-curve check that would be
    /// cryptographically meaningful here — callers rely on `ecdh`'s
    /// contributory-behaviour/all-zero check to reject the degenerate results
    /// those inputs can produce.
    fn validate_point(public: &[u8]) -> Result<(), CurveError>;
}

/// Curve25519 (X25519, RFC 7748), ~128-bit security.
#[derive(Clone, Copy, Debug)]
pub struct Curve25519;

/// Curve448 (X448, RFC 7748), ~224-bit security.
#[derive(Clone, Copy, Debug)]
pub struct Curve448;

mod curve25519_impl {
    use super::*;
    use x25519_dalek::{PublicKey, StaticSecret};

    impl Curve for Curve25519 {
        const SCALAR_LEN: usize = 32;
        const POINT_LEN: usize = 32;

        fn keypair_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> (Vec<u8>, Vec<u8>) {
            let secret = StaticSecret::random_from_rng(rng);
            let public = PublicKey::from(&secret);
            (secret.to_bytes().to_vec(), public.as_bytes().to_vec())
        }

        fn public_from_private(private: &[u8]) -> Result<Vec<u8>, CurveError> {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(private);
            let secret = StaticSecret::from(bytes);
            Ok(PublicKey::from(&secret).as_bytes().to_vec())
        }

        fn ecdh(private: &[u8], public: &[u8]) -> Result<Vec<u8>, CurveError> {
            let mut priv_bytes = [0u8; 32];
            priv_bytes.copy_from_slice(private);
            let mut pub_bytes = [0u8; 32];
            pub_bytes.copy_from_slice(public);

            let secret = StaticSecret::from(priv_bytes);
            let their_public = PublicKey::from(pub_bytes);
            let shared = secret.diffie_hellman(&their_public);

            if !shared.was_contributory() {
                return Err(CurveError::DegenerateSharedSecret);
            }
            Ok(shared.as_bytes().to_vec())
        }

        fn validate_point(public: &[u8]) -> Result<(), CurveError> {
            if public.len() != Self::POINT_LEN {
                return Err(CurveError::InvalidPoint);
            }
            Ok(())
        }
    }
}

mod curve448_impl {
    use super::*;
    use ed448_goldilocks::MontgomeryPoint;
    use subtle::ConstantTimeEq;

    /// RFC 7748's X448 base point `u = 5`.
    const BASEPOINT: [u8; 56] = {
        let mut b = [0u8; 56];
        b[0] = 5;
        b
    };

    impl Curve for Curve448 {
        const SCALAR_LEN: usize = 56;
        const POINT_LEN: usize = 56;

        fn keypair_from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> (Vec<u8>, Vec<u8>) {
            let mut scalar = [0u8; 56];
            rng.fill_bytes(&mut scalar);
            let public = MontgomeryPoint(BASEPOINT).mul_clamped(scalar);
            (scalar.to_vec(), public.0.to_vec())
        }

        fn public_from_private(private: &[u8]) -> Result<Vec<u8>, CurveError> {
            let mut scalar = [0u8; 56];
            scalar.copy_from_slice(private);
            let public = MontgomeryPoint(BASEPOINT).mul_clamped(scalar);
            Ok(public.0.to_vec())
        }

        fn ecdh(private: &[u8], public: &[u8]) -> Result<Vec<u8>, CurveError> {
            let mut scalar = [0u8; 56];
            scalar.copy_from_slice(private);
            let mut point = [0u8; 56];
            point.copy_from_slice(public);

            let shared = MontgomeryPoint(point).mul_clamped(scalar);
            let zero = [0u8; 56];
            if shared.0.ct_eq(&zero).into() {
                return Err(CurveError::DegenerateSharedSecret);
            }
            Ok(shared.0.to_vec())
        }

        fn validate_point(public: &[u8]) -> Result<(), CurveError> {
            if public.len() != Self::POINT_LEN {
                return Err(CurveError::InvalidPoint);
            }
            Ok(())
        }
    }
}
