//! # Group
//!
//! Scalar and point primitives of the Ristretto group the protocol runs in.
//! Ristretto is a prime-order quotient of the twisted edwards curve 25519 of
//! Bernstein et al., so every point that decodes is in the right group and we
//! never have to clear a cofactor. The only remaining bad point is the
//! identity, which `decode_point` rejects.
//!
//! Fixed-base and variable-base multiplication go through a [`Backend`]. Two
//! backends ship with the crate; both are constant time in the scalar and
//! produce bit-identical points.
use crate::errors::*;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::IsIdentity;
use rand::{CryptoRng, RngCore};

pub mod portable;
pub mod table;

pub use self::portable::PortableBackend;
pub use self::table::TableBackend;

/// Length of an encoded point on the wire.
pub const POINT_LEN: usize = 32;
/// Length of an encoded scalar.
pub const SCALAR_LEN: usize = 32;

/// The backend used when none is named explicitly.
#[cfg(not(feature = "portable"))]
pub type DefaultBackend = TableBackend;
#[cfg(feature = "portable")]
pub type DefaultBackend = PortableBackend;

/// Group arithmetic the protocol needs. Implementations must run in constant
/// time with respect to `scalar`.
pub trait Backend {
    const NAME: &'static str;

    /// `scalar·G` for the Ristretto basepoint `G`.
    fn mul_base(scalar: &Scalar) -> RistrettoPoint;

    /// `scalar·point`
    fn mul(point: &RistrettoPoint, scalar: &Scalar) -> RistrettoPoint {
        point * scalar
    }
}

/// Draws a uniformly random non-zero scalar.
pub fn random_scalar<R>(rng: &mut R) -> Scalar
where
    R: RngCore + CryptoRng,
{
    loop {
        let s = Scalar::random(rng);
        // happens with probability 2^-252, but a zero key would make the public point the identity
        if s != Scalar::ZERO {
            return s;
        }
    }
}

pub fn encode_point(p: &RistrettoPoint) -> [u8; POINT_LEN] {
    p.compress().to_bytes()
}

/// Decodes a point received from the other party. Rejects wrong lengths,
/// non-canonical encodings and the identity.
pub fn decode_point(bytes: &[u8]) -> Result<RistrettoPoint> {
    if bytes.len() != POINT_LEN {
        return Err(ErrorKind::InvalidPoint.into());
    }
    let mut buf = [0u8; POINT_LEN];
    buf.copy_from_slice(bytes);
    let p = CompressedRistretto(buf)
        .decompress()
        .ok_or_else(|| Error::from(ErrorKind::InvalidPoint))?;
    if p.is_identity() {
        return Err(ErrorKind::InvalidPoint.into());
    }
    Ok(p)
}

pub fn encode_scalar(s: &Scalar) -> [u8; SCALAR_LEN] {
    s.to_bytes()
}

/// Decodes a scalar in canonical (fully reduced) form. Zero is rejected.
pub fn decode_scalar(bytes: &[u8]) -> Result<Scalar> {
    if bytes.len() != SCALAR_LEN {
        return Err(ErrorKind::InvalidScalar.into());
    }
    let mut buf = [0u8; SCALAR_LEN];
    buf.copy_from_slice(bytes);
    let s: Option<Scalar> = Scalar::from_canonical_bytes(buf).into();
    match s {
        Some(s) if s != Scalar::ZERO => Ok(s),
        _ => Err(ErrorKind::InvalidScalar.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
    use curve25519_dalek::traits::Identity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn assert_kind<T: std::fmt::Debug>(res: Result<T>, expected: ErrorKind) {
        match res {
            Err(e) => assert_eq!(
                std::mem::discriminant(e.kind()),
                std::mem::discriminant(&expected)
            ),
            Ok(v) => panic!("expected {:?}, got {:?}", expected, v),
        }
    }

    #[test]
    fn point_encoding_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let p = DefaultBackend::mul_base(&random_scalar(&mut rng));
        assert_eq!(decode_point(&encode_point(&p)).unwrap(), p);
    }

    #[test]
    fn basepoint_encoding_is_the_standard_one() {
        assert_eq!(
            hex::encode(encode_point(&RISTRETTO_BASEPOINT_POINT)),
            "e2f2ae0a6abc4e71a884a961c500515f58e30b6aa582dd8db6a65945e08d2d76"
        );
    }

    #[test]
    fn rejects_identity() {
        let id = encode_point(&RistrettoPoint::identity());
        assert_eq!(id, [0u8; 32]);
        assert_kind(decode_point(&id), ErrorKind::InvalidPoint);
    }

    #[test]
    fn rejects_wrong_length() {
        let p = encode_point(&RISTRETTO_BASEPOINT_POINT);
        assert_kind(decode_point(&p[..31]), ErrorKind::InvalidPoint);
        assert_kind(decode_point(&[&p[..], &[0u8]].concat()), ErrorKind::InvalidPoint);
        assert_kind(decode_point(&[]), ErrorKind::InvalidPoint);
    }

    #[test]
    fn rejects_non_canonical_encodings() {
        // all ones is larger than the field modulus
        assert_kind(decode_point(&[0xff; 32]), ErrorKind::InvalidPoint);
        // a negative field element (low bit set) is never a valid ristretto encoding
        let mut neg = [0u8; 32];
        neg[0] = 1;
        assert_kind(decode_point(&neg), ErrorKind::InvalidPoint);
    }

    #[test]
    fn scalar_decoding() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let s = random_scalar(&mut rng);
        assert_eq!(decode_scalar(&encode_scalar(&s)).unwrap(), s);
        assert_kind(decode_scalar(&[0u8; 32]), ErrorKind::InvalidScalar);
        assert_kind(decode_scalar(&[0xff; 32]), ErrorKind::InvalidScalar);
        assert_kind(decode_scalar(&[1u8; 16]), ErrorKind::InvalidScalar);
    }

    #[test]
    fn backends_agree() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..32 {
            let a = random_scalar(&mut rng);
            let b = random_scalar(&mut rng);
            let ta = TableBackend::mul_base(&a);
            let pa = PortableBackend::mul_base(&a);
            assert_eq!(encode_point(&ta), encode_point(&pa));
            assert_eq!(
                encode_point(&TableBackend::mul(&ta, &b)),
                encode_point(&PortableBackend::mul(&pa, &b))
            );
        }
    }
}
