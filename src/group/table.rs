use super::Backend;
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

/// Uses `curve25519-dalek`'s precomputed basepoint table for fixed-base
/// multiplication. Costs a static table but is several times faster than
/// [`PortableBackend`](super::PortableBackend).
#[derive(Debug, Default, Clone, Copy)]
pub struct TableBackend;

impl Backend for TableBackend {
    const NAME: &'static str = "table";

    fn mul_base(scalar: &Scalar) -> RistrettoPoint {
        scalar * RISTRETTO_BASEPOINT_TABLE
    }
}
