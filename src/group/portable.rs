use super::Backend;
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

/// Treats the basepoint like any other point, no tables involved.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableBackend;

impl Backend for PortableBackend {
    const NAME: &'static str = "portable";

    fn mul_base(scalar: &Scalar) -> RistrettoPoint {
        RISTRETTO_BASEPOINT_POINT * scalar
    }
}
