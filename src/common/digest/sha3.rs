use super::Digest;
use generic_array::{typenum::U32, GenericArray};
use tiny_keccak::{Hasher, Sha3};

/// Wrapper type to implement this library's Digest trait for Sha3-256 (Keccak)
#[allow(non_camel_case_types)]
#[derive(Clone)]
pub struct SHA3_256(pub Sha3);

impl Default for SHA3_256 {
    fn default() -> Self {
        SHA3_256(Sha3::v256())
    }
}

impl Digest for SHA3_256 {
    type OutputSize = U32;
    fn input(&mut self, data: &[u8]) {
        self.0.update(data);
    }
    fn result(self) -> GenericArray<u8, Self::OutputSize> {
        let mut arr: GenericArray<u8, Self::OutputSize> = Default::default();
        self.0.finalize(&mut arr);
        arr
    }
}
