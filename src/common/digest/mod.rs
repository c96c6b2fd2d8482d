use generic_array::{ArrayLength, GenericArray};

pub mod sha3;

/// A simple trait to generalize hashing functions used by this library.
/// It is very similiar to the trait from the crate digest but customized to fit this library's needs.
/// Special care must be taken when selecting an implementation as any security flaw
/// transitively harms the security of the oblivious transfer: the hash is modelled as a
/// random oracle when turning shared points into symmetric keys.
///
/// As a general, fits-most implementation, a wrapper around tiny-keccaks SHA3 implementation is provided.
pub trait Digest {
    type OutputSize: ArrayLength<u8>;
    fn input(&mut self, data: &[u8]);
    fn result(self) -> GenericArray<u8, Self::OutputSize>;
}
