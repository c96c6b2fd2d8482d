//! Turns shared points into single-use symmetric keys.
//!
//! Hashing is the random-oracle step of the protocol: `S_0` and `S_1` are
//! related by a known offset, only after hashing are the two keys independent.
use crate::base_ot::Selection;
use crate::common::digest::sha3::SHA3_256;
use crate::common::digest::Digest;
use crate::group::encode_point;
use curve25519_dalek::ristretto::RistrettoPoint;
use generic_array::{typenum::U32, GenericArray};
use std::fmt;
use zeroize::Zeroize;

const KEY_DOMAIN: &[u8] = b"ot.chou-orlandi.1-of-2.key";

/// 256 bit key for one message. Wiped on drop.
pub struct SymmetricKey(GenericArray<u8, U32>);

impl SymmetricKey {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn as_array(&self) -> &GenericArray<u8, U32> {
        &self.0
    }
}

impl From<GenericArray<u8, U32>> for SymmetricKey {
    fn from(bytes: GenericArray<u8, U32>) -> Self {
        SymmetricKey(bytes)
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.0.as_mut_slice().zeroize();
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Hashes the compressed form of `p`.
pub fn hash_point<D>(mut hasher: D, p: &RistrettoPoint) -> GenericArray<u8, D::OutputSize>
where
    D: Digest,
{
    hasher.input(&encode_point(p));
    hasher.result()
}

/// `H(domain || X || R || index || S)`: seeding the hash with the sender's
/// public point `X` and the query `R` binds the key to this transaction, the
/// index separates the two keys even if `S_0 == S_1` were ever forced.
pub fn derive_key(
    public: &RistrettoPoint,
    query: &RistrettoPoint,
    index: Selection,
    shared: &RistrettoPoint,
) -> SymmetricKey {
    let mut hasher = SHA3_256::default();
    hasher.input(KEY_DOMAIN);
    hasher.input(&encode_point(public));
    hasher.input(&encode_point(query));
    hasher.input(&[index.as_u8()]);
    SymmetricKey(hash_point(hasher, shared))
}
