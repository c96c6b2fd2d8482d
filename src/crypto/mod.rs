//! Authenticated symmetric ciphers used to encrypt the two messages.
//!
//! Every key produced by the protocol encrypts exactly one message, so the
//! providers use a constant all-zero nonce. Ciphertexts are the plaintext
//! followed by the authentication tag.
use crate::errors::*;
use crate::kdf::SymmetricKey;
use ring::aead::{Aad, Algorithm, LessSafeKey, Nonce, UnboundKey, NONCE_LEN};

pub mod aes;
pub mod chacha;

pub use self::aes::AesCryptoProvider;
pub use self::chacha::ChaChaCryptoProvider;

/// Length of the authentication tag appended by the shipped providers.
pub const TAG_LEN: usize = 16;

/// Trait for authenticated ciphers to be used in OT.
///
/// `decrypt` must fail with `ErrorKind::Decryption` whenever the tag does not
/// verify; returning unauthenticated bytes would let a receiver mistake the
/// other message's ciphertext for its own.
pub trait SymmetricCrypt {
    fn tag_len(&self) -> usize;
    fn encrypt(&mut self, key: &SymmetricKey, data: Vec<u8>) -> Result<Vec<u8>>;
    fn decrypt(&mut self, key: &SymmetricKey, data: Vec<u8>) -> Result<Vec<u8>>;
}

fn less_safe_key(algorithm: &'static Algorithm, key: &SymmetricKey) -> Result<LessSafeKey> {
    let unbound =
        UnboundKey::new(algorithm, key.as_bytes()).chain_err(|| ErrorKind::Crypto("key rejected"))?;
    Ok(LessSafeKey::new(unbound))
}

pub(crate) fn seal(
    algorithm: &'static Algorithm,
    key: &SymmetricKey,
    mut data: Vec<u8>,
) -> Result<Vec<u8>> {
    let key = less_safe_key(algorithm, key)?;
    let nonce = Nonce::assume_unique_for_key([0u8; NONCE_LEN]);
    key.seal_in_place_append_tag(nonce, Aad::empty(), &mut data)
        .chain_err(|| ErrorKind::Crypto("sealing failed"))?;
    Ok(data)
}

pub(crate) fn open(
    algorithm: &'static Algorithm,
    key: &SymmetricKey,
    mut data: Vec<u8>,
) -> Result<Vec<u8>> {
    let key = less_safe_key(algorithm, key)?;
    let nonce = Nonce::assume_unique_for_key([0u8; NONCE_LEN]);
    let len = match key.open_in_place(nonce, Aad::empty(), &mut data) {
        Ok(plain) => plain.len(),
        Err(_) => return Err(ErrorKind::Decryption.into()),
    };
    data.truncate(len);
    Ok(data)
}
