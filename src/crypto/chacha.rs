use super::{open, seal, SymmetricCrypt};
use crate::errors::*;
use crate::kdf::SymmetricKey;
use ring::aead::CHACHA20_POLY1305;

/// ChaCha20-Poly1305 from `ring`. Faster than AES-GCM on targets without
/// AES instructions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChaChaCryptoProvider();

impl SymmetricCrypt for ChaChaCryptoProvider {
    fn tag_len(&self) -> usize {
        CHACHA20_POLY1305.tag_len()
    }

    fn encrypt(&mut self, key: &SymmetricKey, data: Vec<u8>) -> Result<Vec<u8>> {
        seal(&CHACHA20_POLY1305, key, data)
    }

    fn decrypt(&mut self, key: &SymmetricKey, data: Vec<u8>) -> Result<Vec<u8>> {
        open(&CHACHA20_POLY1305, key, data)
    }
}
