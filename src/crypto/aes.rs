use super::{open, seal, SymmetricCrypt};
use crate::errors::*;
use crate::kdf::SymmetricKey;
use ring::aead::AES_256_GCM;

/// AES-256-GCM from `ring`, the default cipher.
#[derive(Debug, Default, Clone, Copy)]
pub struct AesCryptoProvider();

impl SymmetricCrypt for AesCryptoProvider {
    fn tag_len(&self) -> usize {
        AES_256_GCM.tag_len()
    }

    fn encrypt(&mut self, key: &SymmetricKey, data: Vec<u8>) -> Result<Vec<u8>> {
        // we can use a static 0 nonce here, because each key encrypts a single message
        seal(&AES_256_GCM, key, data)
    }

    fn decrypt(&mut self, key: &SymmetricKey, data: Vec<u8>) -> Result<Vec<u8>> {
        open(&AES_256_GCM, key, data)
    }
}
