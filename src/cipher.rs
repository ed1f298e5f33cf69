use crate::constants::{BLOCK_SIZE, OUT_OF_BOX_KEY};
use crate::error::AuthError;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Block};

/// The 16-byte symmetric key shared with the band.
///
/// The key is plain process-wide configuration: it is never derived or
/// negotiated, and both ends must hold the same bytes. Sessions receive it
/// explicitly at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedKey([u8; BLOCK_SIZE]);

impl SharedKey {
    pub const fn new(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a key from a slice, rejecting anything that is not 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AuthError> {
        let bytes: [u8; BLOCK_SIZE] = bytes
            .try_into()
            .map_err(|_| AuthError::InvalidKeySize { actual: bytes.len() })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl Default for SharedKey {
    /// The out-of-box pairing key of an unprovisioned band.
    fn default() -> Self {
        Self(OUT_OF_BOX_KEY)
    }
}

/// Single-block AES-128-ECB encryption under the shared key.
///
/// The handshake only ever encrypts one 16-byte block per cycle, so there is
/// no chaining, no IV and no padding. Encryption is deterministic for a fixed
/// key and safe to call from any number of tasks.
pub struct Cipher {
    inner: Aes128,
}

impl Cipher {
    pub fn new(key: &SharedKey) -> Self {
        Self {
            inner: Aes128::new(key.as_bytes().into()),
        }
    }

    /// Encrypt exactly one 16-byte block.
    ///
    /// Fails with `InvalidInputSize` if the input is not exactly one block;
    /// correctly-sized input cannot fail.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<[u8; BLOCK_SIZE], AuthError> {
        if plaintext.len() != BLOCK_SIZE {
            return Err(AuthError::InvalidInputSize {
                actual: plaintext.len(),
            });
        }

        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(plaintext);
        self.inner.encrypt_block(Block::from_mut_slice(&mut block));
        Ok(block)
    }
}
