use crate::cipher::SharedKey;
use crate::constants::{AUTH_FLAGS, BLOCK_SIZE, KEYED_FRAME_SIZE};
use crate::error::AuthError;
use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;

/// Opcode byte leading an auth command frame.
///
/// The band echoes the opcode in the middle byte of its 3-byte response
/// codes, so the decoder reuses this enum to classify notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum CommandOpcode {
    SendKey = 0x01,
    RequestRandom = 0x02,
    SendEncryptedRandom = 0x03,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// A command frame written to the auth characteristic.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Command {
    /// Provision the shared key on the band: `01 08` + key (18 bytes).
    SendKey(SharedKey),
    /// Ask the band for a 16-byte random challenge: `02 08` (2 bytes).
    RequestRandom,
    /// Answer the challenge with its ciphertext: `03 08` + ciphertext (18 bytes).
    SendEncryptedRandom([u8; BLOCK_SIZE]),
}

impl Command {
    /// Build a `SendEncryptedRandom` from a ciphertext slice, rejecting
    /// anything that is not a whole block.
    pub fn encrypted_random_from_slice(ciphertext: &[u8]) -> Result<Self, AuthError> {
        let ciphertext: [u8; BLOCK_SIZE] =
            ciphertext
                .try_into()
                .map_err(|_| AuthError::InvalidCiphertextSize {
                    actual: ciphertext.len(),
                })?;
        Ok(Command::SendEncryptedRandom(ciphertext))
    }

    pub fn opcode(&self) -> CommandOpcode {
        match self {
            Command::SendKey(_) => CommandOpcode::SendKey,
            Command::RequestRandom => CommandOpcode::RequestRandom,
            Command::SendEncryptedRandom(_) => CommandOpcode::SendEncryptedRandom,
        }
    }

    /// Serialize to the exact wire frame.
    pub fn encode(&self) -> Bytes {
        let mut frame = Vec::with_capacity(KEYED_FRAME_SIZE);
        frame.push(self.opcode().into());
        frame.push(AUTH_FLAGS);
        match self {
            Command::SendKey(key) => frame.extend_from_slice(key.as_bytes()),
            Command::RequestRandom => {}
            Command::SendEncryptedRandom(ciphertext) => frame.extend_from_slice(ciphertext),
        }
        Bytes::from(frame)
    }
}
