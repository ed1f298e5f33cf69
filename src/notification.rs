use crate::command::CommandOpcode;
use crate::constants::{BLOCK_SIZE, RESPONSE_CODE_SIZE, RESPONSE_PREFIX};
use crate::error::AuthError;
use bytes::Bytes;
use num_enum::{FromPrimitive, IntoPrimitive};
use strum_macros::Display;

/// Status byte closing a 3-byte auth response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum ResponseStatus {
    Success = 0x01,
    Rejected = 0x04,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// A classified auth-service notification.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notification {
    /// `10 01 01`: the band stored the key we sent.
    KeyAccepted,
    /// `10 01 04`: the band refused the key.
    KeyRejected,
    /// `10 02 01` + 16 bytes: the band issued a random challenge.
    RandomIssued([u8; BLOCK_SIZE]),
    /// `10 02 04`: the band refused to issue a challenge.
    RandomRejected,
    /// `10 03 01`: the encrypted challenge matched.
    AuthSucceeded,
    /// `10 03 04`: the band no longer trusts the key and wants it re-sent.
    EncryptedRandomRejected,
    /// Anything whose leading code is not in the table above.
    Unrecognized(Bytes),
}

impl Notification {
    /// Classify a raw value notification from the auth characteristic.
    ///
    /// Only the leading 3-byte response code is inspected. For `10 02 01`
    /// the 16-byte challenge is extracted from the rest of the payload;
    /// fewer than 16 remaining bytes is `MalformedPayload`, trailing bytes
    /// past the block are ignored. Never blocks, never writes.
    pub fn decode(raw: Bytes) -> Result<Self, AuthError> {
        if raw.len() < RESPONSE_CODE_SIZE || raw[0] != RESPONSE_PREFIX {
            return Ok(Notification::Unrecognized(raw));
        }

        let opcode = CommandOpcode::from_primitive(raw[1]);
        let status = ResponseStatus::from_primitive(raw[2]);

        let notification = match (opcode, status) {
            (CommandOpcode::SendKey, ResponseStatus::Success) => Notification::KeyAccepted,
            (CommandOpcode::SendKey, ResponseStatus::Rejected) => Notification::KeyRejected,
            (CommandOpcode::RequestRandom, ResponseStatus::Success) => {
                let payload = &raw[RESPONSE_CODE_SIZE..];
                if payload.len() < BLOCK_SIZE {
                    return Err(AuthError::MalformedPayload {
                        expected: BLOCK_SIZE,
                        actual: payload.len(),
                    });
                }
                let mut random = [0u8; BLOCK_SIZE];
                random.copy_from_slice(&payload[..BLOCK_SIZE]);
                Notification::RandomIssued(random)
            }
            (CommandOpcode::RequestRandom, ResponseStatus::Rejected) => {
                Notification::RandomRejected
            }
            (CommandOpcode::SendEncryptedRandom, ResponseStatus::Success) => {
                Notification::AuthSucceeded
            }
            (CommandOpcode::SendEncryptedRandom, ResponseStatus::Rejected) => {
                Notification::EncryptedRandomRejected
            }
            _ => Notification::Unrecognized(raw),
        };

        Ok(notification)
    }
}
