// Protocol constants for the Mi Band 2 auth service

use std::time::Duration;

/// GATT value handle of the auth characteristic (commands out, notifications in)
pub const AUTH_CHAR_HANDLE: u16 = 0x0050;

/// GATT handle of the auth characteristic's client configuration descriptor
pub const AUTH_CCC_HANDLE: u16 = 0x0051;

/// GATT value handle of the alert characteristic, usable once authenticated
pub const ALERT_CHAR_HANDLE: u16 = 0x0025;

/// CCC descriptor payload that enables value notifications
pub const CCC_ENABLE_NOTIFICATIONS: [u8; 2] = [0x01, 0x00];

/// CCC descriptor payload that disables value notifications
pub const CCC_DISABLE_NOTIFICATIONS: [u8; 2] = [0x00, 0x00];

/// First byte of every auth-service response code
pub const RESPONSE_PREFIX: u8 = 0x10;

/// Length of the response code prefixing a notification (prefix + opcode + status)
pub const RESPONSE_CODE_SIZE: usize = 3;

/// Flags byte following the opcode in every auth command frame
pub const AUTH_FLAGS: u8 = 0x08;

/// Size of the shared key, the random challenge and its ciphertext (one AES block)
pub const BLOCK_SIZE: usize = 16;

/// Total frame length of the SendKey and SendEncryptedRandom commands
pub const KEYED_FRAME_SIZE: usize = 2 + BLOCK_SIZE;

/// Pairing key baked into unprovisioned Mi Band 2 units
pub const OUT_OF_BOX_KEY: [u8; BLOCK_SIZE] = [
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x40, 0x41, 0x42, 0x43, 0x44,
    0x45,
];

/// Default per-step wait for an auth notification
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound on key re-provisioning cycles within a single attempt
pub const DEFAULT_MAX_KEY_RESENDS: u32 = 3;
