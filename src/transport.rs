use crate::constants::ALERT_CHAR_HANDLE;
use crate::error::AuthError;
use bytes::Bytes;
use num_enum::IntoPrimitive;
use tracing::info;

/// A value notification delivered by the connection layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GattNotification {
    /// GATT value handle the notification arrived on.
    pub handle: u16,
    /// Raw notification payload.
    pub value: Bytes,
}

/// The narrow GATT capability the auth session needs from the connection
/// layer. Connecting, service discovery and security-level negotiation all
/// live behind this trait.
///
/// `next_notification` must genuinely suspend the caller until a
/// notification arrives; the session applies its own per-step deadline on
/// top, so implementations should not time out on their own. Notifications
/// must be handed to a single consumer in arrival order.
pub trait Transport {
    /// Write a value to the characteristic with the given handle.
    ///
    /// Fails with `AuthError::Transport` if the connection is not ready.
    async fn write(&mut self, handle: u16, value: &[u8]) -> Result<(), AuthError>;

    /// Suspend until the next value notification arrives on any subscribed
    /// characteristic.
    async fn next_notification(&mut self) -> Result<GattNotification, AuthError>;

    /// Enable value notifications for a characteristic (a CCC descriptor
    /// write on a real connection).
    async fn subscribe(&mut self, handle: u16) -> Result<(), AuthError>;

    /// Disable value notifications for a characteristic.
    async fn unsubscribe(&mut self, handle: u16) -> Result<(), AuthError>;
}

/// Alert level understood by the band's alert characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum AlertLevel {
    Off = 0x00,
    Message = 0x01,
    Phone = 0x02,
}

/// Fire a one-shot alert on the band.
///
/// A plain characteristic write with no protocol logic; the band only honors
/// it on an authenticated connection.
pub async fn send_alert<T: Transport>(
    transport: &mut T,
    level: AlertLevel,
) -> Result<(), AuthError> {
    info!(?level, "sending alert");
    let value: u8 = level.into();
    transport.write(ALERT_CHAR_HANDLE, &[value]).await
}
