pub mod cipher;
pub mod command;
pub mod constants;
pub mod error;
pub mod notification;
pub mod session;
pub mod transport;


// Re-export the handshake types for easy access
pub use cipher::{Cipher, SharedKey};
pub use command::{Command, CommandOpcode};
pub use error::AuthError;
pub use notification::{Notification, ResponseStatus};
pub use session::{AbortHandle, AuthSession, FailReason, State};
pub use transport::{AlertLevel, GattNotification, Transport, send_alert};
