use crate::cipher::{Cipher, SharedKey};
use crate::command::Command;
use crate::constants::{AUTH_CHAR_HANDLE, DEFAULT_MAX_KEY_RESENDS, DEFAULT_STEP_TIMEOUT};
use crate::error::AuthError;
use crate::notification::Notification;
use crate::transport::Transport;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};
use strum_macros::Display;

/// Authentication progress. `Authenticated` and `Failed` are terminal; no
/// transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum State {
    Idle,
    AwaitingKeyAck,
    AwaitingRandom,
    AwaitingAuthResult,
    Authenticated,
    Failed(FailReason),
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Authenticated | State::Failed(_))
    }
}

/// Why an attempt ended short of `Authenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FailReason {
    KeyRejected,
    RandomRejected,
    ProtocolViolation,
    Timeout,
    Cancelled,
    Transport,
}

impl FailReason {
    fn of(error: &AuthError) -> Self {
        match error {
            AuthError::KeyRejected => FailReason::KeyRejected,
            AuthError::RandomRejected => FailReason::RandomRejected,
            AuthError::Timeout => FailReason::Timeout,
            AuthError::Cancelled => FailReason::Cancelled,
            AuthError::Transport(_) => FailReason::Transport,
            _ => FailReason::ProtocolViolation,
        }
    }
}

impl From<FailReason> for AuthError {
    fn from(reason: FailReason) -> Self {
        match reason {
            FailReason::KeyRejected => AuthError::KeyRejected,
            FailReason::RandomRejected => AuthError::RandomRejected,
            FailReason::ProtocolViolation => AuthError::ProtocolViolation,
            FailReason::Timeout => AuthError::Timeout,
            FailReason::Cancelled => AuthError::Cancelled,
            FailReason::Transport => {
                AuthError::Transport("transport failed during authentication".to_string())
            }
        }
    }
}

/// Handle for aborting a pending authentication attempt from another task.
///
/// Aborting wakes the session out of its current wait and resolves the
/// attempt to `Failed(Cancelled)`. Aborting before the session starts
/// waiting cancels the next wait.
#[derive(Clone)]
pub struct AbortHandle(Arc<Notify>);

impl AbortHandle {
    pub fn abort(&self) {
        self.0.notify_one();
    }
}

/// One authentication attempt against the band's auth service.
///
/// The session owns the handshake state and the shared key, issues commands
/// through a [`Transport`] and consumes decoded notifications until it
/// resolves to `Authenticated` or `Failed`. Create one session per attempt
/// and discard it once terminal.
pub struct AuthSession {
    state: State,
    key: SharedKey,
    cipher: Cipher,
    step_timeout: Duration,
    max_key_resends: u32,
    key_resends: u32,
    cancel: Arc<Notify>,
}

impl AuthSession {
    /// Session with the default step timeout and resend bound.
    pub fn new(key: SharedKey) -> Self {
        Self::with_config(key, DEFAULT_STEP_TIMEOUT, DEFAULT_MAX_KEY_RESENDS)
    }

    /// Session with an explicit per-step timeout and key-resend bound.
    pub fn with_config(key: SharedKey, step_timeout: Duration, max_key_resends: u32) -> Self {
        let cipher = Cipher::new(&key);
        Self {
            state: State::Idle,
            key,
            cipher,
            step_timeout,
            max_key_resends,
            key_resends: 0,
            cancel: Arc::new(Notify::new()),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle(self.cancel.clone())
    }

    /// Run the handshake to a terminal state.
    ///
    /// Enables auth notifications, then alternates between issuing a command
    /// and waiting (bounded by the step timeout) for the band's answer.
    /// Returns `Ok(())` once `Authenticated`; every failure is terminal and
    /// reported through the error. Calling again on a terminal session
    /// returns the recorded outcome without touching the transport.
    pub async fn authenticate<T: Transport>(&mut self, transport: &mut T) -> Result<(), AuthError> {
        match self.state {
            State::Idle => {}
            State::Authenticated => return Ok(()),
            State::Failed(reason) => return Err(reason.into()),
            _ => return Err(AuthError::ProtocolViolation),
        }

        let result = self.run(transport).await;
        if let Err(ref error) = result {
            if !self.state.is_terminal() {
                self.state = State::Failed(FailReason::of(error));
                warn!(state = %self.state, "authentication failed: {error}");
            }
        }
        result
    }

    async fn run<T: Transport>(&mut self, transport: &mut T) -> Result<(), AuthError> {
        debug!("enabling auth service notifications");
        transport.subscribe(AUTH_CHAR_HANDLE).await?;

        let opening = self.start();
        self.issue(transport, opening).await?;

        loop {
            let raw = self.await_auth_notification(transport).await?;
            let notification = Notification::decode(raw)?;
            debug!(%notification, state = %self.state, "notification received");

            if let Some(command) = self.on_notification(notification)? {
                self.issue(transport, command).await?;
            }

            if self.state == State::Authenticated {
                info!("authenticated");
                return Ok(());
            }
        }
    }

    /// Begin the handshake: leave `Idle` and produce the opening command.
    ///
    /// The band is always asked for a challenge first; the key is only sent
    /// if the band later reports it is not provisioned with it (`10 03 04`).
    pub fn start(&mut self) -> Command {
        info!("requesting random number");
        self.state = State::AwaitingRandom;
        Command::RequestRandom
    }

    /// Apply one decoded notification to the state machine.
    ///
    /// Pure transition step: no I/O, no waiting. Returns the command the
    /// caller must write next, if any. A `Failed` transition surfaces as the
    /// corresponding error with the state already recorded. Exposed so the
    /// transition table can be exercised without a live transport.
    pub fn on_notification(
        &mut self,
        notification: Notification,
    ) -> Result<Option<Command>, AuthError> {
        if self.state.is_terminal() {
            return Err(AuthError::ProtocolViolation);
        }

        match (self.state, notification) {
            (State::AwaitingRandom, Notification::RandomIssued(random)) => {
                info!("challenge received, sending encrypted random number");
                let ciphertext = self.cipher.encrypt(&random)?;
                self.state = State::AwaitingAuthResult;
                Ok(Some(Command::SendEncryptedRandom(ciphertext)))
            }
            (State::AwaitingRandom, Notification::RandomRejected) => {
                self.fail(FailReason::RandomRejected)
            }
            (State::AwaitingAuthResult, Notification::AuthSucceeded) => {
                self.state = State::Authenticated;
                Ok(None)
            }
            (State::AwaitingAuthResult, Notification::EncryptedRandomRejected) => {
                self.key_resends += 1;
                if self.key_resends > self.max_key_resends {
                    warn!(
                        resends = self.key_resends - 1,
                        "band keeps rejecting the key, giving up"
                    );
                    return self.fail(FailReason::KeyRejected);
                }
                info!(
                    cycle = self.key_resends,
                    max = self.max_key_resends,
                    "band requested key re-provisioning, sending key"
                );
                self.state = State::AwaitingKeyAck;
                Ok(Some(Command::SendKey(self.key.clone())))
            }
            (State::AwaitingKeyAck, Notification::KeyAccepted) => {
                info!("key accepted, requesting random number");
                self.state = State::AwaitingRandom;
                Ok(Some(Command::RequestRandom))
            }
            (State::AwaitingKeyAck, Notification::KeyRejected) => {
                self.fail(FailReason::KeyRejected)
            }
            (state, Notification::Unrecognized(raw)) => {
                warn!(%state, payload = %hex::encode(&raw), "unrecognized notification");
                self.fail(FailReason::ProtocolViolation)
            }
            (state, notification) => {
                warn!(%state, %notification, "notification not valid in this state");
                self.fail(FailReason::ProtocolViolation)
            }
        }
    }

    fn fail(&mut self, reason: FailReason) -> Result<Option<Command>, AuthError> {
        warn!(%reason, "authentication failed");
        self.state = State::Failed(reason);
        Err(reason.into())
    }

    async fn issue<T: Transport>(
        &mut self,
        transport: &mut T,
        command: Command,
    ) -> Result<(), AuthError> {
        debug!(%command, "writing auth command");
        transport.write(AUTH_CHAR_HANDLE, &command.encode()).await
    }

    /// Wait for the next notification on the auth characteristic.
    ///
    /// Notifications from other handles are ignored without resetting the
    /// step deadline. Resolves early with `Cancelled` if the abort handle
    /// fires; with `Timeout` once the deadline passes.
    async fn await_auth_notification<T: Transport>(
        &self,
        transport: &mut T,
    ) -> Result<Bytes, AuthError> {
        let deadline = Instant::now() + self.step_timeout;
        loop {
            tokio::select! {
                _ = self.cancel.notified() => {
                    info!("authentication aborted");
                    return Err(AuthError::Cancelled);
                }
                result = timeout_at(deadline, transport.next_notification()) => {
                    let notification = result??;
                    if notification.handle != AUTH_CHAR_HANDLE {
                        debug!(handle = notification.handle, "ignoring notification from unrelated handle");
                        continue;
                    }
                    return Ok(notification.value);
                }
            }
        }
    }
}
