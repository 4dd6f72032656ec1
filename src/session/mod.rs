// src/session/mod.rs

pub mod sync_session;

#[cfg(feature = "async")]
pub mod async_session;

pub use sync_session::Sht4xSession;

#[cfg(feature = "async")]
pub use async_session::AsyncSht4xSession;

/// Lifecycle of a session.
///
/// A session becomes `Ready` once the device has answered the serial number
/// request. There is no closed state: the bus is only held for the duration of
/// a single transaction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Ready,
}
