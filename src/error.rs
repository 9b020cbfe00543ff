use ethers_core::types::Address;
use thiserror::Error;

/// Error type for wallet session operations.
///
/// Nothing here is fatal to the process: every failure is local to one
/// user-triggered action and leaves previously stored state untouched.
#[derive(Error, Debug)]
pub enum SessionError {
    /// An action that requires a live connection was invoked without one.
    #[error("no active wallet connection")]
    NotConnected,

    /// The wallet-selection modal has no usable provider registration.
    #[error("no wallet provider registered: {0}")]
    NoProvider(String),

    /// The provider handle reported a failure (query or teardown).
    #[error("provider error: {0}")]
    Provider(String),

    /// A signing request failed (user rejection, provider error).
    #[error("signing failed: {0}")]
    Signing(String),

    /// A native transfer was rejected or failed to confirm.
    #[error("transfer failed: {0}")]
    Transfer(String),

    /// A sign-in attestation message could not be parsed or rebuilt.
    #[error("invalid attestation: {0}")]
    InvalidAttestation(String),

    /// A signature did not recover to the address named in the statement.
    #[error("signature mismatch: expected {expected:?}, recovered {recovered:?}")]
    SignatureMismatch { expected: Address, recovered: Address },

    /// Malformed caller-supplied input (addresses, amounts).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
