//! Wallet session orchestration with Sign-In with Ethereum attestation
//!
//! This crate reimplements a wallet-demo's logic as a library: a session
//! orchestrator holding the single active wallet connection, a set of
//! user-triggered signing and transfer actions, and a sign-in attestation
//! (EIP-4361) builder/verifier.
//!
//! # Architecture
//!
//! - **Session orchestrator** ([`session::WalletSession`]): owns the
//!   connection state and exposes independent actions, each one asynchronous
//!   request/reply round trip against the provider.
//! - **Attestation verifier** ([`attestation`], [`verify`]): canonical
//!   EIP-4361 text construction plus signature validation against the
//!   address named inside the statement.
//! - **Capability contracts** ([`provider`], [`modal`]): explicit traits for
//!   the provider handle and the wallet-selection component, so any
//!   conforming implementation can be substituted.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use siwe_session::config::AppConfig;
//! use siwe_session::modal::{ProviderOptions, WalletModal};
//! use siwe_session::notify::LogNotifier;
//! use siwe_session::provider::local::LocalWalletFactory;
//! use siwe_session::session::WalletSession;
//!
//! # async fn run() -> Result<(), siwe_session::error::SessionError> {
//! let config = AppConfig::default();
//! let mut modal = WalletModal::new();
//! modal.register(
//!     "local",
//!     Arc::new(LocalWalletFactory::random()),
//!     ProviderOptions {
//!         chain_id: config.chain_id,
//!         app_name: config.app_name.clone(),
//!         return_email: config.return_email,
//!     },
//! );
//!
//! let mut session = WalletSession::new(modal, config, Arc::new(LogNotifier))?;
//! session.connect().await?;
//! session.sign_attestation().await?;
//! assert!(session.verify_attestation().await?);
//! # Ok(())
//! # }
//! ```

pub mod attestation;
pub mod config;
pub mod error;
pub mod modal;
pub mod notify;
pub mod payloads;
pub mod provider;
pub mod session;
pub mod units;
pub mod verify;

// Re-exports for convenience
pub use attestation::AttestationStatement;
pub use config::AppConfig;
pub use error::SessionError;
pub use modal::{ProviderOptions, WalletModal};
pub use notify::{LogNotifier, Notifier};
pub use provider::{ProviderFactory, TransferRequest, WalletProvider};
pub use session::{Connection, SignedAttestation, WalletSession};
