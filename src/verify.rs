//! Attestation verification
//!
//! Confirms that a signature is valid, by the address named inside the
//! attestation statement, over the canonical text of that exact statement.
//! The connected provider is the validation backend, so smart-contract
//! wallets are covered by whatever on-chain check the provider implements.

use ethers_core::types::Signature;

use crate::attestation::AttestationStatement;
use crate::error::SessionError;
use crate::notify::Notifier;
use crate::provider::WalletProvider;

/// Verify `signature` over the canonical `message` text.
///
/// The outcome is surfaced as a success or failure notice; the underlying
/// failure detail is logged, not returned.
pub async fn verify_attestation(
    message: &str,
    signature: &Signature,
    provider: &dyn WalletProvider,
    notifier: &dyn Notifier,
) -> bool {
    match validate(message, signature, provider).await {
        Ok(()) => {
            notifier.success("signature verified");
            true
        }
        Err(e) => {
            log::error!("Attestation verification failed: {}", e);
            notifier.error("signature verification failed");
            false
        }
    }
}

async fn validate(
    message: &str,
    signature: &Signature,
    provider: &dyn WalletProvider,
) -> Result<(), SessionError> {
    let statement = AttestationStatement::parse(message)?;
    provider
        .validate_signature(message, signature, statement.address)
        .await
}
