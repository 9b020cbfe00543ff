//! Wallet session orchestration
//!
//! `WalletSession` owns the single active connection and exposes the
//! user-triggered actions as independent async methods. Each action performs
//! one request/reply round trip against the provider and stores its result in
//! a dedicated slot; re-invoking an action only overwrites that slot.

use std::sync::Arc;

use ethers_core::types::{Address, Bytes, Signature, TxHash, U256};
use ethers_core::utils::to_checksum;

use crate::attestation::AttestationStatement;
use crate::config::AppConfig;
use crate::error::SessionError;
use crate::modal::WalletModal;
use crate::notify::Notifier;
use crate::payloads::DemoPayloads;
use crate::provider::{TransferRequest, WalletProvider};
use crate::units::format_wei;
use crate::verify;

/// The single live connection: provider handle plus the values derived from
/// it at connect time.
pub struct Connection {
    pub provider: Arc<dyn WalletProvider>,
    pub address: Address,
    pub chain_id: u64,
    pub balance_wei: U256,
}

/// A signed sign-in attestation: the canonical text that was signed and the
/// signature over it, kept together for later verification.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SignedAttestation {
    pub message: String,
    pub signature: Signature,
}

/// Session orchestrator.
///
/// All actions except connect/disconnect require a live connection and fail
/// fast with [`SessionError::NotConnected`] otherwise, leaving every stored
/// result untouched.
pub struct WalletSession {
    modal: WalletModal,
    config: AppConfig,
    payloads: DemoPayloads,
    notifier: Arc<dyn Notifier>,
    connection: Option<Connection>,
    personal_signature: Option<Signature>,
    attestation: Option<SignedAttestation>,
    typed_data_signature: Option<Signature>,
    transfer_hash: Option<TxHash>,
    transfer_pending: bool,
}

impl WalletSession {
    pub fn new(
        modal: WalletModal,
        config: AppConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, SessionError> {
        let payloads = DemoPayloads::from_config(&config)?;
        Ok(Self {
            modal,
            config,
            payloads,
            notifier,
            connection: None,
            personal_signature: None,
            attestation: None,
            typed_data_signature: None,
            transfer_hash: None,
            transfer_pending: false,
        })
    }

    /// Substitute the demo payloads (fixtures in tests).
    pub fn with_payloads(mut self, payloads: DemoPayloads) -> Self {
        self.payloads = payloads;
        self
    }

    // ============================================================================
    // Connection lifecycle
    // ============================================================================

    /// Connect through the modal and derive the session state from the
    /// returned provider handle.
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        let provider = self.modal.connect().await?;
        let address = provider.address().await?;
        let balance_wei = provider.balance(address).await?;
        let chain_id = provider.chain_id().await?;

        log::info!(
            "Connected: address={}, chain_id={}, balance={} wei",
            to_checksum(&address, None),
            chain_id,
            balance_wei
        );

        self.connection = Some(Connection {
            provider,
            address,
            chain_id,
            balance_wei,
        });
        Ok(())
    }

    /// Forced reconnect: drop the cached wallet selection, then connect, so
    /// the user can pick a different wallet.
    pub async fn reconnect(&mut self) -> Result<(), SessionError> {
        if self.modal.has_cached_selection() {
            self.modal.clear_cached_selection();
        }
        self.connect().await
    }

    /// Tear down the provider handle, clear the cached selection and reset
    /// the connection. Idempotent: a no-op without an active connection.
    pub async fn disconnect(&mut self) {
        self.modal.clear_cached_selection();
        if let Some(connection) = self.connection.take() {
            if let Err(e) = connection.provider.disconnect().await {
                log::warn!("Provider teardown reported an error: {}", e);
            }
            log::info!("Disconnected");
        }
    }

    // ============================================================================
    // Signing actions
    // ============================================================================

    /// Personal-sign the fixed demo message and store the signature.
    pub async fn sign_personal_message(&mut self) -> Result<(), SessionError> {
        let connection = self.require_connection()?;
        let signature = connection
            .provider
            .sign_personal_message(&self.payloads.personal_message)
            .await?;
        log::info!("Personal message signed");
        self.personal_signature = Some(signature);
        Ok(())
    }

    /// Build the sign-in attestation from the page context and the live
    /// connection, sign its canonical text, and store both for verification.
    pub async fn sign_attestation(&mut self) -> Result<(), SessionError> {
        let connection = self.require_connection()?;
        let statement = AttestationStatement::new(
            self.config.siwe_domain.clone(),
            connection.address,
            self.payloads.attestation_statement.clone(),
            self.config.siwe_uri.clone(),
            connection.chain_id,
        );
        let message = statement.prepare_message();
        let signature = connection.provider.sign_personal_message(&message).await?;
        log::info!("Sign-in attestation signed for {}", statement.domain);
        self.attestation = Some(SignedAttestation { message, signature });
        Ok(())
    }

    /// Sign the fixed EIP-712 demo payload and store the signature.
    pub async fn sign_typed_data(&mut self) -> Result<(), SessionError> {
        let connection = self.require_connection()?;
        let signature = connection
            .provider
            .sign_typed_data(&self.payloads.typed_data)
            .await?;
        log::info!("Typed data signed");
        self.typed_data_signature = Some(signature);
        Ok(())
    }

    // ============================================================================
    // Transfer
    // ============================================================================

    /// Submit the fixed native transfer and await confirmation.
    ///
    /// Provider failures are not propagated: they surface as an error notice
    /// and the pending flag is reset on every path. The previously stored
    /// transaction hash stays untouched on failure.
    pub async fn send_native_transfer(&mut self) -> Result<(), SessionError> {
        let (provider, from) = {
            let connection = self.require_connection()?;
            (Arc::clone(&connection.provider), connection.address)
        };
        let request = TransferRequest {
            from,
            to: self.payloads.transfer_to,
            value: self.payloads.transfer_value,
            data: Bytes::new(),
        };

        self.transfer_pending = true;
        let result = provider.send_transfer(&request).await;
        self.transfer_pending = false;

        match result {
            Ok(hash) => {
                log::info!("Native transfer confirmed: {:?}", hash);
                self.transfer_hash = Some(hash);
            }
            Err(e) => {
                log::error!("Native transfer failed: {}", e);
                self.notifier.error(&format!("transfer failed: {}", e));
            }
        }
        Ok(())
    }

    // ============================================================================
    // Verification
    // ============================================================================

    /// Verify the stored attestation signature against the canonical text
    /// that was signed, using the connected provider as validation backend.
    ///
    /// The outcome surfaces as a success/failure notice; `Ok(bool)` mirrors
    /// it for callers.
    pub async fn verify_attestation(&self) -> Result<bool, SessionError> {
        let connection = self.require_connection()?;
        let attestation = self.attestation.as_ref().ok_or_else(|| {
            SessionError::InvalidInput("no signed attestation to verify".to_string())
        })?;
        Ok(verify::verify_attestation(
            &attestation.message,
            &attestation.signature,
            connection.provider.as_ref(),
            self.notifier.as_ref(),
        )
        .await)
    }

    // ============================================================================
    // State accessors
    // ============================================================================

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn address(&self) -> Option<Address> {
        self.connection.as_ref().map(|c| c.address)
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.connection.as_ref().map(|c| c.chain_id)
    }

    pub fn balance_wei(&self) -> Option<U256> {
        self.connection.as_ref().map(|c| c.balance_wei)
    }

    /// Balance in trimmed ether form (`1`, not `1.000000000000000000`).
    pub fn balance_display(&self) -> Option<String> {
        self.balance_wei().map(format_wei)
    }

    pub fn personal_signature(&self) -> Option<&Signature> {
        self.personal_signature.as_ref()
    }

    pub fn attestation(&self) -> Option<&SignedAttestation> {
        self.attestation.as_ref()
    }

    pub fn typed_data_signature(&self) -> Option<&Signature> {
        self.typed_data_signature.as_ref()
    }

    pub fn transfer_hash(&self) -> Option<TxHash> {
        self.transfer_hash
    }

    pub fn transfer_pending(&self) -> bool {
        self.transfer_pending
    }

    pub fn has_cached_selection(&self) -> bool {
        self.modal.has_cached_selection()
    }

    fn require_connection(&self) -> Result<&Connection, SessionError> {
        self.connection.as_ref().ok_or(SessionError::NotConnected)
    }
}
