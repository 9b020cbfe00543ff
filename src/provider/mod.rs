//! Wallet provider capability contracts
//!
//! The session orchestrator only ever talks to a provider through
//! [`WalletProvider`], so any conforming implementation (an in-memory key, a
//! remote wallet bridge, a test double) can be substituted.

pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use ethers_core::types::transaction::eip712::TypedData;
use ethers_core::types::{Address, Bytes, Signature, TxHash, U256};
use ethers_core::utils::hash_message;

use crate::error::SessionError;
use crate::modal::ProviderOptions;

/// EIP-1271 `isValidSignature` magic value, returned by smart-contract
/// wallets that accept a signature. Providers backing such wallets compare
/// against this when overriding [`WalletProvider::validate_signature`].
pub const EIP1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// A native value transfer request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Capability set of a connected wallet provider handle.
///
/// Each method is one request/reply round trip; `send_transfer` additionally
/// awaits confirmation before returning the transaction hash.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Account the provider controls.
    async fn address(&self) -> Result<Address, SessionError>;

    /// Native balance of `address`, in wei.
    async fn balance(&self, address: Address) -> Result<U256, SessionError>;

    /// EIP-155 chain id the provider is connected to.
    async fn chain_id(&self) -> Result<u64, SessionError>;

    /// EIP-191 personal signature over `message`.
    async fn sign_personal_message(&self, message: &str) -> Result<Signature, SessionError>;

    /// EIP-712 signature over a typed-data payload.
    async fn sign_typed_data(&self, payload: &TypedData) -> Result<Signature, SessionError>;

    /// Submit a native transfer and await confirmation.
    async fn send_transfer(&self, request: &TransferRequest) -> Result<TxHash, SessionError>;

    /// Tear the provider handle down. Safe to call repeatedly.
    async fn disconnect(&self) -> Result<(), SessionError>;

    /// Validate that `signature` was produced by `claimed` over `message`.
    ///
    /// The default implementation covers externally-owned accounts via
    /// EIP-191 recovery. Smart-contract-wallet providers override this to
    /// consult on-chain code (EIP-1271).
    async fn validate_signature(
        &self,
        message: &str,
        signature: &Signature,
        claimed: Address,
    ) -> Result<(), SessionError> {
        let recovered = signature
            .recover(hash_message(message))
            .map_err(|e| SessionError::Signing(format!("signature recovery failed: {}", e)))?;
        if recovered != claimed {
            return Err(SessionError::SignatureMismatch {
                expected: claimed,
                recovered,
            });
        }
        Ok(())
    }
}

/// Builds a provider handle on behalf of the wallet-selection modal.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    async fn connect(
        &self,
        options: &ProviderOptions,
    ) -> Result<Arc<dyn WalletProvider>, SessionError>;
}

/// Hex-encode a signature for display (`0x`-prefixed, 65 bytes).
pub fn signature_hex(signature: &Signature) -> String {
    format!("0x{}", hex::encode(signature.to_vec()))
}
