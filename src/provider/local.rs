//! In-memory EOA provider
//!
//! Backs the demo binary and the integration tests: a provider handle driven
//! by a local signing key, with a configurable reported balance and an
//! optional reject-all-transfers mode for exercising the failure path.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ethers_core::types::transaction::eip712::TypedData;
use ethers_core::types::{Address, Signature, TxHash, U256};
use ethers_core::utils::keccak256;
use ethers_signers::{LocalWallet, Signer};

use crate::error::SessionError;
use crate::modal::ProviderOptions;
use crate::provider::{ProviderFactory, TransferRequest, WalletProvider};

/// Wallet provider backed by an in-memory secp256k1 key.
pub struct LocalWalletProvider {
    wallet: LocalWallet,
    chain_id: u64,
    balance: U256,
    reject_transfers: bool,
    connected: AtomicBool,
    transfer_seq: AtomicU64,
    sent: Mutex<Vec<(TransferRequest, TxHash)>>,
}

impl LocalWalletProvider {
    pub fn new(wallet: LocalWallet, chain_id: u64) -> Self {
        Self {
            wallet: wallet.with_chain_id(chain_id),
            chain_id,
            balance: U256::zero(),
            reject_transfers: false,
            connected: AtomicBool::new(true),
            transfer_seq: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Provider with a throwaway random key.
    pub fn random(chain_id: u64) -> Self {
        Self::new(LocalWallet::new(&mut rand::thread_rng()), chain_id)
    }

    /// Set the balance the provider reports for its own account.
    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    /// Make every transfer fail, as a rejecting wallet would.
    pub fn with_rejected_transfers(mut self) -> Self {
        self.reject_transfers = true;
        self
    }

    /// Transfers accepted so far, in submission order.
    pub fn sent_transfers(&self) -> Vec<(TransferRequest, TxHash)> {
        self.sent.lock().expect("transfer log lock").clone()
    }

    fn ensure_connected(&self) -> Result<(), SessionError> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SessionError::Provider("provider handle torn down".to_string()))
        }
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    async fn address(&self) -> Result<Address, SessionError> {
        self.ensure_connected()?;
        Ok(self.wallet.address())
    }

    async fn balance(&self, address: Address) -> Result<U256, SessionError> {
        self.ensure_connected()?;
        if address == self.wallet.address() {
            Ok(self.balance)
        } else {
            Ok(U256::zero())
        }
    }

    async fn chain_id(&self) -> Result<u64, SessionError> {
        self.ensure_connected()?;
        Ok(self.chain_id)
    }

    async fn sign_personal_message(&self, message: &str) -> Result<Signature, SessionError> {
        self.ensure_connected()?;
        self.wallet
            .sign_message(message)
            .await
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    async fn sign_typed_data(&self, payload: &TypedData) -> Result<Signature, SessionError> {
        self.ensure_connected()?;
        self.wallet
            .sign_typed_data(payload)
            .await
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    async fn send_transfer(&self, request: &TransferRequest) -> Result<TxHash, SessionError> {
        self.ensure_connected()?;
        if self.reject_transfers {
            return Err(SessionError::Transfer(
                "user rejected the transaction".to_string(),
            ));
        }
        if request.from != self.wallet.address() {
            return Err(SessionError::Transfer(format!(
                "unknown sender {:?}",
                request.from
            )));
        }
        if request.value > self.balance {
            return Err(SessionError::Transfer("insufficient funds".to_string()));
        }

        let seq = self.transfer_seq.fetch_add(1, Ordering::SeqCst);
        let mut preimage = Vec::with_capacity(20 + 20 + 32 + 8);
        preimage.extend_from_slice(request.from.as_bytes());
        preimage.extend_from_slice(request.to.as_bytes());
        let mut value_bytes = [0u8; 32];
        request.value.to_big_endian(&mut value_bytes);
        preimage.extend_from_slice(&value_bytes);
        preimage.extend_from_slice(&seq.to_be_bytes());
        let hash = TxHash::from(keccak256(&preimage));

        self.sent
            .lock()
            .expect("transfer log lock")
            .push((request.clone(), hash));
        log::debug!("local transfer confirmed: {:?}", hash);
        Ok(hash)
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        // Repeated teardown is a no-op
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Factory registering [`LocalWalletProvider`] with the selection modal.
///
/// Holds the key and behavior; the chain id comes from the registered
/// [`ProviderOptions`] at connect time.
pub struct LocalWalletFactory {
    wallet: LocalWallet,
    balance: U256,
    reject_transfers: bool,
}

impl LocalWalletFactory {
    pub fn new(wallet: LocalWallet) -> Self {
        Self {
            wallet,
            balance: U256::zero(),
            reject_transfers: false,
        }
    }

    pub fn random() -> Self {
        Self::new(LocalWallet::new(&mut rand::thread_rng()))
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_rejected_transfers(mut self) -> Self {
        self.reject_transfers = true;
        self
    }

    /// Account address of the factory's key.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}

#[async_trait]
impl ProviderFactory for LocalWalletFactory {
    async fn connect(
        &self,
        options: &ProviderOptions,
    ) -> Result<Arc<dyn WalletProvider>, SessionError> {
        log::debug!(
            "connecting local wallet provider for '{}' on chain {}",
            options.app_name,
            options.chain_id
        );
        let mut provider = LocalWalletProvider::new(self.wallet.clone(), options.chain_id)
            .with_balance(self.balance);
        if self.reject_transfers {
            provider = provider.with_rejected_transfers();
        }
        Ok(Arc::new(provider))
    }
}
