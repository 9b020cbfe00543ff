//! Wallet-selection modal
//!
//! Startup code registers each wallet type with a factory and an options bag;
//! `connect` reuses the cached selection when one exists, otherwise falls
//! back to the first registration. The cache is cleared on disconnect or when
//! the user forces a re-selection.

use std::sync::Arc;

use crate::error::SessionError;
use crate::provider::{ProviderFactory, WalletProvider};

/// Options bag handed to a provider factory at connect time.
#[derive(Clone, Debug)]
pub struct ProviderOptions {
    /// EIP-155 chain id the provider should connect to
    pub chain_id: u64,
    /// Display name of the embedding application
    pub app_name: String,
    /// Whether the provider should return the user's email
    pub return_email: bool,
}

struct RegisteredProvider {
    key: String,
    factory: Arc<dyn ProviderFactory>,
    options: ProviderOptions,
}

/// Provider registry with a cached selection.
pub struct WalletModal {
    registry: Vec<RegisteredProvider>,
    cached: Option<String>,
}

impl WalletModal {
    pub fn new() -> Self {
        Self {
            registry: Vec::new(),
            cached: None,
        }
    }

    /// Register a wallet type under `key`.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        factory: Arc<dyn ProviderFactory>,
        options: ProviderOptions,
    ) {
        self.registry.push(RegisteredProvider {
            key: key.into(),
            factory,
            options,
        });
    }

    pub fn has_cached_selection(&self) -> bool {
        self.cached.is_some()
    }

    pub fn cached_selection(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    pub fn clear_cached_selection(&mut self) {
        self.cached = None;
    }

    /// Connect a provider: the cached selection if still registered,
    /// otherwise the first registered wallet type.
    pub async fn connect(&mut self) -> Result<Arc<dyn WalletProvider>, SessionError> {
        let entry = self
            .cached
            .as_ref()
            .and_then(|key| self.registry.iter().find(|r| &r.key == key))
            .or_else(|| self.registry.first())
            .ok_or_else(|| SessionError::NoProvider("registry is empty".to_string()))?;

        log::info!("Connecting wallet provider '{}'", entry.key);
        let provider = entry.factory.connect(&entry.options).await?;
        let key = entry.key.clone();
        self.cached = Some(key);
        Ok(provider)
    }
}

impl Default for WalletModal {
    fn default() -> Self {
        Self::new()
    }
}
