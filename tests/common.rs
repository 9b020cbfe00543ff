/// Common test utilities for wallet session integration tests
///
/// Builds a session wired to an in-memory wallet provider with a recording
/// notifier, so tests can assert on connection state, stored results and
/// emitted notices.
use std::sync::Arc;

use ethers_core::types::U256;
use ethers_signers::LocalWallet;

use siwe_session::config::AppConfig;
use siwe_session::modal::{ProviderOptions, WalletModal};
use siwe_session::notify::RecordingNotifier;
use siwe_session::provider::local::LocalWalletFactory;
use siwe_session::session::WalletSession;

pub struct TestEnvironment {
    pub session: WalletSession,
    pub notifier: Arc<RecordingNotifier>,
    pub wallet: LocalWallet,
}

impl TestEnvironment {
    /// Session backed by a funded wallet (one ether).
    pub fn new() -> Self {
        Self::build(|wallet| LocalWalletFactory::new(wallet).with_balance(one_ether()))
    }

    /// Session backed by a wallet that rejects every transfer.
    pub fn rejecting_transfers() -> Self {
        Self::build(|wallet| {
            LocalWalletFactory::new(wallet)
                .with_balance(one_ether())
                .with_rejected_transfers()
        })
    }

    fn build(factory: impl FnOnce(LocalWallet) -> LocalWalletFactory) -> Self {
        init_logging();

        let wallet = LocalWallet::new(&mut rand::thread_rng());
        let config = AppConfig::default();

        let mut modal = WalletModal::new();
        modal.register(
            "local",
            Arc::new(factory(wallet.clone())),
            ProviderOptions {
                chain_id: config.chain_id,
                app_name: config.app_name.clone(),
                return_email: config.return_email,
            },
        );

        let notifier = Arc::new(RecordingNotifier::new());
        let session =
            WalletSession::new(modal, config, notifier.clone()).expect("valid default config");

        Self {
            session,
            notifier,
            wallet,
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn one_ether() -> U256 {
    U256::exp10(18)
}
