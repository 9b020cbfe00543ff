use std::sync::Arc;

use ethers_core::types::U256;
use ethers_core::utils::to_checksum;

use siwe_session::config::AppConfig;
use siwe_session::modal::{ProviderOptions, WalletModal};
use siwe_session::notify::LogNotifier;
use siwe_session::provider::local::LocalWalletFactory;
use siwe_session::provider::signature_hex;
use siwe_session::session::WalletSession;

/// Demo walkthrough: connect an in-memory wallet, run every signing action,
/// verify the sign-in attestation, and send the fixed native transfer.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    // One ether of demo balance so the fixed transfer always has funds
    let factory = LocalWalletFactory::random()
        .with_balance(U256::exp10(18));

    let mut modal = WalletModal::new();
    modal.register(
        "local",
        Arc::new(factory),
        ProviderOptions {
            chain_id: config.chain_id,
            app_name: config.app_name.clone(),
            return_email: config.return_email,
        },
    );

    let mut session = WalletSession::new(modal, config, Arc::new(LogNotifier))?;

    session.connect().await?;
    let address = session.address().expect("connected");
    println!("address: {}", to_checksum(&address, None));
    println!("balance: {}", session.balance_display().expect("connected"));
    println!("chain id: {}", session.chain_id().expect("connected"));

    session.sign_personal_message().await?;
    if let Some(signature) = session.personal_signature() {
        println!("personal signature: {}", signature_hex(signature));
    }

    session.sign_attestation().await?;
    if let Some(attestation) = session.attestation() {
        println!("sign-in message:\n{}", attestation.message);
        println!("sign-in signature: {}", signature_hex(&attestation.signature));
    }
    let verified = session.verify_attestation().await?;
    println!("sign-in verified: {}", verified);

    session.sign_typed_data().await?;
    if let Some(signature) = session.typed_data_signature() {
        println!("typed data signature: {}", signature_hex(signature));
    }

    session.send_native_transfer().await?;
    if let Some(hash) = session.transfer_hash() {
        println!("native tx hash: {:?}", hash);
    }

    session.disconnect().await;
    Ok(())
}
