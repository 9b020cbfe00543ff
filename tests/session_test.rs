mod common;

use common::TestEnvironment;

use ethers_core::types::H256;
use ethers_core::utils::hash_message;
use ethers_signers::Signer;

use siwe_session::error::SessionError;
use siwe_session::payloads::{eip712_demo_payload, PERSONAL_SIGN_MESSAGE};

use ethers_core::types::transaction::eip712::Eip712;

#[tokio::test]
async fn test_connect_reflects_provider_state() {
    let mut env = TestEnvironment::new();
    assert!(!env.session.is_connected());

    env.session.connect().await.unwrap();

    assert!(env.session.is_connected());
    assert_eq!(env.session.address(), Some(env.wallet.address()));
    assert_eq!(env.session.chain_id(), Some(80001));
    assert_eq!(env.session.balance_wei(), Some(common::one_ether()));
    // 1000000000000000000 wei renders unit-converted
    assert_eq!(env.session.balance_display().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let mut env = TestEnvironment::new();

    // No connection yet: must be a silent no-op
    env.session.disconnect().await;
    assert!(!env.session.is_connected());

    env.session.connect().await.unwrap();
    assert!(env.session.has_cached_selection());

    env.session.disconnect().await;
    env.session.disconnect().await;
    assert!(!env.session.is_connected());
    assert!(!env.session.has_cached_selection());
    assert!(env.session.address().is_none());
}

#[tokio::test]
async fn test_reconnect_forces_fresh_selection() {
    let mut env = TestEnvironment::new();
    env.session.connect().await.unwrap();
    assert!(env.session.has_cached_selection());

    env.session.reconnect().await.unwrap();
    assert!(env.session.is_connected());
    assert_eq!(env.session.address(), Some(env.wallet.address()));
}

#[tokio::test]
async fn test_actions_unavailable_without_connection() {
    let mut env = TestEnvironment::new();

    assert!(matches!(
        env.session.sign_personal_message().await,
        Err(SessionError::NotConnected)
    ));
    assert!(matches!(
        env.session.sign_attestation().await,
        Err(SessionError::NotConnected)
    ));
    assert!(matches!(
        env.session.sign_typed_data().await,
        Err(SessionError::NotConnected)
    ));
    assert!(matches!(
        env.session.send_native_transfer().await,
        Err(SessionError::NotConnected)
    ));
    assert!(matches!(
        env.session.verify_attestation().await,
        Err(SessionError::NotConnected)
    ));

    // Nothing was stored by the failed attempts
    assert!(env.session.personal_signature().is_none());
    assert!(env.session.attestation().is_none());
    assert!(env.session.transfer_hash().is_none());
}

#[tokio::test]
async fn test_sign_personal_message_stores_recoverable_signature() {
    let mut env = TestEnvironment::new();
    env.session.connect().await.unwrap();

    env.session.sign_personal_message().await.unwrap();
    let signature = env.session.personal_signature().expect("stored signature");
    let recovered = signature
        .recover(hash_message(PERSONAL_SIGN_MESSAGE))
        .unwrap();
    assert_eq!(recovered, env.wallet.address());
}

#[tokio::test]
async fn test_sign_typed_data_stores_recoverable_signature() {
    let mut env = TestEnvironment::new();
    env.session.connect().await.unwrap();

    env.session.sign_typed_data().await.unwrap();
    let signature = env.session.typed_data_signature().expect("stored signature");

    let digest = eip712_demo_payload().encode_eip712().unwrap();
    let recovered = signature.recover(H256::from(digest)).unwrap();
    assert_eq!(recovered, env.wallet.address());
}

#[tokio::test]
async fn test_transfer_success_stores_hash() {
    let mut env = TestEnvironment::new();
    env.session.connect().await.unwrap();

    env.session.send_native_transfer().await.unwrap();

    assert!(env.session.transfer_hash().is_some());
    assert!(!env.session.transfer_pending());
    assert!(env.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_rejected_transfer_notifies_and_resets_pending() {
    let mut env = TestEnvironment::rejecting_transfers();
    env.session.connect().await.unwrap();

    // The action itself does not propagate the provider failure
    env.session.send_native_transfer().await.unwrap();

    assert!(!env.session.transfer_pending());
    // Prior stored hash (none) is untouched
    assert!(env.session.transfer_hash().is_none());
    let errors = env.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("transfer failed"));
}

#[tokio::test]
async fn test_repeated_action_overwrites_only_its_own_slot() {
    let mut env = TestEnvironment::new();
    env.session.connect().await.unwrap();

    env.session.send_native_transfer().await.unwrap();
    let first_hash = env.session.transfer_hash().unwrap();
    env.session.sign_personal_message().await.unwrap();

    env.session.send_native_transfer().await.unwrap();
    let second_hash = env.session.transfer_hash().unwrap();

    assert_ne!(first_hash, second_hash);
    assert!(env.session.personal_signature().is_some());
}
