//! Fixed demo payloads
//!
//! The demo actions sign and send hard-coded payloads. They are configuration,
//! not business logic: everything here can be swapped for fixtures without
//! touching the session action code.

use std::str::FromStr;

use ethers_core::types::transaction::eip712::TypedData;
use ethers_core::types::{Address, U256};
use serde_json::json;

use crate::config::AppConfig;
use crate::error::SessionError;
use crate::units::parse_ether_amount;

/// Message signed by the plain personal-sign action.
pub const PERSONAL_SIGN_MESSAGE: &str = "Welcome to the wallet session demo!";

/// Human-readable statement embedded in the sign-in attestation.
pub const ATTESTATION_STATEMENT: &str = "This is a test statement.";

/// Demo payload set used by the session actions.
#[derive(Clone, Debug)]
pub struct DemoPayloads {
    /// Plain message for the personal-sign action
    pub personal_message: String,
    /// Statement line for the sign-in attestation
    pub attestation_statement: String,
    /// Fixed EIP-712 payload for the typed-data action
    pub typed_data: TypedData,
    /// Destination of the native transfer
    pub transfer_to: Address,
    /// Transfer amount in wei
    pub transfer_value: U256,
}

impl DemoPayloads {
    pub fn from_config(config: &AppConfig) -> Result<Self, SessionError> {
        let transfer_to = Address::from_str(&config.transfer_to).map_err(|e| {
            SessionError::InvalidInput(format!(
                "invalid transfer destination '{}': {}",
                config.transfer_to, e
            ))
        })?;
        let transfer_value = parse_ether_amount(&config.transfer_ether)?;

        Ok(Self {
            personal_message: PERSONAL_SIGN_MESSAGE.to_string(),
            attestation_statement: ATTESTATION_STATEMENT.to_string(),
            typed_data: eip712_demo_payload(),
            transfer_to,
            transfer_value,
        })
    }
}

/// The fixed EIP-712 demo payload: a `Mail` from Cow to Bob under the
/// "Ether Mail" domain (the canonical EIP-712 example data).
pub fn eip712_demo_payload() -> TypedData {
    let payload = json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" }
            ],
            "Person": [
                { "name": "name", "type": "string" },
                { "name": "wallet", "type": "address" }
            ],
            "Mail": [
                { "name": "from", "type": "Person" },
                { "name": "to", "type": "Person" },
                { "name": "contents", "type": "string" }
            ]
        },
        "primaryType": "Mail",
        "domain": {
            "name": "Ether Mail",
            "version": "1",
            "chainId": 1,
            "verifyingContract": "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
        },
        "message": {
            "from": {
                "name": "Cow",
                "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"
            },
            "to": {
                "name": "Bob",
                "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"
            },
            "contents": "Hello, Bob!"
        }
    });

    // Static literal, shape is fixed at compile time
    serde_json::from_value(payload).expect("EIP-712 demo payload is well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::transaction::eip712::Eip712;

    #[test]
    fn test_demo_typed_data_shape() {
        let payload = eip712_demo_payload();
        assert_eq!(payload.primary_type, "Mail");
        assert_eq!(payload.domain.name.as_deref(), Some("Ether Mail"));
        assert!(payload.types.contains_key("Person"));
    }

    #[test]
    fn test_demo_typed_data_hashes() {
        // The payload must be encodable, otherwise signing would fail at runtime
        let payload = eip712_demo_payload();
        payload.encode_eip712().expect("payload encodes");
    }

    #[test]
    fn test_payloads_from_default_config() {
        let payloads = DemoPayloads::from_config(&AppConfig::default()).unwrap();
        assert_eq!(payloads.transfer_value, U256::from(1_000_000_000_000_000u64));
        assert_eq!(
            format!("{:?}", payloads.transfer_to),
            "0x2b6c74b4e8631854051b1a821029005476c3af06"
        );
    }

    #[test]
    fn test_payloads_reject_bad_destination() {
        let config = AppConfig {
            transfer_to: "0xnotanaddress".to_string(),
            ..Default::default()
        };
        assert!(DemoPayloads::from_config(&config).is_err());
    }
}
