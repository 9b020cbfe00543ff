/// Application configuration from environment variables
///
/// Controls the demo chain, the sign-in attestation page context, and the
/// fixed native-transfer parameters. Defaults match the Polygon Mumbai
/// demo setup.
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Chain the session connects to (EIP-155 chain id)
    pub chain_id: u64,
    /// Display name passed to wallet providers
    pub app_name: String,
    /// Whether providers should return the user's email alongside the handle
    pub return_email: bool,
    /// Page host used as the sign-in attestation `domain`
    pub siwe_domain: String,
    /// Page origin used as the sign-in attestation `URI`
    pub siwe_uri: String,
    /// Destination of the demo native transfer (hex address)
    pub transfer_to: String,
    /// Amount of the demo native transfer, in ether
    pub transfer_ether: String,
}

pub const DEFAULT_CHAIN_ID: u64 = 80001;
pub const DEFAULT_TRANSFER_TO: &str = "0x2B6c74b4e8631854051B1A821029005476C3AF06";
pub const DEFAULT_TRANSFER_ETHER: &str = "0.001";

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `CHAIN_ID`: EIP-155 chain id (default 80001, Polygon Mumbai)
    /// - `APP_NAME`: display name handed to providers
    /// - `SIWE_DOMAIN` / `SIWE_URI`: page context for the sign-in statement
    /// - `TRANSFER_TO` / `TRANSFER_ETHER`: demo transfer destination and amount
    pub fn from_env() -> Self {
        let chain_id = match env::var("CHAIN_ID") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    log::warn!(
                        "Invalid CHAIN_ID '{}', defaulting to {}",
                        raw,
                        DEFAULT_CHAIN_ID
                    );
                    DEFAULT_CHAIN_ID
                }
            },
            Err(_) => DEFAULT_CHAIN_ID,
        };
        log::info!("⛓️  Chain id: {}", chain_id);

        let app_name =
            env::var("APP_NAME").unwrap_or_else(|_| "wallet session demo".to_string());

        let return_email = env::var("RETURN_EMAIL")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let siwe_domain =
            env::var("SIWE_DOMAIN").unwrap_or_else(|_| "localhost:3000".to_string());
        let siwe_uri =
            env::var("SIWE_URI").unwrap_or_else(|_| "http://localhost:3000".to_string());
        log::info!("🌍 Sign-in context: domain={}, uri={}", siwe_domain, siwe_uri);

        let transfer_to =
            env::var("TRANSFER_TO").unwrap_or_else(|_| DEFAULT_TRANSFER_TO.to_string());
        let transfer_ether =
            env::var("TRANSFER_ETHER").unwrap_or_else(|_| DEFAULT_TRANSFER_ETHER.to_string());

        Self {
            chain_id,
            app_name,
            return_email,
            siwe_domain,
            siwe_uri,
            transfer_to,
            transfer_ether,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            app_name: "wallet session demo".to_string(),
            return_email: false,
            siwe_domain: "localhost:3000".to_string(),
            siwe_uri: "http://localhost:3000".to_string(),
            transfer_to: DEFAULT_TRANSFER_TO.to_string(),
            transfer_ether: DEFAULT_TRANSFER_ETHER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_mumbai() {
        let config = AppConfig::default();
        assert_eq!(config.chain_id, 80001);
        assert_eq!(config.transfer_ether, "0.001");
        assert!(!config.return_email);
    }

    #[test]
    fn test_default_page_context() {
        let config = AppConfig::default();
        assert_eq!(config.siwe_domain, "localhost:3000");
        assert!(config.siwe_uri.starts_with("http://"));
    }
}
