//! Wei / ether display conversion
//!
//! Thin wrappers over `ethers_core::utils` that trim the fixed-point output
//! for display (`1000000000000000000` wei renders as `1`, not
//! `1.000000000000000000`).

use ethers_core::types::U256;
use ethers_core::utils::{format_ether, parse_ether};

use crate::error::SessionError;

/// Format a wei amount as a trimmed ether decimal string.
pub fn format_wei(wei: U256) -> String {
    let raw = format_ether(wei);
    match raw.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, frac)
            }
        }
        None => raw,
    }
}

/// Parse an ether decimal string (e.g. `"0.001"`) into wei.
pub fn parse_ether_amount(ether: &str) -> Result<U256, SessionError> {
    parse_ether(ether)
        .map_err(|e| SessionError::InvalidInput(format!("invalid ether amount '{}': {}", ether, e)))
}
