//! Sign-in attestation statements (EIP-4361)
//!
//! Builds the structured "Sign-In with Ethereum" statement, serializes it to
//! its canonical text form for signing, and parses that text back. The
//! canonical text is the only thing a signature ever covers: a statement can
//! only be verified against the exact text that was signed, so the fields are
//! fixed once the statement is built.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use ethers_core::types::Address;
use ethers_core::utils::to_checksum;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

const PREAMBLE_SUFFIX: &str = " wants you to sign in with your Ethereum account:";
const NONCE_LENGTH: usize = 17;

/// A sign-in attestation statement.
///
/// Immutable once constructed; [`prepare_message`](Self::prepare_message)
/// yields the canonical text that gets signed and verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationStatement {
    /// Requesting page host (e.g. `example.com`)
    pub domain: String,
    /// Account the attestation names
    pub address: Address,
    /// Human-readable statement line(s)
    pub statement: String,
    /// Requesting page origin
    pub uri: String,
    /// Message format version, always `1`
    pub version: String,
    /// EIP-155 chain id the session is bound to
    pub chain_id: u64,
    /// Replay-protection nonce (alphanumeric)
    pub nonce: String,
    /// Issuance timestamp
    pub issued_at: DateTime<Utc>,
}

impl AttestationStatement {
    /// Build a statement with a fresh nonce, issued now.
    pub fn new(
        domain: impl Into<String>,
        address: Address,
        statement: impl Into<String>,
        uri: impl Into<String>,
        chain_id: u64,
    ) -> Self {
        Self {
            domain: domain.into(),
            address,
            statement: statement.into(),
            uri: uri.into(),
            version: "1".to_string(),
            chain_id,
            nonce: generate_nonce(),
            issued_at: Utc::now(),
        }
    }

    /// Pin the nonce (fixtures and deterministic reconstruction).
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Pin the issuance timestamp (fixtures and deterministic reconstruction).
    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    /// Serialize to the canonical EIP-4361 text form.
    ///
    /// Identical fields always produce identical text.
    pub fn prepare_message(&self) -> String {
        format!(
            "{domain}{suffix}\n\
             {address}\n\
             \n\
             {statement}\n\
             \n\
             URI: {uri}\n\
             Version: {version}\n\
             Chain ID: {chain_id}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}",
            domain = self.domain,
            suffix = PREAMBLE_SUFFIX,
            address = to_checksum(&self.address, None),
            statement = self.statement,
            uri = self.uri,
            version = self.version,
            chain_id = self.chain_id,
            nonce = self.nonce,
            issued_at = self
                .issued_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Parse a canonical text form back into a statement.
    ///
    /// Verification starts from the signed text alone, so the parse must
    /// recover every field, in particular the address the signature is
    /// checked against.
    pub fn parse(message: &str) -> Result<Self, SessionError> {
        let mut lines = message.lines();

        let preamble = lines
            .next()
            .ok_or_else(|| invalid("empty message"))?;
        let domain = preamble
            .strip_suffix(PREAMBLE_SUFFIX)
            .ok_or_else(|| invalid("missing sign-in preamble"))?;
        if domain.is_empty() {
            return Err(invalid("empty domain"));
        }

        let address_line = lines.next().ok_or_else(|| invalid("missing address"))?;
        let address = Address::from_str(address_line.trim())
            .map_err(|e| invalid(format!("bad address '{}': {}", address_line, e)))?;

        if lines.next() != Some("") {
            return Err(invalid("expected blank line after address"));
        }

        let mut statement_lines = Vec::new();
        loop {
            match lines.next() {
                Some("") => break,
                Some(line) => statement_lines.push(line),
                None => return Err(invalid("unterminated statement block")),
            }
        }
        let statement = statement_lines.join("\n");

        let uri = expect_field(lines.next(), "URI: ")?;
        let version = expect_field(lines.next(), "Version: ")?;
        let chain_id = expect_field(lines.next(), "Chain ID: ")?
            .parse::<u64>()
            .map_err(|e| invalid(format!("bad chain id: {}", e)))?;
        let nonce = expect_field(lines.next(), "Nonce: ")?;
        let issued_at_raw = expect_field(lines.next(), "Issued At: ")?;
        let issued_at = DateTime::parse_from_rfc3339(&issued_at_raw)
            .map_err(|e| invalid(format!("bad issued-at timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Self {
            domain: domain.to_string(),
            address,
            statement,
            uri,
            version,
            chain_id,
            nonce,
            issued_at,
        })
    }
}

fn expect_field(line: Option<&str>, prefix: &str) -> Result<String, SessionError> {
    line.and_then(|l| l.strip_prefix(prefix))
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("missing field '{}'", prefix.trim_end())))
}

fn invalid(detail: impl Into<String>) -> SessionError {
    SessionError::InvalidAttestation(detail.into())
}

/// Generate an alphanumeric replay-protection nonce.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_statement() -> AttestationStatement {
        let address = Address::from_str("0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826").unwrap();
        AttestationStatement::new(
            "example.com",
            address,
            "This is a test statement.",
            "https://example.com",
            80001,
        )
        .with_nonce("a1b2c3d4e5f6g7h8i")
        .with_issued_at(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_canonical_text_layout() {
        let text = fixed_statement().prepare_message();
        let expected = "example.com wants you to sign in with your Ethereum account:\n\
                        0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826\n\
                        \n\
                        This is a test statement.\n\
                        \n\
                        URI: https://example.com\n\
                        Version: 1\n\
                        Chain ID: 80001\n\
                        Nonce: a1b2c3d4e5f6g7h8i\n\
                        Issued At: 2023-01-01T00:00:00.000Z";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_canonical_text_is_deterministic() {
        assert_eq!(
            fixed_statement().prepare_message(),
            fixed_statement().prepare_message()
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let statement = fixed_statement();
        let parsed = AttestationStatement::parse(&statement.prepare_message()).unwrap();
        assert_eq!(parsed, statement);
    }

    #[test]
    fn test_parse_multiline_statement() {
        let statement = AttestationStatement {
            statement: "First line.\nSecond line.".to_string(),
            ..fixed_statement()
        };
        let parsed = AttestationStatement::parse(&statement.prepare_message()).unwrap();
        assert_eq!(parsed.statement, "First line.\nSecond line.");
    }

    #[test]
    fn test_parse_rejects_missing_preamble() {
        assert!(AttestationStatement::parse("hello world").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        let text = fixed_statement()
            .prepare_message()
            .replace("0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826", "0x1234");
        assert!(AttestationStatement::parse(&text).is_err());
    }

    #[test]
    fn test_parse_rejects_truncated_message() {
        let text = fixed_statement().prepare_message();
        let truncated = text.lines().take(6).collect::<Vec<_>>().join("\n");
        assert!(AttestationStatement::parse(&truncated).is_err());
    }

    #[test]
    fn test_nonce_is_alphanumeric() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), 17);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
