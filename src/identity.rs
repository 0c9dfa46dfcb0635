//! # Instance Identity
//!
//! Naming scheme for tenant instances: a short display token shown to humans
//! in notifications, and the physical schema identifier interpolated into
//! DDL. Schema identifiers cannot be bound as query parameters, so everything
//! that reaches the provisioner must first pass [`validate_schema_identifier`].

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Fixed prefix for every generated schema identifier.
pub const SCHEMA_PREFIX: &str = "instance_";

/// Length of the human-facing display token.
const NAME_TOKEN_LEN: usize = 8;

/// PostgreSQL truncates identifiers beyond 63 bytes; reject instead of
/// silently truncating.
const MAX_IDENTIFIER_LEN: usize = 63;

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A generated instance identity.
///
/// `name` is display-only: it carries no uniqueness guarantee and must never
/// be used as a lookup key. `schema_name` is the physical namespace
/// identifier; uniqueness is enforced by the registry, not by generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdentity {
    pub name: String,
    pub schema_name: String,
}

impl InstanceIdentity {
    /// Generate a fresh identity: random display token plus a
    /// millisecond-timestamped schema identifier.
    pub fn generate() -> Self {
        Self {
            name: generate_name_token(),
            schema_name: format!("{SCHEMA_PREFIX}{}", unix_millis()),
        }
    }
}

fn generate_name_token() -> String {
    let mut rng = rand::thread_rng();
    (0..NAME_TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Validate a schema identifier before it is interpolated into DDL.
///
/// Allow-list check: ASCII lowercase letters, digits and underscores only,
/// starting with a letter or underscore, at most 63 bytes. Anything else is
/// rejected outright - there is no escaping path for namespace names.
pub fn validate_schema_identifier(identifier: &str) -> Result<(), String> {
    if identifier.is_empty() {
        return Err("schema identifier is empty".to_string());
    }
    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "schema identifier exceeds {MAX_IDENTIFIER_LEN} bytes: {identifier}"
        ));
    }
    let mut chars = identifier.chars();
    let first = chars.next().unwrap_or_default();
    if !(first.is_ascii_lowercase() || first == '_') {
        return Err(format!(
            "schema identifier must start with a letter or underscore: {identifier}"
        ));
    }
    if !identifier
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(format!(
            "schema identifier contains characters outside [a-z0-9_]: {identifier}"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_schema_name_is_valid() {
        let identity = InstanceIdentity::generate();
        assert!(identity.schema_name.starts_with(SCHEMA_PREFIX));
        validate_schema_identifier(&identity.schema_name).expect("generated identifier invalid");
    }

    #[test]
    fn test_name_token_shape() {
        let identity = InstanceIdentity::generate();
        assert_eq!(identity.name.len(), 8);
        assert!(identity
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_validator_rejects_injection_attempts() {
        assert!(validate_schema_identifier("x; DROP SCHEMA core CASCADE").is_err());
        assert!(validate_schema_identifier("instance_1;--").is_err());
        assert!(validate_schema_identifier("public\"").is_err());
        assert!(validate_schema_identifier("name with spaces").is_err());
    }

    #[test]
    fn test_validator_rejects_empty_and_oversized() {
        assert!(validate_schema_identifier("").is_err());
        assert!(validate_schema_identifier(&"a".repeat(64)).is_err());
        assert!(validate_schema_identifier(&"a".repeat(63)).is_ok());
    }

    #[test]
    fn test_validator_rejects_leading_digit() {
        assert!(validate_schema_identifier("1instance").is_err());
        assert!(validate_schema_identifier("_instance").is_ok());
        assert!(validate_schema_identifier("instance_1700000000000").is_ok());
    }
}
