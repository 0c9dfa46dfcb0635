//! Properties of the identity generator and the schema-identifier validator.

use orchestrator_core::identity::{
    validate_schema_identifier, InstanceIdentity, SCHEMA_PREFIX,
};
use proptest::prelude::*;

#[test]
fn generated_identities_always_pass_validation() {
    for _ in 0..100 {
        let identity = InstanceIdentity::generate();
        validate_schema_identifier(&identity.schema_name)
            .expect("generator produced an invalid schema identifier");
        assert!(identity.schema_name.starts_with(SCHEMA_PREFIX));
        assert_eq!(identity.name.len(), 8);
    }
}

#[test]
fn display_tokens_are_not_constant() {
    // Not a uniqueness guarantee, but 100 identical draws from a 36^8 space
    // would mean the generator is broken.
    let tokens: std::collections::HashSet<String> =
        (0..100).map(|_| InstanceIdentity::generate().name).collect();
    assert!(tokens.len() > 1);
}

proptest! {
    /// Accepted identifiers contain only the allow-listed charset.
    #[test]
    fn accepted_identifiers_are_safe(identifier in "[a-z_][a-z0-9_]{0,62}") {
        prop_assert!(validate_schema_identifier(&identifier).is_ok());
    }

    /// Any identifier holding a character outside [a-z0-9_] is rejected,
    /// wherever the character sits.
    #[test]
    fn hostile_characters_are_rejected(
        prefix in "[a-z_][a-z0-9_]{0,10}",
        hostile in "[^a-z0-9_]",
        suffix in "[a-z0-9_]{0,10}",
    ) {
        let identifier = format!("{prefix}{hostile}{suffix}");
        prop_assert!(validate_schema_identifier(&identifier).is_err());
    }

    /// Identifiers longer than 63 bytes are rejected regardless of content.
    #[test]
    fn oversized_identifiers_are_rejected(identifier in "[a-z_][a-z0-9_]{63,80}") {
        prop_assert!(validate_schema_identifier(&identifier).is_err());
    }
}
