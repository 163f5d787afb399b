// src/jwx/jwk_set.rs

use serde_json::{Map, Value};

use crate::error::OidcError;
use crate::jwx::Jwk;

/// Locates the JWK a token header points at.
///
/// Scans `jwks["keys"]` in document order and returns the first record whose
/// `kid` equals the header's `kid`. Key IDs are expected to be unique within
/// a set but that is not enforced; on a collision the earlier record wins.
///
/// Fails with [`OidcError::InvalidFormat`] when the document or header is
/// unusable, and [`OidcError::KeyNotFound`] when no record matches.
pub fn find(jwks: &Value, header: &Map<String, Value>) -> Result<Jwk, OidcError> {
    let doc = jwks
        .as_object()
        .filter(|doc| !doc.is_empty())
        .ok_or_else(|| OidcError::InvalidFormat("jwks is empty".into()))?;
    let keys = doc
        .get("keys")
        .and_then(Value::as_array)
        .ok_or_else(|| OidcError::InvalidFormat("jwks is invalid format".into()))?;

    let key_id = header
        .get("kid")
        .and_then(Value::as_str)
        .filter(|kid| !kid.is_empty())
        .ok_or_else(|| OidcError::InvalidFormat("header.kid is required".into()))?;

    for record in keys {
        if let Some(record) = record.as_object() {
            if record.get("kid").and_then(Value::as_str) == Some(key_id) {
                return Jwk::from_record(record);
            }
        }
    }
    Err(OidcError::KeyNotFound(key_id.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header(kid: &str) -> Map<String, Value> {
        json!({ "alg": "RS256", "kid": kid })
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn empty_document_is_rejected() {
        let err = find(&json!({}), &header("a")).unwrap_err();
        assert!(matches!(err, OidcError::InvalidFormat(_)));
    }

    #[test]
    fn document_without_keys_is_rejected() {
        let err = find(&json!({ "kty": "RSA" }), &header("a")).unwrap_err();
        assert!(matches!(err, OidcError::InvalidFormat(_)));
    }

    #[test]
    fn header_without_kid_is_rejected() {
        let jwks = json!({ "keys": [] });
        for hdr in [Map::new(), header("")] {
            let err = find(&jwks, &hdr).unwrap_err();
            assert!(matches!(err, OidcError::InvalidFormat(_)));
        }
    }

    #[test]
    fn unknown_kid_is_not_found() {
        let jwks = json!({
            "keys": [{ "kid": "a", "kty": "RSA", "e": "AQAB", "n": "AQAB" }]
        });
        match find(&jwks, &header("b")) {
            Err(OidcError::KeyNotFound(kid)) => assert_eq!(kid, "b"),
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn first_match_wins_on_kid_collision() {
        let jwks = json!({
            "keys": [
                { "kid": "a", "kty": "RSA", "e": "AQAB", "n": "AQABAQ" },
                { "kid": "a", "kty": "RSA", "e": "AQAB", "n": "AQABAw" },
            ]
        });
        let jwk = find(&jwks, &header("a")).unwrap();
        // The first record's modulus is 0x01000101.
        use rsa::traits::PublicKeyParts;
        assert_eq!(
            jwk.to_public_key().unwrap().n().to_bytes_be(),
            [0x01, 0x00, 0x01, 0x01]
        );
    }

    #[test]
    fn matching_record_is_validated_as_a_jwk() {
        let jwks = json!({ "keys": [{ "kid": "a", "kty": "RSA", "n": "AQAB" }] });
        let err = find(&jwks, &header("a")).unwrap_err();
        assert!(matches!(err, OidcError::InvalidKey(_)));
    }
}
