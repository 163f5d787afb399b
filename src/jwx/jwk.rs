// src/jwx/jwk.rs

use rsa::{BigUint, RsaPublicKey};
use serde_json::{Map, Value};

use crate::base64url;
use crate::error::OidcError;

/// Key types this crate can turn into a usable public key.
pub const SUPPORTED_KEY_TYPES: &[&str] = &["RSA"];

/// One validated public signing key record from a JWKS document.
///
/// Construction checks the structural invariants for the declared key type;
/// a `Jwk` that exists is always convertible to an [`RsaPublicKey`] barring
/// corrupt base64 in its fields. The record is never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct Jwk {
    kid: String,
    kty: String,
    /// Public exponent, standard-base64-encoded big-endian bytes.
    e: String,
    /// Modulus, base64url-encoded big-endian bytes.
    n: String,
}

impl Jwk {
    /// Wraps one record out of a JWKS `keys` array.
    ///
    /// Fails with [`OidcError::InvalidKey`] if the record is empty, `kty` is
    /// absent or unsupported, or the RSA fields `e`/`n` are missing.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, OidcError> {
        if record.is_empty() {
            return Err(OidcError::InvalidKey("jwk is empty".into()));
        }
        let kty = match record.get("kty").and_then(Value::as_str) {
            Some(kty) if SUPPORTED_KEY_TYPES.contains(&kty) => kty,
            _ => return Err(OidcError::InvalidKey("unsupported key type".into())),
        };
        // RSA is the only supported type, so the kty dispatch collapses to
        // one field check.
        let e = record.get("e").and_then(Value::as_str);
        let n = record.get("n").and_then(Value::as_str);
        let (e, n) = match (e, n) {
            (Some(e), Some(n)) => (e, n),
            _ => return Err(OidcError::InvalidKey("invalid jwk format".into())),
        };
        Ok(Self {
            kid: record
                .get("kid")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            kty: kty.to_owned(),
            e: e.to_owned(),
            n: n.to_owned(),
        })
    }

    pub fn key_id(&self) -> &str {
        &self.kid
    }

    pub fn key_type(&self) -> &str {
        &self.kty
    }

    /// Converts this record into an RSA public key.
    ///
    /// `e` is decoded with standard base64 and `n` with base64url; both are
    /// interpreted as big-endian unsigned integers. The alphabet split
    /// mirrors how providers actually publish these fields and must stay
    /// as-is.
    pub fn to_public_key(&self) -> Result<RsaPublicKey, OidcError> {
        let e = base64url::decode_standard(&self.e)?;
        if e.is_empty() {
            return Err(OidcError::Base64Decode("jwk 'e' decoded to nothing".into()));
        }
        let n = base64url::decode(&self.n)?;
        if n.is_empty() {
            return Err(OidcError::Base64Decode("jwk 'n' decoded to nothing".into()));
        }
        RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e))
            .map_err(|e| OidcError::InvalidKey(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn empty_record_is_rejected() {
        let err = Jwk::from_record(&Map::new()).unwrap_err();
        assert!(matches!(err, OidcError::InvalidKey(_)));
    }

    #[test]
    fn missing_or_unsupported_kty_is_rejected() {
        for rec in [
            json!({ "kid": "a", "e": "AQAB", "n": "AQAB" }),
            json!({ "kid": "a", "kty": "EC", "e": "AQAB", "n": "AQAB" }),
        ] {
            let err = Jwk::from_record(&record(rec)).unwrap_err();
            assert!(matches!(err, OidcError::InvalidKey(_)));
        }
    }

    #[test]
    fn rsa_record_requires_e_and_n() {
        for rec in [
            json!({ "kid": "a", "kty": "RSA", "n": "AQAB" }),
            json!({ "kid": "a", "kty": "RSA", "e": "AQAB" }),
        ] {
            let err = Jwk::from_record(&record(rec)).unwrap_err();
            assert!(matches!(err, OidcError::InvalidKey(_)));
        }
    }

    #[test]
    fn kid_defaults_to_empty_when_absent() {
        let jwk =
            Jwk::from_record(&record(json!({ "kty": "RSA", "e": "AQAB", "n": "AQAB" }))).unwrap();
        assert_eq!(jwk.key_id(), "");
        assert_eq!(jwk.key_type(), "RSA");
    }

    #[test]
    fn corrupt_base64_in_key_fields_fails_decode() {
        let jwk = Jwk::from_record(&record(
            json!({ "kid": "a", "kty": "RSA", "e": "!!!", "n": "AQAB" }),
        ))
        .unwrap();
        assert!(matches!(
            jwk.to_public_key(),
            Err(OidcError::Base64Decode(_))
        ));
    }
}
