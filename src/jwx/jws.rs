// src/jwx/jws.rs

use rsa::pkcs1v15::Pkcs1v15Sign;
use rsa::RsaPublicKey;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::base64url;
use crate::error::OidcError;

/// Signing algorithms this crate accepts in a JWT header.
///
/// A closed set: adding an algorithm means adding a variant and the match arm
/// that verifies it, checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Rs256,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RS256" => Some(Self::Rs256),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
        }
    }
}

/// Fetches a claim with JSON `null` treated as absent.
pub(crate) fn claim<'a>(payload: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    match payload.get(name) {
        None | Some(Value::Null) => None,
        value => value,
    }
}

/// Stateless JWS verifier for compact JWTs.
///
/// The only configuration is the issued-at clock-skew tolerance, fixed at
/// construction so one instance can be shared across threads freely.
///
/// Signature verification has a deliberate split in its outcome: structural
/// problems, unsupported algorithms, and violated time claims are `Err`,
/// while a well-formed token whose signature simply does not match the key
/// is `Ok(false)`. Callers that need a hard failure escalate the `false`
/// themselves, as [`Token::parse_id_token`](crate::token::Token::parse_id_token)
/// does.
#[derive(Debug, Clone, Copy)]
pub struct Jws {
    allowable_iat_sec: i64,
}

impl Default for Jws {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Jws {
    /// Creates a verifier tolerating `allowable_iat_sec` seconds of forward
    /// clock skew on the `iat` claim.
    pub fn new(allowable_iat_sec: i64) -> Self {
        Self { allowable_iat_sec }
    }

    /// Splits a compact JWT and verifies it against `public_key`.
    ///
    /// Fails with [`OidcError::InvalidFormat`] unless the token has exactly
    /// three `.`-separated segments.
    pub fn verify(&self, token: &str, public_key: &RsaPublicKey) -> Result<bool, OidcError> {
        let parts: Vec<&str> = token.split('.').collect();
        let parts: [&str; 3] = parts
            .try_into()
            .map_err(|_| OidcError::InvalidFormat("invalid token format".into()))?;
        self.verify_split(parts, public_key)
    }

    /// Verifies an already-split compact JWT.
    ///
    /// Checks, in order: header decode, `alg` presence and support, payload
    /// decode, `exp`, `iat`, `nbf` (all against one wall-clock sample, each
    /// optional), then the signature over `parts[0] + "." + parts[1]`.
    pub fn verify_split(
        &self,
        parts: [&str; 3],
        public_key: &RsaPublicKey,
    ) -> Result<bool, OidcError> {
        let header_bytes = base64url::decode(parts[0])?;
        let header: Map<String, Value> = serde_json::from_slice(&header_bytes)?;

        let alg = header
            .get("alg")
            .and_then(Value::as_str)
            .ok_or_else(|| OidcError::InvalidFormat("undefined alg".into()))?;
        let alg = Algorithm::from_name(alg)
            .ok_or_else(|| OidcError::UnsupportedAlgorithm(alg.to_owned()))?;

        // The payload segment is decoded with the standard alphabet; see
        // `base64url::decode_standard`.
        let payload_bytes = base64url::decode_standard(parts[1])?;
        let payload: Map<String, Value> = serde_json::from_slice(&payload_bytes)?;

        // One sample for all three checks so they cannot disagree about
        // "now" within a single verification.
        let now = unix_now();
        if !self.verify_expires_at(&payload, now) {
            return Err(OidcError::TokenExpired);
        }
        if !self.verify_issued_at(&payload, now) {
            return Err(OidcError::TokenUsedBeforeIssued);
        }
        if !self.verify_not_before(&payload, now) {
            return Err(OidcError::TokenNotYetValid);
        }

        let signature = base64url::decode(parts[2])?;
        let message = format!("{}.{}", parts[0], parts[1]);
        debug!(alg = alg.name(), "verifying jws signature");
        match alg {
            Algorithm::Rs256 => Ok(verify_pkcs1(&message, &signature, public_key)),
        }
    }

    /// `exp`: passes when absent; a present claim must be an integer at or
    /// after `now`.
    fn verify_expires_at(&self, payload: &Map<String, Value>, now: i64) -> bool {
        match claim(payload, "exp") {
            None => true,
            Some(exp) => exp.as_i64().is_some_and(|exp| now <= exp),
        }
    }

    /// `iat`: passes when absent; a present claim must be an integer no
    /// further in the future than the configured skew allowance. The claim
    /// value is untrusted, so overflow in the skew adjustment counts as a
    /// failed check rather than panicking.
    fn verify_issued_at(&self, payload: &Map<String, Value>, now: i64) -> bool {
        match claim(payload, "iat") {
            None => true,
            Some(iat) => iat
                .as_i64()
                .and_then(|iat| iat.checked_sub(self.allowable_iat_sec))
                .is_some_and(|earliest| now >= earliest),
        }
    }

    /// `nbf`: passes when absent; a present claim must be an integer at or
    /// before `now`.
    fn verify_not_before(&self, payload: &Map<String, Value>, now: i64) -> bool {
        match claim(payload, "nbf") {
            None => true,
            Some(nbf) => nbf.as_i64().is_some_and(|nbf| now >= nbf),
        }
    }
}

/// RSASSA-PKCS1-v1_5 with SHA-256, the RS256 primitive.
fn verify_pkcs1(message: &str, signature: &[u8], public_key: &RsaPublicKey) -> bool {
    let digest = Sha256::digest(message.as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}

pub(crate) fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(_) => 0,
    }
}
