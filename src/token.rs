// src/token.rs

use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::base64url;
use crate::error::OidcError;
use crate::jwx::jws::{claim, unix_now};
use crate::jwx::{jwk_set, Jws};
use crate::metadata::ClientMetadata;
use crate::provider::Provider;

/// Default forward clock-skew allowance on `iat`, in seconds.
pub const DEFAULT_ALLOWABLE_IAT_SEC: i64 = 5;

/// The JSON body of a successful token-exchange or refresh response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub scope: String,
    /// Absent when the granted scope did not include `openid`.
    pub id_token: Option<String>,
}

/// The verified output of [`Token::parse_id_token`]: the decoded JWT header
/// and payload, as string-keyed mappings. No further interpretation is done;
/// the caller inspects the claims it cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedIdToken {
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
}

/// One token-exchange result, bound to the provider and client registration
/// it was obtained under, plus the JWKS document fetched alongside it.
///
/// Immutable after construction. The JWKS is handed in by the transport
/// collaborator; this type performs no I/O and applies no caching policy.
#[derive(Debug, Clone)]
pub struct Token {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    scope: String,
    id_token: Option<String>,
    jwks: Value,
    provider: Provider,
    metadata: ClientMetadata,
}

impl Token {
    pub fn new(
        response: TokenResponse,
        jwks: Value,
        provider: Provider,
        metadata: ClientMetadata,
    ) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            scope: response.scope,
            id_token: response.id_token,
            jwks,
            provider,
            metadata,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    /// Verifies and decodes the ID Token with the default `iat` allowance.
    ///
    /// `nonce` must be the value this client generated before the
    /// authorization request, or `None` when none was sent.
    pub fn parse_id_token(&self, nonce: Option<&str>) -> Result<DecodedIdToken, OidcError> {
        self.parse_id_token_with(nonce, DEFAULT_ALLOWABLE_IAT_SEC)
    }

    /// Verifies and decodes the ID Token.
    ///
    /// Runs the full chain: JWKS key lookup by the header's `kid`, RS256
    /// signature verification with time-claim checks, then the OIDC claim
    /// checks in order — issuer, audience, at_hash, nonce, auth_time. The
    /// first failed check is the error surfaced. A well-formed token whose
    /// signature does not match the resolved key is escalated from the JWS
    /// layer's `false` to [`OidcError::InvalidToken`] here.
    #[instrument(skip(self, nonce), err)]
    pub fn parse_id_token_with(
        &self,
        nonce: Option<&str>,
        allowable_iat_sec: i64,
    ) -> Result<DecodedIdToken, OidcError> {
        let id_token = self.id_token.as_deref().ok_or(OidcError::MissingIdToken)?;

        let parts: Vec<&str> = id_token.split('.').collect();
        let parts: [&str; 3] = parts
            .try_into()
            .map_err(|_| OidcError::InvalidFormat("invalid id_token format".into()))?;

        let header_bytes = base64url::decode(parts[0])?;
        let header: Map<String, Value> = serde_json::from_slice(&header_bytes)?;

        let jwk = jwk_set::find(&self.jwks, &header)?;
        debug!(kid = jwk.key_id(), "resolved signing key");
        let public_key = jwk.to_public_key()?;

        let jws = Jws::new(allowable_iat_sec);
        if !jws.verify_split(parts, &public_key)? {
            return Err(OidcError::InvalidToken("failed to verify id_token".into()));
        }

        let payload_bytes = base64url::decode_standard(parts[1])?;
        let payload: Map<String, Value> = serde_json::from_slice(&payload_bytes)?;

        if !self.verify_issuer(&payload) {
            return Err(OidcError::InvalidToken("invalid issuer".into()));
        }
        if !self.verify_audience(&payload) {
            return Err(OidcError::InvalidToken("invalid audience".into()));
        }
        if !self.verify_at_hash(&payload) {
            return Err(OidcError::InvalidToken("invalid at_hash".into()));
        }
        if !self.verify_nonce(&payload, nonce) {
            return Err(OidcError::InvalidToken("invalid nonce".into()));
        }
        if !self.verify_auth_time(&payload) {
            return Err(OidcError::InvalidToken("invalid auth_time".into()));
        }

        Ok(DecodedIdToken { header, payload })
    }

    /// `iss` must be present and equal the provider's issuer.
    fn verify_issuer(&self, payload: &Map<String, Value>) -> bool {
        claim(payload, "iss").and_then(Value::as_str) == Some(self.provider.issuer())
    }

    /// `aud` must be present and equal this client's client_id.
    fn verify_audience(&self, payload: &Map<String, Value>) -> bool {
        claim(payload, "aud").and_then(Value::as_str) == Some(self.metadata.client_id())
    }

    /// `at_hash` must be present and equal the base64url encoding of the
    /// left half (16 bytes) of SHA-256 over the access token. SHA-256 is
    /// fixed because RS256 is the only supported signing algorithm.
    fn verify_at_hash(&self, payload: &Map<String, Value>) -> bool {
        let digest = Sha256::digest(self.access_token.as_bytes());
        let at_hash = base64url::encode(&digest[..16]);
        claim(payload, "at_hash").and_then(Value::as_str) == Some(at_hash.as_str())
    }

    /// Replay protection: a token without a nonce passes; a token with one
    /// must match the nonce the caller sent on the authorization request.
    fn verify_nonce(&self, payload: &Map<String, Value>, nonce: Option<&str>) -> bool {
        match claim(payload, "nonce") {
            None => true,
            Some(Value::String(expected)) => nonce == Some(expected.as_str()),
            Some(_) => false,
        }
    }

    /// `auth_time` freshness: absent passes; present requires
    /// `auth_time + expires_in` to lie strictly after now. This is the exact
    /// formula of the wire behavior this crate reproduces — it extends the
    /// authentication instant by the token lifetime, it is NOT the standard
    /// OIDC `max_age` re-authentication check.
    ///
    /// Overflow in the lifetime extension counts as a failed check; the
    /// claim value is untrusted.
    fn verify_auth_time(&self, payload: &Map<String, Value>) -> bool {
        match claim(payload, "auth_time") {
            None => true,
            Some(auth_time) => auth_time
                .as_i64()
                .and_then(|auth_time| auth_time.checked_add(self.expires_in))
                .is_some_and(|valid_until| valid_until > unix_now()),
        }
    }
}
