// src/error.rs

use thiserror::Error;

/// The primary error type for the `kogane-oidc` library.
///
/// Every fallible operation in the crate surfaces one of these variants; the
/// library never recovers internally. Verification failures are not transient,
/// so there is no retry path here — retries belong to whatever transport layer
/// feeds this crate its HTTP response bodies.
#[derive(Debug, Error)]
pub enum OidcError {
    /// Structural violation: wrong JWT segment count, a missing required
    /// header field, or a malformed JWKS document.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A base64 or base64url decode produced no valid output.
    #[error("base64 decode failed: {0}")]
    Base64Decode(String),

    /// JSON encode/decode failure, whatever the cause.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JWT header's `alg` is not in the supported set (currently RS256).
    #[error("unsupported alg: {0}")]
    UnsupportedAlgorithm(String),

    /// No key in the JWKS matches the `kid` requested by the token header.
    #[error("jwk not found for kid: {0}")]
    KeyNotFound(String),

    /// A JWK record is structurally invalid for its declared key type.
    #[error("invalid jwk: {0}")]
    InvalidKey(String),

    /// The token response carried no `id_token`.
    #[error("empty id_token")]
    MissingIdToken,

    /// The `exp` claim places the token in the past.
    #[error("token is expired")]
    TokenExpired,

    /// The `iat` claim places issuance in the future, beyond the allowed
    /// clock skew.
    #[error("token used before issued")]
    TokenUsedBeforeIssued,

    /// The `nbf` claim places the start of validity in the future.
    #[error("token is not valid yet")]
    TokenNotYetValid,

    /// Signature mismatch or a failed ID Token claim check. The message names
    /// the check that failed; callers must treat every case uniformly as
    /// "do not trust this token".
    #[error("invalid id_token: {0}")]
    InvalidToken(String),

    /// A provider response body (callback params, token response, JWKS) did
    /// not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A required configuration value is missing or empty.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// A scope string contains characters outside `[A-Za-z0-9_.-]`.
    #[error("invalid scope: {0}")]
    InvalidScope(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
