// src/pkce.rs

//! Proof Key for Code Exchange (RFC 7636), S256 method.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::base64url;

/// Unreserved characters permitted in a code verifier (RFC 7636 §4.1).
const VERIFIER_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Generates a random code verifier of 43 to 128 characters.
pub fn generate_code_verifier() -> String {
    let mut rng = rand::rng();
    let length = rng.random_range(43..=128);
    (0..length)
        .map(|_| VERIFIER_CHARSET[rng.random_range(0..VERIFIER_CHARSET.len())] as char)
        .collect()
}

/// Derives the S256 code challenge for a verifier:
/// base64url(SHA-256(verifier)).
pub fn code_challenge(code_verifier: &str) -> String {
    base64url::encode(Sha256::digest(code_verifier.as_bytes()))
}
