// src/base64url.rs

//! Unpadded base64url encode/decode, plus the lenient standard-alphabet
//! decoder the JOSE wire format needs in two places (JWK `e`, JWS payload).
//!
//! Decoding is padding-indifferent: compact JWT segments arrive unpadded,
//! while some providers pad their JWK fields.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};

use crate::error::OidcError;

const CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, CONFIG);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, CONFIG);

/// Encodes bytes as unpadded base64url (RFC 4648 §5).
pub fn encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(data)
}

/// Decodes a base64url string, padded or not.
///
/// Any byte outside the URL-safe alphabet fails with
/// [`OidcError::Base64Decode`].
pub fn decode(data: &str) -> Result<Vec<u8>, OidcError> {
    URL_SAFE
        .decode(data)
        .map_err(|e| OidcError::Base64Decode(e.to_string()))
}

/// Decodes a standard-alphabet base64 string, padded or not.
///
/// The JWK `e` field and the JWS payload segment are decoded with the
/// standard alphabet rather than the URL-safe one; that asymmetry is part of
/// the wire behavior this crate reproduces, so do not swap this for
/// [`decode`].
pub fn decode_standard(data: &str) -> Result<Vec<u8>, OidcError> {
    STANDARD
        .decode(data)
        .map_err(|e| OidcError::Base64Decode(e.to_string()))
}
