// src/metadata.rs

use serde::Deserialize;

use crate::error::OidcError;

/// Scheme names used in `Authorization` headers built by this crate.
pub mod token_type {
    pub const BASIC: &str = "Basic";
}

/// The relying party's registration with the provider: client_id,
/// client_secret and the redirect_uri the authorization response comes back
/// on. The client_id doubles as the expected `aud` claim during ID Token
/// verification.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMetadata {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl ClientMetadata {
    /// All three registration values are required and non-empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, OidcError> {
        let metadata = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        };
        for (name, value) in [
            ("client_id", &metadata.client_id),
            ("client_secret", &metadata.client_secret),
            ("redirect_uri", &metadata.redirect_uri),
        ] {
            if value.is_empty() {
                return Err(OidcError::MissingConfiguration(name.into()));
            }
        }
        Ok(metadata)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// The `Authorization` header value for token-endpoint requests: the
    /// `Basic` scheme followed by the raw client secret. This is the exact
    /// value the provider this crate was written against expects; it is not
    /// RFC 7617 user:pass base64.
    pub fn authorization(&self) -> String {
        format!("{} {}", token_type::BASIC, self.client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_required() {
        assert!(ClientMetadata::new("", "s", "r").is_err());
        assert!(ClientMetadata::new("c", "", "r").is_err());
        assert!(ClientMetadata::new("c", "s", "").is_err());
    }

    #[test]
    fn authorization_header_value() {
        let metadata = ClientMetadata::new("abc", "secret", "http://localhost").unwrap();
        assert_eq!(metadata.authorization(), "Basic secret");
    }
}
