// src/provider.rs

use serde::Deserialize;

use crate::error::OidcError;

/// Static endpoint metadata for one identity provider.
///
/// Consumed, never mutated, by the request builders and the ID Token
/// verification path (which checks `iss` against [`Provider::issuer`]).
#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    issuer: String,
    authorization_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
    jwks_endpoint: String,
}

impl Provider {
    /// Builds provider metadata; every attribute is required and non-empty.
    pub fn new(
        issuer: impl Into<String>,
        authorization_endpoint: impl Into<String>,
        token_endpoint: impl Into<String>,
        userinfo_endpoint: impl Into<String>,
        jwks_endpoint: impl Into<String>,
    ) -> Result<Self, OidcError> {
        let provider = Self {
            issuer: issuer.into(),
            authorization_endpoint: authorization_endpoint.into(),
            token_endpoint: token_endpoint.into(),
            userinfo_endpoint: userinfo_endpoint.into(),
            jwks_endpoint: jwks_endpoint.into(),
        };
        provider.validate()?;
        Ok(provider)
    }

    /// Re-validates the required attributes, for instances produced by
    /// deserialization rather than [`Provider::new`].
    pub fn validate(&self) -> Result<(), OidcError> {
        for (name, value) in [
            ("issuer", &self.issuer),
            ("authorization_endpoint", &self.authorization_endpoint),
            ("token_endpoint", &self.token_endpoint),
            ("userinfo_endpoint", &self.userinfo_endpoint),
            ("jwks_endpoint", &self.jwks_endpoint),
        ] {
            if value.is_empty() {
                return Err(OidcError::MissingConfiguration(name.into()));
            }
        }
        Ok(())
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_endpoint
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    pub fn userinfo_endpoint(&self) -> &str {
        &self.userinfo_endpoint
    }

    pub fn jwks_endpoint(&self) -> &str {
        &self.jwks_endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_attributes_required() {
        let err = Provider::new("", "a", "t", "u", "j").unwrap_err();
        match err {
            OidcError::MissingConfiguration(name) => assert_eq!(name, "issuer"),
            other => panic!("expected MissingConfiguration, got {other:?}"),
        }
        assert!(Provider::new("i", "a", "t", "u", "").is_err());
    }

    #[test]
    fn getters_round_trip() {
        let provider = Provider::new(
            "http://localhost/issuer",
            "http://localhost/authorization",
            "http://localhost/token",
            "http://localhost/userinfo",
            "http://localhost/jwks",
        )
        .unwrap();
        assert_eq!(provider.issuer(), "http://localhost/issuer");
        assert_eq!(provider.jwks_endpoint(), "http://localhost/jwks");
    }

    #[test]
    fn deserialized_metadata_can_be_validated() {
        let provider: Provider = serde_json::from_value(serde_json::json!({
            "issuer": "http://localhost/issuer",
            "authorization_endpoint": "http://localhost/authorization",
            "token_endpoint": "http://localhost/token",
            "userinfo_endpoint": "",
            "jwks_endpoint": "http://localhost/jwks",
        }))
        .unwrap();
        assert!(matches!(
            provider.validate(),
            Err(OidcError::MissingConfiguration(_))
        ));
    }
}
