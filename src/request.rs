// src/request.rs

//! Parameter builders for the three authorization-code-flow requests. Each
//! builder validates its own invariants and renders the ordered wire pairs;
//! sending them is the transport collaborator's job.

use crate::error::OidcError;
use crate::metadata::ClientMetadata;
use crate::scope::ScopeBuilder;

/// Authorization response types this crate can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    #[default]
    Code,
}

impl ResponseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
        }
    }
}

/// Token-endpoint grant types this crate can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }
}

/// Builds the query parameters for the authorization request.
///
/// `state`, `nonce`, `code_challenge` and `max_age` are optional and only
/// emitted when set; at least one scope is required.
#[derive(Debug, Clone, Default)]
pub struct AuthenticationRequest {
    response_type: ResponseType,
    scopes: ScopeBuilder,
    state: Option<String>,
    nonce: Option<String>,
    code_challenge: Option<String>,
    max_age: Option<u64>,
}

impl AuthenticationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scopes<I, S>(mut self, scopes: I) -> Result<Self, OidcError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scopes.add(scopes)?;
        Ok(self)
    }

    /// CSRF protection: a random value echoed back on the callback.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Replay protection: a random value echoed in the ID Token.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// The S256 challenge derived from a PKCE code verifier.
    pub fn code_challenge(mut self, code_challenge: impl Into<String>) -> Self {
        self.code_challenge = Some(code_challenge.into());
        self
    }

    pub fn max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub fn scope(&self) -> String {
        self.scopes.build()
    }

    /// Renders the wire parameters for `metadata`'s registration.
    pub fn params(&self, metadata: &ClientMetadata) -> Result<Vec<(String, String)>, OidcError> {
        if self.scopes.is_empty() {
            return Err(OidcError::MissingConfiguration("scope".into()));
        }
        let mut params = vec![
            ("redirect_uri".into(), metadata.redirect_uri().into()),
            ("response_type".into(), self.response_type.as_str().into()),
            ("scope".into(), self.scopes.build()),
            ("client_id".into(), metadata.client_id().into()),
        ];
        if let Some(state) = &self.state {
            params.push(("state".into(), state.clone()));
        }
        if let Some(max_age) = self.max_age {
            params.push(("max_age".into(), max_age.to_string()));
        }
        if let Some(nonce) = &self.nonce {
            params.push(("nonce".into(), nonce.clone()));
        }
        if let Some(code_challenge) = &self.code_challenge {
            params.push(("code_challenge".into(), code_challenge.clone()));
        }
        Ok(params)
    }
}

/// Builds the form body for exchanging an authorization code for tokens.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    code: String,
    scopes: ScopeBuilder,
    code_verifier: Option<String>,
}

impl ExchangeRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            scopes: ScopeBuilder::new(),
            code_verifier: None,
        }
    }

    pub fn add_scopes<I, S>(mut self, scopes: I) -> Result<Self, OidcError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scopes.add(scopes)?;
        Ok(self)
    }

    /// The verifier whose S256 challenge went on the authorization request.
    pub fn code_verifier(mut self, code_verifier: impl Into<String>) -> Self {
        self.code_verifier = Some(code_verifier.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn grant_type(&self) -> GrantType {
        GrantType::AuthorizationCode
    }

    pub fn params(&self, metadata: &ClientMetadata) -> Result<Vec<(String, String)>, OidcError> {
        if self.code.is_empty() {
            return Err(OidcError::MissingConfiguration("code".into()));
        }
        if self.scopes.is_empty() {
            return Err(OidcError::MissingConfiguration("scope".into()));
        }
        let mut params = vec![
            ("code".into(), self.code.clone()),
            ("client_id".into(), metadata.client_id().into()),
            ("redirect_uri".into(), metadata.redirect_uri().into()),
            ("grant_type".into(), self.grant_type().as_str().into()),
            ("scope".into(), self.scopes.build()),
        ];
        if let Some(code_verifier) = &self.code_verifier {
            params.push(("code_verifier".into(), code_verifier.clone()));
        }
        Ok(params)
    }
}

/// Builds the form body for refreshing an access token.
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    refresh_token: String,
    scopes: ScopeBuilder,
    nonce: Option<String>,
}

impl RefreshRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            scopes: ScopeBuilder::new(),
            nonce: None,
        }
    }

    pub fn add_scopes<I, S>(mut self, scopes: I) -> Result<Self, OidcError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scopes.add(scopes)?;
        Ok(self)
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn params(&self, metadata: &ClientMetadata) -> Result<Vec<(String, String)>, OidcError> {
        if self.refresh_token.is_empty() {
            return Err(OidcError::MissingConfiguration("refresh_token".into()));
        }
        if self.scopes.is_empty() {
            return Err(OidcError::MissingConfiguration("scope".into()));
        }
        let mut params = vec![
            ("client_id".into(), metadata.client_id().into()),
            ("client_secret".into(), metadata.client_secret().into()),
            (
                "grant_type".into(),
                GrantType::RefreshToken.as_str().into(),
            ),
            ("refresh_token".into(), self.refresh_token.clone()),
            ("scope".into(), self.scopes.build()),
        ];
        if let Some(nonce) = &self.nonce {
            params.push(("nonce".into(), nonce.clone()));
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ClientMetadata {
        ClientMetadata::new("abc", "secret", "http://localhost/callback").unwrap()
    }

    #[test]
    fn authentication_request_requires_a_scope() {
        let err = AuthenticationRequest::new().params(&metadata()).unwrap_err();
        assert!(matches!(err, OidcError::MissingConfiguration(_)));
    }

    #[test]
    fn authentication_request_emits_optional_params_only_when_set() {
        let request = AuthenticationRequest::new()
            .add_scopes(["openid"])
            .unwrap();
        let params = request.params(&metadata()).unwrap();
        assert_eq!(
            params,
            vec![
                ("redirect_uri".into(), "http://localhost/callback".into()),
                ("response_type".into(), "code".into()),
                ("scope".into(), "openid".into()),
                ("client_id".into(), "abc".into()),
            ]
        );

        let request = request
            .state("st")
            .nonce("non")
            .code_challenge("chal")
            .max_age(3600);
        let params = request.params(&metadata()).unwrap();
        assert!(params.contains(&("state".into(), "st".into())));
        assert!(params.contains(&("max_age".into(), "3600".into())));
        assert!(params.contains(&("nonce".into(), "non".into())));
        assert!(params.contains(&("code_challenge".into(), "chal".into())));
    }

    #[test]
    fn exchange_request_requires_code_and_scope() {
        let err = ExchangeRequest::new("")
            .add_scopes(["openid"])
            .unwrap()
            .params(&metadata())
            .unwrap_err();
        assert!(matches!(err, OidcError::MissingConfiguration(_)));

        let err = ExchangeRequest::new("authz").params(&metadata()).unwrap_err();
        assert!(matches!(err, OidcError::MissingConfiguration(_)));
    }

    #[test]
    fn exchange_request_includes_verifier_when_set() {
        let params = ExchangeRequest::new("authz")
            .add_scopes(["openid"])
            .unwrap()
            .code_verifier("ver")
            .params(&metadata())
            .unwrap();
        assert!(params.contains(&("grant_type".into(), "authorization_code".into())));
        assert!(params.contains(&("code_verifier".into(), "ver".into())));
    }

    #[test]
    fn refresh_request_params() {
        let params = RefreshRequest::new("rt")
            .add_scopes(["openid"])
            .unwrap()
            .nonce("n")
            .params(&metadata())
            .unwrap();
        assert!(params.contains(&("grant_type".into(), "refresh_token".into())));
        assert!(params.contains(&("client_secret".into(), "secret".into())));
        assert!(params.contains(&("refresh_token".into(), "rt".into())));
        assert!(params.contains(&("nonce".into(), "n".into())));
    }
}
