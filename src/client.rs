// src/client.rs

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::OidcError;
use crate::metadata::ClientMetadata;
use crate::provider::Provider;
use crate::request::{AuthenticationRequest, ExchangeRequest, RefreshRequest};
use crate::token::{Token, TokenResponse};

/// The relying-party front door: composes authorization URLs, interprets the
/// provider's callback, and assembles [`Token`]s from token-endpoint
/// response bodies.
///
/// This type performs no I/O. The caller fetches the JWKS and posts the
/// token requests with whatever HTTP stack it likes, then hands the raw
/// bodies back in.
#[derive(Debug, Clone)]
pub struct Client {
    metadata: ClientMetadata,
    provider: Provider,
}

impl Client {
    pub fn new(metadata: ClientMetadata, provider: Provider) -> Self {
        Self { metadata, provider }
    }

    pub fn metadata(&self) -> &ClientMetadata {
        &self.metadata
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Builds the URL the end user is redirected to for authentication.
    #[instrument(skip(self, request), err)]
    pub fn authorization_url(&self, request: &AuthenticationRequest) -> Result<Url, OidcError> {
        let mut url = Url::parse(self.provider.authorization_endpoint())
            .map_err(|e| OidcError::InvalidUrl(e.to_string()))?;
        let params = request.params(&self.metadata)?;
        url.query_pairs_mut().extend_pairs(&params);
        debug!(%url, "built authorization url");
        Ok(url)
    }

    /// Interprets the query parameters of the authorization callback and
    /// returns the authorization code.
    ///
    /// `state` is the value sent on the authorization request, if any; a
    /// `state` parameter on the callback must match it. A provider `error`
    /// parameter, a state mismatch, or a missing `code` all fail with
    /// [`OidcError::InvalidResponse`].
    pub fn handle_callback(
        &self,
        params: &HashMap<String, String>,
        state: Option<&str>,
    ) -> Result<String, OidcError> {
        if params.is_empty() {
            return Err(OidcError::InvalidResponse("empty query strings".into()));
        }
        if let Some(error) = params.get("error") {
            let description = params
                .get("error_description")
                .map(String::as_str)
                .unwrap_or_default();
            return Err(OidcError::InvalidResponse(format!(
                "error: {error}, error_description: {description}"
            )));
        }
        if let Some(echoed) = params.get("state") {
            if state != Some(echoed.as_str()) {
                return Err(OidcError::InvalidResponse("invalid state".into()));
            }
        }
        params
            .get("code")
            .cloned()
            .ok_or_else(|| OidcError::InvalidResponse("code is undefined".into()))
    }

    /// The form body for the code-exchange POST, plus the
    /// `Authorization` header value to send with it.
    pub fn exchange_params(
        &self,
        request: &ExchangeRequest,
    ) -> Result<(Vec<(String, String)>, String), OidcError> {
        Ok((request.params(&self.metadata)?, self.metadata.authorization()))
    }

    /// The form body for the refresh POST.
    pub fn refresh_params(
        &self,
        request: &RefreshRequest,
    ) -> Result<Vec<(String, String)>, OidcError> {
        request.params(&self.metadata)
    }

    /// Decodes a JWKS endpoint body, checking it carries a `keys` array.
    pub fn parse_jwks(&self, body: &str) -> Result<Value, OidcError> {
        let jwks: Value = serde_json::from_str(body)?;
        match jwks.get("keys") {
            Some(Value::Array(_)) => Ok(jwks),
            _ => Err(OidcError::InvalidResponse("invalid jwks".into())),
        }
    }

    /// Decodes a token-exchange or refresh response body and binds it to
    /// this client's provider and registration, ready for
    /// [`Token::parse_id_token`].
    #[instrument(skip_all, err)]
    pub fn parse_token_response(&self, body: &str, jwks: Value) -> Result<Token, OidcError> {
        let response: TokenResponse = serde_json::from_str(body)?;
        debug!(scope = %response.scope, has_id_token = response.id_token.is_some(),
               "parsed token response");
        Ok(Token::new(
            response,
            jwks,
            self.provider.clone(),
            self.metadata.clone(),
        ))
    }
}
