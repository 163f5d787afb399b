// src/scope.rs

use crate::error::OidcError;

/// Accumulates the `scope` parameter for authorization and token requests.
///
/// Scopes are validated against `[A-Za-z0-9_.-]+`, deduplicated, and joined
/// with single spaces in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ScopeBuilder {
    scopes: Vec<String>,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds scopes, skipping ones already present.
    ///
    /// Fails with [`OidcError::InvalidScope`] on the first scope containing
    /// a character outside the allowed set.
    pub fn add<I, S>(&mut self, scopes: I) -> Result<&mut Self, OidcError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for scope in scopes {
            let scope = scope.as_ref();
            if self.exists(scope) {
                continue;
            }
            if !Self::is_valid(scope) {
                return Err(OidcError::InvalidScope(scope.to_owned()));
            }
            self.scopes.push(scope.to_owned());
        }
        Ok(self)
    }

    pub fn exists(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Joins the accumulated scopes into the wire value.
    pub fn build(&self) -> String {
        self.scopes.join(" ")
    }

    fn is_valid(scope: &str) -> bool {
        !scope.is_empty()
            && scope
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_insertion_order() {
        let mut scopes = ScopeBuilder::new();
        scopes.add(["openid", "profile", "email"]).unwrap();
        assert_eq!(scopes.build(), "openid profile email");
    }

    #[test]
    fn duplicates_are_skipped() {
        let mut scopes = ScopeBuilder::new();
        scopes.add(["openid", "openid", "profile"]).unwrap();
        assert_eq!(scopes.build(), "openid profile");
    }

    #[test]
    fn invalid_characters_are_rejected() {
        let mut scopes = ScopeBuilder::new();
        for bad in ["open id", "scope!", "", "a/b"] {
            assert!(matches!(
                scopes.add([bad]),
                Err(OidcError::InvalidScope(_))
            ));
        }
        // The allowed punctuation is fine.
        scopes.add(["a-b_c.d"]).unwrap();
        assert_eq!(scopes.build(), "a-b_c.d");
    }

    #[test]
    fn empty_builder_reports_empty() {
        assert!(ScopeBuilder::new().is_empty());
        assert_eq!(ScopeBuilder::new().build(), "");
    }
}
