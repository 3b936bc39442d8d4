//! Session token issued by the portal and the login result that carries it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validation errors returned by [`SessionToken::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenValidationError {
    /// Token was missing or blank once trimmed.
    Empty,
}

impl fmt::Display for SessionTokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session token must not be empty"),
        }
    }
}

impl std::error::Error for SessionTokenValidationError {}

/// Opaque capability returned by a successful login.
///
/// Every portal fetch takes the token by reference; nothing mutates it once
/// constructed.
///
/// # Examples
/// ```
/// use portal_backend::domain::SessionToken;
///
/// let token = SessionToken::new("tok-1").unwrap();
/// assert_eq!(token.as_ref(), "tok-1");
/// assert!(SessionToken::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Validate and wrap a raw token.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionTokenValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionTokenValidationError::Empty);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionTokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

/// Result of a successful portal login.
///
/// Serialised as the token plus whatever metadata the authenticator returned,
/// flattened into one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSession {
    token: SessionToken,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl PortalSession {
    /// Create a session with no metadata.
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            metadata: Map::new(),
        }
    }

    /// Attach authenticator-specific metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        metadata.into_iter().for_each(|(key, value)| {
            if key != "token" {
                self.metadata.insert(key, value);
            }
        });
        self
    }

    /// Token used by every subsequent portal fetch.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Opaque metadata returned by the authenticator.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("")]
    #[case("  \t")]
    fn blank_tokens_are_rejected(#[case] raw: &str) {
        assert_eq!(
            SessionToken::new(raw),
            Err(SessionTokenValidationError::Empty)
        );
    }

    #[rstest]
    fn surrounding_whitespace_is_trimmed() {
        let token = SessionToken::new(" tok-1 ").expect("valid token");
        assert_eq!(token.as_ref(), "tok-1");
    }

    #[rstest]
    fn debug_output_redacts_token() {
        let token = SessionToken::new("secret-token").expect("valid token");
        assert!(!format!("{token:?}").contains("secret-token"));
    }

    #[rstest]
    fn session_serialises_token_with_flattened_metadata() {
        let metadata = json!({ "user": "ab1234", "token": "ignored" })
            .as_object()
            .cloned()
            .expect("object");
        let session = PortalSession::new(SessionToken::new("tok-1").expect("token"))
            .with_metadata(metadata);

        let value = serde_json::to_value(&session).expect("serialise");
        assert_eq!(value, json!({ "token": "tok-1", "user": "ab1234" }));
    }

    #[rstest]
    fn session_deserialises_from_upstream_shape() {
        let session: PortalSession =
            serde_json::from_value(json!({ "token": "tok-9", "expiresIn": 3600 }))
                .expect("deserialise");
        assert_eq!(session.token().as_ref(), "tok-9");
        assert_eq!(session.metadata().get("expiresIn"), Some(&json!(3600)));
    }

    #[rstest]
    fn session_rejects_blank_upstream_token() {
        let result = serde_json::from_value::<PortalSession>(json!({ "token": "" }));
        assert!(result.is_err());
    }
}
