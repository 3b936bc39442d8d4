//! DTOs for decoding portal JSON responses.
//!
//! Category payloads stay opaque `serde_json::Value`s. The DTOs here only
//! pick out the fields the domain needs a typed view of.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{PortalSession, SessionToken, UserProfile};

/// Registration number lookup over a profile payload.
///
/// Portals disagree on the key. `regNumber` is preferred and `reg` is the
/// fallback; a profile may carry both.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ProfileRegistrationDto {
    #[serde(rename = "regNumber", default)]
    reg_number: Option<Value>,
    #[serde(default)]
    reg: Option<Value>,
}

impl ProfileRegistrationDto {
    /// Best-effort extraction; any other shape yields `None`.
    fn registration_number(payload: &Value) -> Option<String> {
        if !payload.is_object() {
            return None;
        }
        let dto = Self::deserialize(payload).unwrap_or_default();
        dto.reg_number
            .and_then(scalar_text)
            .or_else(|| dto.reg.and_then(scalar_text))
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Wrap a decoded profile payload, attaching the registration number if found.
pub(super) fn into_profile(payload: Value) -> UserProfile {
    match ProfileRegistrationDto::registration_number(&payload) {
        Some(number) => UserProfile::new(payload).with_registration_number(number),
        None => UserProfile::new(payload),
    }
}

/// Successful `POST /login` body.
#[derive(Debug, Deserialize)]
pub(super) struct LoginResponseDto {
    token: String,
    #[serde(flatten)]
    metadata: Map<String, Value>,
}

impl LoginResponseDto {
    pub(super) fn into_domain_session(self) -> Result<PortalSession, String> {
        let token = SessionToken::new(self.token)
            .map_err(|error| format!("login response token invalid: {error}"))?;
        Ok(PortalSession::new(token).with_metadata(self.metadata))
    }
}

/// Error body some portal endpoints return alongside a failure status.
#[derive(Debug, Deserialize)]
pub(super) struct PortalErrorDto {
    #[serde(alias = "message")]
    pub(super) error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({ "regNumber": "RA2111003010045" }), Some("RA2111003010045"))]
    #[case(json!({ "reg": "21CS045", "name": "A" }), Some("21CS045"))]
    #[case(json!({ "reg": 21045 }), Some("21045"))]
    #[case(json!({ "reg": { "nested": true } }), None)]
    #[case(json!({ "name": "A" }), None)]
    #[case(json!(["not", "an", "object"]), None)]
    #[case(json!({ "regNumber": "   " }), None)]
    #[case(json!({ "regNumber": "RA1", "reg": "RA1", "name": "A" }), Some("RA1"))]
    #[case(json!({ "regNumber": "RA1", "reg": "21CS045" }), Some("RA1"))]
    #[case(json!({ "regNumber": null, "reg": "21CS045" }), Some("21CS045"))]
    fn extracts_registration_numbers_best_effort(
        #[case] payload: Value,
        #[case] expected: Option<&str>,
    ) {
        let profile = into_profile(payload.clone());
        assert_eq!(profile.registration_number(), expected);
        assert_eq!(profile.as_value(), &payload);
    }

    #[rstest]
    fn login_response_keeps_extra_fields_as_metadata() {
        let dto: LoginResponseDto = serde_json::from_value(json!({
            "token": "tok-1",
            "cookies": "a=b",
        }))
        .expect("decode");
        let session = dto.into_domain_session().expect("session");
        assert_eq!(session.token().as_ref(), "tok-1");
        assert_eq!(session.metadata().get("cookies"), Some(&json!("a=b")));
    }

    #[rstest]
    fn blank_login_token_is_rejected() {
        let dto: LoginResponseDto =
            serde_json::from_value(json!({ "token": " " })).expect("decode");
        assert!(dto.into_domain_session().is_err());
    }
}
