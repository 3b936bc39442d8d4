//! Session token extraction from the `X-CSRF-Token` header.
//!
//! The portal hands out its session token at login; clients replay it on
//! every data request in this header. Handlers take [`CsrfToken`] as an
//! argument and never touch raw headers.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, SessionToken};

/// Header carrying the portal session token.
pub const CSRF_TOKEN_HEADER: &str = "X-CSRF-Token";

/// Validated session token taken from the request headers.
#[derive(Debug, Clone)]
pub struct CsrfToken(SessionToken);

impl CsrfToken {
    /// Borrow the session token.
    pub fn token(&self) -> &SessionToken {
        &self.0
    }

    /// Consume the extractor, yielding the session token.
    pub fn into_inner(self) -> SessionToken {
        self.0
    }
}

fn missing_token() -> Error {
    Error::unauthorized(format!("Missing {CSRF_TOKEN_HEADER} header"))
}

fn extract(req: &HttpRequest) -> Result<CsrfToken, Error> {
    let raw = req
        .headers()
        .get(CSRF_TOKEN_HEADER)
        .ok_or_else(missing_token)?
        .to_str()
        .map_err(|_| Error::unauthorized(format!("{CSRF_TOKEN_HEADER} header must be ASCII")))?;
    SessionToken::new(raw)
        .map(CsrfToken)
        .map_err(|_| missing_token())
}

impl FromRequest for CsrfToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(Some("tok-1"), Some("tok-1"))]
    #[case(Some("  tok-2  "), Some("tok-2"))]
    #[case(Some("   "), None)]
    #[case(None, None)]
    fn extracts_trimmed_tokens(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let mut request = TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((CSRF_TOKEN_HEADER, value));
        }
        let result = extract(&request.to_http_request());
        match expected {
            Some(token) => {
                assert_eq!(result.expect("token present").token().as_ref(), token);
            }
            None => {
                let err = result.expect_err("token rejected");
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), "Missing X-CSRF-Token header");
            }
        }
    }

    #[rstest]
    fn header_lookup_is_case_insensitive() {
        let request = TestRequest::default()
            .insert_header(("x-csrf-token", "tok-3"))
            .to_http_request();
        let token = extract(&request).expect("token present");
        assert_eq!(token.into_inner().as_ref(), "tok-3");
    }
}
