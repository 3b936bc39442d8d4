//! Portal login credentials.
//!
//! The portal identifies students by a register number or e-mail style
//! account and checks the password verbatim. Credentials live for a single
//! `POST /api/login` and are forwarded to the portal without being stored.

use std::fmt;

use zeroize::Zeroizing;

/// Why a login body was refused before reaching the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("account must not be empty")]
    EmptyAccount,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Account and password for one portal login attempt.
///
/// The account is trimmed because the portal ignores surrounding whitespace
/// in register numbers. The password is sent exactly as typed; it is wiped
/// from memory on drop and never appears in `Debug` output.
///
/// # Examples
/// ```
/// use portal_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" RA2111003010045 ", "hunter2")
///     .expect("valid credentials");
/// assert_eq!(creds.account(), "RA2111003010045");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    account: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login body fields.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError`] when the trimmed account or the
    /// password is empty.
    pub fn try_from_parts(account: &str, password: &str) -> Result<Self, LoginValidationError> {
        let account = account.trim();
        if account.is_empty() {
            return Err(LoginValidationError::EmptyAccount);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            account: account.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account the portal session is opened for.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Password forwarded to the portal.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}
