//! Authentication primitives: sign-in credentials, password policy, and
//! registration requests.
//!
//! Inbound adapters build these from raw strings before calling the account
//! service, so the service only ever sees validated input.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, PersonName, Role, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;
/// Upper bound keeps hashing cost predictable.
pub const PASSWORD_MAX: usize = 128;

/// Errors raised while validating credentials or registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email or name failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN`] or longer than [`PASSWORD_MAX`].
    PasswordLength { min: usize, max: usize },
    /// Password lacks one of the required character classes.
    WeakPassword,
    /// Admin accounts cannot self-register.
    AdminRegistration,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordLength { min, max } => {
                write!(f, "password must be between {min} and {max} characters")
            }
            Self::WeakPassword => write!(
                f,
                "password must contain upper-case, lower-case, digit, and special characters"
            ),
            Self::AdminRegistration => write!(f, "admin accounts cannot be self-registered"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Password that satisfies the registration policy.
///
/// The plaintext is zeroised on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a new password against the policy.
    ///
    /// # Examples
    /// ```
    /// use teachteam::domain::Password;
    ///
    /// assert!(Password::new("Str0ng!pass").is_ok());
    /// assert!(Password::new("weakpass").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        if raw.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        let length = raw.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
            return Err(AuthValidationError::PasswordLength {
                min: PASSWORD_MIN,
                max: PASSWORD_MAX,
            });
        }
        let has_upper = raw.chars().any(char::is_uppercase);
        let has_lower = raw.chars().any(char::is_lowercase);
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        let has_special = raw.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace());
        if !(has_upper && has_lower && has_digit && has_special) {
            return Err(AuthValidationError::WeakPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is normalised by [`EmailAddress`].
/// - `password` is non-empty but otherwise untouched, so existing
///   passwords that predate the policy still verify.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Self-service registration for candidates and lecturers.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
    pub role: Role,
}

impl Registration {
    /// Validate registration fields. Admins are rejected.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, AuthValidationError> {
        if role == Role::Admin {
            return Err(AuthValidationError::AdminRegistration);
        }
        Ok(Self {
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
            role,
        })
    }
}
