//! Field validation predicates for the login, register and forgot forms.
//!
//! DESIGN
//! ======
//! Each rule is a small named predicate so the same checks run in the
//! browser (live feedback, submit guard) and on the server (submission
//! targets). `live_status` layers the "empty input stays neutral" policy on
//! top; the `check_*` functions apply the fixed submit order and stop at the
//! first failing field.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::{ForgotForm, LoginForm, RegisterForm};

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const USERNAME_REQUIRED: &str = "Vui lòng nhập tên đăng nhập!";
pub const EMAIL_INVALID: &str = "Email không hợp lệ!";
pub const PHONE_INVALID: &str = "Số điện thoại không hợp lệ!";
pub const PASSWORD_TOO_SHORT: &str = "Mật khẩu phải có ít nhất 6 ký tự!";
pub const PASSWORD_REQUIRED: &str = "Vui lòng nhập mật khẩu!";
pub const CONFIRM_MISMATCH: &str = "Mật khẩu xác nhận không khớp!";

// `\w` is spelled out as ASCII so the pattern behaves like the browser's.
static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").ok());

static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(0|\+84)[0-9]{9,10}$").ok());

// =============================================================================
// FIELDS
// =============================================================================

/// An input the forms know how to validate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Submit-time evaluation order for the register form.
    pub const REGISTER_ORDER: [Self; 5] = [Self::Username, Self::Email, Self::Phone, Self::Password, Self::ConfirmPassword];

    /// The `name` attribute the field carries in the rendered form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "password" => Some(Self::Password),
            "confirm_password" => Some(Self::ConfirmPassword),
            _ => None,
        }
    }

    /// Message shown when the field fails its rule.
    #[must_use]
    pub fn invalid_message(self) -> &'static str {
        match self {
            Self::Username => USERNAME_REQUIRED,
            Self::Email => EMAIL_INVALID,
            Self::Phone => PHONE_INVALID,
            Self::Password => PASSWORD_TOO_SHORT,
            Self::ConfirmPassword => CONFIRM_MISMATCH,
        }
    }

    /// Whether the input is rendered with `type="password"`.
    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

#[must_use]
pub fn is_valid_username(value: &str) -> bool {
    !value.trim().is_empty()
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Vietnamese numbers: `0` or `+84` followed by 9 or 10 digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.as_ref().is_some_and(|re| re.is_match(value))
}

#[must_use]
pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_CHARS
}

#[must_use]
pub fn is_confirm_matching(password: &str, confirm: &str) -> bool {
    !password.is_empty() && !confirm.is_empty() && password == confirm
}

// =============================================================================
// LIVE FEEDBACK
// =============================================================================

/// Per-field indicator state while the user is typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldStatus {
    /// Empty or not yet evaluated.
    Neutral,
    Valid,
    Invalid(&'static str),
}

impl FieldStatus {
    /// Border color applied to the input. An empty string restores the
    /// stylesheet default.
    #[must_use]
    pub fn border_color(self) -> &'static str {
        match self {
            Self::Neutral => "white",
            Self::Valid => "",
            Self::Invalid(_) => "red",
        }
    }

    /// Custom validity message; non-empty blocks native form submission.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Invalid(message) => message,
            Self::Neutral | Self::Valid => "",
        }
    }

    #[must_use]
    pub fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Evaluate one field as the user types. `password` is the current value of
/// the password field, consulted only for the confirmation field.
#[must_use]
pub fn live_status(field: Field, value: &str, password: &str) -> FieldStatus {
    let ok = match field {
        Field::Username => {
            if value.trim().is_empty() {
                return FieldStatus::Neutral;
            }
            true
        }
        Field::Email | Field::Phone | Field::Password if value.is_empty() => return FieldStatus::Neutral,
        Field::Email => is_valid_email(value),
        Field::Phone => is_valid_phone(value),
        Field::Password => is_valid_password(value),
        Field::ConfirmPassword => {
            if value.is_empty() || password.is_empty() {
                return FieldStatus::Neutral;
            }
            is_confirm_matching(password, value)
        }
    };

    if ok { FieldStatus::Valid } else { FieldStatus::Invalid(field.invalid_message()) }
}

// =============================================================================
// SUBMIT CHECKS
// =============================================================================

/// First failing field of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    #[must_use]
    pub fn new(field: Field) -> Self {
        Self { field, message: field.invalid_message() }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FieldError {}

/// Validate a registration in `Field::REGISTER_ORDER`, stopping at the first
/// failure. Later fields are not evaluated.
///
/// # Errors
///
/// Returns the first field that fails its rule.
pub fn check_register(form: &RegisterForm) -> Result<(), FieldError> {
    for field in Field::REGISTER_ORDER {
        let ok = match field {
            Field::Username => is_valid_username(&form.username),
            Field::Email => is_valid_email(&form.email),
            Field::Phone => is_valid_phone(&form.phone),
            Field::Password => is_valid_password(&form.password),
            Field::ConfirmPassword => form.password == form.confirm_password,
        };
        if !ok {
            return Err(FieldError::new(field));
        }
    }
    Ok(())
}

/// Both login inputs are required.
///
/// # Errors
///
/// Returns the first empty field.
pub fn check_login(form: &LoginForm) -> Result<(), FieldError> {
    if !is_valid_username(&form.username) {
        return Err(FieldError::new(Field::Username));
    }
    if form.password.is_empty() {
        return Err(FieldError { field: Field::Password, message: PASSWORD_REQUIRED });
    }
    Ok(())
}

/// # Errors
///
/// Returns an email error when the address does not match the pattern.
pub fn check_forgot(form: &ForgotForm) -> Result<(), FieldError> {
    if is_valid_email(&form.email) { Ok(()) } else { Err(FieldError::new(Field::Email)) }
}
