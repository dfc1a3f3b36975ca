use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account identifier (`AC...`).
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    pub const FIELD: &'static str = "account_sid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Twilio auth token paired with an [`AccountSid`] for HTTP basic auth.
///
/// Invariant: must not be empty (whitespace is preserved). `Debug` output is redacted.
pub struct AuthToken(String);

impl AuthToken {
    pub const FIELD: &'static str = "auth_token";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identifier of a Twilio Verify service (`VA...`).
///
/// Invariant: non-empty after trimming.
pub struct ServiceSid(String);

impl ServiceSid {
    pub const FIELD: &'static str = "service_sid";

    /// Create a validated [`ServiceSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in international form.
///
/// Invariant: starts with `+`. The value is kept verbatim; for full parsing, parse with the
/// `phonenumber` crate and convert the result.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a validated [`PhoneNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !value.starts_with('+') {
            return Err(ValidationError::MissingPlusPrefix { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the number as sent to Twilio.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Loose input (spaces, dashes, national formats with a region) is normalized by parsing it
/// with the `phonenumber` crate first:
///
/// ```
/// use twilio_sms::PhoneNumber;
///
/// let parsed = phonenumber::parse(None, "+44 20 7946 0958").unwrap();
/// assert_eq!(PhoneNumber::from(parsed).as_str(), "+442079460958");
/// ```
impl From<phonenumber::PhoneNumber> for PhoneNumber {
    /// Format an already-parsed number as E.164, which always carries the `+` prefix.
    fn from(value: phonenumber::PhoneNumber) -> Self {
        Self(
            phonenumber::format(&value)
                .mode(phonenumber::Mode::E164)
                .to_string(),
        )
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sids_trim_and_reject_blank() {
        assert_eq!(AccountSid::new(" AC123 ").unwrap().as_str(), "AC123");
        assert!(matches!(
            AccountSid::new("  "),
            Err(ValidationError::Empty {
                field: AccountSid::FIELD
            })
        ));
        assert_eq!(ServiceSid::new("VA123").unwrap().as_str(), "VA123");
        assert!(ServiceSid::new("").is_err());
    }

    #[test]
    fn auth_token_keeps_whitespace_and_redacts_debug() {
        let token = AuthToken::new(" secret ").unwrap();
        assert_eq!(token.as_str(), " secret ");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert!(AuthToken::new("").is_err());
    }

    #[test]
    fn phone_number_requires_plus_prefix() {
        assert_eq!(
            PhoneNumber::new("+1234567890").unwrap().as_str(),
            "+1234567890"
        );
        assert!(PhoneNumber::new(" +1234567890").is_err());
        assert_eq!(
            PhoneNumber::new("1234567890"),
            Err(ValidationError::MissingPlusPrefix {
                input: "1234567890".to_owned()
            })
        );
        assert!(matches!(
            PhoneNumber::new(""),
            Err(ValidationError::MissingPlusPrefix { .. })
        ));
    }

    #[test]
    fn phone_number_from_parsed_uses_e164() {
        let parsed = phonenumber::parse(None, "+1 415-555-2671").unwrap();
        let phone: PhoneNumber = parsed.into();
        assert_eq!(phone.as_str(), "+14155552671");
    }

    #[test]
    fn phone_number_from_national_format_gains_plus_prefix() {
        let region = Some(phonenumber::country::Id::US);
        let parsed = phonenumber::parse(region, "(415) 555-2671").unwrap();
        let phone = PhoneNumber::from(parsed);
        assert_eq!(phone.as_str(), "+14155552671");
        assert_eq!(PhoneNumber::new(phone.as_str()), Ok(phone));
    }
}
