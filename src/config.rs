//! Validated account configuration.

use crate::domain::{AccountSid, AuthToken, PhoneNumber, ServiceSid, ValidationError};
use crate::error::ConfigError;

pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const ENV_FROM_NUMBER: &str = "TWILIO_FROM_NUMBER";
pub const ENV_SERVICE_SID: &str = "TWILIO_SERVICE_SID";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Twilio account credentials and default sender identity.
///
/// Immutable once built. Invalid input fails at construction, never at use time.
pub struct TwilioConfig {
    account_sid: AccountSid,
    auth_token: AuthToken,
    from_number: PhoneNumber,
    service_sid: Option<ServiceSid>,
}

impl TwilioConfig {
    /// Create a configuration without a Verify service.
    ///
    /// Fails if `account_sid` or `auth_token` is empty, or `from_number` does not start
    /// with `+`.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
            from_number: PhoneNumber::new(from_number)?,
            service_sid: None,
        })
    }

    /// Attach the Verify service used by the verification flow.
    pub fn with_service_sid(self, service_sid: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            service_sid: Some(ServiceSid::new(service_sid)?),
            ..self
        })
    }

    /// Load configuration from `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`,
    /// `TWILIO_FROM_NUMBER` and the optional `TWILIO_SERVICE_SID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnv { name });

        let config = Self::new(
            required(ENV_ACCOUNT_SID)?,
            required(ENV_AUTH_TOKEN)?,
            required(ENV_FROM_NUMBER)?,
        )?;

        match lookup(ENV_SERVICE_SID).filter(|value| !value.trim().is_empty()) {
            Some(service_sid) => Ok(config.with_service_sid(service_sid)?),
            None => Ok(config),
        }
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    /// Default originating number for outgoing messages.
    pub fn from_number(&self) -> &PhoneNumber {
        &self.from_number
    }

    pub fn service_sid(&self) -> Option<&ServiceSid> {
        self.service_sid.as_ref()
    }
}
