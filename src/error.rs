//! Error taxonomy: domain failures with stable codes, raw provider failures, configuration errors.

use std::error::Error as StdError;
use std::time::Duration;

use crate::domain::ValidationError;

/// Stable string codes carried by [`TwilioError`] and the result types.
pub mod codes {
    pub const INVALID_PHONE: &str = "INVALID_PHONE";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const VERIFICATION_FAILED: &str = "VERIFICATION_FAILED";
    pub const TWILIO_API_ERROR: &str = "TWILIO_API_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";

    /// Provider code used when a failure did not come from a Twilio error response.
    pub const UNKNOWN: &str = "UNKNOWN";
    /// Result code for failures outside the [`TwilioError`](super::TwilioError) taxonomy.
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
    /// Provider code attached to every failed verification check.
    pub const VERIFICATION_CHECK_ERROR: &str = "VERIFICATION_CHECK_ERROR";
}

/// Twilio error code for "Too Many Requests".
pub const RATE_LIMIT_PROVIDER_CODE: i64 = 20429;

/// Retry hint used when a rate-limited response has no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Domain failures of the SMS and verification flows.
///
/// Each variant fixes its own stable code, see [`TwilioError::code`].
pub enum TwilioError {
    /// Phone number is not in `+`-prefixed international form.
    #[error("Invalid phone number: {phone}")]
    InvalidPhoneNumber { phone: String },

    #[error("Verification token has expired")]
    TokenExpired,

    #[error("Verification failed: {reason}")]
    VerificationFailed { reason: String },

    /// Twilio reported an error, or an unexpected failure was translated into one.
    ///
    /// `twilio_code` holds the provider's raw code, or one of [`codes::UNKNOWN`] /
    /// [`codes::VERIFICATION_CHECK_ERROR`].
    #[error("Twilio API Error: {message}")]
    Api {
        message: String,
        twilio_code: String,
    },

    /// Twilio throttled the request. `retry_after` is informational, in seconds.
    #[error("Rate limit exceeded: {message}")]
    RateLimit { message: String, retry_after: u64 },

    /// Base failure with an optional code.
    #[error("{message}")]
    Generic {
        message: String,
        code: Option<String>,
    },
}

impl TwilioError {
    pub fn new(message: impl Into<String>, code: Option<String>) -> Self {
        Self::Generic {
            message: message.into(),
            code,
        }
    }

    pub fn api(message: impl Into<String>, twilio_code: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            twilio_code: twilio_code.into(),
        }
    }

    /// Stable code identifying the failure kind.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::InvalidPhoneNumber { .. } => Some(codes::INVALID_PHONE),
            Self::TokenExpired => Some(codes::TOKEN_EXPIRED),
            Self::VerificationFailed { .. } => Some(codes::VERIFICATION_FAILED),
            Self::Api { .. } => Some(codes::TWILIO_API_ERROR),
            Self::RateLimit { .. } => Some(codes::RATE_LIMIT_EXCEEDED),
            Self::Generic { code, .. } => code.as_deref(),
        }
    }

    /// Provider-side code for [`TwilioError::Api`].
    pub fn twilio_code(&self) -> Option<&str> {
        match self {
            Self::Api { twilio_code, .. } => Some(twilio_code),
            _ => None,
        }
    }

    /// Suggested wait before retrying, for [`TwilioError::RateLimit`].
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }
}

impl From<ValidationError> for TwilioError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::MissingPlusPrefix { input } => {
                Self::InvalidPhoneNumber { phone: input }
            }
            other => Self::new(other.to_string(), None),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Failures raised by the Twilio HTTP API itself, before domain translation.
pub enum ProviderError {
    /// Twilio answered with a non-2xx status.
    #[error("HTTP {status} error: {message}")]
    Rest {
        status: u16,
        code: Option<i64>,
        message: String,
        more_info: Option<String>,
        /// Raw `Retry-After` header value, if present.
        retry_after: Option<String>,
    },

    /// HTTP client / transport failure (client construction, DNS, TLS, timeouts, bad endpoint).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// A successful response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

impl ProviderError {
    /// Twilio's numeric error code, for [`ProviderError::Rest`].
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rest { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.code() == Some(RATE_LIMIT_PROVIDER_CODE)
    }
}

impl From<ProviderError> for TwilioError {
    /// Normalize a provider failure into the domain taxonomy.
    ///
    /// - Twilio code `20429` becomes [`TwilioError::RateLimit`] with `Retry-After` in whole
    ///   seconds, or [`DEFAULT_RETRY_AFTER_SECS`] when missing or malformed.
    /// - Other Twilio errors become [`TwilioError::Api`] carrying the Twilio code (the HTTP
    ///   status when the body had none).
    /// - Transport and parse failures become [`TwilioError::Api`] with [`codes::UNKNOWN`].
    fn from(value: ProviderError) -> Self {
        let message = value.to_string();
        match value {
            ProviderError::Rest {
                code: Some(RATE_LIMIT_PROVIDER_CODE),
                retry_after,
                ..
            } => Self::RateLimit {
                message,
                retry_after: parse_retry_after(retry_after.as_deref()),
            },
            ProviderError::Rest { status, code, .. } => Self::Api {
                message,
                twilio_code: code.map_or_else(|| status.to_string(), |code| code.to_string()),
            },
            ProviderError::Transport(_) | ProviderError::Parse(_) => {
                Self::api(message, codes::UNKNOWN)
            }
        }
    }
}

fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[derive(Debug, thiserror::Error)]
/// Configuration problems: programmer or deployment errors, not runtime API failures.
pub enum ConfigError {
    #[error("Service SID is required for verification")]
    MissingServiceSid,

    #[error("environment variable {name} is required")]
    MissingEnv { name: &'static str },

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
/// Errors raised by [`start_verification`](crate::start_verification) and
/// [`check_verification`](crate::check_verification).
pub enum VerificationError {
    #[error(transparent)]
    Twilio(#[from] TwilioError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl VerificationError {
    /// Stable code of the underlying domain error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Twilio(err) => err.code(),
            Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest(code: Option<i64>, retry_after: Option<&str>) -> ProviderError {
        ProviderError::Rest {
            status: 429,
            code,
            message: "Too Many Requests".to_owned(),
            more_info: None,
            retry_after: retry_after.map(str::to_owned),
        }
    }

    #[test]
    fn each_kind_carries_its_code() {
        let err = TwilioError::InvalidPhoneNumber {
            phone: "123".to_owned(),
        };
        assert_eq!(err.code(), Some("INVALID_PHONE"));
        assert_eq!(err.to_string(), "Invalid phone number: 123");

        assert_eq!(TwilioError::TokenExpired.code(), Some("TOKEN_EXPIRED"));
        assert_eq!(
            TwilioError::TokenExpired.to_string(),
            "Verification token has expired"
        );

        let err = TwilioError::VerificationFailed {
            reason: "wrong code".to_owned(),
        };
        assert_eq!(err.code(), Some("VERIFICATION_FAILED"));
        assert_eq!(err.to_string(), "Verification failed: wrong code");

        let err = TwilioError::api("Twilio error", "30001");
        assert_eq!(err.code(), Some("TWILIO_API_ERROR"));
        assert_eq!(err.twilio_code(), Some("30001"));
        assert_eq!(err.to_string(), "Twilio API Error: Twilio error");

        let err = TwilioError::RateLimit {
            message: "slow down".to_owned(),
            retry_after: 30,
        };
        assert_eq!(err.code(), Some("RATE_LIMIT_EXCEEDED"));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(err.to_string(), "Rate limit exceeded: slow down");
    }

    #[test]
    fn generic_error_code_is_nullable() {
        let err = TwilioError::new("base", None);
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "base");

        let err = TwilioError::new("base", Some("CUSTOM".to_owned()));
        assert_eq!(err.code(), Some("CUSTOM"));
    }

    #[test]
    fn rate_limit_reads_retry_after_header() {
        let err: TwilioError = rest(Some(20429), Some("42")).into();
        assert_eq!(err.code(), Some(codes::RATE_LIMIT_EXCEEDED));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(42)));
    }

    #[test]
    fn rate_limit_defaults_retry_after() {
        let err: TwilioError = rest(Some(20429), None).into();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let http_date = Some("Wed, 21 Oct 2026 07:28:00 GMT");
        let err: TwilioError = rest(Some(20429), http_date).into();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn other_provider_codes_become_api_errors() {
        let err: TwilioError = ProviderError::Rest {
            status: 400,
            code: Some(99999),
            message: "Twilio error".to_owned(),
            more_info: None,
            retry_after: None,
        }
        .into();
        assert_eq!(err.code(), Some(codes::TWILIO_API_ERROR));
        assert_eq!(err.twilio_code(), Some("99999"));
        assert!(err.to_string().contains("Twilio error"));
    }

    #[test]
    fn provider_error_without_code_uses_http_status() {
        let err: TwilioError = rest(None, Some("5")).into();
        assert_eq!(err.twilio_code(), Some("429"));
    }

    #[test]
    fn transport_failures_become_unknown_api_errors() {
        let err: TwilioError = ProviderError::Transport("Totally unexpected!".into()).into();
        assert_eq!(err.code(), Some(codes::TWILIO_API_ERROR));
        assert_eq!(err.twilio_code(), Some(codes::UNKNOWN));
        assert!(err.to_string().to_lowercase().contains("unexpected"));
    }

    #[test]
    fn validation_prefix_error_maps_to_invalid_phone() {
        let err: TwilioError = ValidationError::MissingPlusPrefix {
            input: "1987654321".to_owned(),
        }
        .into();
        assert_eq!(
            err,
            TwilioError::InvalidPhoneNumber {
                phone: "1987654321".to_owned()
            }
        );
    }

    #[test]
    fn config_error_mentions_service_sid() {
        let err = VerificationError::from(ConfigError::MissingServiceSid);
        assert!(err.to_string().to_lowercase().contains("service sid"));
        assert_eq!(err.code(), None);
    }
}
