use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
/// How Twilio Verify delivers the verification code.
pub enum VerificationChannel {
    #[default]
    Sms,
    Call,
    Email,
}

impl VerificationChannel {
    /// Wire value sent as `Channel`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Call => "call",
            Self::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Canceled,
    Failed,
}

impl VerificationStatus {
    /// Map a Twilio Verify status string to a [`VerificationStatus`].
    ///
    /// Matching is exact; any unrecognized value collapses to [`VerificationStatus::Failed`].
    pub fn from_provider(status: &str) -> Self {
        match status {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "canceled" => Self::Canceled,
            "failed" => Self::Failed,
            _ => Self::Failed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outcome of one SMS send attempt.
///
/// Exactly one of `message_sid` or the `error_code`/`error_message` pair is populated,
/// selected by `success`.
pub struct SmsDeliveryResult {
    success: bool,
    to: String,
    message_sid: Option<String>,
    error_code: Option<String>,
    error_message: Option<String>,
}

impl SmsDeliveryResult {
    /// Successful delivery to Twilio. `message_sid` is whatever the provider assigned.
    pub fn delivered(to: impl Into<String>, message_sid: Option<String>) -> Self {
        Self {
            success: true,
            to: to.into(),
            message_sid,
            error_code: None,
            error_message: None,
        }
    }

    /// Failed delivery with the error code and message that caused it.
    pub fn failed(
        to: impl Into<String>,
        error_code: Option<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            to: to.into(),
            message_sid: None,
            error_code,
            error_message: Some(error_message.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn message_sid(&self) -> Option<&str> {
        self.message_sid.as_deref()
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outcome of starting a verification.
///
/// `status` is always populated; failures carry [`VerificationStatus::Failed`].
pub struct VerificationResult {
    success: bool,
    to: String,
    status: VerificationStatus,
    error_code: Option<String>,
    error_message: Option<String>,
}

impl VerificationResult {
    pub fn started(to: impl Into<String>, status: VerificationStatus) -> Self {
        Self {
            success: true,
            to: to.into(),
            status,
            error_code: None,
            error_message: None,
        }
    }

    pub fn failed(
        to: impl Into<String>,
        error_code: Option<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            to: to.into(),
            status: VerificationStatus::Failed,
            error_code,
            error_message: Some(error_message.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Message resource returned by the Twilio Messages API.
///
/// Twilio may report a provider-side failure (`error_code`/`error_message`) on an accepted
/// request; those fields are passed through as-is.
pub struct MessageResponse {
    pub sid: Option<String>,
    pub status: Option<String>,
    pub to: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Verification (or verification check) resource returned by Twilio Verify.
pub struct VerificationResponse {
    pub sid: Option<String>,
    pub status: String,
    pub to: Option<String>,
    pub channel: Option<String>,
    pub valid: Option<bool>,
}
