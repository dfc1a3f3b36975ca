use serde::Deserialize;

use crate::domain::{PhoneNumber, VerificationChannel, VerificationResponse};

use super::messages::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct VerificationJsonResponse {
    #[serde(default)]
    sid: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    valid: Option<bool>,
}

pub fn encode_verification_form(
    to: &PhoneNumber,
    channel: VerificationChannel,
) -> Vec<(String, String)> {
    vec![
        ("To".to_owned(), to.as_str().to_owned()),
        ("Channel".to_owned(), channel.as_str().to_owned()),
    ]
}

pub fn encode_verification_check_form(to: &PhoneNumber, code: &str) -> Vec<(String, String)> {
    vec![
        ("To".to_owned(), to.as_str().to_owned()),
        ("Code".to_owned(), code.to_owned()),
    ]
}

/// Decode a `Verification` or `VerificationCheck` resource. Both share the fields we read.
pub fn decode_verification_json_response(
    json: &str,
) -> Result<VerificationResponse, TransportError> {
    let parsed: VerificationJsonResponse = serde_json::from_str(json)?;
    Ok(VerificationResponse {
        sid: parsed.sid,
        status: parsed.status.unwrap_or_default(),
        to: parsed.to,
        channel: parsed.channel,
        valid: parsed.valid,
    })
}
