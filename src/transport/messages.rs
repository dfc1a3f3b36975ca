use serde::Deserialize;

use crate::domain::{MessageResponse, PhoneNumber};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    #[serde(default)]
    sid: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

pub fn encode_create_message_form(
    to: &PhoneNumber,
    from: &str,
    body: &str,
) -> Vec<(String, String)> {
    vec![
        ("To".to_owned(), to.as_str().to_owned()),
        ("From".to_owned(), from.to_owned()),
        ("Body".to_owned(), body.to_owned()),
    ]
}

pub fn decode_message_json_response(json: &str) -> Result<MessageResponse, TransportError> {
    let parsed: MessageJsonResponse = serde_json::from_str(json)?;
    Ok(MessageResponse {
        sid: parsed.sid,
        status: parsed.status,
        to: parsed.to,
        error_code: parsed.error_code,
        error_message: parsed.error_message,
    })
}
