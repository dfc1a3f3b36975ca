use serde::Deserialize;

use crate::error::ProviderError;

#[derive(Debug, Clone, Deserialize)]
struct RestErrorJsonResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    more_info: Option<String>,
}

/// Build a [`ProviderError::Rest`] from a non-2xx Twilio response.
///
/// Twilio error bodies look like `{"code": 20404, "message": "...", "more_info": "...",
/// "status": 404}`. Bodies that are not JSON keep their text as the message.
pub fn decode_rest_error(status: u16, retry_after: Option<String>, body: &str) -> ProviderError {
    let parsed = serde_json::from_str::<RestErrorJsonResponse>(body).ok();
    let (code, message, more_info) = match parsed {
        Some(parsed) => (parsed.code, parsed.message, parsed.more_info),
        None => (None, None, None),
    };

    let message = message.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "empty response body".to_owned()
        } else {
            trimmed.to_owned()
        }
    });

    ProviderError::Rest {
        status,
        code,
        message,
        more_info,
        retry_after,
    }
}
