//! One-off SMS sending that reports provider failures as data.

use crate::client::TwilioClient;
use crate::config::TwilioConfig;
use crate::domain::{PhoneNumber, SmsDeliveryResult};
use crate::error::{ProviderError, TwilioError, codes};

/// Send `message` to `phone_number`, optionally overriding the sender.
///
/// Only an invalid destination (missing `+` prefix) is returned as `Err`, before any
/// request is made. Every later failure is reported inside the [`SmsDeliveryResult`]:
/// domain errors with their own code, anything else with `UNKNOWN_ERROR`.
///
/// A fresh [`TwilioClient`] is built for every call.
pub async fn send_sms(
    config: &TwilioConfig,
    phone_number: &str,
    message: &str,
    sender_id: Option<&str>,
) -> Result<SmsDeliveryResult, TwilioError> {
    tracing::info!(phone_number, sender_id, "sending SMS");
    let to = validate_phone(phone_number)?;

    tracing::debug!(
        account_sid = config.account_sid().as_str(),
        "initializing client for SMS sending"
    );
    Ok(deliver(TwilioClient::new(config), &to, message, sender_id).await)
}

/// Like [`send_sms`], but through an existing client (custom endpoints, timeout, user-agent).
pub async fn send_sms_with(
    client: &TwilioClient,
    phone_number: &str,
    message: &str,
    sender_id: Option<&str>,
) -> Result<SmsDeliveryResult, TwilioError> {
    tracing::info!(phone_number, sender_id, "sending SMS");
    let to = validate_phone(phone_number)?;
    Ok(deliver(Ok(client.clone()), &to, message, sender_id).await)
}

async fn deliver(
    client: Result<TwilioClient, ProviderError>,
    to: &PhoneNumber,
    message: &str,
    sender_id: Option<&str>,
) -> SmsDeliveryResult {
    let client = match client {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(phone_number = %to, error = %err, "unexpected error sending SMS");
            return SmsDeliveryResult::failed(
                to.as_str(),
                Some(codes::UNKNOWN_ERROR.to_owned()),
                err.to_string(),
            );
        }
    };

    tracing::debug!(to = %to, sender_id, "sending message via Twilio client");

    match client.send_message(to, message, sender_id).await {
        Ok(response) => {
            tracing::info!(phone_number = %to, sid = ?response.sid, "SMS sent successfully");
            SmsDeliveryResult::delivered(to.as_str(), response.sid)
        }
        Err(err) => {
            tracing::error!(
                phone_number = %to,
                error = %err,
                code = ?err.code(),
                "error sending SMS"
            );
            SmsDeliveryResult::failed(to.as_str(), err.code().map(str::to_owned), err.to_string())
        }
    }
}

pub(crate) fn validate_phone(phone_number: &str) -> Result<PhoneNumber, TwilioError> {
    PhoneNumber::new(phone_number).map_err(|err| {
        tracing::warn!(phone_number, "invalid phone number format");
        TwilioError::from(err)
    })
}
