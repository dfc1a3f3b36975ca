//! Two-step phone verification through Twilio Verify.
//!
//! The two entry points report failures differently and callers rely on it:
//! [`start_verification`] folds provider failures into a [`VerificationResult`], while
//! [`check_verification`] returns only real statuses and raises on any provider failure.
//! Both raise precondition failures (bad number, missing Verify service) immediately.

use crate::client::TwilioClient;
use crate::config::TwilioConfig;
use crate::domain::{
    PhoneNumber, ServiceSid, VerificationChannel, VerificationResult, VerificationStatus,
};
use crate::error::{ConfigError, ProviderError, TwilioError, VerificationError, codes};
use crate::sender::validate_phone;

/// Start a verification for `phone_number` over `channel`.
///
/// Errors:
/// - [`TwilioError::InvalidPhoneNumber`] when the number lacks the `+` prefix,
/// - [`ConfigError::MissingServiceSid`] when the configuration has no Verify service.
///
/// Any provider failure yields `Ok` with `success == false`, status
/// [`VerificationStatus::Failed`] and a `TWILIO_API_ERROR` code.
pub async fn start_verification(
    config: &TwilioConfig,
    phone_number: &str,
    channel: VerificationChannel,
) -> Result<VerificationResult, VerificationError> {
    tracing::info!(
        phone_number,
        channel = channel.as_str(),
        "starting verification"
    );
    let (to, service_sid) = preconditions(config.service_sid(), phone_number)?;

    tracing::debug!(
        account_sid = config.account_sid().as_str(),
        "initializing Twilio client"
    );
    let client = TwilioClient::new(config);
    Ok(start(client, service_sid, &to, channel).await)
}

/// Like [`start_verification`], but through an existing client.
pub async fn start_verification_with(
    client: &TwilioClient,
    phone_number: &str,
    channel: VerificationChannel,
) -> Result<VerificationResult, VerificationError> {
    tracing::info!(
        phone_number,
        channel = channel.as_str(),
        "starting verification"
    );
    let (to, service_sid) = preconditions(client.service_sid(), phone_number)?;
    Ok(start(Ok(client.clone()), service_sid, &to, channel).await)
}

async fn start(
    client: Result<TwilioClient, ProviderError>,
    service_sid: &ServiceSid,
    to: &PhoneNumber,
    channel: VerificationChannel,
) -> VerificationResult {
    let outcome = match client {
        Ok(client) => client.create_verification(service_sid, to, channel).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(verification) => {
            let status = VerificationStatus::from_provider(&verification.status);
            tracing::info!(
                phone_number = %to,
                status = verification.status.as_str(),
                "verification started"
            );
            VerificationResult::started(to.as_str(), status)
        }
        Err(err) => {
            tracing::error!(
                phone_number = %to,
                error = %err,
                "unexpected error starting verification"
            );
            let error = TwilioError::api(err.to_string(), codes::UNKNOWN);
            let code = error.code().map(str::to_owned);
            VerificationResult::failed(to.as_str(), code, error.to_string())
        }
    }
}

/// Check `code` against the verification in flight for `phone_number`.
///
/// Returns the mapped status directly. Errors:
/// - [`TwilioError::InvalidPhoneNumber`] when the number lacks the `+` prefix,
/// - [`ConfigError::MissingServiceSid`] when the configuration has no Verify service,
/// - [`TwilioError::Api`] with provider code `VERIFICATION_CHECK_ERROR` for any provider
///   failure; a failure is never reported as a status.
pub async fn check_verification(
    config: &TwilioConfig,
    phone_number: &str,
    code: &str,
) -> Result<VerificationStatus, VerificationError> {
    tracing::info!(phone_number, "checking verification");
    let (to, service_sid) = preconditions(config.service_sid(), phone_number)?;

    tracing::debug!(
        account_sid = config.account_sid().as_str(),
        "initializing Twilio client for verification check"
    );
    let client = TwilioClient::new(config);
    Ok(check(client, service_sid, &to, code).await?)
}

/// Like [`check_verification`], but through an existing client.
pub async fn check_verification_with(
    client: &TwilioClient,
    phone_number: &str,
    code: &str,
) -> Result<VerificationStatus, VerificationError> {
    tracing::info!(phone_number, "checking verification");
    let (to, service_sid) = preconditions(client.service_sid(), phone_number)?;
    Ok(check(Ok(client.clone()), service_sid, &to, code).await?)
}

async fn check(
    client: Result<TwilioClient, ProviderError>,
    service_sid: &ServiceSid,
    to: &PhoneNumber,
    code: &str,
) -> Result<VerificationStatus, TwilioError> {
    let outcome = match client {
        Ok(client) => {
            client
                .create_verification_check(service_sid, to, code)
                .await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(verification_check) => {
            tracing::info!(
                phone_number = %to,
                status = verification_check.status.as_str(),
                "verification checked"
            );
            let status = VerificationStatus::from_provider(&verification_check.status);
            Ok(status)
        }
        Err(err) => {
            tracing::error!(phone_number = %to, error = %err, "error checking verification");
            let error = TwilioError::api(err.to_string(), codes::VERIFICATION_CHECK_ERROR);
            Err(error)
        }
    }
}

fn preconditions<'a>(
    service_sid: Option<&'a ServiceSid>,
    phone_number: &str,
) -> Result<(PhoneNumber, &'a ServiceSid), VerificationError> {
    let to = validate_phone(phone_number)?;
    let Some(service_sid) = service_sid else {
        tracing::error!("missing service SID in config");
        return Err(ConfigError::MissingServiceSid.into());
    };
    Ok((to, service_sid))
}
