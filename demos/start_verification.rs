use std::io;

use tracing_subscriber::EnvFilter;
use twilio_sms::{PhoneNumber, TwilioConfig, VerificationChannel, start_verification};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TwilioConfig::from_env()?;
    let phone_raw = std::env::var("TWILIO_TEST_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TWILIO_TEST_PHONE environment variable is required",
        )
    })?;
    let phone = PhoneNumber::from(phonenumber::parse(None, &phone_raw)?);
    let channel = match std::env::var("TWILIO_TEST_CHANNEL").as_deref() {
        Ok("call") => VerificationChannel::Call,
        Ok("email") => VerificationChannel::Email,
        _ => VerificationChannel::Sms,
    };

    let result = start_verification(&config, phone.as_str(), channel).await?;
    println!(
        "success: {}, status: {}, error_code: {:?}, error_message: {:?}",
        result.success(),
        result.status(),
        result.error_code(),
        result.error_message()
    );

    Ok(())
}
