use std::io;

use tracing_subscriber::EnvFilter;
use twilio_sms::{PhoneNumber, TwilioConfig, send_sms};

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
    let message = std::env::var("TWILIO_TEST_MESSAGE")
        .unwrap_or_else(|_| "Hello from the twilio-sms demo.".to_owned());
    let sender_id = std::env::var("TWILIO_SENDER_ID").ok();

    let result = send_sms(&config, phone.as_str(), &message, sender_id.as_deref()).await?;
    println!(
        "success: {}, message_sid: {:?}, error_code: {:?}, error_message: {:?}",
        result.success(),
        result.message_sid(),
        result.error_code(),
        result.error_message()
    );

    Ok(())
}
