use std::io;

use tracing_subscriber::EnvFilter;
use twilio_sms::{PhoneNumber, TwilioConfig, check_verification};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = TwilioConfig::from_env()?;
    let phone_raw = required("TWILIO_TEST_PHONE")?;
    let phone = PhoneNumber::from(phonenumber::parse(None, &phone_raw)?);
    let code = required("TWILIO_TEST_CODE")?;

    let status = check_verification(&config, phone.as_str(), &code).await?;
    println!("status: {status}");

    Ok(())
}
