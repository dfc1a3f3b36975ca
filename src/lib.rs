//! Typed Rust client for sending SMS and running phone verification through Twilio.
//!
//! The crate keeps a domain layer of validated types, a transport layer for wire-format
//! details, and a small client layer issuing requests. On top sit three entry points:
//!
//! - [`send_sms`]: never fails for provider errors, reports them in [`SmsDeliveryResult`],
//! - [`start_verification`]: same policy, reports them in [`VerificationResult`],
//! - [`check_verification`]: returns a [`VerificationStatus`] or raises.
//!
//! All three raise immediately for a destination without a `+` prefix. Each builds a fresh
//! [`TwilioClient`] per call; the `*_with` variants reuse a client built with
//! [`TwilioClient::builder`] instead.
//!
//! Destinations are only checked for the `+` prefix. To accept free-form input, parse it with
//! the `phonenumber` crate and convert the result with `PhoneNumber::from`, which always yields
//! E.164.
//!
//! ```rust,no_run
//! use twilio_sms::{TwilioConfig, VerificationChannel, send_sms, start_verification};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TwilioConfig::new("AC...", "...", "+15005550006")?
//!         .with_service_sid("VA...")?;
//!
//!     let result = send_sms(&config, "+14155552671", "hello", None).await?;
//!     println!("sent: {} {:?}", result.success(), result.message_sid());
//!
//!     let started = start_verification(&config, "+14155552671", VerificationChannel::Sms).await?;
//!     println!("verification: {}", started.status());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod sender;
mod transport;
pub mod verifier;

pub use client::{TwilioClient, TwilioClientBuilder};
pub use config::TwilioConfig;
pub use domain::{
    AccountSid, AuthToken, MessageResponse, PhoneNumber, ServiceSid, SmsDeliveryResult,
    ValidationError, VerificationChannel, VerificationResponse, VerificationResult,
    VerificationStatus,
};
pub use error::{ConfigError, ProviderError, TwilioError, VerificationError};
pub use sender::{send_sms, send_sms_with};
pub use verifier::{
    check_verification, check_verification_with, start_verification, start_verification_with,
};
