//! Domain layer: strong types with validation and invariants (no I/O).

mod response;
mod validation;
mod value;

pub use response::{
    MessageResponse, SmsDeliveryResult, VerificationChannel, VerificationResponse,
    VerificationResult, VerificationStatus,
};
pub use validation::ValidationError;
pub use value::{AccountSid, AuthToken, PhoneNumber, ServiceSid};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_status_maps_known_values() {
        assert_eq!(
            VerificationStatus::from_provider("pending"),
            VerificationStatus::Pending
        );
        assert_eq!(
            VerificationStatus::from_provider("approved"),
            VerificationStatus::Approved
        );
        assert_eq!(
            VerificationStatus::from_provider("canceled"),
            VerificationStatus::Canceled
        );
        assert_eq!(
            VerificationStatus::from_provider("failed"),
            VerificationStatus::Failed
        );
    }

    #[test]
    fn verification_status_collapses_unknown_values_to_failed() {
        for raw in ["bogus", "", "PENDING", "cancelled", "max_attempts_reached"] {
            assert_eq!(
                VerificationStatus::from_provider(raw),
                VerificationStatus::Failed,
                "{raw:?}"
            );
        }
    }

    #[test]
    fn verification_status_mapping_is_idempotent() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Approved,
            VerificationStatus::Canceled,
            VerificationStatus::Failed,
        ] {
            assert_eq!(VerificationStatus::from_provider(status.as_str()), status);
        }
    }

    #[test]
    fn channel_defaults_to_sms() {
        assert_eq!(VerificationChannel::default(), VerificationChannel::Sms);
        assert_eq!(VerificationChannel::Call.as_str(), "call");
        assert_eq!(VerificationChannel::Email.as_str(), "email");
    }

    #[test]
    fn delivery_result_populates_one_side_only() {
        let ok = SmsDeliveryResult::delivered("+1234567890", Some("SM123456".to_owned()));
        assert!(ok.success());
        assert_eq!(ok.to(), "+1234567890");
        assert_eq!(ok.message_sid(), Some("SM123456"));
        assert!(ok.error_code().is_none());
        assert!(ok.error_message().is_none());

        let failed = SmsDeliveryResult::failed(
            "+1234567890",
            Some("E123".to_owned()),
            "Invalid phone number",
        );
        assert!(!failed.success());
        assert_eq!(failed.error_code(), Some("E123"));
        assert_eq!(failed.error_message(), Some("Invalid phone number"));
        assert!(failed.message_sid().is_none());
    }

    #[test]
    fn failed_verification_result_is_always_failed_status() {
        let result = VerificationResult::failed("+1234567890", None, "boom");
        assert!(!result.success());
        assert_eq!(result.status(), VerificationStatus::Failed);
        assert_eq!(result.error_message(), Some("boom"));
    }

    #[test]
    fn results_serialize_with_lowercase_enums() {
        let result = VerificationResult::started("+1234567890", VerificationStatus::Pending);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["success"], true);
        assert!(json["error_code"].is_null());
    }
}
