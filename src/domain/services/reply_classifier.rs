//! # Reply Classifier
//!
//! Decides whether a decoded reply is a business success.
//!
//! The carrier answers business failures with a successful transport
//! response; the outcome lives in the reply's highest severity. `SUCCESS`,
//! `NOTE` and `WARNING` are successes, every other severity (including ones
//! this client does not know) is a failure.
//!
//! # Examples
//!
//! ```
//! use carrier_client::domain::entities::{CancelPickupReply, Notification, ReplyHeader};
//! use carrier_client::domain::services::reply_classifier::classify;
//!
//! let reply = CancelPickupReply {
//!     header: ReplyHeader::new("ERROR", vec![Notification::new("ERROR", "Invalid Postal Code")]),
//! };
//! let error = classify(reply).unwrap_err();
//! assert_eq!(error.message(), "Invalid Postal Code");
//! ```

use crate::domain::entities::{CarrierReply, Notification};
use crate::domain::value_objects::Severity;
use thiserror::Error;

/// A failure reported inside a transported reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("carrier replied {severity}: {message}")]
pub struct BusinessError {
    severity: Severity,
    message: String,
}

impl BusinessError {
    /// Creates a business error.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// The reply's highest severity.
    #[inline]
    #[must_use]
    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    /// The carrier's message; empty when no notification carried the
    /// highest severity.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Classifies a decoded reply.
///
/// Returns the reply unchanged on success.
///
/// # Errors
///
/// Returns a `BusinessError` if the reply's highest severity, or the severity
/// of one of its nested outcomes, is fatal.
pub fn classify<R: CarrierReply>(reply: R) -> Result<R, BusinessError> {
    let header = reply.header();
    check(&header.highest_severity, &header.notifications)?;
    for (severity, notifications) in reply.nested_outcomes() {
        check(severity, notifications)?;
    }
    Ok(reply)
}

fn check(severity: &Severity, notifications: &[Notification]) -> Result<(), BusinessError> {
    if !severity.is_fatal() {
        return Ok(());
    }
    let message = notifications
        .iter()
        .find(|notification| notification.severity == *severity)
        .map(|notification| notification.message.clone())
        .unwrap_or_default();
    Err(BusinessError::new(severity.clone(), message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{CreatePickupReply, ReplyHeader, TrackReply};
    use serde_json::json;

    fn pickup_reply(severity: &str, notifications: Vec<Notification>) -> CreatePickupReply {
        CreatePickupReply {
            header: ReplyHeader::new(severity, notifications),
            pickup_confirmation_number: "42".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn success_returns_payload() {
        let reply = pickup_reply(
            "SUCCESS",
            vec![Notification::new("SUCCESS", "Request was successfully processed.")],
        );
        let classified = classify(reply).unwrap();
        assert_eq!(classified.pickup_confirmation_number, "42");
    }

    #[test]
    fn note_and_warning_are_not_fatal() {
        assert!(classify(pickup_reply("NOTE", vec![])).is_ok());
        assert!(classify(pickup_reply("WARNING", vec![Notification::new("WARNING", "x")])).is_ok());
    }

    #[test]
    fn error_takes_matching_notification_message() {
        let reply = pickup_reply(
            "ERROR",
            vec![Notification::new("ERROR", "Invalid Postal Code")],
        );
        let error = classify(reply).unwrap_err();
        assert_eq!(error.severity(), &Severity::Error);
        assert_eq!(error.message(), "Invalid Postal Code");
    }

    #[test]
    fn message_comes_from_first_match() {
        let reply = pickup_reply(
            "FAILURE",
            vec![
                Notification::new("WARNING", "ignored"),
                Notification::new("FAILURE", "first"),
                Notification::new("FAILURE", "second"),
            ],
        );
        assert_eq!(classify(reply).unwrap_err().message(), "first");
    }

    #[test]
    fn no_matching_notification_gives_empty_message() {
        let reply = pickup_reply("ERROR", vec![Notification::new("WARNING", "not it")]);
        let error = classify(reply).unwrap_err();
        assert_eq!(error.message(), "");
    }

    #[test]
    fn unknown_severity_is_fatal() {
        let error = classify(pickup_reply("DEGRADED", vec![])).unwrap_err();
        assert_eq!(error.severity(), &Severity::Other("DEGRADED".to_string()));
    }

    #[test]
    fn missing_severity_is_fatal() {
        let reply: CreatePickupReply = serde_json::from_value(json!({})).expect("decodes");
        let error = classify(reply).unwrap_err();
        assert_eq!(error.severity(), &Severity::Other(String::new()));
        assert_eq!(error.message(), "");
    }

    #[test]
    fn empty_or_lowercase_severity_is_fatal() {
        assert!(classify(pickup_reply("", vec![])).is_err());
        assert!(classify(pickup_reply("success", vec![])).is_err());
    }

    #[test]
    fn track_details_without_outcomes_are_not_fatal() {
        let reply: TrackReply = serde_json::from_value(json!({
            "HighestSeverity": "SUCCESS",
            "CompletedTrackDetails": [{"TrackDetails": [{"TrackingNumber": "1234"}]}]
        }))
        .expect("decodes");

        assert!(classify(reply).is_ok());
    }

    #[test]
    fn track_detail_failure_is_fatal() {
        let reply: TrackReply = serde_json::from_value(json!({
            "HighestSeverity": "SUCCESS",
            "CompletedTrackDetails": [{
                "HighestSeverity": "SUCCESS",
                "TrackDetails": [{
                    "Notification": {"Severity": "ERROR", "Message": "This tracking number cannot be found."}
                }]
            }]
        }))
        .expect("decodes");

        let error = classify(reply).unwrap_err();
        assert_eq!(error.message(), "This tracking number cannot be found.");
    }

    #[test]
    fn completed_track_detail_failure_is_fatal() {
        let reply: TrackReply = serde_json::from_value(json!({
            "HighestSeverity": "SUCCESS",
            "CompletedTrackDetails": [{
                "HighestSeverity": "FAILURE",
                "Notifications": [{"Severity": "FAILURE", "Message": "Service unavailable"}]
            }]
        }))
        .expect("decodes");

        assert_eq!(classify(reply).unwrap_err().message(), "Service unavailable");
    }
}
