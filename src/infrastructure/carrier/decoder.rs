//! # Reply Decoder
//!
//! Turns a [`ResponseDocument`] into a typed reply.
//!
//! The carrier may answer with the reply at the top level or wrapped in an
//! object keyed by the reply name (`{"RateReply": {...}}`); both decode.

use crate::domain::entities::CarrierReply;
use crate::infrastructure::carrier::error::{TransportError, TransportResult};
use crate::infrastructure::carrier::traits::ResponseDocument;
use serde_json::Value;

/// Decodes a response document into the reply shape `R`.
///
/// # Errors
///
/// Returns `TransportError::Decode` if the document does not match `R`.
pub fn decode<R: CarrierReply>(response: ResponseDocument) -> TransportResult<R> {
    let body = match response.into_body() {
        Value::Object(mut object) => match object.remove(R::NAME) {
            Some(inner) if object.is_empty() => inner,
            Some(inner) => {
                object.insert(R::NAME.to_string(), inner);
                Value::Object(object)
            }
            None => Value::Object(object),
        },
        other => {
            return Err(TransportError::decode(format!(
                "expected {} object, got {}",
                R::NAME,
                kind(&other)
            )));
        }
    };

    serde_json::from_value(body)
        .map_err(|e| TransportError::decode(format!("invalid {}: {}", R::NAME, e)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{CreatePickupReply, RateReply};
    use crate::domain::services::reply_classifier::classify;
    use crate::domain::value_objects::Severity;
    use serde_json::json;

    #[test]
    fn decodes_bare_reply() {
        let reply: CreatePickupReply = decode(ResponseDocument::new(json!({
            "HighestSeverity": "SUCCESS",
            "PickupConfirmationNumber": "7",
            "Location": "SMOA"
        })))
        .unwrap();

        assert_eq!(reply.header.highest_severity, Severity::Success);
        assert_eq!(reply.pickup_confirmation_number, "7");
    }

    #[test]
    fn decodes_wrapped_reply() {
        let reply: RateReply = decode(ResponseDocument::new(json!({
            "RateReply": {"HighestSeverity": "WARNING"}
        })))
        .unwrap();

        assert_eq!(reply.header.highest_severity, Severity::Warning);
    }

    #[test]
    fn fault_body_decodes_as_fatal_reply() {
        let reply: RateReply = decode(ResponseDocument::new(json!({
            "Fault": {"faultstring": "Authentication Failed"}
        })))
        .unwrap();

        assert!(reply.header.highest_severity.is_fatal());
        assert!(classify(reply).is_err());
    }

    #[test]
    fn empty_body_is_not_a_success() {
        let reply: CreatePickupReply = decode(ResponseDocument::new(json!({}))).unwrap();
        assert!(classify(reply).is_err());
    }

    #[test]
    fn rejects_non_object() {
        let error = decode::<RateReply>(ResponseDocument::new(json!([1, 2]))).unwrap_err();
        assert!(matches!(error, TransportError::Decode { .. }));
        assert!(error.to_string().contains("array"));
    }

    #[test]
    fn rejects_mistyped_field() {
        let error = decode::<RateReply>(ResponseDocument::new(json!({
            "RateReplyDetails": "not a list"
        })))
        .unwrap_err();
        assert!(error.to_string().contains("RateReply"));
    }
}
