//! Graph API response envelope and error classification
//!
//! Every Graph API response body is either a success payload or an object
//! carrying an `error` key. Presence of that key is the only thing that
//! decides failure; the HTTP status code is never consulted here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MessengerError, Result};

/// Failure kinds keyed by the Graph API numeric error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Code 100: no user matches the recipient
    RecipientNotFound,
    /// Code 10: the app may not use the Send API
    PermissionDenied,
    /// Code 2: the platform failed internally
    InternalError,
    /// Any other code, or none at all
    Other,
}

impl ErrorKind {
    /// Map a numeric code onto its kind. Unknown codes fall through to `Other`.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(100) => ErrorKind::RecipientNotFound,
            Some(10) => ErrorKind::PermissionDenied,
            Some(2) => ErrorKind::InternalError,
            _ => ErrorKind::Other,
        }
    }
}

/// The `error` object of a failed Graph API call
///
/// Fields are kept as raw JSON. Only the field a given kind reads has to
/// have the expected type; Graph API sends `error_data` as an object on
/// some errors and that must not affect the generic path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphApiError {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default, rename = "type")]
    pub error_type: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub error_data: Option<Value>,
    #[serde(default)]
    pub fbtrace_id: Option<Value>,
}

impl GraphApiError {
    /// Numeric code. Anything that is not an integer reads as absent.
    pub fn code(&self) -> Option<i64> {
        self.code.as_ref().and_then(Value::as_i64)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }

    pub fn error_data(&self) -> Option<&str> {
        self.error_data.as_ref().and_then(Value::as_str)
    }

    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_ref().and_then(Value::as_str)
    }

    pub fn fbtrace_id(&self) -> Option<&str> {
        self.fbtrace_id.as_ref().and_then(Value::as_str)
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_code(self.code())
    }

    /// Error carrying `message`, regardless of code.
    pub fn into_generic(self) -> MessengerError {
        match self.message() {
            Some(message) => MessengerError::Api(message.to_string()),
            None => missing_field("error.message"),
        }
    }

    /// Error of the classified kind. Classified kinds read `error_data`,
    /// the generic kind reads `message`.
    pub fn into_classified(self) -> MessengerError {
        let kind = self.kind();
        if kind == ErrorKind::Other {
            return self.into_generic();
        }

        let Some(detail) = self.error_data().map(str::to_string) else {
            return missing_field("error.error_data");
        };

        match kind {
            ErrorKind::RecipientNotFound => MessengerError::RecipientNotFound(detail),
            ErrorKind::PermissionDenied => MessengerError::PermissionDenied(detail),
            ErrorKind::InternalError => MessengerError::InternalError(detail),
            ErrorKind::Other => MessengerError::Api(detail),
        }
    }
}

fn missing_field(field: &str) -> MessengerError {
    MessengerError::MalformedResponse(format!("error envelope has no `{}` text", field))
}

/// A parsed Graph API response body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    body: Map<String, Value>,
}

impl Envelope {
    /// Accept a response body. Only JSON objects are envelopes.
    ///
    /// `null` is accepted as an empty object: `HttpTransport` hands over an
    /// empty body as `Value::Null`, and a literal `null` body is read the
    /// same way, i.e. as a success without fields.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(body) => Ok(Self { body }),
            Value::Null => Ok(Self::default()),
            other => Err(MessengerError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn is_error(&self) -> bool {
        self.body.contains_key("error")
    }

    /// The parsed `error` object, if the envelope carries one.
    pub fn error(&self) -> Option<Result<GraphApiError>> {
        self.body.get("error").map(|error| {
            if !error.is_object() {
                return Err(MessengerError::MalformedResponse(format!(
                    "`error` is not an object: {}",
                    error
                )));
            }
            GraphApiError::deserialize(error).map_err(|e| {
                MessengerError::MalformedResponse(format!("unreadable `error` object: {}", e))
            })
        })
    }

    /// A top-level string field of a success body.
    pub fn str_field(&self, key: &str) -> Result<&str> {
        match self.body.get(key) {
            Some(Value::String(value)) => Ok(value),
            Some(other) => Err(MessengerError::MalformedResponse(format!(
                "`{}` is not a string: {}",
                key, other
            ))),
            None => Err(MessengerError::MalformedResponse(format!(
                "response has no `{}` field",
                key
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

/// Check an envelope for an error and classify it by numeric code.
pub fn classify(envelope: &Envelope) -> Result<()> {
    match envelope.error() {
        None => Ok(()),
        Some(Ok(error)) => Err(error.into_classified()),
        Some(Err(e)) => Err(e),
    }
}

/// Check an envelope for an error; any error becomes the generic kind.
pub fn classify_generic(envelope: &Envelope) -> Result<()> {
    match envelope.error() {
        None => Ok(()),
        Some(Ok(error)) => Err(error.into_generic()),
        Some(Err(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        Envelope::from_value(value).unwrap()
    }

    fn error_envelope(code: i64) -> Envelope {
        envelope(json!({
            "error": {
                "message": "Invalid parameter",
                "type": "FacebookApiException",
                "code": code,
                "error_data": "detail text",
                "fbtrace_id": "D2kxCybrKVw"
            }
        }))
    }

    #[test]
    fn test_kind_from_code() {
        assert_eq!(ErrorKind::from_code(Some(100)), ErrorKind::RecipientNotFound);
        assert_eq!(ErrorKind::from_code(Some(10)), ErrorKind::PermissionDenied);
        assert_eq!(ErrorKind::from_code(Some(2)), ErrorKind::InternalError);
        assert_eq!(ErrorKind::from_code(Some(190)), ErrorKind::Other);
        assert_eq!(ErrorKind::from_code(None), ErrorKind::Other);
    }

    #[test]
    fn test_success_envelope_classifies_ok() {
        let env = envelope(json!({
            "recipient_id": "1008372609250235",
            "message_id": "mid.1456970487936:c34767dfe57ee6e339"
        }));
        assert!(classify(&env).is_ok());
        assert!(classify_generic(&env).is_ok());
        assert_eq!(
            env.str_field("message_id").unwrap(),
            "mid.1456970487936:c34767dfe57ee6e339"
        );
    }

    #[test]
    fn test_classified_codes_use_error_data() {
        match classify(&error_envelope(100)) {
            Err(MessengerError::RecipientNotFound(msg)) => assert_eq!(msg, "detail text"),
            other => panic!("unexpected: {:?}", other),
        }
        match classify(&error_envelope(10)) {
            Err(MessengerError::PermissionDenied(msg)) => assert_eq!(msg, "detail text"),
            other => panic!("unexpected: {:?}", other),
        }
        match classify(&error_envelope(2)) {
            Err(MessengerError::InternalError(msg)) => assert_eq!(msg, "detail text"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_code_uses_message() {
        for code in [1, 4, 190, 551] {
            match classify(&error_envelope(code)) {
                Err(MessengerError::Api(msg)) => assert_eq!(msg, "Invalid parameter"),
                other => panic!("unexpected for {}: {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_generic_ignores_code() {
        for code in [2, 10, 100, 613] {
            match classify_generic(&error_envelope(code)) {
                Err(MessengerError::Api(msg)) => assert_eq!(msg, "Invalid parameter"),
                other => panic!("unexpected for {}: {:?}", code, other),
            }
        }
    }

    #[test]
    fn test_type_is_not_consulted() {
        let env = envelope(json!({
            "error": { "type": "OAuthException", "code": 100, "error_data": "gone" }
        }));
        assert!(matches!(classify(&env), Err(MessengerError::RecipientNotFound(_))));
    }

    #[test]
    fn test_classify_is_repeatable() {
        let env = error_envelope(10);
        let first = classify(&env).unwrap_err().to_string();
        let second = classify(&env).unwrap_err().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_text_is_malformed() {
        let env = envelope(json!({ "error": { "code": 100, "message": "Invalid parameter" } }));
        assert!(matches!(classify(&env), Err(MessengerError::MalformedResponse(_))));

        let env = envelope(json!({ "error": { "code": 4 } }));
        assert!(matches!(classify(&env), Err(MessengerError::MalformedResponse(_))));
        assert!(matches!(classify_generic(&env), Err(MessengerError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_object_error_is_malformed() {
        let env = envelope(json!({ "error": "boom" }));
        assert!(env.is_error());
        assert!(matches!(classify(&env), Err(MessengerError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_integer_code_reads_as_other() {
        let env = envelope(json!({
            "error": { "message": "Unsupported post request.", "code": "100", "error_data": "x" }
        }));
        match classify(&env) {
            Err(MessengerError::Api(msg)) => assert_eq!(msg, "Unsupported post request."),
            other => panic!("unexpected: {:?}", other),
        }

        let env = envelope(json!({ "error": { "message": "Float code", "code": 100.5 } }));
        assert!(matches!(classify(&env), Err(MessengerError::Api(_))));
    }

    #[test]
    fn test_generic_ignores_code_type() {
        let env = envelope(json!({
            "error": { "message": "Unsupported post request.", "code": "100" }
        }));
        match classify_generic(&env) {
            Err(MessengerError::Api(msg)) => assert_eq!(msg, "Unsupported post request."),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_object_error_data_ignored_when_unused() {
        let env = envelope(json!({
            "error": {
                "message": "Invalid OAuth access token.",
                "type": "OAuthException",
                "code": 190,
                "error_data": { "blame_field_specs": [["recipient"]] },
                "fbtrace_id": "BLBz/WZt8dN"
            }
        }));
        for result in [classify(&env), classify_generic(&env)] {
            match result {
                Err(MessengerError::Api(msg)) => assert_eq!(msg, "Invalid OAuth access token."),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_object_error_data_on_classified_code_is_malformed() {
        let env = envelope(json!({
            "error": {
                "message": "Invalid parameter",
                "code": 100,
                "error_data": { "blame_field_specs": [["recipient", "id"]] }
            }
        }));
        assert!(matches!(classify(&env), Err(MessengerError::MalformedResponse(_))));
        assert!(matches!(classify_generic(&env), Err(MessengerError::Api(_))));
    }

    #[test]
    fn test_graph_error_accessors() {
        let env = error_envelope(10);
        let error = env.error().unwrap().unwrap();
        assert_eq!(error.code(), Some(10));
        assert_eq!(error.error_type(), Some("FacebookApiException"));
        assert_eq!(error.fbtrace_id(), Some("D2kxCybrKVw"));
        assert_eq!(error.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_literal_null_body_is_empty_success() {
        let env = Envelope::from_value(Value::Null).unwrap();
        assert!(classify(&env).is_ok());
        assert!(matches!(env.str_field("message_id"), Err(MessengerError::MalformedResponse(_))));
    }

    #[test]
    fn test_body_must_be_object() {
        assert!(Envelope::from_value(json!([1, 2])).is_err());
        assert!(Envelope::from_value(json!("text")).is_err());
        assert!(!Envelope::from_value(Value::Null).unwrap().is_error());
    }

    #[test]
    fn test_str_field_missing_or_wrong_type() {
        let env = envelope(json!({ "recipient_id": "1", "message_id": 42 }));
        assert!(matches!(env.str_field("message_id"), Err(MessengerError::MalformedResponse(_))));
        assert!(matches!(env.str_field("nope"), Err(MessengerError::MalformedResponse(_))));
    }
}
