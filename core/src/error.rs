//! Error types for the REST client core.
//!
//! # Design
//! Three variants belong to the core mechanisms themselves and are always
//! terminal for the call that produced them: `ValueNotPresent` (a field was
//! read without checking presence), `MalformedTimestamp` (date-time text the
//! decoder could not parse) and `MixedCommentStyles` (a review batch mixing
//! positioning schemes). The remaining variants cover request building and
//! status handling in the client glue.

use thiserror::Error;

/// Prefix of the serde error message raised by `Timestamp`'s deserializer.
/// `decode` uses it to lift timestamp failures out of generic decode errors.
/// serde_json appends ` at line N column M` after the message; that suffix is
/// dropped from `MalformedTimestamp`.
pub(crate) const MALFORMED_TIMESTAMP: &str = "malformed timestamp";

/// Errors returned by the client core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A `Field` was read with `value()` while absent.
    #[error("value not present")]
    ValueNotPresent,

    /// A timestamp field held text that is not a valid date-time.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// A review comment batch mixes `position` with `side`/`line` addressing.
    #[error("review comments must use either position or side/line, not both")]
    MixedCommentStyles,

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A request payload or query could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The base URL joined with an endpoint path is not a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Classify a decode failure, keeping timestamp format drift apart from
    /// schema drift.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        let msg = err.to_string();
        match msg.strip_prefix(MALFORMED_TIMESTAMP) {
            Some(rest) if err.is_data() => {
                let position = format!(" at line {} column {}", err.line(), err.column());
                let rest = rest.strip_suffix(position.as_str()).unwrap_or(rest);
                ApiError::MalformedTimestamp(rest.trim_start_matches(": ").to_string())
            }
            _ => ApiError::DeserializationError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_errors_are_lifted_out_of_decode_errors() {
        let err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert!(matches!(ApiError::from_decode(err), ApiError::DeserializationError(_)));

        let err: serde_json::Error =
            serde::de::Error::custom(format!("{MALFORMED_TIMESTAMP}: \"nope\""));
        match ApiError::from_decode(err) {
            ApiError::MalformedTimestamp(text) => assert_eq!(text, "\"nope\""),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_timestamp_carries_only_the_value() {
        #[derive(Debug, serde::Deserialize)]
        struct Stamped {
            #[allow(dead_code)]
            at: crate::Timestamp,
        }
        let err = serde_json::from_str::<Stamped>(r#"{"at":"not-a-date"}"#).unwrap_err();
        assert!(err.line() > 0);
        match ApiError::from_decode(err) {
            ApiError::MalformedTimestamp(text) => assert_eq!(text, "\"not-a-date\""),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn display_messages() {
        assert_eq!(ApiError::NotFound.to_string(), "resource not found");
        assert_eq!(
            ApiError::HttpError { status: 422, body: "bad".into() }.to_string(),
            "HTTP 422: bad"
        );
        assert_eq!(
            ApiError::MalformedTimestamp("\"x\"".into()).to_string(),
            "malformed timestamp: \"x\""
        );
    }
}
