//! Request and response envelopes plus correlation-tag generation.
//!
//! Wire shape (Transmission RPC):
//! - request: `{"method": <string>, "arguments": <object?>, "tag": <int?>}`,
//!   `arguments` omitted when absent, `tag` omitted when zero
//! - response: `{"arguments": <object>, "result": <string>, "tag": <int|null>}`

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Literal `result` value a successful response must carry.
pub(crate) const RESULT_SUCCESS: &str = "success";

/// Request envelope, serialized by reference so large arguments are written
/// straight into the body stream.
#[derive(Debug, Serialize)]
pub(crate) struct RequestEnvelope<'a, A> {
    pub(crate) method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) arguments: Option<&'a A>,
    #[serde(skip_serializing_if = "tag_is_zero")]
    pub(crate) tag: i64,
}

/// Response envelope; `arguments` decodes directly into the caller's type.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope<R> {
    pub(crate) arguments: R,
    pub(crate) result: String,
    #[serde(default)]
    pub(crate) tag: Option<i64>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn tag_is_zero(tag: &i64) -> bool {
    *tag == 0
}

/// Source of correlation tags, one fresh tag per request attempt.
///
/// Tags only detect cross-talk between a request and its own response, so a
/// non-cryptographic uniform draw is enough.
#[derive(Debug)]
pub(crate) enum TagSource {
    /// Uniform draw from `1..i64::MAX`; zero is excluded because the wire
    /// format omits a zero tag.
    Random,
    /// Predetermined tags, consumed front to back.
    #[cfg(test)]
    Scripted(std::sync::Mutex<std::collections::VecDeque<i64>>),
}

impl TagSource {
    pub(crate) fn next(&self) -> i64 {
        match self {
            Self::Random => rand::rng().random_range(1..i64::MAX),
            #[cfg(test)]
            Self::Scripted(tags) => tags
                .lock()
                .expect("tag script lock")
                .pop_front()
                .expect("tag script exhausted"),
        }
    }

    #[cfg(test)]
    pub(crate) fn scripted(tags: impl IntoIterator<Item = i64>) -> Self {
        Self::Scripted(std::sync::Mutex::new(tags.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_omits_absent_arguments_and_zero_tag() {
        let envelope = RequestEnvelope::<'_, ()> {
            method: "session-get",
            arguments: None,
            tag: 0,
        };
        let encoded = serde_json::to_value(&envelope).expect("envelope should serialize");
        assert_eq!(encoded, json!({"method": "session-get"}));
    }

    #[test]
    fn request_carries_arguments_and_tag() {
        let arguments = json!({"ids": [7], "fields": ["name"]});
        let envelope = RequestEnvelope {
            method: "torrent-get",
            arguments: Some(&arguments),
            tag: 42,
        };
        let encoded = serde_json::to_value(&envelope).expect("envelope should serialize");
        assert_eq!(
            encoded,
            json!({
                "method": "torrent-get",
                "arguments": {"ids": [7], "fields": ["name"]},
                "tag": 42,
            })
        );
    }

    #[test]
    fn response_tolerates_null_and_absent_tag() {
        let with_null: ResponseEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"arguments":{},"result":"success","tag":null}"#)
                .expect("null tag should decode");
        assert_eq!(with_null.tag, None);

        let without: ResponseEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"arguments":{},"result":"success"}"#)
                .expect("absent tag should decode");
        assert_eq!(without.tag, None);
        assert_eq!(without.result, RESULT_SUCCESS);
    }

    #[test]
    fn random_tags_stay_in_range() {
        let source = TagSource::Random;
        for _ in 0..64 {
            let tag = source.next();
            assert!(tag >= 1);
        }
    }

    #[test]
    fn scripted_tags_come_out_in_order() {
        let source = TagSource::scripted([42, 43]);
        assert_eq!(source.next(), 42);
        assert_eq!(source.next(), 43);
    }
}
