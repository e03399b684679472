//! Decoding and validation of comment list responses
//!
//! The mapper turns a raw HTTP response into wire records. It is pure and
//! deterministic: no I/O, no shared state, and any malformed record fails the
//! whole payload.
//!
//! Expected body:
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "id": "7019D8A7-0B35-4057-B7F9-8C5471961ED0",
//!       "message": "a message",
//!       "created_at": "2020-05-20T11:24:59+0000",
//!       "author": { "username": "a username" }
//!     }
//!   ]
//! }
//! ```

use crate::error::MappingError;
use crate::types::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// ISO-8601 form with a basic (`+hhmm`) offset, which RFC 3339 rejects
const BASIC_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// A comment record as it appears on the wire
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteComment {
    /// Comment identifier
    pub id: Uuid,
    /// Comment text
    pub message: String,
    /// Creation instant
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub created_at: DateTime<Utc>,
    /// Nested author object
    pub author: RemoteAuthor,
}

/// Author object nested in a [`RemoteComment`]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RemoteAuthor {
    /// Author display name
    pub username: String,
}

impl From<RemoteComment> for Comment {
    fn from(remote: RemoteComment) -> Self {
        Comment {
            id: remote.id,
            message: remote.message,
            created_at: remote.created_at,
            author: remote.author.username,
        }
    }
}

#[derive(Deserialize)]
struct Root {
    #[serde(default)]
    items: Option<Vec<RemoteComment>>,
}

/// Maps comment list responses into [`RemoteComment`] records
pub struct CommentsMapper;

impl CommentsMapper {
    /// Validate the status code and decode the body
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `status` is outside 200..=299
    /// - `data` is not well-formed JSON, or its top level is not an object
    /// - any record lacks a valid id, message, timestamp or author username
    ///
    /// A missing or `null` `items` field decodes to an empty list.
    pub fn map(data: &[u8], status: u16) -> Result<Vec<RemoteComment>, MappingError> {
        if !(200..=299).contains(&status) {
            return Err(MappingError::InvalidStatus(status));
        }

        let value: serde_json::Value = serde_json::from_slice(data)?;
        if !value.is_object() {
            return Err(MappingError::NotAnObject);
        }

        let root: Root = serde_json::from_value(value)?;
        Ok(root.items.unwrap_or_default())
    }
}

/// Parse an ISO-8601 timestamp into an absolute instant
///
/// Accepts RFC 3339 (`Z` or `+hh:mm` offsets) as well as the basic `+hhmm`
/// offset form, both with optional fractional seconds.
///
/// # Examples
///
/// ```
/// use feed_comments::mapper::parse_iso8601;
///
/// let a = parse_iso8601("1993-12-02T12:01:25+0000").unwrap();
/// let b = parse_iso8601("1993-12-02T12:01:25Z").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.timestamp(), 754_833_685);
/// ```
pub fn parse_iso8601(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, BASIC_OFFSET_FORMAT))
        .map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_iso8601<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso8601(&raw).map_err(|e| {
        serde::de::Error::custom(format!("invalid ISO-8601 timestamp '{}': {}", raw, e))
    })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn item_json(id: Uuid, message: &str, created_at: &str, username: &str) -> serde_json::Value {
        json!({
            "id": id.to_string(),
            "message": message,
            "created_at": created_at,
            "author": { "username": username },
        })
    }

    fn items_body(items: Vec<serde_json::Value>) -> Vec<u8> {
        serde_json::to_vec(&json!({ "items": items })).unwrap()
    }

    #[test]
    fn test_map_rejects_non_2xx_status() {
        let body = items_body(vec![]);
        for status in [199, 300, 400, 401, 404, 500] {
            let result = CommentsMapper::map(&body, status);
            assert!(
                matches!(result, Err(MappingError::InvalidStatus(s)) if s == status),
                "status {} should be rejected",
                status
            );
        }
    }

    #[test]
    fn test_map_accepts_whole_2xx_range() {
        let body = items_body(vec![]);
        for status in [200, 201, 250, 280, 299] {
            assert!(
                CommentsMapper::map(&body, status).unwrap().is_empty(),
                "status {} should be accepted",
                status
            );
        }
    }

    #[test]
    fn test_map_rejects_invalid_json() {
        let result = CommentsMapper::map(b"invalid json", 200);
        assert!(matches!(result, Err(MappingError::Json(_))));
    }

    #[test]
    fn test_map_rejects_truncated_json() {
        let result = CommentsMapper::map(br#"{"items": [{"id": "#, 200);
        assert!(matches!(result, Err(MappingError::Json(_))));
    }

    #[test]
    fn test_map_rejects_non_object_top_level() {
        let bodies: [&[u8]; 4] = [b"[]", b"42", b"\"items\"", b"null"];
        for body in bodies {
            let result = CommentsMapper::map(body, 200);
            assert!(matches!(result, Err(MappingError::NotAnObject)));
        }
    }

    #[test]
    fn test_map_empty_list() {
        let items = CommentsMapper::map(br#"{"items": [] }"#, 200).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_map_missing_or_null_list_is_empty() {
        assert!(CommentsMapper::map(b"{}", 200).unwrap().is_empty());
        assert!(
            CommentsMapper::map(br#"{"items": null}"#, 200)
                .unwrap()
                .is_empty()
        );
        assert!(
            CommentsMapper::map(br#"{"other": [1, 2]}"#, 200)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_map_decodes_items() {
        let id1 = Uuid::new_v4();
        let id2 = Uuid::new_v4();
        let body = items_body(vec![
            item_json(id1, "First message", "1993-12-02T12:01:25+0000", "First author"),
            item_json(id2, "Second message", "1992-01-09T12:01:25+0000", "Second author"),
        ]);

        let items = CommentsMapper::map(&body, 200).unwrap();

        assert_eq!(
            items,
            vec![
                RemoteComment {
                    id: id1,
                    message: "First message".to_string(),
                    created_at: Utc.timestamp_opt(754_833_685, 0).unwrap(),
                    author: RemoteAuthor {
                        username: "First author".to_string()
                    },
                },
                RemoteComment {
                    id: id2,
                    message: "Second message".to_string(),
                    created_at: Utc.timestamp_opt(694_958_485, 0).unwrap(),
                    author: RemoteAuthor {
                        username: "Second author".to_string()
                    },
                },
            ]
        );
    }

    #[test]
    fn test_map_fails_whole_payload_on_one_bad_record() {
        let good = item_json(Uuid::new_v4(), "ok", "2020-05-20T11:24:59Z", "someone");
        let bad_records = vec![
            json!({ "id": "not-a-uuid", "message": "m", "created_at": "2020-05-20T11:24:59Z", "author": { "username": "u" } }),
            json!({ "id": Uuid::new_v4().to_string(), "message": null, "created_at": "2020-05-20T11:24:59Z", "author": { "username": "u" } }),
            json!({ "id": Uuid::new_v4().to_string(), "message": 7, "created_at": "2020-05-20T11:24:59Z", "author": { "username": "u" } }),
            json!({ "id": Uuid::new_v4().to_string(), "message": "m", "created_at": "yesterday", "author": { "username": "u" } }),
            json!({ "id": Uuid::new_v4().to_string(), "message": "m", "created_at": "2020-05-20T11:24:59Z", "author": { "username": null } }),
            json!({ "id": Uuid::new_v4().to_string(), "message": "m", "created_at": "2020-05-20T11:24:59Z" }),
        ];

        for bad in bad_records {
            let body = items_body(vec![good.clone(), bad.clone()]);
            let result = CommentsMapper::map(&body, 200);
            assert!(result.is_err(), "record {} should fail mapping", bad);
        }
    }

    #[test]
    fn test_map_is_deterministic() {
        let body = items_body(vec![item_json(
            Uuid::new_v4(),
            "same",
            "2021-03-04T05:06:07.250Z",
            "author",
        )]);
        let first = CommentsMapper::map(&body, 200).unwrap();
        let second = CommentsMapper::map(&body, 200).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_iso8601_forms() {
        let expected = Utc.timestamp_opt(754_833_685, 0).unwrap();
        assert_eq!(parse_iso8601("1993-12-02T12:01:25+0000").unwrap(), expected);
        assert_eq!(parse_iso8601("1993-12-02T12:01:25+00:00").unwrap(), expected);
        assert_eq!(parse_iso8601("1993-12-02T12:01:25Z").unwrap(), expected);
        assert_eq!(parse_iso8601("1993-12-02T14:01:25+0200").unwrap(), expected);
        assert!(parse_iso8601("1993-12-02").is_err());
        assert!(parse_iso8601("").is_err());
    }

    #[test]
    fn test_remote_comment_into_comment() {
        let id = Uuid::new_v4();
        let created_at = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let remote = RemoteComment {
            id,
            message: "hello".to_string(),
            created_at,
            author: RemoteAuthor {
                username: "jane".to_string(),
            },
        };

        let comment: Comment = remote.into();

        assert_eq!(comment, Comment::new(id, "hello", created_at, "jane"));
    }
}
