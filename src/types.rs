//! Core types for feed-comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment left on a feed image
///
/// Immutable once constructed. Built by the loader from mapped wire records
/// and consumed by the presenter to build display rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: Uuid,
    /// Comment text
    pub message: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// Display name of the author
    pub author: String,
}

impl Comment {
    /// Create a new Comment
    pub fn new(
        id: Uuid,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            created_at,
            author: author.into(),
        }
    }
}

/// Raw HTTP response handed from an HTTP client to the loader
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HttpResponse
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}
