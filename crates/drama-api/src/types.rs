//! Typed response schemas, one per endpoint family.

use serde::Deserialize;

/// A post as returned by `POST /submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub permalink: Option<String>,
}

/// Response of `POST /is_repost`.
///
/// `permalink` is an empty string when the URL has not been posted yet. A
/// body without the field is a schema error, never "not posted".
#[derive(Debug, Clone, Deserialize)]
pub struct RepostCheck {
    pub permalink: String,
}

impl RepostCheck {
    #[must_use]
    pub fn is_repost(&self) -> bool {
        !self.permalink.is_empty()
    }
}

/// A comment or direct message on the posting site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteComment {
    pub id: u64,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub post_id: Option<u64>,
    #[serde(default)]
    pub parent_comment_id: Option<u64>,
    #[serde(default)]
    pub level: Option<u32>,
}

/// Envelope used by list endpoints (`/comments`, `/notifications`).
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub data: Vec<T>,
}

/// Acknowledgement returned by action endpoints such as messaging,
/// coin transfers and clearing notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
