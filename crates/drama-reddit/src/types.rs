//! Wire shapes of the Reddit listing endpoints.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
}

/// Reddit listing wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub(crate) data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    pub(crate) children: Vec<Thing>,
}

/// A listing child, discriminated by its `kind` fullname prefix.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub(crate) enum Thing {
    #[serde(rename = "t1")]
    Comment(CommentData),
    #[serde(rename = "t3")]
    Link(LinkData),
    /// Collapsed "load more comments" stub.
    #[serde(rename = "more")]
    More(MoreData),
}

#[derive(Debug, Deserialize)]
pub(crate) struct LinkData {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) permalink: String,
    pub(crate) author: Option<String>,
    pub(crate) subreddit: String,
    pub(crate) upvote_ratio: f64,
    pub(crate) num_comments: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentData {
    pub(crate) id: String,
    pub(crate) parent_id: String,
    pub(crate) author: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) score: i64,
    pub(crate) permalink: String,
    #[serde(default)]
    pub(crate) replies: Replies,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreData {
    #[serde(default)]
    pub(crate) count: u64,
}

/// `replies` is a nested listing, or an empty string when there are none.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub(crate) enum Replies {
    Listing(Listing),
    Empty(String),
    #[default]
    Missing,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubredditAbout {
    pub(crate) data: SubredditData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubredditData {
    #[serde(default)]
    pub(crate) subscribers: Option<u64>,
}
