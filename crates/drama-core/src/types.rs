use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Account name of the platform's automated moderator. Its submissions are
/// never ranked.
pub const AUTOMODERATOR: &str = "AutoModerator";

/// Body markers left behind when a comment is deleted or removed.
pub const DELETED_BODIES: &[&str] = &["[deleted]", "[removed]"];

/// Immutable snapshot of a submission as returned by the listing source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub title: String,
    /// Site-relative permalink, e.g. `/r/pics/comments/abc123/some_title/`.
    pub permalink: String,
    /// `None` for deleted accounts.
    pub author: Option<String>,
    pub subreddit: String,
    /// Fraction of votes that are upvotes, in `[0.0, 1.0]`.
    pub upvote_ratio: f64,
    pub num_comments: u64,
}

impl Submission {
    /// Canonical absolute URL used both for cross-posting and for the
    /// already-posted check, so deduplication compares like with like.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://www.reddit.com{}", self.permalink)
    }

    /// Whether this submission is excluded from ranking: automoderator posts
    /// and anything with "comment" in the title (megathreads, daily threads).
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.author.as_deref() == Some(AUTOMODERATOR)
            || self.title.to_lowercase().contains("comment")
    }
}

/// What a comment is replying to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentRef {
    /// Top-level reply to the submission with this id.
    Submission(String),
    /// Reply to the comment with this id.
    Comment(String),
}

impl ParentRef {
    /// The bare id without its type prefix.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            ParentRef::Submission(id) | ParentRef::Comment(id) => id,
        }
    }
}

impl FromStr for ParentRef {
    type Err = CoreError;

    /// Parses a prefixed fullname such as `t1_abc` (comment) or `t3_xyz`
    /// (submission).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            Some(("t1", id)) if !id.is_empty() => Ok(ParentRef::Comment(id.to_string())),
            Some(("t3", id)) if !id.is_empty() => Ok(ParentRef::Submission(id.to_string())),
            _ => Err(CoreError::InvalidParentId(s.to_string())),
        }
    }
}

/// One comment from a submission's flat comment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub parent: ParentRef,
    /// `None` for deleted or removed accounts.
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub permalink: String,
}

impl Comment {
    /// Comments with no author or a deletion marker body stay in the tree but
    /// are never scored.
    #[must_use]
    pub fn is_scorable(&self) -> bool {
        self.author.is_some() && !DELETED_BODIES.contains(&self.body.as_str())
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("https://reddit.com{}", self.permalink)
    }
}

/// Listing time window accepted by the controversial listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(CoreError::InvalidTimeWindow(other.to_string())),
        }
    }
}
