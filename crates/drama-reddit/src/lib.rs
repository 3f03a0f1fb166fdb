//! Reddit listing source (client-credentials OAuth).
//!
//! Fetches controversial submissions, subreddit subscriber counts, and
//! submission comment trees, and normalizes them into `drama-core` types.

pub mod client;
pub mod error;
mod normalize;
mod types;

pub use client::RedditClient;
pub use error::RedditError;
