//! The inbound listing-source seam.

use std::future::Future;

use crate::types::{Comment, Submission, TimeWindow};

/// Read-only access to the link-aggregation platform.
///
/// Implemented by the Reddit client for production runs and by in-memory
/// fixtures in tests.
pub trait ListingSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Most controversial submissions in `subreddit` within `window`,
    /// at most `limit` of them.
    fn controversial(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send;

    /// A single submission by its bare id.
    fn submission(&self, id: &str)
        -> impl Future<Output = Result<Submission, Self::Error>> + Send;

    /// Subscriber count for a subreddit.
    fn subscribers(&self, subreddit: &str)
        -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Every comment on a submission as a flat, unordered list.
    fn comments(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send;
}
