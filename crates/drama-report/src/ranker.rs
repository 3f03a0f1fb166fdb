//! Submission ranking by basedness.

use std::collections::HashMap;

use drama_core::{ListingSource, Submission, TimeWindow};

/// Relative basedness is expressed per this many subscribers.
const RELATIVE_SCALE: f64 = 100_000.0;

/// A submission with both of its engagement scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSubmission {
    /// `(1 - upvote_ratio) * num_comments`.
    pub basedness: f64,
    /// Basedness per 100 000 subscribers of the submission's subreddit.
    pub relative_basedness: f64,
    pub submission: Submission,
}

#[must_use]
pub fn basedness(submission: &Submission) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let comments = submission.num_comments as f64;
    (1.0 - submission.upvote_ratio) * comments
}

#[must_use]
pub fn relative_basedness(basedness: f64, subscribers: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let subscribers = subscribers as f64;
    basedness / subscribers * RELATIVE_SCALE
}

/// Scores every eligible submission in a controversial listing.
///
/// AutoModerator posts and "comment" threads are skipped. Subscriber counts
/// are cached per subreddit for the duration of the pass; a submission whose
/// subscriber lookup fails or reports zero subscribers is logged and skipped.
/// The result is in listing order.
///
/// # Errors
///
/// Returns the source's error if the listing itself cannot be fetched.
pub async fn rank_submissions<S: ListingSource>(
    source: &S,
    subreddit: &str,
    window: TimeWindow,
    limit: usize,
) -> Result<Vec<ScoredSubmission>, S::Error> {
    let listing = source.controversial(subreddit, window, limit).await?;
    let mut subscriber_cache: HashMap<String, u64> = HashMap::new();
    let mut scored = Vec::with_capacity(listing.len());

    for submission in listing {
        if submission.is_excluded() {
            tracing::debug!(submission = %submission.id, title = %submission.title, "skipping excluded submission");
            continue;
        }

        let subscribers = if let Some(&count) = subscriber_cache.get(&submission.subreddit) {
            count
        } else {
            match source.subscribers(&submission.subreddit).await {
                Ok(count) => {
                    subscriber_cache.insert(submission.subreddit.clone(), count);
                    count
                }
                Err(e) => {
                    tracing::warn!(
                        submission = %submission.id,
                        subreddit = %submission.subreddit,
                        error = %e,
                        "subscriber lookup failed; skipping submission"
                    );
                    continue;
                }
            }
        };

        if subscribers == 0 {
            tracing::warn!(
                submission = %submission.id,
                subreddit = %submission.subreddit,
                "subreddit reports no subscribers; skipping submission"
            );
            continue;
        }

        let basedness = basedness(&submission);
        let relative_basedness = relative_basedness(basedness, subscribers);
        tracing::debug!(
            submission = %submission.id,
            basedness,
            relative_basedness,
            title = %submission.title,
            "scored submission"
        );
        scored.push(ScoredSubmission {
            basedness,
            relative_basedness,
            submission,
        });
    }

    tracing::info!(
        subreddit,
        window = %window,
        scored = scored.len(),
        "ranked controversial submissions"
    );
    Ok(scored)
}

/// Sorts most based first.
pub fn sort_by_basedness(submissions: &mut [ScoredSubmission]) {
    submissions.sort_by(|a, b| b.basedness.total_cmp(&a.basedness));
}

/// Sorts most relatively based first.
pub fn sort_by_relative_basedness(submissions: &mut [ScoredSubmission]) {
    submissions.sort_by(|a, b| b.relative_basedness.total_cmp(&a.relative_basedness));
}

#[cfg(test)]
#[path = "ranker_test.rs"]
mod tests;
