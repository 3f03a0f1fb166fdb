use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use drama_core::Comment;

use super::*;

/// In-memory listing with per-subreddit subscriber counts. Subreddits absent
/// from `subscribers` fail the lookup.
struct FakeSource {
    listing: Vec<Submission>,
    subscribers: HashMap<String, u64>,
    lookups: Mutex<Vec<String>>,
}

impl FakeSource {
    fn new(listing: Vec<Submission>, subscribers: &[(&str, u64)]) -> Self {
        Self {
            listing,
            subscribers: subscribers
                .iter()
                .map(|(name, count)| ((*name).to_string(), *count))
                .collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

impl ListingSource for FakeSource {
    type Error = io::Error;

    async fn controversial(
        &self,
        _subreddit: &str,
        _window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Submission>, io::Error> {
        Ok(self.listing.iter().take(limit).cloned().collect())
    }

    async fn submission(&self, id: &str) -> Result<Submission, io::Error> {
        self.listing
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, id.to_string()))
    }

    async fn subscribers(&self, subreddit: &str) -> Result<u64, io::Error> {
        self.lookups.lock().unwrap().push(subreddit.to_string());
        self.subscribers
            .get(subreddit)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, subreddit.to_string()))
    }

    async fn comments(&self, _submission: &Submission) -> Result<Vec<Comment>, io::Error> {
        Ok(Vec::new())
    }
}

fn submission(id: &str, subreddit: &str, upvote_ratio: f64, num_comments: u64) -> Submission {
    Submission {
        id: id.to_string(),
        title: format!("Thread {id}"),
        permalink: format!("/r/{subreddit}/comments/{id}/thread/"),
        author: Some("poster".to_string()),
        subreddit: subreddit.to_string(),
        upvote_ratio,
        num_comments,
    }
}

fn ids(scored: &[ScoredSubmission]) -> Vec<&str> {
    scored.iter().map(|s| s.submission.id.as_str()).collect()
}

fn three_subreddits() -> FakeSource {
    // a: 50 basedness / 1M subs = 5 relative
    // b: 8 basedness / 1k subs = 800 relative
    // c: 30 basedness / 100k subs = 30 relative
    FakeSource::new(
        vec![
            submission("a", "big", 0.5, 100),
            submission("b", "small", 0.2, 10),
            submission("c", "mid", 0.4, 50),
        ],
        &[("big", 1_000_000), ("small", 1_000), ("mid", 100_000)],
    )
}

#[test]
fn basedness_formulas() {
    let s = submission("x", "x", 0.25, 400);
    let b = basedness(&s);
    assert!((b - 300.0).abs() < 1e-9);
    assert!((relative_basedness(b, 3_000) - 10_000.0).abs() < 1e-9);
}

#[tokio::test]
async fn sorts_by_relative_basedness_in_hand_computed_order() {
    let source = three_subreddits();
    let mut scored = rank_submissions(&source, "all", TimeWindow::Day, 100)
        .await
        .unwrap();
    assert_eq!(ids(&scored), ["a", "b", "c"], "ranker keeps listing order");

    sort_by_relative_basedness(&mut scored);
    assert_eq!(ids(&scored), ["b", "c", "a"]);
    assert!((scored[0].relative_basedness - 800.0).abs() < 1e-6);

    sort_by_basedness(&mut scored);
    assert_eq!(ids(&scored), ["a", "c", "b"]);
    assert!((scored[0].basedness - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn excludes_automoderator_and_comment_threads() {
    let mut automod = submission("auto", "big", 0.1, 1000);
    automod.author = Some("AutoModerator".to_string());
    let mut megathread = submission("mega", "big", 0.1, 1000);
    megathread.title = "Comment Thread MEGA".to_string();
    let source = FakeSource::new(
        vec![automod, megathread, submission("ok", "big", 0.5, 10)],
        &[("big", 10)],
    );

    let scored = rank_submissions(&source, "all", TimeWindow::Day, 100)
        .await
        .unwrap();
    assert_eq!(ids(&scored), ["ok"]);
}

#[tokio::test]
async fn caches_subscriber_lookups_per_subreddit() {
    let source = FakeSource::new(
        vec![
            submission("a", "big", 0.5, 10),
            submission("b", "big", 0.5, 20),
            submission("c", "mid", 0.5, 30),
        ],
        &[("big", 100), ("mid", 100)],
    );

    let scored = rank_submissions(&source, "all", TimeWindow::Day, 100)
        .await
        .unwrap();
    assert_eq!(scored.len(), 3);
    assert_eq!(*source.lookups.lock().unwrap(), ["big", "mid"]);
}

#[tokio::test]
async fn skips_failed_lookups_and_empty_subreddits() {
    let source = FakeSource::new(
        vec![
            submission("unknown", "missing", 0.5, 10),
            submission("empty", "ghost", 0.5, 10),
            submission("ok", "big", 0.5, 10),
        ],
        &[("ghost", 0), ("big", 100)],
    );

    let scored = rank_submissions(&source, "all", TimeWindow::Day, 100)
        .await
        .unwrap();
    assert_eq!(ids(&scored), ["ok"]);
    assert!(scored.iter().all(|s| s.basedness >= 0.0 && s.relative_basedness >= 0.0));
}
