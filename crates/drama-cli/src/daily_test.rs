use std::collections::HashMap;
use std::io;
use std::time::Duration;

use drama_core::{Comment, ParentRef, Submission};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

/// Two subreddits: `b` wins on relative basedness, `a` on absolute.
struct FakeSource {
    listing: Vec<Submission>,
    subscribers: HashMap<&'static str, u64>,
    /// Submission ids whose comment fetch fails.
    broken: Vec<&'static str>,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            listing: vec![
                submission("a", "big", 0.5, 1000),
                submission("b", "small", 0.5, 100),
            ],
            subscribers: HashMap::from([("big", 1_000_000), ("small", 1_000)]),
            broken: Vec::new(),
        }
    }
}

impl ListingSource for FakeSource {
    type Error = io::Error;

    async fn controversial(
        &self,
        _subreddit: &str,
        _window: TimeWindow,
        _limit: usize,
    ) -> Result<Vec<Submission>, io::Error> {
        Ok(self.listing.clone())
    }

    async fn submission(&self, id: &str) -> Result<Submission, io::Error> {
        self.listing
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, id.to_string()))
    }

    async fn subscribers(&self, subreddit: &str) -> Result<u64, io::Error> {
        Ok(self.subscribers.get(subreddit).copied().unwrap_or(0))
    }

    async fn comments(&self, submission: &Submission) -> Result<Vec<Comment>, io::Error> {
        if self.broken.iter().any(|id| *id == submission.id) {
            return Err(io::Error::other("comment listing unavailable"));
        }
        Ok(vec![Comment {
            id: format!("{}c1", submission.id),
            parent: ParentRef::Submission(submission.id.clone()),
            author: Some("angry_user".to_string()),
            body: "this is garbage".to_string(),
            score: 3,
            permalink: format!("{}c1/", submission.permalink),
        }])
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

fn options(dry_run: bool) -> DailyOptions {
    DailyOptions {
        subreddit: "all".to_string(),
        window: TimeWindow::Day,
        limit: 100,
        dry_run,
    }
}

fn furious(_: &str) -> f64 {
    -0.9
}

fn client(server: &MockServer) -> DramaClient {
    DramaClient::new(&server.uri(), "test-token", Duration::ZERO, 5).expect("valid client")
}

/// Form-encoded fragment of a submission's URL in an `/is_repost` body.
fn url_fragment(id: &str) -> String {
    format!("comments%2F{id}%2Fthread")
}

async fn mount_repost(server: &MockServer, id: &str, posted: bool) {
    let permalink = if posted { "/post/9/already" } else { "" };
    Mock::given(method("POST"))
        .and(path("/is_repost"))
        .and(body_string_contains(url_fragment(id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "permalink": permalink })))
        .mount(server)
        .await;
}

async fn mount_submit(server: &MockServer, id: &str, post_id: u64, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(body_string_contains(url_fragment(id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": post_id,
            "title": "posted",
            "permalink": format!("/post/{post_id}/posted")
        })))
        .expect(expected)
        .mount(server)
        .await;
}

#[test]
fn severity_classification() {
    let auth = DailyError::RepostCheck {
        submission: "a".to_string(),
        source: ApiError::Status {
            method: "POST".to_string(),
            url: "http://site/is_repost".to_string(),
            status: 401,
            body: String::new(),
        },
    };
    assert_eq!(auth.severity(), ErrorSeverity::Fatal);

    let flaky = DailyError::RepostCheck {
        submission: "a".to_string(),
        source: ApiError::Status {
            method: "POST".to_string(),
            url: "http://site/is_repost".to_string(),
            status: 502,
            body: String::new(),
        },
    };
    assert_eq!(flaky.severity(), ErrorSeverity::Skip);

    let publish = DailyError::Publish {
        submission: "a".to_string(),
        source: ApiError::Status {
            method: "POST".to_string(),
            url: "http://site/submit".to_string(),
            status: 400,
            body: "bad title".to_string(),
        },
    };
    assert_eq!(publish.severity(), ErrorSeverity::Phase);

    let comments = DailyError::Comments {
        submission: "a".to_string(),
        source: Box::new(io::Error::other("down")),
    };
    assert_eq!(comments.severity(), ErrorSeverity::Phase);
}

#[tokio::test]
async fn posts_relative_then_absolute_winner() {
    let server = MockServer::start().await;
    mount_repost(&server, "a", false).await;
    mount_repost(&server, "b", false).await;
    mount_submit(&server, "b", 1, 1).await;
    mount_submit(&server, "a", 2, 1).await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(false))
        .await
        .expect("run should succeed");

    assert_eq!(
        summary.relative.unwrap(),
        PhaseOutcome::Posted {
            submission_id: "b".to_string(),
            post_id: 1
        }
    );
    assert_eq!(
        summary.absolute.unwrap(),
        PhaseOutcome::Posted {
            submission_id: "a".to_string(),
            post_id: 2
        }
    );
}

#[tokio::test]
async fn already_posted_submissions_are_passed_over() {
    let server = MockServer::start().await;
    mount_repost(&server, "a", false).await;
    mount_repost(&server, "b", true).await;
    mount_submit(&server, "a", 7, 2).await;
    mount_submit(&server, "b", 8, 0).await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(false))
        .await
        .unwrap();

    assert!(matches!(
        summary.relative,
        Ok(PhaseOutcome::Posted { ref submission_id, .. }) if submission_id == "a"
    ));
    assert!(matches!(
        summary.absolute,
        Ok(PhaseOutcome::Posted { ref submission_id, .. }) if submission_id == "a"
    ));
}

#[tokio::test]
async fn nothing_to_post_when_everything_was_posted() {
    let server = MockServer::start().await;
    mount_repost(&server, "a", true).await;
    mount_repost(&server, "b", true).await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(false))
        .await
        .unwrap();

    assert_eq!(summary.relative.unwrap(), PhaseOutcome::NothingToPost);
    assert_eq!(summary.absolute.unwrap(), PhaseOutcome::NothingToPost);
}

#[tokio::test]
async fn failed_phase_does_not_stop_the_next() {
    let server = MockServer::start().await;
    mount_repost(&server, "a", false).await;
    mount_repost(&server, "b", false).await;
    mount_submit(&server, "a", 3, 1).await;
    mount_submit(&server, "b", 4, 0).await;

    let mut source = FakeSource::new();
    source.broken.push("b");

    let summary = run_daily(&source, &client(&server), &furious, &options(false))
        .await
        .expect("phase failures are not fatal");

    let relative = summary.relative.expect_err("relative phase should fail");
    assert!(matches!(relative, DailyError::Comments { ref submission, .. } if submission == "b"));
    assert!(matches!(
        summary.absolute,
        Ok(PhaseOutcome::Posted { ref submission_id, .. }) if submission_id == "a"
    ));
}

#[tokio::test]
async fn rejected_credentials_abort_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/is_repost"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = run_daily(&FakeSource::new(), &client(&server), &furious, &options(false))
        .await
        .expect_err("401 must abort");
    assert_eq!(err.severity(), ErrorSeverity::Fatal);
}

#[tokio::test]
async fn unreachable_repost_check_skips_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/is_repost"))
        .and(body_string_contains(url_fragment("b")))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount_repost(&server, "a", false).await;
    mount_submit(&server, "a", 5, 2).await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(false))
        .await
        .unwrap();
    assert!(matches!(
        summary.relative,
        Ok(PhaseOutcome::Posted { ref submission_id, .. }) if submission_id == "a"
    ));
}

#[tokio::test]
async fn dry_run_renders_without_posting() {
    let server = MockServer::start().await;
    mount_repost(&server, "a", false).await;
    mount_repost(&server, "b", false).await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(true))
        .await
        .unwrap();

    let Ok(PhaseOutcome::Rendered { submission_id, title, body }) = summary.relative else {
        panic!("expected a rendered relative report");
    };
    assert_eq!(submission_id, "b");
    assert!(title.starts_with("[🤓"), "relative titles use the nerd bar: {title}");
    assert!(body.contains("## Angriest Comments"));
    assert!(body.contains("/u/angry_user"));

    let Ok(PhaseOutcome::Rendered { title, .. }) = summary.absolute else {
        panic!("expected a rendered absolute report");
    };
    assert!(title.starts_with("[🔥"), "absolute titles use the fire bar: {title}");
}

#[tokio::test]
async fn repost_check_without_permalink_skips_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/is_repost"))
        .and(body_string_contains(url_fragment("b")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "rate limited" })))
        .mount(&server)
        .await;
    mount_repost(&server, "a", false).await;
    mount_submit(&server, "a", 6, 2).await;
    mount_submit(&server, "b", 7, 0).await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(false))
        .await
        .expect("a malformed repost check is not fatal");
    assert!(matches!(
        summary.relative,
        Ok(PhaseOutcome::Posted { ref submission_id, .. }) if submission_id == "a"
    ));
    assert!(matches!(
        summary.absolute,
        Ok(PhaseOutcome::Posted { ref submission_id, .. }) if submission_id == "a"
    ));
}

#[tokio::test]
async fn title_bar_uses_the_chosen_submissions_own_score() {
    let server = MockServer::start().await;
    mount_repost(&server, "a", false).await;
    mount_repost(&server, "b", true).await;

    let summary = run_daily(&FakeSource::new(), &client(&server), &furious, &options(true))
        .await
        .unwrap();

    // b tops the relative ranking at 5000 but was already posted; a scores 50.
    let Ok(PhaseOutcome::Rendered { submission_id, title, .. }) = summary.relative else {
        panic!("expected a rendered relative report");
    };
    assert_eq!(submission_id, "a");
    assert_eq!(title, "[🤓🔘🔘🔘🔘] Thread a");

    let Ok(PhaseOutcome::Rendered { title, .. }) = summary.absolute else {
        panic!("expected a rendered absolute report");
    };
    assert_eq!(title, "[🔥🔥🔘🔘🔘] Thread a");
}

fn failed_phase() -> Result<PhaseOutcome, DailyError> {
    Err(DailyError::Comments {
        submission: "a".to_string(),
        source: Box::new(io::Error::other("down")),
    })
}

#[test]
fn run_fails_when_both_phases_fail() {
    let summary = DailySummary {
        relative: failed_phase(),
        absolute: failed_phase(),
    };
    let err = ensure_any_phase_succeeded(&summary).expect_err("nothing got through");
    assert!(err.to_string().contains("both daily phases failed"));
}

#[test]
fn run_succeeds_when_one_phase_gets_through() {
    let summary = DailySummary {
        relative: failed_phase(),
        absolute: Ok(PhaseOutcome::NothingToPost),
    };
    assert!(ensure_any_phase_succeeded(&summary).is_ok());

    let summary = DailySummary {
        relative: Ok(PhaseOutcome::Posted {
            submission_id: "b".to_string(),
            post_id: 1,
        }),
        absolute: failed_phase(),
    };
    assert!(ensure_any_phase_succeeded(&summary).is_ok());
}
