//! The daily drama post.
//!
//! One run fetches a single controversial listing and then publishes twice:
//! first the most relatively based thread that has not been posted yet, then
//! the most based one. The two phases are independent: a failure in the
//! relative phase is logged and the absolute phase still runs. Only
//! credential and configuration failures stop the run.

use std::error::Error as StdError;

use drama_api::{ApiError, DramaClient};
use drama_core::{AppConfig, ListingSource, TimeWindow};
use drama_report::{
    analyze_comments, cross_post, rank_submissions, render_report, sort_by_basedness,
    sort_by_relative_basedness, ScoredSubmission,
};
use drama_sentiment::{LexiconAnalyzer, SentimentScorer};
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// How far an error reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Drop the current candidate and keep scanning.
    Skip,
    /// Abandon the current phase; the next phase still runs.
    Phase,
    /// Stop the whole run.
    Fatal,
}

#[derive(Debug, Error)]
pub enum DailyError {
    #[error("failed to fetch the controversial listing: {0}")]
    Listing(#[source] BoxError),

    #[error("repost check failed for submission {submission}: {source}")]
    RepostCheck {
        submission: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to fetch comments for submission {submission}: {source}")]
    Comments {
        submission: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to publish submission {submission}: {source}")]
    Publish {
        submission: String,
        #[source]
        source: ApiError,
    },
}

impl DailyError {
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DailyError::RepostCheck { source, .. } => api_severity(source, ErrorSeverity::Skip),
            DailyError::Publish { source, .. } => api_severity(source, ErrorSeverity::Phase),
            DailyError::Listing(_) | DailyError::Comments { .. } => ErrorSeverity::Phase,
        }
    }
}

/// Rejected credentials and a malformed site address fail every later call
/// the same way.
fn api_severity(error: &ApiError, otherwise: ErrorSeverity) -> ErrorSeverity {
    if error.is_auth_failure() || matches!(error, ApiError::InvalidBaseUrl { .. }) {
        ErrorSeverity::Fatal
    } else {
        otherwise
    }
}

/// Which score a phase ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Relative,
    Absolute,
}

impl Ranking {
    fn is_absolute(self) -> bool {
        matches!(self, Ranking::Absolute)
    }

    fn label(self) -> &'static str {
        match self {
            Ranking::Relative => "relative",
            Ranking::Absolute => "absolute",
        }
    }

    fn score(self, scored: &ScoredSubmission) -> f64 {
        match self {
            Ranking::Relative => scored.relative_basedness,
            Ranking::Absolute => scored.basedness,
        }
    }

    fn sort(self, scored: &mut [ScoredSubmission]) {
        match self {
            Ranking::Relative => sort_by_relative_basedness(scored),
            Ranking::Absolute => sort_by_basedness(scored),
        }
    }
}

/// Result of one successful phase.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutcome {
    Posted {
        submission_id: String,
        post_id: u64,
    },
    /// Dry run: the cross-post was rendered but not sent.
    Rendered {
        submission_id: String,
        title: String,
        body: String,
    },
    /// Every ranked submission had already been posted.
    NothingToPost,
}

#[derive(Debug)]
pub struct DailySummary {
    pub relative: Result<PhaseOutcome, DailyError>,
    pub absolute: Result<PhaseOutcome, DailyError>,
}

#[derive(Debug, Clone)]
pub struct DailyOptions {
    pub subreddit: String,
    pub window: TimeWindow,
    pub limit: usize,
    pub dry_run: bool,
}

impl DailyOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, dry_run: bool) -> Self {
        Self {
            subreddit: config.subreddit.clone(),
            window: TimeWindow::Day,
            limit: config.submission_limit,
            dry_run,
        }
    }
}

/// Builds the real clients from `config` and runs the daily post once.
///
/// # Errors
///
/// Returns an error if a client cannot be built, the listing cannot be
/// fetched, a phase fails fatally, or both phases fail.
pub(crate) async fn run_daily_command(config: &AppConfig, dry_run: bool) -> anyhow::Result<()> {
    let source = drama_reddit::RedditClient::new(&config.reddit, config.request_timeout_secs).await?;
    let client = DramaClient::from_config(config)?;
    let options = DailyOptions::from_config(config, dry_run);

    let summary = run_daily(&source, &client, &LexiconAnalyzer, &options).await?;

    for (label, outcome) in [("relative", &summary.relative), ("absolute", &summary.absolute)] {
        match outcome {
            Ok(PhaseOutcome::Rendered { title, body, .. }) => {
                println!("=== {label} ===\n{title}\n\n{body}\n");
            }
            Ok(PhaseOutcome::Posted {
                submission_id,
                post_id,
            }) => println!("{label}: posted submission {submission_id} as post {post_id}"),
            Ok(PhaseOutcome::NothingToPost) => println!("{label}: nothing new to post"),
            Err(e) => println!("{label}: failed: {e}"),
        }
    }
    ensure_any_phase_succeeded(&summary)
}

/// A run where neither phase got through is a failed run.
fn ensure_any_phase_succeeded(summary: &DailySummary) -> anyhow::Result<()> {
    if let (Err(relative), Err(absolute)) = (&summary.relative, &summary.absolute) {
        anyhow::bail!("both daily phases failed: relative: {relative}; absolute: {absolute}");
    }
    Ok(())
}

/// Runs both phases over one listing.
///
/// # Errors
///
/// Returns [`DailyError::Listing`] if the listing cannot be fetched, or the
/// first error whose severity is [`ErrorSeverity::Fatal`]. Phase-level
/// failures are reported in the returned [`DailySummary`] instead.
pub async fn run_daily<S, T>(
    source: &S,
    client: &DramaClient,
    scorer: &T,
    options: &DailyOptions,
) -> Result<DailySummary, DailyError>
where
    S: ListingSource + Sync,
    T: SentimentScorer + Sync,
{
    tracing::info!(
        subreddit = %options.subreddit,
        window = %options.window,
        limit = options.limit,
        dry_run = options.dry_run,
        "starting daily drama post"
    );

    let mut scored = rank_submissions(source, &options.subreddit, options.window, options.limit)
        .await
        .map_err(|e| DailyError::Listing(Box::new(e)))?;

    let relative = isolate(
        Ranking::Relative,
        run_phase(source, client, scorer, &mut scored, Ranking::Relative, options.dry_run).await,
    )?;
    let absolute = isolate(
        Ranking::Absolute,
        run_phase(source, client, scorer, &mut scored, Ranking::Absolute, options.dry_run).await,
    )?;

    tracing::info!("daily drama post complete");
    Ok(DailySummary { relative, absolute })
}

/// Lets a phase failure through as a value unless it is fatal.
fn isolate(
    ranking: Ranking,
    result: Result<PhaseOutcome, DailyError>,
) -> Result<Result<PhaseOutcome, DailyError>, DailyError> {
    match result {
        Err(e) if e.severity() == ErrorSeverity::Fatal => {
            tracing::error!(phase = ranking.label(), error = %e, "fatal error; aborting daily run");
            Err(e)
        }
        Err(e) => {
            tracing::error!(phase = ranking.label(), error = %e, "phase failed; continuing");
            Ok(Err(e))
        }
        Ok(outcome) => Ok(Ok(outcome)),
    }
}

async fn run_phase<S, T>(
    source: &S,
    client: &DramaClient,
    scorer: &T,
    scored: &mut [ScoredSubmission],
    ranking: Ranking,
    dry_run: bool,
) -> Result<PhaseOutcome, DailyError>
where
    S: ListingSource + Sync,
    T: SentimentScorer + Sync,
{
    ranking.sort(scored);
    let Some(chosen) = first_unposted(client, scored).await? else {
        tracing::info!(phase = ranking.label(), "every ranked submission was already posted");
        return Ok(PhaseOutcome::NothingToPost);
    };
    let submission = &chosen.submission;
    tracing::info!(
        phase = ranking.label(),
        submission = %submission.id,
        score = ranking.score(chosen),
        title = %submission.title,
        "selected submission"
    );

    let comments = source
        .comments(submission)
        .await
        .map_err(|e| DailyError::Comments {
            submission: submission.id.clone(),
            source: Box::new(e),
        })?;
    let analysis = analyze_comments(&comments, scorer);
    let report = render_report(&analysis, ranking.is_absolute());
    let post = cross_post(submission, ranking.score(chosen), &report, ranking.is_absolute());

    if dry_run {
        return Ok(PhaseOutcome::Rendered {
            submission_id: submission.id.clone(),
            title: post.title,
            body: post.body,
        });
    }

    let created = client
        .create_post(&post.title, &post.url, &post.body)
        .await
        .map_err(|source| DailyError::Publish {
            submission: submission.id.clone(),
            source,
        })?;
    tracing::info!(
        phase = ranking.label(),
        submission = %submission.id,
        post_id = created.id,
        "published drama report"
    );
    Ok(PhaseOutcome::Posted {
        submission_id: submission.id.clone(),
        post_id: created.id,
    })
}

/// First submission, in ranked order, whose URL the site has not seen.
async fn first_unposted<'a>(
    client: &DramaClient,
    scored: &'a [ScoredSubmission],
) -> Result<Option<&'a ScoredSubmission>, DailyError> {
    for candidate in scored {
        match client.has_url_been_posted(&candidate.submission.url()).await {
            Ok(false) => return Ok(Some(candidate)),
            Ok(true) => {
                tracing::debug!(submission = %candidate.submission.id, "already posted; skipping");
            }
            Err(source) => {
                let error = DailyError::RepostCheck {
                    submission: candidate.submission.id.clone(),
                    source,
                };
                if error.severity() != ErrorSeverity::Skip {
                    return Err(error);
                }
                tracing::warn!(error = %error, "skipping candidate");
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "daily_test.rs"]
mod tests;
