//! `report` command: render one submission's drama report to a file.

use std::path::{Path, PathBuf};

use drama_core::{AppConfig, ListingSource, Submission};
use drama_reddit::RedditClient;
use drama_report::{analyze_comments, render_report};
use drama_sentiment::{LexiconAnalyzer, SentimentScorer};

/// Characters of the sanitized title kept in a report file name.
const FILE_STEM_CHARS: usize = 30;

/// Fetches, analyses and renders `submission_id`, then writes the report to
/// `out_dir`. Returns the written path.
///
/// # Errors
///
/// Returns an error if Reddit cannot be reached, the submission does not
/// exist, or the file cannot be written.
pub(crate) async fn run_report(
    config: &AppConfig,
    submission_id: &str,
    absolute: bool,
    out_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let source = RedditClient::new(&config.reddit, config.request_timeout_secs).await?;
    let (submission, report) =
        build_report(&source, &LexiconAnalyzer, submission_id, absolute).await?;

    let path = out_dir.join(report_file_name(&submission));
    tokio::fs::write(&path, report.as_bytes()).await?;
    tracing::info!(
        submission = %submission.id,
        path = %path.display(),
        "wrote drama report"
    );
    Ok(path)
}

async fn build_report<S, T>(
    source: &S,
    scorer: &T,
    submission_id: &str,
    absolute: bool,
) -> Result<(Submission, String), S::Error>
where
    S: ListingSource,
    T: SentimentScorer,
{
    let submission = source.submission(submission_id).await?;
    tracing::info!(url = %submission.url(), title = %submission.title, "generating report");
    let comments = source.comments(&submission).await?;
    let analysis = analyze_comments(&comments, scorer);
    let report = render_report(&analysis, absolute);
    Ok((submission, report))
}

/// `{title}_{subreddit}.md`, where the title is lowercased, reduced to
/// ASCII letters and spaces, cut to 30 characters, and has spaces replaced
/// with underscores.
fn report_file_name(submission: &Submission) -> String {
    let stem: String = submission
        .title
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .take(FILE_STEM_CHARS)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("{stem}_{}.md", submission.subreddit)
}
