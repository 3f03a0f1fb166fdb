//! `rank` command: print a scored controversial listing.

use drama_core::{AppConfig, TimeWindow};
use drama_reddit::RedditClient;
use drama_report::{rank_submissions, sort_by_basedness, sort_by_relative_basedness, ScoredSubmission};

/// # Errors
///
/// Returns an error if the Reddit token exchange or listing request fails.
pub(crate) async fn run_rank(
    config: &AppConfig,
    subreddit: Option<&str>,
    window: TimeWindow,
    limit: Option<usize>,
    absolute: bool,
) -> anyhow::Result<()> {
    let subreddit = subreddit.unwrap_or(&config.subreddit);
    let limit = limit.unwrap_or(config.submission_limit);

    let source = RedditClient::new(&config.reddit, config.request_timeout_secs).await?;
    let mut scored = rank_submissions(&source, subreddit, window, limit).await?;

    if scored.is_empty() {
        println!("no eligible submissions in r/{subreddit} for window '{window}'");
        return Ok(());
    }

    if absolute {
        sort_by_basedness(&mut scored);
    } else {
        sort_by_relative_basedness(&mut scored);
    }

    println!("{:>10}  {:>12}  {:<24}  title", "basedness", "relative", "subreddit");
    for entry in &scored {
        println!("{}", format_row(entry));
    }
    Ok(())
}

fn format_row(entry: &ScoredSubmission) -> String {
    let subreddit = format!("r/{}", entry.submission.subreddit);
    format!(
        "{:>10.1}  {:>12.2}  {subreddit:<24}  {}",
        entry.basedness, entry.relative_basedness, entry.submission.title
    )
}
