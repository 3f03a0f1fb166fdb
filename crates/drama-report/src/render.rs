//! Markdown rendering of a comment analysis and cross-post assembly.

use drama_core::{Comment, Submission};

use crate::analyzer::CommentAnalysis;

/// Maximum characters in a cross-post body.
pub const MAX_BODY_CHARS: usize = 20_000;
/// Maximum characters of a quoted comment or parent body.
const MAX_EXCERPT_CHARS: usize = 1_000;
const ENTRIES_PER_SECTION: usize = 3;
const ELLIPSIS: &str = "...";
const SLOTS: usize = 5;
const EMPTY_SLOT: &str = "🔘";

const FIRE: &str = "🔥";
const NERD: &str = "🤓";
const ANGRY: &str = "😡";
const COW: &str = "🐮";

pub const FOOTER: &str = "*:marppy: autodrama: automating away the jobs of dramautists. :marseycapitalistmanlet: :marseyjamming:*";

// Ladders list their thresholds from the fifth slot down; the number of
// thresholds a value passes is the number of filled slots.
const ABSOLUTE_COMMENT_LADDER: [f64; SLOTS] = [1000.0, 500.0, 100.0, 50.0, 10.0];
const RELATIVE_COMMENT_LADDER: [f64; SLOTS] = [100.0, 50.0, 10.0, 5.0, 1.0];
const ANGRINESS_LADDER: [f64; SLOTS] = [-0.95, -0.9, -0.85, -0.75, -0.6];
const SUBMISSION_LADDER: [f64; SLOTS] = [10_000.0, 5_000.0, 1_000.0, 100.0, 10.0];

/// Title, link and body of a post to the drama site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossPost {
    pub title: String,
    pub url: String,
    pub body: String,
}

/// Five slots, the first `filled` showing `emoji` and the rest empty.
#[must_use]
pub fn score_bar(filled: usize, emoji: &str) -> String {
    let filled = filled.min(SLOTS);
    let mut bar = emoji.repeat(filled);
    bar.push_str(&EMPTY_SLOT.repeat(SLOTS - filled));
    bar
}

fn levels_above(value: f64, ladder: &[f64; SLOTS]) -> usize {
    ladder.iter().filter(|&&threshold| value > threshold).count()
}

/// Filled slots for a comment's basedness.
#[must_use]
pub fn comment_basedness_level(basedness: f64, absolute: bool) -> usize {
    let ladder = if absolute {
        &ABSOLUTE_COMMENT_LADDER
    } else {
        &RELATIVE_COMMENT_LADDER
    };
    levels_above(basedness, ladder)
}

#[must_use]
pub fn angriness_level(compound: f64) -> usize {
    ANGRINESS_LADDER
        .iter()
        .filter(|&&threshold| compound < threshold)
        .count()
}

/// `floor(-total)`, clamped to the bar.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lolcow_level(total: f64) -> usize {
    (-total).floor().clamp(0.0, 5.0) as usize
}

#[must_use]
pub fn submission_level(basedness: f64) -> usize {
    levels_above(basedness, &SUBMISSION_LADDER)
}

/// Cuts `text` to `max` characters, ending in `...` when anything was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}

fn excerpt(body: &str) -> String {
    truncate_chars(&body.replace('\n', ""), MAX_EXCERPT_CHARS)
}

/// Caps a cross-post body at [`MAX_BODY_CHARS`].
#[must_use]
pub fn truncate_body(body: &str) -> String {
    truncate_chars(body, MAX_BODY_CHARS)
}

/// One entry of a section: quoted parent, if any, then the linked comment.
fn push_entry(lines: &mut Vec<String>, comment: &Comment, parent: Option<&Comment>) {
    let indent = if let Some(parent) = parent {
        lines.push(format!("> {} ({})", excerpt(&parent.body), parent.score));
        ">>"
    } else {
        ">"
    };
    lines.push(format!(
        "{indent} [{}]({}) ({})",
        excerpt(&comment.body),
        comment.url(),
        comment.score
    ));
}

fn push_section<'a, I>(lines: &mut Vec<String>, heading: &str, entries: I)
where
    I: IntoIterator<Item = (String, &'a Comment, Option<&'a Comment>)>,
{
    let mut entries = entries.into_iter().take(ENTRIES_PER_SECTION).peekable();
    if entries.peek().is_none() {
        return;
    }
    lines.push(format!("## {heading}"));
    for (detail, comment, parent) in entries {
        lines.push(detail);
        push_entry(lines, comment, parent);
    }
}

/// Renders the markdown report for one analysed submission.
///
/// `absolute` selects the comment basedness ladder. Empty sections, and the
/// lolcow heading when nobody was scored, are left out.
#[must_use]
pub fn render_report(analysis: &CommentAnalysis, absolute: bool) -> String {
    let mut lines = Vec::new();

    push_section(
        &mut lines,
        "Most Based Comments",
        analysis.based.iter().map(|ranked| {
            (
                format!(
                    "Basedness: {}",
                    score_bar(comment_basedness_level(ranked.basedness, absolute), FIRE)
                ),
                &ranked.comment,
                ranked.parent.as_ref(),
            )
        }),
    );
    push_section(
        &mut lines,
        "Angriest Comments",
        analysis.angry.iter().map(|angry| {
            (
                format!("Angriness: {}", score_bar(angriness_level(angry.compound), ANGRY)),
                &angry.comment,
                angry.parent.as_ref(),
            )
        }),
    );

    if let Some(lolcow) = analysis.lolcows.first() {
        lines.push("# Biggest lolcow".to_string());
        lines.push(format!(
            "/u/{} {}",
            lolcow.author,
            score_bar(lolcow_level(lolcow.total), COW)
        ));
    }

    lines.push(FOOTER.to_string());
    lines.join("\n\n")
}

/// `[{bar}] {title}`, using 🔥 for absolute and 🤓 for relative rankings.
#[must_use]
pub fn post_title(submission: &Submission, basedness: f64, absolute: bool) -> String {
    let emoji = if absolute { FIRE } else { NERD };
    format!(
        "[{}] {}",
        score_bar(submission_level(basedness), emoji),
        submission.title
    )
}

/// Assembles the cross-post for a submission from its rendered report.
#[must_use]
pub fn cross_post(submission: &Submission, basedness: f64, report: &str, absolute: bool) -> CrossPost {
    CrossPost {
        title: post_title(submission, basedness, absolute),
        url: submission.url(),
        body: truncate_body(report),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
