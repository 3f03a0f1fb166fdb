//! Comment tree analysis: based outliers, angry comments and lolcows.

use std::collections::HashMap;

use drama_core::{Comment, ParentRef};
use drama_sentiment::SentimentScorer;

/// Compound sentiment below this marks a comment as angry.
const ANGRY_THRESHOLD: f64 = -0.5;

/// Index over one submission's flat comment list.
#[derive(Debug)]
pub struct CommentTree<'a> {
    by_id: HashMap<&'a str, &'a Comment>,
    replies: HashMap<&'a str, Vec<&'a Comment>>,
}

impl<'a> CommentTree<'a> {
    /// Indexes comments by id and groups direct replies under their parent
    /// comment, preserving input order within each group.
    #[must_use]
    pub fn build(comments: &'a [Comment]) -> Self {
        let mut by_id = HashMap::with_capacity(comments.len());
        let mut replies: HashMap<&'a str, Vec<&'a Comment>> = HashMap::new();

        for comment in comments {
            by_id.insert(comment.id.as_str(), comment);
            if let ParentRef::Comment(parent_id) = &comment.parent {
                replies.entry(parent_id.as_str()).or_default().push(comment);
            }
        }

        Self { by_id, replies }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a Comment> {
        self.by_id.get(id).copied()
    }

    /// Direct replies to a comment, including deleted ones.
    #[must_use]
    pub fn replies(&self, id: &str) -> &[&'a Comment] {
        self.replies.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// A comment that scored below the consensus of its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedComment {
    /// Average reply score minus the comment's own score; always positive.
    pub basedness: f64,
    pub comment: Comment,
    /// The comment being replied to, `None` for top-level comments.
    pub parent: Option<Comment>,
}

/// A comment whose sentiment fell below the anger threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct AngryComment {
    pub compound: f64,
    pub comment: Comment,
    pub parent: Option<Comment>,
}

/// Running sum of an author's compound sentiment across the thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Lolcow {
    pub author: String,
    pub total: f64,
}

/// Outcome of analysing one submission's comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentAnalysis {
    /// Most based first.
    pub based: Vec<RankedComment>,
    /// Angriest first.
    pub angry: Vec<AngryComment>,
    /// Most negative total first. May be empty.
    pub lolcows: Vec<Lolcow>,
}

/// Where a comment sits relative to the submission.
enum Position<'a> {
    TopLevel,
    Reply(&'a Comment),
}

/// Analyses a submission's comments.
///
/// Only comments with an author and a live body are scored, but deleted
/// comments still count as replies when averaging. A reply whose parent is
/// not in `comments` is skipped entirely.
#[must_use]
pub fn analyze_comments<S>(comments: &[Comment], scorer: &S) -> CommentAnalysis
where
    S: SentimentScorer + ?Sized,
{
    let tree = CommentTree::build(comments);
    let mut based = Vec::new();
    let mut angry = Vec::new();
    let mut lolcows: Vec<Lolcow> = Vec::new();
    let mut lolcow_index: HashMap<&str, usize> = HashMap::new();

    for comment in comments.iter().filter(|c| c.is_scorable()) {
        let position = match &comment.parent {
            ParentRef::Submission(_) => Position::TopLevel,
            ParentRef::Comment(parent_id) => match tree.get(parent_id) {
                Some(parent) => Position::Reply(parent),
                None => {
                    tracing::warn!(
                        comment = %comment.id,
                        parent = %parent_id,
                        "parent comment missing from listing; skipping comment"
                    );
                    continue;
                }
            },
        };

        if let Some(basedness) = outlier_basedness(comment, &position, tree.replies(&comment.id)) {
            based.push(RankedComment {
                basedness,
                comment: comment.clone(),
                parent: parent_of(&position),
            });
        }

        let compound = scorer.compound(&comment.body);
        if compound < ANGRY_THRESHOLD {
            angry.push(AngryComment {
                compound,
                comment: comment.clone(),
                parent: parent_of(&position),
            });
        }

        // is_scorable guarantees an author.
        if let Some(author) = comment.author.as_deref() {
            let slot = *lolcow_index.entry(author).or_insert_with(|| {
                lolcows.push(Lolcow {
                    author: author.to_string(),
                    total: 0.0,
                });
                lolcows.len() - 1
            });
            lolcows[slot].total += compound;
        }
    }

    based.sort_by(|a, b| b.basedness.total_cmp(&a.basedness));
    angry.sort_by(|a, b| a.compound.total_cmp(&b.compound));
    lolcows.sort_by(|a, b| a.total.total_cmp(&b.total));

    tracing::debug!(
        comments = tree.len(),
        based = based.len(),
        angry = angry.len(),
        authors = lolcows.len(),
        "analysed comment tree"
    );

    CommentAnalysis {
        based,
        angry,
        lolcows,
    }
}

/// How far a comment fell below the average of its direct replies, when it
/// counts as an outlier.
///
/// Top-level comments are outliers when they score below that average.
/// Replies are judged only when both the average and the parent's score are
/// positive, and are outliers when their score lies outside
/// `[average, parent score]`. Comments without replies never are.
fn outlier_basedness(comment: &Comment, position: &Position<'_>, replies: &[&Comment]) -> Option<f64> {
    if replies.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let average = replies.iter().map(|r| r.score as f64).sum::<f64>() / replies.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let own = comment.score as f64;

    let is_outlier = match position {
        Position::TopLevel => own < average,
        Position::Reply(parent) => {
            #[allow(clippy::cast_precision_loss)]
            let parent_score = parent.score as f64;
            average > 0.0 && parent_score > 0.0 && !(average..=parent_score).contains(&own)
        }
    };

    let basedness = average - own;
    (is_outlier && basedness > 0.0).then_some(basedness)
}

fn parent_of(position: &Position<'_>) -> Option<Comment> {
    match position {
        Position::Reply(parent) => Some((*parent).clone()),
        Position::TopLevel => None,
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
