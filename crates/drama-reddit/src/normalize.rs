//! Conversion from Reddit wire shapes to `drama-core` types.

use drama_core::{Comment, ParentRef, Submission};

use crate::types::{CommentData, LinkData, Listing, Replies, Thing};

/// Reddit reports deleted accounts with this placeholder author.
const DELETED_AUTHOR: &str = "[deleted]";

pub(crate) fn to_submission(link: LinkData) -> Submission {
    Submission {
        id: link.id,
        title: link.title,
        permalink: link.permalink,
        author: normalize_author(link.author),
        subreddit: link.subreddit,
        upvote_ratio: link.upvote_ratio.clamp(0.0, 1.0),
        num_comments: link.num_comments,
    }
}

/// Collects every submission in a listing, ignoring other kinds.
pub(crate) fn submissions(listing: Listing) -> Vec<Submission> {
    listing
        .data
        .children
        .into_iter()
        .filter_map(|thing| match thing {
            Thing::Link(link) => Some(to_submission(link)),
            _ => None,
        })
        .collect()
}

/// Flattens a nested comment listing into a flat list.
///
/// Comments with an unparseable parent id are logged and dropped.
/// "Load more" stubs are skipped; only the comments already expanded in the
/// response are returned.
pub(crate) fn flatten_comments(listing: Listing) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut collapsed = 0_u64;
    let mut stack: Vec<Thing> = listing.data.children;
    stack.reverse();

    while let Some(thing) = stack.pop() {
        match thing {
            Thing::Comment(mut data) => {
                if let Replies::Listing(replies) = std::mem::take(&mut data.replies) {
                    stack.extend(replies.data.children.into_iter().rev());
                }
                if let Some(comment) = to_comment(data) {
                    comments.push(comment);
                }
            }
            Thing::More(more) => collapsed += more.count,
            Thing::Link(_) => {}
        }
    }

    if collapsed > 0 {
        tracing::debug!(
            fetched = comments.len(),
            collapsed,
            "comment listing has collapsed replies that were not expanded"
        );
    }

    comments
}

fn to_comment(data: CommentData) -> Option<Comment> {
    let parent = match data.parent_id.parse::<ParentRef>() {
        Ok(parent) => parent,
        Err(e) => {
            tracing::warn!(comment = %data.id, error = %e, "skipping comment with unparseable parent");
            return None;
        }
    };

    Some(Comment {
        id: data.id,
        parent,
        author: normalize_author(data.author),
        body: data.body.unwrap_or_default(),
        score: data.score,
        permalink: data.permalink,
    })
}

fn normalize_author(author: Option<String>) -> Option<String> {
    author.filter(|name| !name.is_empty() && name != DELETED_AUTHOR)
}
