//! Ranking, comment analysis and markdown rendering for drama reports.
//!
//! The pipeline runs leaves first: [`ranker`] scores a controversial listing,
//! [`analyzer`] walks one submission's comment tree, and [`render`] turns the
//! analysis into the markdown body and title of a cross-post.

pub mod analyzer;
pub mod ranker;
pub mod render;

pub use analyzer::{analyze_comments, AngryComment, CommentAnalysis, CommentTree, Lolcow, RankedComment};
pub use ranker::{rank_submissions, sort_by_basedness, sort_by_relative_basedness, ScoredSubmission};
pub use render::{cross_post, post_title, render_report, truncate_body, CrossPost};
