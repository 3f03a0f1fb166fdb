use drama_core::{Comment, ParentRef, Submission};

use super::*;
use crate::analyzer::{AngryComment, Lolcow, RankedComment};

fn comment(id: &str, body: &str, score: i64) -> Comment {
    Comment {
        id: id.to_string(),
        parent: ParentRef::Submission("post".to_string()),
        author: Some("someone".to_string()),
        body: body.to_string(),
        score,
        permalink: format!("/r/x/comments/post/t/{id}/"),
    }
}

fn submission() -> Submission {
    Submission {
        id: "post".to_string(),
        title: "Mods are asleep".to_string(),
        permalink: "/r/x/comments/post/mods_are_asleep/".to_string(),
        author: Some("op".to_string()),
        subreddit: "x".to_string(),
        upvote_ratio: 0.4,
        num_comments: 900,
    }
}

#[test]
fn score_bar_fills_then_pads() {
    assert_eq!(score_bar(0, "🔥"), "🔘🔘🔘🔘🔘");
    assert_eq!(score_bar(2, "🔥"), "🔥🔥🔘🔘🔘");
    assert_eq!(score_bar(9, "🐮"), "🐮🐮🐮🐮🐮");
}

#[test]
fn absolute_comment_ladder_boundaries() {
    let cases = [
        (0.0, 0),
        (10.0, 0),
        (10.5, 1),
        (50.0, 1),
        (51.0, 2),
        (100.0, 2),
        (101.0, 3),
        (500.0, 3),
        (501.0, 4),
        (1000.0, 4),
        (1000.1, 5),
    ];
    for (basedness, expected) in cases {
        assert_eq!(
            comment_basedness_level(basedness, true),
            expected,
            "basedness {basedness}"
        );
    }
}

#[test]
fn relative_comment_ladder_boundaries() {
    assert_eq!(comment_basedness_level(1.0, false), 0);
    assert_eq!(comment_basedness_level(1.5, false), 1);
    assert_eq!(comment_basedness_level(6.0, false), 2);
    assert_eq!(comment_basedness_level(11.0, false), 3);
    assert_eq!(comment_basedness_level(51.0, false), 4);
    assert_eq!(comment_basedness_level(101.0, false), 5);
}

#[test]
fn angriness_ladder_boundaries() {
    assert_eq!(angriness_level(-0.6), 0);
    assert_eq!(angriness_level(-0.7), 1);
    assert_eq!(angriness_level(-0.8), 2);
    assert_eq!(angriness_level(-0.88), 3);
    assert_eq!(angriness_level(-0.92), 4);
    assert_eq!(angriness_level(-0.99), 5);
}

#[test]
fn lolcow_level_floors_and_clamps() {
    assert_eq!(lolcow_level(0.7), 0);
    assert_eq!(lolcow_level(-0.9), 0);
    assert_eq!(lolcow_level(-2.4), 2);
    assert_eq!(lolcow_level(-40.0), 5);
}

#[test]
fn submission_ladder_boundaries() {
    assert_eq!(submission_level(10.0), 0);
    assert_eq!(submission_level(11.0), 1);
    assert_eq!(submission_level(101.0), 2);
    assert_eq!(submission_level(1001.0), 3);
    assert_eq!(submission_level(5001.0), 4);
    assert_eq!(submission_level(10_001.0), 5);
}

#[test]
fn body_truncation() {
    let short = "a".repeat(MAX_BODY_CHARS);
    assert_eq!(truncate_body(&short), short);

    let long = "é".repeat(MAX_BODY_CHARS + 1);
    let cut = truncate_body(&long);
    assert_eq!(cut.chars().count(), MAX_BODY_CHARS);
    assert!(cut.ends_with("..."));
}

#[test]
fn report_layout() {
    let analysis = CommentAnalysis {
        based: vec![RankedComment {
            basedness: 120.0,
            comment: comment("c2", "actually\nno", -4),
            parent: Some(comment("c1", "hot take", 300)),
        }],
        angry: vec![AngryComment {
            compound: -0.97,
            comment: comment("c3", "you are all idiots", 2),
            parent: None,
        }],
        lolcows: vec![Lolcow {
            author: "mad_guy".to_string(),
            total: -3.2,
        }],
    };

    let report = render_report(&analysis, true);
    let expected = [
        "## Most Based Comments",
        "Basedness: 🔥🔥🔥🔘🔘",
        "> hot take (300)",
        ">> [actuallyno](https://reddit.com/r/x/comments/post/t/c2/) (-4)",
        "## Angriest Comments",
        "Angriness: 😡😡😡😡😡",
        "> [you are all idiots](https://reddit.com/r/x/comments/post/t/c3/) (2)",
        "# Biggest lolcow",
        "/u/mad_guy 🐮🐮🐮🔘🔘",
        FOOTER,
    ]
    .join("\n\n");
    assert_eq!(report, expected);
}

#[test]
fn relative_mode_uses_relative_ladder() {
    let analysis = CommentAnalysis {
        based: vec![RankedComment {
            basedness: 120.0,
            comment: comment("c1", "x", 1),
            parent: None,
        }],
        ..CommentAnalysis::default()
    };
    assert!(render_report(&analysis, false).contains("Basedness: 🔥🔥🔥🔥🔥"));
}

#[test]
fn sections_show_at_most_three_entries() {
    let analysis = CommentAnalysis {
        angry: (0..5)
            .map(|i| AngryComment {
                compound: -0.9,
                comment: comment(&format!("c{i}"), "grr", 1),
                parent: None,
            })
            .collect(),
        ..CommentAnalysis::default()
    };
    let report = render_report(&analysis, true);
    assert_eq!(report.matches("Angriness:").count(), 3);
}

#[test]
fn empty_analysis_renders_only_the_footer() {
    let report = render_report(&CommentAnalysis::default(), true);
    assert_eq!(report, FOOTER);
    assert!(!report.contains("lolcow"));
}

#[test]
fn long_comment_bodies_are_excerpted() {
    let analysis = CommentAnalysis {
        angry: vec![AngryComment {
            compound: -0.9,
            comment: comment("c1", &"x".repeat(1500), 1),
            parent: None,
        }],
        ..CommentAnalysis::default()
    };
    let report = render_report(&analysis, true);
    let excerpt = format!("[{}...]", "x".repeat(997));
    assert!(report.contains(&excerpt));
}

#[test]
fn cross_post_fields() {
    let post = cross_post(&submission(), 1500.0, "body", true);
    assert_eq!(post.title, "[🔥🔥🔥🔘🔘] Mods are asleep");
    assert_eq!(post.url, "https://www.reddit.com/r/x/comments/post/mods_are_asleep/");
    assert_eq!(post.body, "body");

    let relative = post_title(&submission(), 5.0, false);
    assert_eq!(relative, "[🔘🔘🔘🔘🔘] Mods are asleep");
}
