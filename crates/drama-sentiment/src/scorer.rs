//! Compound polarity scorer.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::{booster, is_negator, valence};
use crate::SentimentScorer;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z']*").expect("valid word regex"));

/// Controls how quickly the raw valence sum saturates towards +/-1.
const NORMALIZATION_ALPHA: f64 = 15.0;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
/// How far back a booster or negator can reach.
const LOOKBACK: usize = 3;
const BEFORE_BUT_SCALAR: f64 = 0.5;
const AFTER_BUT_SCALAR: f64 = 1.5;

/// Lexicon-backed [`SentimentScorer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl SentimentScorer for LexiconAnalyzer {
    fn compound(&self, text: &str) -> f64 {
        compound_score(text)
    }
}

/// Score `text` and return a compound polarity in `[-1.0, 1.0]`.
///
/// Returns `0.0` for empty text or text with no sentiment-bearing words.
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let tokens: Vec<&str> = WORD_RE.find_iter(text).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let lowered: Vec<String> = tokens
        .iter()
        .map(|t| t.to_lowercase().replace('\'', ""))
        .collect();
    let mixed_case = has_mixed_case(&tokens);
    let but_index = lowered.iter().position(|w| w == "but");

    let mut sum = 0.0_f64;
    for (i, word) in lowered.iter().enumerate() {
        if booster(word).is_some() {
            continue;
        }
        let Some(mut v) = valence(word) else {
            continue;
        };

        if mixed_case && is_all_caps(tokens[i]) {
            v += CAPS_INCREMENT.copysign(v);
        }

        for distance in 1..=LOOKBACK.min(i) {
            if let Some(b) = booster(&lowered[i - distance]) {
                let scale = match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                let signed = if v < 0.0 { -b } else { b };
                v += signed * scale;
            }
        }

        if (1..=LOOKBACK.min(i)).any(|distance| is_negator(&lowered[i - distance])) {
            v *= NEGATION_SCALAR;
        }

        if let Some(bi) = but_index {
            if i < bi {
                v *= BEFORE_BUT_SCALAR;
            } else if i > bi {
                v *= AFTER_BUT_SCALAR;
            }
        }

        sum += v;
    }

    if sum != 0.0 {
        sum += punctuation_emphasis(text).copysign(sum);
    }

    normalize(sum)
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[allow(clippy::cast_precision_loss)]
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => MAX_QUESTION_EMPHASIS,
    };
    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn is_all_caps(token: &str) -> bool {
    token.chars().count() > 1
        && token.chars().any(char::is_alphabetic)
        && !token.chars().any(char::is_lowercase)
}

/// Capitalisation only counts as emphasis when some, not all, words are shouted.
fn has_mixed_case(tokens: &[&str]) -> bool {
    let shouted = tokens.iter().filter(|t| is_all_caps(t)).count();
    shouted > 0 && shouted < tokens.len()
}
