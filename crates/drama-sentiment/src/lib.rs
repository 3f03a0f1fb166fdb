//! Rule-based sentiment scoring for comment text.
//!
//! [`LexiconAnalyzer`] maps text to a compound polarity in `[-1.0, 1.0]`
//! using a valence lexicon plus negation, intensifier, capitalisation,
//! contrast and punctuation rules. The [`SentimentScorer`] trait is the seam
//! the comment analyzer depends on, so tests can substitute fixed scores.

mod lexicon;
pub mod scorer;

pub use scorer::{compound_score, LexiconAnalyzer};

/// Anything that can turn text into a compound polarity in `[-1.0, 1.0]`.
pub trait SentimentScorer {
    fn compound(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn compound(&self, text: &str) -> f64 {
        self(text)
    }
}
