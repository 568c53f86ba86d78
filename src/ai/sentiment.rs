//! User Sentiment Analysis: polarity of the raw user message.
//!
//! Works on the raw text (not the emotion-normalized one) so casing
//! and punctuation still carry weight. A primary pattern method always
//! runs; an optional compound method is averaged in when it is configured
//! and succeeds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::polarity::{CompoundPolarity, PatternPolarity};

/// Polarity at or beyond this magnitude is no longer neutral.
pub const POLARITY_THRESHOLD: f64 = 0.1;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("failed to read lexicon {}: {source}", path.display())]
    LexiconIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("lexicon line {line}: {reason}")]
    LexiconParse { line: usize, reason: String },
    #[error("{method} method produced a non-finite polarity")]
    NonFinite { method: &'static str },
}

/// Sentiment polarity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Classify a combined polarity score. Both thresholds are inclusive.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity >= POLARITY_THRESHOLD {
            Self::Positive
        } else if polarity <= -POLARITY_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Indicator color used when rendering this label.
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Positive => "#4CAF50",
            Self::Negative => "#F44336",
            Self::Neutral => "#9E9E9E",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected sentiment from a user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Combined polarity in [-1, 1].
    pub polarity: f64,
    /// Output of the pattern method (0.0 when it failed).
    pub pattern_score: f64,
    /// Output of the compound method, absent when unavailable or failed.
    pub compound_score: Option<f64>,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            polarity: 0.0,
            pattern_score: 0.0,
            compound_score: None,
        }
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// A lexicon-based polarity estimator.
pub trait PolarityMethod: Send + Sync {
    fn name(&self) -> &'static str;
    /// Polarity of `text` in [-1, 1].
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Combines a primary and an optional secondary polarity method.
pub struct SentimentScorer {
    primary: Box<dyn PolarityMethod>,
    secondary: Option<Box<dyn PolarityMethod>>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(
            Box::new(PatternPolarity::new()),
            Some(Box::new(CompoundPolarity::new())),
        )
    }
}

impl SentimentScorer {
    pub fn new(primary: Box<dyn PolarityMethod>, secondary: Option<Box<dyn PolarityMethod>>) -> Self {
        Self { primary, secondary }
    }

    /// Pattern method only.
    pub fn pattern_only() -> Self {
        Self::new(Box::new(PatternPolarity::new()), None)
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Score the raw text. Never fails: a failing primary reads as 0.0 and
    /// a failing secondary is left out of the average.
    pub fn score(&self, text: &str) -> SentimentResult {
        let pattern_score = match self.primary.polarity(text) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(method = self.primary.name(), error = %e, "primary polarity failed, using 0.0");
                0.0
            }
        };

        let compound_score = self.secondary.as_ref().and_then(|method| {
            method
                .polarity(text)
                .map_err(|e| {
                    tracing::debug!(method = method.name(), error = %e, "secondary polarity skipped");
                })
                .ok()
        });

        let polarity = match compound_score {
            Some(compound) => (pattern_score + compound) / 2.0,
            None => pattern_score,
        };

        SentimentResult {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
            pattern_score,
            compound_score,
        }
    }
}

impl fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.as_ref().map(|m| m.name()))
            .finish()
    }
}
