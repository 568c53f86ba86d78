//! Emotion Resolver: picks one primary emotion and a confidence.

use super::emotion::{EmotionLabel, EmotionScores};
use super::sentiment::{SentimentLabel, SentimentResult};

/// Scores below this are too weak to name an emotion on their own.
pub const WEAK_SIGNAL_THRESHOLD: f64 = 0.1;
/// Confidence never reaches certainty when derived from keyword scores.
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Scale applied to |polarity| when no keyword matched at all.
pub const POLARITY_CONFIDENCE_SCALE: f64 = 0.7;

/// Map a sentiment label onto the closest emotion.
pub fn emotion_from_sentiment(label: SentimentLabel) -> EmotionLabel {
    match label {
        SentimentLabel::Positive => EmotionLabel::Joy,
        SentimentLabel::Negative => EmotionLabel::Sadness,
        SentimentLabel::Neutral => EmotionLabel::Neutral,
    }
}

/// Fuse emotion scores and sentiment into `(primary, confidence)`.
///
/// Deterministic: ties go to the earliest category in enumeration order.
/// When the strongest score is under [`WEAK_SIGNAL_THRESHOLD`] the label
/// falls back to the sentiment mapping, but the confidence still comes from
/// that weak score rather than from polarity.
pub fn resolve(scores: &EmotionScores, sentiment: &SentimentResult) -> (EmotionLabel, f64) {
    let mut best = None;
    for (&category, &score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((category, score)),
        }
    }

    let Some((category, max_score)) = best else {
        let confidence = (sentiment.polarity.abs() * POLARITY_CONFIDENCE_SCALE).clamp(0.0, 1.0);
        return (emotion_from_sentiment(sentiment.label), confidence);
    };

    let confidence = max_score.min(MAX_CONFIDENCE).max(0.0);
    if max_score < WEAK_SIGNAL_THRESHOLD {
        return (emotion_from_sentiment(sentiment.label), confidence);
    }
    (category.into(), confidence)
}
