//! Conversation analytics: how often each emotion and sentiment came up.

use serde::Serialize;
use std::collections::BTreeMap;

use super::emotion::EmotionLabel;
use super::sentiment::SentimentLabel;

// ── Types ────────────────────────────────────────────

/// Label tallies across the user turns of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionDistribution {
    pub total: usize,
    /// Only emotions that were seen at least once.
    pub emotions: BTreeMap<EmotionLabel, usize>,
    /// Every sentiment label, including zero counts.
    pub sentiments: BTreeMap<String, usize>,
}

impl Default for EmotionDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionDistribution {
    pub fn new() -> Self {
        Self {
            total: 0,
            emotions: BTreeMap::new(),
            sentiments: SentimentLabel::ALL
                .iter()
                .map(|l| (l.as_str().to_string(), 0))
                .collect(),
        }
    }

    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = (EmotionLabel, SentimentLabel)>,
    {
        let mut dist = Self::new();
        for (emotion, sentiment) in labels {
            dist.record(emotion, sentiment);
        }
        dist
    }

    pub fn record(&mut self, emotion: EmotionLabel, sentiment: SentimentLabel) {
        self.total += 1;
        *self.emotions.entry(emotion).or_insert(0) += 1;
        *self.sentiments.entry(sentiment.as_str().to_string()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Share of turns with this emotion, 0..=100.
    pub fn emotion_percentage(&self, emotion: EmotionLabel) -> f64 {
        self.percentage(self.emotions.get(&emotion).copied().unwrap_or(0))
    }

    pub fn sentiment_percentage(&self, sentiment: SentimentLabel) -> f64 {
        self.percentage(self.sentiments.get(sentiment.as_str()).copied().unwrap_or(0))
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64 * 100.0
    }

    /// One line per seen emotion, then one per sentiment.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .emotions
            .keys()
            .map(|&e| format!("{} {}: {:.1}%", e.emoji(), e, self.emotion_percentage(e)))
            .collect();
        lines.extend(
            SentimentLabel::ALL
                .iter()
                .map(|&s| format!("● {}: {:.1}%", s, self.sentiment_percentage(s))),
        );
        lines
    }
}
