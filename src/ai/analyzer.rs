//! Emotion & Sentiment Analyzer: the first half of each chat turn.
//!
//! `analyze` never fails. Blank input takes a fast path, and any internal
//! fault is logged and turned into the same neutral, zero-confidence result
//! with the fault text attached in `error`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::emotion::{score_emotions, EmotionCategory, EmotionLabel, EmotionScores};
use super::normalize::normalize;
use super::polarity::{CompoundPolarity, PatternPolarity};
use super::resolver::resolve;
use super::sentiment::{PolarityMethod, SentimentResult, SentimentScorer};
use crate::config::FeelBotConfig;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("emotion score for {category} is not finite")]
    NonFiniteScore { category: EmotionCategory },
    #[error("sentiment polarity {polarity} is outside [-1, 1]")]
    PolarityOutOfRange { polarity: f64 },
}

/// Everything the analyzer learned about one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub primary_emotion: EmotionLabel,
    pub emotion_scores: EmotionScores,
    pub sentiment: SentimentResult,
    /// Confidence in the primary emotion, 0.0..=1.0.
    pub confidence: f64,
    /// Diagnostic note when the result is a degraded fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Result for blank input: no emotion, no sentiment, no confidence.
    pub fn neutral() -> Self {
        Self {
            primary_emotion: EmotionLabel::Neutral,
            emotion_scores: EmotionScores::new(),
            sentiment: SentimentResult::neutral(),
            confidence: 0.0,
            error: None,
        }
    }

    fn degraded(error: &AnalysisError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::neutral()
        }
    }
}

/// Rule-based analyzer. Immutable after construction; share it freely.
#[derive(Debug)]
pub struct EmotionAnalyzer {
    sentiment: SentimentScorer,
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::new(SentimentScorer::default())
    }
}

impl EmotionAnalyzer {
    pub fn new(sentiment: SentimentScorer) -> Self {
        Self { sentiment }
    }

    /// Build from config. An unreadable compound lexicon disables the
    /// compound method instead of failing startup.
    pub fn from_config(config: &FeelBotConfig) -> Self {
        let secondary: Option<Box<dyn PolarityMethod>> = if !config.compound_sentiment {
            None
        } else if let Some(path) = &config.compound_lexicon_path {
            match CompoundPolarity::with_lexicon_file(path) {
                Ok(method) => Some(Box::new(method)),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "compound lexicon unavailable, scoring sentiment with the pattern method only"
                    );
                    None
                }
            }
        } else {
            Some(Box::new(CompoundPolarity::new()))
        };

        Self::new(SentimentScorer::new(Box::new(PatternPolarity::new()), secondary))
    }

    pub fn sentiment_scorer(&self) -> &SentimentScorer {
        &self.sentiment
    }

    /// Analyze one utterance.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            return AnalysisResult::neutral();
        }

        match self.try_analyze(text) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "emotion analysis failed, returning neutral result");
                AnalysisResult::degraded(&e)
            }
        }
    }

    fn try_analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let normalized = normalize(text);
        let emotion_scores = score_emotions(&normalized);
        if let Some((&category, _)) = emotion_scores.iter().find(|(_, s)| !s.is_finite()) {
            return Err(AnalysisError::NonFiniteScore { category });
        }

        let sentiment = self.sentiment.score(text);
        if !(-1.0..=1.0).contains(&sentiment.polarity) {
            return Err(AnalysisError::PolarityOutOfRange {
                polarity: sentiment.polarity,
            });
        }

        let (primary_emotion, confidence) = resolve(&emotion_scores, &sentiment);
        tracing::debug!(
            emotion = %primary_emotion,
            sentiment = %sentiment.label,
            polarity = sentiment.polarity,
            confidence,
            categories = emotion_scores.len(),
            "analyzed utterance"
        );

        Ok(AnalysisResult {
            primary_emotion,
            emotion_scores,
            sentiment,
            confidence,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::sentiment::{SentimentError, SentimentLabel};

    struct Runaway;

    impl PolarityMethod for Runaway {
        fn name(&self) -> &'static str {
            "runaway"
        }
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Ok(7.5)
        }
    }

    #[test]
    fn blank_input_is_exactly_neutral() {
        let analyzer = EmotionAnalyzer::default();
        for text in ["", "   ", "\n\t  "] {
            let result = analyzer.analyze(text);
            assert_eq!(result, AnalysisResult::neutral());
            assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn shouted_happiness_is_joy() {
        let analyzer = EmotionAnalyzer::default();
        let result = analyzer.analyze("I am SO happy!!!");
        assert_eq!(result.primary_emotion, EmotionLabel::Joy);
        let joy = result.emotion_scores[&EmotionCategory::Joy];
        assert!(joy > 1.0, "joy should be boosted past its unboosted 1.0, got {}", joy);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.sentiment.label, SentimentLabel::Positive);
        assert!(result.error.is_none());
    }

    #[test]
    fn filler_words_are_neutral() {
        let analyzer = EmotionAnalyzer::default();
        let result = analyzer.analyze("the meeting is at three");
        assert_eq!(result.primary_emotion, EmotionLabel::Neutral);
        assert!(result.emotion_scores.is_empty());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn sentiment_only_input_maps_to_emotion() {
        let analyzer = EmotionAnalyzer::default();
        let result = analyzer.analyze("this is so good");
        assert!(result.emotion_scores.is_empty());
        assert_eq!(result.primary_emotion, EmotionLabel::Joy);
        assert!(result.confidence > 0.0 && result.confidence <= 0.7);
    }

    #[test]
    fn lone_question_reads_as_surprise() {
        let analyzer = EmotionAnalyzer::default();
        let result = analyzer.analyze("a b?");
        assert_eq!(result.primary_emotion, EmotionLabel::Surprise);
        assert!((result.confidence - 0.1).abs() < 1e-9);
    }

    #[test]
    fn internal_fault_degrades_to_neutral() {
        let analyzer = EmotionAnalyzer::new(SentimentScorer::new(Box::new(Runaway), None));
        let result = analyzer.analyze("I am furious");
        assert_eq!(result.primary_emotion, EmotionLabel::Neutral);
        assert!(result.emotion_scores.is_empty());
        assert_eq!(result.confidence, 0.0);
        let note = result.error.expect("degraded result carries a diagnostic");
        assert!(note.contains("7.5"), "got {:?}", note);
    }

    #[test]
    fn config_can_disable_compound_method() {
        let config = FeelBotConfig {
            compound_sentiment: false,
            ..FeelBotConfig::default()
        };
        let analyzer = EmotionAnalyzer::from_config(&config);
        assert!(!analyzer.sentiment_scorer().has_secondary());
        let result = analyzer.analyze("I love this");
        assert_eq!(result.sentiment.compound_score, None);
    }

    #[test]
    fn missing_lexicon_file_degrades_setup() {
        let config = FeelBotConfig {
            compound_lexicon_path: Some("/no/such/lexicon.txt".into()),
            ..FeelBotConfig::default()
        };
        let analyzer = EmotionAnalyzer::from_config(&config);
        assert!(!analyzer.sentiment_scorer().has_secondary());
        assert_eq!(analyzer.analyze("I am sad").primary_emotion, EmotionLabel::Sadness);
    }

    #[test]
    fn result_serializes_without_empty_error() {
        let analyzer = EmotionAnalyzer::default();
        let json = serde_json::to_value(analyzer.analyze("so scared")).unwrap();
        assert_eq!(json["primary_emotion"], "fear");
        assert!(json.get("error").is_none());
        assert!(json["emotion_scores"]["fear"].as_f64().unwrap() > 0.0);
    }
}
