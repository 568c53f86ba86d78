//! FeelBot: one analyzer plus one composer, built once at startup.

use rand::Rng;
use serde::Serialize;

use super::analyzer::{AnalysisResult, EmotionAnalyzer};
use super::composer::ResponseComposer;
use crate::config::FeelBotConfig;

/// Greeting shown at the start of a fresh conversation.
pub const WELCOME_MESSAGE: &str = "Hello! I'm FeelBot, your emotion-aware chatbot companion. I can understand not just what you're saying, but how you're feeling too. Feel free to share anything on your mind! 😊";

/// Reply used when the emotions behind a message could not be analyzed.
pub const TURN_FALLBACK_REPLY: &str = "I'm having trouble understanding your emotions right now, but I'm here to help! Could you tell me more about how you're feeling?";

/// One processed user message and the bot's answer.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub analysis: AnalysisResult,
    pub reply: String,
    /// Local wall-clock time, `HH:MM`.
    pub timestamp: String,
}

#[derive(Debug, Default)]
pub struct FeelBot {
    analyzer: EmotionAnalyzer,
    composer: ResponseComposer,
}

impl FeelBot {
    pub fn new(analyzer: EmotionAnalyzer, composer: ResponseComposer) -> Self {
        Self { analyzer, composer }
    }

    pub fn from_config(config: &FeelBotConfig) -> Self {
        Self::new(
            EmotionAnalyzer::from_config(config),
            ResponseComposer::from_config(config),
        )
    }

    pub fn analyzer(&self) -> &EmotionAnalyzer {
        &self.analyzer
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    pub fn respond(&self, text: &str) -> Turn {
        self.respond_with_rng(&mut rand::thread_rng(), text)
    }

    /// Analyze `text` and compose a reply for it.
    ///
    /// A degraded analysis gets [`TURN_FALLBACK_REPLY`] instead of a
    /// composed answer.
    pub fn respond_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, text: &str) -> Turn {
        let analysis = self.analyzer.analyze(text);
        let reply = if analysis.error.is_some() {
            TURN_FALLBACK_REPLY.to_string()
        } else {
            self.composer.compose_with_rng(
                rng,
                text,
                analysis.primary_emotion,
                analysis.sentiment.label,
                &analysis.emotion_scores,
            )
        };

        Turn {
            analysis,
            reply,
            timestamp: chrono::Local::now().format("%H:%M").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::emotion::EmotionLabel;
    use crate::ai::sentiment::{PolarityMethod, SentimentError, SentimentScorer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Runaway;

    impl PolarityMethod for Runaway {
        fn name(&self) -> &'static str {
            "runaway"
        }
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Ok(-3.0)
        }
    }

    #[test]
    fn respond_runs_both_halves() {
        let bot = FeelBot::default();
        let turn = bot.respond_with_rng(&mut StdRng::seed_from_u64(1), "I am so scared of the dark");
        assert_eq!(turn.analysis.primary_emotion, EmotionLabel::Fear);
        assert!(!turn.reply.is_empty());
        assert_ne!(turn.reply, TURN_FALLBACK_REPLY);
        assert_eq!(turn.timestamp.len(), 5, "HH:MM, got {:?}", turn.timestamp);
    }

    #[test]
    fn degraded_analysis_uses_turn_fallback() {
        let analyzer = EmotionAnalyzer::new(SentimentScorer::new(Box::new(Runaway), None));
        let bot = FeelBot::new(analyzer, ResponseComposer::default());
        let turn = bot.respond("whatever happens");
        assert!(turn.analysis.error.is_some());
        assert_eq!(turn.reply, TURN_FALLBACK_REPLY);
    }

    #[test]
    fn bot_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FeelBot>();

        let bot = std::sync::Arc::new(FeelBot::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let bot = bot.clone();
                std::thread::spawn(move || bot.respond(&format!("I feel great {}", i)).analysis.primary_emotion)
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), EmotionLabel::Joy);
        }
    }
}
