//! Emotion analysis and reply composition.

pub mod analytics;
pub mod analyzer;
pub mod composer;
pub mod emotion;
pub mod engine;
pub mod normalize;
pub mod polarity;
pub mod resolver;
pub mod sentiment;
pub mod templates;


pub use analytics::EmotionDistribution;
pub use analyzer::{AnalysisError, AnalysisResult, EmotionAnalyzer};
pub use composer::{ComposeError, ResponseComposer};
pub use emotion::{EmotionCategory, EmotionLabel, EmotionScores};
pub use engine::{FeelBot, Turn, TURN_FALLBACK_REPLY, WELCOME_MESSAGE};
pub use sentiment::{PolarityMethod, SentimentError, SentimentLabel, SentimentResult, SentimentScorer};
pub use templates::{ResponseRole, TemplateBank};
