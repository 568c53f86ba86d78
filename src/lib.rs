pub mod ai;
pub mod config;

pub use ai::{
    AnalysisResult, EmotionAnalyzer, EmotionCategory, EmotionLabel, FeelBot, ResponseComposer,
    SentimentLabel, Turn,
};
pub use config::FeelBotConfig;
