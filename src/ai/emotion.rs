//! Emotion categories, keyword lexicon and contextual boosters.
//!
//! Scoring is a two-step affair: whole-word keyword matching produces a
//! density score per category, then surface cues in the text (exclamation
//! marks, question marks, shouting, stretched words) scale those scores.
//! Boosted values are deliberately not renormalized, so a short shouted
//! message can push a category past 1.0.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

// ── Categories ─────────────────────────────────────────────

/// The six detectable emotions, in their fixed tie-breaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Joy,
    Anger,
    Fear,
    Sadness,
    Surprise,
    Disgust,
}

impl EmotionCategory {
    pub const ALL: [EmotionCategory; 6] = [
        Self::Joy,
        Self::Anger,
        Self::Fear,
        Self::Sadness,
        Self::Surprise,
        Self::Disgust,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
        }
    }

    /// Trigger words for this category, matched as whole words.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Joy => JOY_KW,
            Self::Anger => ANGER_KW,
            Self::Fear => FEAR_KW,
            Self::Sadness => SADNESS_KW,
            Self::Surprise => SURPRISE_KW,
            Self::Disgust => DISGUST_KW,
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary emotion assigned to an utterance: a category or `neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Joy,
    Anger,
    Fear,
    Sadness,
    Surprise,
    Disgust,
    Neutral,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        Self::Joy,
        Self::Anger,
        Self::Fear,
        Self::Sadness,
        Self::Surprise,
        Self::Disgust,
        Self::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Neutral => "neutral",
        }
    }

    /// The underlying category, `None` for neutral.
    pub fn category(self) -> Option<EmotionCategory> {
        match self {
            Self::Joy => Some(EmotionCategory::Joy),
            Self::Anger => Some(EmotionCategory::Anger),
            Self::Fear => Some(EmotionCategory::Fear),
            Self::Sadness => Some(EmotionCategory::Sadness),
            Self::Surprise => Some(EmotionCategory::Surprise),
            Self::Disgust => Some(EmotionCategory::Disgust),
            Self::Neutral => None,
        }
    }

    /// Emoji shown next to a chat turn carrying this label.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Joy => "😊",
            Self::Anger => "😠",
            Self::Fear => "😨",
            Self::Sadness => "😢",
            Self::Surprise => "😲",
            Self::Disgust => "🤢",
            Self::Neutral => "😐",
        }
    }
}

impl From<EmotionCategory> for EmotionLabel {
    fn from(category: EmotionCategory) -> Self {
        match category {
            EmotionCategory::Joy => Self::Joy,
            EmotionCategory::Anger => Self::Anger,
            EmotionCategory::Fear => Self::Fear,
            EmotionCategory::Sadness => Self::Sadness,
            EmotionCategory::Surprise => Self::Surprise,
            EmotionCategory::Disgust => Self::Disgust,
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category scores. Categories without a signal are absent, never zero.
///
/// Iteration follows [`EmotionCategory::ALL`] order, which the resolver
/// relies on for tie-breaking.
pub type EmotionScores = BTreeMap<EmotionCategory, f64>;

// ── Keyword sets ───────────────────────────────────────────

const JOY_KW: &[&str] = &[
    "happy", "joyful", "excited", "thrilled", "elated", "cheerful", "delighted", "pleased",
    "glad", "wonderful", "amazing", "fantastic", "great", "excellent", "awesome", "brilliant",
    "superb", "marvelous", "celebrate", "celebration", "party", "fun", "laugh", "smile", "love",
    "adore", "enjoy", "bliss", "ecstatic", "euphoric",
];

const ANGER_KW: &[&str] = &[
    "angry", "mad", "furious", "rage", "irritated", "annoyed", "frustrated", "outraged", "livid",
    "irate", "pissed", "hate", "disgusted", "infuriated", "aggravated", "hostile", "bitter",
    "resentful", "indignant", "wrathful", "incensed", "enraged", "damn", "fuck", "shit", "hell",
    "stupid", "idiot", "moron",
];

const FEAR_KW: &[&str] = &[
    "afraid", "scared", "terrified", "frightened", "anxious", "worried", "nervous", "panic",
    "dread", "horror", "terror", "phobia", "intimidated", "alarmed", "concerned", "uneasy",
    "apprehensive", "fearful", "paranoid", "insecure", "threatened", "vulnerable", "helpless",
    "overwhelmed", "stress", "stressed", "tension",
];

const SADNESS_KW: &[&str] = &[
    "sad", "depressed", "unhappy", "miserable", "melancholy", "gloomy", "sorrowful", "mournful",
    "grief", "despair", "hopeless", "lonely", "isolated", "abandoned", "rejected", "hurt", "pain",
    "suffering", "cry", "crying", "tears", "weep", "sob", "devastated", "heartbroken",
    "disappointed", "discouraged", "defeated",
];

const SURPRISE_KW: &[&str] = &[
    "surprised", "shocked", "amazed", "astonished", "stunned", "bewildered", "confused",
    "puzzled", "perplexed", "baffled", "startled", "unexpected", "sudden", "wow", "omg",
    "unbelievable", "incredible", "remarkable", "extraordinary", "mind-blowing", "jaw-dropping",
];

const DISGUST_KW: &[&str] = &[
    "disgusted", "revolted", "repulsed", "nauseated", "sick", "gross", "nasty", "horrible",
    "terrible", "awful", "dreadful", "appalling", "repugnant", "loathsome", "vile", "foul",
    "offensive", "distasteful", "yuck", "ew", "ugh", "revolting", "abhorrent", "detestable",
];

/// One compiled whole-word alternation per category, in enumeration order.
static CATEGORY_PATTERNS: LazyLock<Vec<(EmotionCategory, Regex)>> = LazyLock::new(|| {
    EmotionCategory::ALL
        .iter()
        .map(|&category| {
            let alternation = category
                .keywords()
                .iter()
                .map(|kw| regex::escape(kw))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{})\b", alternation);
            let re = Regex::new(&pattern).expect("escaped keyword alternation is a valid regex");
            (category, re)
        })
        .collect()
});

static CAPS_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("caps pattern is a valid literal regex"));

// ── Scoring ────────────────────────────────────────────────

/// Score normalized text against every category, then apply the boosters.
pub fn score_emotions(normalized: &str) -> EmotionScores {
    let word_count = normalized.split_whitespace().count();
    let length_scale = (word_count as f64 * 0.1).max(1.0);

    let mut scores = EmotionScores::new();
    let mut total_matches = 0usize;

    for (category, re) in CATEGORY_PATTERNS.iter() {
        let matches = re.find_iter(normalized).count();
        if matches > 0 {
            scores.insert(*category, matches as f64 / length_scale);
            total_matches += matches;
        }
    }

    // Spread across categories, not within one
    if total_matches > 0 {
        for score in scores.values_mut() {
            *score /= total_matches as f64;
        }
    }

    apply_contextual_boosters(normalized, &mut scores);
    scores
}

/// Adjust scores in place from punctuation, casing and letter repetition.
///
/// Rules run in a fixed order and compound: exclamation, question, caps,
/// then repeated characters.
pub fn apply_contextual_boosters(text: &str, scores: &mut EmotionScores) {
    use EmotionCategory::*;

    let exclamations = text.matches('!').count();
    if exclamations > 0 {
        let factor = (1.0 + exclamations as f64 * 0.2).min(1.5);
        scale_present(scores, &[Joy, Anger, Surprise], factor);
    }

    let questions = text.matches('?').count();
    if questions > 0 {
        *scores.entry(Surprise).or_insert(0.0) += questions as f64 * 0.1;
    }

    let caps_tokens = CAPS_TOKEN_RE.find_iter(&text.to_uppercase()).count();
    if caps_tokens > 0 {
        let factor = (1.0 + caps_tokens as f64 * 0.1).min(1.3);
        scale_present(scores, &[Anger, Joy, Surprise], factor);
    }

    if has_repeated_run(text) {
        for score in scores.values_mut() {
            *score *= 1.2;
        }
    }
}

fn scale_present(scores: &mut EmotionScores, categories: &[EmotionCategory], factor: f64) {
    for category in categories {
        if let Some(score) = scores.get_mut(category) {
            *score *= factor;
        }
    }
}

/// True when any character (other than a newline) repeats 3+ times in a row.
fn has_repeated_run(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(3)
        .any(|w| w[0] != '\n' && w[0] == w[1] && w[1] == w[2])
}

// ── Tests ──────────────────────────────────────────────────
