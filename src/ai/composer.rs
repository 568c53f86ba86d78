//! Response Composer: builds the empathetic reply for one turn.
//!
//! Fragments are chosen by role from the [`TemplateBank`], joined with an
//! optional transition, then adjusted for intensity. Randomness comes from
//! the caller so tests can pin replies with a seeded `StdRng`.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::emotion::{EmotionLabel, EmotionScores};
use super::sentiment::SentimentLabel;
use super::templates::{ResponseRole, TemplateBank, PERSONAL_TOPICS};
use crate::config::FeelBotConfig;

/// Scores above this make the reply more emphatic.
pub const INTENSITY_THRESHOLD: f64 = 0.7;

const OPENING_NEGATIVE: &[ResponseRole] = &[
    ResponseRole::Acknowledgment,
    ResponseRole::Empathy,
    ResponseRole::Reassurance,
    ResponseRole::Understanding,
];
const OPENING_POSITIVE: &[ResponseRole] = &[ResponseRole::Acknowledgment, ResponseRole::Excitement];
const OPENING_NEUTRAL: &[ResponseRole] = &[ResponseRole::Engagement];

static TOPIC_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PERSONAL_TOPICS
        .iter()
        .map(|(words, clause)| {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
                .expect("topic keywords form a valid pattern");
            (re, *clause)
        })
        .collect()
});

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("no {pool} templates available for {emotion}")]
    EmptyPool {
        emotion: EmotionLabel,
        pool: &'static str,
    },
}

/// Text used when composition fails for any reason.
pub fn fallback_reply(emotion: EmotionLabel) -> String {
    format!(
        "I can sense you're feeling {}, and I want you to know I'm here to listen and support you. What's on your mind?",
        emotion
    )
}

/// The role that follows the opening for each emotion.
fn body_role(label: EmotionLabel) -> Option<ResponseRole> {
    match label {
        EmotionLabel::Anger => Some(ResponseRole::Calming),
        EmotionLabel::Fear => Some(ResponseRole::Support),
        EmotionLabel::Sadness => Some(ResponseRole::Comfort),
        EmotionLabel::Joy => Some(ResponseRole::Encouragement),
        EmotionLabel::Surprise => Some(ResponseRole::Curiosity),
        EmotionLabel::Disgust => Some(ResponseRole::Support),
        EmotionLabel::Neutral => None,
    }
}

fn opening_roles(label: EmotionLabel) -> &'static [ResponseRole] {
    match label {
        EmotionLabel::Anger | EmotionLabel::Fear | EmotionLabel::Sadness | EmotionLabel::Disgust => {
            OPENING_NEGATIVE
        }
        EmotionLabel::Joy | EmotionLabel::Surprise => OPENING_POSITIVE,
        EmotionLabel::Neutral => OPENING_NEUTRAL,
    }
}

fn pick<'a, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &'a [String],
    emotion: EmotionLabel,
    name: &'static str,
) -> Result<&'a str, ComposeError> {
    pool.choose(rng)
        .map(String::as_str)
        .ok_or(ComposeError::EmptyPool { emotion, pool: name })
}

/// The first topic clause whose keywords appear as whole words in `text`.
pub fn topic_clause(text: &str) -> Option<&'static str> {
    TOPIC_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, clause)| *clause)
}

#[derive(Debug, Clone)]
pub struct ResponseComposer {
    bank: TemplateBank,
    personalize: bool,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(TemplateBank::default())
    }
}

impl ResponseComposer {
    pub fn new(bank: TemplateBank) -> Self {
        Self {
            bank,
            personalize: false,
        }
    }

    pub fn from_config(config: &FeelBotConfig) -> Self {
        Self::default().with_personalization(config.personalize)
    }

    pub fn with_personalization(mut self, enabled: bool) -> Self {
        self.personalize = enabled;
        self
    }

    pub fn bank(&self) -> &TemplateBank {
        &self.bank
    }

    /// Compose a reply using the thread-local generator.
    pub fn compose(
        &self,
        user_input: &str,
        primary: EmotionLabel,
        sentiment: SentimentLabel,
        scores: &EmotionScores,
    ) -> String {
        self.compose_with_rng(&mut rand::thread_rng(), user_input, primary, sentiment, scores)
    }

    /// Compose a reply with an explicit random source. Never fails.
    pub fn compose_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        user_input: &str,
        primary: EmotionLabel,
        sentiment: SentimentLabel,
        scores: &EmotionScores,
    ) -> String {
        match self.try_compose(rng, user_input, primary, scores) {
            Ok(reply) => {
                tracing::debug!(emotion = %primary, sentiment = %sentiment, len = reply.len(), "composed reply");
                reply
            }
            Err(e) => {
                tracing::warn!(emotion = %primary, error = %e, "reply composition failed, using fallback");
                fallback_reply(primary)
            }
        }
    }

    fn try_compose<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        user_input: &str,
        primary: EmotionLabel,
        scores: &EmotionScores,
    ) -> Result<String, ComposeError> {
        let mut parts: Vec<&str> = Vec::with_capacity(3);

        if let Some((_, pool)) = self.bank.first_available(primary, opening_roles(primary)) {
            parts.push(pick(rng, pool, primary, "opening")?);
        }

        if let Some(role) = body_role(primary) {
            if let Some(pool) = self.bank.role(primary, role) {
                parts.push(pick(rng, pool, primary, "body")?);
            }
        }

        parts.push(pick(rng, self.bank.follow_ups(primary), primary, "follow-up")?);

        let mut reply = match parts.as_slice() {
            [only] => only.to_string(),
            [first, second] => format!("{} {}", first, second),
            [first, rest @ ..] => {
                let transition = pick(rng, self.bank.transitions(), primary, "transition")?;
                format!("{} {} {}", first, transition, rest.join(" "))
            }
            [] => unreachable!("a follow-up is always pushed"),
        };

        let intense = scores.values().copied().fold(f64::NEG_INFINITY, f64::max) > INTENSITY_THRESHOLD;
        if intense {
            reply = self.add_intensity(rng, reply, primary)?;
        }

        if self.personalize {
            if let Some(clause) = topic_clause(user_input) {
                reply.push(' ');
                reply.push_str(clause);
            }
        }

        Ok(reply)
    }

    fn add_intensity<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mut reply: String,
        primary: EmotionLabel,
    ) -> Result<String, ComposeError> {
        match primary {
            EmotionLabel::Joy => {
                if !reply.ends_with(['!', '?']) {
                    reply.push('!');
                }
            }
            EmotionLabel::Anger | EmotionLabel::Fear | EmotionLabel::Sadness => {
                let addition = pick(rng, self.bank.empathy_additions(), primary, "empathy")?;
                reply.push(' ');
                reply.push_str(addition);
            }
            EmotionLabel::Surprise => {
                if !reply.contains('!') {
                    reply = reply.replace('.', "!");
                }
            }
            EmotionLabel::Disgust | EmotionLabel::Neutral => {}
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::emotion::EmotionCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn one(category: EmotionCategory, score: f64) -> EmotionScores {
        EmotionScores::from([(category, score)])
    }

    fn pool(bank: &TemplateBank, label: EmotionLabel, role: ResponseRole) -> Vec<String> {
        bank.role(label, role).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn same_seed_same_reply() {
        let composer = ResponseComposer::default();
        let scores = one(EmotionCategory::Anger, 0.4);
        let a = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(42),
            "I am furious",
            EmotionLabel::Anger,
            SentimentLabel::Negative,
            &scores,
        );
        let b = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(42),
            "I am furious",
            EmotionLabel::Anger,
            SentimentLabel::Negative,
            &scores,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn replies_vary_across_seeds() {
        let composer = ResponseComposer::default();
        let scores = EmotionScores::new();
        let replies: std::collections::HashSet<String> = (0..40)
            .map(|seed| {
                composer.compose_with_rng(
                    &mut StdRng::seed_from_u64(seed),
                    "hello",
                    EmotionLabel::Neutral,
                    SentimentLabel::Neutral,
                    &scores,
                )
            })
            .collect();
        assert!(replies.len() > 1, "40 seeds produced a single reply");
    }

    #[test]
    fn anger_reply_has_opening_transition_calming_and_question() {
        let composer = ResponseComposer::default();
        let bank = composer.bank();
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(7),
            "this is unfair",
            EmotionLabel::Anger,
            SentimentLabel::Negative,
            &one(EmotionCategory::Anger, 0.5),
        );

        let opening = pool(bank, EmotionLabel::Anger, ResponseRole::Acknowledgment);
        let opener = opening.iter().find(|o| reply.starts_with(o.as_str()));
        let opener = opener.unwrap_or_else(|| panic!("no acknowledgment opens {:?}", reply));
        let after = &reply[opener.len() + 1..];
        assert!(
            bank.transitions().iter().any(|t| after.starts_with(t.as_str())),
            "expected a transition after the opening: {:?}",
            reply
        );
        assert!(pool(bank, EmotionLabel::Anger, ResponseRole::Calming)
            .iter()
            .any(|c| reply.contains(c.as_str())));
        assert!(bank
            .follow_ups(EmotionLabel::Anger)
            .iter()
            .any(|q| reply.ends_with(q.as_str())));
    }

    #[test]
    fn neutral_reply_is_two_parts_without_transition() {
        let composer = ResponseComposer::default();
        let bank = composer.bank();
        for seed in 0..20 {
            let reply = composer.compose_with_rng(
                &mut StdRng::seed_from_u64(seed),
                "ok",
                EmotionLabel::Neutral,
                SentimentLabel::Neutral,
                &EmotionScores::new(),
            );
            let engagement = pool(bank, EmotionLabel::Neutral, ResponseRole::Engagement);
            let opener = engagement
                .iter()
                .find(|e| reply.starts_with(e.as_str()))
                .unwrap_or_else(|| panic!("no engagement opens {:?}", reply));
            let rest = &reply[opener.len() + 1..];
            assert!(
                bank.follow_ups(EmotionLabel::Neutral).iter().any(|q| q == rest),
                "neutral reply should be engagement + follow-up, got {:?}",
                reply
            );
            assert!(reply.ends_with('?'));
        }
    }

    #[test]
    fn sadness_opens_with_empathy() {
        let composer = ResponseComposer::default();
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(3),
            "I miss her",
            EmotionLabel::Sadness,
            SentimentLabel::Negative,
            &one(EmotionCategory::Sadness, 0.3),
        );
        let empathy = pool(composer.bank(), EmotionLabel::Sadness, ResponseRole::Empathy);
        assert!(empathy.iter().any(|e| reply.starts_with(e.as_str())), "{:?}", reply);
        assert!(reply.ends_with('?'));
    }

    #[test]
    fn intense_sadness_appends_empathy_line() {
        let composer = ResponseComposer::default();
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(11),
            "I am heartbroken",
            EmotionLabel::Sadness,
            SentimentLabel::Negative,
            &one(EmotionCategory::Sadness, 0.9),
        );
        assert!(
            composer
                .bank()
                .empathy_additions()
                .iter()
                .any(|line| reply.ends_with(line.as_str())),
            "intense sadness should end with an empathy line: {:?}",
            reply
        );
    }

    #[test]
    fn intensity_needs_strictly_more_than_threshold() {
        let composer = ResponseComposer::default();
        for seed in 0..10 {
            let reply = composer.compose_with_rng(
                &mut StdRng::seed_from_u64(seed),
                "I am scared",
                EmotionLabel::Fear,
                SentimentLabel::Negative,
                &one(EmotionCategory::Fear, 0.7),
            );
            assert!(reply.ends_with('?'), "0.7 is not intense: {:?}", reply);
        }
    }

    #[test]
    fn intense_surprise_turns_periods_into_bangs() {
        let mut bank = TemplateBank::empty();
        bank.insert_role(
            EmotionLabel::Surprise,
            ResponseRole::Excitement,
            vec!["Well. That is new.".to_string()],
        );
        bank.set_follow_ups(EmotionLabel::Surprise, vec!["What now?".to_string()]);
        let composer = ResponseComposer::new(bank);
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(0),
            "wow",
            EmotionLabel::Surprise,
            SentimentLabel::Positive,
            &one(EmotionCategory::Surprise, 1.2),
        );
        assert_eq!(reply, "Well! That is new! What now?");
    }

    #[test]
    fn intense_surprise_keeps_existing_bang() {
        let mut bank = TemplateBank::empty();
        bank.insert_role(
            EmotionLabel::Surprise,
            ResponseRole::Excitement,
            vec!["Wow! Really.".to_string()],
        );
        bank.set_follow_ups(EmotionLabel::Surprise, vec!["Why?".to_string()]);
        let composer = ResponseComposer::new(bank);
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(0),
            "wow",
            EmotionLabel::Surprise,
            SentimentLabel::Positive,
            &one(EmotionCategory::Surprise, 1.2),
        );
        assert_eq!(reply, "Wow! Really. Why?");
    }

    #[test]
    fn intense_joy_keeps_question_tail() {
        let composer = ResponseComposer::default();
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(5),
            "best day ever",
            EmotionLabel::Joy,
            SentimentLabel::Positive,
            &one(EmotionCategory::Joy, 2.0),
        );
        assert!(reply.ends_with('?'));
        assert!(!reply.ends_with("?!"));
    }

    #[test]
    fn intense_joy_adds_bang_to_flat_tail() {
        let mut bank = TemplateBank::empty();
        bank.set_follow_ups(EmotionLabel::Joy, vec!["Good for you.".to_string()]);
        let composer = ResponseComposer::new(bank);
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(0),
            "yay",
            EmotionLabel::Joy,
            SentimentLabel::Positive,
            &one(EmotionCategory::Joy, 0.8),
        );
        assert_eq!(reply, "Good for you.!");
    }

    #[test]
    fn empty_pool_falls_back() {
        let mut bank = TemplateBank::default();
        bank.insert_role(EmotionLabel::Anger, ResponseRole::Calming, Vec::new());
        let composer = ResponseComposer::new(bank);
        let reply = composer.compose_with_rng(
            &mut StdRng::seed_from_u64(1),
            "grr",
            EmotionLabel::Anger,
            SentimentLabel::Negative,
            &one(EmotionCategory::Anger, 0.5),
        );
        assert_eq!(reply, fallback_reply(EmotionLabel::Anger));
        assert!(reply.contains("feeling anger"));
    }

    #[test]
    fn missing_follow_ups_everywhere_falls_back() {
        let mut bank = TemplateBank::default();
        for label in EmotionLabel::ALL {
            bank.remove_follow_ups(label);
        }
        let composer = ResponseComposer::new(bank);
        let reply = composer.compose("hi", EmotionLabel::Joy, SentimentLabel::Positive, &EmotionScores::new());
        assert_eq!(reply, fallback_reply(EmotionLabel::Joy));
    }

    #[test]
    fn personalization_matches_whole_words_only() {
        assert_eq!(
            topic_clause("My boss yelled at me"),
            Some("Work situations can be especially challenging to navigate.")
        );
        assert_eq!(topic_clause("I ate a dadaist sandwich"), None);
        assert_eq!(topic_clause("I have a test and my mom is sick"), Some("Family relationships can bring up such complex emotions."));
        assert_eq!(topic_clause("nothing relevant"), None);
    }

    #[test]
    fn personalization_is_opt_in() {
        let scores = one(EmotionCategory::Fear, 0.4);
        let plain = ResponseComposer::default().compose_with_rng(
            &mut StdRng::seed_from_u64(9),
            "my exam is tomorrow",
            EmotionLabel::Fear,
            SentimentLabel::Negative,
            &scores,
        );
        assert!(plain.ends_with('?'));

        let config = FeelBotConfig {
            personalize: true,
            ..FeelBotConfig::default()
        };
        let personal = ResponseComposer::from_config(&config).compose_with_rng(
            &mut StdRng::seed_from_u64(9),
            "my exam is tomorrow",
            EmotionLabel::Fear,
            SentimentLabel::Negative,
            &scores,
        );
        assert_eq!(personal, format!("{} Academic pressure can really weigh on us.", plain));
    }
}
