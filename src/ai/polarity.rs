//! Lexicon polarity methods: two independent ways to score sentiment.
//!
//! `PatternPolarity` averages per-word polarity with intensifier and
//! negation modifiers, yielding a value in [-1, 1]. `CompoundPolarity`
//! sums valence ratings (roughly -4..4) with booster, caps, contrast and
//! punctuation rules, then squashes the sum with `x / sqrt(x² + 15)`.
//! The two disagree in useful ways, so the scorer averages them.

use super::sentiment::{PolarityMethod, SentimentError};
use std::collections::HashMap;
use std::path::Path;

// ── Tokenizing ─────────────────────────────────────────────

/// Split on whitespace and trim surrounding punctuation, keeping inner
/// apostrophes and hyphens ("don't", "mind-blowing").
fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .collect()
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot",
    "without", "aint", "dont", "cant", "wont", "isnt", "wasnt", "didnt", "doesnt",
];

fn is_negation(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.ends_with("n't") || NEGATIONS.contains(&lower.as_str())
}

// ── Pattern method ─────────────────────────────────────────

const PATTERN_LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("delighted", 0.7),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("excited", 0.375),
    ("fantastic", 0.4),
    ("fine", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("incredible", 0.9),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("okay", 0.5),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("thrilled", 0.6),
    ("wonderful", 1.0),
    ("afraid", -0.6),
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("crazy", -0.6),
    ("depressed", -0.3),
    ("disappointed", -0.75),
    ("disgusting", -1.0),
    ("frustrated", -0.4),
    ("furious", -0.5),
    ("gross", -0.3),
    ("hate", -0.8),
    ("hopeless", -0.5),
    ("horrible", -1.0),
    ("hurt", -0.2),
    ("lonely", -0.25),
    ("mad", -0.625),
    ("miserable", -1.0),
    ("nasty", -1.0),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scared", -0.3),
    ("sick", -0.7),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("tired", -0.4),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("upset", -0.3),
    ("weird", -0.5),
    ("worried", -0.3),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const PATTERN_INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.5),
    ("too", 1.2),
    ("totally", 1.4),
    ("very", 1.3),
    ("slightly", 0.7),
    ("somewhat", 0.8),
];

/// Averaged word polarity with intensifiers and negation.
#[derive(Debug, Clone)]
pub struct PatternPolarity {
    lexicon: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for PatternPolarity {
    fn default() -> Self {
        Self {
            lexicon: PATTERN_LEXICON.iter().map(|(w, p)| (w.to_string(), *p)).collect(),
            intensifiers: PATTERN_INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
        }
    }
}

impl PatternPolarity {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PolarityMethod for PatternPolarity {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let words: Vec<String> = tokens(text).iter().map(|t| t.to_lowercase()).collect();
        let mut assessments = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let Some(&base) = self.lexicon.get(word) else {
                continue;
            };
            let mut value = base;
            let mut lookback = i;

            if i > 0 {
                if let Some(&mult) = self.intensifiers.get(&words[i - 1]) {
                    value *= mult;
                    lookback = i - 1;
                }
            }
            // "not very good" negates through the intensifier
            if lookback > 0 && is_negation(&words[lookback - 1]) {
                value *= -0.5;
            }
            assessments.push(value.clamp(-1.0, 1.0));
        }

        if assessments.is_empty() {
            return Ok(0.0);
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        if !mean.is_finite() {
            return Err(SentimentError::NonFinite { method: self.name() });
        }
        Ok(mean.clamp(-1.0, 1.0))
    }
}

// ── Compound method ────────────────────────────────────────

const COMPOUND_LEXICON: &[(&str, f64)] = &[
    ("adore", 2.6),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("bliss", 2.7),
    ("brilliant", 2.8),
    ("celebrate", 2.7),
    ("cheerful", 2.5),
    ("cool", 1.3),
    ("delighted", 2.9),
    ("ecstatic", 2.3),
    ("enjoy", 2.2),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("hope", 1.9),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("laugh", 2.6),
    ("love", 3.2),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("okay", 0.9),
    ("party", 1.7),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("smile", 1.5),
    ("thanks", 1.9),
    ("thrilled", 1.9),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("yay", 2.4),
    ("afraid", -2.2),
    ("alarmed", -1.4),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("anxious", -1.0),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bitter", -1.8),
    ("boring", -1.3),
    ("cry", -2.1),
    ("crying", -2.1),
    ("damn", -1.7),
    ("depressed", -2.3),
    ("despair", -2.8),
    ("devastated", -3.1),
    ("disappointed", -1.9),
    ("disgusted", -2.4),
    ("disgusting", -2.4),
    ("dread", -2.0),
    ("fear", -2.2),
    ("frustrated", -2.4),
    ("furious", -2.7),
    ("gross", -2.1),
    ("grief", -2.2),
    ("hate", -2.7),
    ("heartbroken", -3.3),
    ("hell", -3.6),
    ("helpless", -2.0),
    ("hopeless", -2.0),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("idiot", -2.3),
    ("lonely", -1.5),
    ("mad", -2.2),
    ("miserable", -2.2),
    ("nasty", -2.6),
    ("nervous", -1.1),
    ("pain", -2.3),
    ("panic", -2.3),
    ("rage", -2.6),
    ("sad", -2.1),
    ("scared", -2.2),
    ("sick", -2.3),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("terrified", -3.0),
    ("tired", -1.9),
    ("ugh", -1.8),
    ("ugly", -2.3),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("vile", -3.1),
    ("worried", -1.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
    ("yuck", -1.5),
];

const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant, approximates the max expected summed valence.
const ALPHA: f64 = 15.0;

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "completely", "deeply", "especially", "extremely", "fully",
    "hugely", "incredibly", "really", "so", "super", "too", "totally", "truly", "utterly",
    "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "partly", "scarcely",
    "slightly", "somewhat",
];

fn booster_scalar(token: &str) -> Option<f64> {
    let lower = token.to_lowercase();
    if BOOSTERS_UP.contains(&lower.as_str()) {
        Some(BOOSTER_INCREMENT)
    } else if BOOSTERS_DOWN.contains(&lower.as_str()) {
        Some(-BOOSTER_INCREMENT)
    } else {
        None
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic()) && !token.chars().any(|c| c.is_lowercase())
}

/// Summed valence with rule adjustments, squashed into [-1, 1].
#[derive(Debug, Clone)]
pub struct CompoundPolarity {
    lexicon: HashMap<String, f64>,
}

impl Default for CompoundPolarity {
    fn default() -> Self {
        Self {
            lexicon: COMPOUND_LEXICON.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
        }
    }
}

impl CompoundPolarity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in lexicon extended (and overridden) by a lexicon file.
    ///
    /// The file uses the tab-separated `token<TAB>mean<TAB>...` layout of the
    /// common valence lexicon distributions; columns after the mean are ignored.
    pub fn with_lexicon_file(path: &Path) -> Result<Self, SentimentError> {
        let content = std::fs::read_to_string(path).map_err(|source| SentimentError::LexiconIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut method = Self::default();
        let added = method.extend_from_str(&content)?;
        tracing::debug!(path = %path.display(), entries = added, "loaded compound lexicon file");
        Ok(method)
    }

    /// Merge lexicon lines into this method; returns the number of entries read.
    pub fn extend_from_str(&mut self, content: &str) -> Result<usize, SentimentError> {
        let mut added = 0;
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let token = cols.next().unwrap_or_default().trim();
            let mean = cols.next().ok_or_else(|| SentimentError::LexiconParse {
                line: idx + 1,
                reason: "missing valence column".to_string(),
            })?;
            let valence: f64 = mean.trim().parse().map_err(|e| SentimentError::LexiconParse {
                line: idx + 1,
                reason: format!("invalid valence {:?}: {}", mean, e),
            })?;
            if token.is_empty() || !valence.is_finite() {
                return Err(SentimentError::LexiconParse {
                    line: idx + 1,
                    reason: "empty token or non-finite valence".to_string(),
                });
            }
            self.lexicon.insert(token.to_lowercase(), valence);
            added += 1;
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn punctuation_emphasis(text: &str) -> f64 {
        let exclamations = text.matches('!').count().min(4);
        let questions = text.matches('?').count();
        let question_amp = match questions {
            0 | 1 => 0.0,
            2 | 3 => questions as f64 * 0.18,
            _ => 0.96,
        };
        exclamations as f64 * 0.292 + question_amp
    }
}

impl PolarityMethod for CompoundPolarity {
    fn name(&self) -> &'static str {
        "compound"
    }

    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let words = tokens(text);
        if words.is_empty() {
            return Ok(0.0);
        }
        let caps_differential =
            words.iter().any(|w| is_all_caps(w)) && !words.iter().all(|w| is_all_caps(w));

        let mut valences = vec![0.0; words.len()];
        for (i, word) in words.iter().enumerate() {
            let lower = word.to_lowercase();
            if booster_scalar(word).is_some() {
                continue;
            }
            let Some(&base) = self.lexicon.get(&lower) else {
                continue;
            };
            let sign = base.signum();
            let mut valence = base;
            if caps_differential && is_all_caps(word) {
                valence += CAPS_INCREMENT * sign;
            }

            for distance in 1..=3usize {
                if i < distance {
                    break;
                }
                let prev = words[i - distance];
                if let Some(scalar) = booster_scalar(prev) {
                    let mut boost = scalar * sign;
                    if caps_differential && is_all_caps(prev) {
                        boost += CAPS_INCREMENT * sign;
                    }
                    // Boosters further away count for less
                    boost *= match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += boost;
                }
                if is_negation(prev) {
                    valence *= NEGATION_SCALAR;
                }
            }
            valences[i] = valence;
        }

        // Contrast: "..., but ..." weighs the second clause more
        if let Some(but_idx) = words.iter().position(|w| w.eq_ignore_ascii_case("but")) {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < but_idx {
                    *v *= 0.5;
                } else if i > but_idx {
                    *v *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += Self::punctuation_emphasis(text);
        } else if sum < 0.0 {
            sum -= Self::punctuation_emphasis(text);
        }

        let compound = sum / (sum * sum + ALPHA).sqrt();
        if !compound.is_finite() {
            return Err(SentimentError::NonFinite { method: self.name() });
        }
        Ok(compound.clamp(-1.0, 1.0))
    }
}
