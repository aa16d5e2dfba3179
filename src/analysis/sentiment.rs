//! Rule-based valence sentiment.
//!
//! Each token with a known valence contributes its score. A negator within
//! the three preceding tokens flips and damps it; an intensifier right before
//! it pushes it away from zero. The summed valence is squashed into `[-1, 1]`
//! with `s / sqrt(s² + 15)`.

use std::collections::HashMap;

use crate::analysis::types::Polarity;
use crate::analysis::{tokenize, SentimentScorer};

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NEGATION_WINDOW: usize = 3;

const VALENCES: &[(&str, f64)] = &[
    ("good", 1.9),
    ("great", 3.1),
    ("love", 3.2),
    ("loved", 2.9),
    ("like", 1.5),
    ("happy", 2.7),
    ("glad", 2.0),
    ("nice", 1.8),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("wonderful", 2.7),
    ("fun", 2.3),
    ("best", 3.2),
    ("beautiful", 2.9),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("hope", 1.9),
    ("safe", 1.9),
    ("trust", 2.3),
    ("win", 2.8),
    ("proud", 2.1),
    ("calm", 1.3),
    ("friend", 2.2),
    ("smile", 1.5),
    ("yes", 1.7),
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("hate", -2.7),
    ("hated", -3.2),
    ("sad", -2.1),
    ("angry", -2.3),
    ("upset", -1.6),
    ("worst", -3.1),
    ("ugly", -2.3),
    ("boring", -1.3),
    ("stupid", -2.4),
    ("afraid", -2.2),
    ("scared", -1.9),
    ("fear", -2.2),
    ("lonely", -1.8),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("sick", -1.7),
    ("tired", -1.9),
    ("lie", -1.6),
    ("scam", -2.3),
    ("fraud", -2.8),
    ("kill", -3.7),
    ("war", -2.9),
    ("problem", -1.7),
    ("wrong", -2.1),
    ("fail", -2.5),
    ("lost", -1.3),
    ("no", -1.2),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "without",
    "cannot", "dont", "isnt", "wasnt", "aint",
    // tail of n't contractions after tokenization ("don't" -> "don", "t")
    "t",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("absolutely", BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("kinda", -BOOSTER_INCREMENT),
];

#[derive(Debug, Clone)]
pub struct ValenceSentiment {
    valences: HashMap<String, f64>,
}

impl Default for ValenceSentiment {
    fn default() -> Self {
        Self::with_valences(VALENCES.iter().map(|(w, v)| (w.to_string(), *v)))
    }
}

impl ValenceSentiment {
    pub fn with_valences(valences: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            valences: valences.into_iter().collect(),
        }
    }

    fn token_score(&self, tokens: &[String], i: usize) -> Option<f64> {
        let mut score = *self.valences.get(&tokens[i])?;

        if i > 0 {
            if let Some((_, boost)) = BOOSTERS.iter().find(|(b, _)| *b == tokens[i - 1]) {
                score += boost * score.signum();
            }
        }

        let start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[start..i].iter().any(|t| NEGATIONS.contains(&t.as_str())) {
            score *= NEGATION_SCALAR;
        }
        Some(score)
    }
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

impl SentimentScorer for ValenceSentiment {
    fn polarity(&self, text: &str) -> Polarity {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Polarity::default();
        }

        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for i in 0..tokens.len() {
            match self.token_score(&tokens, i) {
                Some(s) if s > 0.0 => pos += s + 1.0,
                Some(s) if s < 0.0 => neg += s - 1.0,
                _ => neu += 1.0,
            }
        }

        let mut sum: f64 = (0..tokens.len())
            .filter_map(|i| self.token_score(&tokens, i))
            .sum();
        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += bangs * EXCLAMATION_INCREMENT * sum.signum();
        }

        let total = pos + neg.abs() + neu;
        Polarity {
            neg: round3(neg.abs() / total),
            neu: round3(neu / total),
            pos: round3(pos / total),
            compound: round4(normalize(sum)),
        }
    }
}
