//! Per-user bias profiles.
//!
//! Intensity is the mean *normalized* lexicon weight per category across a
//! user's messages. Direction is the mean sentiment of the messages whose
//! *raw* lexicon scoring touches a category. The two are separate queries
//! against the scorer and must stay that way.

use ndarray::Array1;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::analysis::types::{BiasProfile, CategoryScore};
use crate::analysis::{LexiconScorer, SentimentScorer};
use crate::error::{LogError, LogResult};
use crate::memory::log::{read_path, LogStore};

/// Label used for cross-user averages.
pub const AVERAGE_LABEL: &str = "Average";

/// Shared folder owner for a suffixed id: the part before the first `_`.
pub fn base_user_id(user_id: &str) -> &str {
    user_id.split('_').next().unwrap_or(user_id)
}

pub struct BiasAnalyzer<'a> {
    store: &'a LogStore,
    lexicon: &'a dyn LexiconScorer,
    sentiment: &'a dyn SentimentScorer,
}

impl<'a> BiasAnalyzer<'a> {
    pub fn new(
        store: &'a LogStore,
        lexicon: &'a dyn LexiconScorer,
        sentiment: &'a dyn SentimentScorer,
    ) -> Self {
        Self {
            store,
            lexicon,
            sentiment,
        }
    }

    /// Log holding `user_id`'s messages in `room`: the user's own folder if
    /// it has that room, else the folder of [`base_user_id`]. Ids that cannot
    /// name a folder have no log.
    pub fn owner_log(&self, user_id: &str, room: &str) -> LogResult<Option<PathBuf>> {
        for owner in [user_id, base_user_id(user_id)] {
            match self.store.log_path(owner, room) {
                Ok(path) if path.exists() => return Ok(Some(path)),
                Ok(_) | Err(LogError::InvalidName { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Contents of the messages in `room` whose `user_id` is exactly `user_id`.
    pub fn user_texts(&self, user_id: &str, room: &str) -> LogResult<Vec<String>> {
        let Some(path) = self.owner_log(user_id, room)? else {
            return Ok(Vec::new());
        };
        let read = read_path(&path)?;
        Ok(read
            .nodes
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .map(|n| n.content)
            .collect())
    }

    /// Mean normalized category weights. No messages gives an empty profile.
    pub fn analyze_user(&self, user_id: &str, room: &str) -> LogResult<BiasProfile> {
        let texts = self.user_texts(user_id, room)?;
        if texts.is_empty() {
            return Ok(BiasProfile::empty(user_id));
        }

        let categories = self.lexicon.categories();
        let mut sum = Array1::<f64>::zeros(categories.len());
        for text in &texts {
            let scores = self.lexicon.analyze(text, true);
            let row: Array1<f64> = categories
                .iter()
                .map(|c| scores.get(c).copied().unwrap_or(0.0))
                .collect();
            sum += &row;
        }
        let mean = sum / texts.len() as f64;

        tracing::debug!(user = %user_id, room = %room, messages = texts.len(), "bias profile built");
        Ok(BiasProfile {
            user_id: user_id.to_string(),
            samples: texts.len(),
            means: categories.into_iter().zip(mean.iter().copied()).collect(),
        })
    }

    /// Mean compound sentiment (4 decimals) of the messages whose raw lexicon
    /// weight for `category` is positive. `None` when no message qualifies.
    pub fn detect_bias_direction(
        &self,
        user_id: &str,
        category: &str,
        room: &str,
    ) -> LogResult<Option<f64>> {
        let texts = self.user_texts(user_id, room)?;
        let scores: Vec<f64> = texts
            .iter()
            .filter(|t| {
                self.lexicon
                    .analyze(t, false)
                    .get(category)
                    .is_some_and(|w| *w > 0.0)
            })
            .map(|t| self.sentiment.polarity(t).compound)
            .collect();

        if scores.is_empty() {
            return Ok(None);
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(Some(round4(mean)))
    }

    /// Top `top_k` categories of the user's profile with their direction.
    pub fn bias_report(&self, user_id: &str, room: &str, top_k: usize) -> LogResult<Vec<CategoryScore>> {
        let profile = self.analyze_user(user_id, room)?;
        rank_categories(&profile, top_k)
            .into_iter()
            .map(|(category, intensity)| -> LogResult<CategoryScore> {
                let sentiment = self.detect_bias_direction(user_id, &category, room)?;
                Ok(CategoryScore {
                    category,
                    intensity,
                    sentiment,
                })
            })
            .collect()
    }

    /// Profiles of the users seen in `room` that have messages.
    fn profiled_users(&self, room: &str) -> LogResult<Vec<BiasProfile>> {
        let mut profiles = Vec::new();
        for user in self.store.users_in_room(room)? {
            let profile = self.analyze_user(&user, room)?;
            if !profile.is_empty() {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    /// Mean of the per-user profiles of every user seen in `room`. Users
    /// without messages do not contribute.
    pub fn average_profile(&self, room: &str) -> LogResult<BiasProfile> {
        Ok(average_of(&self.profiled_users(room)?))
    }

    /// Ranked averages, each paired with the mean direction across the users
    /// that contributed to the average (a user with no qualifying message
    /// counts as 0.0).
    pub fn average_report(&self, room: &str, top_k: usize) -> LogResult<Vec<CategoryScore>> {
        let profiles = self.profiled_users(room)?;
        let average = average_of(&profiles);

        let mut rows = Vec::new();
        for (category, intensity) in rank_categories(&average, top_k) {
            let mut total = 0.0;
            for profile in &profiles {
                total += self
                    .detect_bias_direction(&profile.user_id, &category, room)?
                    .unwrap_or(0.0);
            }
            let sentiment = if profiles.is_empty() {
                None
            } else {
                Some(total / profiles.len() as f64)
            };
            rows.push(CategoryScore {
                category,
                intensity,
                sentiment,
            });
        }
        Ok(rows)
    }
}

/// Highest-intensity categories first; ties by category name.
pub fn rank_categories(profile: &BiasProfile, top_k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = profile
        .means
        .iter()
        .map(|(c, v)| (c.clone(), *v))
        .collect();
    // means is a BTreeMap, so a stable sort leaves ties in name order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_k);
    ranked
}

/// Component-wise mean of profiles. Missing categories count as 0.0.
pub fn average_of(profiles: &[BiasProfile]) -> BiasProfile {
    if profiles.is_empty() {
        return BiasProfile::empty(AVERAGE_LABEL);
    }
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for profile in profiles {
        for (category, value) in &profile.means {
            *sums.entry(category.clone()).or_insert(0.0) += value;
        }
    }
    let n = profiles.len() as f64;
    BiasProfile {
        user_id: AVERAGE_LABEL.to_string(),
        samples: profiles.len(),
        means: sums.into_iter().map(|(c, s)| (c, s / n)).collect(),
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
