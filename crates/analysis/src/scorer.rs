use chrono::{DateTime, Utc};
use normalizer::NormalizedRepository;
use serde::Serialize;

/// Per-millisecond decay of the push term: a half-life of roughly a week.
pub const DECAY_RATE_PER_MS: f64 = 1.146e-9;
pub const WATCHER_WEIGHT: f64 = 1.314e7;
const MIN_CREATED_DELTA_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotnessWeights {
    pub push: f64,
    pub decay_rate: f64,
    pub watchers: f64,
}

impl Default for HotnessWeights {
    fn default() -> Self {
        Self {
            push: 1.0,
            decay_rate: DECAY_RATE_PER_MS,
            watchers: WATCHER_WEIGHT,
        }
    }
}

impl HotnessWeights {
    /// `push * e^(-decay * pushDelta) + watchers * count / createdDelta`, with
    /// deltas in milliseconds and never negative. A term whose timestamp did not parse
    /// contributes nothing, and the result is always finite.
    pub fn score(&self, repo: &NormalizedRepository, now: DateTime<Utc>) -> f64 {
        let push_term = repo
            .pushed_at
            .map(|pushed| {
                let delta = millis_between(pushed, now).max(0.0);
                self.push * (-self.decay_rate * delta).exp()
            })
            .unwrap_or(0.0);

        let watcher_term = repo
            .created_at
            .map(|created| {
                let delta = millis_between(created, now).max(MIN_CREATED_DELTA_MS);
                self.watchers * repo.raw.watchers as f64 / delta
            })
            .unwrap_or(0.0);

        finite_or_zero(push_term) + finite_or_zero(watcher_term)
    }
}

/// A repository with its score for the current cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRepository {
    pub repository: NormalizedRepository,
    pub hotness: f64,
}

impl RankedRepository {
    pub fn name(&self) -> &str {
        self.repository.name()
    }
}

pub fn hotness(repo: &NormalizedRepository, now: DateTime<Utc>) -> f64 {
    HotnessWeights::default().score(repo, now)
}

pub fn score_all(repos: Vec<NormalizedRepository>, now: DateTime<Utc>) -> Vec<RankedRepository> {
    let weights = HotnessWeights::default();
    repos
        .into_iter()
        .map(|repository| {
            let hotness = weights.score(&repository, now);
            RankedRepository {
                repository,
                hotness,
            }
        })
        .collect()
}

fn millis_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
