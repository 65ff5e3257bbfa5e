//! Offline stand-in for the detection API: a uniform random score, bucketed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Mutex;

use super::ScoringStrategy;
use crate::result::{CheckResult, RiskStatus};

/// Scores are drawn uniformly from this range.
pub const SCORE_RANGE: RangeInclusive<u32> = 1..=100;

/// Draw one score from `rng` and classify it.
pub fn simulate<R: Rng + ?Sized>(url: &str, rng: &mut R) -> CheckResult {
    let score = rng.gen_range(SCORE_RANGE);
    CheckResult::new(
        url,
        Some(f64::from(score)),
        Some(RiskStatus::from_score(score)),
    )
}

pub struct SimulatedScoringStrategy {
    rng: Mutex<StdRng>,
}

impl SimulatedScoringStrategy {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence, for tests and demos.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedScoringStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringStrategy for SimulatedScoringStrategy {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn score(&self, url: &str) -> CheckResult {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        simulate(url, &mut *rng)
    }
}
