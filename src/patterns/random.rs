//! Random number of commits every day

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{days_between, PatternSource};
use crate::types::{CommitLevel, Result};

pub struct RandomPattern {
    end_date: NaiveDate,
    seed: Option<u64>,
}

impl RandomPattern {
    pub fn new(end_date: NaiveDate) -> Self {
        Self {
            end_date,
            seed: None,
        }
    }

    /// Reproducible sequence for a given seed
    pub fn with_seed(end_date: NaiveDate, seed: u64) -> Self {
        Self {
            end_date,
            seed: Some(seed),
        }
    }
}

impl PatternSource for RandomPattern {
    fn name(&self) -> &str {
        "random"
    }

    fn generate(&self, start: NaiveDate) -> Result<Vec<CommitLevel>> {
        let days = days_between(start, self.end_date)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok((0..days)
            .map(|_| CommitLevel::ALL[rng.gen_range(0..CommitLevel::ALL.len())])
            .collect())
    }
}
