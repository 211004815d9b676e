//! Fixed number of commits every day

use chrono::NaiveDate;

use super::{days_between, PatternSource};
use crate::types::{CommitLevel, Result};

pub struct DailyPattern {
    end_date: NaiveDate,
    level: CommitLevel,
}

impl DailyPattern {
    pub fn new(end_date: NaiveDate, level: CommitLevel) -> Self {
        Self { end_date, level }
    }
}

impl PatternSource for DailyPattern {
    fn name(&self) -> &str {
        "daily"
    }

    fn generate(&self, start: NaiveDate) -> Result<Vec<CommitLevel>> {
        let days = days_between(start, self.end_date)?;
        Ok(vec![self.level; days])
    }
}
