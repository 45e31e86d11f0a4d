//! Normalization Context
//!
//! Everything a normalization pass reads from its surroundings: the calendar
//! day treated as "today" and the jitter source for display filler.

use chrono::{Local, NaiveDate};
use lot_dashboard_core::{JitterSource, NoJitter};

use super::jitter::SeededJitter;

/// Per-pass inputs that would otherwise be ambient (clock, randomness)
pub struct NormalizeContext {
    pub today: NaiveDate,
    jitter: Box<dyn JitterSource>,
}

impl NormalizeContext {
    /// Context with an explicit day and jitter source
    pub fn new(today: NaiveDate, jitter: Box<dyn JitterSource>) -> Self {
        Self { today, jitter }
    }

    /// Context with an explicit day and seeded jitter
    pub fn seeded(today: NaiveDate, seed: u64) -> Self {
        Self::new(today, Box::new(SeededJitter::new(seed)))
    }

    /// Context with an explicit day and no jitter at all
    pub fn without_jitter(today: NaiveDate) -> Self {
        Self::new(today, Box::new(NoJitter))
    }

    /// Context for the local calendar day
    pub fn for_today(seed: u64) -> Self {
        Self::seeded(Local::now().date_naive(), seed)
    }

    /// Jitter source for this pass
    pub fn jitter(&mut self) -> &mut dyn JitterSource {
        self.jitter.as_mut()
    }
}

impl std::fmt::Debug for NormalizeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizeContext")
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}
