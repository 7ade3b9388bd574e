// src/config/options.rs
use rand::rngs::ThreadRng;

use super::consts::*;
use crate::error::Result;
use crate::pages::Pages;

/// Which archive pages to visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeOptions {
    pub start: u32,
    /// Exclusive upper bound; `None` means just `start`.
    pub stop: Option<u32>,
    pub step: i64,
    /// Pick one random id per `step`-sized bucket instead of its lower edge.
    pub randomize: bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            stop: None,
            step: DEFAULT_STEP,
            randomize: false,
        }
    }
}

impl RangeOptions {
    pub fn single(id: u32) -> Self {
        Self { start: id, ..Self::default() }
    }

    pub fn span(start: u32, stop: u32, step: i64) -> Self {
        Self { start, stop: Some(stop), step, randomize: false }
    }

    pub fn pages(&self) -> Result<Pages<ThreadRng>> {
        crate::pages::pages(self.start, self.stop, self.step, self.randomize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    pub range: RangeOptions,
    /// Stop the run at the archive's "No game N in database" page.
    pub stop_at_end: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            range: RangeOptions::default(),
            stop_at_end: true,
        }
    }
}
