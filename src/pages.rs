// src/pages.rs
//! Which archive page ids to visit.
//!
//! `[start, stop)` is cut into `step`-sized buckets starting at `start`.
//! Each bucket whose lower edge is below `stop` yields one id: the lower
//! edge, or with `randomize` a uniform pick from the bucket clipped to
//! `stop`. So `(2, 4, 2)` gives `[2]` while `(2, 5, 2)` and `(2, 6, 2)`
//! both give `[2, 4]`.

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::error::{CorpusError, Result};

/// Lazy sequence of page ids. Re-create it to iterate again.
#[derive(Clone, Debug)]
pub struct Pages<R = ThreadRng> {
    next_low: u64,
    stop: u64,
    step: u64,
    randomize: bool,
    rng: R,
}

/// Page ids from `start` (inclusive) to `stop` (exclusive) every `step`.
/// `stop = None` means just `start`. `start` must be at least 1 and `step`
/// positive.
pub fn pages(start: u32, stop: Option<u32>, step: i64, randomize: bool) -> Result<Pages<ThreadRng>> {
    Pages::with_rng(start, stop, step, randomize, rand::thread_rng())
}

impl<R: Rng> Pages<R> {
    /// As [`pages`], drawing bucket picks from `rng`.
    pub fn with_rng(start: u32, stop: Option<u32>, step: i64, randomize: bool, rng: R) -> Result<Self> {
        if step <= 0 {
            return Err(CorpusError::InvalidStep(step));
        }
        if start == 0 {
            return Err(CorpusError::InvalidStart(start));
        }
        let start = u64::from(start);
        let stop = stop.map_or(start + 1, u64::from);
        Ok(Self {
            next_low: start,
            stop,
            step: step as u64,
            randomize,
            rng,
        })
    }

    fn remaining(&self) -> usize {
        if self.next_low >= self.stop {
            return 0;
        }
        ((self.stop - self.next_low).div_ceil(self.step)) as usize
    }
}

impl<R: Rng> Iterator for Pages<R> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next_low >= self.stop {
            return None;
        }
        let low = self.next_low;
        self.next_low = low + self.step;

        let id = if self.randomize && self.step > 1 {
            let high = self.next_low.min(self.stop);
            self.rng.gen_range(low..high)
        } else {
            low
        };
        // Every pick is < stop <= u32::MAX.
        Some(id as u32)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<R: Rng> ExactSizeIterator for Pages<R> {}
