use crate::error::{ChainError, Result};

/// A validated walk over block heights, from `start` toward `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    start: i64,
    end: i64,
    step: i64,
}

impl BlockRange {
    /// Counting up (`start < end`) needs `step > 0`. Counting down turns any
    /// `step >= 1` into `-1` and otherwise needs `step < 0`. `start == end`
    /// is an empty range whatever the step. `end` is exclusive, so counting
    /// down to `-1` includes the genesis block.
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self> {
        let step = if start < end {
            if step <= 0 {
                return Err(ChainError::InvalidStepDirection { start, end, step });
            }
            step
        } else if start > end {
            if step >= 1 {
                -1
            } else if step == 0 {
                return Err(ChainError::InvalidStepDirection { start, end, step });
            } else {
                step
            }
        } else {
            step
        };

        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Effective step after direction rules were applied.
    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn is_ascending(&self) -> bool {
        self.start < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of heights the walk visits.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let distance = self.start.abs_diff(self.end);
        let stride = self.step.unsigned_abs();
        distance.div_ceil(stride) as usize
    }

    fn contains_cursor(&self, cursor: i64) -> bool {
        if self.is_ascending() {
            cursor < self.end
        } else {
            cursor > self.end
        }
    }

    /// Heights in traversal order. Negative heights are yielded as-is; the
    /// walker records them as failed entries.
    pub fn heights(&self) -> impl Iterator<Item = i64> + use<> {
        let range = *self;
        std::iter::successors(Some(range.start), move |cursor| {
            cursor.checked_add(range.step)
        })
        .take_while(move |cursor| range.contains_cursor(*cursor))
    }
}
