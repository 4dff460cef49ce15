//! High-score persistence seam
//!
//! The rules only need "read one number at startup, write one number when it
//! grows". Real storage lives outside `core`; this module defines the trait and
//! an in-memory implementation for tests and benchmarks.

use std::convert::Infallible;
use std::fmt::Display;

/// Storage for the single persisted high score
pub trait ScoreStore {
    type Error: Display;

    /// Read the stored high score; `Ok(None)` when nothing has been stored yet
    fn load(&mut self) -> Result<Option<u32>, Self::Error>;

    /// Replace the stored high score
    fn store(&mut self, high_score: u32) -> Result<(), Self::Error>;
}

/// In-memory store that records how often it was written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value`
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    type Error = Infallible;

    fn load(&mut self) -> Result<Option<u32>, Self::Error> {
        Ok(self.value)
    }

    fn store(&mut self, high_score: u32) -> Result<(), Self::Error> {
        self.value = Some(high_score);
        self.writes += 1;
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    type Error = S::Error;

    fn load(&mut self) -> Result<Option<u32>, Self::Error> {
        (**self).load()
    }

    fn store(&mut self, high_score: u32) -> Result<(), Self::Error> {
        (**self).store(high_score)
    }
}
