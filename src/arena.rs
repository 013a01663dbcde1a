//! Minimal stand-in for the engine's per-step [bump arena](https://en.wikipedia.org/wiki/Region-based_memory_management).
//!
//! The real arena (lifecycle, byte layout, allocator primitives) is an
//! external collaborator out of scope for this crate; what *is* in scope is
//! the contract [`crate::build_islands`] relies on: a watermark that can be
//! read on entry and restored on failure, and a budget that allocation can
//! fail against. This type models exactly that, in word (`i32`-sized) units.

use thiserror::Error;

/// A saved position in an [`Arena`], obtained from [`Arena::mark`] and later
/// passed to [`Arena::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaMark(usize);

/// Raised when an allocation would exceed the arena's remaining budget.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("requested {requested} words but only {available} available")]
pub struct ArenaExhausted {
    pub requested: usize,
    pub available: usize,
}

/// A word-budgeted bump allocator. Allocation only ever grows the used-word
/// counter; [`Arena::rewind`] is the sole way to give words back, matching
/// a mark-scratch-rollback discipline.
#[derive(Debug)]
pub struct Arena {
    capacity: usize,
    used: usize,
}

impl Arena {
    /// Construct an arena with a fixed capacity, expressed in `i32`-sized words.
    pub fn with_capacity(capacity_words: usize) -> Self {
        Arena {
            capacity: capacity_words,
            used: 0,
        }
    }

    /// Total capacity in words.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Words not yet reserved.
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Snapshot the current watermark.
    pub fn mark(&self) -> ArenaMark {
        ArenaMark(self.used)
    }

    /// Restore a previously taken watermark, discarding anything allocated since.
    pub fn rewind(&mut self, mark: ArenaMark) {
        self.used = mark.0;
    }

    /// Reserve `words` words, or fail leaving the arena unchanged.
    pub fn reserve(&mut self, words: usize) -> Result<(), ArenaExhausted> {
        if words > self.remaining() {
            return Err(ArenaExhausted {
                requested: words,
                available: self.remaining(),
            });
        }
        self.used += words;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_consumes_budget() {
        let mut arena = Arena::with_capacity(10);
        arena.reserve(4).unwrap();
        assert_eq!(arena.remaining(), 6);
    }

    #[test]
    fn reserve_past_capacity_fails_and_leaves_arena_untouched() {
        let mut arena = Arena::with_capacity(10);
        arena.reserve(4).unwrap();
        let err = arena.reserve(7).unwrap_err();
        assert_eq!(err, ArenaExhausted { requested: 7, available: 6 });
        assert_eq!(arena.remaining(), 6);
    }

    #[test]
    fn rewind_restores_watermark() {
        let mut arena = Arena::with_capacity(10);
        let mark = arena.mark();
        arena.reserve(9).unwrap();
        arena.rewind(mark);
        assert_eq!(arena.remaining(), 10);
    }
}
