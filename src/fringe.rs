//! Bounded frontier queue with traffic statistics.
//!
//! The fringe holds search nodes scheduled for expansion. It is capped so a
//! runaway search fails fast with a typed error instead of exhausting memory,
//! and it counts its own traffic so both outcomes of a search can report how
//! much work the frontier saw.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

/// Default capacity bound of the fringe.
pub const MAX_FRINGE_SIZE: usize = 500_000;

/// Pop discipline of the fringe.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FringeMode {
    /// Pop the oldest push first: level order, what breadth-first search needs.
    Fifo,
    /// Pop the newest push first, for depth-first exploration.
    Lifo,
}

/// Snapshot of the fringe's traffic counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FringeStats {
    /// Items currently queued.
    pub size: usize,
    /// High-water mark of `size`.
    pub max_size: usize,
    /// Successful pushes over the fringe's lifetime.
    pub insertions: u64,
    /// Successful pops over the fringe's lifetime.
    pub deletions: u64,
}

impl fmt::Display for FringeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#### fringe statistics:")?;
        writeln!(f, "size: {:>15}", self.size)?;
        writeln!(f, "maximum size: {:>7}", self.max_size)?;
        writeln!(f, "insertions: {:>9}", self.insertions)?;
        writeln!(f, "deletions: {:>10}", self.deletions)
    }
}

/// Error returned by a push that would exceed the capacity bound.
///
/// Carries the final counter snapshot so the caller can report how far the
/// search got before giving up or retrying with a larger bound.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FringeOverflow {
    pub capacity: usize,
    pub stats: FringeStats,
}

impl fmt::Display for FringeOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trying to push onto a fringe that already contains its maximum of {} elements",
            self.capacity
        )
    }
}

impl Error for FringeOverflow {}

/// A bounded FIFO/LIFO queue with instance-scoped statistics.
pub struct Fringe<T> {
    items: VecDeque<T>,
    mode: FringeMode,
    capacity: usize,
    insertions: u64,
    deletions: u64,
    max_size: usize,
}

impl<T> Fringe<T> {
    /// Creates a fringe with the default capacity bound.
    pub fn new(mode: FringeMode) -> Self {
        Self::with_capacity(mode, MAX_FRINGE_SIZE)
    }

    /// Creates a fringe that refuses to grow past `capacity` items.
    pub fn with_capacity(mode: FringeMode, capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            mode,
            capacity,
            insertions: 0,
            deletions: 0,
            max_size: 0,
        }
    }

    /// Queues an item, or fails without inserting when the fringe is full.
    pub fn push(&mut self, item: T) -> Result<(), FringeOverflow> {
        if self.items.len() >= self.capacity {
            return Err(FringeOverflow {
                capacity: self.capacity,
                stats: self.stats(),
            });
        }
        self.items.push_back(item);
        if self.items.len() > self.max_size {
            self.max_size = self.items.len();
        }
        self.insertions += 1;
        Ok(())
    }

    /// Removes and returns the next item, or `None` when the fringe is empty.
    pub fn pop(&mut self) -> Option<T> {
        let item = match self.mode {
            FringeMode::Fifo => self.items.pop_front(),
            FringeMode::Lifo => self.items.pop_back(),
        };
        if item.is_some() {
            self.deletions += 1;
        }
        item
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current counter snapshot.
    pub fn stats(&self) -> FringeStats {
        FringeStats {
            size: self.items.len(),
            max_size: self.max_size,
            insertions: self.insertions,
            deletions: self.deletions,
        }
    }
}
