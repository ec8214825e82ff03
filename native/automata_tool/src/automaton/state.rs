//! State types for automata.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state identifier: an index into the owning automaton's state arena.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set.
///
/// Iteration is always in ascending `StateId` order, which is what keeps
/// subset construction and exports reproducible.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state into the set.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, lowest id first.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Remove a state from the set.
    pub fn remove(&mut self, state: StateId) {
        let idx = state as usize;
        if idx < self.bits.len() {
            self.bits.set(idx, false);
        }
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Get a canonical representation for hashing (as a sorted vec).
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

// Equality is by membership; two sets with different capacities but the same
// members are equal.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        set.insert(3);
        set.insert(7);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(500));

        set.remove(3);
        set.remove(500);
        assert_eq!(set.to_vec(), vec![7]);
    }

    #[test]
    fn test_state_set_extend() {
        let mut set = StateSet::with_capacity(4);
        set.insert(1);
        set.insert(3);

        set.extend([2, 9, 3]);
        assert_eq!(set.to_vec(), vec![1, 2, 3, 9]);
    }

    #[test]
    fn test_state_set_intersects() {
        let a: StateSet = [1, 3, 5].into_iter().collect();
        let b: StateSet = [2, 5].into_iter().collect();
        let c: StateSet = [0, 2].into_iter().collect();
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let a = StateSet::singleton(2, 3);
        let b = StateSet::singleton(2, 64);
        assert_eq!(a, b);
        assert_ne!(a, StateSet::singleton(1, 3));
    }

    #[test]
    fn test_iteration_is_ordered() {
        let set: StateSet = [9, 0, 4].into_iter().collect();
        assert_eq!(set.to_vec(), vec![0, 4, 9]);
    }
}
