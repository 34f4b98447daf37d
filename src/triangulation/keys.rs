//! Canonical edge/face keys and the toggling boundary set
//!
//! The engines work on vertex indices, so an edge or face is identified by
//! its sorted index tuple. Toggling every edge (face) of the removed
//! simplices leaves exactly the cavity boundary: shared entries cancel.

use std::collections::HashMap;
use std::hash::Hash;

/// Sorted index pair
#[inline]
pub(crate) fn edge_key(a: usize, b: usize) -> [usize; 2] {
    if a <= b {
        [a, b]
    } else {
        [b, a]
    }
}

/// Sorted index triple
#[inline]
pub(crate) fn face_key(face: [usize; 3]) -> [usize; 3] {
    let mut key = face;
    key.sort_unstable();
    key
}

/// Set of boundary entries that cancel when seen twice
///
/// Keeps the orientation of the first occurrence and yields surviving
/// entries in first-seen order, so output does not depend on hash order.
#[derive(Debug)]
pub(crate) struct BoundarySet<K, V> {
    entries: Vec<Option<V>>,
    slots: HashMap<K, usize>,
}

impl<K: Hash + Eq, V> BoundarySet<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Add the entry, or remove it if its key is already present
    pub(crate) fn toggle(&mut self, key: K, value: V) {
        match self.slots.remove(&key) {
            Some(slot) => self.entries[slot] = None,
            None => {
                self.slots.insert(key, self.entries.len());
                self.entries.push(Some(value));
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_canonical() {
        assert_eq!(edge_key(3, 1), edge_key(1, 3));
        assert_eq!(face_key([5, 2, 9]), [2, 5, 9]);
        assert_eq!(face_key([9, 5, 2]), face_key([2, 9, 5]));
    }

    #[test]
    fn test_shared_edges_cancel() {
        // two triangles (0,1,2) and (2,1,3) share edge 1-2
        let mut set = BoundarySet::new();
        for (a, b) in [(0, 1), (1, 2), (2, 0), (2, 1), (1, 3), (3, 2)] {
            set.toggle(edge_key(a, b), (a, b));
        }
        assert_eq!(set.len(), 4);
        let remaining: Vec<_> = set.into_values().collect();
        assert_eq!(remaining, vec![(0, 1), (2, 0), (1, 3), (3, 2)]);
    }

    #[test]
    fn test_toggle_back_in() {
        let mut set = BoundarySet::new();
        set.toggle(edge_key(0, 1), (0, 1));
        set.toggle(edge_key(1, 0), (1, 0));
        set.toggle(edge_key(0, 1), (1, 0));
        let remaining: Vec<_> = set.into_values().collect();
        assert_eq!(remaining, vec![(1, 0)]);
    }
}
