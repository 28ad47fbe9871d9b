// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Union-find over coset ids, recording which cosets have been identified.
///
/// The representative of each class is its smallest member. In particular the
/// base coset `0` always represents its own class, and a coset `c` is live
/// exactly when `find(c) == c`. Paths are shortened by halving during
/// [`Partition::find`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Partition {
    parent: Vec<usize>,
}

impl Partition {
    /// Create a partition of `size` singleton classes.
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    /// Add a new singleton class and return its id.
    pub fn push(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        id
    }

    /// Return the representative of the class of `id`.
    pub fn find(&mut self, mut id: usize) -> usize {
        while self.parent[id] != id {
            let grandparent = self.parent[self.parent[id]];
            self.parent[id] = grandparent;
            id = grandparent;
        }
        id
    }

    /// Check if `id` is the representative of its class.
    pub fn is_live(&self, id: usize) -> bool {
        self.parent[id] == id
    }

    /// Merge the classes of `a` and `b`. If they were distinct, return the
    /// surviving representative and the representative that was absorbed.
    pub fn union(&mut self, a: usize, b: usize) -> Option<(usize, usize)> {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return None;
        }

        let (survivor, absorbed) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[absorbed] = survivor;
        Some((survivor, absorbed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons() {
        let mut partition = Partition::new(4);
        for id in 0..4 {
            assert_eq!(partition.find(id), id);
            assert!(partition.is_live(id));
        }
    }

    #[test]
    fn smaller_id_survives() {
        let mut partition = Partition::new(5);
        assert_eq!(partition.union(3, 1), Some((1, 3)));
        assert_eq!(partition.union(4, 3), Some((1, 4)));
        assert_eq!(partition.find(4), 1);
        assert_eq!(partition.find(3), 1);
        assert!(!partition.is_live(3));
        assert!(partition.is_live(1));
    }

    #[test]
    fn base_coset_stays_live() {
        let mut partition = Partition::new(6);
        partition.union(4, 5);
        partition.union(2, 5);
        partition.union(5, 0);
        for id in [0, 2, 4, 5] {
            assert_eq!(partition.find(id), 0);
        }
        assert!(partition.is_live(0));
    }

    #[test]
    fn repeated_union_is_noop() {
        let mut partition = Partition::new(3);
        assert!(partition.union(0, 1).is_some());
        assert!(partition.union(1, 0).is_none());
        assert_eq!(partition.find(1), 0);
    }

    #[test]
    fn push_extends() {
        let mut partition = Partition::new(1);
        assert_eq!(partition.push(), 1);
        assert_eq!(partition.push(), 2);
        partition.union(2, 0);
        assert_eq!(partition.find(2), 0);
        assert_eq!(partition.find(1), 1);
    }
}
