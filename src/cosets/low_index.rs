// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use tracing::{debug, info, trace};

use crate::cosets::canonical::is_canonical;
use crate::cosets::table::PartialTable;
use crate::cosets::todd_coxeter::{ScanOutcome, scan_and_deduce};
use crate::{CosetTable, Presentation, TableLike, Word};

/// One unit of work of a [`LowIndexTables`] search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A complete canonical table was found.
    Yielded(CosetTable),
    /// A partial table was expanded, pushing this many children.
    Expanded(usize),
    /// The search space is exhausted.
    Exhausted,
}

/// Lazy enumeration of the subgroups of index at most `max_cosets` of a
/// finitely presented group, up to conjugacy, as canonical coset tables.
///
/// The search is depth first over partial tables. Each node fills the first
/// undefined entry with every existing coset that can still take it, and
/// with a new coset while the bound allows, then propagates deductions from
/// the relators. Branches forcing a coincidence are dropped, as are branches
/// whose partial table is already known not to be canonical. Every yielded
/// table is complete, closed under the relators, and canonical.
///
/// Cloning the iterator snapshots the search, so it can be resumed from any
/// point.
///
/// # Examples
/// ```rust
/// use fpgroups::{Presentation, low_index_tables};
///
/// // Symmetric group of order 6: the whole group, the alternating subgroup,
/// // one class of subgroups of order 2, and the trivial subgroup.
/// let s3 = Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2, 1, 2]])
///     .unwrap();
/// let mut degrees: Vec<usize> = low_index_tables(&s3, 6).map(|table| table.len()).collect();
/// degrees.sort();
/// assert_eq!(degrees, vec![1, 2, 3, 6]);
/// ```
#[derive(Clone, Debug)]
pub struct LowIndexTables {
    relators: Vec<Word>,
    max_cosets: usize,
    stack: Vec<PartialTable>,
    nodes_visited: usize,
}

impl LowIndexTables {
    /// Start a search over the tables of degree at most `max_cosets`.
    pub fn new(presentation: &Presentation, max_cosets: usize) -> Self {
        let relators = presentation.relator_permutations();
        let mut root = PartialTable::new(presentation.nr_generators());
        let stack = if max_cosets > 0 && scan_recursively(&mut root, &relators, 0) {
            vec![root]
        } else {
            Vec::new()
        };
        info!(
            "Searching for subgroups of index at most {max_cosets} using {} relator permutations",
            relators.len()
        );

        Self {
            relators,
            max_cosets,
            stack,
            nodes_visited: 0,
        }
    }

    /// Number of partial tables popped from the work stack so far.
    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    /// Pop one partial table and either yield it, if complete, or replace it
    /// by its surviving children.
    pub fn step(&mut self) -> Step {
        let Some(table) = self.stack.pop() else {
            return Step::Exhausted;
        };
        self.nodes_visited += 1;

        let Some((coset, generator)) = table.first_undefined() else {
            let degree = table.len();
            return match table.into_complete() {
                Some(complete) => {
                    debug!("Found a subgroup of index {degree}");
                    Step::Yielded(complete)
                }
                None => unreachable!("table without undefined entries is incomplete"),
            };
        };

        let children = self.children(&table, coset, generator);
        trace!(
            "Expanded entry {coset}·{generator} of a table with {} cosets into {} children",
            table.len(),
            children.len()
        );
        let count = children.len();
        self.stack.extend(children.into_iter().rev());
        Step::Expanded(count)
    }

    fn children(&self, table: &PartialTable, coset: usize, generator: i32) -> Vec<PartialTable> {
        let len = table.len();
        let mut candidates: Vec<usize> = (coset..len)
            .filter(|&target| table.get(target, -generator).is_none())
            .collect();
        if len < self.max_cosets {
            candidates.push(len);
        }

        let mut children = Vec::with_capacity(candidates.len());
        for target in candidates {
            let mut child = table.clone();
            if target == len {
                child.push_row();
            }
            child.define(coset, generator, target);
            if scan_recursively(&mut child, &self.relators, coset) && is_canonical(&child) {
                children.push(child);
            }
        }
        children
    }
}

impl Iterator for LowIndexTables {
    type Item = CosetTable;

    fn next(&mut self) -> Option<CosetTable> {
        loop {
            match self.step() {
                Step::Yielded(table) => return Some(table),
                Step::Expanded(_) => continue,
                Step::Exhausted => return None,
            }
        }
    }
}

/// Scan every relator permutation at `start` and at the head of every
/// deduction this triggers. Returns false if some relator forces two distinct
/// cosets to coincide.
fn scan_recursively(table: &mut PartialTable, relators: &[Word], start: usize) -> bool {
    let mut queue = VecDeque::from([start]);
    while let Some(coset) = queue.pop_front() {
        for relator in relators {
            match scan_and_deduce(table, &mut |id| id, relator, coset) {
                ScanOutcome::Deduced { head, .. } => queue.push_back(head),
                ScanOutcome::Coincidence { .. } => return false,
                ScanOutcome::Closed | ScanOutcome::Incomplete => (),
            }
        }
    }
    true
}

/// Enumerate the subgroups of index at most `max_cosets` up to conjugacy; see
/// [`LowIndexTables`].
pub fn low_index_tables(presentation: &Presentation, max_cosets: usize) -> LowIndexTables {
    LowIndexTables::new(presentation, max_cosets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(presentation: &Presentation, max_cosets: usize) -> Vec<usize> {
        let mut degrees: Vec<usize> = low_index_tables(presentation, max_cosets)
            .map(|table| table.len())
            .collect();
        degrees.sort();
        degrees
    }

    #[test]
    fn klein_four() {
        let klein =
            Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap();
        assert_eq!(degrees(&klein, 8), vec![1, 2, 2, 2, 4]);
        assert_eq!(degrees(&klein, 3), vec![1, 2, 2, 2]);
    }

    #[test]
    fn cyclic_three() {
        let cyclic = Presentation::from_letters(1, [vec![1, 1, 1]]).unwrap();
        assert_eq!(degrees(&cyclic, 3), vec![1, 3]);
        assert_eq!(degrees(&cyclic, 2), vec![1]);
    }

    #[test]
    fn infinite_cyclic() {
        let integers = Presentation::from_letters(1, Vec::<Vec<i32>>::new()).unwrap();
        assert_eq!(degrees(&integers, 3), vec![1, 2, 3]);
    }

    #[test]
    fn first_table_is_trivial_action() {
        let cyclic = Presentation::from_letters(1, [vec![1, 1, 1]]).unwrap();
        let first = low_index_tables(&cyclic, 3).next().unwrap();
        assert_eq!(first.rows(), &[vec![0, 0]]);
    }

    #[test]
    fn yielded_tables_are_canonical_and_closed() {
        let s3 = Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2, 1, 2]])
            .unwrap();
        for table in low_index_tables(&s3, 6) {
            assert!(is_canonical(&table));
            for relator in s3.relators() {
                for coset in 0..table.len() {
                    assert_eq!(table.act(coset, relator), coset);
                }
            }
        }
    }

    #[test]
    fn stepping_and_cloning() {
        let klein =
            Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap();
        let mut search = low_index_tables(&klein, 4);
        assert!(matches!(search.step(), Step::Expanded(_)));
        assert_eq!(search.nodes_visited(), 1);

        let snapshot = search.clone();
        let rest: Vec<CosetTable> = search.by_ref().collect();
        assert_eq!(rest.len(), 5);
        assert_eq!(snapshot.collect::<Vec<_>>(), rest);
        assert_eq!(search.step(), Step::Exhausted);
    }

    #[test]
    fn zero_bound() {
        let klein =
            Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap();
        assert_eq!(low_index_tables(&klein, 0).count(), 0);
    }
}
