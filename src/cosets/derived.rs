// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::words::signed_generators;
use crate::{CosetTable, Word};

/// Breadth-first spanning tree of a complete table rooted at coset `0`,
/// following generators in table order. Entry `c` holds the coset and signed
/// generator through which `c` was first reached; the root has none.
///
/// Panics if the table is not transitive.
pub(crate) fn spanning_tree(table: &CosetTable) -> Vec<Option<(usize, i32)>> {
    let mut parent = vec![None; table.len()];
    let mut seen = vec![false; table.len()];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    let mut reached = 1;

    while let Some(coset) = queue.pop_front() {
        for generator in signed_generators(table.nr_generators()) {
            let target = table.get(coset, generator);
            if !seen[target] {
                seen[target] = true;
                parent[target] = Some((coset, generator));
                reached += 1;
                queue.push_back(target);
            }
        }
    }
    assert!(reached == table.len(), "coset table is not transitive");
    parent
}

/// A word for every coset leading to it from coset `0`, read off a
/// breadth-first spanning tree; the representative of coset `0` is empty.
///
/// # Panics
/// Panics if the table is not transitive.
///
/// # Examples
/// ```rust
/// use fpgroups::{CosetTable, Word, coset_representatives};
///
/// let table = CosetTable::from_rows(1, vec![vec![1, 2], vec![2, 0], vec![0, 1]]);
/// let representatives = coset_representatives(&table);
/// assert_eq!(representatives[1], Word::generator(1));
/// assert_eq!(representatives[2], Word::generator(-1));
/// ```
pub fn coset_representatives(table: &CosetTable) -> Vec<Word> {
    let parent = spanning_tree(table);
    let mut order = Vec::with_capacity(table.len());
    order.push(0);
    // Parents are always discovered first, so walking in discovery order
    // builds every representative from a finished one.
    let mut index = 0;
    while index < order.len() {
        let coset = order[index];
        for generator in signed_generators(table.nr_generators()) {
            let target = table.get(coset, generator);
            if parent[target] == Some((coset, generator)) {
                order.push(target);
            }
        }
        index += 1;
    }

    let mut representatives = vec![Word::empty(); table.len()];
    for &coset in order.iter().skip(1) {
        if let Some((previous, generator)) = parent[coset] {
            representatives[coset] =
                Word::product([&representatives[previous], &Word::generator(generator)]);
        }
    }
    representatives
}

/// The transitive table on the orbit of `start` under `image`, numbered in
/// breadth-first order with `start` as coset `0`.
fn induced_table<P, F>(nr_generators: usize, start: P, image: F) -> CosetTable
where
    P: Clone + Eq + Hash,
    F: Fn(&P, i32) -> P,
{
    let mut numbers = HashMap::from([(start.clone(), 0)]);
    let mut points = vec![start];
    let mut rows = Vec::new();

    let mut index = 0;
    while index < points.len() {
        let mut row = Vec::with_capacity(2 * nr_generators);
        for generator in signed_generators(nr_generators) {
            let target = image(&points[index], generator);
            let number = match numbers.get(&target) {
                Some(&number) => number,
                None => {
                    let number = points.len();
                    numbers.insert(target.clone(), number);
                    points.push(target);
                    number
                }
            };
            row.push(number);
        }
        rows.push(row);
        index += 1;
    }
    CosetTable::from_rows(nr_generators, rows)
}

/// The action on pairs of cosets reachable from `(0, 0)`, which is the coset
/// table of the intersection of the two subgroups.
///
/// Panics if the tables have different numbers of generators.
///
/// # Examples
/// ```rust
/// use fpgroups::{CosetTable, intersection_table};
///
/// // Subgroups of index 2 and 3 in the cyclic group of order 6.
/// let two = CosetTable::from_rows(1, vec![vec![1, 1], vec![0, 0]]);
/// let three = CosetTable::from_rows(1, vec![vec![1, 2], vec![2, 0], vec![0, 1]]);
/// assert_eq!(intersection_table(&two, &three).len(), 6);
/// ```
pub fn intersection_table(a: &CosetTable, b: &CosetTable) -> CosetTable {
    assert_eq!(
        a.nr_generators(),
        b.nr_generators(),
        "coset tables act on different numbers of generators"
    );
    induced_table(a.nr_generators(), (0, 0), |&(x, y), generator| {
        (a.get(x, generator), b.get(y, generator))
    })
}

/// The diagonal action on tuples of cosets reachable from `(0, 1, ..., n-1)`,
/// which is the coset table of the normal core of the subgroup. The result
/// is regular, so its degree is the order of the permutation group the
/// table generates.
pub fn core_table(table: &CosetTable) -> CosetTable {
    induced_table(
        table.nr_generators(),
        (0..table.len()).collect::<Vec<_>>(),
        |points, generator| {
            points
                .iter()
                .map(|&point| table.get(point, generator))
                .collect()
        },
    )
}

/// Exponent sums of each generator `1..=nr_generators` in `word`, i.e. its
/// image in the free abelian group. Letters beyond `nr_generators` do not
/// contribute.
///
/// # Examples
/// ```rust
/// use fpgroups::{Word, relator_as_vector};
///
/// let word = Word::new([1, 1, 2, -1, -1]).unwrap();
/// assert_eq!(relator_as_vector(&word, 2), vec![0, 1]);
/// ```
pub fn relator_as_vector(word: &Word, nr_generators: usize) -> Vec<i64> {
    let mut vector = vec![0; nr_generators];
    for letter in word.iter() {
        let index = letter.unsigned_abs() as usize - 1;
        if index < nr_generators {
            vector[index] += i64::from(letter.signum());
        }
    }
    vector
}

/// The rows [`relator_as_vector`] of each relator, i.e. the relation matrix
/// of the abelianized presentation.
pub fn relator_matrix(nr_generators: usize, relators: &[Word]) -> Vec<Vec<i64>> {
    relators
        .iter()
        .map(|relator| relator_as_vector(relator, nr_generators))
        .collect()
}
