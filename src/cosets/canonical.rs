// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical numbering of coset tables.
//!
//! Renumbering a transitive table from a start coset `s` relabels cosets in
//! the order they are first reached when rows are read in order, starting
//! from `s` as the new coset `0`. A table is canonical when no such
//! renumbering is lexicographically smaller (rows in order, entries in
//! signed generator order) than the table itself. Two complete tables
//! describe conjugate subgroups exactly when their canonical forms from some
//! start coincide, so keeping only canonical tables rejects isomorphs.

use std::cmp::Ordering;

use crate::{CosetTable, TableLike};

/// Compare the renumbering of `table` from `start` against `table` itself.
///
/// Entries are compared in row-major order. The comparison stops with
/// [`Ordering::Equal`] at the first entry undefined in either table, since
/// later definitions may still go either way; for complete tables the result
/// is exact.
///
/// # Panics
/// Panics if `start` is out of range, or if the table is complete enough to
/// show it is not transitive (a row is needed that `start` never reaches).
pub fn compare_renumbered_from<T: TableLike>(table: &T, start: usize) -> Ordering {
    assert!(
        start < table.len(),
        "start coset {start} out of range for a table with {} cosets",
        table.len()
    );
    let mut new_of_old = vec![None; table.len()];
    let mut old_of_new = Vec::with_capacity(table.len());
    new_of_old[start] = Some(0);
    old_of_new.push(start);

    for row in 0..table.len() {
        assert!(row < old_of_new.len(), "coset table is not transitive");
        let old = old_of_new[row];
        for generator in table.signed_generators() {
            let Some(target) = table.entry(old, generator) else {
                return Ordering::Equal;
            };
            let renumbered = *new_of_old[target].get_or_insert_with(|| {
                old_of_new.push(target);
                old_of_new.len() - 1
            });
            let Some(original) = table.entry(row, generator) else {
                return Ordering::Equal;
            };
            match renumbered.cmp(&original) {
                Ordering::Equal => (),
                decided => return decided,
            }
        }
    }
    Ordering::Equal
}

/// Check that no renumbering from another start coset is smaller than the
/// table itself. See [`compare_renumbered_from`] for the treatment of
/// undefined entries.
pub fn is_canonical<T: TableLike>(table: &T) -> bool {
    (1..table.len()).all(|start| compare_renumbered_from(table, start) != Ordering::Less)
}

/// The complete table renumbered from `start`, i.e. the coset table of the
/// stabilizer of `start`, a conjugate of the original subgroup.
///
/// # Panics
/// Panics if `start` is out of range or the table is not transitive.
///
/// # Examples
/// ```rust
/// use fpgroups::{CosetTable, renumbered_from};
///
/// let table = CosetTable::from_rows(1, vec![vec![1, 2], vec![2, 0], vec![0, 1]]);
/// assert_eq!(renumbered_from(&table, 1), table);
/// ```
pub fn renumbered_from(table: &CosetTable, start: usize) -> CosetTable {
    assert!(
        start < table.len(),
        "start coset {start} out of range for a table with {} cosets",
        table.len()
    );
    let mut new_of_old = vec![None; table.len()];
    let mut old_of_new = vec![start];
    new_of_old[start] = Some(0);

    let mut rows = Vec::with_capacity(table.len());
    let mut row = 0;
    while row < old_of_new.len() {
        let old = old_of_new[row];
        let new_row = table
            .row(old)
            .iter()
            .map(|&target| {
                *new_of_old[target].get_or_insert_with(|| {
                    old_of_new.push(target);
                    old_of_new.len() - 1
                })
            })
            .collect();
        rows.push(new_row);
        row += 1;
    }
    assert!(rows.len() == table.len(), "coset table is not transitive");
    CosetTable::from_rows(table.nr_generators(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosets::table::PartialTable;

    // S3 acting on the cosets of the subgroup generated by the first
    // generator.
    fn s3_on_three() -> CosetTable {
        CosetTable::from_rows(
            2,
            vec![vec![0, 1, 0, 1], vec![2, 0, 2, 0], vec![1, 2, 1, 2]],
        )
    }

    #[test]
    fn identity_renumbering() {
        let table = s3_on_three();
        assert_eq!(compare_renumbered_from(&table, 0), Ordering::Equal);
        assert_eq!(renumbered_from(&table, 0), table);
    }

    #[test]
    fn conjugate_numbering() {
        let table = s3_on_three();
        // From coset 1: row 0 reads [2, 0, ...] after relabelling 1 -> 0,
        // 2 -> 1, 0 -> 2, which starts with 1 > 0.
        assert_eq!(compare_renumbered_from(&table, 1), Ordering::Greater);
        assert!(is_canonical(&table));

        let conjugate = renumbered_from(&table, 1);
        assert_eq!(conjugate.rows()[0], vec![1, 2, 1, 2]);
        assert!(!is_canonical(&conjugate));
        assert_eq!(compare_renumbered_from(&conjugate, 2), Ordering::Less);
    }

    #[test]
    fn regular_tables_are_canonical() {
        let table = CosetTable::from_rows(1, vec![vec![1, 2], vec![2, 0], vec![0, 1]]);
        for start in 0..3 {
            assert_eq!(compare_renumbered_from(&table, start), Ordering::Equal);
        }
        assert!(is_canonical(&table));
    }

    #[test]
    fn undefined_entries_stop_comparison() {
        let mut table = PartialTable::new(1);
        let one = table.push_row();
        table.define(0, 1, one);
        // Row 0 from coset 1 starts with an undefined entry.
        assert_eq!(compare_renumbered_from(&table, 1), Ordering::Equal);
        assert!(is_canonical(&table));
    }

    #[test]
    #[should_panic(expected = "coset table is not transitive")]
    fn intransitive() {
        let table = CosetTable::from_rows(1, vec![vec![0, 0], vec![1, 1]]);
        let _ = renumbered_from(&table, 0);
    }
}
