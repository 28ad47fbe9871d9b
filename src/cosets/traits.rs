// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::words::signed_generators;

/// Read access to a (possibly partial) coset table: the right action of the
/// signed generators on cosets `0..len`, where some entries may still be
/// undefined.
///
/// Canonicity checks are written against this trait so that they apply both
/// to the partial tables of an ongoing search and to finished
/// [`crate::CosetTable`]s.
pub trait TableLike {
    /// Number of generators of the underlying presentation.
    fn nr_generators(&self) -> usize;

    /// Number of cosets (rows) in the table.
    fn len(&self) -> usize;

    /// The image of `coset` under the signed generator `generator`, if it is
    /// defined. Panics if `coset` is out of range or `generator` does not
    /// name a generator.
    fn entry(&self, coset: usize, generator: i32) -> Option<usize>;

    /// Check if the table has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The signed generators in table order, `1, ..., n, -1, ..., -n`.
    fn signed_generators(&self) -> impl Iterator<Item = i32> + Clone {
        signed_generators(self.nr_generators())
    }

    /// The first undefined entry in table order (cosets ascending, then
    /// generators in the order of [`TableLike::signed_generators`]).
    fn first_undefined(&self) -> Option<(usize, i32)> {
        (0..self.len()).find_map(|coset| {
            self.signed_generators()
                .find(|&generator| self.entry(coset, generator).is_none())
                .map(|generator| (coset, generator))
        })
    }

    /// Check if every entry of the table is defined.
    fn is_complete(&self) -> bool {
        self.first_undefined().is_none()
    }
}
