// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cosets::partition::Partition;
use crate::{FpGroupError, TableLike, Word};

/// Position of the signed generator `generator` within a row: generators
/// `1..=n` occupy slots `0..n`, their inverses `-1..=-n` occupy `n..2n`. This
/// matches the order of [`TableLike::signed_generators`].
pub(crate) fn slot(generator: i32, nr_generators: usize) -> usize {
    debug_assert!(generator != 0 && (generator.unsigned_abs() as usize) <= nr_generators);
    if generator > 0 {
        generator as usize - 1
    } else {
        nr_generators + generator.unsigned_abs() as usize - 1
    }
}

/// Growable coset table with undefined entries, used while a table is being
/// built. Rows are never removed; cosets identified with others are tracked
/// by a separate [`Partition`] until the table is compressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PartialTable {
    nr_generators: usize,
    rows: Vec<Vec<Option<usize>>>,
}

impl PartialTable {
    /// A table with the base coset only and every entry undefined.
    pub fn new(nr_generators: usize) -> Self {
        Self {
            nr_generators,
            rows: vec![vec![None; 2 * nr_generators]],
        }
    }

    /// Append a coset with every entry undefined and return its id.
    pub fn push_row(&mut self) -> usize {
        self.rows.push(vec![None; 2 * self.nr_generators]);
        self.rows.len() - 1
    }

    pub fn get(&self, coset: usize, generator: i32) -> Option<usize> {
        self.rows[coset][slot(generator, self.nr_generators)]
    }

    pub fn set(&mut self, coset: usize, generator: i32, target: usize) {
        self.rows[coset][slot(generator, self.nr_generators)] = Some(target);
    }

    /// Set `coset · generator = target` together with the inverse entry
    /// `target · generator⁻¹ = coset`.
    pub fn define(&mut self, coset: usize, generator: i32, target: usize) {
        self.set(coset, generator, target);
        self.set(target, -generator, coset);
    }

    /// Renumber the live cosets of `partition` contiguously in increasing
    /// order, redirect every entry to the live representative of its target,
    /// and drop the rows of dead cosets.
    ///
    /// Returns the compressed table and, for every old coset id, its new id
    /// if it was live.
    pub fn compress(&self, partition: &mut Partition) -> (PartialTable, Vec<Option<usize>>) {
        let mut numbering = vec![None; self.rows.len()];
        let mut live_count = 0;
        for (coset, number) in numbering.iter_mut().enumerate() {
            if partition.is_live(coset) {
                *number = Some(live_count);
                live_count += 1;
            }
        }

        let mut rows = Vec::with_capacity(live_count);
        for (coset, row) in self.rows.iter().enumerate() {
            if numbering[coset].is_none() {
                continue;
            }
            let mut new_row = Vec::with_capacity(row.len());
            for entry in row.iter() {
                new_row.push(entry.and_then(|target| numbering[partition.find(target)]));
            }
            rows.push(new_row);
        }

        (
            PartialTable {
                nr_generators: self.nr_generators,
                rows,
            },
            numbering,
        )
    }

    /// Convert into a [`CosetTable`] if every entry is defined.
    pub fn into_complete(self) -> Option<CosetTable> {
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().collect::<Option<Vec<usize>>>())
            .collect::<Option<Vec<Vec<usize>>>>()?;
        Some(CosetTable {
            nr_generators: self.nr_generators,
            rows,
        })
    }
}

impl TableLike for PartialTable {
    fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn entry(&self, coset: usize, generator: i32) -> Option<usize> {
        self.get(coset, generator)
    }
}

impl From<&CosetTable> for PartialTable {
    fn from(table: &CosetTable) -> Self {
        Self {
            nr_generators: table.nr_generators,
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().copied().map(Some).collect())
                .collect(),
        }
    }
}

/// A complete coset table: the permutation action of the generators on the
/// cosets `0..len` of a subgroup, where coset `0` is the subgroup itself.
///
/// Every entry is defined and the table is mutually consistent: if
/// `table.get(c, g) == d` then `table.get(d, -g) == c`. Rows store the images
/// in the order `1, ..., n, -1, ..., -n`, which is also the serialized
/// layout.
///
/// # Examples
/// ```rust
/// use fpgroups::{CosetTable, Word};
///
/// // The cyclic group of order 3 acting on itself.
/// let table = CosetTable::from_rows(1, vec![vec![1, 2], vec![2, 0], vec![0, 1]]);
/// assert_eq!(table.get(2, 1), 0);
/// assert_eq!(table.get(2, -1), 1);
/// assert_eq!(table.word_degree(&Word::generator(1)), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CosetTable {
    nr_generators: usize,
    rows: Vec<Vec<usize>>,
}

#[derive(Deserialize)]
struct CosetTableData {
    nr_generators: usize,
    rows: Vec<Vec<usize>>,
}

/// Check the shape, range, and mutual consistency of raw table rows.
fn validate(nr_generators: usize, rows: &[Vec<usize>]) -> Result<(), String> {
    if rows.is_empty() {
        return Err("a coset table needs at least the base coset".to_string());
    }
    let too_many = || FpGroupError::TooManyGenerators { nr_generators }.to_string();
    let last = i32::try_from(nr_generators).map_err(|_| too_many())?;
    let width = nr_generators.checked_mul(2).ok_or_else(too_many)?;
    for (coset, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(format!("row {coset} has {} entries, expected {width}", row.len()));
        }
        for generator in 1..=last {
            let target = row[slot(generator, nr_generators)];
            let Some(target_row) = rows.get(target) else {
                return Err(format!(
                    "entry ({coset}, {generator}) = {target} is out of range"
                ));
            };
            if target_row[slot(-generator, nr_generators)] != coset {
                return Err(format!(
                    "entries ({coset}, {generator}) and ({target}, {}) are not mutually inverse",
                    -generator
                ));
            }
        }
        for generator in 1..=last {
            if row[slot(-generator, nr_generators)] >= rows.len() {
                return Err(format!("entry ({coset}, {}) is out of range", -generator));
            }
        }
    }
    Ok(())
}

impl CosetTable {
    /// Create a table from rows listing the images of each coset under
    /// `1, ..., n, -1, ..., -n`. Panics if the rows do not form a complete,
    /// mutually consistent table.
    pub fn from_rows(nr_generators: usize, rows: Vec<Vec<usize>>) -> Self {
        if let Err(message) = validate(nr_generators, &rows) {
            panic!("invalid coset table: {message}");
        }
        Self {
            nr_generators,
            rows,
        }
    }

    /// Number of generators acting on the cosets.
    pub fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    /// Number of cosets, i.e. the index of the subgroup.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a coset table contains at least the base coset.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The image of `coset` under the signed generator `generator`.
    pub fn get(&self, coset: usize, generator: i32) -> usize {
        self.rows[coset][slot(generator, self.nr_generators)]
    }

    /// The images of `coset` in the order `1, ..., n, -1, ..., -n`.
    pub fn row(&self, coset: usize) -> &[usize] {
        &self.rows[coset]
    }

    /// All rows of the table.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// The image of `coset` under `word`, applying letters left to right.
    /// Panics if `word` uses a generator the table does not have.
    pub fn act(&self, coset: usize, word: &Word) -> usize {
        word.iter().fold(coset, |current, letter| {
            assert!(
                (letter.unsigned_abs() as usize) <= self.nr_generators,
                "letter {letter} is not a generator of this table"
            );
            self.get(current, letter)
        })
    }

    /// The length of the cycle of `word` through the base coset: the least
    /// `i >= 1` such that `0 · wordⁱ = 0`.
    pub fn word_degree(&self, word: &Word) -> usize {
        let mut coset = self.act(0, word);
        let mut degree = 1;
        while coset != 0 {
            coset = self.act(coset, word);
            degree += 1;
        }
        degree
    }
}

impl TableLike for CosetTable {
    fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn entry(&self, coset: usize, generator: i32) -> Option<usize> {
        Some(self.get(coset, generator))
    }
}

impl<'de> Deserialize<'de> for CosetTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = CosetTableData::deserialize(deserializer)?;
        validate(data.nr_generators, &data.rows).map_err(D::Error::custom)?;
        Ok(CosetTable {
            nr_generators: data.nr_generators,
            rows: data.rows,
        })
    }
}
