// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::cosets::partition::Partition;
use crate::cosets::table::PartialTable;
use crate::{CosetTable, FpGroupError, Presentation, TableLike, Word};

/// Result of scanning a word through a partial table from a start coset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ScanOutcome {
    /// The forward and backward scans leave at least two letters uncovered.
    Incomplete,
    /// The word closes at the start coset.
    Closed,
    /// Exactly one letter was uncovered; its entry `head · letter = tail` and
    /// the inverse entry have been defined.
    Deduced { head: usize, tail: usize },
    /// The word is fully traced but ends at `head` instead of the start coset
    /// `tail`, so the two cosets must be identified. Nothing has been changed.
    Coincidence { head: usize, tail: usize },
}

/// Follow `letters` from `start` for as long as entries are defined, reading
/// each entry through `resolve`. Returns the coset reached and the number of
/// letters consumed.
fn scan(
    table: &PartialTable,
    resolve: &mut impl FnMut(usize) -> usize,
    letters: impl Iterator<Item = i32>,
    start: usize,
) -> (usize, usize) {
    let mut coset = start;
    let mut consumed = 0;
    for letter in letters {
        match table.get(coset, letter) {
            Some(next) => {
                coset = resolve(next);
                consumed += 1;
            }
            None => break,
        }
    }
    (coset, consumed)
}

/// Scan `word` forwards and backwards from `start` and apply the single
/// deduction this allows, if any. Coincidences are reported rather than
/// processed, so callers decide whether to merge or to give up.
///
/// `resolve` maps a coset id to the live coset it has been identified with;
/// `start` must be live.
pub(super) fn scan_and_deduce(
    table: &mut PartialTable,
    resolve: &mut impl FnMut(usize) -> usize,
    word: &Word,
    start: usize,
) -> ScanOutcome {
    let length = word.len();
    let (head, forward) = scan(table, resolve, word.iter(), start);
    let (tail, backward) = scan(
        table,
        resolve,
        word.iter()
            .rev()
            .map(|letter| -letter)
            .take(length - forward),
        start,
    );
    // Index of the first letter not covered by the backward scan.
    let end = length - backward;

    if end == forward + 1 {
        table.define(head, word[forward], tail);
        ScanOutcome::Deduced { head, tail }
    } else if end == forward && head != tail {
        ScanOutcome::Coincidence { head, tail }
    } else if end == forward {
        ScanOutcome::Closed
    } else {
        ScanOutcome::Incomplete
    }
}

/// Parameters of a single coset enumeration.
///
/// `max_cosets` bounds the number of simultaneously live cosets; exceeding it
/// aborts the enumeration with [`FpGroupError::TableOverflow`].
/// `compression_threshold` is the fraction of dead rows above which the
/// working table is compacted; values of `1.0` or more disable compaction
/// until the end of the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumerationConfig {
    /// Maximum number of live cosets.
    pub max_cosets: usize,
    /// Fraction of dead rows that triggers compaction of the working table.
    pub compression_threshold: f64,
}

impl EnumerationConfig {
    /// Create a configuration, using the defaults of `10000` cosets and a
    /// compression threshold of `0.5` for options set to `None`.
    pub fn new(max_cosets: Option<usize>, compression_threshold: Option<f64>) -> Self {
        Self {
            max_cosets: max_cosets.unwrap_or(10000),
            compression_threshold: compression_threshold.unwrap_or(0.5),
        }
    }
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A Todd–Coxeter coset enumeration for the subgroup generated by a list of
/// words in a finitely presented group.
///
/// Cosets are defined one entry at a time, always filling the first undefined
/// entry of the lowest live coset. After each definition every relator is
/// scanned at every coset affected by the definition or by the deductions it
/// triggers, and subgroup generators are scanned at the base coset. Forced
/// identifications are processed immediately through a union-find
/// [`Partition`], merging rows and cascading further identifications as
/// needed. When no undefined entry remains, every relator is verified at every
/// coset before the compressed table is returned.
///
/// # Examples
/// ```rust
/// use fpgroups::{CosetEnumeration, EnumerationConfig, Presentation, Word};
///
/// // Symmetric group of order 6 and the subgroup generated by the first
/// // generator.
/// let s3 = Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2, 1, 2]])
///     .unwrap();
/// let enumeration =
///     CosetEnumeration::new(&s3, &[Word::generator(1)], EnumerationConfig::default()).unwrap();
/// assert_eq!(enumeration.run().unwrap().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct CosetEnumeration {
    relators: Vec<Word>,
    subgroup_generators: Vec<Word>,
    table: PartialTable,
    partition: Partition,
    live: usize,
    events: usize,
    config: EnumerationConfig,
}

impl CosetEnumeration {
    /// Prepare an enumeration of the cosets of the subgroup generated by
    /// `subgroup_generators`. Returns [`FpGroupError::GeneratorOutOfRange`]
    /// if a subgroup generator uses a generator `presentation` lacks.
    pub fn new(
        presentation: &Presentation,
        subgroup_generators: &[Word],
        config: EnumerationConfig,
    ) -> Result<Self, FpGroupError> {
        let mut expanded: Vec<Word> = Vec::new();
        for word in subgroup_generators {
            presentation.check_word(word)?;
            for candidate in [word.clone(), word.inverse()] {
                if !candidate.is_empty() && !expanded.contains(&candidate) {
                    expanded.push(candidate);
                }
            }
        }

        Ok(Self {
            relators: presentation.relator_permutations(),
            subgroup_generators: expanded,
            table: PartialTable::new(presentation.nr_generators()),
            partition: Partition::new(1),
            live: 1,
            events: 0,
            config,
        })
    }

    /// Run the enumeration to completion and return the compressed coset
    /// table, or [`FpGroupError::TableOverflow`] if more than `max_cosets`
    /// live cosets would be needed.
    pub fn run(mut self) -> Result<CosetTable, FpGroupError> {
        info!(
            "Enumerating cosets of a subgroup with {} generator words using {} relator \
            permutations; at most {} cosets",
            self.subgroup_generators.len(),
            self.relators.len(),
            self.config.max_cosets
        );

        self.close(vec![0]);
        let mut frontier = 0;
        loop {
            if frontier >= self.table.len() {
                if self.verify() {
                    break;
                }
                frontier = 0;
                continue;
            }
            if !self.partition.is_live(frontier) {
                frontier += 1;
                continue;
            }

            let undefined = self
                .table
                .signed_generators()
                .find(|&generator| self.table.get(frontier, generator).is_none());
            let Some(generator) = undefined else {
                frontier += 1;
                continue;
            };

            if self.live >= self.config.max_cosets {
                warn!(
                    "Coset enumeration exceeded the maximum of {} cosets",
                    self.config.max_cosets
                );
                return Err(FpGroupError::TableOverflow {
                    max_cosets: self.config.max_cosets,
                });
            }

            let new = self.table.push_row();
            self.partition.push();
            self.live += 1;
            self.table.define(frontier, generator, new);
            self.close(vec![new, frontier]);
            frontier = self.maybe_compress(frontier);
        }

        let (table, _) = self.table.compress(&mut self.partition);
        info!("Coset enumeration closed with {} cosets", table.len());
        // Verification leaves every live row full, so compression yields a
        // complete table.
        Ok(table
            .into_complete()
            .unwrap_or_else(|| unreachable!("verified coset table has undefined entries")))
    }

    /// Scan every relator permutation at each coset on a work queue seeded
    /// with `seeds`, and the subgroup generators at the base coset, until no
    /// more deductions or coincidences arise.
    fn close(&mut self, seeds: Vec<usize>) {
        let mut queue = VecDeque::from(seeds);
        while let Some(coset) = queue.pop_front() {
            let mut coset = self.partition.find(coset);
            for index in 0..self.relators.len() {
                let partition = &mut self.partition;
                let outcome = scan_and_deduce(
                    &mut self.table,
                    &mut |id| partition.find(id),
                    &self.relators[index],
                    coset,
                );
                self.handle(outcome, &mut queue);
                coset = self.partition.find(coset);
            }

            for index in 0..self.subgroup_generators.len() {
                let partition = &mut self.partition;
                let outcome = scan_and_deduce(
                    &mut self.table,
                    &mut |id| partition.find(id),
                    &self.subgroup_generators[index],
                    0,
                );
                self.handle(outcome, &mut queue);
            }
        }
    }

    fn handle(&mut self, outcome: ScanOutcome, queue: &mut VecDeque<usize>) {
        match outcome {
            ScanOutcome::Deduced { head, tail } => {
                self.events += 1;
                queue.push_back(head);
                queue.push_back(tail);
            }
            ScanOutcome::Coincidence { head, tail } => {
                self.events += 1;
                queue.extend(self.identify(head, tail));
            }
            ScanOutcome::Closed | ScanOutcome::Incomplete => (),
        }
    }

    /// Identify cosets `a` and `b` and every pair of cosets this forces,
    /// breadth first. Each absorbed row is merged into the surviving row:
    /// undefined entries are filled, and entries defined on both sides with
    /// different targets queue a further identification. Returns the
    /// surviving cosets.
    fn identify(&mut self, a: usize, b: usize) -> Vec<usize> {
        let mut survivors = Vec::new();
        let mut coincidences = VecDeque::from([(a, b)]);

        while let Some((a, b)) = coincidences.pop_front() {
            let Some((survivor, absorbed)) = self.partition.union(a, b) else {
                continue;
            };
            trace!("Identified coset {absorbed} with coset {survivor}");
            self.live -= 1;
            survivors.push(survivor);

            for generator in self.table.signed_generators().collect::<Vec<_>>() {
                let Some(target) = self.table.get(absorbed, generator) else {
                    continue;
                };
                match self.table.get(survivor, generator) {
                    None => self.table.set(survivor, generator, target),
                    Some(existing) => {
                        if self.partition.find(existing) != self.partition.find(target) {
                            coincidences.push_back((existing, target));
                        }
                    }
                }
            }
        }

        survivors
    }

    /// Scan everything at every live coset. Returns true if nothing changed,
    /// which for a table without undefined entries means every relator closes
    /// at every coset and every subgroup generator closes at the base coset.
    fn verify(&mut self) -> bool {
        let before = self.events;
        let live = (0..self.table.len())
            .filter(|&coset| self.partition.is_live(coset))
            .collect();
        self.close(live);
        self.events == before
    }

    /// Compact the working table if the fraction of dead rows exceeds the
    /// configured threshold. Returns the frontier translated to the new
    /// numbering.
    fn maybe_compress(&mut self, frontier: usize) -> usize {
        let total = self.table.len();
        let dead = total - self.live;
        if (dead as f64) <= self.config.compression_threshold * total as f64 {
            return frontier;
        }

        debug!("Compressing coset table: {dead} of {total} rows are dead");
        let (table, numbering) = self.table.compress(&mut self.partition);
        self.table = table;
        self.partition = Partition::new(self.live);
        numbering[..frontier.min(total)]
            .iter()
            .filter(|number| number.is_some())
            .count()
    }
}

/// Enumerate the cosets of the subgroup generated by `subgroup_generators`
/// with at most `max_cosets` live cosets and default compression settings.
///
/// # Examples
/// ```rust
/// use fpgroups::{FpGroupError, Presentation, coset_table};
///
/// let klein = Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap();
/// assert_eq!(coset_table(&klein, &[], 10).unwrap().len(), 4);
///
/// let cyclic = Presentation::from_letters(1, [vec![1, 1, 1]]).unwrap();
/// assert_eq!(
///     coset_table(&cyclic, &[], 2),
///     Err(FpGroupError::TableOverflow { max_cosets: 2 })
/// );
/// ```
pub fn coset_table(
    presentation: &Presentation,
    subgroup_generators: &[Word],
    max_cosets: usize,
) -> Result<CosetTable, FpGroupError> {
    CosetEnumeration::new(
        presentation,
        subgroup_generators,
        EnumerationConfig::new(Some(max_cosets), None),
    )?
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(letters: &[i32]) -> Word {
        Word::new(letters.iter().copied()).unwrap()
    }

    fn klein_four() -> Presentation {
        Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap()
    }

    #[test]
    fn scan_deduces_single_gap() {
        let mut table = PartialTable::new(1);
        let one = table.push_row();
        let two = table.push_row();
        table.define(0, 1, one);
        table.define(0, -1, two);

        let outcome = scan_and_deduce(&mut table, &mut |id| id, &word(&[1, 1, 1]), two);
        assert_eq!(outcome, ScanOutcome::Deduced { head: 1, tail: 2 });
        assert_eq!(table.get(1, 1), Some(2));
        assert_eq!(table.get(2, -1), Some(1));

        let outcome = scan_and_deduce(&mut table, &mut |id| id, &word(&[1, 1, 1]), 0);
        assert_eq!(outcome, ScanOutcome::Closed);
    }

    #[test]
    fn scan_reports_coincidence() {
        let mut table = PartialTable::new(1);
        let one = table.push_row();
        table.define(0, 1, one);
        table.define(one, 1, 0);

        let outcome = scan_and_deduce(&mut table, &mut |id| id, &word(&[1]), 0);
        assert_eq!(outcome, ScanOutcome::Coincidence { head: 1, tail: 0 });
        // Reported, not processed.
        assert_eq!(table.get(0, 1), Some(1));
    }

    #[test]
    fn scan_incomplete() {
        let mut table = PartialTable::new(2);
        let outcome = scan_and_deduce(&mut table, &mut |id| id, &word(&[1, 2, 1, 2]), 0);
        assert_eq!(outcome, ScanOutcome::Incomplete);
        assert_eq!(table.first_undefined(), Some((0, 1)));
    }

    #[test]
    fn identify_cascades() {
        let presentation = Presentation::from_letters(1, Vec::<Vec<i32>>::new()).unwrap();
        let mut enumeration =
            CosetEnumeration::new(&presentation, &[], EnumerationConfig::default()).unwrap();
        // A path 0 -> 1 -> 2 and a path 3 -> 4; identifying 0 with 3 forces
        // 1 = 4.
        for _ in 0..4 {
            enumeration.table.push_row();
            enumeration.partition.push();
        }
        enumeration.live = 5;
        enumeration.table.define(0, 1, 1);
        enumeration.table.define(1, 1, 2);
        enumeration.table.define(3, 1, 4);

        let survivors = enumeration.identify(3, 0);
        assert_eq!(survivors, vec![0, 1]);
        assert_eq!(enumeration.live, 3);
        assert_eq!(enumeration.partition.find(4), 1);
        assert_eq!(enumeration.table.get(1, 1), Some(2));
        assert_eq!(enumeration.table.get(1, -1), Some(0));
    }

    #[test]
    fn klein_four_trivial_subgroup() {
        let table = coset_table(&klein_four(), &[], 10).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn klein_four_cyclic_subgroup() {
        let table = coset_table(&klein_four(), &[word(&[1])], 10).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, 1), 0);
    }

    #[test]
    fn overflow() {
        let cyclic = Presentation::from_letters(1, [vec![1, 1, 1]]).unwrap();
        assert_eq!(
            coset_table(&cyclic, &[], 2),
            Err(FpGroupError::TableOverflow { max_cosets: 2 })
        );
        assert_eq!(coset_table(&cyclic, &[], 3).unwrap().len(), 3);
    }

    #[test]
    fn whole_group() {
        let table = coset_table(&klein_four(), &[word(&[1]), word(&[2])], 10).unwrap();
        assert_eq!(table.rows(), &[vec![0, 0, 0, 0]]);
    }

    #[test]
    fn subgroup_generator_out_of_range() {
        assert!(matches!(
            coset_table(&klein_four(), &[word(&[3])], 10),
            Err(FpGroupError::GeneratorOutOfRange { letter: 3, .. })
        ));
    }

    #[test]
    fn aggressive_compression() {
        let s3 = Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2, 1, 2]])
            .unwrap();
        for threshold in [0.0, 0.25, 2.0] {
            let config = EnumerationConfig::new(Some(100), Some(threshold));
            let table = CosetEnumeration::new(&s3, &[], config)
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(table.len(), 6);
        }
    }

    #[test]
    fn config_defaults() {
        let config = EnumerationConfig::default();
        assert_eq!(config.max_cosets, 10000);
        assert_eq!(config.compression_threshold, 0.5);
        assert_eq!(EnumerationConfig::new(Some(7), None).max_cosets, 7);
    }
}
