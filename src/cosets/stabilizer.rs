// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cosets::derived::{coset_representatives, spanning_tree};
use crate::{CosetTable, Presentation, Word};

/// A presentation of the stabilizer of coset `0`, i.e. of the subgroup a
/// coset table was built for, obtained by Reidemeister–Schreier rewriting.
///
/// Schreier generator `k` (the letter `k + 1` in `presentation`) is the
/// element `generators()[k]` of the original group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stabilizer {
    presentation: Presentation,
    generators: Vec<Word>,
}

impl Stabilizer {
    /// The presentation on the Schreier generators.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Each Schreier generator as a word in the original generators.
    pub fn generators(&self) -> &[Word] {
        &self.generators
    }
}

/// Compute a presentation of the stabilizer of coset `0` of `table`.
///
/// There is one Schreier generator for every entry `c·g = d` with `g > 0`
/// that is not an edge of the breadth-first spanning tree, standing for
/// `rep(c) g rep(d)⁻¹`. The relators are the relators of `presentation`
/// rewritten from every coset, dropping those that reduce to the empty word.
/// A table of index `i` over `n` generators gives `i (n - 1) + 1` Schreier
/// generators.
///
/// # Panics
/// Panics if the table is not transitive or does not match the generators of
/// `presentation`.
///
/// # Examples
/// ```rust
/// use fpgroups::{Presentation, coset_table, relator_matrix, stabilizer};
///
/// // The subgroup of index 2 in the infinite cyclic group is free of rank 1.
/// let integers = Presentation::from_letters(1, Vec::<Vec<i32>>::new()).unwrap();
/// let squares = Presentation::from_letters(1, [vec![1, 1]]).unwrap();
/// let table = coset_table(&squares, &[], 2).unwrap();
/// let subgroup = stabilizer(&table, &integers);
/// assert_eq!(subgroup.presentation().nr_generators(), 1);
/// assert_eq!(subgroup.generators()[0].letters(), &[1, 1]);
/// assert!(relator_matrix(1, subgroup.presentation().relators()).is_empty());
/// ```
pub fn stabilizer(table: &CosetTable, presentation: &Presentation) -> Stabilizer {
    assert_eq!(
        table.nr_generators(),
        presentation.nr_generators(),
        "coset table and presentation have different numbers of generators"
    );
    let nr_generators = table.nr_generators();
    let parent = spanning_tree(table);
    let representatives = coset_representatives(table);

    // Schreier generator letter for each positive entry, if not a tree edge.
    let mut letters = vec![vec![None; nr_generators]; table.len()];
    let mut generators = Vec::new();
    for coset in 0..table.len() {
        for generator in 1..=nr_generators as i32 {
            let target = table.get(coset, generator);
            let tree_edge = parent[target] == Some((coset, generator))
                || parent[coset] == Some((target, -generator));
            if tree_edge {
                continue;
            }
            generators.push(Word::product([
                &representatives[coset],
                &Word::generator(generator),
                &representatives[target].inverse(),
            ]));
            letters[coset][generator as usize - 1] = Some(generators.len() as i32);
        }
    }

    let rewrite = |word: &Word, start: usize| -> Word {
        let mut coset = start;
        let mut parts = Vec::new();
        for letter in word.iter() {
            if letter > 0 {
                if let Some(schreier) = letters[coset][letter as usize - 1] {
                    parts.push(Word::generator(schreier));
                }
                coset = table.get(coset, letter);
            } else {
                let previous = table.get(coset, letter);
                if let Some(schreier) = letters[previous][(-letter) as usize - 1] {
                    parts.push(Word::generator(-schreier));
                }
                coset = previous;
            }
        }
        Word::product(parts.iter())
    };

    let relators: Vec<Word> = presentation
        .relators()
        .iter()
        .flat_map(|relator| (0..table.len()).map(move |coset| (relator, coset)))
        .map(|(relator, coset)| rewrite(relator, coset))
        .filter(|relator| !relator.is_empty())
        .collect();
    debug!(
        "Stabilizer of index {} has {} Schreier generators and {} relators",
        table.len(),
        generators.len(),
        relators.len()
    );

    Stabilizer {
        // Presentations need at least one generator; a transitive table
        // always has i (n - 1) + 1 >= 1 Schreier generators.
        presentation: Presentation::from_parts(generators.len(), relators),
        generators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coset_table;

    fn s3() -> Presentation {
        Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2, 1, 2]]).unwrap()
    }

    #[test]
    fn one_coset_reproduces_presentation() {
        let presentation = s3();
        let table =
            coset_table(&presentation, &[Word::generator(1), Word::generator(2)], 10).unwrap();
        let subgroup = stabilizer(&table, &presentation);
        assert_eq!(subgroup.presentation(), &presentation);
        assert_eq!(
            subgroup.generators(),
            &[Word::generator(1), Word::generator(2)]
        );
    }

    #[test]
    fn schreier_rank() {
        let presentation = s3();
        for subgroup_generators in [vec![Word::generator(1)], vec![]] {
            let table = coset_table(&presentation, &subgroup_generators, 100).unwrap();
            let subgroup = stabilizer(&table, &presentation);
            assert_eq!(
                subgroup.presentation().nr_generators(),
                table.len() * (presentation.nr_generators() - 1) + 1
            );
            assert!(
                subgroup.presentation().relators().len()
                    <= presentation.relators().len() * table.len()
            );
        }
    }

    #[test]
    fn generators_fix_base_coset() {
        let presentation = s3();
        let table = coset_table(&presentation, &[Word::generator(1)], 100).unwrap();
        let subgroup = stabilizer(&table, &presentation);
        for generator in subgroup.generators() {
            assert_eq!(table.act(0, generator), 0);
        }
    }

    #[test]
    fn stabilizer_has_expected_order() {
        // The subgroup generated by the first generator of S3 has order 2.
        let presentation = s3();
        let table = coset_table(&presentation, &[Word::generator(1)], 100).unwrap();
        let subgroup = stabilizer(&table, &presentation);
        let regular = coset_table(subgroup.presentation(), &[], 10000).unwrap();
        assert_eq!(regular.len(), 2);
    }
}
