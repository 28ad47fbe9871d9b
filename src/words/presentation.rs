// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{FpGroupError, Word};

/// A finite presentation of a group: a number of generators together with a
/// list of relators, each a word asserted to equal the identity.
///
/// Every relator letter `g` satisfies `1 <= |g| <= nr_generators`; this is
/// checked on construction and on deserialization.
///
/// # Examples
/// ```rust
/// use fpgroups::{Presentation, Word};
///
/// // The Klein four group.
/// let klein = Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap();
/// assert_eq!(klein.nr_generators(), 2);
/// assert_eq!(klein.relators()[2], Word::new([1, 2, 1, 2]).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Presentation {
    nr_generators: usize,
    relators: Vec<Word>,
}

#[derive(Deserialize)]
struct PresentationData {
    nr_generators: usize,
    relators: Vec<Word>,
}

impl Presentation {
    /// Create a presentation from already reduced relator words. Returns
    /// [`FpGroupError::TooManyGenerators`] if `nr_generators` exceeds
    /// `i32::MAX`, and [`FpGroupError::GeneratorOutOfRange`] if a relator uses
    /// a generator beyond `nr_generators`. Panics if `nr_generators` is zero.
    pub fn new(nr_generators: usize, relators: Vec<Word>) -> Result<Self, FpGroupError> {
        assert!(
            nr_generators > 0,
            "a presentation must have at least one generator"
        );
        if i32::try_from(nr_generators).is_err() {
            return Err(FpGroupError::TooManyGenerators { nr_generators });
        }
        for relator in relators.iter() {
            check_range(relator, nr_generators)?;
        }
        Ok(Self {
            nr_generators,
            relators,
        })
    }

    /// Assemble a presentation whose relators are known to be in range.
    pub(crate) fn from_parts(nr_generators: usize, relators: Vec<Word>) -> Self {
        debug_assert!(
            relators
                .iter()
                .all(|relator| check_range(relator, nr_generators).is_ok())
        );
        Self {
            nr_generators,
            relators,
        }
    }

    /// Convenience constructor reducing each letter sequence into a relator
    /// word first; see [`Word::new`] and [`Presentation::new`] for the error
    /// conditions.
    pub fn from_letters<I, L>(nr_generators: usize, relators: I) -> Result<Self, FpGroupError>
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = i32>,
    {
        let relators = relators
            .into_iter()
            .map(Word::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(nr_generators, relators)
    }

    /// Number of generators.
    pub fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    /// The relator words, in the order given.
    pub fn relators(&self) -> &[Word] {
        &self.relators
    }

    /// Check that `word` only uses generators of this presentation.
    pub fn check_word(&self, word: &Word) -> Result<(), FpGroupError> {
        check_range(word, self.nr_generators)
    }

    /// The signed generators in the fixed order `1, ..., n, -1, ..., -n` used
    /// throughout coset enumeration.
    pub fn signed_generators(&self) -> impl Iterator<Item = i32> + Clone {
        signed_generators(self.nr_generators)
    }

    /// Every rotation of every relator together with its inverse, without
    /// duplicates and with empty words removed, in order of first occurrence.
    pub fn relator_permutations(&self) -> Vec<Word> {
        let mut permutations: Vec<Word> = Vec::new();
        for relator in self.relators.iter() {
            for permutation in relator.rotations() {
                if !permutation.is_empty() && !permutations.contains(&permutation) {
                    permutations.push(permutation);
                }
            }
        }
        permutations
    }
}

/// The signed generators `1, ..., n, -1, ..., -n`.
pub(crate) fn signed_generators(nr_generators: usize) -> impl Iterator<Item = i32> + Clone {
    let n = nr_generators as i32;
    (1..=n).chain((1..=n).map(|g| -g))
}

fn check_range(word: &Word, nr_generators: usize) -> Result<(), FpGroupError> {
    match word
        .iter()
        .find(|letter| letter.unsigned_abs() as usize > nr_generators)
    {
        Some(letter) => Err(FpGroupError::GeneratorOutOfRange {
            letter,
            nr_generators,
        }),
        None => Ok(()),
    }
}

impl<'de> Deserialize<'de> for Presentation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = PresentationData::deserialize(deserializer)?;
        if data.nr_generators == 0 {
            return Err(D::Error::custom(
                "a presentation must have at least one generator",
            ));
        }
        Presentation::new(data.nr_generators, data.relators).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn klein_four() -> Presentation {
        Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap()
    }

    #[test]
    fn construction() {
        let presentation = klein_four();
        assert_eq!(presentation.nr_generators(), 2);
        assert_eq!(presentation.relators().len(), 3);
    }

    #[test]
    fn generator_range_checked() {
        assert_eq!(
            Presentation::from_letters(2, [vec![1, -3]]),
            Err(FpGroupError::GeneratorOutOfRange {
                letter: -3,
                nr_generators: 2
            })
        );
        assert!(matches!(
            Presentation::from_letters(2, [vec![1, 0]]),
            Err(FpGroupError::IllegalWord { position: 1, .. })
        ));
        assert!(klein_four().check_word(&Word::generator(3)).is_err());
        assert!(klein_four().check_word(&Word::generator(-2)).is_ok());
    }

    #[test]
    #[should_panic(expected = "a presentation must have at least one generator")]
    fn no_generators() {
        let _ = Presentation::new(0, Vec::new());
    }

    #[test]
    fn generator_order() {
        assert_eq!(
            klein_four().signed_generators().collect::<Vec<_>>(),
            vec![1, 2, -1, -2]
        );
    }

    #[test]
    fn permutations_are_deduplicated() {
        let permutations = klein_four().relator_permutations();
        // gg and hh give one word and one inverse each; ghgh has two distinct
        // rotations, each with an inverse.
        assert_eq!(permutations.len(), 8);
        assert_eq!(permutations[0], Word::new([1, 1]).unwrap());
        assert_eq!(permutations[1], Word::new([-1, -1]).unwrap());
        assert!(permutations.contains(&Word::new([-2, -1, -2, -1]).unwrap()));
    }

    #[test]
    fn serde_round_trip_validates() {
        let json = r#"{"nr_generators": 2, "relators": [[1, 1], [2, 2], [1, 2, 1, 2]]}"#;
        let presentation: Presentation = serde_json::from_str(json).unwrap();
        assert_eq!(presentation, klein_four());

        let bad = r#"{"nr_generators": 1, "relators": [[1, 2]]}"#;
        assert!(serde_json::from_str::<Presentation>(bad).is_err());
        let empty = r#"{"nr_generators": 0, "relators": []}"#;
        assert!(serde_json::from_str::<Presentation>(empty).is_err());
        let huge = r#"{"nr_generators": 4294967297, "relators": [[1]]}"#;
        assert!(serde_json::from_str::<Presentation>(huge).is_err());
        let min = r#"{"nr_generators": 1, "relators": [[-2147483648]]}"#;
        assert!(serde_json::from_str::<Presentation>(min).is_err());
    }

    #[test]
    fn generator_count_must_fit_letters() {
        assert_eq!(
            Presentation::new((1 << 32) | 1, Vec::new()),
            Err(FpGroupError::TooManyGenerators {
                nr_generators: (1 << 32) | 1
            })
        );
        let largest = Presentation::new(i32::MAX as usize, vec![Word::generator(i32::MAX)]);
        assert!(largest.is_ok());
    }
}
