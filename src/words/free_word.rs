// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Freely reduced words over signed generator indices.

use std::cmp::Ordering;
use std::fmt::{Display, Error, Formatter};
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::FpGroupError;

/// An element of the free group on the generators `1, 2, 3, ...`, stored as a
/// freely reduced sequence of letters. The letter `g > 0` stands for the
/// generator `g` and `-g` for its inverse; `0` is never a letter.
///
/// Words are immutable values. Every operation returns a new, reduced word, so
/// structural equality coincides with equality in the free group.
///
/// # Examples
/// ```rust
/// use fpgroups::Word;
///
/// let w = Word::new([1, 2, -2, 3]).unwrap();
/// assert_eq!(w.letters(), &[1, 3]);
/// assert!(Word::product([&w, &w.inverse()]).is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct Word {
    letters: Vec<i32>,
}

/// Free reduction with a stack, left to right. Callers guarantee that every
/// letter is legal.
fn reduce(letters: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut stack: Vec<i32> = Vec::new();
    for letter in letters {
        if stack.last() == Some(&-letter) {
            stack.pop();
        } else {
            stack.push(letter);
        }
    }
    stack
}

fn is_legal(letter: i32) -> bool {
    letter != 0 && letter.checked_neg().is_some()
}

impl Word {
    /// Create the reduced word from a sequence of letters. Returns
    /// [`FpGroupError::IllegalWord`] if any letter is zero or has no inverse
    /// letter (`i32::MIN`).
    pub fn new(letters: impl IntoIterator<Item = i32>) -> Result<Self, FpGroupError> {
        let letters: Vec<i32> = letters.into_iter().collect();
        if let Some(position) = letters.iter().position(|&letter| !is_legal(letter)) {
            return Err(FpGroupError::IllegalWord { letters, position });
        }
        Ok(Self {
            letters: reduce(letters),
        })
    }

    /// The empty word, representing the identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The word consisting of the single letter `letter`. Panics if `letter`
    /// is zero or `i32::MIN`.
    pub fn generator(letter: i32) -> Self {
        assert!(is_legal(letter), "{letter} is not a generator");
        Self {
            letters: vec![letter],
        }
    }

    /// The reduced letters of the word.
    pub fn letters(&self) -> &[i32] {
        &self.letters
    }

    /// Number of letters in the reduced word.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Check if this is the identity.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Iterate over the letters of the word.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i32> + ExactSizeIterator + '_ {
        self.letters.iter().copied()
    }

    /// The inverse word: letters reversed and negated.
    pub fn inverse(&self) -> Self {
        Self {
            letters: self.letters.iter().rev().map(|letter| -letter).collect(),
        }
    }

    /// Concatenate `words` and reduce the result.
    pub fn product<'a>(words: impl IntoIterator<Item = &'a Word>) -> Self {
        Self {
            letters: reduce(words.into_iter().flat_map(|word| word.iter())),
        }
    }

    /// Raise `self` to the power `exponent`. Negative exponents raise the
    /// inverse; an exponent of zero yields the empty word.
    pub fn power(&self, exponent: i32) -> Self {
        let base = if exponent < 0 {
            self.inverse()
        } else {
            self.clone()
        };
        Self::product(std::iter::repeat_n(&base, exponent.unsigned_abs() as usize))
    }

    /// The commutator `a b a⁻¹ b⁻¹`.
    pub fn commutator(a: &Word, b: &Word) -> Self {
        Self::product([a, b, &a.inverse(), &b.inverse()])
    }

    /// Rotate the word cyclically so that it starts at letter `shift`; the
    /// result is reduced, so it may be shorter than `self` if the word is not
    /// cyclically reduced.
    pub fn rotated(&self, shift: usize) -> Self {
        let shift = if self.is_empty() {
            0
        } else {
            shift % self.len()
        };
        Self {
            letters: reduce(
                self.letters[shift..]
                    .iter()
                    .chain(&self.letters[..shift])
                    .copied(),
            ),
        }
    }

    /// All cyclic rotations of the word, each followed by its inverse.
    ///
    /// If the word is a relator, these are exactly the relators obtained by
    /// reading it from any position in either direction. The result contains
    /// `2 * self.len()` words, some of which may coincide.
    pub fn rotations(&self) -> Vec<Word> {
        let mut result = Vec::with_capacity(2 * self.len());
        for shift in 0..self.len() {
            let rotated = self.rotated(shift);
            let inverse = rotated.inverse();
            result.push(rotated);
            result.push(inverse);
        }
        result
    }

    /// The smallest of [`Word::rotations`], used as a canonical representative
    /// of the conjugacy class of a relator and its inverse. The empty word
    /// represents itself.
    pub fn relator_representative(&self) -> Self {
        self.rotations().into_iter().min().unwrap_or_default()
    }
}

/// Letter order: all generators ascending, then all inverses ascending
/// (`1 < 2 < ... < -2 < -1`). This is the sign of `x * y * (x - y)`.
fn compare_letters(x: i32, y: i32) -> Ordering {
    let (x, y) = (i64::from(x), i64::from(y));
    (x * y * (x - y)).cmp(&0)
}

impl Ord for Word {
    /// Compare letter by letter in letter order, falling back on
    /// length when one word is a prefix of the other.
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter()
            .zip(other.iter())
            .map(|(x, y)| compare_letters(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }
}

impl PartialOrd for Word {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Index<usize> for Word {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.letters[index]
    }
}

impl TryFrom<Vec<i32>> for Word {
    type Error = FpGroupError;

    fn try_from(letters: Vec<i32>) -> Result<Self, Self::Error> {
        Self::new(letters)
    }
}

impl From<Word> for Vec<i32> {
    fn from(word: Word) -> Self {
        word.letters
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{:?}", self.letters)
    }
}
