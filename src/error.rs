// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error type for invalid input words and for coset enumerations that could
/// not be completed within their configured bound.
///
/// A coset table that turns out not to be transitive is not represented here;
/// every table produced by this crate is transitive, so that situation is a
/// bug and panics instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FpGroupError {
    /// A word contained the letter `0`, which denotes no generator, or
    /// `i32::MIN`, which has no inverse letter.
    IllegalWord {
        /// The letters as supplied by the caller.
        letters: Vec<i32>,
        /// Position of the offending letter in `letters`.
        position: usize,
    },

    /// A word used a generator the presentation does not have.
    GeneratorOutOfRange {
        /// The offending letter.
        letter: i32,
        /// Number of generators of the presentation.
        nr_generators: usize,
    },

    /// A presentation or table claimed more generators than letters can
    /// name, i.e. more than `i32::MAX`.
    TooManyGenerators {
        /// The requested number of generators.
        nr_generators: usize,
    },

    /// Coset enumeration for a fixed subgroup needed more than `max_cosets`
    /// live cosets. Either the subgroup has infinite index or the bound was
    /// chosen too small; retrying with the same bound fails again.
    TableOverflow {
        /// The bound that was exceeded.
        max_cosets: usize,
    },
}

impl Display for FpGroupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalWord { letters, position } => {
                write!(
                    f,
                    "illegal word {letters:?}: letter at position {position} is not a signed \
                    generator index"
                )
            }
            Self::GeneratorOutOfRange {
                letter,
                nr_generators,
            } => {
                write!(
                    f,
                    "letter {letter} does not name a generator of a presentation with \
                    {nr_generators} generators"
                )
            }
            Self::TooManyGenerators { nr_generators } => {
                write!(
                    f,
                    "{nr_generators} generators exceed the largest letter {}",
                    i32::MAX
                )
            }
            Self::TableOverflow { max_cosets } => {
                write!(
                    f,
                    "maximum coset table size of {max_cosets} cosets reached before the table \
                    closed"
                )
            }
        }
    }
}

impl Error for FpGroupError {}
