// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `fpgroups` crate computes with finitely presented groups: freely
//! reduced words, Todd–Coxeter coset enumeration, and a low-index search that
//! lists every subgroup of bounded index up to conjugacy as a canonical coset
//! table. Coset tables can be intersected, reduced to their normal core, and
//! turned into presentations of the subgroups they describe.
//!
//! The crate logs through [`tracing`] and never installs a subscriber.

#![warn(missing_docs)]

pub use crate::cosets::{
    CosetEnumeration, CosetTable, EnumerationConfig, LowIndexTables, Stabilizer, Step, TableLike,
    compare_renumbered_from, core_table, coset_representatives, coset_table, intersection_table,
    is_canonical, low_index_tables, relator_as_vector, relator_matrix, renumbered_from, stabilizer,
};
pub use crate::error::FpGroupError;
pub use crate::words::{Presentation, Word};

mod cosets;
mod error;
mod words;
