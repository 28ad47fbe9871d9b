// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use canonical::{compare_renumbered_from, is_canonical, renumbered_from};
pub use derived::{
    core_table, coset_representatives, intersection_table, relator_as_vector, relator_matrix,
};
pub use low_index::{LowIndexTables, Step, low_index_tables};
pub use stabilizer::{Stabilizer, stabilizer};
pub use table::CosetTable;
pub use todd_coxeter::{CosetEnumeration, EnumerationConfig, coset_table};
pub use traits::TableLike;

mod canonical;
mod derived;
mod low_index;
mod partition;
mod stabilizer;
mod table;
mod todd_coxeter;
mod traits;
