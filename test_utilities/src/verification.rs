use std::collections::VecDeque;

use fpgroups::{CosetTable, Presentation, Word};

pub fn assert_consistent(table: &CosetTable) {
    let n = table.nr_generators() as i32;
    for coset in 0..table.len() {
        for generator in (1..=n).chain(-n..=-1) {
            let target = table.get(coset, generator);
            assert_eq!(table.get(target, -generator), coset);
        }
    }
}

/// Every relator, read from every coset, and every subgroup generator, read
/// from the base coset, returns to where it started.
pub fn assert_closed(
    table: &CosetTable,
    presentation: &Presentation,
    subgroup_generators: &[Word],
) {
    for relator in presentation.relator_permutations() {
        for coset in 0..table.len() {
            assert_eq!(table.act(coset, &relator), coset, "{relator} at {coset}");
        }
    }
    for generator in subgroup_generators {
        assert_eq!(table.act(0, generator), 0, "{generator} at 0");
    }
}

pub fn assert_transitive(table: &CosetTable) {
    let n = table.nr_generators() as i32;
    let mut seen = vec![false; table.len()];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    while let Some(coset) = queue.pop_front() {
        for generator in 1..=n {
            let target = table.get(coset, generator);
            if !seen[target] {
                seen[target] = true;
                queue.push_back(target);
            }
        }
    }
    assert!(seen.into_iter().all(|reached| reached));
}
