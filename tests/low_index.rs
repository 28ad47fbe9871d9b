use fpgroups::{CosetTable, Step, TableLike, is_canonical, low_index_tables, renumbered_from};
use test_utilities::{
    assert_closed, assert_consistent, assert_transitive, coxeter_a3, cyclic, free_group,
    klein_four, symmetric_three,
};

fn degrees(tables: impl Iterator<Item = CosetTable>) -> Vec<usize> {
    let mut degrees: Vec<usize> = tables.map(|table| table.len()).collect();
    degrees.sort();
    degrees
}

#[test]
fn klein_four_subgroups() {
    assert_eq!(
        degrees(low_index_tables(&klein_four(), 8)),
        vec![1, 2, 2, 2, 4]
    );
}

#[test]
fn symmetric_three_subgroups() {
    assert_eq!(
        degrees(low_index_tables(&symmetric_three(), 6)),
        vec![1, 2, 3, 6]
    );
}

#[test]
fn coxeter_a3_subgroup_classes() {
    // The symmetric group of order 24 has 11 conjugacy classes of subgroups.
    assert_eq!(
        degrees(low_index_tables(&coxeter_a3(), 24)),
        vec![1, 2, 3, 4, 6, 6, 6, 8, 12, 12, 24]
    );
    assert_eq!(
        degrees(low_index_tables(&coxeter_a3(), 8)),
        vec![1, 2, 3, 4, 6, 6, 6, 8]
    );
}

#[test]
fn free_group_subgroup_classes() {
    assert_eq!(
        degrees(low_index_tables(&free_group(1), 4)),
        vec![1, 2, 3, 4]
    );
    // One class of index 1, three of index 2, and seven of index 3.
    assert_eq!(
        degrees(low_index_tables(&free_group(2), 3)),
        vec![1, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3]
    );
}

#[test]
fn cyclic_subgroups() {
    assert_eq!(degrees(low_index_tables(&cyclic(6), 6)), vec![1, 2, 3, 6]);
    assert_eq!(degrees(low_index_tables(&cyclic(5), 4)), vec![1]);
}

#[test]
fn tables_are_valid_and_canonical() {
    let presentation = coxeter_a3();
    for table in low_index_tables(&presentation, 12) {
        assert_consistent(&table);
        assert_closed(&table, &presentation, &[]);
        assert_transitive(&table);
        assert!(table.is_complete());
        assert!(is_canonical(&table));
    }
}

#[test]
fn no_two_tables_are_relabelings() {
    let tables: Vec<_> = low_index_tables(&coxeter_a3(), 12).collect();
    for (i, a) in tables.iter().enumerate() {
        for b in tables.iter().skip(i + 1) {
            if a.len() != b.len() {
                continue;
            }
            for start in 0..b.len() {
                assert_ne!(&renumbered_from(b, start), a);
            }
        }
    }
}

#[test]
fn external_node_budget() {
    let mut search = low_index_tables(&coxeter_a3(), 24);
    let mut found = Vec::new();
    while search.nodes_visited() < 20 {
        match search.step() {
            Step::Yielded(table) => found.push(table),
            Step::Expanded(_) => (),
            Step::Exhausted => break,
        }
    }
    assert_eq!(search.nodes_visited(), 20);

    // Resuming from a snapshot finds the same remaining tables.
    let snapshot = search.clone();
    let rest: Vec<_> = search.collect();
    assert_eq!(snapshot.collect::<Vec<_>>(), rest);
    assert_eq!(found.len() + rest.len(), 11);
}
