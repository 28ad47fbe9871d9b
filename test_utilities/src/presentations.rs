use std::fs;

use fpgroups::Presentation;

pub fn klein_four() -> Presentation {
    Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]]).unwrap()
}

pub fn cyclic(order: usize) -> Presentation {
    Presentation::from_letters(1, [vec![1; order]]).unwrap()
}

pub fn free_group(nr_generators: usize) -> Presentation {
    Presentation::from_letters(nr_generators, Vec::<Vec<i32>>::new()).unwrap()
}

pub fn symmetric_three() -> Presentation {
    Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2, 1, 2]]).unwrap()
}

/// The Coxeter group of type A3, isomorphic to the symmetric group of order
/// 24.
pub fn coxeter_a3() -> Presentation {
    Presentation::from_letters(
        3,
        [
            vec![1, 1],
            vec![2, 2],
            vec![3, 3],
            vec![1, 2, 1, 2, 1, 2],
            vec![1, 3, 1, 3],
            vec![2, 3, 2, 3, 2, 3],
        ],
    )
    .unwrap()
}

/// Read `testing/presentations/{name}.json` relative to the main crate.
pub fn presentation_fixture(name: &str) -> Presentation {
    let path = format!(
        "{}/../testing/presentations/{name}.json",
        env!("CARGO_MANIFEST_DIR")
    );
    let json = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&json).unwrap()
}
