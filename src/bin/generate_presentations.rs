// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Executable for generating test presentations for testing purposes.
//!
//! This program builds a few small finitely presented groups and serializes
//! them to JSON files in the testing/presentations directory.

use std::error::Error;
use std::fs;

use fpgroups::{FpGroupError, Presentation, Word};

fn serialize_presentation(
    presentation: Result<Presentation, FpGroupError>,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    let filename = format!("testing/presentations/{name}.json");
    let json = serde_json::to_string_pretty(&presentation?)?;
    fs::write(&filename, json)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Ensures the directory exists and is empty
    if fs::exists("testing/presentations")? {
        fs::remove_dir_all("testing/presentations")?;
    }
    fs::create_dir_all("testing/presentations")?;

    println!("Generating test presentations...");

    serialize_presentation(klein_four(), "klein_four")?;
    serialize_presentation(cyclic_three(), "cyclic_three")?;
    serialize_presentation(symmetric_three(), "symmetric_three")?;
    serialize_presentation(coxeter_a3(), "coxeter_a3")?;

    Ok(())
}

/// Order 4, both generators involutions that commute.
fn klein_four() -> Result<Presentation, FpGroupError> {
    Presentation::from_letters(2, [vec![1, 1], vec![2, 2], vec![1, 2, 1, 2]])
}

fn cyclic_three() -> Result<Presentation, FpGroupError> {
    Presentation::new(1, vec![Word::generator(1).power(3)])
}

/// Order 6, as the Coxeter group of type A2.
fn symmetric_three() -> Result<Presentation, FpGroupError> {
    let a = Word::generator(1);
    let b = Word::generator(2);
    Presentation::new(
        2,
        vec![a.power(2), b.power(2), Word::product([&a, &b]).power(3)],
    )
}

/// Order 24, the Coxeter group of type A3.
fn coxeter_a3() -> Result<Presentation, FpGroupError> {
    let a = Word::generator(1);
    let b = Word::generator(2);
    let c = Word::generator(3);
    Presentation::new(
        3,
        vec![
            a.power(2),
            b.power(2),
            c.power(2),
            Word::product([&a, &b]).power(3),
            Word::product([&a, &c]).power(2),
            Word::product([&b, &c]).power(3),
        ],
    )
}
