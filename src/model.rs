// Records pushed to the test server and the `key;value` parsing that
// builds them. Both files use the same line format: one `;` separated
// pair per line, empty lines ignored.

use crate::error::{PushError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Exam-level metadata read from `metadata.csv`.
///
/// `id` is not a metadata key: it is copied from `gen_date` once every
/// line has been applied, see [`parse_metadata`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Test {
    pub id: i64,
    pub student_group: String,
    pub title: String,
    /// Allotted time in minutes.
    pub temps: i16,
    pub assignatura: String,
    pub especialitat: String,
    pub gen_date: i64,
    pub num_permutations: i64,
}

/// One shuffled variant of the exam, read from a line of `solutions.csv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    pub index: usize,
    pub solutions: String,
}

impl Test {
    /// Apply one metadata pair. Unknown keys only warn.
    pub fn assign_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "Titol" => self.title = value.to_string(),
            "Assignatura" => self.assignatura = value.to_string(),
            "Especialitat" => self.especialitat = value.to_string(),
            "Temps" => self.temps = parse_minutes(value)?,
            "GenDate" => {
                self.gen_date = value.parse().map_err(|_| PushError::IntegerField {
                    field: "GenDate",
                    value: value.to_string(),
                })?
            }
            "NumPermutations" => {
                self.num_permutations = value.parse().map_err(|_| PushError::IntegerField {
                    field: "NumPermutations",
                    value: value.to_string(),
                })?
            }
            _ => warn!(key, value, "unknown Test field"),
        }
        Ok(())
    }

    /// File names of the two renderings of permutation `index`.
    pub fn permutation_pdfs(index: usize) -> [String; 2] {
        [format!("{:04}n.pdf", index), format!("{:04}s.pdf", index)]
    }
}

// Only minutes ("90m") are understood for now.
fn parse_minutes(value: &str) -> Result<i16> {
    let minutes = value
        .strip_suffix('m')
        .ok_or_else(|| PushError::DurationFormat(value.to_string()))?;
    minutes
        .parse()
        .map_err(|_| PushError::DurationValue(value.to_string()))
}

/// Split a record line into its key and value.
///
/// The line must contain exactly one `;`; `file` only labels the error.
pub fn split_pair<'a>(file: &'static str, line: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = line.split(';');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key, value)),
        _ => Err(PushError::MalformedLine {
            file,
            line: line.to_string(),
        }),
    }
}

/// Build a [`Test`] from the contents of `metadata.csv`.
pub fn parse_metadata(text: &str) -> Result<Test> {
    let mut test = Test::default();
    for line in text.lines().filter(|l| !l.is_empty()) {
        let (key, value) = split_pair("metadata.csv", line)?;
        test.assign_field(key, value)?;
    }
    test.id = test.gen_date;
    Ok(test)
}

/// Read the permutations listed in `solutions.csv`.
///
/// The declared index of each line must be exactly its zero-based line
/// number in the file (blank lines still count as positions).
pub fn parse_permutations(text: &str) -> Result<Vec<Permutation>> {
    let mut permutations = Vec::new();
    for (position, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let (index, solutions) = split_pair("solutions.csv", line)?;
        if index != position.to_string() {
            return Err(PushError::IndexMismatch {
                expected: position,
                found: index.to_string(),
            });
        }
        permutations.push(Permutation {
            index: position,
            solutions: solutions.to_string(),
        });
    }
    Ok(permutations)
}
