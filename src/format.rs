//! Text rendering of search results.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datatype::Record;
use crate::schema::{self, column};

pub const NO_DATA: &str = "No data found for this search, OR, an error occurred";
pub const SEPARATOR: &str = "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

// value columns that absorb the rpm column following them
const AT_RPM: &[(&str, &str)] = &[
    (column::HORSEPOWER, column::HORSEPOWER_RPM),
    (column::TORQUE, column::TORQUE_RPM),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Only the basic fields.
    #[default]
    Simple,
    /// Every field that has a value.
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub text: String,
    pub count: usize,
}

impl Report {
    pub fn empty() -> Self {
        Self { text: NO_DATA.to_string(), count: 0 }
    }
}

pub fn format_records(records: &[Record], complexity: Complexity) -> Report {
    if records.is_empty() {
        return Report::empty();
    }
    let mut text = String::new();
    for record in records {
        text.push_str(&RecordText { record, complexity }.to_string());
        text.push_str(SEPARATOR);
        text.push('\n');
    }
    Report { text, count: records.len() }
}

// One `Label: value` line per shown field of a single record.
struct RecordText<'a> {
    record: &'a Record,
    complexity: Complexity,
}

impl fmt::Display for RecordText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        let mut absorbed = HashSet::new();
        for field in schema::FIELDS {
            if absorbed.contains(field.column) {
                continue;
            }
            let Some(value) = record.get(field.column) else {
                continue;
            };
            match self.complexity {
                Complexity::Simple if !field.basic => {}
                Complexity::Simple => writeln!(f, "{}: {value}", field.label)?,
                Complexity::Advanced => {
                    let rpm = AT_RPM
                        .iter()
                        .find(|(value_column, _)| *value_column == field.column)
                        .and_then(|(_, rpm_column)| record.get(rpm_column).map(|rpm| (*rpm_column, rpm)));
                    match rpm {
                        Some((rpm_column, rpm)) => {
                            absorbed.insert(rpm_column);
                            writeln!(f, "{}: {value} @ {rpm} RPM", field.label)?;
                        }
                        None => writeln!(f, "{}: {value}", field.label)?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// One `column: share%` line per column, in the order given.
pub fn format_coverage(coverage: &[(String, f64)]) -> String {
    coverage
        .iter()
        .map(|(column, share)| format!("{column}: {share:.2}%\n"))
        .collect()
}
