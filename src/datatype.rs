// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

// used to print out readable forms of a value
use std::fmt;
// column names are shared by every record of a result set
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single stored value. Nulls are modelled as `Option<Scalar>` at the record level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Real(r) => Some(*r),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }
    /// SQL literal form, used when placeholders are substituted for display.
    /// Reals always carry a decimal point or an exponent so they read back as reals.
    pub fn to_literal(&self) -> String {
        match self {
            Scalar::Integer(i) => i.to_string(),
            Scalar::Real(r) if r.is_finite() => format!("{r:?}"),
            Scalar::Real(_) => "NULL".to_string(),
            Scalar::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Real(r) => write!(f, "{r}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self { Scalar::Integer(i) }
}
impl From<f64> for Scalar {
    fn from(r: f64) -> Self { Scalar::Real(r) }
}
impl From<&str> for Scalar {
    fn from(s: &str) -> Self { Scalar::Text(s.to_string()) }
}
impl From<String> for Scalar {
    fn from(s: String) -> Self { Scalar::Text(s) }
}

impl ToSql for Scalar {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Scalar::Integer(i) => ToSqlOutput::from(*i),
            Scalar::Real(r) => ToSqlOutput::from(*r),
            Scalar::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}
impl FromSql for Scalar {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Err(FromSqlError::InvalidType),
            ValueRef::Integer(i) => Ok(Scalar::Integer(i)),
            ValueRef::Real(r) => Ok(Scalar::Real(r)),
            // blobs are not expected in the vehicle table, show them as text rather than fail
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                Ok(Scalar::Text(String::from_utf8_lossy(t).into_owned()))
            }
        }
    }
}

/// One row of the vehicle table, in the column order of the statement that produced it.
#[derive(Debug, Clone)]
pub struct Record {
    columns: Arc<Vec<String>>,
    values: Vec<Option<Scalar>>,
}

impl Record {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Option<Scalar>>) -> Self {
        Self { columns, values }
    }
    /// The non-null value of `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values[i].as_ref())
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn values(&self) -> &[Option<Scalar>] {
        &self.values
    }
}

/// Rows returned by one statement together with the column names in select order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub columns: Arc<Vec<String>>,
    pub records: Vec<Record>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
