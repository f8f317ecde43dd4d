// used for persistence
use rusqlite::{Connection, OpenFlags, OptionalExtension, params_from_iter};
use std::path::Path;
use std::sync::{Arc, Mutex};

// so the table name can be checked once before it is ever spliced into a statement
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::datatype::{Record, ResultSet, Scalar};
use crate::error::{AutomatchError, Result};
use crate::schema::{self, column};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    /// A private in-memory database, kept open for the lifetime of the persistor.
    InMemory,
    /// An existing SQLite file, opened and closed again around every call.
    File(String),
}

// Searches and lookups only read, so a read-only file serves them.
#[derive(Debug, Clone, Copy)]
enum Access {
    Read,
    Write,
}

// ------------- Persistence -------------
pub struct Persistor {
    mode: PersistenceMode,
    table: String,
    // an in-memory database vanishes when its connection closes, so it is the one we hold on to
    memory: Option<Mutex<Connection>>,
}

/// Table names are spliced into statements, so only plain identifiers are accepted.
pub fn check_identifier(name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(AutomatchError::Config(format!("table name '{name}' is not a plain identifier")))
    }
}

impl Persistor {
    pub fn new(mode: PersistenceMode, table: &str) -> Result<Self> {
        check_identifier(table)?;
        let memory = match &mode {
            PersistenceMode::InMemory => Some(Mutex::new(Connection::open_in_memory()?)),
            PersistenceMode::File(path) => {
                if !is_valid_database(path) {
                    return Err(AutomatchError::InvalidDatabase(format!(
                        "'{path}' is not a readable SQLite database"
                    )));
                }
                None
            }
        };
        Ok(Self { mode, table: table.to_string(), memory })
    }
    /// Creates the database file if needed, together with the vehicle table.
    pub fn create(path: &str, table: &str) -> Result<Self> {
        check_identifier(table)?;
        {
            let connection = Connection::open(path)?;
            connection.execute_batch(&schema::create_table_sql(table))?;
        }
        Self::new(PersistenceMode::File(path.to_string()), table)
    }
    pub fn mode(&self) -> &PersistenceMode {
        &self.mode
    }
    pub fn table(&self) -> &str {
        &self.table
    }
    // Scoped acquisition: the connection is released on every exit path, errors included.
    fn with_connection<T>(&self, work: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        self.connect(Access::Read, work)
    }
    fn with_writable_connection<T>(&self, work: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        self.connect(Access::Write, work)
    }
    fn connect<T>(&self, access: Access, work: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        match (&self.memory, &self.mode) {
            (Some(memory), _) => {
                let connection = memory
                    .lock()
                    .map_err(|e| AutomatchError::Lock(e.to_string()))?;
                Ok(work(&connection)?)
            }
            (None, PersistenceMode::File(path)) => {
                let mode = match access {
                    Access::Read => OpenFlags::SQLITE_OPEN_READ_ONLY,
                    Access::Write => OpenFlags::SQLITE_OPEN_READ_WRITE,
                };
                let connection = Connection::open_with_flags(
                    path,
                    mode | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )?;
                Ok(work(&connection)?)
            }
            (None, PersistenceMode::InMemory) => Err(AutomatchError::Persistence(
                "in-memory database has no open connection".into(),
            )),
        }
    }
    pub fn create_table(&self) -> Result<()> {
        let ddl = schema::create_table_sql(&self.table);
        self.with_writable_connection(|c| c.execute_batch(&ddl))
    }
    /// Runs a script of statements, typically an `insert` dump of the dataset.
    pub fn execute_batch(&self, script: &str) -> Result<()> {
        self.with_writable_connection(|c| c.execute_batch(script))
    }
    /// Executes one statement with positional parameters and collects every row.
    pub fn query(&self, statement: &str, parameters: &[Scalar]) -> Result<ResultSet> {
        debug!(statement, parameters = parameters.len(), "executing");
        self.with_connection(|c| {
            let mut prepared = c.prepare(statement)?;
            let columns: Arc<Vec<String>> = Arc::new(
                prepared.column_names().into_iter().map(String::from).collect(),
            );
            let width = columns.len();
            let mut rows = prepared.query(params_from_iter(parameters.iter()))?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                let mut values = Vec::with_capacity(width);
                for i in 0..width {
                    values.push(row.get::<_, Option<Scalar>>(i)?);
                }
                records.push(Record::new(Arc::clone(&columns), values));
            }
            Ok(ResultSet { columns: Arc::clone(&columns), records })
        })
    }
    /// First column of the first row, e.g. an aggregate. `None` for SQL NULL.
    pub fn query_value(&self, statement: &str) -> Result<Option<Scalar>> {
        self.with_connection(|c| c.query_row(statement, [], |r| r.get::<_, Option<Scalar>>(0)))
    }
    /// First column of every row rendered as text, nulls skipped.
    pub fn query_texts(&self, statement: &str, parameters: &[Scalar]) -> Result<Vec<String>> {
        self.with_connection(|c| {
            let mut prepared = c.prepare(statement)?;
            let texts = prepared
                .query_map(params_from_iter(parameters.iter()), |r| r.get::<_, Option<Scalar>>(0))?
                .filter_map(|value| match value {
                    Ok(Some(scalar)) => Some(Ok(scalar.to_string())),
                    Ok(None) => None,
                    Err(e) => Some(Err(e)),
                })
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(texts)
        })
    }
    /// Distinct non-null values of one column in ascending order.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>> {
        let statement = format!(
            "select distinct {column} from {table} where {column} is not null order by {column}",
            table = self.table
        );
        self.query_texts(&statement, &[])
    }
    pub fn makes(&self) -> Result<Vec<String>> {
        self.distinct_values(column::MAKE)
    }
    /// Models offered by any of the comma-separated makes, sorted and distinct.
    pub fn models_for(&self, makes: &str) -> Result<Vec<String>> {
        let makes: Vec<Scalar> = makes
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(Scalar::from)
            .collect();
        if makes.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; makes.len()].join(", ");
        let statement = format!(
            "select distinct {model} from {table} where {make} in ({placeholders}) and {model} is not null order by {model}",
            model = column::MODEL,
            make = column::MAKE,
            table = self.table
        );
        self.query_texts(&statement, &makes)
    }
    /// The manufacturer website recorded for a make, if any.
    pub fn website_for(&self, make: &str) -> Result<Option<String>> {
        let statement = format!(
            "select {website} from {table} where {make} = ? and {website} is not null and {website} != '' limit 1",
            website = column::WEBSITE,
            make = column::MAKE,
            table = self.table
        );
        self.with_connection(|c| {
            c.query_row(&statement, [make], |r| r.get::<_, String>(0)).optional()
        })
    }
    /// Share of records (in percent) with a non-null value, per column, highest first.
    pub fn coverage(&self, columns: &[&str]) -> Result<Vec<(String, f64)>> {
        let table = self.table.clone();
        let mut shares = self.with_connection(|c| {
            let total: i64 = c.query_row(&format!("select count(*) from {table}"), [], |r| r.get(0))?;
            let mut shares = Vec::with_capacity(columns.len());
            for column in columns {
                let present: i64 = c.query_row(
                    &format!("select count({column}) from {table} where {column} is not null"),
                    [],
                    |r| r.get(0),
                )?;
                let share = if total > 0 { present as f64 / total as f64 * 100.0 } else { 0.0 };
                shares.push((column.to_string(), share));
            }
            Ok(shares)
        })?;
        shares.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(shares)
    }
}

/// True when the file can be read and SQLite recognizes it as a database.
pub fn is_valid_database(path: &str) -> bool {
    if std::fs::File::open(Path::new(path)).is_err() {
        warn!(path, "database file cannot be read");
        return false;
    }
    let probe = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .and_then(|c| c.query_row("select count(*) from sqlite_master", [], |r| r.get::<_, i64>(0)));
    match probe {
        Ok(_) => true,
        Err(e) => {
            warn!(path, error = %e, "not a valid SQLite database");
            false
        }
    }
}
