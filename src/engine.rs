//! One search from filter to report.
//!
//! The engine is the error boundary of a search: whatever goes wrong while the
//! statement runs is logged and turned into an empty report carrying the error
//! message, so callers always get a [`SearchResult`] back.

use serde::Serialize;
use tracing::{info, warn};

use crate::assemble::{CompiledQuery, Query};
use crate::compile::compile;
use crate::database::Database;
use crate::datatype::ResultSet;
use crate::export::{export_csv, render_statement};
use crate::filter::FilterSpec;
use crate::format::{format_records, Complexity, Report};

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Also write the matching rows to this CSV file.
    pub csv_path: Option<String>,
    /// Return the statement with its literals substituted.
    pub show_statement: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub report: Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<bool>,
    #[serde(skip)]
    pub rows: ResultSet,
}

impl SearchResult {
    pub fn count(&self) -> usize {
        self.report.count
    }
    fn failed(error: String, statement: Option<String>, warnings: Vec<String>) -> Self {
        Self {
            report: Report::empty(),
            statement,
            warnings,
            error: Some(error),
            exported: None,
            rows: ResultSet::default(),
        }
    }
}

pub struct Engine<'db> {
    database: &'db Database,
}

impl<'db> Engine<'db> {
    pub fn new(database: &'db Database) -> Self {
        Self { database }
    }
    pub fn search(&self, spec: &FilterSpec, complexity: Complexity, options: &SearchOptions) -> SearchResult {
        let bounds = self.database.bounds();
        let index = self.database.category_index();
        let compilation = compile(spec, &bounds, &index, self.database.compiler_settings());
        for warning in &compilation.warnings {
            warn!(%warning, "filter validation");
        }
        let table = self.database.persistor().table();
        match CompiledQuery::assemble(table, compilation.where_clause) {
            Ok(query) => self.run(Query::Compiled(query), complexity, options, compilation.warnings),
            Err(e) => SearchResult::failed(e.to_string(), None, compilation.warnings),
        }
    }
    /// Runs a user-supplied statement as-is. Trusted input only.
    pub fn import(&self, statement: &str, complexity: Complexity, options: &SearchOptions) -> SearchResult {
        info!(statement, "running imported statement");
        self.run(Query::Verbatim(statement.to_string()), complexity, options, Vec::new())
    }
    fn run(&self, query: Query, complexity: Complexity, options: &SearchOptions, warnings: Vec<String>) -> SearchResult {
        let statement = options.show_statement.then(|| render_statement(&query));
        match self.database.persistor().query(query.statement(), query.parameters()) {
            Ok(rows) => {
                let exported = options.csv_path.as_deref().map(|path| export_csv(path, &rows));
                let report = format_records(&rows.records, complexity);
                info!(count = report.count, "search complete");
                SearchResult { report, statement, warnings, error: None, exported, rows }
            }
            Err(e) => {
                warn!(statement = query.statement(), error = %e, "search failed");
                SearchResult::failed(e.to_string(), statement, warnings)
            }
        }
    }
}
