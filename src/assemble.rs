//! Final statements, either assembled from a compiled clause or taken verbatim.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::compile::Clause;
use crate::datatype::Scalar;
use crate::error::Result;
use crate::persist::check_identifier;

lazy_static! {
    // one SQL literal as produced by `Scalar::to_literal`
    static ref LITERAL: Regex =
        Regex::new(r"^(?:'(?:[^']|'')*'|-?[0-9]+(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?)").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub statement: String,
    pub parameters: Vec<Scalar>,
}

impl CompiledQuery {
    /// `SELECT * FROM <table>`, with the clause as its `WHERE` when there is one.
    pub fn assemble(table: &str, clause: Option<Clause>) -> Result<Self> {
        check_identifier(table)?;
        Ok(match clause {
            Some(clause) => Self {
                statement: format!("SELECT * FROM {table} WHERE {}", clause.template),
                parameters: clause.params,
            },
            None => Self { statement: format!("SELECT * FROM {table}"), parameters: Vec::new() },
        })
    }
    /// The statement with every placeholder replaced by its literal, for display only.
    pub fn substituted(&self) -> String {
        let mut parameters = self.parameters.iter().peekable();
        let mut text = String::with_capacity(self.statement.len() + 8 * self.parameters.len());
        for ch in self.statement.chars() {
            match (ch, parameters.next_if(|_| ch == '?')) {
                (_, Some(p)) => text.push_str(&p.to_literal()),
                (ch, None) => text.push(ch),
            }
        }
        text
    }
}

/// Recovers the parameters from a substituted statement, given the template it came from.
/// `None` when the text does not line up with the template.
pub fn extract_literals(template: &str, substituted: &str) -> Option<Vec<Scalar>> {
    let mut literals = Vec::new();
    let mut rest = substituted;
    for ch in template.chars() {
        if ch == '?' {
            let found = LITERAL.find(rest)?;
            literals.push(parse_literal(found.as_str())?);
            rest = &rest[found.end()..];
        } else {
            rest = rest.strip_prefix(ch)?;
        }
    }
    rest.is_empty().then_some(literals)
}

fn parse_literal(text: &str) -> Option<Scalar> {
    if let Some(quoted) = text.strip_prefix('\'') {
        return Some(Scalar::Text(quoted.strip_suffix('\'')?.replace("''", "'")));
    }
    if text.contains(['.', 'e', 'E']) {
        text.parse().ok().map(Scalar::Real)
    } else {
        text.parse().ok().map(Scalar::Integer)
    }
}

/// What gets executed for one search.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Compiled(CompiledQuery),
    /// Statement text supplied by the user and run as-is. Trusted input only.
    Verbatim(String),
}

impl Query {
    pub fn statement(&self) -> &str {
        match self {
            Query::Compiled(q) => &q.statement,
            Query::Verbatim(s) => s,
        }
    }
    pub fn parameters(&self) -> &[Scalar] {
        match self {
            Query::Compiled(q) => &q.parameters,
            Query::Verbatim(_) => &[],
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Query::Compiled(q) => write!(f, "{}", q.substituted()),
            Query::Verbatim(s) => write!(f, "{s}"),
        }
    }
}
