//! Keyword categorization of the free-text series column into body styles.
//!
//! Series strings such as "Coupe 2-door" or "Crossover (facelift)" are mapped to
//! a [`BodyStyle`] by keyword containment. The mapping is computed once for the
//! whole table into a [`CategoryIndex`] and cached until explicitly invalidated.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::{AutomatchError, Result};
use crate::facet::{BodyStyle, Facet};
use crate::persist::Persistor;
use crate::schema::column;

/// Ordered category to keyword mapping. Earlier categories win.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<(BodyStyle, Vec<String>)>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(
            BodyStyle::ALL
                .iter()
                .map(|style| (*style, style.keywords().iter().map(|k| k.to_string()).collect()))
                .collect(),
        )
    }
}

impl KeywordTable {
    pub fn new(entries: Vec<(BodyStyle, Vec<String>)>) -> Self {
        // keywords are stored lowercased so matching is a plain substring test
        let entries = entries
            .into_iter()
            .map(|(style, keywords)| (style, keywords.iter().map(|k| k.to_lowercase()).collect()))
            .collect();
        Self { entries }
    }
    pub fn entries(&self) -> &[(BodyStyle, Vec<String>)] {
        &self.entries
    }
}

/// The first category in table order with a keyword contained in `value`, ignoring case.
pub fn categorize(value: &str, table: &KeywordTable) -> Option<BodyStyle> {
    let value = value.to_lowercase();
    table
        .entries
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| value.contains(k.as_str())))
        .map(|(style, _)| *style)
}

/// Raw series values per body style, each list in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    members: BTreeMap<BodyStyle, Vec<String>>,
}

impl CategoryIndex {
    pub fn build<S: AsRef<str>>(values: &[S], table: &KeywordTable) -> Self {
        let mut members: BTreeMap<BodyStyle, Vec<String>> = BTreeMap::new();
        for value in values {
            if let Some(style) = categorize(value.as_ref(), table) {
                members.entry(style).or_default().push(value.as_ref().to_string());
            }
        }
        Self { members }
    }
    /// Members of one category; empty when nothing matched it.
    pub fn get(&self, style: BodyStyle) -> &[String] {
        self.members.get(&style).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn iter(&self) -> impl Iterator<Item = (&BodyStyle, &Vec<String>)> {
        self.members.iter()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ------------- Cache -------------
pub struct CategoryCache {
    table: KeywordTable,
    index: RwLock<Option<Arc<CategoryIndex>>>,
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new(KeywordTable::default())
    }
}

impl CategoryCache {
    pub fn new(table: KeywordTable) -> Self {
        Self { table, index: RwLock::new(None) }
    }
    /// The cached index, built from the distinct series values on first use.
    /// A failed build yields an empty index that is not kept.
    pub fn get_or_build(&self, persistor: &Persistor) -> Arc<CategoryIndex> {
        match self.cached() {
            Ok(Some(index)) => return index,
            Ok(None) => {}
            Err(e) => warn!(error = %e, "category cache unavailable"),
        }
        match persistor.distinct_values(column::SERIES) {
            Ok(series) => {
                let index = Arc::new(CategoryIndex::build(&series, &self.table));
                debug!(series = series.len(), categories = index.members.len(), "built category index");
                if let Ok(mut slot) = self.index.write() {
                    *slot = Some(Arc::clone(&index));
                }
                index
            }
            Err(e) => {
                warn!(error = %e, "could not read series values, no body styles available");
                Arc::new(CategoryIndex::default())
            }
        }
    }
    /// Drops the cached index so the next lookup rebuilds it.
    pub fn invalidate(&self) {
        match self.index.write() {
            Ok(mut slot) => *slot = None,
            Err(e) => warn!(error = %e, "could not invalidate category cache"),
        }
    }
    pub fn is_cached(&self) -> bool {
        matches!(self.cached(), Ok(Some(_)))
    }
    fn cached(&self) -> Result<Option<Arc<CategoryIndex>>> {
        let slot = self.index.read().map_err(|e| AutomatchError::Lock(e.to_string()))?;
        Ok(slot.clone())
    }
}
