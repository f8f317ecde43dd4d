use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::bounds::{self, ResolvedBounds};
use crate::categorize::{CategoryCache, CategoryIndex};
use crate::persist::Persistor;
use crate::settings::CompilerSettings;

// ------------- Database -------------
// Owns the persistor and everything derived from the dataset once per session.
pub struct Database {
    persistor: Persistor,
    compiler: CompilerSettings,
    bounds: RwLock<Option<ResolvedBounds>>,
    categories: CategoryCache,
}

impl Database {
    pub fn new(persistor: Persistor, compiler: CompilerSettings) -> Self {
        info!(table = persistor.table(), mode = ?persistor.mode(), "opened vehicle database");
        Self {
            persistor,
            compiler,
            bounds: RwLock::new(None),
            categories: CategoryCache::default(),
        }
    }
    pub fn persistor(&self) -> &Persistor {
        &self.persistor
    }
    pub fn compiler_settings(&self) -> &CompilerSettings {
        &self.compiler
    }
    /// Bounds of every numeric dimension, resolved on first use.
    pub fn bounds(&self) -> ResolvedBounds {
        if let Ok(cached) = self.bounds.read() {
            if let Some(bounds) = cached.as_ref() {
                return bounds.clone();
            }
        }
        let (resolved, failures) = bounds::resolve_all_reporting(&self.persistor);
        // fallbacks caused by a backend error are served but not kept
        if failures > 0 {
            warn!(failures, "bounds not cached, will resolve again on next use");
            return resolved;
        }
        match self.bounds.write() {
            Ok(mut slot) => *slot = Some(resolved.clone()),
            Err(e) => warn!(error = %e, "bounds cache unavailable"),
        }
        resolved
    }
    pub fn category_index(&self) -> Arc<CategoryIndex> {
        self.categories.get_or_build(&self.persistor)
    }
    /// Forgets the session caches, e.g. after the table was reloaded.
    pub fn refresh(&self) {
        match self.bounds.write() {
            Ok(mut slot) => *slot = None,
            Err(e) => warn!(error = %e, "bounds cache unavailable"),
        }
        self.categories.invalidate();
        info!("session caches cleared");
    }
}
