//! Layered configuration.
//!
//! Settings are read with the `config` crate from an optional `automatch.toml`
//! (or any other format `config` recognizes by extension) and then from
//! environment variables prefixed with `AUTOMATCH__`, e.g.
//! `AUTOMATCH__DATABASE__PATH=cars.db`. Every field has a default, so an empty
//! configuration is valid.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AutomatchError, Result};
use crate::format::Complexity;

pub const DEFAULT_CONFIG_FILE: &str = "automatch";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub compiler: CompilerSettings,
    pub display: DisplaySettings,
    pub server: ServerSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: String,
    pub table: String,
}
impl Default for DatabaseSettings {
    fn default() -> Self {
        Self { path: "car_database.db".into(), table: "car_db_metric".into() }
    }
}

/// Constants the clause compiler needs that have no derivation in the data
/// itself. They are kept configurable rather than baked in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Band around a bore/stroke ratio of 1.0 that still counts as square.
    pub bore_stroke_tolerance: f64,
    /// Slack used when deciding whether a power-to-weight bound was left untouched.
    pub power_to_weight_tolerance: f64,
    /// Unit suffix stripped from the top speed column before casting.
    pub speed_unit: String,
}
impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            bore_stroke_tolerance: 0.01,
            power_to_weight_tolerance: 0.005,
            speed_unit: "km/h".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub complexity: Complexity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: String,
}
impl Default for ServerSettings {
    fn default() -> Self {
        Self { address: "127.0.0.1:8080".into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub filter: String,
}
impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: "info".into() }
    }
}

impl Settings {
    /// Reads `file` (without extension, missing is fine) and the environment.
    pub fn load(file: Option<&str>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(file.unwrap_or(DEFAULT_CONFIG_FILE)).required(false))
            .add_source(Environment::with_prefix("AUTOMATCH").separator("__"))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }
    /// The speed unit is spliced into the compiled statement, where a `?` would read as a placeholder.
    pub fn validate(&self) -> Result<()> {
        let unit = &self.compiler.speed_unit;
        if unit.trim().is_empty() || unit.contains('?') {
            return Err(AutomatchError::Config(format!("speed unit '{unit}' cannot be used in a statement")));
        }
        Ok(())
    }
}
