//! Dataset-wide extremes of the numeric filter dimensions.
//!
//! The extremes double as slider endpoints for a front end and as the
//! reference values the compiler uses to decide that a range was left alone.
//! Resolution never fails: a backend error or an empty table yields the
//! documented fallback of the dimension, and the problem is logged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::persist::Persistor;
use crate::schema::column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericDimension {
    Year,
    Seats,
    Horsepower,
    CurbWeight,
    PowerToWeight,
    Displacement,
    TopSpeed,
}

impl NumericDimension {
    pub const ALL: [NumericDimension; 7] = [
        NumericDimension::Year,
        NumericDimension::Seats,
        NumericDimension::Horsepower,
        NumericDimension::CurbWeight,
        NumericDimension::PowerToWeight,
        NumericDimension::Displacement,
        NumericDimension::TopSpeed,
    ];
    /// Value reported when the dataset cannot tell.
    pub fn fallback(&self) -> f64 {
        match self {
            NumericDimension::Year => 1000.0,
            NumericDimension::Seats => 1.0,
            _ => 0.0,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            NumericDimension::Year => "Year",
            NumericDimension::Seats => "Seats",
            NumericDimension::Horsepower => "Engine HP",
            NumericDimension::CurbWeight => "Curb Weight (kg)",
            NumericDimension::PowerToWeight => "Power to Weight (hp/kg)",
            NumericDimension::Displacement => "Displacement (cm3)",
            NumericDimension::TopSpeed => "Top Speed (km/h)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extreme {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Bounds of every numeric dimension for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBounds {
    bounds: BTreeMap<NumericDimension, Bounds>,
}

impl ResolvedBounds {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with(mut self, dimension: NumericDimension, bounds: Bounds) -> Self {
        self.bounds.insert(dimension, bounds);
        self
    }
    /// Bounds of `dimension`; the fallback on both sides if it was never resolved.
    pub fn get(&self, dimension: NumericDimension) -> Bounds {
        self.bounds.get(&dimension).copied().unwrap_or_else(|| {
            let fallback = dimension.fallback();
            Bounds::new(fallback, fallback)
        })
    }
    pub fn iter(&self) -> impl Iterator<Item = (&NumericDimension, &Bounds)> {
        self.bounds.iter()
    }
}

/// Resolves one extreme of one dimension, substituting the fallback on any failure.
pub fn resolve(persistor: &Persistor, dimension: NumericDimension, extreme: Extreme) -> f64 {
    resolve_reporting(persistor, dimension, extreme).0
}

// The flag is false when the backend failed, as opposed to the data having no usable values.
fn resolve_reporting(persistor: &Persistor, dimension: NumericDimension, extreme: Extreme) -> (f64, bool) {
    match try_resolve(persistor, dimension, extreme) {
        Ok(Some(value)) => (value, true),
        Ok(None) => {
            debug!(?dimension, ?extreme, "no usable values, using fallback");
            (dimension.fallback(), true)
        }
        Err(e) => {
            warn!(?dimension, ?extreme, error = %e, "could not resolve bound, using fallback");
            (dimension.fallback(), false)
        }
    }
}

pub fn resolve_all(persistor: &Persistor) -> ResolvedBounds {
    resolve_all_reporting(persistor).0
}

/// Like [`resolve_all`], also counting the extremes that fell back because of a backend error.
pub fn resolve_all_reporting(persistor: &Persistor) -> (ResolvedBounds, usize) {
    let mut failures = 0;
    let mut resolved = ResolvedBounds::new();
    for d in NumericDimension::ALL {
        let (min, min_ok) = resolve_reporting(persistor, d, Extreme::Min);
        let (max, max_ok) = resolve_reporting(persistor, d, Extreme::Max);
        failures += usize::from(!min_ok) + usize::from(!max_ok);
        resolved = resolved.with(d, Bounds::new(min, max));
    }
    info!(table = persistor.table(), failures, "resolved numeric bounds");
    (resolved, failures)
}

fn try_resolve(persistor: &Persistor, dimension: NumericDimension, extreme: Extreme) -> Result<Option<f64>> {
    let table = persistor.table();
    let aggregate = match extreme {
        Extreme::Min => "min",
        Extreme::Max => "max",
    };
    let simple = |col: &str| aggregate_value(persistor, &format!("select {aggregate}({col}) from {table}"));
    match dimension {
        NumericDimension::Year => {
            // the range starts at the earliest first year and ends at the latest last year
            let col = match extreme {
                Extreme::Min => column::YEAR_FROM,
                Extreme::Max => column::YEAR_TO,
            };
            Ok(simple(col)?.map(f64::round))
        }
        NumericDimension::Horsepower => simple(column::HORSEPOWER),
        NumericDimension::CurbWeight => simple(column::CURB_WEIGHT),
        NumericDimension::Displacement => simple(column::DISPLACEMENT),
        NumericDimension::Seats => seat_extreme(persistor, extreme),
        NumericDimension::TopSpeed => aggregate_value(
            persistor,
            &format!(
                "select {aggregate}(cast({col} as real)) from {table} \
                 where {col} is not null and {col} != '' and {col} not glob '*[^0-9.]*'",
                col = column::TOP_SPEED
            ),
        ),
        NumericDimension::PowerToWeight => Ok(aggregate_value(
            persistor,
            &format!(
                "select {aggregate}(cast({hp} as real) / nullif({weight}, 0)) from {table}",
                hp = column::HORSEPOWER,
                weight = column::CURB_WEIGHT
            ),
        )?
        .map(round_to_hundredths)),
    }
}

fn aggregate_value(persistor: &Persistor, statement: &str) -> Result<Option<f64>> {
    Ok(persistor.query_value(statement)?.and_then(|v| v.as_f64()))
}

// Seat counts are stored as lists such as "2, 4" or "5,7"; every token counts.
fn seat_extreme(persistor: &Persistor, extreme: Extreme) -> Result<Option<f64>> {
    let statement = format!(
        "select {col} from {table} where {col} is not null",
        col = column::SEATS,
        table = persistor.table()
    );
    let tokens = persistor
        .query_texts(&statement, &[])?
        .into_iter()
        .flat_map(|seats| seat_tokens(&seats))
        .collect::<Vec<i64>>();
    let extreme = match extreme {
        Extreme::Min => tokens.iter().min(),
        Extreme::Max => tokens.iter().max(),
    };
    Ok(extreme.map(|v| *v as f64))
}

/// Parses a comma-separated seat list, skipping tokens that are not integers.
pub fn seat_tokens(seats: &str) -> Vec<i64> {
    seats
        .split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
