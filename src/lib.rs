//! AutoMatch – faceted search over a wide table of vehicle specifications.
//!
//! A search combines many independent, optional filter dimensions into a single
//! parameterized SQLite statement:
//! * numeric ranges (year, seats, horsepower, curb weight, power-to-weight,
//!   displacement, top speed), see [`bounds::NumericDimension`];
//! * enumerated facets whose options stand for several raw stored strings
//!   (fuel type, drivetrain, transmission, ...), see [`facet`];
//! * body styles, which are not stored at all but derived from the free-text
//!   series column by keyword, see [`categorize`].
//!
//! The interesting part is deciding what is *not* a constraint. A range that
//! still sits on the dataset's own minimum or maximum, or a facet with every
//! option (or none) ticked, contributes nothing to the statement.
//!
//! ## Modules
//! * [`filter`] – The [`filter::FilterSpec`] a caller fills in.
//! * [`bounds`] – Dataset extremes per numeric dimension, with fallbacks.
//! * [`categorize`] – Keyword categorization of series values and its cache.
//! * [`compile`] – The pure clause compiler.
//! * [`assemble`] – Final statements, placeholder substitution for display.
//! * [`format`] / [`export`] – Text report, coverage report, CSV.
//! * [`persist`] – SQLite access, in memory or on file.
//! * [`database`] / [`engine`] – Session caches and the search entry point.
//! * [`server`] – JSON over HTTP.
//!
//! ## Persistence
//! The [`persist::Persistor`] never keeps a file connection open between calls;
//! every lookup acquires one and releases it on all paths. The in-memory mode
//! holds its single connection for the lifetime of the persistor.
//!
//! ## Quick Start
//! ```
//! use automatch::database::Database;
//! use automatch::engine::{Engine, SearchOptions};
//! use automatch::facet::FuelType;
//! use automatch::filter::FilterSpec;
//! use automatch::format::Complexity;
//! use automatch::persist::{PersistenceMode, Persistor};
//! use automatch::settings::CompilerSettings;
//!
//! let persistor = Persistor::new(PersistenceMode::InMemory, "car_db_metric").unwrap();
//! persistor.create_table().unwrap();
//! persistor.execute_batch(
//!     "insert into car_db_metric (id, make, model, series, engine_type) \
//!      values (1, 'Tesla', 'Model S', 'Sedan', 'Electric'), \
//!             (2, 'Lada', 'Niva', 'SUV 3-door', 'Gasoline');",
//! ).unwrap();
//! let db = Database::new(persistor, CompilerSettings::default());
//! let spec = FilterSpec::new().with_fuel_types([FuelType::Electric]);
//! let result = Engine::new(&db).search(&spec, Complexity::Simple, &SearchOptions::default());
//! assert_eq!(result.count(), 1);
//! assert!(result.report.text.contains("Make: Tesla"));
//! ```

pub mod error;
pub mod settings;
pub mod datatype;
pub mod schema;
pub mod persist;
pub mod facet;
pub mod bounds;
pub mod categorize;
pub mod filter;
pub mod compile;
pub mod assemble;
pub mod format;
pub mod export;
pub mod database;
pub mod engine;
pub mod server;
