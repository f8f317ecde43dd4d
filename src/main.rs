use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use automatch::bounds::NumericDimension;
use automatch::database::Database;
use automatch::engine::{Engine, SearchOptions, SearchResult};
use automatch::error::{AutomatchError, Result};
use automatch::facet::{BodyStyle, Facet};
use automatch::filter::FilterSpec;
use automatch::format::{format_coverage, Complexity};
use automatch::persist::{PersistenceMode, Persistor};
use automatch::schema::COVERAGE_COLUMNS;
use automatch::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "automatch")]
#[command(version)]
#[command(about = "Faceted search over a vehicle specification database")]
#[command(long_about = "Faceted search over a vehicle specification database

Filters are read from a JSON file, e.g.
  { \"year\": { \"from\": 1990, \"to\": 2005 },
    \"fuel_types\": [\"Diesel\"], \"drivetrains\": [\"AWD\"], \"body_styles\": [\"SUV\"] }

CONFIGURATION:
  Settings are read from automatch.toml (or the file given with --config) and
  from AUTOMATCH__SECTION__KEY environment variables:
    [database]
    path = \"car_database.db\"
    table = \"car_db_metric\"

    [compiler]
    bore_stroke_tolerance = 0.01
    power_to_weight_tolerance = 0.005
    speed_unit = \"km/h\"

    [display]
    complexity = \"simple\"

    [server]
    address = \"127.0.0.1:8080\"

    [log]
    filter = \"info\"")]
struct Args {
    /// Configuration file, without extension
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Database file, overrides the configured path
    #[arg(short, long, value_name = "FILE")]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a filter, run it and print the report
    Search {
        /// JSON file holding the filter
        #[arg(short, long, value_name = "FILE")]
        filter: Option<String>,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long, value_parser = ["simple", "advanced"])]
        complexity: Option<String>,
        /// Also write the matching rows to this CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<String>,
        /// Print the statement with its parameters substituted
        #[arg(long)]
        show_statement: bool,
    },
    /// Run a statement as-is and format its rows like a search
    Import {
        #[arg(short, long, value_name = "SQL")]
        statement: String,
        #[arg(long, value_parser = ["simple", "advanced"])]
        complexity: Option<String>,
        #[arg(long, value_name = "PATH")]
        csv: Option<String>,
    },
    /// Dataset extremes of every numeric dimension
    Bounds,
    /// Number of series values per body style
    Categories,
    /// Distinct makes
    Makes,
    /// Models offered by one or more comma-separated makes
    Models {
        #[arg(long)]
        make: String,
    },
    /// Manufacturer website of a make
    Website {
        #[arg(long)]
        make: String,
    },
    /// Share of records with data, per filtered column
    Coverage,
    /// Create the database file and table, then run an SQL script against it
    Init {
        #[arg(short, long, value_name = "FILE")]
        script: Option<String>,
    },
    /// Serve searches as JSON over HTTP
    Serve {
        #[arg(long)]
        address: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Warning: could not load configuration: {e}");
            Settings::default()
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log.filter.clone())),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    match run(args, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "automatch failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, settings: Settings) -> Result<()> {
    let path = args.database.unwrap_or_else(|| settings.database.path.clone());
    let table = settings.database.table.clone();
    if let Command::Init { script } = &args.command {
        let persistor = Persistor::create(&path, &table)?;
        if let Some(script) = script {
            persistor.execute_batch(&std::fs::read_to_string(script)?)?;
        }
        println!("Initialized {table} in {path}");
        return Ok(());
    }

    let persistor = Persistor::new(PersistenceMode::File(path), &table)?;
    let database = Database::new(persistor, settings.compiler.clone());
    let default_complexity = settings.display.complexity;
    match args.command {
        Command::Search { filter, make, model, complexity, csv, show_statement } => {
            let mut spec = match filter {
                Some(file) => serde_json::from_str::<FilterSpec>(&std::fs::read_to_string(file)?)?,
                None => FilterSpec::new(),
            };
            spec.make = make.or(spec.make);
            spec.model = model.or(spec.model);
            let options = SearchOptions { csv_path: csv, show_statement };
            let complexity = parse_complexity(complexity.as_deref()).unwrap_or(default_complexity);
            print_result(&Engine::new(&database).search(&spec, complexity, &options));
        }
        Command::Import { statement, complexity, csv } => {
            let options = SearchOptions { csv_path: csv, show_statement: false };
            let complexity = parse_complexity(complexity.as_deref()).unwrap_or(default_complexity);
            print_result(&Engine::new(&database).import(&statement, complexity, &options));
        }
        Command::Bounds => {
            let bounds = database.bounds();
            for dimension in NumericDimension::ALL {
                let b = bounds.get(dimension);
                println!("{}: {} - {}", dimension.label(), b.min, b.max);
            }
        }
        Command::Categories => {
            let index = database.category_index();
            for style in BodyStyle::ALL {
                println!("{}: {}", style.label(), index.get(*style).len());
            }
        }
        Command::Makes => database.persistor().makes()?.iter().for_each(|m| println!("{m}")),
        Command::Models { make } => {
            database.persistor().models_for(&make)?.iter().for_each(|m| println!("{m}"))
        }
        Command::Website { make } => match database.persistor().website_for(&make)? {
            Some(website) => println!("{website}"),
            None => println!("No website recorded for {make}"),
        },
        Command::Coverage => {
            print!("{}", format_coverage(&database.persistor().coverage(COVERAGE_COLUMNS)?));
        }
        Command::Serve { address } => {
            let address = address.unwrap_or_else(|| settings.server.address.clone());
            info!(%address, "starting server");
            let runtime = tokio::runtime::Runtime::new().map_err(|e| AutomatchError::Server(e.to_string()))?;
            runtime.block_on(automatch::server::serve(Arc::new(database), &address, default_complexity))?;
        }
        Command::Init { .. } => {}
    }
    Ok(())
}

fn parse_complexity(complexity: Option<&str>) -> Option<Complexity> {
    match complexity? {
        "simple" => Some(Complexity::Simple),
        "advanced" => Some(Complexity::Advanced),
        _ => None,
    }
}

fn print_result(result: &SearchResult) {
    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }
    if let Some(statement) = &result.statement {
        println!("{statement}\n");
    }
    print!("{}", result.report.text);
    if result.count() == 0 {
        println!();
    }
    println!("Results: {}", result.count());
    match result.exported {
        Some(true) => println!("Results exported"),
        Some(false) => eprintln!("Failed to export results to CSV"),
        None => {}
    }
}
