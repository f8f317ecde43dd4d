mod common;

use automatch::bounds::NumericDimension;
use automatch::compile::YEAR_ORDER_WARNING;
use automatch::database::Database;
use automatch::engine::{Engine, SearchOptions};
use automatch::facet::{BodyStyle, BoreStroke, Country, CylinderLayout, Drivetrain, FuelType, Transmission};
use automatch::filter::FilterSpec;
use automatch::format::{Complexity, NO_DATA};
use automatch::persist::{PersistenceMode, Persistor};
use automatch::settings::CompilerSettings;

fn makes(result: &automatch::engine::SearchResult) -> Vec<String> {
    let mut makes: Vec<String> = result
        .rows
        .records
        .iter()
        .filter_map(|r| r.get("make").map(|m| m.to_string()))
        .collect();
    makes.sort();
    makes
}

fn search(spec: &FilterSpec) -> automatch::engine::SearchResult {
    let db = common::seeded_database();
    Engine::new(&db).search(spec, Complexity::Simple, &SearchOptions::default())
}

#[test]
fn untouched_filter_returns_everything() {
    let db = common::seeded_database();
    let options = SearchOptions { csv_path: None, show_statement: true };
    let result = Engine::new(&db).search(&FilterSpec::new(), Complexity::Simple, &options);
    assert_eq!(result.count(), 6);
    assert_eq!(result.statement.as_deref(), Some("SELECT * FROM car_db_metric"));
    assert!(result.error.is_none());
}

#[test]
fn bounds_taken_from_the_data_suppress_their_filter() {
    let db = common::seeded_database();
    let bounds = db.bounds();
    let spec = NumericDimension::ALL.iter().fold(FilterSpec::new(), |spec, d| {
        let b = bounds.get(*d);
        spec.with_range(*d, b.min, b.max)
    });
    let options = SearchOptions { csv_path: None, show_statement: true };
    let result = Engine::new(&db).search(&spec, Complexity::Simple, &options);
    assert_eq!(result.count(), 6);
    assert_eq!(result.statement.as_deref(), Some("SELECT * FROM car_db_metric"));
}

#[test]
fn values_rounding_onto_the_bounds_keep_every_row() {
    let db = common::seeded_database();
    let seats = db.bounds().get(NumericDimension::Seats);
    let year = db.bounds().get(NumericDimension::Year);
    assert_eq!((seats.min, year.min), (2.0, 0.0));
    let spec = FilterSpec::new()
        .with_range(NumericDimension::Seats, seats.min + 0.4, seats.max)
        .with_range(NumericDimension::Year, year.min + 0.4, year.max);
    let options = SearchOptions { csv_path: None, show_statement: true };
    let result = Engine::new(&db).search(&spec, Complexity::Simple, &options);
    assert_eq!(result.statement.as_deref(), Some("SELECT * FROM car_db_metric"));
    assert_eq!(result.count(), 6);
}

#[test]
fn year_filter_skips_unknown_years() {
    let spec = FilterSpec::new().with_range(NumericDimension::Year, 1990.0, 2020.0);
    // the roadster starts in 1989 and the wagon has no year at all
    assert_eq!(makes(&search(&spec)), vec!["BMW", "Porsche", "Tesla", "Volvo"]);
}

#[test]
fn fuel_type_aliases_reach_the_stored_values() {
    let spec = FilterSpec::new().with_fuel_types([FuelType::Electric, FuelType::Diesel]);
    assert_eq!(makes(&search(&spec)), vec!["Tesla", "Volvo"]);
}

#[test]
fn awd_matches_every_stored_spelling() {
    let spec = FilterSpec::new().with_drivetrains([Drivetrain::Awd]);
    assert_eq!(makes(&search(&spec)), vec!["BMW", "Subaru", "Tesla", "Volvo"]);
}

#[test]
fn body_styles_come_from_series_keywords() {
    let spec = FilterSpec::new().with_body_styles([BodyStyle::Coupe]);
    // "Crossover Coupe" is a coupe, not an SUV
    assert_eq!(makes(&search(&spec)), vec!["BMW", "Porsche"]);
    let spec = FilterSpec::new().with_body_styles([BodyStyle::Suv, BodyStyle::Pickup]);
    assert_eq!(makes(&search(&spec)), vec!["Volvo"]);
}

#[test]
fn and_group_narrows_the_or_group() {
    let spec = FilterSpec::new()
        .with_countries([Country::Germany])
        .with_transmissions([Transmission::Automatic])
        .with_body_styles([BodyStyle::Coupe, BodyStyle::Sedan]);
    assert_eq!(makes(&search(&spec)), vec!["BMW"]);
}

#[test]
fn bore_stroke_shapes_match_their_classification() {
    let spec = FilterSpec::new().with_bore_stroke([BoreStroke::Square]);
    assert_eq!(makes(&search(&spec)), vec!["Subaru"]);
    let spec = FilterSpec::new().with_bore_stroke([BoreStroke::Oversquare]);
    assert_eq!(makes(&search(&spec)), vec!["Porsche"]);
    let spec = FilterSpec::new().with_bore_stroke([BoreStroke::Undersquare]);
    assert_eq!(makes(&search(&spec)), vec!["BMW", "Mazda", "Volvo"]);
}

#[test]
fn numeric_text_columns_are_compared_as_numbers() {
    let spec = FilterSpec::new().with_range(NumericDimension::Seats, 4.0, 7.0);
    // seat lists are cast by their leading number: "5", "5,7" and "4" qualify, "2, 4" does not
    assert_eq!(makes(&search(&spec)), vec!["BMW", "Tesla", "Volvo"]);

    let spec = FilterSpec::new().with_range(NumericDimension::TopSpeed, 200.0, 280.0);
    assert_eq!(makes(&search(&spec)), vec!["BMW", "Porsche", "Tesla"]);
    // the unit is stripped before the cast, so "185 km/h" counts as 185
    let spec = FilterSpec::new().with_range(NumericDimension::TopSpeed, 180.0, 188.0);
    assert_eq!(makes(&search(&spec)), vec!["Volvo"]);
}

#[test]
fn power_to_weight_uses_real_arithmetic() {
    let spec = FilterSpec::new().with_range(NumericDimension::PowerToWeight, 0.15, 0.23);
    // 420 / 2100 and 300 / 1320; integer division would have matched nothing
    assert_eq!(makes(&search(&spec)), vec!["Porsche", "Tesla"]);
}

#[test]
fn layout_and_make_combine() {
    let spec = FilterSpec::new()
        .with_make("Mazda")
        .with_cylinder_layouts([CylinderLayout::Inline]);
    let result = search(&spec);
    assert_eq!(result.count(), 1);
    assert!(result.report.text.starts_with("Make: Mazda\nModel: MX-5\nFrom Year: 1989\nTo Year: 1997\n"));
}

#[test]
fn reversed_years_are_reported_and_the_search_still_runs() {
    let spec = FilterSpec::new().with_range(NumericDimension::Year, 2010.0, 2000.0);
    let result = search(&spec);
    assert_eq!(result.warnings, vec![YEAR_ORDER_WARNING.to_string()]);
    assert!(result.error.is_none());
    assert_eq!(result.count(), 0);
    assert_eq!(result.report.text, NO_DATA);
}

#[test]
fn import_runs_the_statement_verbatim() {
    let db = common::seeded_database();
    let engine = Engine::new(&db);
    let options = SearchOptions { csv_path: None, show_statement: true };
    let result = engine.import(
        "select make, engine_hp, engine_hp_rpm from car_db_metric where make = 'Porsche'",
        Complexity::Advanced,
        &options,
    );
    assert_eq!(result.count(), 1);
    assert_eq!(result.report.text, format!("Make: Porsche\nEngine HP: 300 @ 6800 RPM\n{}\n", automatch::format::SEPARATOR));
    assert_eq!(
        result.statement.as_deref(),
        Some("select make, engine_hp, engine_hp_rpm from car_db_metric where make = 'Porsche'")
    );
}

#[test]
fn broken_import_is_an_error_result() {
    let db = common::seeded_database();
    let result = Engine::new(&db).import("selec nonsense", Complexity::Simple, &SearchOptions::default());
    assert!(result.error.is_some());
    assert_eq!(result.count(), 0);
    assert_eq!(result.report.text, NO_DATA);
}

#[test]
fn search_can_export_csv() {
    let db = common::seeded_database();
    let path = common::temp_path("search.csv");
    let options = SearchOptions { csv_path: Some(path.clone()), show_statement: false };
    let spec = FilterSpec::new().with_fuel_types([FuelType::Diesel]);
    let result = Engine::new(&db).search(&spec, Complexity::Simple, &options);
    assert_eq!(result.exported, Some(true));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.lines().nth(1).unwrap().starts_with("4,Volvo,XC90,"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn refresh_picks_up_new_rows() {
    let db = common::seeded_database();
    assert_eq!(db.bounds().get(NumericDimension::Horsepower).max, 420.0);
    assert!(db.category_index().get(BodyStyle::Pickup).is_empty());
    db.persistor()
        .execute_batch(
            "insert into car_db_metric (id, make, model, series, engine_hp) values (7, 'Ford', 'F-150', 'Pickup', 450);",
        )
        .unwrap();
    // cached until refreshed
    assert_eq!(db.bounds().get(NumericDimension::Horsepower).max, 420.0);
    db.refresh();
    assert_eq!(db.bounds().get(NumericDimension::Horsepower).max, 450.0);
    assert_eq!(db.category_index().get(BodyStyle::Pickup), ["Pickup"]);
}

#[test]
fn bounds_are_resolved_again_after_a_failed_attempt() {
    let persistor = Persistor::new(PersistenceMode::InMemory, common::TABLE).unwrap();
    let db = Database::new(persistor, CompilerSettings::default());
    // no table yet, so every bound falls back
    assert_eq!(db.bounds().get(NumericDimension::Horsepower).max, 0.0);
    db.persistor().create_table().unwrap();
    db.persistor().execute_batch(common::SEED).unwrap();
    assert_eq!(db.bounds().get(NumericDimension::Horsepower).max, 420.0);
}
