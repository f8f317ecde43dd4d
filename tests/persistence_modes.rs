mod common;

use automatch::datatype::Scalar;
use automatch::persist::{is_valid_database, PersistenceMode, Persistor};
use automatch::schema::{self, COVERAGE_COLUMNS};

#[test]
fn in_memory_mode_allows_basic_operations() {
    let p = common::seeded_persistor();
    assert_eq!(p.mode(), &PersistenceMode::InMemory);
    let rows = p.query("select * from car_db_metric where make = ?", &[Scalar::from("Mazda")]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.records[0].get("model"), Some(&Scalar::from("MX-5")));
    assert_eq!(rows.records[0].get("engine_hp"), Some(&Scalar::Integer(116)));
    assert_eq!(rows.records[0].get("cylinder_bore_mm"), Some(&Scalar::Real(78.0)));
    assert_eq!(rows.records[0].get("engine_placement"), Some(&Scalar::from("front, longitudinal")));
}

#[test]
fn file_mode_reopens_the_database_per_call() {
    let path = common::temp_path("file_mode.db");
    let created = Persistor::create(&path, common::TABLE).expect("create file database");
    created.execute_batch(common::SEED).expect("seed rows");
    drop(created);

    assert!(is_valid_database(&path));
    let p = Persistor::new(PersistenceMode::File(path.clone()), common::TABLE).expect("open file database");
    assert_eq!(p.query("select * from car_db_metric", &[]).unwrap().len(), 6);
    // a second call opens a fresh connection and sees the same data
    assert_eq!(p.makes().unwrap().len(), 6);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_only_files_still_serve_searches() {
    let path = common::temp_path("read_only.db");
    let created = Persistor::create(&path, common::TABLE).expect("create file database");
    created.execute_batch(common::SEED).expect("seed rows");
    drop(created);
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    std::fs::set_permissions(&path, permissions).unwrap();

    let p = Persistor::new(PersistenceMode::File(path.clone()), common::TABLE).expect("open read-only file");
    assert_eq!(p.query("select * from car_db_metric where engine_hp > ?", &[Scalar::Integer(200)]).unwrap().len(), 3);
    assert_eq!(p.makes().unwrap().len(), 6);
    assert_eq!(p.website_for("Mazda").unwrap().as_deref(), Some("https://www.mazda.com"));

    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    let _ = std::fs::set_permissions(&path, permissions);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_mode_refuses_missing_and_foreign_files() {
    let missing = common::temp_path("missing.db");
    assert!(!is_valid_database(&missing));
    assert!(Persistor::new(PersistenceMode::File(missing.clone()), common::TABLE).is_err());
    assert!(!std::path::Path::new(&missing).exists(), "opening must never create the file");

    let text = common::temp_path("not_a_database.db");
    std::fs::write(&text, "this is certainly not an SQLite file, just some text long enough").unwrap();
    assert!(!is_valid_database(&text));
    let _ = std::fs::remove_file(&text);
}

#[test]
fn table_names_must_be_identifiers() {
    assert!(Persistor::new(PersistenceMode::InMemory, "cars; drop table cars").is_err());
    assert!(Persistor::new(PersistenceMode::InMemory, "car_db_metric").is_ok());
}

#[test]
fn makes_are_sorted_and_distinct() {
    let p = common::seeded_persistor();
    p.execute_batch("insert into car_db_metric (id, make, model) values (7, 'Mazda', 'RX-7');").unwrap();
    assert_eq!(p.makes().unwrap(), vec!["BMW", "Mazda", "Porsche", "Subaru", "Tesla", "Volvo"]);
}

#[test]
fn models_follow_a_comma_separated_make_list() {
    let p = common::seeded_persistor();
    p.execute_batch("insert into car_db_metric (id, make, model) values (7, 'Mazda', 'RX-7'), (8, 'Mazda', 'MX-5');")
        .unwrap();
    assert_eq!(p.models_for("Mazda").unwrap(), vec!["MX-5", "RX-7"]);
    assert_eq!(p.models_for(" Volvo , Mazda").unwrap(), vec!["MX-5", "RX-7", "XC90"]);
    assert!(p.models_for(" , ").unwrap().is_empty());
}

#[test]
fn website_lookup_is_parameterized() {
    let p = common::seeded_persistor();
    assert_eq!(p.website_for("Porsche").unwrap().as_deref(), Some("https://www.porsche.com"));
    // recorded as null and as an empty string
    assert_eq!(p.website_for("Volvo").unwrap(), None);
    assert_eq!(p.website_for("Subaru").unwrap(), None);
    assert_eq!(p.website_for("x' or '1'='1").unwrap(), None);
}

#[test]
fn coverage_is_sorted_highest_first() {
    let p = common::seeded_persistor();
    let coverage = p.coverage(COVERAGE_COLUMNS).unwrap();
    assert_eq!(coverage.len(), COVERAGE_COLUMNS.len());
    assert!(coverage.windows(2).all(|w| w[0].1 >= w[1].1));
    let share = |column: &str| coverage.iter().find(|(c, _)| c == column).map(|(_, s)| *s).unwrap();
    assert_eq!(share("engine_hp"), 100.0);
    // the electric car has no cylinders, 5 of 6 do
    assert!((share("number_of_cylinders") - 500.0 / 6.0).abs() < 1e-9);
}

#[test]
fn coverage_of_an_empty_table_is_zero() {
    let p = common::empty_persistor();
    assert!(p.coverage(&["engine_hp"]).unwrap().iter().all(|(_, s)| *s == 0.0));
}

#[test]
fn ddl_lists_every_catalogued_field() {
    let ddl = schema::create_table_sql("cars");
    assert!(ddl.starts_with("create table if not exists cars ("));
    for field in schema::FIELDS {
        assert!(ddl.contains(&format!("{} {} null", field.column, field.sql_type)), "{} missing", field.column);
    }
    assert!(ddl.contains("website text null"));
}
