#![allow(dead_code)]

use automatch::database::Database;
use automatch::persist::{PersistenceMode, Persistor};
use automatch::settings::CompilerSettings;

pub const TABLE: &str = "car_db_metric";

// Six vehicles picked to hit the awkward corners of the data:
// a zero year, a seat list with a bad token, a top speed with its unit still attached,
// a series matching two body styles, and a car with no engine geometry at all.
pub const SEED: &str = "
insert into car_db_metric (
    id, make, model, series, year_from, year_to, number_of_seats, curb_weight_kg,
    engine_hp, engine_hp_rpm, maximum_torque_n_m, turnover_of_maximum_torque_rpm,
    capacity_cm3, max_speed_km_per_h, engine_type, engine_placement, drive_wheels,
    transmission, country_of_origin, number_of_cylinders, cylinder_layout,
    cylinder_bore_mm, stroke_cycle_mm, website
) values
(1, 'Tesla', 'Model S', 'Sedan', 2012, 2020, '5', 2100,
 420, null, null, null,
 null, '250', 'Electric', null, 'All wheel drive (AWD)',
 'Automatic', 'United States', null, null,
 null, null, 'https://www.tesla.com'),
(2, 'Mazda', 'MX-5', 'Roadster', 1989, 1997, '2', 960,
 116, 6500, 136, 5500,
 1597, '190', 'Gasoline', 'front, longitudinal', 'Rear wheel drive',
 'Manual', 'Japan', 4, 'Inline',
 78.0, 83.6, 'https://www.mazda.com'),
(3, 'Porsche', '911', 'Coupe', 1998, 2004, '2, 4', 1320,
 300, 6800, 350, 4600,
 3387, '280', 'Gasoline', 'rear', 'Rear wheel drive',
 'Manual', 'Germany', 6, 'Opposed',
 96.0, 78.0, 'https://www.porsche.com'),
(4, 'Volvo', 'XC90', 'SUV 5-door', 2002, 2014, '5,7', 2050,
 163, 4000, 340, 1750,
 2401, '185 km/h', 'Diesel', 'front, cross-section', 'Four wheel drive (4WD)',
 'Automatic', 'Sweden', 5, 'Inline',
 81.0, 93.2, null),
(5, 'Subaru', 'Legacy', 'Wagon', 0, 0, 'n/a', 1400,
 150, 5600, 196, 4400,
 1994, null, 'Gasoline', 'front, longitudinal', 'full',
 'robot', 'Japan', 4, 'Opposed',
 84.0, 84.0, ''),
(6, 'BMW', 'X6', 'Crossover Coupe', 2008, 2014, '4', 2185,
 306, 5800, 400, 1300,
 2979, '240', 'Gasoline', 'front, longitudinal', 'Constant all wheel drive',
 'Automatic', 'Germany', 6, 'Inline',
 84.0, 89.6, 'https://www.bmw.com');
";

pub fn seeded_persistor() -> Persistor {
    let persistor = Persistor::new(PersistenceMode::InMemory, TABLE).expect("in-memory persistor");
    persistor.create_table().expect("create table");
    persistor.execute_batch(SEED).expect("seed rows");
    persistor
}

pub fn empty_persistor() -> Persistor {
    let persistor = Persistor::new(PersistenceMode::InMemory, TABLE).expect("in-memory persistor");
    persistor.create_table().expect("create table");
    persistor
}

pub fn seeded_database() -> Database {
    Database::new(seeded_persistor(), CompilerSettings::default())
}

/// A file path under the temp directory that does not exist yet.
pub fn temp_path(name: &str) -> String {
    let path = std::env::temp_dir().join(format!("automatch_{}_{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path.to_string_lossy().into_owned()
}
