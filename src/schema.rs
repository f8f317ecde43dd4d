//! The vehicle table as the rest of the crate sees it.
//!
//! [`FIELDS`] lists the descriptive columns in display order together with the
//! label the report uses and whether the column is part of the simple view.
//! The compiler only touches the handful of columns named in [`column`].

use std::fmt;

/// Column names referenced directly by the resolver, categorizer and compiler.
pub mod column {
    pub const ID: &str = "id";
    pub const MAKE: &str = "make";
    pub const MODEL: &str = "model";
    pub const SERIES: &str = "series";
    pub const YEAR_FROM: &str = "year_from";
    pub const YEAR_TO: &str = "year_to";
    pub const SEATS: &str = "number_of_seats";
    pub const CURB_WEIGHT: &str = "curb_weight_kg";
    pub const HORSEPOWER: &str = "engine_hp";
    pub const HORSEPOWER_RPM: &str = "engine_hp_rpm";
    pub const TORQUE: &str = "maximum_torque_n_m";
    pub const TORQUE_RPM: &str = "turnover_of_maximum_torque_rpm";
    pub const DISPLACEMENT: &str = "capacity_cm3";
    pub const TOP_SPEED: &str = "max_speed_km_per_h";
    pub const ENGINE_TYPE: &str = "engine_type";
    pub const ENGINE_PLACEMENT: &str = "engine_placement";
    pub const CYLINDER_LAYOUT: &str = "cylinder_layout";
    pub const CYLINDER_COUNT: &str = "number_of_cylinders";
    pub const BORE: &str = "cylinder_bore_mm";
    pub const STROKE: &str = "stroke_cycle_mm";
    pub const DRIVE_WHEELS: &str = "drive_wheels";
    pub const TRANSMISSION: &str = "transmission";
    pub const COUNTRY: &str = "country_of_origin";
    pub const WEBSITE: &str = "website";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Text,
}
impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SqlType::Integer => write!(f, "integer"),
            SqlType::Real => write!(f, "real"),
            SqlType::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub column: &'static str,
    pub label: &'static str,
    /// shown in the simple report
    pub basic: bool,
    pub sql_type: SqlType,
}

const fn field(column: &'static str, label: &'static str, basic: bool, sql_type: SqlType) -> Field {
    Field { column, label, basic, sql_type }
}

use SqlType::{Integer, Real, Text};

pub const FIELDS: &[Field] = &[
    field(column::MAKE, "Make", true, Text),
    field(column::MODEL, "Model", true, Text),
    field("generation", "Generation", false, Text),
    field(column::YEAR_FROM, "From Year", true, Integer),
    field(column::YEAR_TO, "To Year", true, Integer),
    field(column::SERIES, "Car Series", true, Text),
    field("trim", "Trim", true, Text),
    field("body_type", "Body Type", false, Text),
    field("load_height_mm", "Load Height (mm)", false, Integer),
    field(column::SEATS, "Number of Seats", false, Text),
    field("length_mm", "Length (mm)", false, Integer),
    field("width_mm", "Width (mm)", false, Integer),
    field("height_mm", "Height (mm)", false, Integer),
    field("wheelbase_mm", "Wheelbase (mm)", false, Integer),
    field("front_track_mm", "Front Track (mm)", false, Integer),
    field("rear_track_mm", "Rear Track (mm)", false, Integer),
    field(column::CURB_WEIGHT, "Curb Weight (kg)", true, Integer),
    field("wheel_size_r14", "Wheel Size (r14)", false, Text),
    field("ground_clearance_mm", "Ground Clearance (mm)", false, Integer),
    field("trailer_load_with_brakes_kg", "Trailer Load with Brakes (kg)", false, Integer),
    field("payload_kg", "Payload (kg)", false, Integer),
    field("back_track_width_mm", "Back Track Width (mm)", false, Integer),
    field("front_track_width_mm", "Front Track Width (mm)", false, Integer),
    field("clearance_mm", "Clearance (mm)", false, Integer),
    field("full_weight_kg", "Full Weight (kg)", true, Integer),
    field("front_rear_axle_load_kg", "Front Rear Axle Load (kg)", false, Text),
    field("max_trunk_capacity_l", "Max Trunk Capacity (liters)", false, Integer),
    field("cargo_compartment_length_width_height_mm", "Cargo Compartment Length Width Height (mm)", false, Text),
    field("cargo_volume_m3", "Cargo Volume (m3)", false, Real),
    field("minimum_trunk_capacity_l", "Minimum Trunk Capacity (liters)", false, Integer),
    field(column::TORQUE, "Maximum Torque (N*m)", false, Integer),
    field(column::TORQUE_RPM, "Turnover of Maximum Torque (rpm)", false, Integer),
    field("injection_type", "Injection Type", false, Text),
    field("overhead_camshaft", "Overhead Camshaft", false, Text),
    field(column::CYLINDER_LAYOUT, "Cylinder Layout", false, Text),
    field(column::CYLINDER_COUNT, "Number of Cylinders", false, Integer),
    field("compression_ratio", "Compression Ratio", false, Real),
    field(column::ENGINE_TYPE, "Engine Type", false, Text),
    field("valves_per_cylinder", "Valves per Cylinder", false, Integer),
    field("boost_type", "Boost Type", false, Text),
    field(column::BORE, "Cylinder Bore (mm)", false, Real),
    field(column::STROKE, "Stroke Cycle (mm)", false, Real),
    field(column::ENGINE_PLACEMENT, "Engine Placement", false, Text),
    field("cylinder_bore_and_stroke_cycle_mm", "Cylinder Bore and Stroke Cycle (mm)", false, Text),
    field("max_power_kw", "Max Power (kW)", false, Real),
    field("presence_of_intercooler", "Presence of Intercooler", false, Text),
    field(column::DISPLACEMENT, "Engine Displacement (cm3)", false, Integer),
    field(column::HORSEPOWER, "Engine HP", true, Integer),
    field(column::HORSEPOWER_RPM, "Engine HP RPM", false, Integer),
    field(column::DRIVE_WHEELS, "Drive Wheels", false, Text),
    field("bore_stroke_ratio", "Bore Stroke Ratio", false, Real),
    field("number_of_gears", "Number of Gears", false, Integer),
    field("turning_circle_m", "Turning Circle (m)", false, Real),
    field(column::TRANSMISSION, "Transmission", true, Text),
    field("mixed_fuel_consumption_per_100_km_l", "Mixed Fuel Consumption per 100 km (l)", false, Real),
    field("range_km", "Range (km)", false, Integer),
    field("emission_standards", "Emission Standards", false, Text),
    field("fuel_tank_capacity_l", "Fuel Tank Capacity (l)", false, Integer),
    field("acceleration_0_100_km_h_s", "Acceleration 0-100 km/h (s)", false, Real),
    field(column::TOP_SPEED, "Max Speed (km/h)", false, Text),
    field("city_fuel_per_100_km_l", "City Fuel per 100 km (l)", false, Real),
    field("co2_emissions_g_km", "CO2 Emissions (g/km)", false, Integer),
    field("fuel_grade", "Fuel Grade", false, Text),
    field("highway_fuel_per_100_km_l", "Highway Fuel per 100 km (l)", false, Real),
    field("back_suspension", "Back Suspension", false, Text),
    field("rear_brakes", "Rear Brakes", false, Text),
    field("front_brakes", "Front Brakes", false, Text),
    field("front_suspension", "Front Suspension", false, Text),
    field("steering_type", "Steering Type", false, Text),
    field("car_class", "Car Class", false, Text),
    field(column::COUNTRY, "Country of Origin", false, Text),
    field("number_of_doors", "Number of Doors", false, Text),
    field("safety_assessment", "Safety Assessment", false, Text),
    field("rating_name", "Rating Name", false, Text),
    field("battery_capacity_kw_per_h", "Battery Capacity (KW/h)", false, Real),
    field("electric_range_km", "Electric Range (km)", false, Integer),
    field("charging_time_h", "Charging Time (h)", false, Real),
];

/// Columns the coverage report looks at: the ones the filters depend on.
pub const COVERAGE_COLUMNS: &[&str] = &[
    column::YEAR_FROM,
    column::YEAR_TO,
    column::SERIES,
    column::SEATS,
    column::CURB_WEIGHT,
    column::CYLINDER_LAYOUT,
    column::CYLINDER_COUNT,
    column::ENGINE_TYPE,
    column::BORE,
    column::STROKE,
    column::ENGINE_PLACEMENT,
    column::DISPLACEMENT,
    column::HORSEPOWER,
    column::DRIVE_WHEELS,
    column::TRANSMISSION,
    column::TOP_SPEED,
];

pub fn lookup(column: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.column == column)
}

/// DDL for the vehicle table: an identity, every catalogued field, and the manufacturer website.
pub fn create_table_sql(table: &str) -> String {
    let mut columns = vec![format!("{} integer not null primary key", column::ID)];
    for f in FIELDS {
        columns.push(format!("{} {} null", f.column, f.sql_type));
    }
    columns.push(format!("{} text null", column::WEBSITE));
    format!(
        "create table if not exists {table} (\n    {}\n);",
        columns.join(",\n    ")
    )
}
