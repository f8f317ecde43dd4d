//! What the user asked for, before any decision about what is actually a constraint.
//!
//! A [`FilterSpec`] deserializes from JSON with every field optional:
//!
//! ```json
//! { "year": { "from": 1990, "to": 2005 }, "fuel_types": ["Electric"], "body_styles": ["SUV"] }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::bounds::NumericDimension;
use crate::facet::{
    BodyStyle, BoreStroke, Country, CylinderCount, CylinderLayout, Drivetrain, EnginePlacement,
    FuelType, Transmission,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub from: f64,
    pub to: f64,
}

impl NumericRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub make: Option<String>,
    pub model: Option<String>,

    pub year: Option<NumericRange>,
    pub seats: Option<NumericRange>,
    pub horsepower: Option<NumericRange>,
    pub curb_weight: Option<NumericRange>,
    pub power_to_weight: Option<NumericRange>,
    pub displacement: Option<NumericRange>,
    pub top_speed: Option<NumericRange>,

    pub fuel_types: BTreeSet<FuelType>,
    pub engine_placements: BTreeSet<EnginePlacement>,
    pub drivetrains: BTreeSet<Drivetrain>,
    pub transmissions: BTreeSet<Transmission>,
    pub bore_stroke: BTreeSet<BoreStroke>,
    pub countries: BTreeSet<Country>,
    pub cylinder_counts: BTreeSet<CylinderCount>,
    pub cylinder_layouts: BTreeSet<CylinderLayout>,
    pub body_styles: BTreeSet<BodyStyle>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn range(&self, dimension: NumericDimension) -> Option<NumericRange> {
        match dimension {
            NumericDimension::Year => self.year,
            NumericDimension::Seats => self.seats,
            NumericDimension::Horsepower => self.horsepower,
            NumericDimension::CurbWeight => self.curb_weight,
            NumericDimension::PowerToWeight => self.power_to_weight,
            NumericDimension::Displacement => self.displacement,
            NumericDimension::TopSpeed => self.top_speed,
        }
    }
    pub fn with_range(mut self, dimension: NumericDimension, from: f64, to: f64) -> Self {
        let range = Some(NumericRange::new(from, to));
        match dimension {
            NumericDimension::Year => self.year = range,
            NumericDimension::Seats => self.seats = range,
            NumericDimension::Horsepower => self.horsepower = range,
            NumericDimension::CurbWeight => self.curb_weight = range,
            NumericDimension::PowerToWeight => self.power_to_weight = range,
            NumericDimension::Displacement => self.displacement = range,
            NumericDimension::TopSpeed => self.top_speed = range,
        }
        self
    }
    pub fn with_make(mut self, make: &str) -> Self {
        self.make = Some(make.to_string());
        self
    }
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }
    pub fn with_fuel_types(mut self, options: impl IntoIterator<Item = FuelType>) -> Self {
        self.fuel_types.extend(options);
        self
    }
    pub fn with_engine_placements(mut self, options: impl IntoIterator<Item = EnginePlacement>) -> Self {
        self.engine_placements.extend(options);
        self
    }
    pub fn with_drivetrains(mut self, options: impl IntoIterator<Item = Drivetrain>) -> Self {
        self.drivetrains.extend(options);
        self
    }
    pub fn with_transmissions(mut self, options: impl IntoIterator<Item = Transmission>) -> Self {
        self.transmissions.extend(options);
        self
    }
    pub fn with_bore_stroke(mut self, options: impl IntoIterator<Item = BoreStroke>) -> Self {
        self.bore_stroke.extend(options);
        self
    }
    pub fn with_countries(mut self, options: impl IntoIterator<Item = Country>) -> Self {
        self.countries.extend(options);
        self
    }
    pub fn with_cylinder_counts(mut self, options: impl IntoIterator<Item = CylinderCount>) -> Self {
        self.cylinder_counts.extend(options);
        self
    }
    pub fn with_cylinder_layouts(mut self, options: impl IntoIterator<Item = CylinderLayout>) -> Self {
        self.cylinder_layouts.extend(options);
        self
    }
    pub fn with_body_styles(mut self, options: impl IntoIterator<Item = BodyStyle>) -> Self {
        self.body_styles.extend(options);
        self
    }
}
