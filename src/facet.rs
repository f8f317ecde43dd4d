//! Categorical filter dimensions.
//!
//! Every facet is a closed enum. A selection is a `BTreeSet` of its options, so
//! "everything selected" is a structural comparison against [`Facet::ALL`].
//! Facets backed by one column carry an alias list per option: the raw stored
//! strings that all mean the same user-facing choice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datatype::Scalar;
use crate::schema::column;

pub trait Facet: Copy + Ord + fmt::Debug + 'static {
    /// Every option, in presentation order.
    const ALL: &'static [Self];
    fn label(&self) -> &'static str;
}

/// A facet whose options are matched against raw values of a single column.
pub trait AliasedFacet: Facet {
    const COLUMN: &'static str;
    fn aliases(&self) -> Vec<Scalar>;
}

// Generates a facet enum whose options expand to lists of stored text values.
// Options serialize as their labels.
macro_rules! aliased_facet {
    (
        $(#[$meta:meta])*
        $name:ident on $column:path {
            $( $variant:ident => $label:literal [ $($alias:literal),+ $(,)? ] ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        $(#[$meta])*
        pub enum $name {
            $( #[serde(rename = $label)] $variant ),+
        }
        impl Facet for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];
            fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }
        impl AliasedFacet for $name {
            const COLUMN: &'static str = $column;
            fn aliases(&self) -> Vec<Scalar> {
                match self {
                    $( $name::$variant => vec![ $( Scalar::from($alias) ),+ ] ),+
                }
            }
        }
    };
}

aliased_facet! {
    FuelType on column::ENGINE_TYPE {
        Gasoline => "Gasoline" ["Gasoline", "petrol", "Gas", "Gasoline, Gas", "Rotor", "Petrol"],
        Diesel => "Diesel" ["Diesel", "diesel"],
        Hybrid => "Hybrid" ["Hybrid", "hybrid"],
        Electric => "Electric" ["Electric"],
        Other => "Other" ["Liquefied coal hydrogen gases"],
    }
}

aliased_facet! {
    EnginePlacement on column::ENGINE_PLACEMENT {
        Front => "Front" ["front, cross-section", "front, longitudinal", "Front", "Front, longitudinally"],
        Mid => "Mid" ["mid-engine", "central"],
        Rear => "Rear" ["rear"],
    }
}

aliased_facet! {
    Drivetrain on column::DRIVE_WHEELS {
        Fwd => "FWD" ["Front wheel drive"],
        Rwd => "RWD" ["Rear wheel drive"],
        Awd => "AWD" ["full", "All wheel drive (AWD)", "Four wheel drive (4WD)", "Constant all wheel drive"],
    }
}

aliased_facet! {
    Transmission on column::TRANSMISSION {
        Manual => "Manual" ["Manual"],
        Automatic => "Automatic" [
            "Automatic",
            "robot",
            "Continuously variable transmission (CVT)",
            "Electronic with 1 clutch",
            "Electronic with 2 clutch",
        ],
    }
}

aliased_facet! {
    CylinderLayout on column::CYLINDER_LAYOUT {
        VType => "V-type" ["V-type", "V-type with small angle"],
        Inline => "Inline" ["Inline", "inline"],
        Opposed => "Opposed" ["Opposed", "opposed"],
        WType => "W-type" ["W-type"],
        Rotary => "Rotary" ["Rotary", "rotor"],
    }
}

aliased_facet! {
    Country on column::COUNTRY {
        UnitedKingdom => "United Kingdom" ["United Kingdom"],
        Japan => "Japan" ["Japan"],
        Germany => "Germany" ["Germany"],
        Italy => "Italy" ["Italy"],
        France => "France" ["France"],
        UnitedStates => "United States" ["United States"],
        Belgium => "Belgium" ["Belgium"],
        Romania => "Romania" ["Romania"],
        SouthKorea => "South Korea" ["South Korea"],
        Russia => "Russia" ["Russia"],
        Switzerland => "Switzerland" ["Switzerland"],
        China => "China" ["China"],
        India => "India" ["India"],
        Latvia => "Latvia" ["Latvia"],
        Fictional => "Fictional" ["Fictional"],
        Malaysia => "Malaysia" ["Malaysia"],
        Netherlands => "Netherlands" ["Netherlands"],
        Poland => "Poland" ["Poland"],
        CzechRepublic => "Czech Republic" ["Czech Republic"],
        Spain => "Spain" ["Spain"],
        Australia => "Australia" ["Australia"],
        Iran => "Iran" ["Iran"],
        Sweden => "Sweden" ["Sweden"],
        Austria => "Austria" ["Austria"],
        Ukraine => "Ukraine" ["Ukraine"],
        Taiwan => "Taiwan" ["Taiwan"],
        Luxembourg => "Luxembourg" ["Luxembourg"],
        Brazil => "Brazil" ["Brazil"],
        Uzbekistan => "Uzbekistan" ["Uzbekistan"],
        Croatia => "Croatia" ["Croatia"],
        Turkey => "Turkey" ["Turkey"],
        Serbia => "Serbia" ["Serbia"],
        Kazakhstan => "Kazakhstan" ["Kazakhstan"],
    }
}

// ------------- Cylinder count -------------
/// Serialized as the plain number of cylinders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CylinderCount {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Ten,
    Twelve,
    Sixteen,
}

impl CylinderCount {
    pub fn count(&self) -> u8 {
        match self {
            CylinderCount::One => 1,
            CylinderCount::Two => 2,
            CylinderCount::Three => 3,
            CylinderCount::Four => 4,
            CylinderCount::Five => 5,
            CylinderCount::Six => 6,
            CylinderCount::Seven => 7,
            CylinderCount::Eight => 8,
            CylinderCount::Ten => 10,
            CylinderCount::Twelve => 12,
            CylinderCount::Sixteen => 16,
        }
    }
}
impl TryFrom<u8> for CylinderCount {
    type Error = String;
    fn try_from(count: u8) -> Result<Self, Self::Error> {
        CylinderCount::ALL
            .iter()
            .copied()
            .find(|c| c.count() == count)
            .ok_or_else(|| format!("no cylinder count option for {count}"))
    }
}
impl From<CylinderCount> for u8 {
    fn from(c: CylinderCount) -> u8 {
        c.count()
    }
}
impl Facet for CylinderCount {
    const ALL: &'static [Self] = &[
        CylinderCount::One,
        CylinderCount::Two,
        CylinderCount::Three,
        CylinderCount::Four,
        CylinderCount::Five,
        CylinderCount::Six,
        CylinderCount::Seven,
        CylinderCount::Eight,
        CylinderCount::Ten,
        CylinderCount::Twelve,
        CylinderCount::Sixteen,
    ];
    fn label(&self) -> &'static str {
        match self {
            CylinderCount::One => "1",
            CylinderCount::Two => "2",
            CylinderCount::Three => "3",
            CylinderCount::Four => "4",
            CylinderCount::Five => "5",
            CylinderCount::Six => "6",
            CylinderCount::Seven => "7",
            CylinderCount::Eight => "8",
            CylinderCount::Ten => "10",
            CylinderCount::Twelve => "12",
            CylinderCount::Sixteen => "16",
        }
    }
}
impl AliasedFacet for CylinderCount {
    const COLUMN: &'static str = column::CYLINDER_COUNT;
    fn aliases(&self) -> Vec<Scalar> {
        vec![Scalar::Integer(i64::from(self.count()))]
    }
}

// ------------- Bore / stroke -------------
/// Engine shape derived from the ratio of cylinder bore to piston stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoreStroke {
    Undersquare,
    Square,
    Oversquare,
}

impl BoreStroke {
    /// Classifies an engine. Ratios within `tolerance` of 1.0 count as square.
    /// `None` when the stroke is not a positive number.
    pub fn classify(bore: f64, stroke: f64, tolerance: f64) -> Option<BoreStroke> {
        if stroke.is_nan() || stroke <= 0.0 || !bore.is_finite() {
            return None;
        }
        let ratio = bore / stroke;
        if ratio < 1.0 - tolerance {
            Some(BoreStroke::Undersquare)
        } else if ratio > 1.0 + tolerance {
            Some(BoreStroke::Oversquare)
        } else {
            Some(BoreStroke::Square)
        }
    }
}
impl Facet for BoreStroke {
    const ALL: &'static [Self] = &[BoreStroke::Undersquare, BoreStroke::Square, BoreStroke::Oversquare];
    fn label(&self) -> &'static str {
        match self {
            BoreStroke::Undersquare => "Undersquare",
            BoreStroke::Square => "Square",
            BoreStroke::Oversquare => "Oversquare",
        }
    }
}

// ------------- Body style -------------
/// Body styles are not stored anywhere; they are derived from the free-text series column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyStyle {
    Roadster,
    Coupe,
    Hatchback,
    Spyder,
    Cabriolet,
    Sedan,
    Wagon,
    #[serde(rename = "SUV")]
    Suv,
    Pickup,
    Van,
    Limousine,
}

impl BodyStyle {
    /// Keywords that place a series in this style. Order matters, see [`crate::categorize`].
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            BodyStyle::Roadster => &["Roadster", "Speedster"],
            BodyStyle::Coupe => &["Coupe", "Fastback", "Hardtop"],
            BodyStyle::Hatchback => &["Hatchback", "Liftback"],
            BodyStyle::Spyder => &["Spyder", "Spider"],
            BodyStyle::Cabriolet => &["Cabriolet"],
            BodyStyle::Sedan => &["Sedan", "Targa"],
            BodyStyle::Wagon => &["Wagon"],
            BodyStyle::Suv => &["SUV", "Crossover"],
            BodyStyle::Pickup => &["Pickup"],
            BodyStyle::Van => &["Van", "Minivan"],
            BodyStyle::Limousine => &["Limousine"],
        }
    }
}
impl Facet for BodyStyle {
    const ALL: &'static [Self] = &[
        BodyStyle::Roadster,
        BodyStyle::Coupe,
        BodyStyle::Hatchback,
        BodyStyle::Spyder,
        BodyStyle::Cabriolet,
        BodyStyle::Sedan,
        BodyStyle::Wagon,
        BodyStyle::Suv,
        BodyStyle::Pickup,
        BodyStyle::Van,
        BodyStyle::Limousine,
    ];
    fn label(&self) -> &'static str {
        match self {
            BodyStyle::Roadster => "Roadster",
            BodyStyle::Coupe => "Coupe",
            BodyStyle::Hatchback => "Hatchback",
            BodyStyle::Spyder => "Spyder",
            BodyStyle::Cabriolet => "Cabriolet",
            BodyStyle::Sedan => "Sedan",
            BodyStyle::Wagon => "Wagon",
            BodyStyle::Suv => "SUV",
            BodyStyle::Pickup => "Pickup",
            BodyStyle::Van => "Van",
            BodyStyle::Limousine => "Limousine",
        }
    }
}
