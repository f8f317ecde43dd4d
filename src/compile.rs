//! The clause compiler.
//!
//! Turns a [`FilterSpec`] into a parameterized `WHERE` body. The function is pure:
//! bounds, the category index and the tolerances come in as arguments, so the
//! same inputs always give the same clause and parameter order.
//!
//! Two rules shape the output:
//!
//! * **Suppression.** A dimension contributes nothing when its value is the
//!   "no filter" value: a range side equal to the dataset bound, or a facet
//!   selection that is empty or complete.
//! * **Grouping.** Every constraint except body style lands in the AND-group.
//!   Body-style fragments form the OR-group. The result is `(AND) AND (OR)`, or
//!   whichever group is non-empty on its own.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::bounds::{NumericDimension, ResolvedBounds};
use crate::categorize::CategoryIndex;
use crate::datatype::Scalar;
use crate::facet::{AliasedFacet, BoreStroke, Facet};
use crate::filter::FilterSpec;
use crate::schema::column;
use crate::settings::CompilerSettings;

pub const YEAR_ORDER_WARNING: &str = "'Year From' must be less than 'Year To'";

/// A condition template with `?` placeholders and its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub template: String,
    pub params: Vec<Scalar>,
}

impl Clause {
    pub fn new(template: impl Into<String>, params: Vec<Scalar>) -> Self {
        Self { template: template.into(), params }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
    /// `None` when nothing constrains the search.
    pub where_clause: Option<Clause>,
    /// Validation messages; compilation carries on regardless.
    pub warnings: Vec<String>,
}

#[derive(Default)]
struct Group {
    conditions: Vec<String>,
    params: Vec<Scalar>,
}

impl Group {
    fn push(&mut self, clause: Clause) {
        self.conditions.push(clause.template);
        self.params.extend(clause.params);
    }
    // alternatives of one facet, parenthesized when there is more than one
    fn push_any(&mut self, alternatives: Vec<Clause>) {
        match alternatives.len() {
            0 => {}
            1 => alternatives.into_iter().for_each(|c| self.push(c)),
            _ => {
                let mut templates = Vec::with_capacity(alternatives.len());
                for clause in alternatives {
                    templates.push(clause.template);
                    self.params.extend(clause.params);
                }
                self.conditions.push(format!("({})", templates.join(" OR ")));
            }
        }
    }
}

pub fn compile(
    spec: &FilterSpec,
    bounds: &ResolvedBounds,
    index: &CategoryIndex,
    settings: &CompilerSettings,
) -> Compilation {
    let mut warnings = Vec::new();
    let mut all = Group::default();
    let mut any = Group::default();

    for (col, value) in [(column::MAKE, &spec.make), (column::MODEL, &spec.model)] {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            all.push(Clause::new(format!("{col} = ?"), vec![Scalar::from(value)]));
        }
    }

    if let Some(year) = spec.year {
        if year.from > year.to {
            warnings.push(YEAR_ORDER_WARNING.to_string());
        }
    }
    for dimension in NumericDimension::ALL {
        compile_range(spec, dimension, bounds, settings, &mut all, &mut warnings);
    }

    compile_facet(&spec.fuel_types, &mut all);
    compile_facet(&spec.engine_placements, &mut all);
    compile_facet(&spec.drivetrains, &mut all);
    compile_facet(&spec.transmissions, &mut all);
    if !is_suppressed(&spec.bore_stroke) {
        let tolerance = settings.bore_stroke_tolerance;
        all.push_any(spec.bore_stroke.iter().map(|s| bore_stroke_clause(*s, tolerance)).collect());
    }
    compile_facet(&spec.countries, &mut all);
    compile_facet(&spec.cylinder_counts, &mut all);
    compile_facet(&spec.cylinder_layouts, &mut all);

    if !is_suppressed(&spec.body_styles) {
        for style in &spec.body_styles {
            let members = index.get(*style);
            if members.is_empty() {
                // nothing in the data carries this style, so it matches nothing
                any.push(Clause::new("1 = 0", Vec::new()));
            } else {
                let values = members.iter().map(|m| Scalar::from(m.as_str())).collect();
                any.push(membership(column::SERIES, values));
            }
        }
    }

    let where_clause = combine(all, any);
    match &where_clause {
        Some(clause) => debug!(
            where_clause = %clause.template,
            parameters = ?clause.params,
            warnings = warnings.len(),
            "compiled filter"
        ),
        None => debug!(warnings = warnings.len(), "compiled filter without constraints"),
    }
    Compilation { where_clause, warnings }
}

fn combine(all: Group, any: Group) -> Option<Clause> {
    let and_body = all.conditions.join(" AND ");
    let or_body = any.conditions.join(" OR ");
    let template = match (all.conditions.is_empty(), any.conditions.is_empty()) {
        (true, true) => return None,
        (false, true) => and_body,
        (true, false) => or_body,
        (false, false) => format!("({and_body}) AND ({or_body})"),
    };
    let mut params = all.params;
    params.extend(any.params);
    Some(Clause { template, params })
}

/// Empty and complete selections both mean "no filter".
pub fn is_suppressed<F: Facet>(selected: &BTreeSet<F>) -> bool {
    selected.is_empty() || F::ALL.iter().all(|option| selected.contains(option))
}

fn compile_facet<F: AliasedFacet>(selected: &BTreeSet<F>, group: &mut Group) {
    if is_suppressed(selected) {
        return;
    }
    group.push_any(selected.iter().map(|option| membership(F::COLUMN, option.aliases())).collect());
}

fn membership(col: &str, values: Vec<Scalar>) -> Clause {
    if values.len() == 1 {
        Clause::new(format!("{col} = ?"), values)
    } else {
        let placeholders = vec!["?"; values.len()].join(", ");
        Clause::new(format!("{col} IN ({placeholders})"), values)
    }
}

fn bore_stroke_clause(shape: BoreStroke, tolerance: f64) -> Clause {
    let (bore, stroke) = (column::BORE, column::STROKE);
    match shape {
        BoreStroke::Undersquare => Clause::new(
            format!("({bore} < {stroke} AND {bore} / {stroke} < ?)"),
            vec![Scalar::Real(1.0 - tolerance)],
        ),
        BoreStroke::Square => Clause::new(
            format!("(ABS({bore} / {stroke} - 1.0) <= ?)"),
            vec![Scalar::Real(tolerance)],
        ),
        BoreStroke::Oversquare => Clause::new(
            format!("({bore} > {stroke} AND {bore} / {stroke} > ?)"),
            vec![Scalar::Real(1.0 + tolerance)],
        ),
    }
}

// ------------- Numeric ranges -------------
fn compile_range(
    spec: &FilterSpec,
    dimension: NumericDimension,
    bounds: &ResolvedBounds,
    settings: &CompilerSettings,
    group: &mut Group,
    warnings: &mut Vec<String>,
) {
    let Some(range) = spec.range(dimension) else {
        return;
    };
    let bound = bounds.get(dimension);
    let tolerance = match dimension {
        NumericDimension::PowerToWeight => settings.power_to_weight_tolerance,
        _ => 0.0,
    };
    let (lower, upper) = range_templates(dimension, &settings.speed_unit);
    for (value, reference, template) in [(range.from, bound.min, lower), (range.to, bound.max, upper)] {
        if !value.is_finite() {
            warn!(?dimension, value, "ignoring non-finite range value");
            warnings.push(format!("Ignored a non-finite value for '{}'", dimension.label()));
            continue;
        }
        // compared after rounding, so a value that binds as the bound stays untouched
        let parameter = range_parameter(dimension, value);
        let bound_value = parameter.as_f64().unwrap_or(value);
        if (bound_value - reference).abs() <= tolerance {
            continue;
        }
        group.push(Clause::new(template, vec![parameter]));
    }
}

fn range_templates(dimension: NumericDimension, speed_unit: &str) -> (String, String) {
    let (operand, guard) = match dimension {
        NumericDimension::Year => {
            let (from, to) = (column::YEAR_FROM, column::YEAR_TO);
            // a zero year is a missing year
            return (format!("{from} >= ? AND {from} != 0"), format!("{to} <= ? AND {to} != 0"));
        }
        NumericDimension::Seats => (format!("CAST({} AS INTEGER)", column::SEATS), String::new()),
        NumericDimension::Horsepower => (column::HORSEPOWER.to_string(), String::new()),
        NumericDimension::CurbWeight => (column::CURB_WEIGHT.to_string(), String::new()),
        NumericDimension::Displacement => (column::DISPLACEMENT.to_string(), String::new()),
        NumericDimension::PowerToWeight => (
            format!("CAST({} AS REAL) / NULLIF({}, 0)", column::HORSEPOWER, column::CURB_WEIGHT),
            String::new(),
        ),
        NumericDimension::TopSpeed => {
            let unit = speed_unit.replace('\'', "''");
            let cleaned = format!(
                "REPLACE(REPLACE({}, ' {unit}', ''), ',', '')",
                column::TOP_SPEED
            );
            (
                format!("CAST({cleaned} AS REAL)"),
                format!(" AND {cleaned} NOT LIKE '%{unit}%'"),
            )
        }
    };
    (format!("{operand} >= ?{guard}"), format!("{operand} <= ?{guard}"))
}

fn range_parameter(dimension: NumericDimension, value: f64) -> Scalar {
    match dimension {
        NumericDimension::Year | NumericDimension::Seats => Scalar::Integer(value.round() as i64),
        NumericDimension::Horsepower | NumericDimension::CurbWeight => Scalar::Integer(value.trunc() as i64),
        NumericDimension::PowerToWeight | NumericDimension::Displacement | NumericDimension::TopSpeed => {
            Scalar::Real(value)
        }
    }
}
