//! Unit representation with conversion factors

use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use thermo_core::CalcError;

/// How a unit relates to the temperature scale.
///
/// Absolute units name a point on a scale, interval units a difference
/// between two points. Everything else, including every compound unit that
/// merely contains a temperature factor, is plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Plain,
    Absolute,
    Interval,
}

/// Represents a physical unit with its dimension and conversion factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "J/(g·K)")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to SI base unit (value_si = value * factor + offset)
    pub factor: f64,
    /// Offset for scales whose zero is not absolute zero (Celsius, Fahrenheit)
    pub offset: f64,
    /// Category for organization (e.g., "length", "temperature_interval")
    pub category: String,
    pub kind: UnitKind,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, factor: f64, category: &str) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            factor,
            offset: 0.0,
            category: category.to_string(),
            kind: UnitKind::Plain,
        }
    }

    /// Create an absolute temperature unit (a point on a temperature scale)
    pub fn absolute_temperature(symbol: &str, name: &str, factor: f64, offset: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension: Dimension::TEMPERATURE,
            factor,
            offset,
            category: "temperature".to_string(),
            kind: UnitKind::Absolute,
        }
    }

    /// Create a temperature interval unit (a difference on a temperature scale)
    pub fn temperature_interval(symbol: &str, name: &str, factor: f64) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension: Dimension::TEMPERATURE,
            factor,
            offset: 0.0,
            category: "temperature_interval".to_string(),
            kind: UnitKind::Interval,
        }
    }

    pub fn dimensionless() -> Self {
        Unit::new("", "dimensionless", Dimension::DIMENSIONLESS, 1.0, "dimensionless")
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.offset != 0.0
    }

    pub fn is_absolute(&self) -> bool {
        self.kind == UnitKind::Absolute
    }

    pub fn is_interval(&self) -> bool {
        self.kind == UnitKind::Interval
    }

    /// Check if two units are dimensionally compatible
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base unit
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    /// Convert a value from SI base unit to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        (value_si - self.offset) / self.factor
    }

    /// Convert a value from this unit to another unit
    ///
    /// Absolute temperatures only convert to other absolute scales, where
    /// offsets apply. A plain temperature-dimensioned unit may become an
    /// interval but never an absolute temperature.
    pub fn convert_value(&self, value: f64, target: &Unit) -> Result<f64, CalcError> {
        if !self.is_compatible(target) {
            return Err(CalcError::unit_conversion(
                self.display_symbol(),
                target.display_symbol(),
                format!(
                    "incompatible dimensions ({} vs {})",
                    self.dimension, target.dimension
                ),
            ));
        }

        let converted = match (self.kind, target.kind) {
            (UnitKind::Absolute, UnitKind::Interval) => {
                return Err(CalcError::unit_conversion(
                    self.display_symbol(),
                    target.display_symbol(),
                    "an absolute temperature is not a temperature difference",
                ));
            }
            (UnitKind::Interval, UnitKind::Absolute) => {
                return Err(CalcError::unit_conversion(
                    self.display_symbol(),
                    target.display_symbol(),
                    "a temperature difference is not an absolute temperature",
                ));
            }
            (UnitKind::Absolute, UnitKind::Plain) | (UnitKind::Plain, UnitKind::Absolute) => {
                return Err(CalcError::unit_conversion(
                    self.display_symbol(),
                    target.display_symbol(),
                    "only another absolute temperature unit can hold an absolute temperature",
                ));
            }
            (UnitKind::Absolute, UnitKind::Absolute) => target.from_si(self.to_si(value)),
            _ if self.has_offset() || target.has_offset() => {
                return Err(CalcError::unit_conversion(
                    self.display_symbol(),
                    target.display_symbol(),
                    "offset scale is ambiguous outside absolute temperatures",
                ));
            }
            _ => value * self.factor / target.factor,
        };

        if !converted.is_finite() {
            return Err(CalcError::domain(format!(
                "converting {} {} to {} is not finite",
                value,
                self.display_symbol(),
                target.display_symbol()
            )));
        }
        Ok(converted)
    }

    /// Multiply two units (e.g., J/K * K -> J)
    pub fn multiply(&self, other: &Unit) -> Result<Unit, CalcError> {
        let symbol = self.join_symbols(other, "·")?;
        let dimension = self.dimension.multiply(&other.dimension);
        Ok(Unit {
            dimension: exponents_in_range(dimension, &symbol)?,
            factor: finite_factor(self.factor * other.factor, &symbol)?,
            name: format!("{} {}", self.name, other.name).trim().to_string(),
            symbol,
            offset: 0.0,
            category: "derived".to_string(),
            kind: UnitKind::Plain,
        })
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Result<Unit, CalcError> {
        let symbol = self.join_symbols(other, "/")?;
        let name = if self.name == "dimensionless" {
            format!("per {}", other.name)
        } else {
            format!("{} per {}", self.name, other.name)
        };
        let dimension = self.dimension.divide(&other.dimension);
        Ok(Unit {
            dimension: exponents_in_range(dimension, &symbol)?,
            factor: finite_factor(self.factor / other.factor, &symbol)?,
            symbol,
            name,
            offset: 0.0,
            category: "derived".to_string(),
            kind: UnitKind::Plain,
        })
    }

    /// Raise unit to a power (e.g., m^3)
    pub fn power(&self, exp: i32) -> Result<Unit, CalcError> {
        if exp == 1 {
            return Ok(self.clone());
        }
        self.reject_offset(&format!("({})^{}", self.symbol, exp))?;

        let symbol = if self.symbol.is_empty() {
            String::new()
        } else {
            format!("{}^{}", wrap_compound(&self.symbol), exp)
        };

        let dimension = self.dimension.power(exp);
        Ok(Unit {
            dimension: exponents_in_range(dimension, &symbol)?,
            factor: finite_factor(self.factor.powi(exp), &symbol)?,
            symbol,
            name: format!("{} to the {}", self.name, exp),
            offset: 0.0,
            category: self.category.clone(),
            kind: UnitKind::Plain,
        })
    }

    /// Square root of the unit (every dimension exponent must be even)
    pub fn sqrt(&self) -> Result<Unit, CalcError> {
        self.reject_offset(&format!("√{}", self.symbol))?;
        let dimension = self.dimension.sqrt().ok_or_else(|| {
            CalcError::dimension_mismatch("square root", "even dimension exponents", self.dimension)
        })?;

        Ok(Unit {
            symbol: format!("√{}", wrap_compound(&self.symbol)),
            name: format!("square root of {}", self.name),
            dimension,
            factor: self.factor.sqrt(),
            offset: 0.0,
            category: self.category.clone(),
            kind: UnitKind::Plain,
        })
    }

    /// Symbol used in messages; dimensionless shows as "1"
    pub fn display_symbol(&self) -> String {
        if self.symbol.is_empty() {
            "1".to_string()
        } else {
            self.symbol.clone()
        }
    }

    fn join_symbols(&self, other: &Unit, op: &str) -> Result<String, CalcError> {
        let joined = match (self.symbol.is_empty(), other.symbol.is_empty(), op) {
            (_, true, _) => self.symbol.clone(),
            (true, false, "/") => format!("1/{}", wrap_compound(&other.symbol)),
            (true, false, _) => other.symbol.clone(),
            (false, false, "/") => format!("{}/{}", self.symbol, wrap_compound(&other.symbol)),
            (false, false, _) => format!("{}{}{}", self.symbol, op, other.symbol),
        };
        self.reject_offset(&joined)?;
        other.reject_offset(&joined)?;
        Ok(joined)
    }

    fn reject_offset(&self, result: &str) -> Result<(), CalcError> {
        if self.has_offset() {
            return Err(CalcError::unit_conversion(
                self.symbol.clone(),
                result.to_string(),
                "an offset temperature scale cannot be multiplied, divided or raised to a power",
            ));
        }
        Ok(())
    }
}

fn exponents_in_range(dimension: Option<Dimension>, symbol: &str) -> Result<Dimension, CalcError> {
    dimension.ok_or_else(|| CalcError::domain(format!("dimension exponent overflow in {}", symbol)))
}

fn finite_factor(factor: f64, symbol: &str) -> Result<f64, CalcError> {
    if factor.is_finite() && factor != 0.0 {
        Ok(factor)
    } else {
        Err(CalcError::domain(format!("conversion factor of {} is out of range", symbol)))
    }
}

/// Parenthesize compound symbols so they survive being placed in a larger one
fn wrap_compound(symbol: &str) -> String {
    if symbol.contains('/') || symbol.contains('·') {
        format!("({})", symbol)
    } else {
        symbol.to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
