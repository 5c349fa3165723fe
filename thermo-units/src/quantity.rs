//! Quantity type - a magnitude with an associated unit

use crate::parse::parse_unit;
use crate::units::UNITS;
use crate::{Dimension, Unit, UnitKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thermo_core::CalcError;

/// A physical quantity: a numeric magnitude with an associated unit.
///
/// Quantities are immutable; every operation returns a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a quantity from a magnitude and a unit expression
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::UnitParse`] if the expression does not resolve.
    pub fn parse(value: f64, unit_expression: &str) -> Result<Self, CalcError> {
        Ok(Quantity::new(value, parse_unit(unit_expression)?))
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Unit::dimensionless())
    }

    pub fn magnitude(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn kind(&self) -> UnitKind {
        self.unit.kind
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.dimension.is_dimensionless()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Get the value in SI base units
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.value)
    }

    /// Convert to another unit given as an expression
    pub fn convert_to(&self, unit_expression: &str) -> Result<Quantity, CalcError> {
        let target = parse_unit(unit_expression)?;
        self.convert_to_unit(&target)
    }

    /// Convert to another unit
    pub fn convert_to_unit(&self, target: &Unit) -> Result<Quantity, CalcError> {
        let value = self.unit.convert_value(self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Convert to SI base units
    pub fn to_si(&self) -> Result<Quantity, CalcError> {
        let dim = self.unit.dimension;
        let si_unit = match self.unit.kind {
            UnitKind::Absolute => Unit::absolute_temperature("K", "kelvin", 1.0, 0.0),
            UnitKind::Interval => Unit::temperature_interval("delta_K", "delta kelvin", 1.0),
            UnitKind::Plain => {
                let symbol = if dim.is_dimensionless() { String::new() } else { dim.to_string() };
                let name = dim.name().map(str::to_string).unwrap_or_else(|| symbol.clone());
                Unit::new(&symbol, &name, dim, 1.0, "si_base")
            }
        };
        self.convert_to_unit(&si_unit)
    }

    /// The interval separating an absolute temperature from absolute zero,
    /// in delta kelvin. 0 degC becomes 273.15 delta_K.
    pub fn interval_from_absolute_zero(&self) -> Result<Quantity, CalcError> {
        if !self.unit.is_absolute() {
            return Err(CalcError::unit_conversion(
                self.unit.display_symbol(),
                "delta_K",
                "only an absolute temperature has a distance from absolute zero",
            ));
        }
        Ok(Quantity::new(
            self.si_value(),
            Unit::temperature_interval("delta_K", "delta kelvin", 1.0),
        ))
    }

    /// The absolute temperature lying this interval above absolute zero,
    /// in kelvin. 10 delta_degF becomes 5.555... K.
    pub fn absolute_from_absolute_zero(&self) -> Result<Quantity, CalcError> {
        if !self.unit.is_interval() {
            return Err(CalcError::unit_conversion(
                self.unit.display_symbol(),
                "K",
                "only a temperature difference can be laid off from absolute zero",
            ));
        }
        Ok(Quantity::new(
            self.si_value(),
            Unit::absolute_temperature("K", "kelvin", 1.0, 0.0),
        ))
    }

    /// Add two quantities (must have compatible dimensions)
    ///
    /// The result is expressed in `self`'s unit, except that adding an
    /// absolute temperature to an interval yields an absolute temperature.
    pub fn add(&self, other: &Quantity) -> Result<Quantity, CalcError> {
        self.require_same_dimension(other, "addition")?;

        match (self.unit.kind, other.unit.kind) {
            (UnitKind::Absolute, UnitKind::Absolute) => Err(CalcError::dimension_mismatch(
                "addition",
                "temperature difference",
                "second absolute temperature",
            )),
            (UnitKind::Absolute, _) => {
                let delta = other.interval_on_scale_of(&self.unit)?;
                checked(self.value + delta, self.unit.clone())
            }
            (_, UnitKind::Absolute) => other.add(self),
            _ => {
                let converted = other.unit.convert_value(other.value, &self.unit)?;
                checked(self.value + converted, self.unit.clone())
            }
        }
    }

    /// Subtract two quantities (must have compatible dimensions)
    ///
    /// Two absolute temperatures give the interval between them, measured on
    /// `self`'s scale.
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, CalcError> {
        self.require_same_dimension(other, "subtraction")?;

        match (self.unit.kind, other.unit.kind) {
            (UnitKind::Absolute, UnitKind::Absolute) => {
                let delta_si = self.si_value() - other.si_value();
                let interval = UNITS
                    .interval_for(&self.unit)
                    .cloned()
                    .unwrap_or_else(|| Unit::temperature_interval("delta_K", "delta kelvin", 1.0));
                let value = delta_si / interval.factor;
                checked(value, interval)
            }
            (UnitKind::Absolute, _) => {
                let delta = other.interval_on_scale_of(&self.unit)?;
                checked(self.value - delta, self.unit.clone())
            }
            (_, UnitKind::Absolute) => Err(CalcError::dimension_mismatch(
                "subtraction",
                "temperature difference",
                "absolute temperature subtracted from a difference",
            )),
            _ => {
                let converted = other.unit.convert_value(other.value, &self.unit)?;
                checked(self.value - converted, self.unit.clone())
            }
        }
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity) -> Result<Quantity, CalcError> {
        let unit = self.unit.multiply(&other.unit)?;
        checked(self.value * other.value, unit)
    }

    /// Divide two quantities (dimensions are divided)
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Domain`] if `other` is zero.
    pub fn div(&self, other: &Quantity) -> Result<Quantity, CalcError> {
        if other.value == 0.0 {
            let what = other.dimension().name().unwrap_or("quantity");
            return Err(CalcError::div_zero(what));
        }
        let unit = self.unit.divide(&other.unit)?;
        checked(self.value / other.value, unit)
    }

    /// Multiply the magnitude by a pure number, keeping the unit
    pub fn scale(&self, factor: f64) -> Result<Quantity, CalcError> {
        checked(self.value * factor, self.unit.clone())
    }

    /// Negate the magnitude, keeping the unit
    pub fn neg(&self) -> Quantity {
        Quantity::new(-self.value, self.unit.clone())
    }

    /// Raise quantity to an integer power
    pub fn powi(&self, exp: i32) -> Result<Quantity, CalcError> {
        let unit = self.unit.power(exp)?;
        checked(self.value.powi(exp), unit)
    }

    /// Take the square root (dimension exponents must be even)
    pub fn sqrt(&self) -> Result<Quantity, CalcError> {
        if self.value < 0.0 {
            return Err(CalcError::domain(format!("square root of negative value {}", self.value)));
        }
        let unit = self.unit.sqrt()?;
        checked(self.value.sqrt(), unit)
    }

    /// Natural logarithm of a dimensionless, strictly positive quantity
    pub fn ln(&self) -> Result<Quantity, CalcError> {
        let ratio = self.dimensionless_value("ln")?;
        if ratio <= 0.0 {
            return Err(CalcError::domain(format!("ln of non-positive value {}", ratio)));
        }
        checked(ratio.ln(), Unit::dimensionless())
    }

    /// Exponential of a dimensionless quantity
    pub fn exp(&self) -> Result<Quantity, CalcError> {
        let x = self.dimensionless_value("exp")?;
        checked(x.exp(), Unit::dimensionless())
    }

    /// Equality within a relative tolerance, compared in SI
    pub fn approx_eq(&self, other: &Quantity, rel_tol: f64) -> bool {
        if !self.is_compatible(other) || self.unit.kind != other.unit.kind {
            return false;
        }
        let (a, b) = (self.si_value(), other.si_value());
        (a - b).abs() <= rel_tol * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
    }

    fn dimensionless_value(&self, op: &str) -> Result<f64, CalcError> {
        if !self.is_dimensionless() {
            return Err(CalcError::dimension_mismatch(op, Dimension::DIMENSIONLESS, self.dimension()));
        }
        Ok(self.si_value())
    }

    fn require_same_dimension(&self, other: &Quantity, op: &str) -> Result<(), CalcError> {
        if !self.is_compatible(other) {
            return Err(CalcError::dimension_mismatch(op, self.dimension(), other.dimension()));
        }
        Ok(())
    }

    /// This temperature difference expressed in steps of `absolute`'s scale
    fn interval_on_scale_of(&self, absolute: &Unit) -> Result<f64, CalcError> {
        if self.unit.has_offset() {
            return Err(CalcError::unit_conversion(
                self.unit.display_symbol(),
                absolute.display_symbol(),
                "offset scale is ambiguous outside absolute temperatures",
            ));
        }
        Ok(self.value * self.unit.factor / absolute.factor)
    }
}

fn checked(value: f64, unit: Unit) -> Result<Quantity, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::domain(format!("result in {} is not finite", unit.display_symbol())));
    }
    Ok(Quantity::new(value, unit))
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other)
            && self.unit.kind == other.unit.kind
            && self.si_value() == other.si_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn q(value: f64, unit: &str) -> Quantity {
        Quantity::parse(value, unit).unwrap()
    }

    #[test]
    fn test_quantity_creation() {
        let mass = q(100.0, "gram");
        assert_relative_eq!(mass.magnitude(), 100.0);
        assert_eq!(mass.unit().symbol, "g");
        assert_eq!(mass.dimension(), Dimension::MASS);
    }

    #[test]
    fn test_unknown_unit() {
        let err = Quantity::parse(1.0, "furlongs_per_fortnight").unwrap_err();
        assert!(matches!(err, CalcError::UnitParse { .. }));
    }

    #[test]
    fn test_convert_to() {
        let converted = q(1.0, "atm").convert_to("kPa").unwrap();
        assert_relative_eq!(converted.magnitude(), 101.325);
        assert_eq!(converted.unit().symbol, "kPa");
    }

    #[test]
    fn test_convert_incompatible() {
        let err = q(1.0, "gram").convert_to("kelvin").unwrap_err();
        assert!(matches!(err, CalcError::UnitConversion { .. }));
    }

    #[test]
    fn test_round_trip_through_offset_scales() {
        let t = q(98.6, "degree_Fahrenheit");
        let back = t.convert_to("kelvin").unwrap().convert_to("degF").unwrap();
        assert_relative_eq!(back.magnitude(), 98.6, epsilon = 1e-9);

        let body = t.convert_to("degree_Celsius").unwrap();
        assert_relative_eq!(body.magnitude(), 37.0, epsilon = 1e-9);
    }

    #[test]
    fn test_absolute_and_interval_conversion_rejected_both_ways() {
        let err = q(300.0, "kelvin").convert_to("delta_degree_Celsius").unwrap_err();
        assert!(matches!(err, CalcError::UnitConversion { .. }));
        let err = q(10.0, "delta_degree_Celsius").convert_to("kelvin").unwrap_err();
        assert!(matches!(err, CalcError::UnitConversion { .. }));
    }

    #[test]
    fn test_compound_temperature_cannot_bridge_absolute_and_interval() {
        let err = q(300.0, "kelvin")
            .convert_to("kelvin * 1")
            .and_then(|p| p.convert_to("delta_degree_Celsius"))
            .unwrap_err();
        assert!(matches!(err, CalcError::UnitConversion { .. }));

        let err = q(10.0, "delta_degC")
            .convert_to("1 * kelvin")
            .and_then(|p| p.convert_to("kelvin"))
            .unwrap_err();
        assert!(matches!(err, CalcError::UnitConversion { .. }));
    }

    #[test]
    fn test_explicit_crossings_are_separate_operations() {
        let interval = q(0.0, "degC").interval_from_absolute_zero().unwrap();
        assert_eq!(interval.kind(), UnitKind::Interval);
        assert_relative_eq!(interval.magnitude(), 273.15);

        let absolute = q(10.0, "delta_degF").absolute_from_absolute_zero().unwrap();
        assert_eq!(absolute.kind(), UnitKind::Absolute);
        assert_relative_eq!(absolute.magnitude(), 50.0 / 9.0, epsilon = 1e-12);

        assert!(q(10.0, "delta_degC").interval_from_absolute_zero().is_err());
        assert!(q(10.0, "kelvin").absolute_from_absolute_zero().is_err());
    }

    #[test]
    fn test_add() {
        let sum = q(1.0, "kJ").add(&q(500.0, "J")).unwrap();
        assert_relative_eq!(sum.magnitude(), 1.5);
        assert_eq!(sum.unit().symbol, "kJ");
    }

    #[test]
    fn test_add_mismatched_dimensions() {
        let err = q(1.0, "gram").add(&q(1.0, "kelvin")).unwrap_err();
        assert!(matches!(err, CalcError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_temperature_arithmetic() {
        // Two absolute temperatures cannot be added
        let err = q(20.0, "degC").add(&q(30.0, "degC")).unwrap_err();
        assert!(matches!(err, CalcError::DimensionMismatch { .. }));

        // Their difference is an interval on the first scale
        let delta = q(30.0, "degC").sub(&q(293.15, "K")).unwrap();
        assert_eq!(delta.unit().symbol, "delta_degC");
        assert_relative_eq!(delta.magnitude(), 10.0, epsilon = 1e-9);

        // Point plus interval is a point
        let warmer = q(20.0, "degC").add(&q(18.0, "delta_degF")).unwrap();
        assert_eq!(warmer.kind(), UnitKind::Absolute);
        assert_relative_eq!(warmer.magnitude(), 30.0, epsilon = 1e-9);

        let warmer = q(18.0, "delta_degF").add(&q(20.0, "degC")).unwrap();
        assert_eq!(warmer.unit().symbol, "degC");

        // Interval minus point is meaningless
        let err = q(10.0, "delta_degC").sub(&q(20.0, "degC")).unwrap_err();
        assert!(matches!(err, CalcError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_mul_and_div() {
        let heat = q(100.0, "gram")
            .mul(&q(4.186, "joule / (gram * kelvin)"))
            .unwrap()
            .mul(&q(10.0, "delta_degC"))
            .unwrap();
        assert_eq!(heat.dimension(), Dimension::ENERGY);
        assert_relative_eq!(heat.convert_to("J").unwrap().magnitude(), 4186.0, epsilon = 1e-9);

        let ratio = q(2.0, "L").div(&q(500.0, "mL")).unwrap();
        assert!(ratio.is_dimensionless());
        assert_relative_eq!(ratio.si_value(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_div_by_zero() {
        let err = q(1.0, "J").div(&q(0.0, "kelvin")).unwrap_err();
        assert!(matches!(err, CalcError::Domain(_)));
    }

    #[test]
    fn test_offset_scale_refuses_products() {
        let err = q(25.0, "degC").mul(&q(2.0, "mol")).unwrap_err();
        assert!(matches!(err, CalcError::UnitConversion { .. }));
    }

    #[test]
    fn test_ln() {
        let ratio = q(2.0, "L").div(&q(1.0, "L")).unwrap();
        assert_relative_eq!(ratio.ln().unwrap().magnitude(), std::f64::consts::LN_2);

        let err = q(0.0, "L").div(&q(1.0, "L")).unwrap().ln().unwrap_err();
        assert!(matches!(err, CalcError::Domain(_)));

        let err = q(2.0, "L").ln().unwrap_err();
        assert!(matches!(err, CalcError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_exp_and_sqrt() {
        assert_relative_eq!(Quantity::dimensionless(0.0).exp().unwrap().magnitude(), 1.0);
        let side = q(16.0, "m2").sqrt().unwrap();
        assert_eq!(side.dimension(), Dimension::LENGTH);
        assert_relative_eq!(side.magnitude(), 4.0);
        assert!(q(-1.0, "m2").sqrt().is_err());
    }

    #[test]
    fn test_to_si() {
        let si = q(1.0, "kWh").to_si().unwrap();
        assert_relative_eq!(si.magnitude(), 3.6e6);
        let si = q(0.0, "degC").to_si().unwrap();
        assert_relative_eq!(si.magnitude(), 273.15);
    }

    #[test]
    fn test_equality() {
        assert_eq!(q(1.0, "kg"), q(1000.0, "g"));
        assert!(q(1.0, "L").approx_eq(&q(1000.0, "mL"), 1e-12));
        assert!(!q(300.0, "K").approx_eq(&q(300.0, "delta_K"), 1e-12));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", q(5.0, "J")), "5 J");
        assert_eq!(format!("{}", Quantity::dimensionless(2.5)), "2.5");
    }
}
