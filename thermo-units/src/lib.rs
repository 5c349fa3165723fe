//! Thermo Units - Physical Quantity and Unit Conversion
//!
//! Provides unit-aware quantities with dimensional analysis for heat and
//! gas problems. Temperatures carry a kind: absolute points on a scale
//! (K, degC, degF, degR) never mix with temperature differences
//! (delta_K, delta_degC, ...) unless the caller asks for it explicitly.
//!
//! Categories:
//! - Length (m, km, mm, ft, etc.)
//! - Mass (kg, g, lb, etc.)
//! - Time (s, min, h, d)
//! - Temperature (K, degC, degF, degR)
//! - Temperature interval (delta_K, delta_degC, delta_degF, delta_degR)
//! - Amount (mol, mmol, kmol)
//! - Area, Volume (m², L, mL, gal, etc.)
//! - Force, Energy, Power (N, J, cal, kWh, W, etc.)
//! - Pressure (Pa, kPa, bar, atm, psi, etc.)
//! - Frequency (Hz, kHz)

mod constants;
mod dimension;
mod parse;
mod quantity;
mod suggest;
mod unit;
mod units;

pub use constants::{avogadro_constant, boltzmann_constant, gas_constant};
pub use dimension::Dimension;
pub use parse::{parse_quantity_string, parse_unit};
pub use quantity::Quantity;
pub use suggest::suggested_units;
pub use unit::{Unit, UnitKind};
pub use units::{UnitRegistry, UNITS};

use thermo_core::CalcError;

/// Build a quantity from a magnitude and a unit expression such as
/// `"joule / (gram * kelvin)"`.
pub fn make_quantity(magnitude: f64, unit_expression: &str) -> Result<Quantity, CalcError> {
    Quantity::parse(magnitude, unit_expression)
}
