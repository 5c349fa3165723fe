//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as a 7-element vector:
//! [length, mass, time, current, temperature, amount, luminosity]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbols of the base dimensions, in exponent order
const BASE_SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// Represents the dimensions of a physical quantity
/// as exponents of the 7 SI base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity]
    pub exponents: [i32; 7],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 0] };
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0, 0] };
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0, 0] };
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0, 0] };
    pub const CURRENT: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0, 0] };
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0, 0] };
    pub const AMOUNT: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 1, 0] };
    pub const LUMINOSITY: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0, 1] };

    /// Area [L^2]
    pub const AREA: Dimension = Dimension { exponents: [2, 0, 0, 0, 0, 0, 0] };

    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension { exponents: [3, 0, 0, 0, 0, 0, 0] };

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0, 0] };

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension { exponents: [2, 1, -2, 0, 0, 0, 0] };

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension { exponents: [2, 1, -3, 0, 0, 0, 0] };

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension { exponents: [-1, 1, -2, 0, 0, 0, 0] };

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension { exponents: [0, 0, -1, 0, 0, 0, 0] };

    /// Heat capacity, entropy [M L^2 T^-2 Θ^-1]
    pub const HEAT_CAPACITY: Dimension = Dimension { exponents: [2, 1, -2, 0, -1, 0, 0] };

    /// Specific heat capacity [L^2 T^-2 Θ^-1]
    pub const SPECIFIC_HEAT: Dimension = Dimension { exponents: [2, 0, -2, 0, -1, 0, 0] };

    /// Molar heat capacity, gas constant [M L^2 T^-2 Θ^-1 N^-1]
    pub const MOLAR_HEAT_CAPACITY: Dimension = Dimension { exponents: [2, 1, -2, 0, -1, -1, 0] };

    /// Thermal expansion coefficient [Θ^-1]
    pub const INVERSE_TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 0, -1, 0, 0] };

    pub fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Whether this is exactly the temperature dimension Θ
    pub fn is_temperature(&self) -> bool {
        *self == Dimension::TEMPERATURE
    }

    /// Multiply dimensions (add exponents); `None` if an exponent overflows
    pub fn multiply(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_add)
    }

    /// Divide dimensions (subtract exponents); `None` if an exponent overflows
    pub fn divide(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_sub)
    }

    /// Raise to integer power (multiply exponents); `None` if an exponent overflows
    pub fn power(&self, exp: i32) -> Option<Dimension> {
        let mut result = [0i32; 7];
        for (slot, e) in result.iter_mut().zip(self.exponents) {
            *slot = e.checked_mul(exp)?;
        }
        Some(Dimension { exponents: result })
    }

    pub fn invert(&self) -> Option<Dimension> {
        self.power(-1)
    }

    /// Halve every exponent, if they are all even
    pub fn sqrt(&self) -> Option<Dimension> {
        if self.exponents.iter().any(|e| e % 2 != 0) {
            return None;
        }
        Some(Dimension { exponents: self.exponents.map(|e| e / 2) })
    }

    fn zip_with(&self, other: &Dimension, op: impl Fn(i32, i32) -> Option<i32>) -> Option<Dimension> {
        let mut result = [0i32; 7];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = op(self.exponents[i], other.exponents[i])?;
        }
        Some(Dimension { exponents: result })
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0, 0] => Some("current"),
            [0, 0, 0, 0, 1, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 0, 1, 0] => Some("amount"),
            [0, 0, 0, 0, 0, 0, 1] => Some("luminosity"),
            [2, 0, 0, 0, 0, 0, 0] => Some("area"),
            [3, 0, 0, 0, 0, 0, 0] => Some("volume"),
            [1, 1, -2, 0, 0, 0, 0] => Some("force"),
            [2, 1, -2, 0, 0, 0, 0] => Some("energy"),
            [2, 1, -3, 0, 0, 0, 0] => Some("power"),
            [-1, 1, -2, 0, 0, 0, 0] => Some("pressure"),
            [0, 0, -1, 0, 0, 0, 0] => Some("frequency"),
            [2, 1, -2, 0, -1, 0, 0] => Some("heat capacity"),
            [2, 0, -2, 0, -1, 0, 0] => Some("specific heat"),
            [2, 1, -2, 0, -1, -1, 0] => Some("molar heat capacity"),
            [0, 0, 0, 0, -1, 0, 0] => Some("inverse temperature"),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .exponents
            .iter()
            .enumerate()
            .filter(|(_, &exp)| exp != 0)
            .map(|(i, &exp)| {
                if exp == 1 {
                    BASE_SYMBOLS[i].to_string()
                } else {
                    format!("{}^{}", BASE_SYMBOLS[i], exp)
                }
            })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
