//! Physical constants as quantities with their units baked in (CODATA 2018, exact)

use crate::{Dimension, Quantity, Unit};

/// Molar gas constant R = 8.314462618 J/(mol·K)
pub fn gas_constant() -> Quantity {
    Quantity::new(
        8.314462618,
        Unit::new("J/(mol·K)", "joule per mole kelvin", Dimension::MOLAR_HEAT_CAPACITY, 1.0, "derived"),
    )
}

/// Boltzmann constant kB = 1.380649e-23 J/K
pub fn boltzmann_constant() -> Quantity {
    Quantity::new(
        1.380649e-23,
        Unit::new("J/K", "joule per kelvin", Dimension::HEAT_CAPACITY, 1.0, "derived"),
    )
}

/// Avogadro constant NA = 6.02214076e23 1/mol
pub fn avogadro_constant() -> Quantity {
    Quantity::new(
        6.02214076e23,
        Unit::new("1/mol", "per mole", Dimension::new([0, 0, 0, 0, 0, -1, 0]), 1.0, "derived"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gas_constant_is_boltzmann_times_avogadro() {
        let r = boltzmann_constant().mul(&avogadro_constant()).unwrap();
        assert_eq!(r.dimension(), gas_constant().dimension());
        assert_relative_eq!(r.si_value(), gas_constant().si_value(), max_relative = 1e-9);
    }

    #[test]
    fn test_constants_are_plain() {
        assert!(!gas_constant().unit().has_offset());
        assert_eq!(boltzmann_constant().dimension(), Dimension::HEAT_CAPACITY);
    }
}
