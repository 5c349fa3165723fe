//! Thermo Formulas - the calculator's formula catalog
//!
//! Each formula is a stateless unit struct implementing [`Formula`].
//! Formulas are registered explicitly through [`RegistryBuilder`]:
//! - Calorimetry: sensible heat, linear thermal expansion, thermal equilibrium
//! - Thermodynamics: ideal gas law, mean kinetic energy, first law,
//!   isothermal work, Boyle's law, heat capacity, Charles's law

pub mod calorimetry;
pub mod thermodynamics;

mod inputs;
mod registry;
mod traits;

pub use inputs::{Bindings, Inputs, ResolvedUnits};
pub use registry::{Registry, RegistryBuilder};
pub use traits::{Formula, FormulaMeta, TargetSpec, VariableSpec};

use thermo_core::CalcError;

/// Add the calorimetry formulas to a builder
pub fn load_calorimetry(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .with_formula(calorimetry::SensibleHeat)
        .with_formula(calorimetry::LinearThermalExpansion)
        .with_formula(calorimetry::ThermalEquilibrium)
}

/// Add the thermodynamics formulas to a builder
pub fn load_thermodynamics(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .with_formula(thermodynamics::IdealGasLaw)
        .with_formula(thermodynamics::MeanKineticEnergy)
        .with_formula(thermodynamics::FirstLaw)
        .with_formula(thermodynamics::IsothermalWork)
        .with_formula(thermodynamics::BoylesLaw)
        .with_formula(thermodynamics::HeatCapacity)
        .with_formula(thermodynamics::CharlesLaw)
}

/// Registry holding every built-in formula
pub fn standard_registry() -> Result<Registry, CalcError> {
    load_thermodynamics(load_calorimetry(RegistryBuilder::new())).build()
}

/// Re-export for formula authors
pub mod prelude {
    pub use crate::{
        Bindings, Formula, FormulaMeta, Inputs, Registry, RegistryBuilder, ResolvedUnits, VariableSpec,
    };
    pub use thermo_core::prelude::*;
    pub use thermo_units::{make_quantity, Quantity};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use thermo_units::{make_quantity, parse_unit};

    #[test]
    fn test_standard_registry_loads_all() {
        let registry = standard_registry().unwrap();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.by_category("calorimetry").len(), 3);
        assert_eq!(registry.by_category("thermodynamics").len(), 7);
        assert_eq!(registry.names()[0], "Sensible Heat");
    }

    #[test]
    fn test_declared_units_are_consistent() {
        let registry = standard_registry().unwrap();
        for formula in registry.list() {
            assert!(parse_unit(formula.target().default_unit).is_ok());
            assert!(!formula.variables().is_empty(), "{}", formula.name());
            assert!(!formula.formula_latex().is_empty());
            assert!(!formula.description().is_empty());
        }
    }

    #[test]
    fn test_concurrent_solves_agree() {
        let registry = Arc::new(standard_registry().unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let inputs: Inputs = [
                        ("moles".to_string(), make_quantity(1.0, "mol").unwrap()),
                        ("temperature".to_string(), make_quantity(273.15, "kelvin").unwrap()),
                        ("pressure".to_string(), make_quantity(101325.0, "pascal").unwrap()),
                    ]
                    .into();
                    registry.solve("Ideal Gas Law", &inputs).unwrap().magnitude()
                })
            })
            .collect();

        let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
