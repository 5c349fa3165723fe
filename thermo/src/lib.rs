//! Thermo - unit-aware calorimetry and thermodynamics calculator
//!
//! Pick a formula from the catalog, hand it labeled quantities in any
//! compatible unit, and get back a result in the formula's target unit.
//!
//! ```
//! use thermo::{inputs, Thermo};
//!
//! let thermo = Thermo::with_standard_catalog().unwrap();
//! let heat = thermo
//!     .solve(
//!         "Sensible Heat",
//!         &inputs! {
//!             mass: (100.0, "gram"),
//!             specific_heat: (4.186, "joule / (gram * kelvin)"),
//!             delta_temperature: (10.0, "delta_degree_Celsius"),
//!         }
//!         .unwrap(),
//!     )
//!     .unwrap();
//! assert!((heat.magnitude() - 4186.0).abs() < 1e-6);
//! ```

pub use thermo_core::{codes, CalcError, Severity};
pub use thermo_formulas::{
    load_calorimetry, load_thermodynamics, standard_registry, Bindings, Formula, FormulaMeta, Inputs,
    Registry, RegistryBuilder, ResolvedUnits, TargetSpec, VariableSpec,
};
pub use thermo_units::{
    avogadro_constant, boltzmann_constant, gas_constant, make_quantity, parse_unit, suggested_units,
    Dimension, Quantity, Unit, UnitKind,
};

use serde_json::Value;
use std::sync::Arc;

/// Main Thermo engine: a shared, read-only formula catalog
#[derive(Clone)]
pub struct Thermo {
    registry: Arc<Registry>,
}

impl Thermo {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Engine over the ten built-in formulas
    pub fn with_standard_catalog() -> Result<Self, CalcError> {
        Ok(Self::new(standard_registry()?))
    }

    /// The underlying registry, for sharing across sessions or threads
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    pub fn list(&self) -> Vec<&dyn Formula> {
        self.registry.list()
    }

    pub fn list_sorted(&self) -> Vec<&dyn Formula> {
        self.registry.list_sorted()
    }

    pub fn get(&self, name: &str) -> Result<&dyn Formula, CalcError> {
        self.registry.get(name)
    }

    pub fn solve(&self, name: &str, inputs: &Inputs) -> Result<Quantity, CalcError> {
        self.registry.solve(name, inputs)
    }

    pub fn catalog(&self) -> Value {
        self.registry.catalog()
    }
}

/// Build an [`Inputs`] map from `key: (magnitude, "unit expression")` pairs.
///
/// Evaluates to `Result<Inputs, CalcError>`; a malformed unit expression
/// surfaces as [`CalcError::UnitParse`].
#[macro_export]
macro_rules! inputs {
    {} => { ::std::result::Result::<$crate::Inputs, $crate::CalcError>::Ok($crate::Inputs::new()) };
    { $($key:ident : ($value:expr, $unit:expr)),* $(,)? } => {
        (|| -> ::std::result::Result<$crate::Inputs, $crate::CalcError> {
            let mut map = $crate::Inputs::new();
            $(
                map.insert(stringify!($key).to_string(), $crate::make_quantity($value, $unit)?);
            )*
            Ok(map)
        })()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    fn test_thermo() -> Thermo {
        Thermo::with_standard_catalog().unwrap()
    }

    /// Distinct, positive sample values at each variable's default unit
    fn default_inputs(formula: &dyn Formula) -> Inputs {
        formula
            .variables()
            .iter()
            .enumerate()
            .map(|(i, v)| (v.key.to_string(), make_quantity(2.0 + i as f64, v.default_unit).unwrap()))
            .collect()
    }

    #[test]
    fn test_inputs_macro() {
        let inputs = inputs! { heat: (1.0, "kJ"), work: (200.0, "joule") }.unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs["heat"].unit().symbol, "kJ");

        assert!(inputs! {}.unwrap().is_empty());

        let err = inputs! { heat: (1.0, "kilo-joules") }.unwrap_err();
        assert!(matches!(err, CalcError::UnitParse { .. }));
    }

    #[test]
    fn test_every_formula_returns_its_target_unit() {
        let thermo = test_thermo();
        for formula in thermo.list() {
            let result = formula.solve(&default_inputs(formula)).unwrap();
            let target = parse_unit(formula.target().default_unit).unwrap();
            assert_eq!(result.dimension(), target.dimension, "{}", formula.name());
            assert_eq!(result.unit().symbol, target.symbol, "{}", formula.name());
        }
    }

    #[test]
    fn test_rescaled_inputs_give_the_same_answer() {
        let thermo = test_thermo();
        for formula in thermo.list() {
            let base_inputs = default_inputs(formula);
            let expected = formula.solve(&base_inputs).unwrap().magnitude();

            for spec in formula.variables() {
                for unit in spec.suggested_units() {
                    let mut inputs = base_inputs.clone();
                    let rescaled = inputs[spec.key].convert_to(unit).unwrap();
                    inputs.insert(spec.key.to_string(), rescaled);

                    let got = formula.solve(&inputs).unwrap().magnitude();
                    assert_relative_eq!(got, expected, epsilon = 1e-12, max_relative = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_missing_key_for_every_formula() {
        let thermo = test_thermo();
        for formula in thermo.list() {
            for spec in formula.variables() {
                let mut inputs = default_inputs(formula);
                inputs.remove(spec.key);
                let err = formula.solve(&inputs).unwrap_err();
                assert_eq!(err, CalcError::missing_input(formula.name(), spec.key));
            }
        }
    }

    #[test]
    fn test_wrong_dimension_for_every_formula() {
        let thermo = test_thermo();
        for formula in thermo.list() {
            for spec in formula.variables() {
                let mut inputs = default_inputs(formula);
                inputs.insert(spec.key.to_string(), make_quantity(1.0, "second").unwrap());
                let err = formula.solve(&inputs).unwrap_err();
                assert_eq!(err.code(), codes::DIMENSION_MISMATCH, "{} {}", formula.name(), spec.key);
            }
        }
    }

    #[test]
    fn test_scenarios() {
        let thermo = test_thermo();

        let heat = thermo
            .solve(
                "Sensible Heat",
                &inputs! {
                    mass: (100.0, "gram"),
                    specific_heat: (4.186, "joule / (gram * kelvin)"),
                    delta_temperature: (10.0, "delta_degree_Celsius"),
                }
                .unwrap(),
            )
            .unwrap();
        assert_relative_eq!(heat.magnitude(), 4186.0, max_relative = 1e-9);

        let volume = thermo
            .solve(
                "Ideal Gas Law",
                &inputs! {
                    moles: (1.0, "mol"),
                    temperature: (273.15, "kelvin"),
                    pressure: (101325.0, "pascal"),
                }
                .unwrap(),
            )
            .unwrap();
        assert_relative_eq!(volume.magnitude(), 22.4, max_relative = 1e-3);

        let v2 = thermo
            .solve(
                "Boyle's Law",
                &inputs! {
                    initial_pressure: (1.0, "atmosphere"),
                    initial_volume: (2.0, "liter"),
                    final_pressure: (2.0, "atmosphere"),
                }
                .unwrap(),
            )
            .unwrap();
        assert_relative_eq!(v2.magnitude(), 1.0, max_relative = 1e-12);

        let work = thermo
            .solve(
                "Isothermal Work",
                &inputs! {
                    moles: (1.0, "mol"),
                    temperature: (300.0, "kelvin"),
                    initial_volume: (3.0, "liter"),
                    final_volume: (3.0, "liter"),
                }
                .unwrap(),
            )
            .unwrap();
        assert_eq!(work.magnitude(), 0.0);

        let err = thermo
            .solve(
                "Isothermal Work",
                &inputs! {
                    moles: (1.0, "mol"),
                    temperature: (300.0, "kelvin"),
                    initial_volume: (3.0, "liter"),
                    final_volume: (0.0, "liter"),
                }
                .unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, CalcError::Domain(_)));

        let err = thermo
            .solve(
                "Thermal Equilibrium",
                &inputs! {
                    mass_1: (100.0, "gram"),
                    specific_heat_1: (4.186, "joule / (gram * kelvin)"),
                    delta_temperature_1: (-20.0, "delta_degree_Celsius"),
                    mass_2: (0.0, "gram"),
                    specific_heat_2: (4.186, "joule / (gram * kelvin)"),
                }
                .unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, CalcError::Domain(_)));
    }

    #[test]
    fn test_celsius_is_accepted_for_absolute_temperature() {
        let thermo = test_thermo();
        let kelvin = thermo
            .solve("Mean Kinetic Energy (Monatomic Gas)", &inputs! { temperature: (273.15, "K") }.unwrap())
            .unwrap();
        let celsius = thermo
            .solve(
                "Mean Kinetic Energy (Monatomic Gas)",
                &inputs! { temperature: (0.0, "degree_Celsius") }.unwrap(),
            )
            .unwrap();
        assert_relative_eq!(kelvin.magnitude(), celsius.magnitude(), max_relative = 1e-12);
    }

    #[test]
    fn test_absolute_versus_interval_guard() {
        let t = make_quantity(300.0, "kelvin").unwrap();
        assert!(t.convert_to("delta_degree_Celsius").is_err());
        let dt = make_quantity(10.0, "delta_degree_Celsius").unwrap();
        assert!(dt.convert_to("kelvin").is_err());

        assert_relative_eq!(t.interval_from_absolute_zero().unwrap().magnitude(), 300.0);
        assert_relative_eq!(dt.absolute_from_absolute_zero().unwrap().magnitude(), 10.0);

        let compound = make_quantity(300.0, "kelvin * 1").unwrap();
        assert_eq!(compound.convert_to("kelvin").unwrap_err().code(), codes::UNIT_CONVERSION);
    }

    #[test]
    fn test_compound_temperature_is_not_a_difference() {
        let thermo = test_thermo();
        let err = thermo
            .solve(
                "Sensible Heat",
                &inputs! {
                    mass: (1.0, "kg"),
                    specific_heat: (4186.0, "J/(kg*K)"),
                    delta_temperature: (300.0, "kelvin * 1"),
                }
                .unwrap(),
            )
            .unwrap_err();
        assert_eq!(err.code(), codes::UNIT_CONVERSION);

        let err = thermo
            .solve(
                "Mean Kinetic Energy (Monatomic Gas)",
                &inputs! { temperature: (300.0, "K*1") }.unwrap(),
            )
            .unwrap_err();
        assert_eq!(err.code(), codes::UNIT_CONVERSION);
    }

    #[test]
    fn test_oversized_unit_exponent_is_rejected() {
        let err = make_quantity(1.0, "((m^50000)^50000)").unwrap_err();
        assert_eq!(err.code(), codes::UNIT_PARSE);
    }

    #[test]
    fn test_unknown_formula() {
        let thermo = test_thermo();
        let err = thermo.get("Ideal Gas").err().unwrap();
        assert_eq!(err.code(), codes::NOT_FOUND);
        assert!(err.suggestion().unwrap().contains("Ideal Gas Law"));
    }

    #[test]
    fn test_catalog_lists_every_formula() {
        let thermo = test_thermo();
        let catalog = thermo.catalog();
        let formulas = catalog["formulas"].as_array().unwrap();
        assert_eq!(formulas.len(), 10);
        assert_eq!(formulas[0]["name"], "Sensible Heat");
        assert_eq!(formulas[0]["variables"][2]["label"], "Delta temperature");
    }

    #[test]
    fn test_sorted_listing() {
        let thermo = test_thermo();
        let names: Vec<_> = thermo.list_sorted().iter().map(|f| f.name()).collect();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(names, expected);
        assert_eq!(names[0], "Boyle's Law");
    }

    #[test]
    fn test_shared_engine_across_threads() {
        let thermo = test_thermo();
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let thermo = thermo.clone();
                thread::spawn(move || {
                    let inputs = inputs! { heat: (i as f64, "kJ"), work: (0.0, "J") }.unwrap();
                    thermo.solve("First Law of Thermodynamics", &inputs).unwrap().magnitude()
                })
            })
            .collect();
        let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![1000.0, 2000.0, 3000.0, 4000.0]);
    }
}
