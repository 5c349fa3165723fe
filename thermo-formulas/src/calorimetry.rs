//! Calorimetry: sensible heat, linear expansion, thermal equilibrium

use crate::{Bindings, Formula, FormulaMeta, VariableSpec};
use thermo_core::CalcError;
use thermo_units::Quantity;

pub struct SensibleHeat;
pub struct LinearThermalExpansion;
pub struct ThermalEquilibrium;

const CATEGORY: &str = "calorimetry";

static SENSIBLE_HEAT_VARS: [VariableSpec; 3] = [
    VariableSpec::new("mass", "m", "gram"),
    VariableSpec::new("specific_heat", "c", "joule / (gram * kelvin)"),
    VariableSpec::new("delta_temperature", r"\Delta T", "delta_degree_Celsius"),
];

static EXPANSION_VARS: [VariableSpec; 3] = [
    VariableSpec::new("initial_length", "L_0", "meter"),
    VariableSpec::new("expansion_coefficient", r"\alpha", "1 / kelvin"),
    VariableSpec::new("delta_temperature", r"\Delta T", "delta_degree_Celsius"),
];

static EQUILIBRIUM_VARS: [VariableSpec; 5] = [
    VariableSpec::new("mass_1", "m_1", "gram"),
    VariableSpec::new("specific_heat_1", "c_1", "joule / (gram * kelvin)"),
    VariableSpec::new("delta_temperature_1", r"\Delta T_1", "delta_degree_Celsius"),
    VariableSpec::new("mass_2", "m_2", "gram"),
    VariableSpec::new("specific_heat_2", "c_2", "joule / (gram * kelvin)"),
];

impl Formula for SensibleHeat {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Sensible Heat",
            description: "Heat needed to change the temperature of a mass without a phase change.",
            formula_latex: r"Q = m \cdot c \cdot \Delta T",
            category: CATEGORY,
            variables: &SENSIBLE_HEAT_VARS,
            target: VariableSpec::new("heat", "Q", "joule"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args
            .get("mass")?
            .mul(args.get("specific_heat")?)?
            .mul(args.get("delta_temperature")?)
    }
}

impl Formula for LinearThermalExpansion {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Linear Thermal Expansion",
            description: "Change in length of a solid caused by a change in temperature.",
            formula_latex: r"\Delta L = \alpha \cdot L_0 \cdot \Delta T",
            category: CATEGORY,
            variables: &EXPANSION_VARS,
            target: VariableSpec::new("delta_length", r"\Delta L", "millimeter"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args
            .get("initial_length")?
            .mul(args.get("expansion_coefficient")?)?
            .mul(args.get("delta_temperature")?)
    }
}

impl Formula for ThermalEquilibrium {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Thermal Equilibrium",
            description: "Temperature change of the second body when two bodies exchange heat until equilibrium.",
            formula_latex: r"m_1 c_1 \Delta T_1 + m_2 c_2 \Delta T_2 = 0",
            category: CATEGORY,
            variables: &EQUILIBRIUM_VARS,
            target: VariableSpec::new("delta_temperature_2", r"\Delta T_2", "delta_degree_Celsius"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        let released = args
            .get("mass_1")?
            .mul(args.get("specific_heat_1")?)?
            .mul(args.get("delta_temperature_1")?)?;
        let capacity_2 = args.get("mass_2")?.mul(args.get("specific_heat_2")?)?;
        Ok(released.div(&capacity_2)?.neg())
    }
}
