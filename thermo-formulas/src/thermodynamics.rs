//! Thermodynamics: ideal gases, the first law, isothermal work, heat capacity

use crate::{Bindings, Formula, FormulaMeta, VariableSpec};
use thermo_core::CalcError;
use thermo_units::{boltzmann_constant, gas_constant, Quantity};

pub struct IdealGasLaw;
pub struct MeanKineticEnergy;
pub struct FirstLaw;
pub struct IsothermalWork;
pub struct BoylesLaw;
pub struct HeatCapacity;
pub struct CharlesLaw;

const CATEGORY: &str = "thermodynamics";

static IDEAL_GAS_VARS: [VariableSpec; 3] = [
    VariableSpec::new("moles", "n", "mol"),
    VariableSpec::new("temperature", "T", "kelvin"),
    VariableSpec::new("pressure", "P", "pascal"),
];

static KINETIC_VARS: [VariableSpec; 1] = [VariableSpec::new("temperature", "T", "kelvin")];

static FIRST_LAW_VARS: [VariableSpec; 2] = [
    VariableSpec::new("heat", "Q", "joule"),
    VariableSpec::new("work", "W", "joule"),
];

static ISOTHERMAL_VARS: [VariableSpec; 4] = [
    VariableSpec::new("moles", "n", "mol"),
    VariableSpec::new("temperature", "T", "kelvin"),
    VariableSpec::new("initial_volume", "V_i", "liter"),
    VariableSpec::new("final_volume", "V_f", "liter"),
];

static BOYLE_VARS: [VariableSpec; 3] = [
    VariableSpec::new("initial_pressure", "P_1", "pascal"),
    VariableSpec::new("initial_volume", "V_1", "liter"),
    VariableSpec::new("final_pressure", "P_2", "pascal"),
];

static HEAT_CAPACITY_VARS: [VariableSpec; 2] = [
    VariableSpec::new("heat", "Q", "joule"),
    VariableSpec::new("delta_temperature", r"\Delta T", "delta_degree_Celsius"),
];

static CHARLES_VARS: [VariableSpec; 3] = [
    VariableSpec::new("initial_volume", "V_1", "liter"),
    VariableSpec::new("initial_temperature", "T_1", "kelvin"),
    VariableSpec::new("final_temperature", "T_2", "kelvin"),
];

impl Formula for IdealGasLaw {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Ideal Gas Law",
            description: "Volume occupied by an ideal gas at a given amount, temperature and pressure.",
            formula_latex: r"V = \frac{nRT}{P}",
            category: CATEGORY,
            variables: &IDEAL_GAS_VARS,
            target: VariableSpec::new("volume", "V", "liter"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args.get("moles")?
            .mul(&gas_constant())?
            .mul(args.get("temperature")?)?
            .div(args.get("pressure")?)
    }
}

impl Formula for MeanKineticEnergy {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Mean Kinetic Energy (Monatomic Gas)",
            description: "Average translational kinetic energy of a particle in a monatomic ideal gas.",
            formula_latex: r"K = \frac{3}{2} k_B T",
            category: CATEGORY,
            variables: &KINETIC_VARS,
            target: VariableSpec::new("kinetic_energy", "K", "joule"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        boltzmann_constant().mul(args.get("temperature")?)?.scale(1.5)
    }
}

impl Formula for FirstLaw {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "First Law of Thermodynamics",
            description: "Change in internal energy from the heat added to a system and the work it does.",
            formula_latex: r"\Delta U = Q - W",
            category: CATEGORY,
            variables: &FIRST_LAW_VARS,
            target: VariableSpec::new("internal_energy_change", r"\Delta U", "joule"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args.get("heat")?.sub(args.get("work")?)
    }
}

impl Formula for IsothermalWork {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Isothermal Work",
            description: "Work done by an ideal gas expanding or compressed at constant temperature.",
            formula_latex: r"W = nRT \ln\left(\frac{V_f}{V_i}\right)",
            category: CATEGORY,
            variables: &ISOTHERMAL_VARS,
            target: VariableSpec::new("work", "W", "joule"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        let ratio = args
            .positive("final_volume")?
            .div(args.positive("initial_volume")?)?;
        args.get("moles")?
            .mul(&gas_constant())?
            .mul(args.get("temperature")?)?
            .mul(&ratio.ln()?)
    }
}

impl Formula for BoylesLaw {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Boyle's Law",
            description: "Final volume of a gas compressed or expanded at constant temperature.",
            formula_latex: r"P_1 V_1 = P_2 V_2",
            category: CATEGORY,
            variables: &BOYLE_VARS,
            target: VariableSpec::new("final_volume", "V_2", "liter"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args
            .get("initial_pressure")?
            .mul(args.get("initial_volume")?)?
            .div(args.get("final_pressure")?)
    }
}

impl Formula for HeatCapacity {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Heat Capacity",
            description: "Heat a body absorbs per degree of temperature change.",
            formula_latex: r"C = \frac{Q}{\Delta T}",
            category: CATEGORY,
            variables: &HEAT_CAPACITY_VARS,
            target: VariableSpec::new("heat_capacity", "C", "joule / delta_degree_Celsius"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args.get("heat")?.div(args.get("delta_temperature")?)
    }
}

impl Formula for CharlesLaw {
    fn meta(&self) -> FormulaMeta {
        FormulaMeta {
            name: "Charles's Law",
            description: "Final volume of a gas heated or cooled at constant pressure.",
            formula_latex: r"\frac{V_1}{T_1} = \frac{V_2}{T_2}",
            category: CATEGORY,
            variables: &CHARLES_VARS,
            target: VariableSpec::new("final_volume", "V_2", "liter"),
        }
    }

    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError> {
        args
            .get("initial_volume")?
            .mul(args.get("final_temperature")?)?
            .div(args.get("initial_temperature")?)
    }
}
