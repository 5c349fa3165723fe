//! Formula traits and metadata

use crate::{Bindings, Inputs};
use serde::Serialize;
use thermo_core::CalcError;
use thermo_units::{suggested_units, Quantity};

/// One named physical quantity of a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariableSpec {
    /// Identifier, unique within its formula
    pub key: &'static str,
    /// Display markup (LaTeX)
    pub symbol: &'static str,
    /// Unit expression the value is converted to before evaluation
    pub default_unit: &'static str,
}

impl VariableSpec {
    pub const fn new(key: &'static str, symbol: &'static str, default_unit: &'static str) -> Self {
        Self { key, symbol, default_unit }
    }

    /// Human-readable label derived from the key: `delta_temperature` -> "Delta temperature"
    pub fn label(&self) -> String {
        let spaced = self.key.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Units a form should offer for this variable, the default first
    pub fn suggested_units(&self) -> Vec<&'static str> {
        suggested_units(self.default_unit)
    }
}

/// The output quantity of a formula
pub type TargetSpec = VariableSpec;

/// Metadata for a formula
#[derive(Debug, Clone, Serialize)]
pub struct FormulaMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub formula_latex: &'static str,
    pub category: &'static str,
    /// Inputs in form order; `solve` looks them up by key
    pub variables: &'static [VariableSpec],
    pub target: TargetSpec,
}

/// A closed-form relation over named physical quantities.
///
/// Implementations are stateless; `solve` is a pure function of its inputs.
pub trait Formula: Send + Sync {
    fn meta(&self) -> FormulaMeta;

    /// Compute the target from inputs already checked and converted to their
    /// default units. The result may be in any unit compatible with the target.
    fn evaluate(&self, args: &Bindings) -> Result<Quantity, CalcError>;

    /// Evaluate the formula, returning the target quantity in the target's
    /// default unit.
    fn solve(&self, inputs: &Inputs) -> Result<Quantity, CalcError> {
        let args = Bindings::bind(&self.meta(), inputs)?;
        args.finish(self.evaluate(&args)?)
    }

    fn name(&self) -> &'static str {
        self.meta().name
    }

    fn description(&self) -> &'static str {
        self.meta().description
    }

    fn formula_latex(&self) -> &'static str {
        self.meta().formula_latex
    }

    fn category(&self) -> &'static str {
        self.meta().category
    }

    fn variables(&self) -> &'static [VariableSpec] {
        self.meta().variables
    }

    fn target(&self) -> TargetSpec {
        self.meta().target
    }
}
