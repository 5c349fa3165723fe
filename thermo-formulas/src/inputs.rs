//! Input binding: checks a caller's quantities against a formula's variables

use crate::{FormulaMeta, VariableSpec};
use std::collections::HashMap;
use thermo_core::CalcError;
use thermo_units::{parse_unit, Quantity, Unit, UnitKind};
use tracing::debug;

/// Labeled inputs to a formula, keyed by variable key
pub type Inputs = HashMap<String, Quantity>;

/// A formula's default units, parsed once
#[derive(Debug, Clone)]
pub struct ResolvedUnits {
    /// One per variable, in declaration order
    variables: Vec<Unit>,
    target: Unit,
}

impl ResolvedUnits {
    /// Parse every variable and target default unit of `meta`
    pub fn resolve(meta: &FormulaMeta) -> Result<Self, CalcError> {
        let variables = meta
            .variables
            .iter()
            .map(|spec| parse_unit(spec.default_unit))
            .collect::<Result<Vec<_>, _>>()?;
        let target = parse_unit(meta.target.default_unit)?;
        Ok(ResolvedUnits { variables, target })
    }

    pub fn target(&self) -> &Unit {
        &self.target
    }
}

/// Inputs of one `solve` call, each checked and converted to its default unit
#[derive(Debug)]
pub struct Bindings {
    formula: &'static str,
    target_key: &'static str,
    target: Unit,
    values: HashMap<&'static str, Quantity>,
}

impl Bindings {
    /// Check every declared variable of `meta` against `inputs`.
    ///
    /// Keys the formula does not declare are ignored.
    pub fn bind(meta: &FormulaMeta, inputs: &Inputs) -> Result<Self, CalcError> {
        Self::bind_resolved(meta, &ResolvedUnits::resolve(meta)?, inputs)
    }

    /// Like `bind`, with default units already parsed by the registry
    pub fn bind_resolved(
        meta: &FormulaMeta,
        units: &ResolvedUnits,
        inputs: &Inputs,
    ) -> Result<Self, CalcError> {
        let mut values = HashMap::with_capacity(meta.variables.len());
        for (spec, default) in meta.variables.iter().zip(&units.variables) {
            values.insert(spec.key, bind_one(meta.name, spec, default, inputs)?);
        }

        for key in inputs.keys() {
            if !values.contains_key(key.as_str()) {
                debug!(formula = meta.name, key = %key, "ignoring undeclared input");
            }
        }

        Ok(Bindings {
            formula: meta.name,
            target_key: meta.target.key,
            target: units.target.clone(),
            values,
        })
    }

    pub fn get(&self, key: &str) -> Result<&Quantity, CalcError> {
        self.values
            .get(key)
            .ok_or_else(|| CalcError::missing_input(self.formula, key))
    }

    /// Like `get`, but the magnitude must be strictly positive
    pub fn positive(&self, key: &str) -> Result<&Quantity, CalcError> {
        let q = self.get(key)?;
        if q.magnitude() <= 0.0 {
            return Err(CalcError::domain(format!(
                "{} requires a positive {}, got {}",
                self.formula, key, q
            )));
        }
        Ok(q)
    }

    /// Express a raw result in the target's default unit
    pub fn finish(&self, result: Quantity) -> Result<Quantity, CalcError> {
        let result = result.convert_to_unit(&self.target)?;
        debug!(formula = self.formula, target = self.target_key, result = %result, "solved");
        Ok(result)
    }
}

fn bind_one(
    formula: &str,
    spec: &VariableSpec,
    default: &Unit,
    inputs: &Inputs,
) -> Result<Quantity, CalcError> {
    let given = inputs
        .get(spec.key)
        .ok_or_else(|| CalcError::missing_input(formula, spec.key))?;

    if !given.magnitude().is_finite() {
        return Err(CalcError::domain(format!(
            "{}: input '{}' is not a finite number",
            formula, spec.key
        )));
    }

    if given.dimension() != default.dimension {
        return Err(CalcError::dimension_mismatch(
            format!("{} input '{}'", formula, spec.key),
            default.dimension,
            given.dimension(),
        ));
    }

    // A temperature variable takes only its own kind; a compound such as
    // `kelvin * 1` is neither a point nor a difference
    let expected = match default.kind {
        UnitKind::Absolute => Some("an absolute temperature"),
        UnitKind::Interval => Some("a temperature difference"),
        UnitKind::Plain => None,
    };
    match expected {
        Some(expected) if given.kind() != default.kind => Err(CalcError::unit_conversion(
            given.unit().display_symbol(),
            default.display_symbol(),
            format!("input '{}' expects {}", spec.key, expected),
        )),
        _ => given.convert_to_unit(default),
    }
}
