//! Formula Registry

use crate::{Bindings, Formula, Inputs, ResolvedUnits};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thermo_core::CalcError;
use thermo_units::{parse_unit, Quantity};
use tracing::{debug, error};

/// Collects formulas and validates them into a [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    formulas: Vec<Arc<dyn Formula>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formula<F: Formula + 'static>(mut self, f: F) -> Self {
        debug!(formula = f.name(), "registering formula");
        self.formulas.push(Arc::new(f));
        self
    }

    /// Validate every formula and freeze the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::Configuration`] listing every problem found if
    /// any formula has an unparseable default unit, a repeated variable key,
    /// or a name already taken.
    pub fn build(self) -> Result<Registry, CalcError> {
        let mut problems = Vec::new();
        let mut entries = Vec::with_capacity(self.formulas.len());
        let mut index = HashMap::with_capacity(self.formulas.len());

        for formula in self.formulas {
            let name = formula.name();
            let mut rejected = check_formula(formula.as_ref());
            if index.contains_key(name) {
                rejected.push(format!("duplicate formula name '{}'", name));
            }

            if rejected.is_empty() {
                match ResolvedUnits::resolve(&formula.meta()) {
                    Ok(units) => {
                        index.insert(name, entries.len());
                        entries.push(Entry { formula, units });
                        continue;
                    }
                    Err(e) => rejected.push(format!("'{}': {}", name, e)),
                }
            }

            for problem in &rejected {
                error!(formula = name, problem = %problem, "rejected formula");
            }
            problems.extend(rejected);
        }

        if !problems.is_empty() {
            return Err(CalcError::Configuration(problems));
        }
        debug!(count = entries.len(), "formula catalog ready");
        Ok(Registry { entries, index })
    }
}

fn check_formula(formula: &dyn Formula) -> Vec<String> {
    let meta = formula.meta();
    let mut problems = Vec::new();
    let mut keys = HashSet::new();

    for spec in meta.variables {
        if !keys.insert(spec.key) {
            problems.push(format!("'{}' declares variable '{}' twice", meta.name, spec.key));
        }
    }

    for spec in meta.variables.iter().copied().chain(std::iter::once(meta.target)) {
        if let Err(e) = parse_unit(spec.default_unit) {
            problems.push(format!("'{}' variable '{}': {}", meta.name, spec.key, e));
        }
    }
    problems
}

/// A registered formula with its default units parsed at build time
struct Entry {
    formula: Arc<dyn Formula>,
    units: ResolvedUnits,
}

/// Read-only catalog of formulas keyed by name
pub struct Registry {
    entries: Vec<Entry>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// All formulas in registration order
    pub fn list(&self) -> Vec<&dyn Formula> {
        self.formulas().collect()
    }

    /// All formulas sorted by name
    pub fn list_sorted(&self) -> Vec<&dyn Formula> {
        let mut list = self.list();
        list.sort_by_key(|f| f.name());
        list
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.formulas().map(|f| f.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn Formula> {
        self.formulas().filter(|f| f.category() == category).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a formula by its exact name
    pub fn get(&self, name: &str) -> Result<&dyn Formula, CalcError> {
        Ok(self.entry(name)?.formula.as_ref())
    }

    /// Solve a formula by name, reusing the default units parsed at build time
    pub fn solve(&self, name: &str, inputs: &Inputs) -> Result<Quantity, CalcError> {
        let entry = self.entry(name)?;
        let args = Bindings::bind_resolved(&entry.formula.meta(), &entry.units, inputs)?;
        args.finish(entry.formula.evaluate(&args)?)
    }

    fn entry(&self, name: &str) -> Result<&Entry, CalcError> {
        match self.index.get(name) {
            Some(&i) => Ok(&self.entries[i]),
            None => Err(CalcError::not_found(name, self.find_similar(name))),
        }
    }

    fn formulas(&self) -> impl Iterator<Item = &dyn Formula> + '_ {
        self.entries.iter().map(|e| e.formula.as_ref())
    }

    /// JSON description of every formula, in registration order
    pub fn catalog(&self) -> Value {
        let formulas: Vec<Value> = self
            .formulas()
            .map(|f| {
                let meta = f.meta();
                let variables: Vec<Value> = meta
                    .variables
                    .iter()
                    .map(|v| {
                        json!({
                            "key": v.key,
                            "label": v.label(),
                            "symbol": v.symbol,
                            "default_unit": v.default_unit,
                            "suggested_units": v.suggested_units(),
                        })
                    })
                    .collect();
                json!({
                    "name": meta.name,
                    "description": meta.description,
                    "formula_latex": meta.formula_latex,
                    "category": meta.category,
                    "variables": variables,
                    "target": meta.target,
                })
            })
            .collect();
        json!({ "formulas": formulas })
    }

    /// Up to five formula names resembling `name`, best first
    fn find_similar(&self, name: &str) -> Vec<String> {
        let query = name.to_lowercase();
        let mut matches: Vec<(&str, usize)> = self
            .formulas()
            .map(|f| f.name())
            .filter_map(|candidate| {
                let score = similarity_score(&query, &candidate.to_lowercase());
                (score > 0).then_some((candidate, score))
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        matches.into_iter().take(5).map(|(n, _)| n.to_string()).collect()
    }
}

/// Similarity between a query and a candidate name (higher is closer)
fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    if candidate.starts_with(query) {
        score += 100;
    } else if candidate.contains(query) {
        score += 50;
    } else if query.contains(candidate) {
        score += 30;
    }

    // Shared letters count for a little; spaces and punctuation do not
    let query_chars: HashSet<char> = query.chars().filter(|c| c.is_alphanumeric()).collect();
    let candidate_chars: HashSet<char> = candidate.chars().filter(|c| c.is_alphanumeric()).collect();
    let common = query_chars.intersection(&candidate_chars).count();
    if score > 0 || common * 2 >= query_chars.len().max(1) {
        score += common * 2;
    }

    let len_diff = query.len().abs_diff(candidate.len());
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}
