//! Alternative units a form offers next to a variable's default unit

/// Units offered for each default unit, the default first
const SUGGESTIONS: &[(&str, &[&str])] = &[
    ("gram", &["gram", "kilogram", "milligram"]),
    ("meter", &["meter", "kilometer", "centimeter", "millimeter"]),
    ("millimeter", &["millimeter", "micrometer", "centimeter", "meter"]),
    ("kelvin", &["kelvin", "degree_Celsius", "degree_Fahrenheit"]),
    ("degree_Celsius", &["degree_Celsius", "kelvin", "degree_Fahrenheit"]),
    (
        "delta_degree_Celsius",
        &["delta_degree_Celsius", "delta_kelvin", "delta_degree_Fahrenheit"],
    ),
    ("pascal", &["pascal", "kilopascal", "megapascal", "bar", "atmosphere", "psi"]),
    ("liter", &["liter", "milliliter", "meter ** 3", "centimeter ** 3"]),
    ("mol", &["mol"]),
    (
        "joule / (gram * kelvin)",
        &["joule / (gram * kelvin)", "joule / (kilogram * kelvin)"],
    ),
    ("1 / kelvin", &["1 / kelvin"]),
    ("joule", &["joule", "kilojoule", "calorie"]),
    (
        "joule / delta_degree_Celsius",
        &["joule / delta_degree_Celsius", "kilojoule / delta_degree_Celsius", "joule / delta_kelvin"],
    ),
];

/// Units to offer for a variable whose default unit is `default_unit`.
///
/// An unlisted default yields just itself.
pub fn suggested_units(default_unit: &str) -> Vec<&str> {
    SUGGESTIONS
        .iter()
        .find(|(default, _)| *default == default_unit)
        .map(|(_, units)| units.to_vec())
        .unwrap_or_else(|| vec![default_unit])
}
