//! Unit definitions - common SI and customary units for heat and gas problems

use crate::{Dimension, Unit};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        self.aliases
            .get(symbol)
            .and_then(|canonical| self.units.get(canonical))
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values().filter(|u| u.category == category).collect()
    }

    /// The interval unit measuring differences on the scale of `absolute`
    pub fn interval_for(&self, absolute: &Unit) -> Option<&Unit> {
        self.units.get(&format!("delta_{}", absolute.symbol))
    }

    fn register(&mut self, unit: Unit) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn alias(&mut self, symbol: &str, aliases: &[&str]) {
        for alias in aliases {
            self.aliases.insert(alias.to_string(), symbol.to_string());
        }
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_temperature_interval_units();
        self.register_amount_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_frequency_units();
    }

    fn register_length_units(&mut self) {
        let length = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::LENGTH, factor, "length")
        };
        self.register(length("m", "meter", 1.0));
        self.register(length("km", "kilometer", 1e3));
        self.register(length("cm", "centimeter", 1e-2));
        self.register(length("mm", "millimeter", 1e-3));
        self.register(length("um", "micrometer", 1e-6));
        self.register(length("nm", "nanometer", 1e-9));
        self.register(length("in", "inch", 0.0254));
        self.register(length("ft", "foot", 0.3048));
        self.register(length("yd", "yard", 0.9144));
        self.register(length("mi", "mile", 1609.344));

        self.alias("m", &["meter", "meters", "metre", "metres"]);
        self.alias("km", &["kilometer", "kilometers", "kilometre", "kilometres"]);
        self.alias("cm", &["centimeter", "centimeters", "centimetre"]);
        self.alias("mm", &["millimeter", "millimeters", "millimetre"]);
        self.alias("um", &["micrometer", "micrometers", "micron", "μm"]);
        self.alias("nm", &["nanometer", "nanometers"]);
        self.alias("in", &["inch", "inches"]);
        self.alias("ft", &["foot", "feet"]);
        self.alias("yd", &["yard", "yards"]);
        self.alias("mi", &["mile", "miles"]);
    }

    fn register_mass_units(&mut self) {
        let mass = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::MASS, factor, "mass")
        };
        self.register(mass("kg", "kilogram", 1.0));
        self.register(mass("g", "gram", 1e-3));
        self.register(mass("mg", "milligram", 1e-6));
        self.register(mass("ug", "microgram", 1e-9));
        self.register(mass("t", "tonne", 1e3));
        self.register(mass("lb", "pound", 0.45359237));
        self.register(mass("oz", "ounce", 0.028349523125));

        self.alias("kg", &["kilogram", "kilograms"]);
        self.alias("g", &["gram", "grams"]);
        self.alias("mg", &["milligram", "milligrams"]);
        self.alias("ug", &["microgram", "micrograms", "μg"]);
        self.alias("t", &["tonne", "tonnes", "metric_ton"]);
        self.alias("lb", &["pound", "pounds", "lbs"]);
        self.alias("oz", &["ounce", "ounces"]);
    }

    fn register_time_units(&mut self) {
        let time = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::TIME, factor, "time")
        };
        self.register(time("s", "second", 1.0));
        self.register(time("ms", "millisecond", 1e-3));
        self.register(time("min", "minute", 60.0));
        self.register(time("h", "hour", 3600.0));
        self.register(time("d", "day", 86400.0));

        self.alias("s", &["second", "seconds", "sec"]);
        self.alias("ms", &["millisecond", "milliseconds"]);
        self.alias("min", &["minute", "minutes"]);
        self.alias("h", &["hour", "hours", "hr"]);
        self.alias("d", &["day", "days"]);
    }

    fn register_temperature_units(&mut self) {
        // Kelvin is the SI base unit, the other scales are points measured on it
        self.register(Unit::absolute_temperature("K", "kelvin", 1.0, 0.0));
        self.register(Unit::absolute_temperature("degC", "degree Celsius", 1.0, 273.15));
        // K = (F + 459.67) * 5/9
        self.register(Unit::absolute_temperature(
            "degF",
            "degree Fahrenheit",
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
        ));
        self.register(Unit::absolute_temperature("degR", "degree Rankine", 5.0 / 9.0, 0.0));

        self.alias("K", &["kelvin", "kelvins"]);
        self.alias("degC", &["degree_Celsius", "degrees_Celsius", "celsius", "°C"]);
        self.alias("degF", &["degree_Fahrenheit", "degrees_Fahrenheit", "fahrenheit", "°F"]);
        self.alias("degR", &["degree_Rankine", "degrees_Rankine", "rankine", "°R"]);
    }

    fn register_temperature_interval_units(&mut self) {
        self.register(Unit::temperature_interval("delta_K", "delta kelvin", 1.0));
        self.register(Unit::temperature_interval("delta_degC", "delta degree Celsius", 1.0));
        self.register(Unit::temperature_interval("delta_degF", "delta degree Fahrenheit", 5.0 / 9.0));
        self.register(Unit::temperature_interval("delta_degR", "delta degree Rankine", 5.0 / 9.0));

        self.alias("delta_K", &["delta_kelvin", "ΔK"]);
        self.alias("delta_degC", &["delta_degree_Celsius", "delta_celsius", "Δ°C"]);
        self.alias("delta_degF", &["delta_degree_Fahrenheit", "delta_fahrenheit", "Δ°F"]);
        self.alias("delta_degR", &["delta_degree_Rankine", "delta_rankine", "Δ°R"]);
    }

    fn register_amount_units(&mut self) {
        let amount = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::AMOUNT, factor, "amount")
        };
        self.register(amount("mol", "mole", 1.0));
        self.register(amount("mmol", "millimole", 1e-3));
        self.register(amount("kmol", "kilomole", 1e3));

        self.alias("mol", &["mole", "moles"]);
        self.alias("mmol", &["millimole", "millimoles"]);
        self.alias("kmol", &["kilomole", "kilomoles"]);
    }

    fn register_area_units(&mut self) {
        let area = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::AREA, factor, "area")
        };
        self.register(area("m2", "square meter", 1.0));
        self.register(area("cm2", "square centimeter", 1e-4));
        self.register(area("mm2", "square millimeter", 1e-6));
        self.register(area("ha", "hectare", 1e4));

        self.alias("m2", &["m²", "square_meter"]);
        self.alias("cm2", &["cm²", "square_centimeter"]);
        self.alias("mm2", &["mm²", "square_millimeter"]);
        self.alias("ha", &["hectare", "hectares"]);
    }

    fn register_volume_units(&mut self) {
        let volume = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::VOLUME, factor, "volume")
        };
        self.register(volume("m3", "cubic meter", 1.0));
        self.register(volume("L", "liter", 1e-3));
        self.register(volume("dL", "deciliter", 1e-4));
        self.register(volume("mL", "milliliter", 1e-6));
        self.register(volume("cm3", "cubic centimeter", 1e-6));
        self.register(volume("gal", "gallon", 0.003785411784));
        self.register(volume("ft3", "cubic foot", 0.028316846592));

        self.alias("m3", &["m³", "cubic_meter"]);
        self.alias("L", &["liter", "liters", "litre", "litres", "l"]);
        self.alias("dL", &["deciliter", "deciliters", "dl"]);
        self.alias("mL", &["milliliter", "milliliters", "millilitre", "ml"]);
        self.alias("cm3", &["cm³", "cc", "cubic_centimeter"]);
        self.alias("gal", &["gallon", "gallons"]);
        self.alias("ft3", &["ft³", "cubic_foot"]);
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", "newton", Dimension::FORCE, 1.0, "force"));
        self.register(Unit::new("kN", "kilonewton", Dimension::FORCE, 1e3, "force"));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, 4.4482216152605, "force"));

        self.alias("N", &["newton", "newtons"]);
        self.alias("kN", &["kilonewton", "kilonewtons"]);
    }

    fn register_energy_units(&mut self) {
        let energy = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::ENERGY, factor, "energy")
        };
        self.register(energy("J", "joule", 1.0));
        self.register(energy("kJ", "kilojoule", 1e3));
        self.register(energy("MJ", "megajoule", 1e6));
        self.register(energy("mJ", "millijoule", 1e-3));
        // Thermochemical calorie
        self.register(energy("cal", "calorie", 4.184));
        self.register(energy("kcal", "kilocalorie", 4184.0));
        self.register(energy("Wh", "watt-hour", 3600.0));
        self.register(energy("kWh", "kilowatt-hour", 3.6e6));
        self.register(energy("eV", "electronvolt", 1.602176634e-19));
        self.register(energy("BTU", "British thermal unit", 1055.05585262));
        self.register(energy("erg", "erg", 1e-7));

        self.alias("J", &["joule", "joules"]);
        self.alias("kJ", &["kilojoule", "kilojoules"]);
        self.alias("MJ", &["megajoule", "megajoules"]);
        self.alias("mJ", &["millijoule", "millijoules"]);
        self.alias("cal", &["calorie", "calories"]);
        self.alias("kcal", &["kilocalorie", "kilocalories", "Cal"]);
        self.alias("Wh", &["watt_hour"]);
        self.alias("kWh", &["kilowatt_hour"]);
        self.alias("eV", &["electron_volt", "electronvolt"]);
        self.alias("BTU", &["btu", "Btu"]);
    }

    fn register_power_units(&mut self) {
        self.register(Unit::new("W", "watt", Dimension::POWER, 1.0, "power"));
        self.register(Unit::new("kW", "kilowatt", Dimension::POWER, 1e3, "power"));
        self.register(Unit::new("hp", "horsepower", Dimension::POWER, 745.699872, "power"));

        self.alias("W", &["watt", "watts"]);
        self.alias("kW", &["kilowatt", "kilowatts"]);
        self.alias("hp", &["horsepower"]);
    }

    fn register_pressure_units(&mut self) {
        let pressure = |symbol: &str, name: &str, factor: f64| {
            Unit::new(symbol, name, Dimension::PRESSURE, factor, "pressure")
        };
        self.register(pressure("Pa", "pascal", 1.0));
        self.register(pressure("hPa", "hectopascal", 1e2));
        self.register(pressure("kPa", "kilopascal", 1e3));
        self.register(pressure("MPa", "megapascal", 1e6));
        self.register(pressure("bar", "bar", 1e5));
        self.register(pressure("mbar", "millibar", 1e2));
        self.register(pressure("atm", "atmosphere", 101325.0));
        self.register(pressure("psi", "pound per square inch", 6894.757293168));
        self.register(pressure("mmHg", "millimeter of mercury", 133.322387415));
        self.register(pressure("torr", "torr", 101325.0 / 760.0));

        self.alias("Pa", &["pascal", "pascals"]);
        self.alias("hPa", &["hectopascal", "hectopascals"]);
        self.alias("kPa", &["kilopascal", "kilopascals"]);
        self.alias("MPa", &["megapascal", "megapascals"]);
        self.alias("mbar", &["millibar", "millibars"]);
        self.alias("atm", &["atmosphere", "atmospheres"]);
        self.alias("mmHg", &["millimeter_Hg", "millimeter_of_mercury"]);
        self.alias("torr", &["Torr"]);
    }

    fn register_frequency_units(&mut self) {
        self.register(Unit::new("Hz", "hertz", Dimension::FREQUENCY, 1.0, "frequency"));
        self.register(Unit::new("kHz", "kilohertz", Dimension::FREQUENCY, 1e3, "frequency"));

        self.alias("Hz", &["hertz"]);
        self.alias("kHz", &["kilohertz"]);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_registry() {
        let reg = UnitRegistry::new();

        assert!(reg.get("m").is_some());
        assert!(reg.get("kg").is_some());
        assert!(reg.get("J").is_some());

        assert!(reg.get("gram").is_some());
        assert!(reg.get("delta_degree_Celsius").is_some());
        assert!(reg.get("atmosphere").is_some());

        assert!(reg.get("unknown_xyz").is_none());
    }

    #[test]
    fn test_temperature_kinds() {
        let reg = UnitRegistry::new();

        assert!(reg.get("kelvin").unwrap().is_absolute());
        assert!(reg.get("degree_Celsius").unwrap().is_absolute());
        assert!(reg.get("delta_degree_Celsius").unwrap().is_interval());
        assert!(reg.get("delta_kelvin").unwrap().is_interval());
    }

    #[test]
    fn test_temperature_conversions() {
        let reg = UnitRegistry::new();

        let c = reg.get("degC").unwrap();
        let f = reg.get("degF").unwrap();

        // 0 C = 273.15 K
        assert_relative_eq!(c.to_si(0.0), 273.15);
        // 212 F = 373.15 K
        assert_relative_eq!(f.to_si(212.0), 373.15, epsilon = 1e-9);
    }

    #[test]
    fn test_interval_for() {
        let reg = UnitRegistry::new();

        for (absolute, interval) in [("K", "delta_K"), ("degC", "delta_degC"), ("degF", "delta_degF")] {
            let unit = reg.get(absolute).unwrap();
            assert_eq!(reg.interval_for(unit).unwrap().symbol, interval);
        }
        assert!(reg.interval_for(reg.get("m").unwrap()).is_none());
    }

    #[test]
    fn test_by_category() {
        let reg = UnitRegistry::new();

        let pressure_units = reg.by_category("pressure");
        assert!(pressure_units.len() > 5);
        for unit in pressure_units {
            assert_eq!(unit.dimension, Dimension::PRESSURE);
        }
    }

    #[test]
    fn test_aliases_resolve_to_registered_units() {
        let reg = UnitRegistry::new();
        for (alias, symbol) in &reg.aliases {
            assert!(reg.units.contains_key(symbol), "alias {} points at missing {}", alias, symbol);
        }
    }
}
