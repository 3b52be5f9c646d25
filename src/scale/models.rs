use serde::{Deserialize, Serialize};

/// Places used when a unit does not say how precisely it should be shown
pub const DEFAULT_DECIMAL_PLACES: u32 = 1;

/// Most places a unit may ask for, the same ceiling as JavaScript's `toFixed`
pub const MAX_DECIMAL_PLACES: u32 = 100;

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

/// One unit of a scale, e.g. "minute" = 60 base seconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub name: String,
    pub plural: String,

    /// How many base units one of this unit is worth
    pub conversion_factor: f64,

    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Unit {
    pub fn new(name: &str, plural: &str, conversion_factor: f64, decimal_places: u32) -> Self {
        Self {
            name: name.to_string(),
            plural: plural.to_string(),
            conversion_factor,
            decimal_places,
        }
    }

    /// Singular for exactly one (either sign), plural for everything else
    pub fn word_for(&self, value: f64) -> &str {
        if value.abs() == 1.0 {
            &self.name
        } else {
            &self.plural
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.plural == name
    }

    fn is_well_formed(&self) -> bool {
        !self.name.is_empty()
            && !self.plural.is_empty()
            && self.conversion_factor.is_finite()
            && self.conversion_factor > 0.0
            && self.decimal_places <= MAX_DECIMAL_PLACES
    }
}

/// A family of commensurable units sharing one base unit
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    #[serde(default)]
    pub name: String,

    pub default_unit: String,

    pub units: Vec<Unit>,
}

impl Scale {
    pub fn new(name: &str, default_unit: &str, units: Vec<Unit>) -> Self {
        Self {
            name: name.to_string(),
            default_unit: default_unit.to_string(),
            units,
        }
    }

    /// Look a unit up by its singular name, falling back to its plural
    pub fn find_unit(&self, name: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.name == name)
            .or_else(|| self.units.iter().find(|u| u.plural == name))
    }

    /// The unit `default_unit` refers to, if it refers to any
    pub fn resolve_default_unit(&self) -> Option<&Unit> {
        self.find_unit(&self.default_unit)
    }

    /// Units ordered from largest to smallest factor.
    /// Equal factors keep their configured order.
    pub fn units_by_factor(&self) -> Vec<&Unit> {
        let mut sorted: Vec<&Unit> = self.units.iter().collect();
        sorted.sort_by(|a, b| b.conversion_factor.total_cmp(&a.conversion_factor));
        sorted
    }

    pub fn smallest_unit(&self) -> Option<&Unit> {
        self.units.iter().reduce(|smallest, u| {
            if u.conversion_factor < smallest.conversion_factor {
                u
            } else {
                smallest
            }
        })
    }

    /// Structural check a scale must pass before anything is converted with it
    pub fn is_well_formed(&self) -> bool {
        !self.units.is_empty()
            && !self.default_unit.is_empty()
            && self.units.iter().all(Unit::is_well_formed)
    }
}

/// Every scale the application knows about
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScaleConfig {
    #[serde(default)]
    pub scales: Vec<Scale>,
}

impl ScaleConfig {
    pub fn new(scales: Vec<Scale>) -> Self {
        Self { scales }
    }

    pub fn scale(&self, name: &str) -> Option<&Scale> {
        self.scales.iter().find(|s| s.name == name)
    }

    pub fn scale_names(&self) -> Vec<&str> {
        self.scales.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight() -> Scale {
        Scale::new(
            "weight",
            "grams",
            vec![
                Unit::new("gram", "grams", 1.0, 1),
                Unit::new("kilogram", "kilograms", 1000.0, 1),
                Unit::new("ounce", "ounces", 28.3495, 1),
                Unit::new("milligram", "milligrams", 0.001, 1),
            ],
        )
    }

    #[test]
    fn test_find_unit_by_name_or_plural() {
        let scale = weight();
        assert_eq!(scale.find_unit("gram").unwrap().name, "gram");
        assert_eq!(scale.find_unit("grams").unwrap().name, "gram");
        assert!(scale.find_unit("Gram").is_none());
        assert!(scale.find_unit("").is_none());
    }

    #[test]
    fn test_singular_name_wins_over_plural() {
        // "sheep" is both one unit's plural and another unit's name
        let scale = Scale::new(
            "flock",
            "sheep",
            vec![
                Unit::new("lamb", "sheep", 1.0, 0),
                Unit::new("sheep", "sheeps", 2.0, 0),
            ],
        );
        assert_eq!(scale.find_unit("sheep").unwrap().conversion_factor, 2.0);
    }

    #[test]
    fn test_units_by_factor_descending() {
        let scale = weight();
        let names: Vec<&str> = scale
            .units_by_factor()
            .iter()
            .map(|u| u.name.as_str())
            .collect();
        assert_eq!(names, vec!["kilogram", "ounce", "gram", "milligram"]);
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(weight().smallest_unit().unwrap().name, "milligram");
        assert!(Scale::new("empty", "x", vec![]).smallest_unit().is_none());
    }

    #[test]
    fn test_word_for() {
        let unit = Unit::new("minute", "minutes", 60.0, 1);
        assert_eq!(unit.word_for(1.0), "minute");
        assert_eq!(unit.word_for(-1.0), "minute");
        assert_eq!(unit.word_for(0.0), "minutes");
        assert_eq!(unit.word_for(1.5), "minutes");
        assert_eq!(unit.word_for(0.99996), "minutes");
    }

    #[test]
    fn test_well_formed() {
        assert!(weight().is_well_formed());

        let mut scale = weight();
        scale.default_unit.clear();
        assert!(!scale.is_well_formed());

        let mut scale = weight();
        scale.units[1].conversion_factor = 0.0;
        assert!(!scale.is_well_formed());

        let mut scale = weight();
        scale.units[2].conversion_factor = f64::NAN;
        assert!(!scale.is_well_formed());

        let mut scale = weight();
        scale.units[0].plural.clear();
        assert!(!scale.is_well_formed());

        assert!(!Scale::new("empty", "x", vec![]).is_well_formed());
    }

    #[test]
    fn test_decimal_places_ceiling() {
        let mut scale = weight();
        scale.units[0].decimal_places = MAX_DECIMAL_PLACES;
        assert!(scale.is_well_formed());

        scale.units[0].decimal_places = MAX_DECIMAL_PLACES + 1;
        assert!(!scale.is_well_formed());

        scale.units[0].decimal_places = u32::MAX;
        assert!(!scale.is_well_formed());
    }

    #[test]
    fn test_decimal_places_default_from_json() {
        let unit: Unit =
            serde_json::from_str(r#"{"name":"meter","plural":"meters","conversionFactor":1}"#)
                .unwrap();
        assert_eq!(unit.decimal_places, DEFAULT_DECIMAL_PLACES);
    }
}
