use crate::scale::models::*;
use std::collections::HashSet;
use std::fmt;

/// Everything `validate_config` found, in the order it was found
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    /// Path into the configuration, e.g. `time/units[2]/conversionFactor`
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Conversions with this scale would fail or be wrong
    Error,
    /// Conversions work but something is ambiguous
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Error => write!(f, "error"),
            IssueSeverity::Warning => write!(f, "warning"),
        }
    }
}

impl ValidationResult {
    fn push(&mut self, severity: IssueSeverity, message: String, location: Option<String>) {
        self.issues.push(ValidationIssue {
            severity,
            message,
            location,
        });
    }

    fn error(&mut self, message: String, location: Option<String>) {
        self.push(IssueSeverity::Error, message, location);
    }

    fn warning(&mut self, message: String, location: Option<String>) {
        self.push(IssueSeverity::Warning, message, location);
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// One line per issue, errors first: `error [time/defaultUnit] ...`
impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in self.errors().chain(self.warnings()) {
            match &issue.location {
                Some(loc) => writeln!(f, "{} [{}] {}", issue.severity, loc, issue.message)?,
                None => writeln!(f, "{} {}", issue.severity, issue.message)?,
            }
        }
        Ok(())
    }
}

/// Check a loaded configuration against the scale and unit invariants.
/// Nothing here stops a conversion from running; it reports what would
/// make one misbehave or be ambiguous.
pub fn validate_config(config: &ScaleConfig) -> ValidationResult {
    let mut validation = ValidationResult::default();

    if config.is_empty() {
        validation.error("Configuration defines no scales".to_string(), None);
        return validation;
    }

    let mut seen_scales = HashSet::new();
    for (idx, scale) in config.scales.iter().enumerate() {
        let location = if scale.name.is_empty() {
            validation.warning(
                "Scale has no name".to_string(),
                Some(format!("scales[{}]", idx)),
            );
            format!("scales[{}]", idx)
        } else {
            scale.name.clone()
        };

        if !scale.name.is_empty() && !seen_scales.insert(scale.name.as_str()) {
            validation.error(
                format!("Duplicate scale name '{}'", scale.name),
                Some(location.clone()),
            );
        }

        validate_scale(scale, &location, &mut validation);
    }

    validation
}

fn validate_scale(scale: &Scale, location: &str, validation: &mut ValidationResult) {
    if scale.units.is_empty() {
        validation.error(
            "Scale defines no units".to_string(),
            Some(format!("{}/units", location)),
        );
        return;
    }

    let mut seen_units = HashSet::new();
    for (idx, unit) in scale.units.iter().enumerate() {
        let unit_location = format!("{}/units[{}]", location, idx);

        if unit.name.is_empty() {
            validation.error(
                "Unit has an empty name".to_string(),
                Some(format!("{}/name", unit_location)),
            );
        } else if !seen_units.insert(unit.name.as_str()) {
            validation.error(
                format!("Duplicate unit name '{}'", unit.name),
                Some(format!("{}/name", unit_location)),
            );
        }

        if unit.plural.is_empty() {
            validation.error(
                "Unit has an empty plural".to_string(),
                Some(format!("{}/plural", unit_location)),
            );
        }

        if !unit.conversion_factor.is_finite() || unit.conversion_factor <= 0.0 {
            validation.error(
                format!(
                    "Conversion factor must be a positive number, got {}",
                    unit.conversion_factor
                ),
                Some(format!("{}/conversionFactor", unit_location)),
            );
        }

        if unit.decimal_places > MAX_DECIMAL_PLACES {
            validation.error(
                format!(
                    "Decimal places must be at most {}, got {}",
                    MAX_DECIMAL_PLACES, unit.decimal_places
                ),
                Some(format!("{}/decimalPlaces", unit_location)),
            );
        }

        // A plural that shadows another unit's name can never be looked up by plural
        if let Some(other) = scale
            .units
            .iter()
            .find(|u| !std::ptr::eq(*u, unit) && u.name == unit.plural)
        {
            validation.warning(
                format!(
                    "Plural '{}' is also the name of unit '{}'; lookups resolve to '{}'",
                    unit.plural, other.name, other.name
                ),
                Some(format!("{}/plural", unit_location)),
            );
        }
    }

    if scale.default_unit.is_empty() {
        validation.error(
            "Scale has no default unit".to_string(),
            Some(format!("{}/defaultUnit", location)),
        );
    } else if !scale.units.iter().any(|u| u.matches(&scale.default_unit)) {
        validation.error(
            format!("Default unit '{}' is not a unit of this scale", scale.default_unit),
            Some(format!("{}/defaultUnit", location)),
        );
    }
}
