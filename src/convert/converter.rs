use crate::convert::error::ConvertError;
use crate::convert::input::InputValue;
use crate::convert::number::{echo, round_half_away};
use crate::scale::models::{Scale, Unit};
use serde_json::Value as JsonValue;
use std::fmt;

/// The smallest converted magnitude a unit may show before a smaller unit is preferred
pub const PROMOTION_THRESHOLD: f64 = 0.95;

/// A successful conversion, ready to be shown as a sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub input_value: f64,
    pub input_unit: Unit,
    /// Output value after rounding to the output unit's places
    pub output_value: f64,
    /// Output value rendered with exactly the output unit's places
    pub output_text: String,
    pub output_unit: Unit,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Singular or plural follows the number as shown, on both sides
        let input_text = echo(self.input_value);
        let shown_input = input_text.parse().unwrap_or(self.input_value);
        write!(
            f,
            "{} {} is {} {}",
            input_text,
            self.input_unit.word_for(shown_input),
            self.output_text,
            self.output_unit.word_for(self.output_value)
        )
    }
}

/// Convert a value into the most readable unit of `scale` and describe it.
/// Validation failures come back as their message, so the result can always
/// be displayed as-is.
pub fn convert<V: Into<InputValue>>(value: V, unit: &str, scale: &Scale) -> String {
    render(try_convert(&value.into(), Some(unit), Some(scale)))
}

/// Same as [`convert`] for callers holding untyped JSON (browser state, request bodies).
/// Any shape is accepted; shapes that do not describe a scale are reported as such.
pub fn convert_json(value: &JsonValue, unit: &JsonValue, scale: &JsonValue) -> String {
    let value = InputValue::from(value);
    let unit = unit.as_str();
    // A scale whose units lack a required field does not deserialize
    let scale: Option<Scale> = serde_json::from_value(scale.clone()).ok();
    render(try_convert(&value, unit, scale.as_ref()))
}

fn render(result: Result<Conversion, ConvertError>) -> String {
    match result {
        Ok(conversion) => conversion.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Checks run in order: value, unit, scale, then unit membership
pub fn try_convert(
    value: &InputValue,
    unit: Option<&str>,
    scale: Option<&Scale>,
) -> Result<Conversion, ConvertError> {
    let input_value = value.parse().ok_or(ConvertError::InvalidNumber)?;

    // Whitespace-only names count as missing rather than unknown (DESIGN.md, decision 8)
    let unit = unit
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConvertError::InvalidUnit)?;

    let scale = scale
        .filter(|s| s.is_well_formed())
        .ok_or(ConvertError::InvalidScale)?;

    let input_unit = scale
        .find_unit(unit)
        .ok_or_else(|| ConvertError::UnknownUnit(unit.to_string()))?;

    let base_value = input_value * input_unit.conversion_factor;
    if !base_value.is_finite() {
        return Err(ConvertError::InvalidNumber);
    }
    let output_unit = select_output_unit(base_value, scale).ok_or(ConvertError::InvalidScale)?;

    let output_value = base_value / output_unit.conversion_factor;
    if !output_value.is_finite() {
        return Err(ConvertError::InvalidNumber);
    }
    let rounded = round_half_away(output_value, output_unit.decimal_places);

    Ok(Conversion {
        input_value,
        input_unit: input_unit.clone(),
        output_value: rounded.value,
        output_text: rounded.text,
        output_unit: output_unit.clone(),
    })
}

/// The largest unit that shows `base_value` as at least 0.95 of itself,
/// or the smallest unit when none does
pub fn select_output_unit(base_value: f64, scale: &Scale) -> Option<&Unit> {
    let magnitude = base_value.abs();
    scale
        .units_by_factor()
        .into_iter()
        .find(|u| magnitude / u.conversion_factor >= PROMOTION_THRESHOLD)
        .or_else(|| scale.smallest_unit())
}
