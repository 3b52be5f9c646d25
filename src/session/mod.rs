// State behind the conversion form: the typed value and the two dropdowns.
// Every setter re-runs the conversion and hands back the sentence to show.

use crate::convert::{try_convert, InputValue};
use crate::scale::models::{Scale, ScaleConfig};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Configuration defines no scales")]
    NoScales,

    #[error("Unknown scale: {0}")]
    UnknownScale(String),
}

#[derive(Debug, Clone)]
pub struct ConversionSession {
    config: ScaleConfig,
    input_value: InputValue,
    current_scale: String,
    current_unit: String,
}

impl ConversionSession {
    /// Start on the first scale and its default unit, converting one of it
    pub fn new(config: ScaleConfig) -> Result<Self, SessionError> {
        let first = config.scales.first().ok_or(SessionError::NoScales)?;
        let current_scale = first.name.clone();
        let current_unit = first.default_unit.clone();

        Ok(Self {
            config,
            input_value: InputValue::Number(1.0),
            current_scale,
            current_unit,
        })
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    pub fn input_value(&self) -> &InputValue {
        &self.input_value
    }

    pub fn current_unit(&self) -> &str {
        &self.current_unit
    }

    pub fn current_scale(&self) -> &str {
        &self.current_scale
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.config.scale(&self.current_scale)
    }

    pub fn set_input_value<V: Into<InputValue>>(&mut self, value: V) -> String {
        self.input_value = value.into();
        debug!(value = ?self.input_value, "input value changed");
        self.update()
    }

    pub fn set_unit(&mut self, unit: &str) -> String {
        self.current_unit = unit.to_string();
        debug!(unit, "unit changed");
        self.update()
    }

    /// Switch scale; the unit resets to the new scale's default
    pub fn set_scale(&mut self, name: &str) -> Result<String, SessionError> {
        let scale = self
            .config
            .scale(name)
            .ok_or_else(|| SessionError::UnknownScale(name.to_string()))?;

        self.current_unit = scale.default_unit.clone();
        self.current_scale = name.to_string();
        debug!(scale = name, unit = %self.current_unit, "scale changed");
        Ok(self.update())
    }

    /// The sentence (or validation message) for the current state
    pub fn update(&self) -> String {
        match try_convert(
            &self.input_value,
            Some(&self.current_unit),
            self.scale(),
        ) {
            Ok(conversion) => conversion.to_string(),
            Err(e) => e.to_string(),
        }
    }
}
