// WebAssembly bindings for the conversion form
use crate::convert::{convert_json, InputValue};
use crate::scale::{builtin_config, load_config_from_json};
use crate::session::ConversionSession;
use js_sys::{Array, JSON};
use serde_json::Value as JsonValue;
use wasm_bindgen::prelude::*;

fn input_from_js(value: &JsValue) -> InputValue {
    if let Some(n) = value.as_f64() {
        InputValue::Number(n)
    } else if let Some(s) = value.as_string() {
        InputValue::Text(s)
    } else {
        InputValue::Missing
    }
}

/// Round-trip a JS object through JSON text; anything unserializable becomes null
fn js_to_json(value: &JsValue) -> JsonValue {
    JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(JsonValue::Null)
}

/// Convert `value` of `unit` using a scale object, e.g.
/// `convert(60, "seconds", config.scales[0])`
#[wasm_bindgen(js_name = convert)]
pub fn convert_value(value: JsValue, unit: JsValue, scale: JsValue) -> String {
    let value = match input_from_js(&value) {
        InputValue::Number(n) => serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        InputValue::Text(s) => JsonValue::String(s),
        InputValue::Missing => JsonValue::Null,
    };
    let unit = unit.as_string().map_or(JsonValue::Null, JsonValue::String);
    convert_json(&value, &unit, &js_to_json(&scale))
}

/// Form state plus the scales it can choose from
#[wasm_bindgen]
pub struct RelativeSizesWasm {
    session: ConversionSession,
}

#[wasm_bindgen]
impl RelativeSizesWasm {
    /// `config_json` is a `{"scales": [...]}` document; the built-in scales are used without one
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RelativeSizesWasm, JsValue> {
        let config = match config_json {
            Some(json) => {
                let (config, validation) = load_config_from_json(&json)
                    .map_err(|e| JsValue::from_str(&format!("Failed to load config: {}", e)))?;
                if !validation.is_valid() {
                    return Err(JsValue::from_str(&validation.to_string()));
                }
                config
            }
            None => builtin_config(),
        };

        let session = ConversionSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { session })
    }

    /// Scale names in configured order, for the scale dropdown
    #[wasm_bindgen(js_name = scaleNames)]
    pub fn scale_names(&self) -> Array {
        self.session
            .config()
            .scale_names()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// JSON array of the units of `scale`, for the unit dropdown
    #[wasm_bindgen]
    pub fn units(&self, scale: &str) -> Result<String, JsValue> {
        let scale = self
            .session
            .config()
            .scale(scale)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown scale: {}", scale)))?;

        serde_json::to_string(&scale.units)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize units: {}", e)))
    }

    #[wasm_bindgen(js_name = defaultUnit)]
    pub fn default_unit(&self, scale: &str) -> Option<String> {
        self.session
            .config()
            .scale(scale)
            .map(|s| s.default_unit.clone())
    }

    #[wasm_bindgen(js_name = currentScale)]
    pub fn current_scale(&self) -> String {
        self.session.current_scale().to_string()
    }

    #[wasm_bindgen(js_name = currentUnit)]
    pub fn current_unit(&self) -> String {
        self.session.current_unit().to_string()
    }

    /// Text field or slider moved
    #[wasm_bindgen(js_name = setInputValue)]
    pub fn set_input_value(&mut self, value: JsValue) -> String {
        self.session.set_input_value(input_from_js(&value))
    }

    #[wasm_bindgen(js_name = setUnit)]
    pub fn set_unit(&mut self, unit: &str) -> String {
        self.session.set_unit(unit)
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&mut self, scale: &str) -> Result<String, JsValue> {
        self.session
            .set_scale(scale)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Sentence for the output line
    #[wasm_bindgen]
    pub fn result(&self) -> String {
        self.session.update()
    }
}
