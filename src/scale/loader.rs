use crate::scale::error::ConfigError;
use crate::scale::models::ScaleConfig;
use crate::scale::validation::{validate_config, ValidationResult};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN_SCALES: &str = include_str!("../../config/scales.toml");

/// Load a configuration file, choosing the format from its extension
pub fn load_config_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<(ScaleConfig, ValidationResult), ConfigError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading scale configuration");

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => load_config_from_str(&content),
        Some("json") => load_config_from_json(&content),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load a TOML configuration document
pub fn load_config_from_str(content: &str) -> Result<(ScaleConfig, ValidationResult), ConfigError> {
    let config: ScaleConfig = toml::from_str(content)?;
    Ok(checked(config))
}

/// Load a JSON configuration document (the format the browser front end ships)
pub fn load_config_from_json(
    content: &str,
) -> Result<(ScaleConfig, ValidationResult), ConfigError> {
    let config: ScaleConfig = serde_json::from_str(content)?;
    Ok(checked(config))
}

/// The time, distance and weight scales bundled with the crate
pub fn builtin_config() -> ScaleConfig {
    // Covered by test_builtin_config_is_valid; an unparsable bundle is a build defect
    toml::from_str(BUILTIN_SCALES).unwrap_or_default()
}

fn checked(config: ScaleConfig) -> (ScaleConfig, ValidationResult) {
    let validation = validate_config(&config);
    if !validation.is_valid() {
        warn!(
            errors = validation.error_count(),
            "scale configuration has errors"
        );
    }
    debug!(
        scales = config.scales.len(),
        warnings = validation.warnings().count(),
        "scale configuration loaded"
    );
    (config, validation)
}
