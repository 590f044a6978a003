//! Validation rules and configuration loading from errlint.toml.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{ErrlintError, ErrlintResult, IoResultExt};

/// Validation rules for one annotated composite type.
///
/// Built from the `#[error_code(...)]` marker attribute, with any keys the
/// marker omits filled from the defaults (built-in or errlint.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Required decimal prefix of every code
    pub prefix: String,
    /// Required total digit length of every code
    pub length: usize,
    /// Name of the field holding the code
    pub code_field: String,
    /// Values that skip validation and registration entirely
    pub exclude_values: Vec<i32>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            prefix: "1122".to_string(),
            length: 8,
            code_field: "code".to_string(),
            exclude_values: vec![0],
        }
    }
}

/// Main configuration structure for errlint.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ErrlintConfig {
    /// Project-wide defaults for marker attributes that omit keys.
    pub defaults: Option<DefaultsConfig>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Default rule values applied to markers that omit them.
#[derive(Debug, Deserialize, Default)]
pub struct DefaultsConfig {
    pub prefix: Option<String>,
    pub length: Option<usize>,
    pub code_field: Option<String>,
    pub exclude: Option<Vec<i32>>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl ErrlintConfig {
    /// Marker defaults with any errlint.toml overrides applied on top of
    /// the built-in ones.
    pub fn marker_defaults(&self) -> ValidationConfig {
        let mut cfg = ValidationConfig::default();
        if let Some(d) = &self.defaults {
            if let Some(prefix) = &d.prefix {
                cfg.prefix = prefix.clone();
            }
            if let Some(length) = d.length {
                cfg.length = length;
            }
            if let Some(field) = &d.code_field {
                cfg.code_field = field.clone();
            }
            if let Some(exclude) = &d.exclude {
                cfg.exclude_values = exclude.clone();
            }
        }
        cfg
    }
}

/// Loads configuration from errlint.toml if it exists.
pub fn load_config(root: &Path) -> ErrlintResult<Option<ErrlintConfig>> {
    let path = root.join("errlint.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg = toml::from_str(&content).map_err(|e| ErrlintError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let cfg = ValidationConfig::default();
        assert_eq!(cfg.prefix, "1122");
        assert_eq!(cfg.length, 8);
        assert_eq!(cfg.code_field, "code");
        assert_eq!(cfg.exclude_values, vec![0]);
    }

    #[test]
    fn test_marker_defaults_override() {
        let toml_cfg: ErrlintConfig = toml::from_str(
            r#"
[defaults]
prefix = "99"
length = 6

[output]
format = "json"
"#,
        )
        .unwrap();
        let cfg = toml_cfg.marker_defaults();
        assert_eq!(cfg.prefix, "99");
        assert_eq!(cfg.length, 6);
        assert_eq!(cfg.code_field, "code", "unset keys keep built-in values");
        assert_eq!(cfg.exclude_values, vec![0]);
    }

    #[test]
    fn test_load_config_missing_is_none() {
        let dir = std::env::temp_dir().join("errlint_no_config_here");
        std::fs::create_dir_all(&dir).unwrap();
        assert!(load_config(&dir).unwrap().is_none());
    }
}
