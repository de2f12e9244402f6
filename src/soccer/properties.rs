//! Report property definitions with defaults from report.json
//!
//! report.json is embedded at compile time and is the only place defaults are
//! defined. User values come from an optional flat JSON object
//! (`report_config.json` in the working directory) and take precedence.

use super::error::{ReportError, Result};
use std::collections::HashMap;
use std::path::Path;

/// report.json embedded at compile time
const REPORT_JSON: &str = include_str!("../../report.json");

/// Property definition from report.json
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default_value: String,
    pub description: String,
    /// For EnumeratedProperty, the valid values
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Enumerated,
}

/// Registry of all report properties with their defaults
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse report.json and build the registry
    ///
    /// Panics if report.json is malformed; it is embedded at compile time.
    pub fn from_report_json() -> Self {
        Self::from_json(REPORT_JSON).expect("report.json is invalid")
    }

    /// Parse a property document
    pub fn from_json(json: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(json)?;

        let properties_array = json["properties"]
            .as_array()
            .ok_or_else(|| ReportError::Config("missing 'properties' array".to_string()))?;

        let mut properties = HashMap::new();

        for prop in properties_array {
            let name = prop["name"]
                .as_str()
                .ok_or_else(|| ReportError::Config("property missing 'name'".to_string()))?
                .to_string();

            let kind = match prop["kind"].as_str() {
                Some("StringProperty") => PropertyKind::String,
                Some("EnumeratedProperty") => PropertyKind::Enumerated,
                other => {
                    return Err(ReportError::Config(format!(
                        "unknown kind {:?} for property '{}'",
                        other, name
                    )))
                }
            };

            let default_value = prop["defaultValue"].as_str().unwrap_or("").to_string();
            let description = prop["description"].as_str().unwrap_or("").to_string();

            let valid_values = if kind == PropertyKind::Enumerated {
                prop["values"].as_array().map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
            } else {
                None
            };

            properties.insert(
                name.clone(),
                PropertyDef {
                    name,
                    kind,
                    default_value,
                    description,
                    valid_values,
                },
            );
        }

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Whether a property is defined
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true)
    }
}

static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(PropertyRegistry::from_report_json)
}

/// Typed report property reader
///
/// Returns user values when set and valid, otherwise the report.json default.
#[derive(Debug, Clone, Default)]
pub struct ReportPropertyReader {
    user_values: HashMap<String, String>,
}

impl ReportPropertyReader {
    /// Create from user values (empty strings count as unset)
    pub fn new(user_values: HashMap<String, String>) -> Self {
        let user_values: HashMap<String, String> = user_values
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .collect();

        for name in user_values.keys() {
            if !registry().contains(name) {
                tracing::warn!(property = %name, "ignoring unknown property");
            }
        }

        Self { user_values }
    }

    /// Read user values from a flat JSON object file
    ///
    /// A missing file is not an error and yields defaults only.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no override file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;

        let mut user_values = HashMap::new();
        for (key, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(ReportError::Config(format!(
                        "property '{}' in {} must be a string, number or boolean",
                        key,
                        path.display()
                    )))
                }
            };
            user_values.insert(key, value_str);
        }

        println!(
            "  Loaded {} override(s) from {}",
            user_values.len(),
            path.display()
        );
        Ok(Self::new(user_values))
    }

    /// Get string property (user value or default)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }

        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property with validation
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            tracing::warn!(
                property = name,
                value = %value,
                valid = %valid_values,
                default,
                "invalid value, using default"
            );
        }

        default.to_string()
    }

    /// Get i64 property, falling back to the default on parse failure
    pub fn get_i64(&self, name: &str) -> i64 {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0);

        let value = self.get_string(name);
        match value.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(property = name, value = %value, default, "invalid integer, using default");
                default
            }
        }
    }

    /// Get i64 property with range validation
    pub fn get_i64_in_range(&self, name: &str, min: i64, max: i64) -> i64 {
        let value = self.get_i64(name);
        if (min..=max).contains(&value) {
            return value;
        }

        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(min);
        tracing::warn!(property = name, value, min, max, default, "value out of range, using default");
        default
    }
}
