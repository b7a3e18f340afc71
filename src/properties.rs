//! Property definitions with defaults from grid_properties.json
//!
//! grid_properties.json is embedded at compile time and is the single place
//! defaults are defined. User values come from explicit overrides (command
//! line) layered over `PRIME_GRID_*` environment variables.

use crate::primes::{PrimeError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// grid_properties.json embedded at compile time
const PROPERTIES_JSON: &str = include_str!("../grid_properties.json");

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PRIME_GRID_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "IntegerProperty")]
    Integer,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
}

/// Property definition from grid_properties.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PropertiesFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PropertiesFile = serde_json::from_str(json)
            .map_err(|e| PrimeError::Config(format!("Failed to parse properties JSON: {}", e)))?;

        let properties = file
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Property names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PROPERTIES_JSON).unwrap_or_else(|e| {
            warn!("{}; all properties fall back to built-in values", e);
            PropertyRegistry::default()
        })
    })
}

/// Environment variable consulted for a property (`grid.columns` → `PRIME_GRID_GRID_COLUMNS`)
pub fn env_var_name(property: &str) -> String {
    format!(
        "{}{}",
        ENV_PREFIX,
        property.replace(['.', '-'], "_").to_ascii_uppercase()
    )
}

/// Typed property reader
///
/// Invalid user values are logged and replaced by the registry default; they
/// never abort configuration.
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    /// Reader over explicit values only (no environment lookup)
    pub fn new<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let user_values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty()) // Empty = not set
            .collect();
        Self { user_values }
    }

    /// Environment values for every registered property, then `overrides` on top
    pub fn from_env<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut reader = Self::new(
            registry()
                .names()
                .into_iter()
                .filter_map(|name| {
                    std::env::var(env_var_name(name))
                        .ok()
                        .map(|v| (name.to_string(), v))
                }),
        );
        for (k, v) in overrides {
            let (k, v) = (k.into(), v.into());
            if registry().get_property(&k).is_none() {
                warn!("Unknown property '{}' ignored", k);
                continue;
            }
            if !v.is_empty() {
                reader.user_values.insert(k, v);
            }
        }
        reader
    }

    /// User value if set, otherwise the registry default
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Enumerated value, validated against the allowed values
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    /// Unsigned integer within `[min, max]`, else the default
    pub fn get_usize_in_range(&self, name: &str, min: usize, max: usize) -> usize {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(min);

        let Some(raw) = self.user_values.get(name) else {
            return default;
        };

        match raw.trim().parse::<usize>() {
            Ok(v) if (min..=max).contains(&v) => v,
            Ok(v) => {
                warn!(
                    "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                    v, name, min, max, default
                );
                default
            }
            Err(_) => {
                warn!(
                    "Invalid integer value '{}' for property '{}'. Using default: {}",
                    raw, name, default
                );
                default
            }
        }
    }
}
