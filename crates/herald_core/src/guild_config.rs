//! Per-guild configuration record.

use serde_json::{Map, Value, json};

/// One configuration record per guild.
///
/// The record is a nested JSON object. Known keys get typed accessors;
/// unknown keys are carried through reads and writes untouched so the two
/// adapter processes tolerate version skew between each other. Missing keys
/// read as their documented defaults.
///
/// # Examples
///
/// ```
/// use herald_core::GuildConfig;
///
/// let config = GuildConfig::default();
/// assert!(config.temperature_enabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GuildConfig(Map<String, Value>);

impl Default for GuildConfig {
    fn default() -> Self {
        let Value::Object(map) = json!({
            "events": {
                "temperature": {
                    "enabled": true,
                }
            }
        }) else {
            unreachable!("default config literal is an object")
        };
        Self(map)
    }
}

impl GuildConfig {
    /// Build a record from a persisted JSON value, merging it over the
    /// defaults. Non-object values are ignored and yield the defaults.
    pub fn from_stored(stored: Value) -> Self {
        let mut config = Self::default();
        if let Value::Object(overrides) = stored {
            for (key, value) in overrides {
                merge_into(&mut config.0, key, value);
            }
        }
        config
    }

    /// The full record as a JSON value, for persistence or API responses.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Whether the temperature-conversion event is enabled.
    ///
    /// Defaults to `true` when the key is absent.
    pub fn temperature_enabled(&self) -> bool {
        self.0
            .get("events")
            .and_then(|e| e.get("temperature"))
            .and_then(|t| t.get("enabled"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Enable or disable the temperature-conversion event.
    pub fn set_temperature_enabled(&mut self, enabled: bool) {
        self.merge_path("events.temperature.enabled", Value::Bool(enabled));
    }

    /// Merge a single value at a dot-separated key path, creating
    /// intermediate objects as needed. Sibling keys at every level are
    /// preserved.
    pub fn merge_path(&mut self, key_path: &str, value: Value) {
        let mut segments = key_path.split('.').peekable();
        let mut current = &mut self.0;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_string(), value);
                return;
            }
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry
                .as_object_mut()
                .expect("entry was just coerced to an object");
        }
    }
}

/// Deep-merge one key into `base`: objects merge recursively, everything
/// else replaces.
fn merge_into(base: &mut Map<String, Value>, key: String, value: Value) {
    match value {
        Value::Object(incoming) => {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                for (k, v) in incoming {
                    merge_into(existing, k, v);
                }
                return;
            }
            base.insert(key, Value::Object(incoming));
        }
        other => {
            base.insert(key, other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = GuildConfig::from_stored(Value::Null);
        assert!(config.temperature_enabled());
    }

    #[test]
    fn stored_override_wins_over_default() {
        let stored = json!({"events": {"temperature": {"enabled": false}}});
        let config = GuildConfig::from_stored(stored);
        assert!(!config.temperature_enabled());
    }

    #[test]
    fn unknown_keys_survive_a_toggle() {
        let stored = json!({
            "events": {"temperature": {"enabled": false}},
            "dashboard": {"theme": "dark"},
        });
        let mut config = GuildConfig::from_stored(stored);
        config.set_temperature_enabled(true);

        let value = config.to_value();
        assert_eq!(value["dashboard"]["theme"], json!("dark"));
        assert_eq!(value["events"]["temperature"]["enabled"], json!(true));
    }

    #[test]
    fn merge_path_creates_intermediate_objects() {
        let mut config = GuildConfig::default();
        config.merge_path("events.greetings.enabled", Value::Bool(true));

        let value = config.to_value();
        assert_eq!(value["events"]["greetings"]["enabled"], json!(true));
        // Sibling key untouched
        assert_eq!(value["events"]["temperature"]["enabled"], json!(true));
    }
}
