//! Stage actions and configuration resolution.

use super::StageId;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

/// A configured action attached to a pipeline stage, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageActionDefinition {
    /// Stage the action belongs to.
    pub stage_id: StageId,
    /// Explicit position within the stage.
    pub sort_order: i32,
    /// Code of the feature implementing the action.
    pub feature_code: String,
    /// Per-action configuration JSON, if overridden.
    pub config: Option<String>,
    /// Feature default configuration JSON, if any.
    pub default_config: Option<String>,
}

impl StageActionDefinition {
    /// Resolves the effective action name and configuration.
    #[must_use]
    pub fn resolve(&self) -> ResolvedAction {
        ResolvedAction {
            action_name: self.feature_code.clone(),
            config: resolve_config(self.config.as_deref(), self.default_config.as_deref()),
        }
    }
}

/// Action name with its effective configuration.
///
/// Serialises as a single flat object holding `action_name` and the
/// configuration keys. A configuration key named `action_name` wins over the
/// feature code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    action_name: String,
    config: Map<String, Value>,
}

impl ResolvedAction {
    /// Creates a resolved action.
    #[must_use]
    pub fn new(action_name: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            action_name: action_name.into(),
            config,
        }
    }

    /// Returns the action name.
    #[must_use]
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// Returns the effective configuration.
    #[must_use]
    pub const fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Returns the flattened object form.
    #[must_use]
    pub fn to_flat_object(&self) -> Map<String, Value> {
        let mut flat = Map::new();
        flat.insert(
            "action_name".to_owned(),
            Value::String(self.action_name.clone()),
        );
        flat.extend(self.config.clone());
        flat
    }
}

impl Serialize for ResolvedAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flat = self.to_flat_object();
        let mut map = serializer.serialize_map(Some(flat.len()))?;
        for (key, value) in &flat {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Picks the per-action configuration when present, otherwise the feature
/// default.
///
/// The chosen blob replaces the other wholesale. Text that fails to parse, or
/// parses to something other than an object, resolves to an empty object.
#[must_use]
pub fn resolve_config(action_config: Option<&str>, default_config: Option<&str>) -> Map<String, Value> {
    let chosen = action_config
        .filter(|raw| !raw.trim().is_empty())
        .or_else(|| default_config.filter(|raw| !raw.trim().is_empty()));
    let Some(raw) = chosen else {
        return Map::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(config)) => config,
        _ => Map::new(),
    }
}
