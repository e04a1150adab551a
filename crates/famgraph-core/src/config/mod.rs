use crate::{Error, Result};
use serde_json::{Value, json};

/// Engine configuration backed by a JSON object.
///
/// Callers pass partial overrides; [`EngineConfig::default`] holds the full default tree and
/// overrides are deep-merged on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig(Value);

impl Default for EngineConfig {
    fn default() -> Self {
        Self(json!({
            "genogram": {
                "twinPairing": "adjacent",
                "labelMaxChars": 22,
                "legend": true,
            },
            "ingest": {
                "legacyDeceasedText": false,
            },
            "ecomap": {
                "defaultSystems": ["CESFAM", "TRABAJO", "RED FAMILIAR", "COMUNIDAD"],
                "legend": true,
            },
        }))
    }
}

/// How twin children are paired under a divergence node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwinPairing {
    /// Pair twin-labelled children only when they are consecutive in the child list.
    #[default]
    Adjacent,
    /// Pair children sharing an explicit `twinGroup` id, regardless of input order.
    SiblingGroup,
}

impl EngineConfig {
    pub fn from_value(value: Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(&value);
        cfg
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.get(dotted_path)?.as_u64()
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    /// Looks up `key` and converts it. A missing or `null` key yields `Ok(None)`; a present
    /// value that `convert` rejects is an [`Error::InvalidConfig`] naming `expected`.
    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| Error::InvalidConfig {
                key: key.to_string(),
                message: format!("expected {expected}, got `{value}`"),
            }),
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        merge_into(&mut self.0, other);
    }

    pub fn twin_pairing(&self) -> Result<TwinPairing> {
        match self.typed("genogram.twinPairing", "a string", Value::as_str)? {
            None | Some("adjacent") => Ok(TwinPairing::Adjacent),
            Some("siblingGroup") => Ok(TwinPairing::SiblingGroup),
            Some(other) => Err(Error::InvalidConfig {
                key: "genogram.twinPairing".to_string(),
                message: format!("expected `adjacent` or `siblingGroup`, got `{other}`"),
            }),
        }
    }

    pub fn label_max_chars(&self) -> Result<usize> {
        let max = self.typed("genogram.labelMaxChars", "a positive integer", |v| {
            v.as_u64()
                .filter(|n| *n > 0)
                .and_then(|n| usize::try_from(n).ok())
        })?;
        Ok(max.unwrap_or(22))
    }

    pub fn genogram_legend(&self) -> Result<bool> {
        Ok(self
            .typed("genogram.legend", "a boolean", Value::as_bool)?
            .unwrap_or(true))
    }

    pub fn ecomap_legend(&self) -> Result<bool> {
        Ok(self
            .typed("ecomap.legend", "a boolean", Value::as_bool)?
            .unwrap_or(true))
    }

    pub fn legacy_deceased_text(&self) -> Result<bool> {
        Ok(self
            .typed("ingest.legacyDeceasedText", "a boolean", Value::as_bool)?
            .unwrap_or(false))
    }

    pub fn default_ecomap_systems(&self) -> Result<Vec<String>> {
        let systems = self.typed("ecomap.defaultSystems", "an array of strings", |v| {
            v.as_array()?
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })?;
        Ok(systems.unwrap_or_default())
    }
}

/// Objects merge key by key; any other incoming value replaces what was there.
fn merge_into(target: &mut Value, overrides: &Value) {
    if let (Some(fields), Some(incoming)) = (target.as_object_mut(), overrides.as_object()) {
        for (key, value) in incoming {
            match fields.get_mut(key) {
                Some(slot) => merge_into(slot, value),
                None => {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *target = overrides.clone();
}
