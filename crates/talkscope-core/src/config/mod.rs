//! Dashboard configuration.
//!
//! The configuration is a JSON object. [`DashboardConfig::default`] carries every documented key
//! with its default value; user overrides are merged on top with [`DashboardConfig::deep_merge`].
//! Typed views (`TagsConfig`, the chart configs in `talkscope-render`) read it with fallbacks so a
//! partially specified or hand-edited object never fails to render.

use crate::{Error, Result};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig(Value);

impl Default for DashboardConfig {
    fn default() -> Self {
        Self(default_config_value())
    }
}

fn default_config_value() -> Value {
    json!({
        "tags": {
            "topN": 50,
            "maxSelected": 3,
            "initial": []
        },
        "duration": {
            "min": null,
            "max": null
        },
        "beeswarm": {
            "width": 600,
            "height": 420,
            "margin": { "top": 20, "right": 30, "bottom": 20, "left": 20 },
            "padding": 1.5,
            "viewsMin": 100000,
            "viewsMax": 50000000
        },
        "chord": {
            "width": 600,
            "height": 600,
            "innerRadius": 200,
            "outerRadius": 210,
            "padAngle": 0.05,
            "labelOffset": 15
        },
        "lineChart": {
            "width": 600,
            "height": 400,
            "margin": { "top": 40, "right": 30, "bottom": 30, "left": 50 },
            "firstYear": 2007,
            "lastYear": 2017,
            "headroom": 15,
            "emptyMax": 180
        },
        "circlePack": {
            "width": 600,
            "height": 600,
            "margin": { "top": 25, "right": 30, "bottom": 25, "left": 30 },
            "padding": 3,
            "transitionMs": 250
        }
    })
}

impl DashboardConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a JSON override document and merges it over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        if !overrides.is_object() {
            return Err(Error::InvalidConfig {
                message: "configuration must be a JSON object".to_string(),
            });
        }
        let mut config = Self::default();
        config.deep_merge(&overrides);
        Ok(config)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        let v = self.get(dotted_path)?;
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        })
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_str_list(&self, dotted_path: &str) -> Vec<String> {
        self.get(dotted_path)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur
                .entry(seg)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn tags(&self) -> TagsConfig {
        TagsConfig {
            top_n: self.get_u64("tags.topN").map(|v| v as usize).unwrap_or(50),
            max_selected: self
                .get_u64("tags.maxSelected")
                .map(|v| v as usize)
                .filter(|v| *v > 0)
                .unwrap_or(3),
            initial: self.get_str_list("tags.initial"),
        }
    }

    /// Duration overrides; `None` means "use the data-derived bound".
    pub fn duration_overrides(&self) -> (Option<u32>, Option<u32>) {
        let read = |path: &str| {
            self.get_u64(path)
                .map(|v| v.min(u64::from(u32::MAX)) as u32)
        };
        (read("duration.min"), read("duration.max"))
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsConfig {
    /// Catalog size.
    pub top_n: usize,
    /// Selection capacity.
    pub max_selected: usize,
    /// Tags selected when the dashboard starts.
    pub initial: Vec<String>,
}

/// Margin block shared by the chart configs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn read(config: &DashboardConfig, prefix: &str, fallback: Margin) -> Margin {
        let side = |name: &str, default: f64| {
            config
                .get_f64(&format!("{prefix}.margin.{name}"))
                .unwrap_or(default)
        };
        Margin {
            top: side("top", fallback.top),
            right: side("right", fallback.right),
            bottom: side("bottom", fallback.bottom),
            left: side("left", fallback.left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_exposed_through_typed_views() {
        let config = DashboardConfig::default();
        let tags = config.tags();
        assert_eq!(tags.top_n, 50);
        assert_eq!(tags.max_selected, 3);
        assert!(tags.initial.is_empty());
        assert_eq!(config.duration_overrides(), (None, None));
        assert_eq!(config.get_f64("chord.padAngle"), Some(0.05));
    }

    #[test]
    fn overrides_merge_without_dropping_siblings() {
        let config = DashboardConfig::from_json_str(
            r#"{"chord":{"innerRadius":150},"tags":{"initial":["science"]}}"#,
        )
        .unwrap();
        assert_eq!(config.get_f64("chord.innerRadius"), Some(150.0));
        assert_eq!(config.get_f64("chord.outerRadius"), Some(210.0));
        assert_eq!(config.tags().initial, vec!["science".to_string()]);
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let err = DashboardConfig::from_json_str("[1,2]").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut config = DashboardConfig::empty_object();
        config.set_value("duration.min", json!(7));
        assert_eq!(config.duration_overrides(), (Some(7), None));
    }
}
