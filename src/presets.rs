//! Countdown presets
//!
//! Presets form a tree of labelled durations. On disk they are a JSON object
//! where each value is either a duration in seconds or a nested object:
//!
//! ```json
//! { "Track 1": 105, "Cups": { "Mushroom": 92.5, "Flower": 110 } }
//! ```
//!
//! Entry order in the file is kept.

use std::{fs, path::Path};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// A preset leaf or a named group of presets
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetNode {
    Leaf { label: String, seconds: f64 },
    Category { label: String, children: Vec<PresetNode> },
}

impl PresetNode {
    pub fn label(&self) -> &str {
        match self {
            PresetNode::Leaf { label, .. } | PresetNode::Category { label, .. } => label,
        }
    }
}

/// Top-level list of presets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetTree {
    pub nodes: Vec<PresetNode>,
}

impl Default for PresetTree {
    fn default() -> Self {
        Self {
            nodes: vec![PresetNode::Leaf {
                label: "Track 1".to_string(),
                seconds: 105.0,
            }],
        }
    }
}

impl PresetTree {
    /// Parse the JSON object form
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| format!("Invalid preset JSON: {}", e))?;
        match value {
            Value::Object(map) => Ok(Self {
                nodes: parse_entries(&map, "")?,
            }),
            _ => Err("Preset file must contain a JSON object".to_string()),
        }
    }

    /// Load presets from a file, keeping the built-in set on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let loaded = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
            .and_then(|raw| Self::from_json(&raw));

        match loaded {
            Ok(tree) => {
                info!("Loaded {} presets from {}", tree.leaf_count(), path.display());
                tree
            }
            Err(e) => {
                warn!("{}, using built-in presets", e);
                Self::default()
            }
        }
    }

    /// Number of selectable durations in the tree
    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &[PresetNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    PresetNode::Leaf { .. } => 1,
                    PresetNode::Category { children, .. } => count(children),
                })
                .sum()
        }
        count(&self.nodes)
    }
}

fn parse_entries(map: &Map<String, Value>, path: &str) -> Result<Vec<PresetNode>, String> {
    map.iter()
        .map(|(label, value)| {
            let full = if path.is_empty() {
                label.clone()
            } else {
                format!("{} / {}", path, label)
            };
            match value {
                Value::Number(n) => {
                    let seconds = n
                        .as_f64()
                        .filter(|s| s.is_finite() && *s >= 0.0)
                        .ok_or_else(|| format!("Preset {:?} must be a non-negative duration", full))?;
                    Ok(PresetNode::Leaf {
                        label: label.clone(),
                        seconds,
                    })
                }
                Value::Object(children) => Ok(PresetNode::Category {
                    label: label.clone(),
                    children: parse_entries(children, &full)?,
                }),
                _ => Err(format!("Preset {:?} must be a number or an object", full)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_track_one() {
        let tree = PresetTree::default();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.nodes[0].label(), "Track 1");
    }

    #[test]
    fn parses_nested_tree_in_file_order() {
        let tree = PresetTree::from_json(
            r#"{"Zeta": 10, "Cups": {"Mushroom": 92.5, "Flower": 110}, "Alpha": 5}"#,
        )
        .unwrap();
        let labels: Vec<_> = tree.nodes.iter().map(PresetNode::label).collect();
        assert_eq!(labels, vec!["Zeta", "Cups", "Alpha"]);
        assert_eq!(tree.leaf_count(), 4);
        match &tree.nodes[1] {
            PresetNode::Category { children, .. } => {
                assert_eq!(
                    children[0],
                    PresetNode::Leaf {
                        label: "Mushroom".to_string(),
                        seconds: 92.5
                    }
                );
            }
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_leaves() {
        assert!(PresetTree::from_json(r#"{"A": -1}"#).is_err());
        assert!(PresetTree::from_json(r#"{"A": "fast"}"#).is_err());
        let err = PresetTree::from_json(r#"{"Cups": {"B": [1]}}"#).unwrap_err();
        assert!(err.contains("Cups / B"), "{}", err);
        assert!(PresetTree::from_json("[1, 2]").is_err());
    }

    #[test]
    fn unreadable_file_keeps_defaults() {
        let path = std::env::temp_dir().join("racing-timer-no-presets.json");
        assert_eq!(PresetTree::load_or_default(Some(&path)), PresetTree::default());
        assert_eq!(PresetTree::load_or_default(None), PresetTree::default());
    }
}
