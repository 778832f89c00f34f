//! Context menu model
//!
//! The menu is rebuilt from the current presets and settings whenever they
//! change. Each command carries the [`Action`] it triggers, so the window
//! layer only has to draw entries and send actions back.

use serde::Serialize;

use crate::{
    presets::{PresetNode, PresetTree},
    state::Action,
    store::Settings,
    utils::format_time,
};

/// Opacity choices, most opaque first
pub const OPACITY_CHOICES: [f64; 8] = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3];

/// Window size choices
pub const SIZE_CHOICES: [&str; 4] = ["250x200", "300x240", "350x280", "400x320"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuItem {
    Command {
        label: String,
        action: Action,
        checked: bool,
    },
    Submenu {
        label: String,
        items: Vec<MenuItem>,
    },
    Separator,
}

impl MenuItem {
    fn command(label: impl Into<String>, action: Action) -> Self {
        MenuItem::Command {
            label: label.into(),
            action,
            checked: false,
        }
    }

    fn choice(label: impl Into<String>, action: Action, checked: bool) -> Self {
        MenuItem::Command {
            label: label.into(),
            action,
            checked,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MenuItem::Command { label, .. } | MenuItem::Submenu { label, .. } => Some(label),
            MenuItem::Separator => None,
        }
    }
}

/// Build the full context menu
pub fn build_menu(
    presets: &PresetTree,
    settings: &Settings,
    active_preset: Option<f64>,
) -> Vec<MenuItem> {
    let mut preset_items = vec![
        MenuItem::choice(
            "None (Count Up)",
            Action::SelectPreset { seconds: None },
            active_preset.is_none(),
        ),
        MenuItem::Separator,
    ];
    preset_items.extend(presets.nodes.iter().map(|node| preset_item(node, active_preset)));

    vec![
        MenuItem::Submenu {
            label: "Presets (Countdown)".to_string(),
            items: preset_items,
        },
        MenuItem::command("Change Hotkey", Action::StartRebind),
        MenuItem::command("Reset Laps", Action::ResetLaps),
        MenuItem::Separator,
        customize_menu(settings),
        MenuItem::Separator,
        MenuItem::command("Exit", Action::Exit),
    ]
}

fn preset_item(node: &PresetNode, active_preset: Option<f64>) -> MenuItem {
    match node {
        PresetNode::Leaf { label, seconds } => MenuItem::choice(
            format!("{} ({})", label, format_time(*seconds, true)),
            Action::SelectPreset {
                seconds: Some(*seconds),
            },
            active_preset == Some(*seconds),
        ),
        PresetNode::Category { label, children } => MenuItem::Submenu {
            label: label.clone(),
            items: children
                .iter()
                .map(|child| preset_item(child, active_preset))
                .collect(),
        },
    }
}

fn customize_menu(settings: &Settings) -> MenuItem {
    let opacity = OPACITY_CHOICES
        .iter()
        .map(|&value| {
            MenuItem::choice(
                format!("{:.0}%", value * 100.0),
                Action::SetOpacity { value },
                (settings.ui.opacity - value).abs() < 1e-6,
            )
        })
        .collect();

    let sizes = SIZE_CHOICES
        .iter()
        .map(|&size| {
            MenuItem::choice(
                size,
                Action::SetWindowSize {
                    size: size.to_string(),
                },
                settings.ui.size == size,
            )
        })
        .collect();

    MenuItem::Submenu {
        label: "Customize".to_string(),
        items: vec![
            MenuItem::Submenu {
                label: "Opacity".to_string(),
                items: opacity,
            },
            MenuItem::Submenu {
                label: "Window Size".to_string(),
                items: sizes,
            },
            MenuItem::command(
                format!("Cycle Text Color ({})", settings.ui.text_color),
                Action::CycleTextColor,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submenu<'a>(items: &'a [MenuItem], label: &str) -> &'a [MenuItem] {
        items
            .iter()
            .find_map(|item| match item {
                MenuItem::Submenu { label: l, items } if l == label => Some(items.as_slice()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no submenu {}", label))
    }

    fn checked_labels(items: &[MenuItem]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|item| match item {
                MenuItem::Command { label, checked: true, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn top_level_order() {
        let menu = build_menu(&PresetTree::default(), &Settings::default(), None);
        let labels: Vec<_> = menu.iter().map(|item| item.label().unwrap_or("---")).collect();
        assert_eq!(
            labels,
            vec![
                "Presets (Countdown)",
                "Change Hotkey",
                "Reset Laps",
                "---",
                "Customize",
                "---",
                "Exit"
            ]
        );
    }

    #[test]
    fn preset_labels_use_positive_format() {
        let menu = build_menu(&PresetTree::default(), &Settings::default(), None);
        let presets = submenu(&menu, "Presets (Countdown)");
        assert_eq!(presets[0].label(), Some("None (Count Up)"));
        assert_eq!(presets[1], MenuItem::Separator);
        assert_eq!(
            presets[2],
            MenuItem::Command {
                label: "Track 1 (01:45.000)".to_string(),
                action: Action::SelectPreset { seconds: Some(105.0) },
                checked: false,
            }
        );
        assert_eq!(checked_labels(presets), vec!["None (Count Up)"]);
    }

    #[test]
    fn nested_categories_become_submenus() {
        let tree = PresetTree::from_json(r#"{"Cups": {"Flower": 110}}"#).unwrap();
        let menu = build_menu(&tree, &Settings::default(), Some(110.0));
        let presets = submenu(&menu, "Presets (Countdown)");
        let cups = submenu(presets, "Cups");
        assert_eq!(checked_labels(cups), vec!["Flower (01:50.000)"]);
        assert!(checked_labels(presets).is_empty());
    }

    #[test]
    fn customize_marks_current_choices() {
        let menu = build_menu(&PresetTree::default(), &Settings::default(), None);
        let customize = submenu(&menu, "Customize");
        assert_eq!(checked_labels(submenu(customize, "Opacity")), vec!["80%"]);
        assert_eq!(checked_labels(submenu(customize, "Window Size")), vec!["250x200"]);
    }
}
