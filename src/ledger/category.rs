use serde::{Deserialize, Serialize};

use crate::currency::lenient_amount;

use super::new_id;

/// A spending category with a monthly budget cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: f64,
    #[serde(default = "Category::default_color")]
    pub color: String,
}

impl Category {
    /// Creates a category, taking its color from the matching preset.
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        let name = name.into();
        let color = preset_color(&name).to_string();
        Self {
            id: new_id(),
            name,
            budget,
            color,
        }
    }

    fn default_color() -> String {
        PRESETS[0].color.to_string()
    }
}

/// A selectable category name with its chart color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub color: &'static str,
}

pub const PRESETS: [Preset; 10] = [
    Preset { name: "Food & Dining", color: "#6EE7B7" },
    Preset { name: "Rent / Mortgage", color: "#60A5FA" },
    Preset { name: "Transportation", color: "#FBBF24" },
    Preset { name: "Utilities", color: "#F87171" },
    Preset { name: "Subscriptions", color: "#C084FC" },
    Preset { name: "Health & Fitness", color: "#34D399" },
    Preset { name: "Work / Education", color: "#A78BFA" },
    Preset { name: "Entertainment", color: "#F472B6" },
    Preset { name: "Shopping", color: "#FACC15" },
    Preset { name: "Savings", color: "#4ADE80" },
];

/// Swatch for deposit transactions.
pub const INCOME_COLOR: &str = "#50C3A3";
/// Swatch for uncategorized transactions.
pub const UNCATEGORIZED_COLOR: &str = "#3C464C";

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

/// Color of the preset named `name`, or the first preset's color for custom names.
pub fn preset_color(name: &str) -> &'static str {
    find_preset(name).unwrap_or(&PRESETS[0]).color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_uses_preset_color() {
        let rent = Category::new("Rent / Mortgage", 900.0);
        assert_eq!(rent.color, "#60A5FA");
        let custom = Category::new("Pets", 40.0);
        assert_eq!(custom.color, PRESETS[0].color);
        assert_ne!(rent.id, custom.id);
    }

    #[test]
    fn deserializes_legacy_rows_without_color() {
        let json = r##"{"id":"k3j2a9x","name":"Utilities","budget":"120"}"##;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.budget, 120.0);
        assert_eq!(category.color, "#6EE7B7");
    }
}
