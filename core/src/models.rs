use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub link: Option<String>,
    pub tags: Option<String>,
}

/// One ingredient requirement of one recipe, as stored.
///
/// `amount` is `None` when the quantity is unknown; `unit` is the empty
/// string when there is no unit. The ingredient name is kept exactly as
/// authored — consolidation matches on it verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientRow {
    pub id: i64,
    pub recipe_id: i64,
    pub ingredient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub unit: String,
    pub is_staple: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub recipe_id: i64,
    pub ingredient: String,
    pub amount: Option<f64>,
    pub unit: String,
    pub is_staple: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub recipe_id: i64,
    pub date_selected: String,
    // Joined field for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

/// One line of the generated shopping list: the formatted text plus the
/// 1-based positions of the recipes that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListItem {
    pub text: String,
    pub sources: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoppingList {
    pub regular: Vec<ShoppingListItem>,
    pub staples: Vec<ShoppingListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPlan {
    pub date: String,
    pub recipes: Vec<Recipe>,
    pub shopping_list: ShoppingList,
    /// True when the repeat window left fewer candidates than requested and
    /// the selector fell back to the full recipe pool.
    pub pool_exhausted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSettings {
    pub recipes_per_week: usize,
    pub repeat_window_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            recipes_per_week: 3,
            repeat_window_days: 30,
            webhook_url: None,
        }
    }
}

pub fn validate_recipe_data(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Recipe name must not be empty");
    }
    Ok(())
}

pub fn validate_ingredient_data(ingredient: &str, amount: Option<f64>) -> Result<()> {
    if ingredient.trim().is_empty() {
        bail!("Ingredient name must not be empty");
    }
    if amount.is_some_and(|v| v < 0.0) {
        bail!("Ingredient amount must not be negative");
    }
    if amount.is_some_and(f64::is_nan) {
        bail!("Ingredient amount must be a number");
    }
    Ok(())
}

/// Parse a staple flag cell as exported by spreadsheet tools
/// ("TRUE"/"FALSE", "1"/"0", "yes"/"no"). Anything unrecognized is false.
#[must_use]
pub fn parse_staple_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipe_data() {
        assert!(validate_recipe_data("Chicken Curry").is_ok());
        assert!(validate_recipe_data("").is_err());
        assert!(validate_recipe_data("   ").is_err());
    }

    #[test]
    fn test_validate_ingredient_data_valid() {
        assert!(validate_ingredient_data("flour", Some(2.0)).is_ok());
        assert!(validate_ingredient_data("salt", None).is_ok());
        assert!(validate_ingredient_data("water", Some(0.0)).is_ok());
    }

    #[test]
    fn test_validate_ingredient_data_empty_name() {
        assert!(validate_ingredient_data("", Some(1.0)).is_err());
        assert!(validate_ingredient_data("  ", None).is_err());
    }

    #[test]
    fn test_validate_ingredient_data_negative_amount() {
        assert!(validate_ingredient_data("flour", Some(-1.0)).is_err());
    }

    #[test]
    fn test_validate_ingredient_data_nan_amount() {
        assert!(validate_ingredient_data("flour", Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_parse_staple_flag() {
        assert!(parse_staple_flag("TRUE"));
        assert!(parse_staple_flag("true"));
        assert!(parse_staple_flag(" 1 "));
        assert!(parse_staple_flag("Yes"));
        assert!(!parse_staple_flag("FALSE"));
        assert!(!parse_staple_flag("0"));
        assert!(!parse_staple_flag(""));
        assert!(!parse_staple_flag("maybe"));
    }

    #[test]
    fn test_weekly_plan_serialization_skips_empty_options() {
        let plan = WeeklyPlan {
            date: "2026-08-30".to_string(),
            recipes: vec![Recipe {
                id: 1,
                name: "Curry".to_string(),
                link: None,
                tags: None,
                created_at: String::new(),
            }],
            shopping_list: ShoppingList::default(),
            pool_exhausted: false,
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["date"], "2026-08-30");
        assert_eq!(json["recipes"][0]["name"], "Curry");
        assert!(json["recipes"][0].get("link").is_none());
        assert_eq!(json["pool_exhausted"], false);
    }

    #[test]
    fn test_planner_settings_default() {
        let settings = PlannerSettings::default();
        assert_eq!(settings.recipes_per_week, 3);
        assert_eq!(settings.repeat_window_days, 30);
        assert!(settings.webhook_url.is_none());
    }
}
