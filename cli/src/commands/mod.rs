use anyhow::{Context, Result};
use mealplan_core::models::Recipe;
use mealplan_core::service::PlannerService;

mod helpers;
mod history;
mod import;
mod ingredient;
mod plan;
mod recipe;
mod settings;
mod shopping;

pub(crate) use history::{cmd_history_clear, cmd_history_show};
pub(crate) use import::{cmd_import_ingredients, cmd_import_recipes};
pub(crate) use ingredient::{cmd_ingredient_add, cmd_ingredient_delete, cmd_ingredient_list};
pub(crate) use plan::{PlanArgs, cmd_plan};
pub(crate) use recipe::{cmd_recipe_add, cmd_recipe_delete, cmd_recipe_list, cmd_recipe_show};
pub(crate) use settings::{cmd_settings_set, cmd_settings_show};
pub(crate) use shopping::cmd_shopping;

/// Resolve a recipe from a CLI argument that may be a numeric id or a
/// (case-insensitive) name.
pub(crate) fn resolve_recipe(service: &PlannerService, reference: &str) -> Result<Recipe> {
    if let Ok(id) = reference.parse::<i64>() {
        return service
            .get_recipe(id)
            .with_context(|| format!("No recipe with id {id}"));
    }
    service
        .get_recipe_by_name(reference)?
        .with_context(|| format!("No recipe named '{reference}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealplan_core::models::NewRecipe;

    #[test]
    fn test_resolve_recipe_by_id_and_name() {
        let service = PlannerService::new_in_memory().unwrap();
        let added = service
            .add_recipe(&NewRecipe {
                name: "Chicken Curry".to_string(),
                link: None,
                tags: None,
            })
            .unwrap();

        assert_eq!(
            resolve_recipe(&service, &added.id.to_string()).unwrap().id,
            added.id
        );
        assert_eq!(
            resolve_recipe(&service, "chicken curry").unwrap().id,
            added.id
        );
        assert!(resolve_recipe(&service, "no such recipe").is_err());
        assert!(resolve_recipe(&service, "999").is_err());
    }
}
