use anyhow::Result;
use mealplan_core::models::NewIngredient;
use mealplan_core::service::PlannerService;

use super::helpers::print_ingredient_table;
use super::resolve_recipe;

pub(crate) fn cmd_ingredient_add(
    service: &PlannerService,
    recipe_ref: &str,
    name: &str,
    amount: Option<f64>,
    unit: Option<String>,
    staple: bool,
    json: bool,
) -> Result<()> {
    let recipe = resolve_recipe(service, recipe_ref)?;
    let row = service.add_ingredient(&NewIngredient {
        recipe_id: recipe.id,
        ingredient: name.to_string(),
        amount,
        unit: unit.unwrap_or_default(),
        is_staple: staple,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        let ingredient = &row.ingredient;
        let recipe_name = &recipe.name;
        println!("Added '{ingredient}' to {recipe_name}.");
    }
    Ok(())
}

pub(crate) fn cmd_ingredient_list(service: &PlannerService, recipe_ref: &str, json: bool) -> Result<()> {
    let recipe = resolve_recipe(service, recipe_ref)?;
    let rows = service.list_ingredients_for(recipe.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        let name = &recipe.name;
        println!("No ingredients recorded for {name}.");
        return Ok(());
    }
    print_ingredient_table(&rows);
    Ok(())
}

pub(crate) fn cmd_ingredient_delete(service: &PlannerService, id: i64, json: bool) -> Result<()> {
    let deleted = service.delete_ingredient(id)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "deleted": deleted,
                "id": id,
            }))?
        );
        return Ok(());
    }

    if deleted {
        println!("Deleted ingredient {id}.");
    } else {
        println!("No ingredient with id {id}.");
    }
    Ok(())
}
