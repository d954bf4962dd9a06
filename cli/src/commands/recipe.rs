use anyhow::Result;
use mealplan_core::models::NewRecipe;
use mealplan_core::service::PlannerService;

use super::helpers::{print_ingredient_table, print_recipe_table};
use super::resolve_recipe;

pub(crate) fn cmd_recipe_add(
    service: &PlannerService,
    name: &str,
    link: Option<String>,
    tags: Option<String>,
    json: bool,
) -> Result<()> {
    let recipe = service.add_recipe(&NewRecipe {
        name: name.to_string(),
        link,
        tags,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        let id = recipe.id;
        let name = &recipe.name;
        println!("Added recipe {id}: {name}");
    }
    Ok(())
}

pub(crate) fn cmd_recipe_list(service: &PlannerService, json: bool) -> Result<()> {
    let recipes = service.list_recipes()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No recipes yet. Add one with 'mealplan recipe add'.");
        return Ok(());
    }
    print_recipe_table(&recipes);
    Ok(())
}

pub(crate) fn cmd_recipe_show(service: &PlannerService, reference: &str, json: bool) -> Result<()> {
    let recipe = resolve_recipe(service, reference)?;
    let ingredients = service.list_ingredients_for(recipe.id)?;

    if json {
        let doc = serde_json::json!({
            "recipe": recipe,
            "ingredients": ingredients,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let name = &recipe.name;
    let id = recipe.id;
    println!("{name} (id {id})");
    if let Some(link) = &recipe.link {
        println!("Link: {link}");
    }
    if let Some(tags) = &recipe.tags {
        println!("Tags: {tags}");
    }
    if ingredients.is_empty() {
        println!("No ingredients recorded.");
    } else {
        println!();
        print_ingredient_table(&ingredients);
    }
    Ok(())
}

pub(crate) fn cmd_recipe_delete(service: &PlannerService, reference: &str, json: bool) -> Result<()> {
    let recipe = resolve_recipe(service, reference)?;
    let deleted = service.delete_recipe(recipe.id)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "deleted": deleted,
                "id": recipe.id,
            }))?
        );
    } else {
        let name = &recipe.name;
        println!("Deleted recipe '{name}' and its ingredients.");
    }
    Ok(())
}
