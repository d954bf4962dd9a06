use anyhow::Result;
use mealplan_core::notify;
use mealplan_core::service::PlannerService;

/// Print the consolidated shopping list for an explicit set of recipes,
/// without touching the selection history.
pub(crate) fn cmd_shopping(service: &PlannerService, recipe_ids: &[i64], json: bool) -> Result<()> {
    let list = service.shopping_list_for(recipe_ids)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.regular.is_empty() && list.staples.is_empty() {
        eprintln!("No ingredients found for the selected recipes.");
        std::process::exit(2);
    }

    println!("Shopping List:");
    if !list.regular.is_empty() {
        println!("\nItems to Buy:");
        for item in &list.regular {
            println!("- {}", notify::render_item(item));
        }
    }
    if !list.staples.is_empty() {
        println!("\nStaple Items (Check if needed):");
        for item in &list.staples {
            println!("- {}", notify::render_item(item));
        }
    }
    Ok(())
}
