use anyhow::Result;
use mealplan_core::service::PlannerService;

use super::helpers::print_history_table;

pub(crate) fn cmd_history_show(service: &PlannerService, days: Option<i64>, json: bool) -> Result<()> {
    let entries = service.list_history(days)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No selection history.");
        return Ok(());
    }
    print_history_table(&entries);
    Ok(())
}

pub(crate) fn cmd_history_clear(service: &PlannerService, json: bool) -> Result<()> {
    let removed = service.clear_history()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "removed": removed }))?
        );
    } else {
        println!("Cleared {removed} history entries.");
    }
    Ok(())
}
