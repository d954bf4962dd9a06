use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use mealplan_core::csv_import::{
    self, ImportSummary, parse_ingredients_csv, parse_recipes_csv,
};
use mealplan_core::service::PlannerService;

fn report(summary: &ImportSummary, warnings: &[String], dry_run: bool, json: bool) -> Result<()> {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    let parsed = summary.rows_parsed;
    let imported = summary.rows_imported;
    let skipped = summary.rows_skipped;
    if dry_run {
        println!("Dry run: {parsed} rows parsed, {imported} would be imported, {skipped} skipped.");
    } else {
        println!("{parsed} rows parsed, {imported} imported, {skipped} skipped.");
    }
    Ok(())
}

pub(crate) fn cmd_import_recipes(
    service: &PlannerService,
    file: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open CSV file: {}", file.display()))?;
    let parsed = parse_recipes_csv(reader)?;
    let summary = csv_import::import_recipes(service.db(), &parsed.rows, dry_run)?;
    report(&summary, &parsed.warnings, dry_run, json)
}

pub(crate) fn cmd_import_ingredients(
    service: &PlannerService,
    file: &Path,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open CSV file: {}", file.display()))?;
    let parsed = parse_ingredients_csv(reader)?;
    let summary = csv_import::import_ingredients(service.db(), &parsed.rows, dry_run)?;
    report(&summary, &parsed.warnings, dry_run, json)
}
