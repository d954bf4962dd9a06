//! CSV ingest for recipes and ingredients, matching the column layout of
//! the spreadsheet the planner's data is usually authored in.

use std::io::Read;

use anyhow::{Context, Result};

use crate::db::Database;
use crate::models::{NewIngredient, NewRecipe, parse_staple_flag};

/// A recipe row parsed from CSV, keeping the sheet's recipe id so that
/// ingredient rows can reference it.
#[derive(Debug, Clone)]
pub struct RecipeRecord {
    pub recipe_id: i64,
    pub recipe: NewRecipe,
}

#[derive(Debug, Default)]
pub struct ParsedRecipes {
    pub rows: Vec<RecipeRecord>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ParsedIngredients {
    pub rows: Vec<NewIngredient>,
    pub warnings: Vec<String>,
}

/// Summary of what an import would do / did.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImportSummary {
    pub rows_parsed: usize,
    pub rows_imported: usize,
    pub rows_skipped: usize,
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Parse a recipes CSV.
///
/// Expected header: `recipe_id,name,link,tags` — `link` and `tags` are
/// optional. Rows with a missing or non-numeric `recipe_id`, or a blank
/// `name`, are skipped with a warning rather than failing the import.
pub fn parse_recipes_csv<R: Read>(reader: R) -> Result<ParsedRecipes> {
    let mut rdr = reader_for(reader);
    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let col =
        |name: &str| -> Option<usize> { headers.iter().position(|h| h.eq_ignore_ascii_case(name)) };

    let idx_id = col("recipe_id").context("Missing 'recipe_id' column")?;
    let idx_name = col("name").context("Missing 'name' column")?;
    let idx_link = col("link");
    let idx_tags = col("tags");

    let mut parsed = ParsedRecipes::default();
    if idx_link.is_none() {
        parsed
            .warnings
            .push("Recipes CSV has no 'link' column; links will be empty".to_string());
    }

    for (line_num, result) in rdr.records().enumerate() {
        let line = line_num + 2;
        let record = result.with_context(|| format!("Failed to parse CSV row {line}"))?;

        let id_cell = record.get(idx_id).unwrap_or("").trim();
        let name = record.get(idx_name).unwrap_or("").trim();
        if id_cell.is_empty() && name.is_empty() {
            continue; // blank row
        }

        let Ok(recipe_id) = id_cell.parse::<i64>() else {
            parsed
                .warnings
                .push(format!("Row {line}: invalid recipe_id '{id_cell}', skipped"));
            continue;
        };
        if name.is_empty() {
            parsed
                .warnings
                .push(format!("Row {line}: recipe {recipe_id} has no name, skipped"));
            continue;
        }

        let opt_cell = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };

        parsed.rows.push(RecipeRecord {
            recipe_id,
            recipe: NewRecipe {
                name: name.to_string(),
                link: opt_cell(idx_link),
                tags: opt_cell(idx_tags),
            },
        });
    }

    Ok(parsed)
}

/// Parse an ingredients CSV.
///
/// Expected header: `recipe_id,ingredient,amount,unit,is_staple`. Only the
/// first two columns are required; missing columns and malformed cells are
/// defaulted (no amount, empty unit, not a staple) with a warning, so one
/// bad cell never aborts the rest of the import.
pub fn parse_ingredients_csv<R: Read>(reader: R) -> Result<ParsedIngredients> {
    let mut rdr = reader_for(reader);
    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let col =
        |name: &str| -> Option<usize> { headers.iter().position(|h| h.eq_ignore_ascii_case(name)) };

    let idx_id = col("recipe_id").context("Missing 'recipe_id' column")?;
    let idx_ingredient = col("ingredient").context("Missing 'ingredient' column")?;
    let idx_amount = col("amount");
    let idx_unit = col("unit");
    let idx_staple = col("is_staple");

    let mut parsed = ParsedIngredients::default();
    for (name, idx) in [
        ("amount", idx_amount),
        ("unit", idx_unit),
        ("is_staple", idx_staple),
    ] {
        if idx.is_none() {
            parsed
                .warnings
                .push(format!("Ingredients CSV has no '{name}' column; defaulting"));
        }
    }

    for (line_num, result) in rdr.records().enumerate() {
        let line = line_num + 2;
        let record = result.with_context(|| format!("Failed to parse CSV row {line}"))?;

        let id_cell = record.get(idx_id).unwrap_or("").trim();
        let ingredient = record.get(idx_ingredient).unwrap_or("").trim();
        if id_cell.is_empty() && ingredient.is_empty() {
            continue; // blank row
        }

        let Ok(recipe_id) = id_cell.parse::<i64>() else {
            parsed
                .warnings
                .push(format!("Row {line}: invalid recipe_id '{id_cell}', skipped"));
            continue;
        };
        if ingredient.is_empty() {
            parsed
                .warnings
                .push(format!("Row {line}: missing ingredient name, skipped"));
            continue;
        }

        let amount_cell = idx_amount
            .and_then(|i| record.get(i))
            .map(str::trim)
            .unwrap_or("");
        let amount = if amount_cell.is_empty() {
            None
        } else {
            match amount_cell.parse::<f64>() {
                Ok(v) if v >= 0.0 => Some(v),
                _ => {
                    parsed.warnings.push(format!(
                        "Row {line}: invalid amount '{amount_cell}', treated as missing"
                    ));
                    None
                }
            }
        };

        let unit = idx_unit
            .and_then(|i| record.get(i))
            .map(str::trim)
            .unwrap_or("")
            .to_string();
        let is_staple = idx_staple
            .and_then(|i| record.get(i))
            .is_some_and(parse_staple_flag);

        parsed.rows.push(NewIngredient {
            recipe_id,
            ingredient: ingredient.to_string(),
            amount,
            unit,
            is_staple,
        });
    }

    Ok(parsed)
}

/// Import parsed recipe rows, upserting by the sheet's recipe id.
/// When `dry_run` is true, nothing is written.
pub fn import_recipes(db: &Database, rows: &[RecipeRecord], dry_run: bool) -> Result<ImportSummary> {
    if !dry_run {
        for row in rows {
            db.upsert_recipe_with_id(row.recipe_id, &row.recipe)?;
        }
    }
    Ok(ImportSummary {
        rows_parsed: rows.len(),
        rows_imported: rows.len(),
        rows_skipped: 0,
    })
}

/// Import parsed ingredient rows. Rows referencing a recipe id that does
/// not exist are skipped; everything else is appended.
pub fn import_ingredients(
    db: &Database,
    rows: &[NewIngredient],
    dry_run: bool,
) -> Result<ImportSummary> {
    let mut imported = 0;
    let mut skipped = 0;
    for row in rows {
        if !db.recipe_exists(row.recipe_id)? {
            skipped += 1;
            continue;
        }
        if !dry_run {
            db.add_ingredient(row)?;
        }
        imported += 1;
    }
    Ok(ImportSummary {
        rows_parsed: rows.len(),
        rows_imported: imported,
        rows_skipped: skipped,
    })
}
