use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use mealplan_core::models::{HistoryEntry, IngredientRow, Recipe};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Parse a `--date` argument. Accepts `YYYY-MM-DD` or the keyword
/// `today`; absent means today.
pub(crate) fn parse_date(date_str: Option<&str>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some("today") => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD or 'today'")),
    }
}

pub(crate) fn format_amount(amount: Option<f64>) -> String {
    match amount {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v}"),
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[derive(Tabled)]
struct RecipeTableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

pub(crate) fn print_recipe_table(recipes: &[Recipe]) {
    let rows: Vec<RecipeTableRow> = recipes
        .iter()
        .map(|r| RecipeTableRow {
            id: r.id,
            name: truncate(&r.name, 40),
            link: truncate(r.link.as_deref().unwrap_or("-"), 50),
            tags: truncate(r.tags.as_deref().unwrap_or("-"), 30),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

#[derive(Tabled)]
struct IngredientTableRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Ingredient")]
    ingredient: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Staple")]
    staple: String,
}

pub(crate) fn print_ingredient_table(rows: &[IngredientRow]) {
    let rows: Vec<IngredientTableRow> = rows
        .iter()
        .map(|i| IngredientTableRow {
            id: i.id,
            ingredient: truncate(&i.ingredient, 40),
            amount: format_amount(i.amount),
            unit: if i.unit.is_empty() {
                "-".to_string()
            } else {
                i.unit.clone()
            },
            staple: if i.is_staple { "yes" } else { "no" }.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

#[derive(Tabled)]
struct HistoryTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Recipe")]
    recipe: String,
    #[tabled(rename = "Recipe ID")]
    recipe_id: i64,
}

pub(crate) fn print_history_table(entries: &[HistoryEntry]) {
    let rows: Vec<HistoryTableRow> = entries
        .iter()
        .map(|e| HistoryTableRow {
            date: e.date_selected.clone(),
            recipe: truncate(e.recipe_name.as_deref().unwrap_or("(deleted)"), 40),
            recipe_id: e.recipe_id,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
