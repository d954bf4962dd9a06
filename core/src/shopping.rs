//! Shopping list generation: filter the ingredient table down to the
//! week's recipes, merge identical line items, and track which recipes
//! asked for each ingredient.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{IngredientRow, ShoppingList, ShoppingListItem};

/// An ingredient row tagged with the 1-based position of its recipe in
/// the week's selection sequence.
#[derive(Debug, Clone)]
pub struct SelectedIngredient {
    pub ingredient: String,
    pub amount: Option<f64>,
    pub unit: String,
    pub is_staple: bool,
    pub recipe_index: usize,
}

/// One merged line item: all rows sharing (ingredient, unit, is_staple)
/// with their amounts summed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedEntry {
    pub ingredient: String,
    pub unit: String,
    pub is_staple: bool,
    pub amount: f64,
}

/// Keep only the rows belonging to the selected recipes, tagging each with
/// its recipe index. Index 0 cannot occur after the membership filter; the
/// `map_or` keeps the lookup total anyway.
#[must_use]
pub fn filter_rows(rows: &[IngredientRow], recipe_ids: &[i64]) -> Vec<SelectedIngredient> {
    rows.iter()
        .filter(|row| recipe_ids.contains(&row.recipe_id))
        .map(|row| SelectedIngredient {
            ingredient: row.ingredient.clone(),
            amount: row.amount,
            unit: row.unit.clone(),
            is_staple: row.is_staple,
            recipe_index: recipe_ids
                .iter()
                .position(|id| *id == row.recipe_id)
                .map_or(0, |p| p + 1),
        })
        .collect()
}

/// Map each (ingredient, unit) pair to the sorted, deduplicated recipe
/// indices that contributed a row with that pair. The staple flag is not
/// part of this key; see `generate_shopping_list`.
#[must_use]
pub fn track_sources(rows: &[SelectedIngredient]) -> BTreeMap<(String, String), Vec<usize>> {
    let mut sources: BTreeMap<(String, String), BTreeSet<usize>> = BTreeMap::new();
    for row in rows {
        sources
            .entry((row.ingredient.clone(), row.unit.clone()))
            .or_default()
            .insert(row.recipe_index);
    }
    sources
        .into_iter()
        .map(|(key, indices)| (key, indices.into_iter().collect()))
        .collect()
}

/// Group rows by (ingredient, unit, is_staple) and sum their amounts,
/// treating a missing amount as 0. Output order is fixed regardless of
/// input order: regular entries before staples, then ingredient name
/// (code-point order), then unit.
#[must_use]
pub fn consolidate(rows: &[SelectedIngredient]) -> Vec<ConsolidatedEntry> {
    let mut groups: BTreeMap<(bool, String, String), f64> = BTreeMap::new();
    for row in rows {
        *groups
            .entry((row.is_staple, row.ingredient.clone(), row.unit.clone()))
            .or_insert(0.0) += row.amount.unwrap_or(0.0);
    }
    groups
        .into_iter()
        .map(|((is_staple, ingredient, unit), amount)| ConsolidatedEntry {
            ingredient,
            unit,
            is_staple,
            amount,
        })
        .collect()
}

/// Render one consolidated entry for display.
///
/// A zero amount means the quantity is unknown, so only the name is shown.
/// A blank unit, or the placeholder unit "count", is omitted. Whole-number
/// amounts render without a trailing `.0`.
#[must_use]
pub fn format_entry(amount: f64, unit: &str, ingredient: &str) -> String {
    let text = if amount == 0.0 {
        ingredient.to_string()
    } else {
        let amount = if amount.fract() == 0.0 {
            format!("{amount:.0}")
        } else {
            format!("{amount}")
        };
        let unit = unit.trim();
        if unit.is_empty() || unit == "count" {
            format!("{amount} {ingredient}")
        } else {
            format!("{amount} {unit} {ingredient}")
        }
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the week's shopping list for the given recipe sequence.
///
/// Pure function of its inputs: the full ingredient table and the ordered
/// recipe ids. Sources are keyed by (ingredient, unit) only, so a pair that
/// appears both as a staple and a regular item reports the union of both
/// entries' recipes on each.
#[must_use]
pub fn generate_shopping_list(rows: &[IngredientRow], recipe_ids: &[i64]) -> ShoppingList {
    let selected = filter_rows(rows, recipe_ids);
    if selected.is_empty() {
        return ShoppingList::default();
    }

    let sources = track_sources(&selected);

    let mut list = ShoppingList::default();
    for entry in consolidate(&selected) {
        let item = ShoppingListItem {
            text: format_entry(entry.amount, &entry.unit, &entry.ingredient),
            sources: sources
                .get(&(entry.ingredient.clone(), entry.unit.clone()))
                .cloned()
                .unwrap_or_default(),
        };
        if entry.is_staple {
            list.staples.push(item);
        } else {
            list.regular.push(item);
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        recipe_id: i64,
        ingredient: &str,
        amount: Option<f64>,
        unit: &str,
        is_staple: bool,
    ) -> IngredientRow {
        IngredientRow {
            id: 0,
            recipe_id,
            ingredient: ingredient.to_string(),
            amount,
            unit: unit.to_string(),
            is_staple,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_filter_rows_tags_recipe_index() {
        let rows = vec![
            row(20, "rice", Some(1.0), "cup", false),
            row(10, "flour", Some(2.0), "cup", false),
            row(30, "milk", Some(1.0), "cup", false),
        ];
        let selected = filter_rows(&rows, &[10, 20]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].ingredient, "rice");
        assert_eq!(selected[0].recipe_index, 2);
        assert_eq!(selected[1].ingredient, "flour");
        assert_eq!(selected[1].recipe_index, 1);
    }

    #[test]
    fn test_filter_rows_empty_selection() {
        let rows = vec![row(10, "flour", Some(2.0), "cup", false)];
        assert!(filter_rows(&rows, &[]).is_empty());
    }

    #[test]
    fn test_grouping_merges_equal_keys_only() {
        // Same (ingredient, unit, is_staple) merges; any difference splits.
        let rows = filter_rows(
            &[
                row(10, "flour", Some(1.0), "cup", false),
                row(20, "flour", Some(2.0), "cup", false),
                row(20, "flour", Some(3.0), "g", false),
                row(20, "flour", Some(4.0), "cup", true),
                row(20, "Flour", Some(5.0), "cup", false),
            ],
            &[10, 20],
        );
        let entries = consolidate(&rows);
        assert_eq!(entries.len(), 4);
        let merged = entries
            .iter()
            .find(|e| e.ingredient == "flour" && e.unit == "cup" && !e.is_staple)
            .unwrap();
        assert!((merged.amount - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sum_ignores_input_order() {
        // Shuffling input rows must not change amounts or order.
        let base = vec![
            row(10, "flour", Some(1.5), "cup", false),
            row(20, "flour", Some(0.25), "cup", false),
            row(20, "salt", None, "", true),
            row(30, "flour", Some(2.0), "cup", false),
        ];
        let mut reversed = base.clone();
        reversed.reverse();
        let mut rotated = base.clone();
        rotated.rotate_left(2);

        let expected = generate_shopping_list(&base, &[10, 20, 30]);
        assert_eq!(generate_shopping_list(&reversed, &[10, 20, 30]), expected);
        assert_eq!(generate_shopping_list(&rotated, &[10, 20, 30]), expected);
        assert_eq!(expected.regular[0].text, "3.75 cup flour");
    }

    #[test]
    fn test_missing_amount_counts_as_zero() {
        let rows = filter_rows(
            &[
                row(10, "flour", None, "cup", false),
                row(20, "flour", Some(2.0), "cup", false),
            ],
            &[10, 20],
        );
        let entries = consolidate(&rows);
        assert_eq!(entries.len(), 1);
        assert!((entries[0].amount - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sources_dedup_and_sort() {
        // Sorted, duplicate-free indices across staple flags.
        let rows = filter_rows(
            &[
                row(30, "flour", Some(1.0), "cup", false),
                row(10, "flour", Some(1.0), "cup", false),
                row(10, "flour", Some(0.5), "cup", false),
                row(20, "flour", Some(1.0), "cup", true),
            ],
            &[10, 20, 30],
        );
        let sources = track_sources(&rows);
        assert_eq!(
            sources[&("flour".to_string(), "cup".to_string())],
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_partition_by_staple_flag() {
        // Every entry lands in exactly one bucket.
        let rows = vec![
            row(10, "flour", Some(1.0), "cup", false),
            row(10, "salt", Some(0.5), "tsp", true),
            row(10, "oil", None, "", true),
        ];
        let list = generate_shopping_list(&rows, &[10]);
        assert_eq!(list.regular.len(), 1);
        assert_eq!(list.staples.len(), 2);
        assert_eq!(list.regular[0].text, "1 cup flour");
    }

    #[test]
    fn test_deterministic_output() {
        // Two invocations on identical inputs are identical.
        let rows = vec![
            row(10, "zucchini", Some(2.0), "count", false),
            row(20, "apple", Some(3.0), "count", false),
            row(10, "salt", None, "", true),
        ];
        let a = generate_shopping_list(&rows, &[10, 20]);
        let b = generate_shopping_list(&rows, &[10, 20]);
        assert_eq!(a, b);
        // Consolidator order: regular entries by ingredient name.
        assert_eq!(a.regular[0].text, "3 apple");
        assert_eq!(a.regular[1].text, "2 zucchini");
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(format_entry(2.0, "cup", "flour"), "2 cup flour");
        assert_eq!(format_entry(0.0, "cup", "flour"), "flour");
        assert_eq!(format_entry(1.5, "", "salt"), "1.5 salt");
        assert_eq!(format_entry(3.0, "count", "eggs"), "3 eggs");
    }

    #[test]
    fn test_format_entry_whitespace_collapsed() {
        assert_eq!(format_entry(2.0, "  cup ", "flour"), "2 cup flour");
        assert_eq!(format_entry(1.0, "   ", "bay  leaf"), "1 bay leaf");
    }

    #[test]
    fn test_two_recipes_share_flour() {
        let rows = vec![
            row(10, "flour", Some(1.0), "cup", false),
            row(20, "flour", Some(1.0), "cup", false),
        ];
        let list = generate_shopping_list(&rows, &[10, 20]);
        assert_eq!(list.regular.len(), 1);
        assert_eq!(list.regular[0].text, "2 cup flour");
        assert_eq!(list.regular[0].sources, vec![1, 2]);
        assert!(list.staples.is_empty());
    }

    #[test]
    fn test_staple_from_one_recipe() {
        let rows = vec![
            row(10, "salt", Some(0.5), "", true),
            row(20, "rice", Some(1.0), "cup", false),
        ];
        let list = generate_shopping_list(&rows, &[10, 20]);
        assert_eq!(list.staples.len(), 1);
        assert_eq!(list.staples[0].text, "0.5 salt");
        assert_eq!(list.staples[0].sources, vec![1]);
        assert_eq!(list.regular.len(), 1);
    }

    #[test]
    fn test_empty_selection_yields_empty_list() {
        let rows = vec![row(10, "flour", Some(1.0), "cup", false)];
        let list = generate_shopping_list(&rows, &[]);
        assert!(list.regular.is_empty());
        assert!(list.staples.is_empty());
    }

    #[test]
    fn test_unselected_recipe_contributes_nothing() {
        let rows = vec![row(10, "flour", Some(1.0), "cup", false)];
        let list = generate_shopping_list(&rows, &[99]);
        assert!(list.regular.is_empty());
        assert!(list.staples.is_empty());
    }

    #[test]
    fn test_same_pair_in_both_buckets_shares_sources() {
        // The source map keys by (ingredient, unit) only, so the regular and
        // staple entries for the same pair report the union of recipes.
        let rows = vec![
            row(10, "olive oil", Some(2.0), "tbsp", false),
            row(20, "olive oil", Some(1.0), "tbsp", true),
        ];
        let list = generate_shopping_list(&rows, &[10, 20]);
        assert_eq!(list.regular.len(), 1);
        assert_eq!(list.staples.len(), 1);
        assert_eq!(list.regular[0].sources, vec![1, 2]);
        assert_eq!(list.staples[0].sources, vec![1, 2]);
        assert_eq!(list.regular[0].text, "2 tbsp olive oil");
        assert_eq!(list.staples[0].text, "1 tbsp olive oil");
    }

    #[test]
    fn test_duplicate_rows_within_one_recipe_sum() {
        let rows = vec![
            row(10, "butter", Some(1.0), "tbsp", false),
            row(10, "butter", Some(2.0), "tbsp", false),
        ];
        let list = generate_shopping_list(&rows, &[10]);
        assert_eq!(list.regular.len(), 1);
        assert_eq!(list.regular[0].text, "3 tbsp butter");
        assert_eq!(list.regular[0].sources, vec![1]);
    }

    #[test]
    fn test_all_amounts_missing_renders_name_only() {
        let rows = vec![
            row(10, "parsley", None, "", false),
            row(20, "parsley", None, "", false),
        ];
        let list = generate_shopping_list(&rows, &[10, 20]);
        assert_eq!(list.regular[0].text, "parsley");
        assert_eq!(list.regular[0].sources, vec![1, 2]);
    }

    #[test]
    fn test_different_units_stay_separate() {
        // No unit conversion: cups and grams of the same ingredient are
        // distinct line items.
        let rows = vec![
            row(10, "flour", Some(1.0), "cup", false),
            row(20, "flour", Some(200.0), "g", false),
        ];
        let list = generate_shopping_list(&rows, &[10, 20]);
        assert_eq!(list.regular.len(), 2);
        assert_eq!(list.regular[0].text, "1 cup flour");
        assert_eq!(list.regular[1].text, "200 g flour");
        assert_eq!(list.regular[0].sources, vec![1]);
        assert_eq!(list.regular[1].sources, vec![2]);
    }
}
