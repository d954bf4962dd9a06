use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;

use crate::db::Database;
use crate::models::{
    HistoryEntry, IngredientRow, NewIngredient, NewRecipe, PlannerSettings, Recipe, ShoppingList,
    WeeklyPlan,
};
use crate::selector;
use crate::shopping;

/// Facade over the database and the planning logic. One instance per
/// invocation; every method is synchronous.
pub struct PlannerService {
    db: Database,
}

impl PlannerService {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    // --- Planning ---

    /// Build the plan for the week of `date`: draw recipes outside the
    /// repeat window, then generate their consolidated shopping list.
    /// Nothing is written; call `record_plan` once the plan is accepted.
    pub fn plan_week<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        count_override: Option<usize>,
        rng: &mut R,
    ) -> Result<WeeklyPlan> {
        let settings = self.db.load_settings()?;
        let count = count_override.unwrap_or(settings.recipes_per_week);

        let cutoff = date - chrono::Duration::days(settings.repeat_window_days);
        let recent = self.db.recent_recipe_ids(cutoff)?;
        let all = self.db.list_recipes()?;
        let selection = selector::select_recipes(&all, &recent, count, rng)?;

        let recipe_ids: Vec<i64> = selection.recipes.iter().map(|r| r.id).collect();
        let rows = self.db.list_ingredients()?;
        let shopping_list = shopping::generate_shopping_list(&rows, &recipe_ids);

        Ok(WeeklyPlan {
            date: date.format("%Y-%m-%d").to_string(),
            recipes: selection.recipes,
            shopping_list,
            pool_exhausted: selection.pool_exhausted,
        })
    }

    /// Record an accepted plan's recipes in the selection history.
    pub fn record_plan(&self, plan: &WeeklyPlan) -> Result<()> {
        let date = NaiveDate::parse_from_str(&plan.date, "%Y-%m-%d")?;
        let recipe_ids: Vec<i64> = plan.recipes.iter().map(|r| r.id).collect();
        self.db.record_selection(&recipe_ids, date)
    }

    /// Shopping list for an explicit recipe sequence, bypassing selection.
    pub fn shopping_list_for(&self, recipe_ids: &[i64]) -> Result<ShoppingList> {
        let rows = self.db.list_ingredients()?;
        Ok(shopping::generate_shopping_list(&rows, recipe_ids))
    }

    // --- Recipes ---

    pub fn add_recipe(&self, recipe: &NewRecipe) -> Result<Recipe> {
        self.db.insert_recipe(recipe)
    }

    pub fn get_recipe(&self, id: i64) -> Result<Recipe> {
        self.db.get_recipe(id)
    }

    pub fn get_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        self.db.get_recipe_by_name(name)
    }

    pub fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.db.list_recipes()
    }

    pub fn delete_recipe(&self, id: i64) -> Result<bool> {
        self.db.delete_recipe(id)
    }

    // --- Ingredients ---

    pub fn add_ingredient(&self, ingredient: &NewIngredient) -> Result<IngredientRow> {
        self.db.add_ingredient(ingredient)
    }

    pub fn list_ingredients_for(&self, recipe_id: i64) -> Result<Vec<IngredientRow>> {
        self.db.list_ingredients_for(recipe_id)
    }

    pub fn delete_ingredient(&self, id: i64) -> Result<bool> {
        self.db.delete_ingredient(id)
    }

    // --- History ---

    pub fn list_history(&self, days: Option<i64>) -> Result<Vec<HistoryEntry>> {
        self.db.list_history(days)
    }

    pub fn clear_history(&self) -> Result<usize> {
        self.db.clear_history()
    }

    // --- Settings ---

    pub fn settings(&self) -> Result<PlannerSettings> {
        self.db.load_settings()
    }

    pub fn save_settings(&self, settings: &PlannerSettings) -> Result<()> {
        self.db.save_settings(settings)
    }

    // --- Import ---

    pub fn db(&self) -> &Database {
        &self.db
    }
}
