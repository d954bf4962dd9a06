use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};

use crate::models::{
    HistoryEntry, IngredientRow, NewIngredient, NewRecipe, PlannerSettings, Recipe,
    validate_ingredient_data, validate_recipe_data,
};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS recipes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    link TEXT,
                    tags TEXT,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS ingredients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                    ingredient TEXT NOT NULL,
                    amount REAL,
                    unit TEXT NOT NULL DEFAULT '',
                    is_staple INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS history (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    recipe_id INTEGER NOT NULL,
                    date_selected TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS settings (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipe_id);
                CREATE INDEX IF NOT EXISTS idx_recipes_name ON recipes(name);
                CREATE INDEX IF NOT EXISTS idx_history_date ON history(date_selected);

                PRAGMA user_version = 1;",
            )?;
        }

        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    fn recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get(0)?,
            name: row.get(1)?,
            link: row.get(2)?,
            tags: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn ingredient_from_row(row: &rusqlite::Row) -> rusqlite::Result<IngredientRow> {
        Ok(IngredientRow {
            id: row.get(0)?,
            recipe_id: row.get(1)?,
            ingredient: row.get(2)?,
            amount: row.get(3)?,
            unit: row.get(4)?,
            is_staple: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    // --- Recipes ---

    pub fn insert_recipe(&self, recipe: &NewRecipe) -> Result<Recipe> {
        validate_recipe_data(&recipe.name)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO recipes (name, link, tags, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![recipe.name, recipe.link, recipe.tags, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_recipe(id)
    }

    /// Insert a recipe under a caller-supplied id, updating the existing row
    /// if the id is already taken. Used by CSV import, where ingredient rows
    /// reference recipe ids from the source sheet.
    pub fn upsert_recipe_with_id(&self, id: i64, recipe: &NewRecipe) -> Result<Recipe> {
        validate_recipe_data(&recipe.name)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO recipes (id, name, link, tags, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, link = excluded.link, tags = excluded.tags",
            params![id, recipe.name, recipe.link, recipe.tags, now],
        )?;
        self.get_recipe(id)
    }

    pub fn get_recipe(&self, id: i64) -> Result<Recipe> {
        self.conn
            .query_row(
                "SELECT id, name, link, tags, created_at FROM recipes WHERE id = ?1",
                params![id],
                Self::recipe_from_row,
            )
            .context("Recipe not found")
    }

    pub fn get_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, link, tags, created_at FROM recipes WHERE name = ?1 COLLATE NOCASE",
        )?;
        let mut rows = stmt.query(params![name])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::recipe_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, link, tags, created_at FROM recipes ORDER BY id")?;
        let recipes = stmt
            .query_map([], Self::recipe_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    pub fn recipe_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM recipes WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn delete_recipe(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // --- Ingredients ---

    pub fn add_ingredient(&self, ingredient: &NewIngredient) -> Result<IngredientRow> {
        validate_ingredient_data(&ingredient.ingredient, ingredient.amount)?;
        // Referential check up front for a readable error
        self.get_recipe(ingredient.recipe_id)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO ingredients (recipe_id, ingredient, amount, unit, is_staple, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                ingredient.recipe_id,
                ingredient.ingredient,
                ingredient.amount,
                ingredient.unit,
                ingredient.is_staple,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_ingredient(id)
    }

    pub fn get_ingredient(&self, id: i64) -> Result<IngredientRow> {
        self.conn
            .query_row(
                "SELECT id, recipe_id, ingredient, amount, unit, is_staple, created_at
                 FROM ingredients WHERE id = ?1",
                params![id],
                Self::ingredient_from_row,
            )
            .context("Ingredient not found")
    }

    /// The full ingredient table, in insertion order. The shopping core
    /// takes this as its in-memory input.
    pub fn list_ingredients(&self) -> Result<Vec<IngredientRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recipe_id, ingredient, amount, unit, is_staple, created_at
             FROM ingredients ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], Self::ingredient_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn list_ingredients_for(&self, recipe_id: i64) -> Result<Vec<IngredientRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, recipe_id, ingredient, amount, unit, is_staple, created_at
             FROM ingredients WHERE recipe_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![recipe_id], Self::ingredient_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn delete_ingredient(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM ingredients WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // --- History ---

    /// Append one history row per selected recipe for the given date.
    pub fn record_selection(&self, recipe_ids: &[i64], date: NaiveDate) -> Result<()> {
        let date_str = date.format("%Y-%m-%d").to_string();
        for id in recipe_ids {
            self.conn.execute(
                "INSERT INTO history (recipe_id, date_selected) VALUES (?1, ?2)",
                params![id, date_str],
            )?;
        }
        Ok(())
    }

    /// Recipe ids selected strictly after the cutoff date.
    pub fn recent_recipe_ids(&self, cutoff: NaiveDate) -> Result<HashSet<i64>> {
        let cutoff_str = cutoff.format("%Y-%m-%d").to_string();
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT recipe_id FROM history WHERE date_selected > ?1")?;
        let ids = stmt
            .query_map(params![cutoff_str], |row| row.get(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(ids)
    }

    pub fn list_history(&self, days: Option<i64>) -> Result<Vec<HistoryEntry>> {
        let entry_from_row = |row: &rusqlite::Row| -> rusqlite::Result<HistoryEntry> {
            Ok(HistoryEntry {
                id: row.get(0)?,
                recipe_id: row.get(1)?,
                date_selected: row.get(2)?,
                recipe_name: row.get(3)?,
            })
        };
        let sql = "SELECT h.id, h.recipe_id, h.date_selected, r.name
                   FROM history h
                   LEFT JOIN recipes r ON h.recipe_id = r.id
                   WHERE h.date_selected >= ?1
                   ORDER BY h.date_selected DESC, h.id DESC";
        let cutoff = match days {
            Some(d) => (Local::now().date_naive() - chrono::Duration::days(d))
                .format("%Y-%m-%d")
                .to_string(),
            None => String::new(),
        };
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt
            .query_map(params![cutoff], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn clear_history(&self) -> Result<usize> {
        let rows = self.conn.execute("DELETE FROM history", [])?;
        Ok(rows)
    }

    // --- Settings ---

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn delete_setting(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(rows > 0)
    }

    /// Planner settings with defaults for anything unset. Malformed stored
    /// values fall back to the default rather than failing the command.
    pub fn load_settings(&self) -> Result<PlannerSettings> {
        let defaults = PlannerSettings::default();
        let recipes_per_week = self
            .get_setting("recipes_per_week")?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.recipes_per_week);
        let repeat_window_days = self
            .get_setting("repeat_window_days")?
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.repeat_window_days);
        let webhook_url = self.get_setting("webhook_url")?.filter(|v| !v.is_empty());
        Ok(PlannerSettings {
            recipes_per_week,
            repeat_window_days,
            webhook_url,
        })
    }

    pub fn save_settings(&self, settings: &PlannerSettings) -> Result<()> {
        self.set_setting("recipes_per_week", &settings.recipes_per_week.to_string())?;
        self.set_setting(
            "repeat_window_days",
            &settings.repeat_window_days.to_string(),
        )?;
        match &settings.webhook_url {
            Some(url) => self.set_setting("webhook_url", url)?,
            None => {
                self.delete_setting("webhook_url")?;
            }
        }
        Ok(())
    }
}
