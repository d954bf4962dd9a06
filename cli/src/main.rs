use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealplan_core::service::PlannerService;

mod commands;
mod config;
mod webhook;

use crate::commands::{
    PlanArgs, cmd_history_clear, cmd_history_show, cmd_import_ingredients, cmd_import_recipes,
    cmd_ingredient_add, cmd_ingredient_delete, cmd_ingredient_list, cmd_plan, cmd_recipe_add,
    cmd_recipe_delete, cmd_recipe_list, cmd_recipe_show, cmd_settings_set, cmd_settings_show,
    cmd_shopping,
};
use crate::config::Config;
use crate::webhook::WebhookNotifier;

#[derive(Parser)]
#[command(name = "mealplan", version, about = "Weekly meal planner with consolidated shopping lists")]
struct Cli {
    /// Path to the database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the week: pick recipes and build their shopping list
    Plan {
        /// Plan date (YYYY-MM-DD or 'today')
        #[arg(long)]
        date: Option<String>,
        /// Number of recipes to pick (overrides the configured default)
        #[arg(long)]
        count: Option<usize>,
        /// Seed for reproducible recipe selection
        #[arg(long)]
        seed: Option<u64>,
        /// Print the plan without recording it to history
        #[arg(long)]
        dry_run: bool,
        /// Skip webhook delivery
        #[arg(long)]
        no_notify: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shopping list for an explicit set of recipe ids
    Shopping {
        /// Recipe ids, in plan order
        #[arg(required = true)]
        recipe_ids: Vec<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Manage a recipe's ingredients
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Selection history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Import recipes or ingredients from CSV
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// Planner settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// Add a recipe
    Add {
        name: String,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List all recipes
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one recipe with its ingredients (by id or name)
    Show {
        recipe: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a recipe and its ingredients (by id or name)
    Delete {
        recipe: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum IngredientCommands {
    /// Add an ingredient to a recipe (by id or name)
    Add {
        recipe: String,
        name: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        /// Mark as a pantry staple
        #[arg(long)]
        staple: bool,
        #[arg(long)]
        json: bool,
    },
    /// List a recipe's ingredients (by id or name)
    List {
        recipe: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete an ingredient by id
    Delete {
        id: i64,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Show recent selections
    Show {
        /// Only show the last N days
        #[arg(long)]
        days: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Clear all selection history
    Clear {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ImportCommands {
    /// Import recipes from a CSV file (recipe_id,name,link,tags)
    Recipes {
        file: PathBuf,
        /// Parse and report without writing
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
    /// Import ingredients from a CSV file (recipe_id,ingredient,amount,unit,is_staple)
    Ingredients {
        file: PathBuf,
        /// Parse and report without writing
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Update settings
    Set {
        #[arg(long)]
        recipes_per_week: Option<usize>,
        #[arg(long)]
        repeat_window_days: Option<i64>,
        /// Webhook URL for plan delivery; pass an empty string to clear
        #[arg(long)]
        webhook_url: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let db_path = match cli.db {
        Some(path) => path,
        None => Config::load()?.db_path,
    };
    let service = PlannerService::new(&db_path)?;

    match cli.command {
        Commands::Plan {
            date,
            count,
            seed,
            dry_run,
            no_notify,
            json,
        } => {
            let notifier = WebhookNotifier::new()?;
            cmd_plan(
                &service,
                &notifier,
                PlanArgs {
                    date,
                    count,
                    seed,
                    dry_run,
                    no_notify,
                    json,
                },
            )
            .await
        }
        Commands::Shopping { recipe_ids, json } => cmd_shopping(&service, &recipe_ids, json),
        Commands::Recipe { command } => match command {
            RecipeCommands::Add {
                name,
                link,
                tags,
                json,
            } => cmd_recipe_add(&service, &name, link, tags, json),
            RecipeCommands::List { json } => cmd_recipe_list(&service, json),
            RecipeCommands::Show { recipe, json } => cmd_recipe_show(&service, &recipe, json),
            RecipeCommands::Delete { recipe, json } => cmd_recipe_delete(&service, &recipe, json),
        },
        Commands::Ingredient { command } => match command {
            IngredientCommands::Add {
                recipe,
                name,
                amount,
                unit,
                staple,
                json,
            } => cmd_ingredient_add(&service, &recipe, &name, amount, unit, staple, json),
            IngredientCommands::List { recipe, json } => {
                cmd_ingredient_list(&service, &recipe, json)
            }
            IngredientCommands::Delete { id, json } => cmd_ingredient_delete(&service, id, json),
        },
        Commands::History { command } => match command {
            HistoryCommands::Show { days, json } => cmd_history_show(&service, days, json),
            HistoryCommands::Clear { json } => cmd_history_clear(&service, json),
        },
        Commands::Import { command } => match command {
            ImportCommands::Recipes {
                file,
                dry_run,
                json,
            } => cmd_import_recipes(&service, &file, dry_run, json),
            ImportCommands::Ingredients {
                file,
                dry_run,
                json,
            } => cmd_import_ingredients(&service, &file, dry_run, json),
        },
        Commands::Settings { command } => match command {
            SettingsCommands::Show { json } => cmd_settings_show(&service, json),
            SettingsCommands::Set {
                recipes_per_week,
                repeat_window_days,
                webhook_url,
                json,
            } => cmd_settings_set(
                &service,
                recipes_per_week,
                repeat_window_days,
                webhook_url,
                json,
            ),
        },
    }
}
