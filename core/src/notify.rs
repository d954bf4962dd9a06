//! Plain-text and HTML rendering of a weekly plan for delivery.

use std::fmt::Write;

use crate::models::{ShoppingListItem, WeeklyPlan};

/// Render one shopping list line, appending the bracketed recipe indices
/// when the item has sources, e.g. `"2 cup flour [1, 3]"`.
#[must_use]
pub fn render_item(item: &ShoppingListItem) -> String {
    if item.sources.is_empty() {
        return item.text.clone();
    }
    let indices = item
        .sources
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} [{}]", item.text, indices)
}

#[must_use]
pub fn plan_subject(plan: &WeeklyPlan) -> String {
    let date = &plan.date;
    format!("Weekly Meal Plan - {date}")
}

#[must_use]
pub fn render_plan_text(plan: &WeeklyPlan) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", plan_subject(plan));

    let _ = writeln!(text, "\nThis Week's Recipes:");
    for (i, recipe) in plan.recipes.iter().enumerate() {
        let n = i + 1;
        let name = &recipe.name;
        match &recipe.link {
            Some(link) => {
                let _ = writeln!(text, "{n}. {name}: {link}");
            }
            None => {
                let _ = writeln!(text, "{n}. {name}");
            }
        }
    }

    let _ = writeln!(text, "\nShopping List:");
    if !plan.shopping_list.regular.is_empty() {
        let _ = writeln!(text, "\nItems to Buy:");
        for item in &plan.shopping_list.regular {
            let _ = writeln!(text, "- {}", render_item(item));
        }
    }
    if !plan.shopping_list.staples.is_empty() {
        let _ = writeln!(text, "\nStaple Items (Check if needed):");
        for item in &plan.shopping_list.staples {
            let _ = writeln!(text, "- {}", render_item(item));
        }
    }

    text.push_str("\nBon appétit!\n");
    text
}

#[must_use]
pub fn render_plan_html(plan: &WeeklyPlan) -> String {
    let mut html = String::new();
    html.push_str("<html><body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(&plan_subject(plan)));

    html.push_str("<h2>This Week's Recipes:</h2>\n<ol>\n");
    for recipe in &plan.recipes {
        let name = escape(&recipe.name);
        match &recipe.link {
            Some(link) => {
                let href = escape(link);
                let _ = writeln!(html, "<li><a href=\"{href}\">{name}</a></li>");
            }
            None => {
                let _ = writeln!(html, "<li>{name}</li>");
            }
        }
    }
    html.push_str("</ol>\n");

    html.push_str("<h2>Shopping List:</h2>\n");
    if !plan.shopping_list.regular.is_empty() {
        html.push_str("<h3>Items to Buy:</h3>\n<ul>\n");
        for item in &plan.shopping_list.regular {
            let _ = writeln!(html, "<li>{}</li>", escape(&render_item(item)));
        }
        html.push_str("</ul>\n");
    }
    if !plan.shopping_list.staples.is_empty() {
        html.push_str("<h3>Staple Items (Check if needed):</h3>\n<ul>\n");
        for item in &plan.shopping_list.staples {
            let _ = writeln!(html, "<li>{}</li>", escape(&render_item(item)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<p>Bon appétit!</p>\n</body></html>\n");
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
