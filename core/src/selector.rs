//! Weekly recipe selection with repeat avoidance.
//!
//! Recipes chosen within the repeat window are excluded from the draw; when
//! that leaves fewer candidates than requested, the selector falls back to
//! the full pool and flags it so callers can warn.

use std::collections::HashSet;

use anyhow::{Result, bail};
use rand::Rng;
use rand::seq::index;

use crate::models::Recipe;

#[derive(Debug, Clone)]
pub struct Selection {
    pub recipes: Vec<Recipe>,
    pub pool_exhausted: bool,
}

/// Draw up to `count` recipes uniformly at random, preferring recipes not
/// in `recent_ids`. The random source is injected so tests (and the CLI's
/// `--seed` flag) can make the draw reproducible.
pub fn select_recipes<R: Rng + ?Sized>(
    recipes: &[Recipe],
    recent_ids: &HashSet<i64>,
    count: usize,
    rng: &mut R,
) -> Result<Selection> {
    if recipes.is_empty() {
        bail!("No recipes available. Add recipes first.");
    }

    let mut available: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| !recent_ids.contains(&r.id))
        .collect();

    let mut pool_exhausted = false;
    if available.len() < count {
        pool_exhausted = true;
        available = recipes.iter().collect();
    }

    let amount = count.min(available.len());
    let picked = index::sample(rng, available.len(), amount);
    let recipes = picked.iter().map(|i| available[i].clone()).collect();

    Ok(Selection {
        recipes,
        pool_exhausted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn recipe(id: i64, name: &str) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            link: None,
            tags: None,
            created_at: String::new(),
        }
    }

    fn pool() -> Vec<Recipe> {
        (1..=6).map(|i| recipe(i, &format!("recipe-{i}"))).collect()
    }

    #[test]
    fn test_select_empty_pool_errors() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_recipes(&[], &HashSet::new(), 3, &mut rng).is_err());
    }

    #[test]
    fn test_select_excludes_recent() {
        let mut rng = StdRng::seed_from_u64(1);
        let recent: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let selection = select_recipes(&pool(), &recent, 3, &mut rng).unwrap();
        assert_eq!(selection.recipes.len(), 3);
        assert!(!selection.pool_exhausted);
        assert!(selection.recipes.iter().all(|r| !recent.contains(&r.id)));
    }

    #[test]
    fn test_select_falls_back_when_pool_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let recent: HashSet<i64> = [1, 2, 3, 4, 5].into_iter().collect();
        let selection = select_recipes(&pool(), &recent, 3, &mut rng).unwrap();
        assert_eq!(selection.recipes.len(), 3);
        assert!(selection.pool_exhausted);
    }

    #[test]
    fn test_select_caps_at_pool_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let recipes = vec![recipe(1, "only")];
        let selection = select_recipes(&recipes, &HashSet::new(), 3, &mut rng).unwrap();
        assert_eq!(selection.recipes.len(), 1);
        assert!(selection.pool_exhausted);
        assert_eq!(selection.recipes[0].id, 1);
    }

    #[test]
    fn test_select_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let selection = select_recipes(&pool(), &HashSet::new(), 6, &mut rng).unwrap();
        let mut ids: Vec<i64> = selection.recipes.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_select_is_deterministic_with_seeded_rng() {
        let a = select_recipes(&pool(), &HashSet::new(), 3, &mut StdRng::seed_from_u64(42))
            .unwrap()
            .recipes
            .iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        let b = select_recipes(&pool(), &HashSet::new(), 3, &mut StdRng::seed_from_u64(42))
            .unwrap()
            .recipes
            .iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        assert_eq!(a, b);
    }
}
