//! Scores catalog recipes against a set of ingredient names.

use serde::Serialize;

use super::catalog::{Catalog, Recipe};
use super::fuzzy::partial_ratio;

/// A pair counts as a hit when its partial ratio is strictly above this.
pub const MATCH_THRESHOLD: f64 = 80.0;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    pub match_count: usize,
}

fn lowered(names: &[impl AsRef<str>]) -> Vec<String> {
    names.iter().map(|n| n.as_ref().to_lowercase()).collect()
}

fn is_hit(a: &str, b: &str) -> bool {
    partial_ratio(a, b) > MATCH_THRESHOLD
}

/// Hits across the full (caller ingredient x recipe ingredient) cross product.
///
/// One caller name may hit several recipe ingredients and vice versa; every
/// hit is counted.
pub fn score(recipe: &Recipe, ingredient_names: &[impl AsRef<str>]) -> usize {
    let names = lowered(ingredient_names);
    let recipe_ings = lowered(recipe.ingredients.as_slice());
    names
        .iter()
        .map(|name| recipe_ings.iter().filter(|ing| is_hit(name, ing)).count())
        .sum()
}

/// Recipes with a nonzero score, best first, at most `limit` of them.
/// Equal scores keep catalog order.
pub fn rank<'a>(
    catalog: &'a Catalog,
    ingredient_names: &[impl AsRef<str>],
    limit: usize,
) -> Vec<MatchResult<'a>> {
    if ingredient_names.is_empty() || limit == 0 {
        return Vec::new();
    }
    let mut results: Vec<MatchResult<'a>> = catalog
        .recipes()
        .iter()
        .filter_map(|recipe| {
            let match_count = score(recipe, ingredient_names);
            (match_count > 0).then_some(MatchResult {
                recipe,
                match_count,
            })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    results.truncate(limit);
    results
}

/// Recipe ingredients hit by at least one caller ingredient, in recipe order.
pub fn matched_ingredients<'a>(
    recipe: &'a Recipe,
    ingredient_names: &[impl AsRef<str>],
) -> Vec<&'a str> {
    let names = lowered(ingredient_names);
    recipe
        .ingredients
        .iter()
        .filter(|ing| {
            let ing = ing.to_lowercase();
            names.iter().any(|name| is_hit(name, &ing))
        })
        .map(String::as_str)
        .collect()
}
