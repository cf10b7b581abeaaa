use serde::Serialize;

use super::catalog::{Catalog, Recipe};
use super::matcher;

/// A ranked recipe annotated with which of its ingredients the caller has.
#[derive(Debug, Serialize)]
pub struct Suggestion<'a> {
    #[serde(flatten)]
    pub recipe: &'a Recipe,
    pub match_count: usize,
    pub matched_ingredients: Vec<&'a str>,
}

pub fn suggest<'a>(
    catalog: &'a Catalog,
    ingredient_names: &[String],
    limit: usize,
) -> Vec<Suggestion<'a>> {
    matcher::rank(catalog, ingredient_names, limit)
        .into_iter()
        .map(|m| Suggestion {
            recipe: m.recipe,
            match_count: m.match_count,
            matched_ingredients: matcher::matched_ingredients(m.recipe, ingredient_names),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::catalog::builtin;

    #[test]
    fn suggestions_carry_matched_ingredients() {
        let names = vec!["Garlic".to_string(), "olive oil".to_string()];
        let out = suggest(builtin(), &names, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].recipe.name, "Pasta Primavera");
        assert_eq!(out[0].match_count, 2);
        assert_eq!(out[0].matched_ingredients, vec!["olive oil", "garlic"]);

        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["name"], "Pasta Primavera");
        assert_eq!(json["difficulty"], "Easy");
        assert_eq!(json["nutrition"]["calories"], 300);
    }

    #[test]
    fn nothing_in_nothing_out() {
        assert!(suggest(builtin(), &[], 10).is_empty());
    }
}
