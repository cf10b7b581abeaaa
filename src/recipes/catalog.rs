//! The fixed recipe catalog.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub nutrition: BTreeMap<String, u32>, // nutrient -> amount per serving
    pub prep_time: String,
    pub difficulty: Difficulty,
}

/// Ordered, non-empty list of recipes. Order is significant: it breaks score ties.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, DomainError> {
        if recipes.is_empty() {
            return Err(DomainError::invalid("recipe catalog is empty"));
        }
        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Case-insensitive lookup by recipe name.
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        let name = name.trim();
        self.recipes
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }
}

lazy_static! {
    static ref BUILTIN: Catalog =
        Catalog::new(builtin_recipes()).expect("builtin recipe list is non-empty");
}

/// Catalog compiled into the binary.
pub fn builtin() -> &'static Catalog {
    &BUILTIN
}

fn recipe(
    name: &str,
    ingredients: &[&str],
    instructions: &str,
    [calories, protein, fat, carbohydrates]: [u32; 4],
    prep_time: &str,
    difficulty: Difficulty,
) -> Recipe {
    let nutrition = [
        ("calories", calories),
        ("protein", protein),
        ("fat", fat),
        ("carbohydrates", carbohydrates),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    Recipe {
        name: name.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: instructions.to_string(),
        nutrition,
        prep_time: prep_time.to_string(),
        difficulty,
    }
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "Pasta Primavera",
            &["pasta", "vegetables", "olive oil", "garlic", "parmesan"],
            "1. Boil pasta according to package directions.\n2. Sauté vegetables in olive oil with garlic.\n3. Toss pasta with vegetables and top with parmesan.",
            [300, 10, 5, 50],
            "25 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Vegetable Stir Fry",
            &["vegetables", "soy sauce", "rice", "ginger", "garlic"],
            "1. Cook rice.\n2. Stir fry vegetables with ginger and garlic.\n3. Add soy sauce and serve over rice.",
            [250, 8, 3, 45],
            "20 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Chicken Caesar Salad",
            &["chicken breast", "romaine lettuce", "croutons", "caesar dressing", "parmesan"],
            "1. Grill chicken breast until cooked through.\n2. Chop romaine lettuce.\n3. Toss with croutons, Caesar dressing, and sliced chicken.\n4. Top with parmesan.",
            [350, 30, 15, 20],
            "30 mins",
            Difficulty::Medium,
        ),
        recipe(
            "Tomato Basil Soup",
            &["tomatoes", "basil", "cream", "vegetable broth", "onion"],
            "1. Sauté onions until soft.\n2. Add tomatoes and broth, simmer for 20 mins.\n3. Blend until smooth.\n4. Stir in cream and fresh basil.",
            [200, 5, 10, 20],
            "35 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Grilled Salmon",
            &["salmon fillet", "lemon", "garlic", "olive oil", "herbs"],
            "1. Marinate salmon with olive oil, garlic, and herbs.\n2. Grill for 4-5 minutes per side.\n3. Serve with lemon wedges.",
            [400, 35, 20, 5],
            "20 mins",
            Difficulty::Medium,
        ),
        recipe(
            "Veggie Wrap",
            &["tortilla", "hummus", "mixed vegetables", "spinach", "feta"],
            "1. Spread hummus on tortilla.\n2. Layer with spinach, mixed vegetables, and feta.\n3. Roll tightly and cut in half.",
            [300, 8, 10, 40],
            "10 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Quinoa Salad",
            &["quinoa", "cucumber", "tomatoes", "feta cheese", "olive oil", "lemon"],
            "1. Cook quinoa and let cool.\n2. Chop vegetables.\n3. Mix quinoa with vegetables, feta, olive oil, and lemon juice.",
            [350, 12, 15, 35],
            "25 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Banana Smoothie",
            &["banana", "milk", "honey", "ice", "vanilla"],
            "1. Combine all ingredients in blender.\n2. Blend until smooth and creamy.\n3. Serve immediately.",
            [200, 6, 2, 40],
            "5 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Turkey Sandwich",
            &["whole-grain bread", "turkey slices", "lettuce", "tomato", "mayonnaise", "cheese"],
            "1. Toast bread if desired.\n2. Layer turkey, lettuce, tomato, and cheese.\n3. Spread mayonnaise and close sandwich.",
            [320, 20, 10, 40],
            "10 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Lentil Soup",
            &["lentils", "carrots", "onion", "garlic", "vegetable broth", "cumin"],
            "1. Sauté onion, garlic, and carrots.\n2. Add lentils, broth, and cumin.\n3. Simmer until lentils are tender (30-40 mins).",
            [250, 12, 3, 40],
            "45 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Avocado Toast",
            &["whole-grain bread", "avocado", "lemon juice", "salt", "pepper"],
            "1. Toast bread until golden.\n2. Mash avocado with lemon juice, salt, and pepper.\n3. Spread generously on toast.",
            [250, 5, 15, 25],
            "5 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Berry Parfait",
            &["yogurt", "berries", "granola", "honey"],
            "1. Layer yogurt in a glass.\n2. Add berries and granola.\n3. Repeat layers and drizzle with honey.",
            [200, 8, 4, 30],
            "5 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Stuffed Bell Peppers",
            &["bell peppers", "rice", "ground beef", "tomato sauce", "cheese"],
            "1. Cook rice and brown ground beef.\n2. Mix with tomato sauce.\n3. Stuff peppers and bake at 375°F for 30 mins.\n4. Top with cheese and bake 5 more mins.",
            [400, 25, 15, 50],
            "50 mins",
            Difficulty::Medium,
        ),
        recipe(
            "Shrimp Tacos",
            &["shrimp", "tortillas", "cabbage", "lime", "cilantro", "avocado"],
            "1. Season and cook shrimp.\n2. Warm tortillas.\n3. Fill with shrimp, cabbage, and avocado.\n4. Top with cilantro and lime juice.",
            [300, 20, 10, 30],
            "20 mins",
            Difficulty::Medium,
        ),
        recipe(
            "Chickpea Salad",
            &["chickpeas", "cucumber", "tomatoes", "feta cheese", "olive oil", "lemon"],
            "1. Drain and rinse chickpeas.\n2. Chop vegetables.\n3. Mix all ingredients with olive oil and lemon juice.",
            [250, 10, 12, 30],
            "15 mins",
            Difficulty::Easy,
        ),
        recipe(
            "Beef Stir Fry",
            &["beef", "broccoli", "soy sauce", "rice", "ginger", "garlic"],
            "1. Cook rice.\n2. Stir fry beef with ginger and garlic.\n3. Add broccoli and soy sauce.\n4. Serve over rice.",
            [450, 30, 20, 40],
            "25 mins",
            Difficulty::Medium,
        ),
        recipe(
            "Mushroom Risotto",
            &["arborio rice", "mushrooms", "broth", "parmesan cheese", "white wine", "onion"],
            "1. Sauté onion and mushrooms.\n2. Add rice and toast lightly.\n3. Gradually add warm broth, stirring constantly.\n4. Finish with parmesan and white wine.",
            [350, 10, 8, 60],
            "40 mins",
            Difficulty::Hard,
        ),
    ]
}
