use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::material::{CookTag, Material};

/// Result of a cooking attempt no recipe claims, and the replacement when an
/// elixir loses its effect to a conflict.
pub static FAILURE_RECIPE: Lazy<Recipe> = Lazy::new(|| {
    let mut recipe = Recipe {
        result_actor_name: "Item_Cook_O_01".to_string(),
        picture_book_num: 145,
        recipe: "CookEnemy or CookInsect".to_string(),
        bonus_time: 0,
        bonus_heart: 0,
        pattern: Pattern::default(),
    };
    recipe.compile_pattern();
    recipe
});

/// One row of `RecipeData.json` or `SingleRecipeData.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Recipe {
    pub result_actor_name: String,
    pub picture_book_num: i32,
    #[serde(rename = "Recipe")]
    pub recipe: String,
    #[serde(default)]
    pub bonus_time: i32,
    #[serde(default)]
    pub bonus_heart: i32,
    #[serde(skip)]
    pub pattern: Pattern,
}

impl Recipe {
    /// Parses the `Recipe` string once so matching never re-splits it.
    pub fn compile_pattern(&mut self) {
        self.pattern = Pattern::parse(&self.recipe);
    }
}

/// A recipe pattern is an AND of ORs: ` + ` joins parts that must each be
/// satisfied by a distinct ingredient, ` or ` lists the alternatives within a
/// part. Single-recipe patterns are a bare OR list.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    parts: Vec<Vec<String>>,
}

impl Pattern {
    pub fn parse(source: &str) -> Pattern {
        Pattern {
            parts: source
                .split(" + ")
                .map(|part| part.split(" or ").map(str::to_string).collect())
                .collect(),
        }
    }

    pub fn and_parts(&self) -> &[Vec<String>] {
        &self.parts
    }
}

/// A literal matches an ingredient through either its actor id or its tag.
fn literal_matches(literal: &str, actor: &str, tag: CookTag) -> bool {
    literal == actor || literal == tag.as_ref()
}

/// The unique (actor, tag) pairs of the pot contents, first-seen order.
/// Duplicated ingredients collapse to one pair for matching purposes.
pub fn unique_pairs(materials: &[Material]) -> Vec<(&str, CookTag)> {
    let mut pairs: Vec<(&str, CookTag)> = Vec::new();
    for material in materials {
        let pair = (material.actor_name.as_str(), material.cook_tag);
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }
    pairs
}

// Every AND part must consume a distinct pair: scan the remaining pool in
// order and take the first pair any OR literal matches.
fn satisfies(recipe: &Recipe, pairs: &[(&str, CookTag)]) -> bool {
    if recipe.pattern.and_parts().len() > pairs.len() {
        return false;
    }
    let mut pool = pairs.to_vec();
    for part in recipe.pattern.and_parts() {
        let claimed = pool
            .iter()
            .position(|&(actor, tag)| part.iter().any(|lit| literal_matches(lit, actor, tag)));
        match claimed {
            Some(index) => {
                pool.remove(index);
            }
            None => return false,
        }
    }
    true
}

// Single recipes are matched against one pair through their OR list alone.
fn single_matches(recipe: &Recipe, pair: (&str, CookTag)) -> bool {
    match recipe.pattern.and_parts().first() {
        Some(part) => part.iter().any(|lit| literal_matches(lit, pair.0, pair.1)),
        None => false,
    }
}

/// Resolves the recipe for a pot load. Table order is authoritative: the
/// first satisfied row wins. A lone unique ingredient consults the single
/// table; otherwise the normal table is scanned, and if nothing matched but a
/// spice is present the single table is retried against the first pair only
/// (the game ignores the rest of the pot in that pass). Anything else is the
/// failure recipe.
pub fn select_recipe(
    materials: &[Material],
    recipes: &[Recipe],
    single_recipes: &[Recipe],
    fail_actor: &str,
) -> Recipe {
    let pairs = unique_pairs(materials);
    let mut resolved = FAILURE_RECIPE.clone();

    if pairs.len() == 1 {
        for recipe in single_recipes {
            if recipe.result_actor_name == fail_actor {
                resolved = recipe.clone();
            }
            if single_matches(recipe, pairs[0]) {
                return recipe.clone();
            }
        }
        return resolved;
    }

    for recipe in recipes {
        if recipe.result_actor_name == fail_actor {
            resolved = recipe.clone();
        }
        if satisfies(recipe, &pairs) {
            return recipe.clone();
        }
    }

    if pairs.iter().any(|&(_, tag)| tag == CookTag::CookSpice) {
        for recipe in single_recipes {
            if recipe.result_actor_name == fail_actor {
                resolved = recipe.clone();
            }
            if single_matches(recipe, pairs[0]) {
                return recipe.clone();
            }
        }
    }

    resolved
}
