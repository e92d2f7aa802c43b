use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::effect::{CookEffect, Effect};
use crate::error::{Error, Result};
use crate::locale::LocaleDict;
use crate::material::Material;
use crate::recipe::Recipe;

/// Named constants and rate tables from `SystemData.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemData {
    pub fail_actor_name: String,
    pub fairy_actor_name: String,
    pub enemy_extract_actor_name: String,
    // The game hard-codes the rock-hard result; newer table dumps carry it.
    #[serde(default = "default_rock_hard_actor")]
    pub rock_hard_actor_name: String,
    pub life_recover_rate: f32,
    pub subtle_life_recover_rate: f32,
    pub subtle_life_recover: i32,
    pub fail_life_recover: i32,
    pub super_success_add_effective_time: i32,
    pub price_rate_list: Vec<PriceRate>,
    pub super_success_rate_list: Vec<SuperSuccessRate>,
}

fn default_rock_hard_actor() -> String {
    "Item_Cook_O_02".to_string()
}

/// Sell-price multiplier by ingredient count.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceRate {
    pub material_num: usize,
    pub rate: f32,
}

/// Critical-rate bonus by count of distinct ingredients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SuperSuccessRate {
    pub material_type_num: usize,
    pub rate: i32,
}

/// Raw JSON for the seven tables, before deserialisation. Callers that do
/// not read from disk (tests, embedders) feed strings straight in.
pub struct CatalogSource<'a> {
    pub system: &'a str,
    pub materials: &'a str,
    pub effects: &'a str,
    pub recipes: &'a str,
    pub single_recipes: &'a str,
    pub recipe_cards: &'a str,
    pub language: &'a str,
}

/// Every table the simulator reads, loaded once and immutable afterwards.
#[derive(Debug)]
pub struct Catalog {
    pub system: SystemData,
    pub materials: HashMap<String, Material>,
    /// File order preserved; effect resolution iterates this in order.
    pub effects: Vec<Effect>,
    pub recipes: Vec<Recipe>,
    pub single_recipes: Vec<Recipe>,
    pub recipe_cards: Vec<String>,
    pub locale: LocaleDict,
    material_names: HashMap<String, String>,
    effect_index: HashMap<CookEffect, usize>,
    life_recover_index: usize,
}

impl Catalog {
    /// Reads the seven `*.json` tables from a data directory.
    pub fn from_dir(dir: &Path) -> Result<Catalog> {
        let read = |name: &str| -> Result<String> {
            fs::read_to_string(dir.join(name))
                .map_err(|err| Error::InvalidCatalog(format!("{}: {}", name, err)))
        };
        let system = read("SystemData.json")?;
        let materials = read("MaterialData.json")?;
        let effects = read("EffectData.json")?;
        let recipes = read("RecipeData.json")?;
        let single_recipes = read("SingleRecipeData.json")?;
        let recipe_cards = read("RecipeCardData.json")?;
        let language = read("LanguageData.json")?;
        Catalog::from_json(CatalogSource {
            system: &system,
            materials: &materials,
            effects: &effects,
            recipes: &recipes,
            single_recipes: &single_recipes,
            recipe_cards: &recipe_cards,
            language: &language,
        })
    }

    pub fn from_json(source: CatalogSource) -> Result<Catalog> {
        let system: SystemData = parse("SystemData", source.system)?;
        let material_rows: Vec<Material> = parse("MaterialData", source.materials)?;
        let effects: Vec<Effect> = parse("EffectData", source.effects)?;
        let mut recipes: Vec<Recipe> = parse("RecipeData", source.recipes)?;
        let mut single_recipes: Vec<Recipe> = parse("SingleRecipeData", source.single_recipes)?;
        let recipe_cards: Vec<String> = parse("RecipeCardData", source.recipe_cards)?;
        let locale: LocaleDict = parse("LanguageData", source.language)?;

        for recipe in recipes.iter_mut().chain(single_recipes.iter_mut()) {
            recipe.compile_pattern();
        }

        let mut materials = HashMap::new();
        for material in material_rows {
            materials.insert(material.actor_name.clone(), material);
        }

        let mut effect_index = HashMap::new();
        for (index, effect) in effects.iter().enumerate() {
            effect_index.insert(effect.effect_type, index);
        }
        let life_recover_index = *effect_index.get(&CookEffect::LifeRecover).ok_or_else(|| {
            Error::InvalidCatalog("EffectData: missing the LifeRecover entry".to_string())
        })?;

        let material_names = locale.material_name_index();

        Ok(Catalog {
            system,
            materials,
            effects,
            recipes,
            single_recipes,
            recipe_cards,
            locale,
            material_names,
            effect_index,
            life_recover_index,
        })
    }

    /// Table entry for an effect, if the catalog carries one.
    pub fn effect(&self, kind: CookEffect) -> Option<&Effect> {
        self.effect_index.get(&kind).map(|&index| &self.effects[index])
    }

    /// The `LifeRecover` entry; its presence is checked at load.
    pub fn life_recover(&self) -> &Effect {
        &self.effects[self.life_recover_index]
    }

    /// Resolves an ingredient display name (any language) to its actor id.
    pub fn actor_for_name(&self, display_name: &str) -> Option<&str> {
        self.material_names.get(display_name).map(String::as_str)
    }
}

fn parse<T: DeserializeOwned>(table: &str, raw: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| Error::InvalidCatalog(format!("{}: {} (at {})", table, err.inner(), err.path())))
}
