use crate::catalog::{Catalog, CatalogSource};
use crate::cook::{
    base_effect, base_health, clamp_level, finish, plan_critical, plan_monster_extract, CookState,
    CriticalMode, ExtractMode, MonsterExtract,
};
use crate::effect::CookEffect;
use crate::error::Error;
use crate::material::Material;
use crate::recipe::{select_recipe, Pattern, Recipe};
use crate::report::{hearts, mmss};

fn fixture() -> Catalog {
    Catalog::from_json(CatalogSource {
        system: include_str!("../data/SystemData.json"),
        materials: include_str!("../data/MaterialData.json"),
        effects: include_str!("../data/EffectData.json"),
        recipes: include_str!("../data/RecipeData.json"),
        single_recipes: include_str!("../data/SingleRecipeData.json"),
        recipe_cards: include_str!("../data/RecipeCardData.json"),
        language: include_str!("../data/LanguageData.json"),
    })
    .unwrap()
}

trait MockMaterial {
    fn mock(actor: &str, tag: &str) -> Self;
}
impl MockMaterial for Material {
    fn mock(actor: &str, tag: &str) -> Self {
        serde_json::from_str(
            format!(
                "{{
                    \"ActorName\": \"{}\",
                    \"CookTag\": \"{}\"
                }}",
                actor, tag
            )
            .as_str(),
        )
        .unwrap()
    }
}

trait MockRecipe {
    fn mock(result: &str, number: i32, pattern: &str) -> Self;
}
impl MockRecipe for Recipe {
    fn mock(result: &str, number: i32, pattern: &str) -> Self {
        let mut recipe: Recipe = serde_json::from_str(
            format!(
                "{{
                    \"ResultActorName\": \"{}\",
                    \"PictureBookNum\": {},
                    \"Recipe\": \"{}\"
                }}",
                result, number, pattern
            )
            .as_str(),
        )
        .unwrap();
        recipe.compile_pattern();
        recipe
    }
}

#[test]
fn pattern_splits_and_parts_before_or_parts() {
    let pattern = Pattern::parse("CookMeat or CookFish + CookMushroom");
    assert_eq!(
        pattern.and_parts(),
        &[
            vec!["CookMeat".to_string(), "CookFish".to_string()],
            vec!["CookMushroom".to_string()],
        ]
    );
}

#[test]
fn matching_consumes_one_pair_per_and_part() {
    let recipes = vec![Recipe::mock("Meal_A", 1, "CookFruit + CookFruit")];
    let apple = Material::mock("Apple", "CookFruit");
    let berry = Material::mock("Berry", "CookFruit");
    let meat = Material::mock("Meat", "CookMeat");

    let two_fruits = select_recipe(&[apple.clone(), berry], &recipes, &[], "Fail");
    assert_eq!(two_fruits.result_actor_name, "Meal_A");

    // The lone fruit pair cannot satisfy both AND parts.
    let one_fruit = select_recipe(&[apple, meat], &recipes, &[], "Fail");
    assert_eq!(one_fruit.result_actor_name, "Item_Cook_O_01");
}

#[test]
fn duplicate_ingredients_collapse_to_the_single_table() {
    let singles = vec![
        Recipe::mock("Meal_Named", 2, "Apple"),
        Recipe::mock("Meal_Tagged", 3, "CookFruit"),
    ];
    let apple = Material::mock("Apple", "CookFruit");

    let chosen = select_recipe(&[apple.clone(), apple], &[], &singles, "Fail");
    assert_eq!(chosen.result_actor_name, "Meal_Named");
}

#[test]
fn spice_retry_only_considers_the_first_pair() {
    let singles = vec![Recipe::mock("Meal_Meat", 3, "CookMeat")];
    let butter = Material::mock("Butter", "CookSpice");
    let meat = Material::mock("Meat", "CookMeat");

    let hit = select_recipe(&[meat.clone(), butter.clone()], &[], &singles, "Fail");
    assert_eq!(hit.result_actor_name, "Meal_Meat");

    // With the spice in the first slot the retry sees only the spice.
    let miss = select_recipe(&[butter, meat], &[], &singles, "Fail");
    assert_eq!(miss.result_actor_name, "Item_Cook_O_01");
}

#[test]
fn monster_parts_extend_the_committed_effect_duration() {
    let catalog = fixture();
    let chill = catalog.materials["Item_Mushroom_E"].clone();
    let guts = catalog.materials["Item_Enemy_05"].clone();
    let recipe = select_recipe(
        &[chill.clone(), guts.clone()],
        &catalog.recipes,
        &catalog.single_recipes,
        &catalog.system.fail_actor_name,
    );

    let mut state = CookState::new(vec![chill, guts], recipe);
    base_health(&mut state, &catalog);
    base_effect(&mut state, &catalog);

    assert_eq!(state.effect, Some(CookEffect::ResistHot));
    // 80s from the guts, 30s per ingredient, 120s base time.
    assert_eq!(state.effect_time, 260);
}

#[test]
fn conflicting_effects_cancel_and_fail_an_elixir() {
    let catalog = fixture();
    let chill = catalog.materials["Item_Mushroom_E"].clone();
    let sun = catalog.materials["Item_Mushroom_P"].clone();
    let guts = catalog.materials["Item_Enemy_05"].clone();
    let recipe = select_recipe(
        &[chill.clone(), sun.clone(), guts.clone()],
        &catalog.recipes,
        &catalog.single_recipes,
        &catalog.system.fail_actor_name,
    );
    assert_eq!(recipe.result_actor_name, "Item_Cook_C_17");

    let mut state = CookState::new(vec![chill, sun, guts], recipe);
    base_health(&mut state, &catalog);
    base_effect(&mut state, &catalog);

    assert_eq!(state.recipe.result_actor_name, catalog.system.fail_actor_name);
    assert_eq!(state.effect, None);
    assert_eq!(state.effect_level, 0.0);
    assert_eq!(state.effect_time, 0);
}

#[test]
fn monster_extract_prefers_the_level_roll_for_zero_recovery_meals() {
    let catalog = fixture();
    let extract = catalog.materials["Item_Material_08"].clone();
    let sundelion = catalog.materials["Item_Plant_J"].clone();
    let recipe = Recipe::mock("Item_Cook_B_04", 7, "CookPlant");

    let mut state = CookState::new(vec![extract, sundelion], recipe);
    base_health(&mut state, &catalog);
    base_effect(&mut state, &catalog);
    plan_monster_extract(&mut state, &catalog);

    match &state.monster_extract {
        Some(MonsterExtract {
            time: None,
            mode: ExtractMode::OnlyLevel { levels },
        }) => assert_eq!(*levels, [4.0, 6.0, 10.0]),
        other => panic!("unexpected plan: {:?}", other),
    }
}

#[test]
fn monster_extract_inhibits_criticals() {
    let catalog = fixture();
    let apple = catalog.materials["Item_Fruit_A"].clone();
    let mut state = CookState::new(vec![apple], Recipe::mock("Meal", 1, "CookFruit"));
    state.hit_point_recover = 8.0;
    state.monster_extract = Some(MonsterExtract {
        time: None,
        mode: ExtractMode::OnlyHealthRandom {
            health: [1.0, 8.0, 20.0],
        },
    });

    plan_critical(&mut state, &catalog);
    assert!(state.critical.is_none());
}

#[test]
fn critical_rolls_time_when_level_and_health_are_capped() {
    let catalog = fixture();
    let banana = catalog.materials["Item_Fruit_H"].clone();
    let mut state = CookState::new(vec![banana], Recipe::mock("Meal", 1, "CookFruit"));
    state.hit_point_recover = 160.0;
    state.effect = Some(CookEffect::AttackUp);
    state.effect_level = 3.0;
    state.effect_time = 250;

    plan_critical(&mut state, &catalog);
    match &state.critical {
        Some(CriticalMode::OnlyTime { times }) => assert_eq!(*times, [250, 550]),
        other => panic!("unexpected plan: {:?}", other),
    }
}

#[test]
fn critical_lifts_sub_one_levels_to_one() {
    let catalog = fixture();
    let chill = catalog.materials["Item_Mushroom_E"].clone();
    let mut state = CookState::new(vec![chill], Recipe::mock("Meal", 1, "CookMushroom"));
    state.hit_point_recover = 8.0;
    state.effect = Some(CookEffect::ResistHot);
    state.effect_level = 0.5;
    state.effect_time = 150;

    plan_critical(&mut state, &catalog);
    assert_eq!(state.effect_level, 1.0);
    match &state.critical {
        Some(CriticalMode::HealthLevelTime { levels, times, .. }) => {
            assert_eq!(*levels, [1.0, 2.0]);
            assert_eq!(*times, [150, 450]);
        }
        other => panic!("unexpected plan: {:?}", other),
    }
}

#[test]
fn level_clamping_quantises_whole_heart_effects() {
    assert_eq!(clamp_level(0.5, 3.0, CookEffect::AttackUp), 1.0);
    assert_eq!(clamp_level(2.6, 3.0, CookEffect::AttackUp), 2.0);
    assert_eq!(clamp_level(5.0, 3.0, CookEffect::AttackUp), 3.0);
    assert_eq!(clamp_level(6.0, 120.0, CookEffect::LifeRepair), 8.0);
    assert_eq!(clamp_level(2.0, 100.0, CookEffect::LifeMaxUp), 4.0);
    assert_eq!(clamp_level(0.0, 100.0, CookEffect::LifeMaxUp), 0.0);
}

#[test]
fn sell_price_floors_and_respects_low_price_flags() {
    let catalog = fixture();
    let extract = catalog.materials["Item_Material_08"].clone();
    let truffle = catalog.materials["Item_Mushroom_N"].clone();
    let mut state = CookState::new(vec![extract, truffle], Recipe::mock("Meal", 1, "CookSpice"));

    finish(&mut state, &catalog);
    // Low-price extract counts as 1: floor((1 + 6) * 1.75).
    assert_eq!(state.selling_price, 12);
    assert_eq!(state.super_success_rate, 5);
}

#[test]
fn hearts_render_quarters_and_the_full_recovery_sentinel() {
    assert_eq!(hearts(0.0, false, 160.0, "Full Recovery"), "None");
    assert_eq!(hearts(1.0, false, 160.0, "Full Recovery"), "¼♥");
    assert_eq!(hearts(9.0, false, 160.0, "Full Recovery"), "♥♥¼♥");
    assert_eq!(hearts(160.0, false, 160.0, "Full Recovery"), "♥Full Recovery");
    assert_eq!(hearts(24.0, true, 160.0, "Full Recovery"), "♥Full Recovery");
}

#[test]
fn durations_render_as_minutes_and_seconds() {
    assert_eq!(mmss(0), "00:00");
    assert_eq!(mmss(210), "03:30");
    assert_eq!(mmss(1800), "30:00");
}

#[test]
fn locale_index_skips_captions_and_spans_languages() {
    let catalog = fixture();
    assert_eq!(catalog.actor_for_name("Apple"), Some("Item_Fruit_A"));
    assert_eq!(catalog.actor_for_name("Pomme"), Some("Item_Fruit_A"));
    assert_eq!(
        catalog.actor_for_name("A common fruit found on trees all around Hyrule."),
        None
    );
}

#[test]
fn a_catalog_without_life_recover_is_invalid() {
    let result = Catalog::from_json(CatalogSource {
        system: include_str!("../data/SystemData.json"),
        materials: include_str!("../data/MaterialData.json"),
        effects: "[]",
        recipes: include_str!("../data/RecipeData.json"),
        single_recipes: include_str!("../data/SingleRecipeData.json"),
        recipe_cards: include_str!("../data/RecipeCardData.json"),
        language: include_str!("../data/LanguageData.json"),
    });
    match result {
        Err(Error::InvalidCatalog(reason)) => assert!(reason.contains("LifeRecover")),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}
