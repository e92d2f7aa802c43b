use crate::catalog::{Catalog, SystemData};
use crate::effect::CookEffect;
use crate::error::{Error, Result};
use crate::locale::Language;
use crate::material::{CookTag, Material};
use crate::recipe::{select_recipe, Recipe, FAILURE_RECIPE};
use crate::report::CookReport;

/// Elixirs take the committed effect into their actor id and their recipe
/// number comes from the recipe-card table instead of the picture book.
pub const ELIXIR_ACTOR: &str = "Item_Cook_C_17";

/// Seconds of effect duration contributed by every ingredient in the pot.
const EFFECT_TIME_PER_MATERIAL: i32 = 30;

/// Quarter-heart ceiling before promotion to the full-recovery sentinel.
const HEART_CAP: f32 = 120.0;

/// Effect durations never exceed half an hour.
const TIME_CAP: i32 = 1800;

/// The cooking simulator: immutable catalogs plus an output language. One
/// `cook` call is a pure function of its inputs; simulators can be shared
/// freely across threads.
pub struct CookSim {
    catalog: Catalog,
    lang: Language,
}

impl CookSim {
    pub fn new(catalog: Catalog) -> CookSim {
        CookSim {
            catalog,
            lang: Language::default(),
        }
    }

    pub fn with_language(mut self, lang: Language) -> CookSim {
        self.lang = lang;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cooks a pot of 1 to 5 ingredients given by display name and returns
    /// the formatted result record.
    pub fn cook<S: AsRef<str>>(&self, names: &[S]) -> Result<CookReport> {
        let materials = self.resolve_materials(names)?;
        let recipe = select_recipe(
            &materials,
            &self.catalog.recipes,
            &self.catalog.single_recipes,
            &self.catalog.system.fail_actor_name,
        );
        let mut state = CookState::new(materials, recipe);
        base_health(&mut state, &self.catalog);
        base_effect(&mut state, &self.catalog);
        plan_monster_extract(&mut state, &self.catalog);
        plan_critical(&mut state, &self.catalog);
        apply_spice(&mut state, &self.catalog);
        apply_bonus_and_clamp(&mut state, &self.catalog);
        finish(&mut state, &self.catalog);
        Ok(CookReport::compose(&state, &self.catalog, self.lang))
    }

    /// Looks up each display name in the locale index, preserving order and
    /// duplicates.
    pub fn resolve_materials<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Material>> {
        if names.is_empty() {
            return Err(Error::EmptyMaterialList);
        }
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.catalog
                    .actor_for_name(name)
                    .and_then(|actor| self.catalog.materials.get(actor))
                    .cloned()
                    .ok_or_else(|| Error::InvalidMaterial(name.to_string()))
            })
            .collect()
    }
}

/// Per-invocation working record, discarded once the report is composed.
#[derive(Debug)]
pub(crate) struct CookState {
    pub(crate) materials: Vec<Material>,
    pub(crate) recipe: Recipe,
    pub(crate) hit_point_recover: f32,
    pub(crate) effect: Option<CookEffect>,
    pub(crate) effect_level: f32,
    pub(crate) effect_time: i32,
    pub(crate) monster_extract: Option<MonsterExtract>,
    pub(crate) critical: Option<CriticalMode>,
    pub(crate) selling_price: i32,
    pub(crate) super_success_rate: i32,
}

/// Monster Extract replaces deterministic outcomes with equiprobable
/// branches: an optional three-way duration roll plus exactly one value mode.
#[derive(Debug)]
pub(crate) struct MonsterExtract {
    pub(crate) time: Option<[i32; 3]>,
    pub(crate) mode: ExtractMode,
}

#[derive(Debug)]
pub(crate) enum ExtractMode {
    OnlyLevel { levels: [f32; 3] },
    OnlyHealthUp { health: f32 },
    HealthLevelRandom { health: [f32; 3], levels: [f32; 3] },
    OnlyHealthRandom { health: [f32; 3] },
}

/// What a critical success would improve; index 0 holds the non-critical
/// value, index 1 the critical one.
#[derive(Debug)]
pub(crate) enum CriticalMode {
    OnlyHealth { health: [f32; 2] },
    OnlyLevel { levels: [f32; 2] },
    HealthLevel { health: [f32; 2], levels: [f32; 2] },
    OnlyTime { times: [i32; 2] },
    HealthTime { health: [f32; 2], times: [i32; 2] },
    HealthLevelTime { health: [f32; 2], levels: [f32; 2], times: [i32; 2] },
}

impl CookState {
    pub(crate) fn new(materials: Vec<Material>, recipe: Recipe) -> CookState {
        CookState {
            materials,
            recipe,
            hit_point_recover: 0.0,
            effect: None,
            effect_level: 0.0,
            effect_time: 0,
            monster_extract: None,
            critical: None,
            selling_price: 0,
            super_success_rate: 0,
        }
    }

    pub(crate) fn is_failure(&self, system: &SystemData) -> bool {
        self.recipe.result_actor_name == system.fail_actor_name
    }

    pub(crate) fn is_rock_hard(&self, system: &SystemData) -> bool {
        self.recipe.result_actor_name == system.rock_hard_actor_name
    }

    /// Applies `f` to every active randomised health value. The scalar
    /// `OnlyHealthUp` mode is left alone, matching the game's spice and
    /// bonus passes.
    pub(crate) fn map_health_branches<F: Fn(f32) -> f32>(&mut self, f: F) {
        if let Some(extract) = &mut self.monster_extract {
            match &mut extract.mode {
                ExtractMode::HealthLevelRandom { health, .. }
                | ExtractMode::OnlyHealthRandom { health } => {
                    for value in health.iter_mut() {
                        *value = f(*value);
                    }
                }
                ExtractMode::OnlyLevel { .. } | ExtractMode::OnlyHealthUp { .. } => {}
            }
        }
        if let Some(critical) = &mut self.critical {
            match critical {
                CriticalMode::OnlyHealth { health }
                | CriticalMode::HealthLevel { health, .. }
                | CriticalMode::HealthTime { health, .. }
                | CriticalMode::HealthLevelTime { health, .. } => {
                    for value in health.iter_mut() {
                        *value = f(*value);
                    }
                }
                CriticalMode::OnlyLevel { .. } | CriticalMode::OnlyTime { .. } => {}
            }
        }
    }

    /// Applies `f` to every active randomised effect level.
    pub(crate) fn map_level_branches<F: Fn(f32) -> f32>(&mut self, f: F) {
        if let Some(extract) = &mut self.monster_extract {
            match &mut extract.mode {
                ExtractMode::OnlyLevel { levels }
                | ExtractMode::HealthLevelRandom { levels, .. } => {
                    for value in levels.iter_mut() {
                        *value = f(*value);
                    }
                }
                ExtractMode::OnlyHealthUp { .. } | ExtractMode::OnlyHealthRandom { .. } => {}
            }
        }
        if let Some(critical) = &mut self.critical {
            match critical {
                CriticalMode::OnlyLevel { levels }
                | CriticalMode::HealthLevel { levels, .. }
                | CriticalMode::HealthLevelTime { levels, .. } => {
                    for value in levels.iter_mut() {
                        *value = f(*value);
                    }
                }
                CriticalMode::OnlyHealth { .. }
                | CriticalMode::OnlyTime { .. }
                | CriticalMode::HealthTime { .. } => {}
            }
        }
    }

    /// Applies `f` to every active randomised duration.
    pub(crate) fn map_time_branches<F: Fn(i32) -> i32>(&mut self, f: F) {
        if let Some(extract) = &mut self.monster_extract {
            if let Some(times) = &mut extract.time {
                for value in times.iter_mut() {
                    *value = f(*value);
                }
            }
        }
        if let Some(critical) = &mut self.critical {
            match critical {
                CriticalMode::OnlyTime { times }
                | CriticalMode::HealthTime { times, .. }
                | CriticalMode::HealthLevelTime { times, .. } => {
                    for value in times.iter_mut() {
                        *value = f(*value);
                    }
                }
                CriticalMode::OnlyHealth { .. }
                | CriticalMode::OnlyLevel { .. }
                | CriticalMode::HealthLevel { .. } => {}
            }
        }
    }
}

/// Raw health baseline: the quarter-heart sum over all ingredients, scaled
/// by the subdued rate for failed pots.
pub(crate) fn base_health(state: &mut CookState, catalog: &Catalog) {
    let system = &catalog.system;
    let total: i32 = state
        .materials
        .iter()
        .map(|material| material.hit_point_recover)
        .sum();
    let rate = if state.is_failure(system) {
        system.subtle_life_recover_rate
    } else {
        system.life_recover_rate
    };
    state.hit_point_recover = total as f32 * rate;
}

/// Effect resolution. Effects are tried in table order; the first one any
/// ingredient carries commits. A second distinct effect clears the meal's
/// effect entirely, and an elixir that loses its effect this way becomes the
/// failure meal.
pub(crate) fn base_effect(state: &mut CookState, catalog: &Catalog) {
    let system = &catalog.system;
    let mut committed = false;
    let mut effect = None;
    let mut effect_level = 0.0_f32;
    let mut effect_time = 0_i32;

    // Monster parts contribute flat bonuses to whichever effect commits.
    let mut bonus_time = 0_i32;
    let mut bonus_hearts = 0.0_f32;
    let mut bonus_stamina = 0.0_f32;
    for material in &state.materials {
        if material.cook_tag == CookTag::CookEnemy {
            bonus_time += material.spice_boost_effective_time;
            bonus_hearts += material.spice_boost_max_heart_level;
            bonus_stamina += material.spice_boost_stamina_level;
        }
    }

    for entry in &catalog.effects {
        let kind = entry.effect_type;
        let matching = state
            .materials
            .iter()
            .filter(|material| material.cure_effect_type == Some(kind))
            .count();
        if matching == 0 {
            continue;
        }
        if committed {
            effect = None;
            effect_level = 0.0;
            effect_time = 0;
            if state.recipe.result_actor_name == ELIXIR_ACTOR {
                state.recipe = FAILURE_RECIPE.clone();
            }
            continue;
        }
        committed = true;
        effect = Some(kind);
        effect_time += bonus_time;
        effect_time += EFFECT_TIME_PER_MATERIAL * state.materials.len() as i32;
        effect_time += matching as i32 * entry.base_time;
        let potency: f32 = state
            .materials
            .iter()
            .filter(|material| material.cure_effect_type == Some(kind))
            .map(|material| material.cure_effect_level)
            .sum();
        effect_level = entry.rate * potency;
        if kind == CookEffect::LifeMaxUp {
            effect_level += bonus_hearts;
        }
        if kind.is_stamina() {
            effect_level += bonus_stamina;
        }
        effect_level = effect_level.min(entry.max_lv);
    }

    // Tonics and failed pots carry no effect at all, and the instant effects
    // have no duration.
    let actor = &state.recipe.result_actor_name;
    if *actor == system.fairy_actor_name
        || *actor == system.fail_actor_name
        || *actor == system.rock_hard_actor_name
    {
        effect = None;
        effect_level = 0.0;
        effect_time = 0;
    }
    if let Some(kind) = effect {
        if !kind.is_timed() {
            effect_time = 0;
        }
    }

    state.effect = effect;
    state.effect_level = effect_level;
    state.effect_time = effect_time;
}

/// Monster Extract planning. Applies when the pot holds the extract and the
/// result is neither the failure nor the rock-hard meal: durations collapse
/// to a three-way roll, and one value mode is picked by the first matching
/// rule.
pub(crate) fn plan_monster_extract(state: &mut CookState, catalog: &Catalog) {
    let system = &catalog.system;
    if state.is_failure(system) || state.is_rock_hard(system) {
        return;
    }
    let present = state
        .materials
        .iter()
        .any(|material| material.actor_name == system.enemy_extract_actor_name);
    if !present {
        return;
    }

    let time = if state.effect.is_some() && state.effect_time > 0 {
        Some([60, 600, 1800])
    } else {
        None
    };

    let life_recover = catalog.life_recover();
    let health = state.hit_point_recover;
    let level = state.effect_level;
    let mode = match (state.effect, state.effect.and_then(|kind| catalog.effect(kind))) {
        (Some(kind), Some(entry)) if health == 0.0 || kind == CookEffect::LifeMaxUp => {
            ExtractMode::OnlyLevel {
                levels: [
                    entry.min_lv,
                    level,
                    level + entry.super_success_add_volume,
                ],
            }
        }
        // Unreachable: the arm above already claims every effect-bearing meal
        // with zero recovery. Kept in rule order to mirror the game.
        (Some(_), Some(_)) if health == 0.0 => ExtractMode::OnlyHealthUp {
            health: health + life_recover.super_success_add_volume,
        },
        (Some(_), Some(entry)) => ExtractMode::HealthLevelRandom {
            health: [
                1.0,
                health,
                health + life_recover.super_success_add_volume,
            ],
            levels: [
                entry.min_lv,
                level,
                level + entry.super_success_add_volume,
            ],
        },
        _ => ExtractMode::OnlyHealthRandom {
            health: [
                1.0,
                health,
                health + life_recover.super_success_add_volume,
            ],
        },
    };

    state.monster_extract = Some(MonsterExtract { time, mode });
}

/// Critical-success planning. Inhibited by Monster Extract and by the
/// failure and rock-hard meals. Picks what a critical would improve, by the
/// first matching rule.
pub(crate) fn plan_critical(state: &mut CookState, catalog: &Catalog) {
    let system = &catalog.system;
    if state.is_failure(system) || state.is_rock_hard(system) || state.monster_extract.is_some() {
        return;
    }
    if state.effect_level <= 1.0 {
        state.effect_level = 1.0;
    }

    let life_recover = catalog.life_recover();
    let health = state.hit_point_recover;
    let level = state.effect_level;
    let time = state.effect_time;
    let health_pair = [health, health + life_recover.super_success_add_volume];
    let time_pair = [time, time + system.super_success_add_effective_time];

    let mode = match (state.effect, state.effect.and_then(|kind| catalog.effect(kind))) {
        (None, _) => CriticalMode::OnlyHealth { health: health_pair },
        (Some(CookEffect::LifeMaxUp), Some(entry)) => CriticalMode::OnlyLevel {
            levels: [level, level + entry.super_success_add_volume],
        },
        (Some(kind), Some(entry)) if kind.is_stamina() => {
            if level >= entry.max_lv {
                CriticalMode::OnlyHealth { health: health_pair }
            } else {
                CriticalMode::HealthLevel {
                    health: health_pair,
                    levels: [level, level + entry.super_success_add_volume],
                }
            }
        }
        (Some(_), Some(entry)) if level >= entry.max_lv => {
            if health >= life_recover.max_lv {
                CriticalMode::OnlyTime { times: time_pair }
            } else {
                CriticalMode::HealthTime {
                    health: health_pair,
                    times: time_pair,
                }
            }
        }
        (Some(_), Some(entry)) if health >= life_recover.max_lv => CriticalMode::HealthLevel {
            health: health_pair,
            levels: [level, level + entry.super_success_add_volume],
        },
        (Some(_), Some(entry)) => CriticalMode::HealthLevelTime {
            health: health_pair,
            levels: [level, level + entry.super_success_add_volume],
            times: time_pair,
        },
        // A committed effect always has a table entry; fall back to the
        // plain health roll if a hand-built catalog drops one.
        (Some(_), None) => CriticalMode::OnlyHealth { health: health_pair },
    };

    state.critical = Some(mode);
}

/// Spice boosts, folded once per distinct ingredient into the baseline and
/// into whichever branch vectors are live. Failed and rock-hard pots get no
/// seasoning.
pub(crate) fn apply_spice(state: &mut CookState, catalog: &Catalog) {
    let system = &catalog.system;
    if state.is_failure(system) || state.is_rock_hard(system) {
        return;
    }

    let mut seen: Vec<String> = Vec::new();
    let mut boosts: Vec<(CookTag, i32, i32, f32, f32)> = Vec::new();
    for material in &state.materials {
        if seen.iter().any(|actor| *actor == material.actor_name) {
            continue;
        }
        seen.push(material.actor_name.clone());
        boosts.push((
            material.cook_tag,
            material.spice_boost_hit_point_recover,
            material.spice_boost_effective_time,
            material.spice_boost_max_heart_level,
            material.spice_boost_stamina_level,
        ));
    }

    for (tag, boost_health, boost_time, boost_hearts, boost_stamina) in boosts {
        if tag != CookTag::CookEnemy {
            state.hit_point_recover += boost_health as f32;
            state.map_health_branches(|value| value + boost_health as f32);
            state.effect_time += boost_time;
            state.map_time_branches(|value| value + boost_time);
        }
        if tag == CookTag::CookSpice {
            match state.effect {
                Some(CookEffect::LifeMaxUp) => {
                    state.effect_level += boost_hearts;
                    state.map_level_branches(|value| value + boost_hearts);
                }
                Some(kind) if kind.is_stamina() => {
                    state.effect_level += boost_stamina;
                    state.map_level_branches(|value| value + boost_stamina);
                }
                _ => {}
            }
        }
    }
}

/// Recipe bonuses, caps, the full-recovery sentinel and level quantisation,
/// applied uniformly to the baseline and to every live branch vector.
pub(crate) fn apply_bonus_and_clamp(state: &mut CookState, catalog: &Catalog) {
    let bonus_time = state.recipe.bonus_time;
    state.map_time_branches(|value| (value + bonus_time).min(TIME_CAP));
    state.effect_time = (state.effect_time + bonus_time).min(TIME_CAP);

    let bonus_heart = state.recipe.bonus_heart as f32;
    let full = catalog.life_recover().max_lv;
    state.map_health_branches(|value| {
        let value = (value + bonus_heart).min(HEART_CAP);
        if value == HEART_CAP {
            full
        } else {
            value
        }
    });
    if state.effect == Some(CookEffect::LifeMaxUp) {
        // Extra-heart meals always restore everything.
        state.map_health_branches(|_| full);
    }
    if state.effect.is_none() {
        state.map_health_branches(|value| if value == 0.0 { 1.0 } else { value });
    }
    state.hit_point_recover = (state.hit_point_recover + bonus_heart).min(HEART_CAP);
    if state.hit_point_recover == HEART_CAP {
        state.hit_point_recover = full;
    }
    if state.effect.is_none() && state.hit_point_recover == 0.0 {
        state.hit_point_recover = 1.0;
    }

    if let Some(kind) = state.effect {
        if let Some(entry) = catalog.effect(kind) {
            let max_lv = entry.max_lv;
            state.map_level_branches(|value| clamp_level(value, max_lv, kind));
            state.effect_level = clamp_level(state.effect_level, max_lv, kind);
        }
    }
}

/// Clamps one effect level: cap at the effect's maximum, lift (0, 1] to one,
/// snap whole-heart effects to multiples of four (raw values in (0, 4] become
/// four), then floor.
pub(crate) fn clamp_level(value: f32, max_lv: f32, kind: CookEffect) -> f32 {
    let mut value = value.min(max_lv);
    if value > 0.0 && value <= 1.0 {
        value = 1.0;
    }
    if kind.whole_heart_levels() {
        let raw = value;
        value = 4.0 * (value / 4.0).round();
        if raw > 0.0 && raw <= 4.0 {
            value = 4.0;
        }
    }
    value.floor()
}

/// Sell price, critical rate and the fixed overrides for the special meals.
pub(crate) fn finish(state: &mut CookState, catalog: &Catalog) {
    let system = &catalog.system;

    let price_sum: i32 = state
        .materials
        .iter()
        .map(|material| {
            if material.cook_low_price {
                1
            } else {
                material.selling_price
            }
        })
        .sum();
    let price_rate = system
        .price_rate_list
        .iter()
        .find(|entry| entry.material_num == state.materials.len())
        .map(|entry| entry.rate)
        .unwrap_or(1.0);
    state.selling_price = (price_sum as f32 * price_rate).floor() as i32;

    let base_rate = state
        .materials
        .iter()
        .map(|material| material.spice_boost_success_rate)
        .max()
        .unwrap_or(0);
    let mut unique: Vec<&str> = Vec::new();
    for material in &state.materials {
        if !unique.contains(&material.actor_name.as_str()) {
            unique.push(&material.actor_name);
        }
    }
    let type_rate = system
        .super_success_rate_list
        .iter()
        .find(|entry| entry.material_type_num == unique.len())
        .map(|entry| entry.rate)
        .unwrap_or(0);
    state.super_success_rate = base_rate + type_rate;

    if state.is_rock_hard(system) {
        state.hit_point_recover = system.fail_life_recover as f32;
        state.effect = None;
        state.effect_level = 0.0;
        state.effect_time = 0;
        state.selling_price = 2;
    } else if state.is_failure(system) {
        state.hit_point_recover = system.subtle_life_recover as f32;
        state.effect = None;
        state.effect_level = 0.0;
        state.effect_time = 0;
        state.selling_price = 2;
    } else if state.recipe.result_actor_name == system.fairy_actor_name {
        state.selling_price = 2;
    }
}
