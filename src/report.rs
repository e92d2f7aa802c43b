use std::fmt;

use crate::catalog::Catalog;
use crate::cook::{CookState, CriticalMode, ExtractMode, ELIXIR_ACTOR};
use crate::effect::CookEffect;
use crate::locale::Language;

/// The display record returned by a cook. All values are strings already
/// formatted for the requested language; `entries` preserves the row order
/// the original front ends printed.
#[derive(Debug, Clone, PartialEq)]
pub struct CookReport {
    pub meal_name: String,
    pub actor_name: String,
    pub recipe_number: String,
    pub health_recovery: String,
    pub effect: String,
    pub effect_duration: String,
    pub effect_level: String,
    pub critical_rate: String,
    pub sell_price: String,
    pub description: String,
    pub rng: Option<String>,
}

impl CookReport {
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut rows = vec![
            ("Meal name", self.meal_name.as_str()),
            ("Actor name", self.actor_name.as_str()),
            ("Recipe number", self.recipe_number.as_str()),
            ("Health recovery", self.health_recovery.as_str()),
            ("Effect", self.effect.as_str()),
            ("Effect duration", self.effect_duration.as_str()),
            ("Effect level", self.effect_level.as_str()),
            ("Critical rate", self.critical_rate.as_str()),
            ("Sell price", self.sell_price.as_str()),
            ("Description", self.description.as_str()),
        ];
        if let Some(rng) = &self.rng {
            rows.push(("RNG", rng));
        }
        rows
    }

    pub(crate) fn compose(state: &CookState, catalog: &Catalog, lang: Language) -> CookReport {
        let code = lang.code();
        let locale = &catalog.locale;
        let actor = state.recipe.result_actor_name.as_str();
        let life_recover = catalog.life_recover();
        let full_recovery = locale
            .text("App", "FullRecovery_Name", code)
            .unwrap_or("Full Recovery");

        let meal = locale
            .text("Meal", &format!("{}_Name", actor), code)
            .unwrap_or("");
        let (meal_name, buff_name) = match state.effect {
            Some(kind) => {
                let adjective = locale
                    .text("Effect", &format!("{}_Name", kind), code)
                    .unwrap_or("");
                let buff = locale.text("Buff", &kind.to_string(), code).unwrap_or("");
                (format!("{} {}", adjective, meal).trim().to_string(), buff)
            }
            None => (meal.to_string(), ""),
        };
        let effect = if buff_name.is_empty() {
            "None".to_string()
        } else {
            buff_name.to_string()
        };

        let force_full = state.effect == Some(CookEffect::LifeMaxUp);
        let health_recovery = hearts(
            state.hit_point_recover,
            force_full,
            life_recover.max_lv,
            full_recovery,
        );

        let effect_duration = match state.effect {
            Some(kind) if kind.is_timed() => mmss(state.effect_time),
            _ => "None".to_string(),
        };
        let effect_level = match state.effect {
            Some(_) => format!("{}", state.effect_level as i64),
            None => "None".to_string(),
        };

        let critical_rate = format!("{}%", state.super_success_rate.min(100));
        let sell_price = format!("{} Rupees", state.selling_price);

        let description = describe(state, catalog, code);
        let rng = rng_narrative(state, catalog, full_recovery);

        // Elixirs fold the effect into their actor id and take their number
        // from the recipe-card table.
        let mut actor_name = actor.to_string();
        let mut recipe_number = state.recipe.picture_book_num;
        if actor == ELIXIR_ACTOR {
            if let Some(kind) = state.effect {
                let promoted = format!("{}_{}", actor, kind);
                if let Some(position) = catalog
                    .recipe_cards
                    .iter()
                    .position(|card| *card == promoted)
                {
                    recipe_number = position as i32 + 1;
                }
                actor_name = promoted;
            }
        }

        CookReport {
            meal_name,
            actor_name,
            recipe_number: recipe_number.to_string(),
            health_recovery,
            effect,
            effect_duration,
            effect_level,
            critical_rate,
            sell_price,
            description,
            rng,
        }
    }
}

impl fmt::Display for CookReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.entries() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Quarter-hearts as heart glyphs: `♥` per whole heart, a fraction prefix
/// for the remainder, `None` for zero. Extra-heart meals and the
/// full-recovery sentinel render the full-recovery text instead.
pub(crate) fn hearts(quarters: f32, force_full: bool, full_sentinel: f32, full_text: &str) -> String {
    if force_full || quarters == full_sentinel {
        return format!("♥{}", full_text);
    }
    let quarters = quarters as i32;
    let mut rendered = "♥".repeat((quarters / 4) as usize);
    match quarters % 4 {
        1 => rendered.push_str("¼♥"),
        2 => rendered.push_str("½♥"),
        3 => rendered.push_str("¾♥"),
        _ => {}
    }
    if rendered.is_empty() {
        "None".to_string()
    } else {
        rendered
    }
}

pub(crate) fn mmss(total_seconds: i32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

fn describe(state: &CookState, catalog: &Catalog, code: &str) -> String {
    let locale = &catalog.locale;
    let actor = state.recipe.result_actor_name.as_str();
    let caption = locale
        .text("Meal", &format!("{}_Caption", actor), code)
        .unwrap_or("");
    let effect_desc = match state.effect {
        Some(kind) => {
            let mut key = format!(
                "{}{}",
                kind,
                if actor == ELIXIR_ACTOR {
                    "_MedicineDesc"
                } else {
                    "_Desc"
                }
            );
            let level = state.effect_level as i64;
            if let Some(entry) = catalog.effect(kind) {
                // Short-scale effects describe each level separately.
                if entry.max_lv <= 3.0 && level > 1 {
                    key = format!("{}_{:02}", key, level);
                }
            }
            locale.text("Effect", &key, code).unwrap_or("")
        }
        None => "",
    };
    format!("{}\n{}", effect_desc, caption)
        .trim()
        .replace('\n', " ")
}

/// Narrates the possibility space instead of sampling it. A meal reports
/// Monster Extract branches or critical branches, never both.
fn rng_narrative(state: &CookState, catalog: &Catalog, full_recovery: &str) -> Option<String> {
    let life_recover = catalog.life_recover();
    let force_full = state.effect == Some(CookEffect::LifeMaxUp);
    let render_hearts =
        |quarters: f32| hearts(quarters, force_full, life_recover.max_lv, full_recovery);

    if let Some(extract) = &state.monster_extract {
        let mut parts = Vec::new();
        if let Some(times) = &extract.time {
            parts.push(format!(
                "sets time to {}, {} or {} (each 33.3%)",
                mmss(times[0]),
                mmss(times[1]),
                mmss(times[2])
            ));
        }
        match &extract.mode {
            ExtractMode::OnlyHealthRandom { health }
            | ExtractMode::HealthLevelRandom { health, .. } => {
                parts.push(format!(
                    "sets health recovery to {}, {} or {} (each 33.3%)",
                    render_hearts(health[0]),
                    render_hearts(health[1]),
                    render_hearts(health[2])
                ));
            }
            ExtractMode::OnlyLevel { .. } | ExtractMode::OnlyHealthUp { .. } => {}
        }
        match &extract.mode {
            ExtractMode::OnlyLevel { levels } | ExtractMode::HealthLevelRandom { levels, .. } => {
                parts.push(format!(
                    "sets effect level to {}, {} or {} (each 33.3%)",
                    levels[0] as i64, levels[1] as i64, levels[2] as i64
                ));
            }
            ExtractMode::OnlyHealthUp { .. } | ExtractMode::OnlyHealthRandom { .. } => {}
        }
        if parts.is_empty() {
            return None;
        }
        return Some(format!("Monster Extract {}", parts.join(" and ")));
    }

    if let Some(critical) = &state.critical {
        let mut parts = Vec::new();
        match critical {
            CriticalMode::OnlyTime { .. }
            | CriticalMode::HealthTime { .. }
            | CriticalMode::HealthLevelTime { .. } => {
                parts.push(format!(
                    "duration gets a {} increase",
                    mmss(catalog.system.super_success_add_effective_time)
                ));
            }
            _ => {}
        }
        match critical {
            CriticalMode::OnlyHealth { .. }
            | CriticalMode::HealthLevel { .. }
            | CriticalMode::HealthTime { .. }
            | CriticalMode::HealthLevelTime { .. } => {
                parts.push(format!(
                    "health recovery gets {} additional hearts",
                    life_recover.super_success_add_volume / 4.0
                ));
            }
            _ => {}
        }
        match critical {
            CriticalMode::OnlyLevel { levels }
            | CriticalMode::HealthLevel { levels, .. }
            | CriticalMode::HealthLevelTime { levels, .. } => {
                parts.push(format!(
                    "effect level gets {} additional level(s)",
                    (levels[1] - levels[0]) as i64
                ));
            }
            _ => {}
        }
        if parts.is_empty() {
            return None;
        }
        let narrated = if parts.len() == 1 {
            parts.remove(0)
        } else {
            parts
                .iter()
                .map(|part| format!("either {}", part))
                .collect::<Vec<_>>()
                .join(", ")
        };
        return Some(format!("If there's a critical hit, {}", narrated));
    }

    None
}
