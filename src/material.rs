use serde::{Deserialize, Deserializer};

use strum::{AsRefStr, Display, EnumString};

use crate::effect::CookEffect;

/// Coarse ingredient category. Recipe patterns match against these by name,
/// so the string forms must stay identical to the game data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString, AsRefStr)]
pub enum CookTag {
    CookFruit,
    CookMushroom,
    CookPlant,
    CookMeat,
    CookFish,
    CookInsect,
    CookEnemy,
    CookOre,
    CookSpice,
    CookForeign,
}

/// One row of `MaterialData.json`, keyed by `ActorName`. Numeric fields the
/// table omits default to zero, booleans to false.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Material {
    pub actor_name: String,
    pub cook_tag: CookTag,
    #[serde(default)]
    pub hit_point_recover: i32,
    #[serde(default, deserialize_with = "cure_effect")]
    pub cure_effect_type: Option<CookEffect>,
    #[serde(default)]
    pub cure_effect_level: f32,
    #[serde(default)]
    pub selling_price: i32,
    #[serde(default)]
    pub cook_low_price: bool,
    #[serde(default)]
    pub spice_boost_hit_point_recover: i32,
    #[serde(default)]
    pub spice_boost_effective_time: i32,
    #[serde(default)]
    pub spice_boost_max_heart_level: f32,
    #[serde(default)]
    pub spice_boost_stamina_level: f32,
    #[serde(default)]
    pub spice_boost_success_rate: i32,
}

// The table writes materials without an effect as `"CureEffectType": "None"`.
fn cure_effect<'de, D>(deserializer: D) -> Result<Option<CookEffect>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("None") => Ok(None),
        Some(name) => name
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("unknown effect type: {}", name))),
    }
}
