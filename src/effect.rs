use serde::Deserialize;

use strum::{Display, EnumString};

/// Status effects a meal can carry. `LifeRecover` is the pseudo-effect that
/// the game's effect table uses to parameterise plain health recovery; it is
/// never committed to a meal but its table entry drives the health caps and
/// critical bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumString)]
pub enum CookEffect {
    LifeRecover,
    LifeMaxUp,
    StaminaRecover,
    ExStaminaMaxUp,
    LifeRepair,
    ResistHot,
    ResistCold,
    ResistElectric,
    ResistFreeze,
    ResistBurn,
    Fireproof,
    Quietness,
    MovingSpeed,
    AttackUp,
    DefenseUp,
    LightEmission,
    SwimSpeed,
}

impl CookEffect {
    /// Hearts, stamina and gloom recovery apply instantly; everything else
    /// runs on a timer.
    pub fn is_timed(self) -> bool {
        !matches!(
            self,
            CookEffect::LifeMaxUp
                | CookEffect::StaminaRecover
                | CookEffect::ExStaminaMaxUp
                | CookEffect::LifeRepair
        )
    }

    pub fn is_stamina(self) -> bool {
        matches!(self, CookEffect::StaminaRecover | CookEffect::ExStaminaMaxUp)
    }

    /// Extra hearts and gloom recovery are granted in whole hearts, so their
    /// levels snap to multiples of four quarter-hearts.
    pub fn whole_heart_levels(self) -> bool {
        matches!(self, CookEffect::LifeMaxUp | CookEffect::LifeRepair)
    }
}

/// One row of `EffectData.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Effect {
    pub effect_type: CookEffect,
    #[serde(default)]
    pub base_time: i32,
    #[serde(default)]
    pub rate: f32,
    #[serde(default)]
    pub min_lv: f32,
    #[serde(default)]
    pub max_lv: f32,
    #[serde(default)]
    pub super_success_add_volume: f32,
}
