use std::collections::HashMap;

use serde::Deserialize;

use strum::{Display, EnumString, EnumVariantNames};

/// Languages the game data ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
pub enum Language {
    #[strum(serialize = "USen")]
    AmericanEnglish,
    #[strum(serialize = "EUen")]
    BritishEnglish,
    #[strum(serialize = "USfr")]
    CanadianFrench,
    #[strum(serialize = "EUfr")]
    EuropeanFrench,
    #[strum(serialize = "USes")]
    AmericanSpanish,
    #[strum(serialize = "EUes")]
    EuropeanSpanish,
    #[strum(serialize = "EUde")]
    German,
    #[strum(serialize = "EUit")]
    Italian,
    #[strum(serialize = "JPja")]
    Japanese,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::AmericanEnglish => "USen",
            Language::BritishEnglish => "EUen",
            Language::CanadianFrench => "USfr",
            Language::EuropeanFrench => "EUfr",
            Language::AmericanSpanish => "USes",
            Language::EuropeanSpanish => "EUes",
            Language::German => "EUde",
            Language::Italian => "EUit",
            Language::Japanese => "JPja",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::AmericanEnglish
    }
}

/// `LanguageData.json`: category -> key -> language code -> text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleDict(HashMap<String, HashMap<String, HashMap<String, String>>>);

impl LocaleDict {
    pub fn text(&self, category: &str, key: &str, lang: &str) -> Option<&str> {
        self.0
            .get(category)?
            .get(key)?
            .get(lang)
            .map(String::as_str)
    }

    /// Maps every ingredient display name, in every language, to its actor
    /// id. Keys in the `Material` category come as `<actor>_Name` plus
    /// `<actor>_Caption` flavour text; only the names are indexed.
    pub fn material_name_index(&self) -> HashMap<String, String> {
        let mut index = HashMap::new();
        if let Some(table) = self.0.get("Material") {
            for (key, translations) in table {
                if key.ends_with("_Caption") {
                    continue;
                }
                let actor = key.strip_suffix("_Name").unwrap_or(key);
                for text in translations.values() {
                    if !text.is_empty() {
                        index.insert(text.clone(), actor.to_string());
                    }
                }
            }
        }
        index
    }
}
