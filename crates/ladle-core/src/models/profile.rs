// ABOUTME: Caller preference profile influencing prompts and the mock provider
// ABOUTME: Defines PreferenceProfile, DietType, and the supported Language set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::recipe::Difficulty;

/// Output language for generated recipes.
///
/// A closed set; the configured default applies when neither the request
/// nor the profile names one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// German
    De,
    /// French
    Fr,
    /// Spanish
    Es,
}

impl Language {
    /// Parse a language code, falling back to English for unknown input
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "de" => Self::De,
            "fr" => Self::Fr,
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    /// Get the two-letter language code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    /// English name of the language, used in prompt directives
    #[must_use]
    pub const fn english_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "German",
            Self::Fr => "French",
            Self::Es => "Spanish",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dietary regime a caller follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    /// No animal products
    Vegan,
    /// No meat or fish
    Vegetarian,
    /// Vegetarian plus fish and seafood
    Pescatarian,
    /// No gluten-containing grains
    GlutenFree,
    /// No dairy products
    DairyFree,
    /// Very low carbohydrate, high fat
    Keto,
    /// No grains, legumes, dairy, or refined sugar
    Paleo,
    /// Reduced carbohydrate intake
    LowCarb,
    /// Mediterranean pattern: vegetables, olive oil, fish
    Mediterranean,
    /// Prepared according to halal rules
    Halal,
}

impl DietType {
    /// Parse a diet name from user input (case-insensitive, `-` and `_` interchangeable)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "vegan" => Some(Self::Vegan),
            "vegetarian" => Some(Self::Vegetarian),
            "pescatarian" => Some(Self::Pescatarian),
            "gluten_free" => Some(Self::GlutenFree),
            "dairy_free" => Some(Self::DairyFree),
            "keto" => Some(Self::Keto),
            "paleo" => Some(Self::Paleo),
            "low_carb" => Some(Self::LowCarb),
            "mediterranean" => Some(Self::Mediterranean),
            "halal" => Some(Self::Halal),
            _ => None,
        }
    }

    /// Get the wire representation, also used as a recipe tag
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vegan => "vegan",
            Self::Vegetarian => "vegetarian",
            Self::Pescatarian => "pescatarian",
            Self::GlutenFree => "gluten_free",
            Self::DairyFree => "dairy_free",
            Self::Keto => "keto",
            Self::Paleo => "paleo",
            Self::LowCarb => "low_carb",
            Self::Mediterranean => "mediterranean",
            Self::Halal => "halal",
        }
    }

    /// Dietary-info flags a recipe must carry to satisfy this diet.
    ///
    /// A vegan recipe is by definition vegetarian and dairy-free; keto
    /// implies low-carb; paleo implies gluten-free.
    #[must_use]
    pub const fn implied_flags(&self) -> &'static [&'static str] {
        match self {
            Self::Vegan => &["vegan", "vegetarian", "dairy_free"],
            Self::Vegetarian => &["vegetarian"],
            Self::Pescatarian => &["pescatarian"],
            Self::GlutenFree => &["gluten_free"],
            Self::DairyFree => &["dairy_free"],
            Self::Keto => &["keto", "low_carb"],
            Self::Paleo => &["paleo", "gluten_free"],
            Self::LowCarb => &["low_carb"],
            Self::Mediterranean => &["mediterranean"],
            Self::Halal => &["halal"],
        }
    }
}

impl Display for DietType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional caller preferences shaping generation.
///
/// All fields are optional; an empty profile behaves like no profile at
/// all. The prompt builder renders these as constraints and the mock
/// provider overlays them onto its archetype output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Dietary regime to respect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietType>,

    /// Ingredients that must never appear (hard constraint)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,

    /// Ingredients the caller prefers to avoid (soft constraint)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disliked_ingredients: Vec<String>,

    /// Cuisines the caller gravitates toward
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_cuisines: Vec<String>,

    /// Cooking skill, capping recipe difficulty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<Difficulty>,

    /// Preferred output language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_lang: Option<Language>,
}

impl PreferenceProfile {
    /// Create an empty profile
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dietary regime
    #[must_use]
    pub const fn with_diet(mut self, diet: DietType) -> Self {
        self.diet = Some(diet);
        self
    }

    /// Set the allergy list
    #[must_use]
    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }

    /// Set the disliked ingredient list
    #[must_use]
    pub fn with_disliked_ingredients(mut self, disliked: Vec<String>) -> Self {
        self.disliked_ingredients = disliked;
        self
    }

    /// Set the preferred cuisines
    #[must_use]
    pub fn with_preferred_cuisines(mut self, cuisines: Vec<String>) -> Self {
        self.preferred_cuisines = cuisines;
        self
    }

    /// Set the caller's skill level
    #[must_use]
    pub const fn with_skill_level(mut self, level: Difficulty) -> Self {
        self.skill_level = Some(level);
        self
    }

    /// Set the preferred output language
    #[must_use]
    pub const fn with_preferred_lang(mut self, lang: Language) -> Self {
        self.preferred_lang = Some(lang);
        self
    }

    /// True when no preference is set at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diet.is_none()
            && self.allergies.is_empty()
            && self.disliked_ingredients.is_empty()
            && self.preferred_cuisines.is_empty()
            && self.skill_level.is_none()
            && self.preferred_lang.is_none()
    }
}
