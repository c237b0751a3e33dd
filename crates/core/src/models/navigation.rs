use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// UI language. Also used to ask the advisory model to answer in the same language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Language name as written in a prompt.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            other => Err(format!("Unsupported language: {other}")),
        }
    }
}

/// One entry in the sidebar navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Stable id, also the key in stored preferences
    pub id: &'static str,
    pub label_en: &'static str,
    pub label_hi: &'static str,
    /// Locked items are always visible and cannot be moved
    pub locked: bool,
}

impl NavItem {
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.label_en,
            Language::Hi => self.label_hi,
        }
    }
}

/// Sidebar items in their default order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { id: "dashboard", label_en: "Dashboard", label_hi: "डैशबोर्ड", locked: true },
    NavItem { id: "inventory", label_en: "Inventory", label_hi: "भंडार", locked: false },
    NavItem { id: "financial-tracker", label_en: "Financial Tracker", label_hi: "वित्तीय ट्रैकर", locked: false },
    NavItem { id: "calendar", label_en: "Farm Calendar", label_hi: "खेती कैलेंडर", locked: false },
    NavItem { id: "market-prices", label_en: "Market Prices", label_hi: "बाज़ार भाव", locked: false },
    NavItem { id: "pest-diagnosis", label_en: "Pest Diagnosis", label_hi: "कीट निदान", locked: false },
    NavItem { id: "yield-prediction", label_en: "Yield Prediction", label_hi: "उपज पूर्वानुमान", locked: false },
    NavItem { id: "irrigation-planner", label_en: "Irrigation Planner", label_hi: "सिंचाई योजना", locked: false },
    NavItem { id: "crop-recommendation", label_en: "Crop Recommendation", label_hi: "फसल सुझाव", locked: false },
    NavItem { id: "settings", label_en: "Settings", label_hi: "सेटिंग्स", locked: true },
];

/// Look up a nav item in the static configuration.
pub fn find_nav_item(id: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.id == id)
}

/// The user's sidebar preferences. Stored as one JSON blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPreference {
    /// nav-item-id → visible
    #[serde(default)]
    pub visibility: HashMap<String, bool>,

    /// nav-item-ids in display order
    #[serde(default)]
    pub order: Vec<String>,

    #[serde(default)]
    pub language: Language,
}

impl Default for NavPreference {
    /// All visible, config order, English.
    fn default() -> Self {
        Self {
            visibility: NAV_ITEMS
                .iter()
                .map(|item| (item.id.to_string(), true))
                .collect(),
            order: NAV_ITEMS.iter().map(|item| item.id.to_string()).collect(),
            language: Language::En,
        }
    }
}

/// A nav entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub locked: bool,
}
