use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::navigation::{find_nav_item, Language, NavEntry, NavPreference, NAV_ITEMS};
use crate::storage::port::PreferenceStorage;

/// Storage key holding the nav preference blob.
pub const NAV_PREFERENCES_KEY: &str = "farm-advisor:nav-preferences";

/// A single field-level change to the nav preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavUpdate {
    Visibility { id: String, visible: bool },
    Order(Vec<String>),
    Language(Language),
}

/// Sidebar visibility/order/language, written through to durable storage.
///
/// Every mutator updates memory first and then tries to persist the whole blob.
/// A failed write is logged and otherwise ignored: the session keeps the change.
/// Locked items stay visible and keep their configured position; attempts to
/// hide or move them are silently ignored, as are unknown ids.
pub struct NavPreferenceStore {
    storage: Arc<dyn PreferenceStorage>,
    state: NavPreference,
}

impl std::fmt::Debug for NavPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavPreferenceStore")
            .field("state", &self.state)
            .finish()
    }
}

impl NavPreferenceStore {
    /// Load stored preferences, falling back to defaults (English).
    pub fn load(storage: Arc<dyn PreferenceStorage>) -> Self {
        Self::load_with_default_language(storage, Language::default())
    }

    /// Load stored preferences; `default_language` applies only when nothing usable is stored.
    pub fn load_with_default_language(
        storage: Arc<dyn PreferenceStorage>,
        default_language: Language,
    ) -> Self {
        let fallback = NavPreference {
            language: default_language,
            ..NavPreference::default()
        };

        let state = match storage.read(NAV_PREFERENCES_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<NavPreference>(&blob) {
                Ok(stored) => Self::normalize(stored),
                Err(e) => {
                    warn!(key = NAV_PREFERENCES_KEY, error = %e, "Ignoring malformed nav preferences");
                    fallback
                }
            },
            Ok(None) => {
                debug!(key = NAV_PREFERENCES_KEY, "No stored nav preferences, using defaults");
                fallback
            }
            Err(e) => {
                warn!(key = NAV_PREFERENCES_KEY, error = %e, "Failed to read nav preferences");
                fallback
            }
        };

        Self { storage, state }
    }

    // ── Read ────────────────────────────────────────────────────────

    pub fn preference(&self) -> &NavPreference {
        &self.state
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn order(&self) -> &[String] {
        &self.state.order
    }

    /// Unknown ids are reported hidden.
    pub fn is_visible(&self, id: &str) -> bool {
        self.state.visibility.get(id).copied().unwrap_or(false)
    }

    /// Visible items in display order, labelled in the current language.
    pub fn visible_items(&self) -> Vec<NavEntry> {
        self.state
            .order
            .iter()
            .filter(|id| self.is_visible(id))
            .filter_map(|id| find_nav_item(id))
            .map(|item| NavEntry {
                id: item.id,
                label: item.label(self.state.language),
                locked: item.locked,
            })
            .collect()
    }

    // ── Mutators ────────────────────────────────────────────────────

    /// Merge one field-level change. Returns `true` if anything changed.
    pub fn set(&mut self, update: NavUpdate) -> bool {
        match update {
            NavUpdate::Visibility { id, visible } => self.set_visibility(&id, visible),
            NavUpdate::Order(order) => self.set_order(order),
            NavUpdate::Language(language) => self.set_language(language),
        }
    }

    pub fn set_visibility(&mut self, id: &str, visible: bool) -> bool {
        let Some(item) = find_nav_item(id) else {
            debug!(id, "Ignoring visibility change for unknown nav item");
            return false;
        };
        if item.locked || self.is_visible(id) == visible {
            return false;
        }
        self.state.visibility.insert(id.to_string(), visible);
        self.persist();
        true
    }

    /// Flip visibility. Locked and unknown items are left untouched.
    pub fn toggle(&mut self, id: &str) -> bool {
        let visible = self.is_visible(id);
        self.set_visibility(id, !visible)
    }

    /// Replace the order. Locked items are pinned back to their configured slots.
    pub fn set_order(&mut self, order: Vec<String>) -> bool {
        let normalized = Self::normalize_order(&order);
        if normalized == self.state.order {
            return false;
        }
        self.state.order = normalized;
        self.persist();
        true
    }

    pub fn move_up(&mut self, id: &str) -> bool {
        self.swap_with_neighbour(id, -1)
    }

    pub fn move_down(&mut self, id: &str) -> bool {
        self.swap_with_neighbour(id, 1)
    }

    pub fn set_language(&mut self, language: Language) -> bool {
        if self.state.language == language {
            return false;
        }
        self.state.language = language;
        self.persist();
        true
    }

    /// Overwrite all preferences at once (the settings dialog's "apply").
    pub fn apply(&mut self, preference: NavPreference) {
        self.state = Self::normalize(preference);
        self.persist();
    }

    /// Back to all visible, config order. Language is kept.
    pub fn reset(&mut self) {
        self.state = NavPreference {
            language: self.state.language,
            ..NavPreference::default()
        };
        self.persist();
    }

    // ── Internal ────────────────────────────────────────────────────

    fn swap_with_neighbour(&mut self, id: &str, offset: isize) -> bool {
        let Some(idx) = self.state.order.iter().position(|o| o == id) else {
            return false;
        };
        let Some(target) = idx.checked_add_signed(offset) else {
            return false;
        };
        if target >= self.state.order.len() {
            return false;
        }
        let locked = |i: usize| find_nav_item(&self.state.order[i]).is_some_and(|item| item.locked);
        if locked(idx) || locked(target) {
            return false;
        }
        self.state.order.swap(idx, target);
        self.persist();
        true
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Failed to serialize nav preferences");
                return;
            }
        };
        if let Err(e) = self.storage.write(NAV_PREFERENCES_KEY, &blob) {
            warn!(key = NAV_PREFERENCES_KEY, error = %e, "Failed to persist nav preferences");
        }
    }

    /// Reconcile a stored/applied preference with the static nav configuration.
    fn normalize(preference: NavPreference) -> NavPreference {
        let visibility: HashMap<String, bool> = NAV_ITEMS
            .iter()
            .map(|item| {
                let visible = item.locked
                    || preference.visibility.get(item.id).copied().unwrap_or(true);
                (item.id.to_string(), visible)
            })
            .collect();

        NavPreference {
            visibility,
            order: Self::normalize_order(&preference.order),
            language: preference.language,
        }
    }

    /// Known unlocked ids in the given order (first occurrence wins), then missing
    /// ones in config order, with locked ids re-inserted at their config index.
    fn normalize_order(order: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut result: Vec<String> = order
            .iter()
            .filter(|id| find_nav_item(id).is_some_and(|item| !item.locked))
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();

        for item in NAV_ITEMS.iter().filter(|item| !item.locked) {
            if !result.iter().any(|id| id == item.id) {
                result.push(item.id.to_string());
            }
        }

        for (idx, item) in NAV_ITEMS.iter().enumerate() {
            if item.locked {
                result.insert(idx.min(result.len()), item.id.to_string());
            }
        }
        result
    }
}
