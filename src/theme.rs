use crate::config::StorageKeys;
use crate::prefs::{KeyValueStore, PreferenceStore};

/// Concrete theme applied to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemePreference {
    System,
    Dark,
    Light,
}

impl ThemePreference {
    /// Unknown values normalize to `System`.
    pub fn parse(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            "light" => Self::Light,
            _ => Self::System,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    System,
    Manual,
}

impl ThemeMode {
    pub fn parse(value: &str) -> Self {
        if value == "manual" {
            Self::Manual
        } else {
            Self::System
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Manual => "manual",
        }
    }
}

pub fn resolve(preference: ThemePreference, os_prefers_dark: bool) -> Theme {
    match preference {
        ThemePreference::System => Theme::from_dark(os_prefers_dark),
        ThemePreference::Dark => Theme::Dark,
        ThemePreference::Light => Theme::Light,
    }
}

/// Tracks the stored theme preference together with the last OS signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeResolver {
    mode: ThemeMode,
    preference: ThemePreference,
    os_prefers_dark: bool,
}

impl ThemeResolver {
    /// Outside manual mode the preference is reset to `system`, and that
    /// reset is written back.
    pub fn load<S: KeyValueStore>(
        store: &PreferenceStore<S>,
        keys: &StorageKeys,
        os_prefers_dark: bool,
    ) -> Self {
        let mode = ThemeMode::parse(&store.get(&keys.theme_mode, ThemeMode::System.as_str()));
        let mut preference =
            ThemePreference::parse(&store.get(&keys.theme, ThemePreference::System.as_str()));
        if mode != ThemeMode::Manual {
            preference = ThemePreference::System;
            store.set(&keys.theme, preference.as_str());
        }
        Self {
            mode,
            preference,
            os_prefers_dark,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn resolved(&self) -> Theme {
        resolve(self.preference, self.os_prefers_dark)
    }

    /// Explicit user toggle: pins the theme and leaves system mode.
    pub fn toggle<S: KeyValueStore>(
        &mut self,
        dark: bool,
        store: &PreferenceStore<S>,
        keys: &StorageKeys,
    ) -> Theme {
        self.mode = ThemeMode::Manual;
        store.set(&keys.theme_mode, self.mode.as_str());
        self.preference = if dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        };
        store.set(&keys.theme, self.preference.as_str());
        self.resolved()
    }

    /// Returns the theme to re-apply, or `None` when the user pinned one.
    pub fn os_changed(&mut self, prefers_dark: bool) -> Option<Theme> {
        self.os_prefers_dark = prefers_dark;
        match self.mode {
            ThemeMode::System => Some(self.resolved()),
            ThemeMode::Manual => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::prefs::testing::MemoryStorage;

    fn store_with(
        entries: &[(&str, &str)],
    ) -> (Rc<MemoryStorage>, PreferenceStore<Rc<MemoryStorage>>) {
        let backend = Rc::new(MemoryStorage::with_entries(entries));
        (Rc::clone(&backend), PreferenceStore::new(backend))
    }

    #[test]
    fn resolve_follows_os_only_for_system() {
        assert_eq!(resolve(ThemePreference::System, true), Theme::Dark);
        assert_eq!(resolve(ThemePreference::System, false), Theme::Light);
        assert_eq!(resolve(ThemePreference::Dark, false), Theme::Dark);
        assert_eq!(resolve(ThemePreference::Light, true), Theme::Light);
    }

    #[test]
    fn unknown_preference_normalizes_to_system() {
        assert_eq!(ThemePreference::parse("sepia"), ThemePreference::System);
        assert_eq!(ThemeMode::parse("MANUAL"), ThemeMode::System);
    }

    #[test]
    fn load_without_manual_mode_resets_preference() {
        let keys = StorageKeys::default();
        let (backend, store) = store_with(&[("md-preview-theme", "dark")]);
        let resolver = ThemeResolver::load(&store, &keys, false);
        assert_eq!(resolver.mode(), ThemeMode::System);
        assert_eq!(resolver.preference(), ThemePreference::System);
        assert_eq!(resolver.resolved(), Theme::Light);
        assert_eq!(backend.value("md-preview-theme").as_deref(), Some("system"));
    }

    #[test]
    fn load_in_manual_mode_keeps_pinned_theme() {
        let keys = StorageKeys::default();
        let (_, store) = store_with(&[
            ("md-preview-theme", "dark"),
            ("md-preview-theme-mode", "manual"),
        ]);
        let resolver = ThemeResolver::load(&store, &keys, false);
        assert_eq!(resolver.mode(), ThemeMode::Manual);
        assert_eq!(resolver.resolved(), Theme::Dark);
    }

    #[test]
    fn toggle_persists_manual_mode_and_preference() {
        let keys = StorageKeys::default();
        let (backend, store) = store_with(&[]);
        let mut resolver = ThemeResolver::load(&store, &keys, true);
        assert_eq!(resolver.toggle(false, &store, &keys), Theme::Light);
        assert_eq!(backend.value("md-preview-theme-mode").as_deref(), Some("manual"));
        assert_eq!(backend.value("md-preview-theme").as_deref(), Some("light"));
    }

    #[test]
    fn os_change_reapplies_in_system_mode() {
        let keys = StorageKeys::default();
        let (_, store) = store_with(&[]);
        let mut resolver = ThemeResolver::load(&store, &keys, false);
        assert_eq!(resolver.os_changed(true), Some(Theme::Dark));
        assert_eq!(resolver.os_changed(false), Some(Theme::Light));
    }

    #[test]
    fn manual_toggle_pins_theme_against_os_changes() {
        let keys = StorageKeys::default();
        let (_, store) = store_with(&[]);
        let mut resolver = ThemeResolver::load(&store, &keys, false);
        resolver.toggle(false, &store, &keys);
        assert_eq!(resolver.os_changed(true), None);
        assert_eq!(resolver.resolved(), Theme::Light);
    }
}
