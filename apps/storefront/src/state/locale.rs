//! # Locale State
//!
//! The active storefront language. Unlike `ConfigState` this changes at
//! runtime (language switcher in the header), so it sits behind an `RwLock`.

use std::sync::{Arc, PoisonError, RwLock};

use shoptoshop_core::{Language, Translator};
use tracing::{debug, info};

/// Shared active language.
#[derive(Debug, Clone, Default)]
pub struct LocaleState {
    language: Arc<RwLock<Language>>,
}

impl LocaleState {
    pub fn new(language: Language) -> Self {
        LocaleState {
            language: Arc::new(RwLock::new(language)),
        }
    }

    pub fn language(&self) -> Language {
        *self.language.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches the active language. Returns `false` if it was already active.
    pub fn set_language(&self, language: Language) -> bool {
        let mut current = self
            .language
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == language {
            return false;
        }
        let previous = *current;
        info!(from = %previous, to = %language, "Language changed");
        *current = language;
        true
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language())
    }

    /// Label for `key` in the active language, or `key` when missing.
    pub fn t(&self, key: &str) -> String {
        let translator = self.translator();
        if !translator.has(key) {
            debug!(key, "No translation, showing key");
        }
        translator.t(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_language() {
        let locale = LocaleState::default();
        assert_eq!(locale.language(), Language::En);

        assert!(locale.set_language(Language::Es));
        assert!(!locale.set_language(Language::Es));
        assert_eq!(locale.t("cart"), "Carrito");
    }

    #[test]
    fn test_clones_share_language() {
        let locale = LocaleState::new(Language::En);
        let other = locale.clone();

        other.set_language(Language::Pt);
        assert_eq!(locale.language(), Language::Pt);
        assert_eq!(locale.t("missingKey"), "missingKey");
    }
}
