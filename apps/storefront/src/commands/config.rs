//! # Config and Locale Commands
//!
//! Configuration retrieval and the header language switcher.

use serde::Serialize;
use shoptoshop_core::Language;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, LocaleState};

/// A language option in the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub active: bool,
}

/// Gets the current storefront configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Languages offered by the switcher, with the active one marked.
pub fn list_languages(locale: &LocaleState) -> Vec<LanguageOption> {
    let active = locale.language();
    Language::ALL
        .into_iter()
        .map(|lang| LanguageOption {
            code: lang.code(),
            name: lang.name(),
            active: lang == active,
        })
        .collect()
}

/// Switches the active language.
///
/// ## Arguments
/// * `code` - Language tag such as `pt`, `ES` or `pt-PT`
///
/// ## Errors
/// - `VALIDATION_ERROR` for unsupported languages
pub fn set_language(locale: &LocaleState, code: &str) -> Result<Vec<LanguageOption>, ApiError> {
    debug!(code = %code, "set_language command");
    let language: Language = code.parse()?;
    locale.set_language(language);
    Ok(list_languages(locale))
}

/// Label for `key` in the active language, or `key` itself when missing.
pub fn translate(locale: &LocaleState, key: &str) -> String {
    locale.t(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_set_language() {
        let locale = LocaleState::default();

        let options = set_language(&locale, "pt-PT").unwrap();

        assert_eq!(locale.language(), Language::Pt);
        assert!(options.iter().any(|o| o.code == "pt" && o.active));
        assert_eq!(options.iter().filter(|o| o.active).count(), 1);
        assert_eq!(translate(&locale, "checkout"), "Finalizar Compra");
    }

    #[test]
    fn test_set_unknown_language() {
        let locale = LocaleState::default();
        let err = set_language(&locale, "fr").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(locale.language(), Language::En);
    }

    #[test]
    fn test_translate_missing_key() {
        let locale = LocaleState::default();
        assert_eq!(translate(&locale, "flashSale"), "flashSale");
    }

    #[test]
    fn test_get_config_serializes_camel_case() {
        let config = get_config(&ConfigState::default());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["storeName"], "ShopToShop");
        assert_eq!(json["defaultLanguage"], "en");
    }
}
