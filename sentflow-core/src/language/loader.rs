//! Language configuration loader
//!
//! Manages embedded language rules with caching.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::error::{CoreError, Result};
use crate::language::config::LanguageConfig;
use crate::language::runtime::LanguageRules;

/// Code, long name and TOML source of every embedded language
const EMBEDDED_SOURCES: &[(&str, &str, &str)] = &[
    ("en", "english", include_str!("../../configs/languages/english.toml")),
    ("de", "german", include_str!("../../configs/languages/german.toml")),
    ("ja", "japanese", include_str!("../../configs/languages/japanese.toml")),
    ("zh", "chinese", include_str!("../../configs/languages/chinese.toml")),
];

/// Embedded language configurations
static EMBEDDED: OnceLock<HashMap<String, Arc<LanguageRules>>> = OnceLock::new();

/// Load language rules by code or long name
pub fn get_rules(code: &str) -> Result<Arc<LanguageRules>> {
    let embedded = EMBEDDED.get_or_init(|| {
        let mut map = HashMap::new();

        for (code, name, source) in EMBEDDED_SOURCES {
            match load_language(source) {
                Ok(rules) => {
                    let rules = Arc::new(rules);
                    map.insert(code.to_string(), rules.clone());
                    map.insert(name.to_string(), rules);
                }
                Err(e) => {
                    tracing::warn!(
                        language = *code,
                        error = %e,
                        "failed to load embedded language"
                    );
                }
            }
        }

        map
    });

    embedded
        .get(&code.to_ascii_lowercase())
        .cloned()
        .ok_or_else(|| CoreError::UnsupportedLanguage {
            backend: "rules".to_string(),
            language: code.to_string(),
        })
}

/// Codes of the embedded languages, in registration order
pub fn supported_languages() -> Vec<(&'static str, &'static str)> {
    EMBEDDED_SOURCES
        .iter()
        .map(|(code, name, _)| (*code, *name))
        .collect()
}

/// Parse and compile a language table from TOML text
pub fn load_language(toml_str: &str) -> Result<LanguageRules> {
    let config: LanguageConfig = toml::from_str(toml_str).map_err(|e| CoreError::InvalidTable {
        reason: format!("failed to parse language config: {e}"),
    })?;

    LanguageRules::from_config(&config).map_err(|reason| CoreError::InvalidTable { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_embedded_language_loads() {
        for (code, name) in supported_languages() {
            let by_code = get_rules(code).unwrap();
            let by_name = get_rules(name).unwrap();
            assert_eq!(by_code.code(), code);
            assert_eq!(by_name.code(), code);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(get_rules("EN").unwrap().code(), "en");
    }

    #[test]
    fn test_unknown_language() {
        let err = get_rules("tlh").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLanguage { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_english_abbreviations() {
        let rules = get_rules("en").unwrap();
        assert!(rules.is_abbreviation("Dr"));
        assert!(rules.is_abbreviation("e.g"));
        assert!(!rules.is_abbreviation("Jones"));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = load_language("not = [valid").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTable { .. }));
    }
}
