// Configuration for localized route expansion

use crate::{Result, RoutesError};
use armature_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Prefix of the environment variables read by [`I18nRoutesConfig::from_env`].
pub const ENV_PREFIX: &str = "ARMATURE_I18N_ROUTES_";

/// Default base name of route bundle files (`routes_es_ES.properties`).
pub const DEFAULT_BUNDLE_BASENAME: &str = "routes";

/// Localized routing settings.
///
/// ```toml
/// default_locale = "pt-BR"
/// bundle_dir = "config/locales"
/// bundle_basename = "routes"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nRoutesConfig {
    /// Locale of the unprefixed-translation routes; the process locale when unset
    pub default_locale: Option<String>,
    /// Directory holding the route bundles
    pub bundle_dir: Option<PathBuf>,
    pub bundle_basename: String,
}

impl Default for I18nRoutesConfig {
    fn default() -> Self {
        Self {
            default_locale: None,
            bundle_dir: None,
            bundle_basename: DEFAULT_BUNDLE_BASENAME.to_string(),
        }
    }
}

impl I18nRoutesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| RoutesError::Config(format!("TOML parse error: {}", e)))
    }

    /// Read `ARMATURE_I18N_ROUTES_DEFAULT_LOCALE`, `..._BUNDLE_DIR` and
    /// `..._BUNDLE_BASENAME` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::vars())
    }

    /// Same as [`I18nRoutesConfig::from_env`], over explicit variables.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value: String = value.into();

            match name {
                "DEFAULT_LOCALE" => config.default_locale = Some(value),
                "BUNDLE_DIR" => config.bundle_dir = Some(PathBuf::from(value)),
                "BUNDLE_BASENAME" => {
                    if value.trim().is_empty() {
                        return Err(RoutesError::Config(format!(
                            "{}BUNDLE_BASENAME must not be empty",
                            ENV_PREFIX
                        )));
                    }
                    config.bundle_basename = value;
                }
                _ => {}
            }
        }

        Ok(config)
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = Some(dir.into());
        self
    }

    /// The configured default locale, or the process locale when unset.
    pub fn resolve_default_locale(&self) -> Result<Locale> {
        match &self.default_locale {
            Some(tag) => Ok(Locale::parse(tag)?),
            None => Ok(Locale::system_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = I18nRoutesConfig::default();
        assert_eq!(config.bundle_basename, "routes");
        assert!(config.default_locale.is_none());
        assert!(config.bundle_dir.is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = I18nRoutesConfig::from_toml_str(
            r#"
            default_locale = "pt-BR"
            bundle_dir = "config/locales"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_locale.as_deref(), Some("pt-BR"));
        assert_eq!(config.bundle_dir, Some(PathBuf::from("config/locales")));
        assert_eq!(config.bundle_basename, "routes");
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = I18nRoutesConfig::from_toml_str("default_locale = 3");
        assert!(matches!(result, Err(RoutesError::Config(_))));
    }

    #[test]
    fn test_from_vars() {
        let config = I18nRoutesConfig::from_vars([
            ("ARMATURE_I18N_ROUTES_DEFAULT_LOCALE", "es-ES"),
            ("ARMATURE_I18N_ROUTES_BUNDLE_BASENAME", "urls"),
            ("ARMATURE_I18N_ROUTES_UNKNOWN", "ignored"),
            ("LANG", "fr_FR.UTF-8"),
        ])
        .unwrap();

        assert_eq!(config.default_locale.as_deref(), Some("es-ES"));
        assert_eq!(config.bundle_basename, "urls");
        assert!(config.bundle_dir.is_none());
    }

    #[test]
    fn test_from_vars_empty_basename() {
        let result = I18nRoutesConfig::from_vars([("ARMATURE_I18N_ROUTES_BUNDLE_BASENAME", " ")]);
        assert!(matches!(result, Err(RoutesError::Config(_))));
    }

    #[test]
    fn test_resolve_default_locale() {
        let config = I18nRoutesConfig::new().with_default_locale("es_ES");
        assert_eq!(config.resolve_default_locale().unwrap(), Locale::es_es());

        let invalid = I18nRoutesConfig::new().with_default_locale("not a locale");
        assert!(matches!(invalid.resolve_default_locale(), Err(RoutesError::I18n(_))));
    }
}
