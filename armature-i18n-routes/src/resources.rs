//! Translation bundles as seen by the expander
//!
//! [`BundleSource`] lists the bundles to consult; [`LocaleBundle`] is the
//! per-locale lookup, keyed by canonical URI. [`RoutesResources`] is the
//! stock source, usually loaded from a directory of
//! `routes_<locale>.properties` files.

use crate::{I18nRoutesConfig, Result};
use armature_i18n::{Locale, MessageBundle, Messages};
use std::path::Path;

/// One locale's canonical-URI → translated-URI table.
pub trait LocaleBundle {
    fn locale(&self) -> &Locale;

    fn contains_key(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&str>;
}

impl LocaleBundle for MessageBundle {
    fn locale(&self) -> &Locale {
        MessageBundle::locale(self)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.has(key)
    }

    fn get(&self, key: &str) -> Option<&str> {
        MessageBundle::get(self, key)
    }
}

/// The bundles installed for route translation, in a stable order.
pub trait BundleSource {
    fn available_bundles(&self) -> Vec<&dyn LocaleBundle>;
}

impl<T: BundleSource + ?Sized> BundleSource for &T {
    fn available_bundles(&self) -> Vec<&dyn LocaleBundle> {
        (**self).available_bundles()
    }
}

impl BundleSource for [MessageBundle] {
    fn available_bundles(&self) -> Vec<&dyn LocaleBundle> {
        self.iter().map(|b| b as &dyn LocaleBundle).collect()
    }
}

impl BundleSource for Vec<MessageBundle> {
    fn available_bundles(&self) -> Vec<&dyn LocaleBundle> {
        self.as_slice().available_bundles()
    }
}

impl BundleSource for Messages {
    fn available_bundles(&self) -> Vec<&dyn LocaleBundle> {
        self.bundles().available_bundles()
    }
}

/// Route translation bundles.
#[derive(Debug, Clone, Default)]
pub struct RoutesResources {
    messages: Messages,
}

impl RoutesResources {
    /// No bundles: only default-locale and explicitly localized routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `<basename>_<locale>.{properties,json}` file in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>, basename: &str) -> Result<Self> {
        let mut messages = Messages::new();
        messages.load_from_dir(dir, basename)?;
        Ok(Self { messages })
    }

    /// Load from the configured bundle directory, if one is set.
    pub fn from_config(config: &I18nRoutesConfig) -> Result<Self> {
        match &config.bundle_dir {
            Some(dir) => Self::from_dir(dir, &config.bundle_basename),
            None => Ok(Self::new()),
        }
    }

    pub fn with_bundle(mut self, bundle: MessageBundle) -> Self {
        self.messages.add_bundle(bundle);
        self
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }
}

impl From<Messages> for RoutesResources {
    fn from(messages: Messages) -> Self {
        Self { messages }
    }
}

impl BundleSource for RoutesResources {
    fn available_bundles(&self) -> Vec<&dyn LocaleBundle> {
        self.messages.available_bundles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_message_bundle_lookup() {
        let bundle = MessageBundle::new(Locale::es_es()).with("/a", "/b");
        let bundle: &dyn LocaleBundle = &bundle;

        assert_eq!(bundle.locale(), &Locale::es_es());
        assert!(bundle.contains_key("/a"));
        assert_eq!(bundle.get("/a"), Some("/b"));
        assert!(!bundle.contains_key("/b"));
    }

    #[test]
    fn test_available_bundles_keep_order() {
        let resources = RoutesResources::new()
            .with_bundle(MessageBundle::new(Locale::pt_br()))
            .with_bundle(MessageBundle::new(Locale::es_es()));

        let locales: Vec<String> = resources
            .available_bundles()
            .iter()
            .map(|b| b.locale().tag())
            .collect();
        assert_eq!(locales, vec!["pt-BR", "es-ES"]);
    }

    #[test]
    fn test_vec_source() {
        let bundles = vec![MessageBundle::new(Locale::fr())];
        assert_eq!(bundles.available_bundles().len(), 1);
        assert!(Vec::<MessageBundle>::new().available_bundles().is_empty());
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("urls_es_ES.properties"), "/a=/b").unwrap();

        let config = I18nRoutesConfig {
            bundle_dir: Some(dir.path().to_path_buf()),
            bundle_basename: "urls".to_string(),
            ..I18nRoutesConfig::default()
        };
        let resources = RoutesResources::from_config(&config).unwrap();
        assert_eq!(resources.messages().len(), 1);

        let empty = RoutesResources::from_config(&I18nRoutesConfig::default()).unwrap();
        assert!(empty.available_bundles().is_empty());
    }
}
