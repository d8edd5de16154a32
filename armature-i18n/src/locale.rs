//! Locale Representation
//!
//! Provides the locale type shared by bundles and localized routes, plus
//! detection of the process default locale.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variables consulted for the process locale, in precedence order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Represents a locale (language + optional script and region).
///
/// # Examples
///
/// ```
/// use armature_i18n::Locale;
/// use std::str::FromStr;
///
/// let en = Locale::new("en", None::<&str>);
/// let en_us = Locale::new("en", Some("US"));
/// let es_es = Locale::from_str("es_ES").unwrap();
/// assert_eq!(es_es.tag(), "es-ES");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language code (ISO 639-1, e.g., "en", "fr", "de")
    pub language: String,
    /// Optional region code (ISO 3166-1, e.g., "US", "GB", "FR")
    pub region: Option<String>,
    /// Optional script (e.g., "Latn", "Hans")
    pub script: Option<String>,
}

impl Locale {
    /// Create a new locale.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
            script: None,
        }
    }

    /// Create a locale with script.
    pub fn with_script(
        language: impl Into<String>,
        script: Option<impl Into<String>>,
        region: Option<impl Into<String>>,
    ) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
            script: script.map(|s| title_case(&s.into())),
        }
    }

    /// Parse from a BCP 47 tag (`zh-Hans-CN`) or an underscore-separated tag (`pt_BR`).
    pub fn parse(tag: &str) -> Result<Self> {
        let parts: Vec<&str> = tag.trim().split(['-', '_']).collect();

        let language = parts[0].to_lowercase();

        // 2-3 letter language code
        if language.len() < 2
            || language.len() > 3
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts.iter().skip(1) {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                script = Some(title_case(part));
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                // UN M.49 area code
                region = Some(part.to_string());
            } else {
                return Err(I18nError::InvalidLocale(tag.to_string()));
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// Parse a POSIX locale value such as `es_ES.UTF-8` or `de_DE@euro`.
    ///
    /// Returns `None` for the `C`/`POSIX` locales and for anything that
    /// does not parse as a language tag.
    pub fn from_posix(value: &str) -> Option<Self> {
        let tag = value
            .split(['.', '@'])
            .next()
            .map(str::trim)
            .unwrap_or_default();

        if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
            return None;
        }

        Self::parse(tag).ok()
    }

    /// Detect the process default locale.
    ///
    /// Consults `LC_ALL`, `LC_MESSAGES` and `LANG` in that order and falls
    /// back to [`Locale::default`] (`en-US`) when none yields a locale.
    pub fn system_default() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find_map(|value| Self::from_posix(&value))
            .unwrap_or_default()
    }

    /// Get the language tag (e.g., "en-US").
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(ref script) = self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(ref region) = self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// Get language-only locale (strips region).
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: self.script.clone(),
            region: None,
        }
    }

    // Common locales

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// English (GB)
    pub fn en_gb() -> Self {
        Self::new("en", Some("GB"))
    }

    /// French (no region)
    pub fn fr() -> Self {
        Self::new("fr", None::<&str>)
    }

    /// French (France)
    pub fn fr_fr() -> Self {
        Self::new("fr", Some("FR"))
    }

    /// German (Germany)
    pub fn de_de() -> Self {
        Self::new("de", Some("DE"))
    }

    /// Spanish (no region)
    pub fn es() -> Self {
        Self::new("es", None::<&str>)
    }

    /// Spanish (Spain)
    pub fn es_es() -> Self {
        Self::new("es", Some("ES"))
    }

    /// Portuguese (Brazil)
    pub fn pt_br() -> Self {
        Self::new("pt", Some("BR"))
    }

    /// Chinese (China, Simplified)
    pub fn zh_cn() -> Self {
        Self::with_script("zh", Some("Hans"), Some("CN"))
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}
