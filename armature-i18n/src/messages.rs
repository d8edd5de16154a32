//! Translation Bundles
//!
//! Provides loading of per-locale key/value tables from `.properties` and
//! JSON files.

use crate::{I18nError, Locale, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A bundle of messages for a single locale.
#[derive(Debug, Clone)]
pub struct MessageBundle {
    locale: Locale,
    /// Messages keyed by message ID
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// Create a new empty bundle.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            messages: HashMap::new(),
        }
    }

    /// Load from `.properties` text.
    ///
    /// Supports `#`/`!` comments, `=`, `:` and whitespace separators,
    /// backslash line continuations and the standard escapes including
    /// `\uXXXX`. Later duplicates of a key replace earlier ones.
    pub fn from_properties(locale: Locale, source: &str) -> Result<Self> {
        let mut bundle = Self::new(locale);

        for line in logical_lines(source) {
            let (key, value) = split_entry(&line);
            bundle.add(unescape(key)?, unescape(value)?);
        }

        Ok(bundle)
    }

    /// Load from a flat JSON object of strings.
    pub fn from_json(locale: Locale, json: &str) -> Result<Self> {
        let data: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut bundle = Self::new(locale);

        for (key, value) in data {
            match value {
                serde_json::Value::String(s) => bundle.add(key, s),
                other => {
                    return Err(I18nError::ParseError(format!(
                        "expected a string for key `{}`, found {}",
                        key, other
                    )));
                }
            }
        }

        Ok(bundle)
    }

    /// Add a message.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Builder-style [`MessageBundle::add`].
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(key, message);
        self
    }

    /// Get a message.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(|s| s.as_str())
    }

    /// Check if bundle has a message.
    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Get all message keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    /// Number of messages in the bundle.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the bundle holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The locale this bundle translates into.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Copy every message of `other` into this bundle, replacing keys both define.
    pub fn merge(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
    }
}

/// Collection of message bundles for multiple locales, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    bundles: Vec<MessageBundle>,
}

impl Messages {
    /// Create a new messages collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bundle, replacing any bundle already registered for its locale.
    pub fn add_bundle(&mut self, bundle: MessageBundle) {
        match self
            .bundles
            .iter_mut()
            .find(|existing| existing.locale == bundle.locale)
        {
            Some(existing) => *existing = bundle,
            None => self.bundles.push(bundle),
        }
    }

    /// Add a bundle, merging it into any bundle already registered for its
    /// locale. Returns `true` when a merge happened.
    pub fn merge_bundle(&mut self, bundle: MessageBundle) -> bool {
        match self
            .bundles
            .iter_mut()
            .find(|existing| existing.locale == bundle.locale)
        {
            Some(existing) => {
                existing.merge(bundle);
                true
            }
            None => {
                self.bundles.push(bundle);
                false
            }
        }
    }

    /// Get a bundle for a locale.
    pub fn get_bundle(&self, locale: &Locale) -> Option<&MessageBundle> {
        // Try exact match first
        if let Some(bundle) = self.bundles.iter().find(|b| &b.locale == locale) {
            return Some(bundle);
        }

        // Try language-only fallback
        if locale.region.is_some() {
            let lang_only = locale.language_only();
            return self.bundles.iter().find(|b| b.locale == lang_only);
        }

        None
    }

    /// All bundles, in the order they were added.
    pub fn bundles(&self) -> &[MessageBundle] {
        &self.bundles
    }

    /// Locales that have a bundle.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.bundles.iter().map(|b| &b.locale)
    }

    /// Number of bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether no bundle has been added.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Load from a directory.
    ///
    /// Expected structure for `basename = "routes"`:
    /// - `locales/routes.properties` (root bundle, skipped)
    /// - `locales/routes_es_ES.properties`
    /// - `locales/routes_pt_BR.json`
    ///
    /// Files are read in file name order; files that do not belong to
    /// `basename` are ignored.
    pub fn load_from_dir(&mut self, dir: impl AsRef<Path>, basename: &str) -> Result<()> {
        let dir = dir.as_ref();

        if !dir.exists() {
            return Err(I18nError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Directory not found: {:?}", dir),
            )));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.sort();

        let prefix = format!("{}_", basename);
        let mut loaded = 0usize;

        for path in paths {
            let Some(format) = BundleFormat::from_path(&path) else {
                continue;
            };

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| I18nError::ParseError(format!("Invalid filename: {:?}", path)))?;

            let Some(tag) = stem.strip_prefix(&prefix) else {
                if stem == basename {
                    tracing::trace!(path = ?path, "Skipping root bundle without locale");
                }
                continue;
            };

            let Ok(locale) = Locale::parse(tag) else {
                tracing::trace!(path = ?path, tag, "Skipping bundle file without a valid locale");
                continue;
            };
            let content = fs::read_to_string(&path)?;
            let bundle = match format {
                BundleFormat::Properties => MessageBundle::from_properties(locale, &content)?,
                BundleFormat::Json => MessageBundle::from_json(locale, &content)?,
            };

            tracing::debug!(
                locale = %bundle.locale,
                entries = bundle.len(),
                path = ?path,
                "Loaded message bundle"
            );
            let locale = bundle.locale.clone();
            if self.merge_bundle(bundle) {
                tracing::debug!(locale = %locale, path = ?path, "Merged into existing bundle");
            }
            loaded += 1;
        }

        tracing::info!(dir = ?dir, basename, bundles = loaded, "Message bundles loaded");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BundleFormat {
    Properties,
    Json,
}

impl BundleFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "properties" => Some(BundleFormat::Properties),
            "json" => Some(BundleFormat::Json),
            _ => None,
        }
    }
}

/// Joins continuation lines and drops blanks and comments.
fn logical_lines(source: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in source.lines() {
        let line = raw.trim_start();

        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing && !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[i..].trim_start();
                let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
                return (&line[..i], rest.trim_start());
            }
            _ => {}
        }
    }

    (line, "")
}

fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        I18nError::ParseError(format!("Malformed \\uxxxx escape: \\u{}", hex))
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
