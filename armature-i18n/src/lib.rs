//! Internationalization (i18n) Support for Armature
//!
//! Provides the locale model and the per-locale translation bundles the
//! rest of the framework consumes:
//!
//! - **Locales**: Parse BCP 47 (`en-US`) and underscore-separated (`en_US`) tags
//! - **Process default**: Derive the default locale from `LC_ALL`/`LANG`
//! - **Bundles**: Load `.properties` and flat JSON translation tables
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use armature_i18n::{Locale, Messages};
//!
//! let mut messages = Messages::new();
//! messages.load_from_dir("locales/", "routes")?;
//!
//! let es = messages.get_bundle(&Locale::es_es()).unwrap();
//! assert_eq!(es.get("/prefix/about"), Some("/prefijo/acerca"));
//! ```
//!
//! # Bundle Files
//!
//! Bundle files are named `<basename>_<locale>.<ext>`:
//!
//! ```text
//! locales/
//!   routes.properties          # root bundle, no locale
//!   routes_es_ES.properties
//!   routes_pt_BR.json
//! ```

mod error;
mod locale;
mod messages;

pub use error::I18nError;
pub use locale::Locale;
pub use messages::{MessageBundle, Messages};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{I18nError, Locale, MessageBundle, Messages, Result};
}
