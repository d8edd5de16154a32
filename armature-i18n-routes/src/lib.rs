//! Locale-aware Route Expansion for Armature
//!
//! Expands each controller method into every URL pattern that must reach
//! it across locales:
//!
//! - **Default locale**: the canonical URI under `/<lang>[-<country>]`
//! - **Translated**: one route per bundle that maps the canonical URI
//! - **Localized paths**: explicit per-locale paths on the method, prefixed
//!   by the controller's path for the same locale
//! - **Base**: the canonical URI itself, added when a whole controller is
//!   expanded
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use armature_i18n_routes::prelude::*;
//!
//! let config = I18nRoutesConfig::from_env()?;
//! let expander = I18nRoutesExpander::from_config(PatternRouter, &config)?;
//!
//! let controller = ControllerDescriptor::new("ProductsController")
//!     .path("/products")
//!     .localized_path("es-es", "/productos")
//!     .method(
//!         MethodDescriptor::new("show")
//!             .path("/{id}")
//!             .get()
//!             .localized_path("es-es", "/{id}"),
//!     );
//!
//! let routes = expander.rules_for(&controller)?;
//! // /en-us/products/{id}, /es-es/productos/{id}, /products/{id},
//! // plus any bundle translations
//! ```
//!
//! # Bundles
//!
//! Route bundles are keyed by canonical URI:
//!
//! ```text
//! # routes_es_ES.properties
//! /products/list = /productos/lista
//! ```
//!
//! # Ordering
//!
//! Routes are appended in expansion order and never deduplicated; the
//! routing engine resolves overlaps by priority and list order.

mod adapter;
mod config;
mod convention;
mod descriptor;
mod engine;
mod error;
mod expander;
pub mod localized;
mod resources;
mod route;

pub use adapter::build_with_locale_prefix;
pub use config::{DEFAULT_BUNDLE_BASENAME, ENV_PREFIX, I18nRoutesConfig};
pub use convention::{CanonicalUriProvider, PathAnnotationUris};
pub use descriptor::{
    ControllerDescriptor, Handler, HttpMethod, LocalizedPath, LocalizedPaths, MethodDescriptor,
    Priority,
};
pub use engine::{PatternRouter, RouteBuilder, RoutingEngine};
pub use error::RoutesError;
pub use expander::{I18nRoutesExpander, locale_prefix};
pub use localized::fix_leading_slash;
pub use resources::{BundleSource, LocaleBundle, RoutesResources};
pub use route::{ExpandedRoute, RouteList};

/// Result type for route expansion
pub type Result<T> = std::result::Result<T, RoutesError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BundleSource, CanonicalUriProvider, ControllerDescriptor, ExpandedRoute, HttpMethod,
        I18nRoutesConfig, I18nRoutesExpander, LocalizedPath, MethodDescriptor, PatternRouter,
        Priority, Result, RouteList, RoutesError, RoutesResources, RoutingEngine,
    };
}
