//! Route expansion
//!
//! For every canonical URI of a method, [`I18nRoutesExpander`] emits:
//!
//! 1. one route per bundle that translates the URI, under that bundle's
//!    locale prefix and with the method's priority (a translation without
//!    a leading slash gets one);
//! 2. the untranslated URI under the default locale's prefix, whether or
//!    not a translation exists;
//!
//! and then, once per method, the routes for its explicit localized paths
//! (see [`crate::localized`]). Whole-controller expansion also appends the
//! unprefixed canonical URIs after all localized routes.
//!
//! # Example
//!
//! ```
//! use armature_i18n::{Locale, MessageBundle};
//! use armature_i18n_routes::{
//!     ControllerDescriptor, I18nRoutesExpander, MethodDescriptor, PatternRouter,
//!     RoutesResources,
//! };
//!
//! let bundles = RoutesResources::new().with_bundle(
//!     MessageBundle::new(Locale::es_es()).with("/products/list", "/productos/lista"),
//! );
//! let expander = I18nRoutesExpander::new(PatternRouter, bundles)
//!     .with_default_locale(Locale::en_us());
//!
//! let controller = ControllerDescriptor::new("ProductsController")
//!     .method(MethodDescriptor::new("list"));
//! let routes = expander.rules_for(&controller).unwrap();
//!
//! assert_eq!(
//!     routes.patterns(),
//!     vec!["/es-es/productos/lista", "/en-us/products/list", "/products/list"]
//! );
//! ```

use crate::adapter::build_with_locale_prefix;
use crate::localized::{fix_leading_slash, localized_routes};
use crate::{
    BundleSource, CanonicalUriProvider, ControllerDescriptor, I18nRoutesConfig, MethodDescriptor,
    PathAnnotationUris, Result, RouteList, RoutesResources, RoutingEngine,
};
use armature_i18n::Locale;

/// The `/language[-country]` URL prefix for a locale.
///
/// The country is lower-cased and omitted when absent; the script is not
/// part of the prefix.
pub fn locale_prefix(locale: &Locale) -> String {
    let mut prefix = format!("/{}", locale.language);

    if let Some(region) = locale.region.as_deref().filter(|r| !r.is_empty()) {
        prefix.push('-');
        prefix.push_str(&region.to_lowercase());
    }

    prefix
}

/// Expands controller methods into locale-prefixed routes.
///
/// The expander holds no route state: every call appends to the list the
/// caller passes in, or returns a fresh one.
#[derive(Debug, Clone)]
pub struct I18nRoutesExpander<E, B, U = PathAnnotationUris> {
    engine: E,
    bundles: B,
    uris: U,
    default_locale: Locale,
}

impl<E: RoutingEngine, B: BundleSource> I18nRoutesExpander<E, B> {
    /// Create an expander using the path-annotation URI convention and the
    /// process default locale.
    pub fn new(engine: E, bundles: B) -> Self {
        Self {
            engine,
            bundles,
            uris: PathAnnotationUris,
            default_locale: Locale::system_default(),
        }
    }
}

impl<E: RoutingEngine> I18nRoutesExpander<E, RoutesResources> {
    /// Create an expander from configuration, loading bundles from the
    /// configured directory.
    pub fn from_config(engine: E, config: &I18nRoutesConfig) -> Result<Self> {
        let bundles = RoutesResources::from_config(config)?;
        let default_locale = config.resolve_default_locale()?;

        tracing::debug!(
            default_locale = %default_locale,
            bundles = bundles.messages().len(),
            "Configured localized route expander"
        );

        Ok(Self {
            engine,
            bundles,
            uris: PathAnnotationUris,
            default_locale,
        })
    }
}

impl<E, B, U> I18nRoutesExpander<E, B, U> {
    /// Replace the canonical URI provider.
    pub fn with_uri_provider<V: CanonicalUriProvider>(self, uris: V) -> I18nRoutesExpander<E, B, V> {
        I18nRoutesExpander {
            engine: self.engine,
            bundles: self.bundles,
            uris,
            default_locale: self.default_locale,
        }
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn bundles(&self) -> &B {
        &self.bundles
    }
}

impl<E, B, U> I18nRoutesExpander<E, B, U>
where
    E: RoutingEngine,
    B: BundleSource,
    U: CanonicalUriProvider,
{
    /// Expand one method, appending its routes to `routes`.
    ///
    /// Returns the canonical URIs the routes were derived from. On error
    /// nothing is appended.
    pub fn expand_into(
        &self,
        method: &MethodDescriptor,
        controller: &ControllerDescriptor,
        routes: &mut RouteList,
    ) -> Result<Vec<String>> {
        let uris = self.uris.uris_for(method, controller)?;
        let priority = method.effective_priority();
        let default_prefix = locale_prefix(&self.default_locale);
        let bundles = self.bundles.available_bundles();

        let mut expanded = RouteList::new();

        for uri in &uris {
            for bundle in &bundles {
                if bundle.contains_key(uri) {
                    let translated = fix_leading_slash(bundle.get(uri).unwrap_or_default());
                    expanded.push(build_with_locale_prefix(
                        &self.engine,
                        method,
                        controller,
                        &translated,
                        &locale_prefix(bundle.locale()),
                        priority,
                    )?);
                }
            }

            expanded.push(build_with_locale_prefix(
                &self.engine,
                method,
                controller,
                uri,
                &default_prefix,
                priority,
            )?);
        }

        localized_routes(&self.engine, method, controller, &mut expanded)?;

        tracing::debug!(
            controller = %controller.name,
            method = %method.name,
            uris = uris.len(),
            routes = expanded.len(),
            "Expanded localized routes"
        );

        routes.extend(expanded);
        Ok(uris)
    }

    /// Expand one method into a fresh list.
    pub fn expand(
        &self,
        method: &MethodDescriptor,
        controller: &ControllerDescriptor,
    ) -> Result<RouteList> {
        let mut routes = RouteList::new();
        self.expand_into(method, controller, &mut routes)?;
        Ok(routes)
    }

    /// Expand every method of `controller`, in declaration order.
    ///
    /// The localized routes of every method come first, followed by one
    /// unprefixed base route per canonical URI.
    pub fn rules_for(&self, controller: &ControllerDescriptor) -> Result<RouteList> {
        let mut routes = RouteList::new();
        self.controller_rules(controller, &mut routes)?;
        Ok(routes)
    }

    /// Expand every method of every controller into one routing table.
    pub fn rules_for_all<'a>(
        &self,
        controllers: impl IntoIterator<Item = &'a ControllerDescriptor>,
    ) -> Result<RouteList> {
        let mut routes = RouteList::new();
        for controller in controllers {
            self.controller_rules(controller, &mut routes)?;
        }

        tracing::info!(routes = routes.len(), "Localized routing table built");
        Ok(routes)
    }

    fn controller_rules(
        &self,
        controller: &ControllerDescriptor,
        routes: &mut RouteList,
    ) -> Result<()> {
        let mut localized = RouteList::new();
        let mut base = RouteList::new();

        for method in &controller.methods {
            let uris = self.expand_into(method, controller, &mut localized)?;
            let priority = method.effective_priority();
            for uri in &uris {
                base.push(build_with_locale_prefix(
                    &self.engine,
                    method,
                    controller,
                    uri,
                    "",
                    priority,
                )?);
            }
        }

        tracing::debug!(
            controller = %controller.name,
            localized = localized.len(),
            base = base.len(),
            "Expanded controller routes"
        );

        routes.extend(localized);
        routes.extend(base);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpMethod, LocalizedPath, PatternRouter, Priority, RoutesError};
    use armature_i18n::MessageBundle;

    fn expander(bundles: Vec<MessageBundle>) -> I18nRoutesExpander<PatternRouter, Vec<MessageBundle>> {
        I18nRoutesExpander::new(PatternRouter, bundles).with_default_locale(Locale::en_us())
    }

    #[test]
    fn test_locale_prefix() {
        assert_eq!(locale_prefix(&Locale::en()), "/en");
        assert_eq!(locale_prefix(&Locale::en_us()), "/en-us");
        assert_eq!(locale_prefix(&Locale::zh_cn()), "/zh-cn");
        assert_eq!(
            locale_prefix(&Locale::with_script("zh", Some("Hant"), Some("TW"))),
            "/zh-tw"
        );
        assert_eq!(locale_prefix(&Locale::parse("es-419").unwrap()), "/es-419");

        let empty_region = Locale {
            language: "pt".to_string(),
            region: Some(String::new()),
            script: None,
        };
        assert_eq!(locale_prefix(&empty_region), "/pt");
    }

    #[test]
    fn test_no_bundles_no_overrides() {
        let controller = ControllerDescriptor::new("AnnotatedController").path("/prefix");
        let method = MethodDescriptor::new("withoutPath");

        let routes = expander(vec![]).expand(&method, &controller).unwrap();

        assert_eq!(routes.patterns(), vec!["/en-us/prefix/withoutPath"]);
    }

    #[test]
    fn test_translated_then_default() {
        let controller = ControllerDescriptor::new("C").path("/prefix");
        let method = MethodDescriptor::new("about").priority(Priority::HIGH);
        let bundles = vec![
            MessageBundle::new(Locale::es_es()).with("/prefix/about", "/prefijo/acerca"),
            MessageBundle::new(Locale::pt_br()).with("/other", "/outro"),
            MessageBundle::new(Locale::es()).with("/prefix/about", "/prefijo/sobre"),
        ];

        let routes = expander(bundles).expand(&method, &controller).unwrap();

        assert_eq!(
            routes.patterns(),
            vec!["/es-es/prefijo/acerca", "/es/prefijo/sobre", "/en-us/prefix/about"]
        );
        assert!(routes.iter().all(|r| r.priority() == Priority::HIGH));
    }

    #[test]
    fn test_translation_gets_leading_slash() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m").path("/a");
        let bundles = vec![MessageBundle::new(Locale::fr()).with("/a", "sans-slash")];

        let routes = expander(bundles).expand(&method, &controller).unwrap();

        assert_eq!(routes.patterns(), vec!["/fr/sans-slash", "/en-us/a"]);
    }

    #[test]
    fn test_localized_paths_run_once_per_method() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m")
            .path("/a")
            .path("/b")
            .localized_paths([LocalizedPath::new("es-es", "/absoluto")]);

        let routes = expander(vec![]).expand(&method, &controller).unwrap();

        assert_eq!(routes.patterns(), vec!["/en-us/a", "/en-us/b", "/es-es/absoluto"]);
    }

    #[test]
    fn test_expand_into_accumulates() {
        let controller = ControllerDescriptor::new("HomeController");
        let expander = expander(vec![]);
        let mut routes = RouteList::new();

        let uris = expander
            .expand_into(&MethodDescriptor::new("index"), &controller, &mut routes)
            .unwrap();
        assert_eq!(uris, vec!["/home/index"]);

        expander
            .expand_into(&MethodDescriptor::new("index"), &controller, &mut routes)
            .unwrap();
        assert_eq!(routes.patterns(), vec!["/en-us/home/index", "/en-us/home/index"]);
    }

    #[test]
    fn test_failed_expansion_appends_nothing() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m")
            .path("/ok")
            .localized_path("es-es", "/roto/{");
        let mut routes = RouteList::new();

        let result = expander(vec![]).expand_into(&method, &controller, &mut routes);

        assert!(matches!(result, Err(RoutesError::InvalidPattern { .. })));
        assert!(routes.is_empty());
    }

    #[test]
    fn test_custom_uri_provider() {
        let provider = |m: &MethodDescriptor, _: &ControllerDescriptor| -> Result<Vec<String>> {
            Ok(vec![format!("/x/{}", m.name), format!("/y/{}", m.name)])
        };
        let bundles = vec![MessageBundle::new(Locale::fr_fr()).with("/y/m", "/why/m")];
        let expander = expander(bundles).with_uri_provider(provider);

        let routes = expander
            .expand(&MethodDescriptor::new("m"), &ControllerDescriptor::new("C"))
            .unwrap();

        assert_eq!(routes.patterns(), vec!["/en-us/x/m", "/fr-fr/why/m", "/en-us/y/m"]);
    }

    #[test]
    fn test_rules_for_keeps_method_order_and_http_methods() {
        let controller = ControllerDescriptor::new("ItemsController")
            .http_method(HttpMethod::GET)
            .method(MethodDescriptor::new("list"))
            .method(MethodDescriptor::new("create").post());

        let routes = expander(vec![]).rules_for(&controller).unwrap();

        assert_eq!(
            routes.patterns(),
            vec![
                "/en-us/items/list",
                "/en-us/items/create",
                "/items/list",
                "/items/create",
            ]
        );
        for uri in ["/en-us/items/create", "/items/create"] {
            let create = routes.route_for(uri).unwrap();
            assert!(create.allows(HttpMethod::POST));
            assert!(!create.allows(HttpMethod::GET));
        }
        let list = routes.route_for("/items/list").unwrap();
        assert!(list.allows(HttpMethod::GET));
    }

    #[test]
    fn test_rules_for_all() {
        let a = ControllerDescriptor::new("AController").method(MethodDescriptor::new("x"));
        let b = ControllerDescriptor::new("BController").method(MethodDescriptor::new("y"));

        let routes = expander(vec![]).rules_for_all([&a, &b]).unwrap();

        assert_eq!(routes.patterns(), vec!["/en-us/a/x", "/a/x", "/en-us/b/y", "/b/y"]);
    }

    #[test]
    fn test_base_routes_keep_method_priority() {
        let controller = ControllerDescriptor::new("C")
            .path("/prefix")
            .localized_path("es-es", "/prefijo")
            .method(
                MethodDescriptor::new("m")
                    .path("/a")
                    .path("/b")
                    .priority(Priority::LOW)
                    .localized_path("es-es", "/absoluto"),
            );

        let routes = expander(vec![]).rules_for(&controller).unwrap();

        assert_eq!(
            routes.patterns(),
            vec![
                "/en-us/prefix/a",
                "/en-us/prefix/b",
                "/es-es/prefijo/absoluto",
                "/prefix/a",
                "/prefix/b",
            ]
        );
        assert_eq!(routes.route_for("/prefix/b").unwrap().priority(), Priority::LOW);
    }

    #[test]
    fn test_rules_for_all_propagates_errors() {
        let controller = ControllerDescriptor::new("C")
            .method(MethodDescriptor::new("ok"))
            .method(MethodDescriptor::new("broken").path("/x/{"));
        let good = ControllerDescriptor::new("GoodController").method(MethodDescriptor::new("x"));

        let result = expander(vec![]).rules_for_all([&good, &controller]);

        assert!(matches!(result, Err(RoutesError::InvalidPattern { .. })));
    }
}
