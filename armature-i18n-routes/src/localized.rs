//! Localized path resolution
//!
//! Expands the explicit per-locale paths declared on a method into routes,
//! prepending the controller's path for the same locale when it declares
//! one:
//!
//! | method path                 | controller path             | route                     |
//! |-----------------------------|-----------------------------|---------------------------|
//! | `es-es` → `/absoluto`       | `es-es` → `/prefijo`        | `/es-es/prefijo/absoluto` |
//! | `es-es` → `absoluto`        | none                        | `/es-es/absoluto`         |
//!
//! The locale string is used verbatim as the prefix segment, and these
//! routes always get [`Priority::DEFAULT`].

use crate::adapter::build_with_locale_prefix;
use crate::{
    ControllerDescriptor, LocalizedPath, MethodDescriptor, Priority, Result, RouteList,
    RoutingEngine,
};
use std::borrow::Cow;

/// Prepend `/` unless the path already starts with one.
pub fn fix_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}

/// The path a localized declaration resolves to, controller prefix included.
pub fn resolve_localized_path(entry: &LocalizedPath, controller: &ControllerDescriptor) -> String {
    let method_path = fix_leading_slash(&entry.path);

    match controller.localized.find_by_locale(&entry.locale) {
        Some(controller_path) => format!("{}{}", fix_leading_slash(&controller_path.path), method_path),
        None => method_path.into_owned(),
    }
}

/// Append one route per localized path declared on `method`.
pub fn localized_routes<E: RoutingEngine + ?Sized>(
    engine: &E,
    method: &MethodDescriptor,
    controller: &ControllerDescriptor,
    routes: &mut RouteList,
) -> Result<()> {
    for entry in method.localized.entries() {
        let path = resolve_localized_path(entry, controller);
        let prefix = format!("/{}", entry.locale);

        routes.push(build_with_locale_prefix(
            engine,
            method,
            controller,
            &path,
            &prefix,
            Priority::DEFAULT,
        )?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternRouter;

    fn expand(method: &MethodDescriptor, controller: &ControllerDescriptor) -> RouteList {
        let mut routes = RouteList::new();
        localized_routes(&PatternRouter, method, controller, &mut routes).unwrap();
        routes
    }

    #[test]
    fn test_fix_leading_slash() {
        assert_eq!(fix_leading_slash("/a"), "/a");
        assert_eq!(fix_leading_slash("a"), "/a");
        assert_eq!(fix_leading_slash(""), "/");
        assert!(matches!(fix_leading_slash("/a"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_controller_prefix_for_same_locale() {
        let controller = ControllerDescriptor::new("C")
            .localized_paths([LocalizedPath::new("es-es", "/prefijo")]);
        let method = MethodDescriptor::new("m")
            .localized_paths([LocalizedPath::new("es-es", "/absoluto")]);

        assert_eq!(expand(&method, &controller).patterns(), vec!["/es-es/prefijo/absoluto"]);
    }

    #[test]
    fn test_single_declarations() {
        let controller = ControllerDescriptor::new("C").localized_path("es-es", "prefijo");
        let method = MethodDescriptor::new("m").localized_path("es-es", "absoluto");

        assert_eq!(expand(&method, &controller).patterns(), vec!["/es-es/prefijo/absoluto"]);
    }

    #[test]
    fn test_no_controller_prefix() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m")
            .localized_paths([LocalizedPath::new("es-es", "/absoluto")]);

        assert_eq!(expand(&method, &controller).patterns(), vec!["/es-es/absoluto"]);
    }

    #[test]
    fn test_other_locale_controller_prefix_is_ignored() {
        let controller = ControllerDescriptor::new("C").localized_path("pt-br", "/prefixo");
        let method = MethodDescriptor::new("m").localized_path("es-es", "/absoluto");

        assert_eq!(expand(&method, &controller).patterns(), vec!["/es-es/absoluto"]);
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let controller = ControllerDescriptor::new("C")
            .localized_paths([LocalizedPath::new("pt-br", "/prefixo")]);
        let method = MethodDescriptor::new("m").localized_paths([
            LocalizedPath::new("es-es", "/absoluto"),
            LocalizedPath::new("pt-br", "/absoluto"),
            LocalizedPath::new("fr", "absolu"),
        ]);

        assert_eq!(
            expand(&method, &controller).patterns(),
            vec!["/es-es/absoluto", "/pt-br/prefixo/absoluto", "/fr/absolu"]
        );
    }

    #[test]
    fn test_priority_is_always_default() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m")
            .priority(Priority::HIGHEST)
            .localized_path("es-es", "/absoluto");

        let routes = expand(&method, &controller);
        assert_eq!(routes.iter().next().map(|r| r.priority()), Some(Priority::DEFAULT));
    }

    #[test]
    fn test_locale_is_used_verbatim() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m").localized_path("pt_BR", "/x");

        assert_eq!(expand(&method, &controller).patterns(), vec!["/pt_BR/x"]);
    }

    #[test]
    fn test_no_declarations_no_routes() {
        let controller = ControllerDescriptor::new("C").localized_path("es-es", "/prefijo");
        let method = MethodDescriptor::new("m");

        assert!(expand(&method, &controller).is_empty());
    }

    // Duplicate locales on one element have no defined winner; only the
    // number of routes is asserted.
    #[test]
    fn test_duplicate_controller_locales_yield_one_route() {
        let controller = ControllerDescriptor::new("C").localized_paths([
            LocalizedPath::new("es-es", "/uno"),
            LocalizedPath::new("es-es", "/dos"),
        ]);
        let method = MethodDescriptor::new("m").localized_path("es-es", "/x");

        let routes = expand(&method, &controller);
        assert_eq!(routes.len(), 1);
        assert!(routes.patterns()[0].starts_with("/es-es/"));
        assert!(routes.patterns()[0].ends_with("/x"));
    }
}
