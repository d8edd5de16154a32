// Route Builder Adapter: locale prefix + URI -> one registered route

use crate::{ControllerDescriptor, ExpandedRoute, MethodDescriptor, Priority, Result, RoutingEngine};

/// Build the route for `locale_prefix + uri`.
///
/// The method's HTTP methods are used when it declares any, otherwise the
/// controller's; when both are empty the route accepts every method.
/// Engine errors are returned unchanged.
pub fn build_with_locale_prefix<E: RoutingEngine + ?Sized>(
    engine: &E,
    method: &MethodDescriptor,
    controller: &ControllerDescriptor,
    uri: &str,
    locale_prefix: &str,
    priority: Priority,
) -> Result<ExpandedRoute> {
    let http_methods = if method.http_methods.is_empty() {
        &controller.http_methods
    } else {
        &method.http_methods
    };

    let rule = engine
        .builder_for(&format!("{}{}", locale_prefix, uri))
        .with(http_methods.iter().copied())
        .with_priority(priority)
        .is(controller, method);

    let route = engine.build(rule)?;
    tracing::trace!(route = %route, priority = priority.value(), "Built localized route");
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpMethod, PatternRouter, RoutesError};

    #[test]
    fn test_prefix_is_prepended() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m");

        let route =
            build_with_locale_prefix(&PatternRouter, &method, &controller, "/a/b", "/en-us", Priority::HIGH)
                .unwrap();

        assert_eq!(route.url_pattern(), "/en-us/a/b");
        assert_eq!(route.priority(), Priority::HIGH);
        assert_eq!(route.handler().method, "m");
    }

    #[test]
    fn test_method_http_methods_win() {
        let controller = ControllerDescriptor::new("C").http_method(HttpMethod::POST);
        let method = MethodDescriptor::new("m").get();

        let route =
            build_with_locale_prefix(&PatternRouter, &method, &controller, "/a", "/en", Priority::DEFAULT)
                .unwrap();

        assert!(route.allows(HttpMethod::GET));
        assert!(!route.allows(HttpMethod::POST));
    }

    #[test]
    fn test_controller_http_methods_fallback() {
        let controller = ControllerDescriptor::new("C")
            .http_method(HttpMethod::POST)
            .http_method(HttpMethod::PUT);
        let method = MethodDescriptor::new("m");

        let route =
            build_with_locale_prefix(&PatternRouter, &method, &controller, "/a", "/en", Priority::DEFAULT)
                .unwrap();

        assert_eq!(route.http_methods().len(), 2);
        assert!(route.allows(HttpMethod::PUT));
        assert!(!route.allows(HttpMethod::GET));
    }

    #[test]
    fn test_no_http_methods_accepts_all() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m");

        let route =
            build_with_locale_prefix(&PatternRouter, &method, &controller, "/a", "/en", Priority::DEFAULT)
                .unwrap();

        assert!(route.http_methods().is_empty());
        assert!(route.allows(HttpMethod::DELETE));
    }

    #[test]
    fn test_engine_error_propagates() {
        let controller = ControllerDescriptor::new("C");
        let method = MethodDescriptor::new("m");

        let result =
            build_with_locale_prefix(&PatternRouter, &method, &controller, "/a/{", "/en", Priority::DEFAULT);

        assert!(matches!(result, Err(RoutesError::InvalidPattern { pattern, .. }) if pattern == "/en/a/{"));
    }
}
