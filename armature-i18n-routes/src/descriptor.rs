//! Controller and method descriptors
//!
//! Statically-typed metadata for one controller and its action methods:
//! declared paths, HTTP methods, priority and per-locale path overrides.
//! Descriptors are built once per controller at registration time and
//! handed to the expander by reference.
//!
//! # Examples
//!
//! ```
//! use armature_i18n_routes::{ControllerDescriptor, MethodDescriptor, LocalizedPath};
//!
//! let controller = ControllerDescriptor::new("ProductsController")
//!     .path("/products")
//!     .localized_paths([LocalizedPath::new("es-es", "/productos")])
//!     .method(
//!         MethodDescriptor::new("list")
//!             .get()
//!             .localized_path("es-es", "/lista"),
//!     );
//!
//! assert_eq!(controller.methods.len(), 1);
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// HTTP methods a route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
    TRACE,
}

impl HttpMethod {
    /// Every method, in declaration order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::HEAD,
        HttpMethod::OPTIONS,
        HttpMethod::TRACE,
    ];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "TRACE" => Some(HttpMethod::TRACE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::TRACE => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matching priority of a route. Lower values are tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(pub i32);

impl Priority {
    pub const HIGHEST: Priority = Priority(0);
    pub const HIGH: Priority = Priority(i32::MAX / 4);
    /// Priority of every route that does not declare one.
    pub const DEFAULT: Priority = Priority(i32::MAX / 2);
    pub const LOW: Priority = Priority(3 * (i32::MAX / 4));
    pub const LOWEST: Priority = Priority(i32::MAX);

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::DEFAULT
    }
}

/// An explicit path for one locale, declared on a method or a controller.
///
/// The locale string is used verbatim as the URL prefix segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedPath {
    pub locale: String,
    pub path: String,
}

impl LocalizedPath {
    pub fn new(locale: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
        }
    }
}

/// Localized path declarations attached to one method or controller.
///
/// An element may carry a single declaration, a multi-valued one, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedPaths {
    single: Option<LocalizedPath>,
    many: Option<Vec<LocalizedPath>>,
}

impl LocalizedPaths {
    /// No declarations.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.single.is_none() && self.many.is_none()
    }

    /// The single-valued declaration, if any.
    pub fn single(&self) -> Option<&LocalizedPath> {
        self.single.as_ref()
    }

    /// The multi-valued declaration, if any.
    pub fn many(&self) -> Option<&[LocalizedPath]> {
        self.many.as_deref()
    }

    /// Entries to expand for a method, in declaration order.
    ///
    /// A multi-valued declaration shadows the single one, even when empty.
    pub fn entries(&self) -> &[LocalizedPath] {
        match (&self.many, &self.single) {
            (Some(many), _) => many,
            (None, Some(single)) => std::slice::from_ref(single),
            (None, None) => &[],
        }
    }

    /// Find the declaration for `locale`, checking the single form first.
    ///
    /// With duplicate locales in the multi form the first entry wins, but
    /// callers should not depend on which.
    pub fn find_by_locale(&self, locale: &str) -> Option<&LocalizedPath> {
        if let Some(single) = self.single.as_ref().filter(|p| p.locale == locale) {
            return Some(single);
        }
        self.many
            .iter()
            .flatten()
            .find(|p| p.locale == locale)
    }
}

/// Action method metadata.
#[derive(Debug, Clone, Default)]
pub struct MethodDescriptor {
    /// Method name, used by the naming convention when no path is declared
    pub name: String,
    /// Declared paths; empty when the method declares none
    pub paths: Vec<String>,
    /// Declared priority; `None` means [`Priority::DEFAULT`]
    pub priority: Option<Priority>,
    /// Declared HTTP methods; empty defers to the controller
    pub http_methods: BTreeSet<HttpMethod>,
    pub localized: LocalizedPaths,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare a path. May be called more than once.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_methods.insert(method);
        self
    }

    pub fn get(self) -> Self {
        self.http_method(HttpMethod::GET)
    }

    pub fn post(self) -> Self {
        self.http_method(HttpMethod::POST)
    }

    pub fn put(self) -> Self {
        self.http_method(HttpMethod::PUT)
    }

    pub fn delete(self) -> Self {
        self.http_method(HttpMethod::DELETE)
    }

    pub fn patch(self) -> Self {
        self.http_method(HttpMethod::PATCH)
    }

    /// Set the single-valued localized path declaration.
    pub fn localized_path(mut self, locale: impl Into<String>, path: impl Into<String>) -> Self {
        self.localized.single = Some(LocalizedPath::new(locale, path));
        self
    }

    /// Set the multi-valued localized path declaration.
    pub fn localized_paths(mut self, paths: impl IntoIterator<Item = LocalizedPath>) -> Self {
        self.localized.many = Some(paths.into_iter().collect());
        self
    }

    /// The priority routes for this method are registered with.
    pub fn effective_priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }
}

/// Controller metadata.
#[derive(Debug, Clone, Default)]
pub struct ControllerDescriptor {
    /// Type name, e.g. `ProductsController`
    pub name: String,
    /// Declared path prefix
    pub path: Option<String>,
    /// HTTP methods used by action methods that declare none
    pub http_methods: BTreeSet<HttpMethod>,
    pub localized: LocalizedPaths,
    /// Action methods in declaration order
    pub methods: Vec<MethodDescriptor>,
}

impl ControllerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_methods.insert(method);
        self
    }

    /// Set the single-valued localized path declaration.
    pub fn localized_path(mut self, locale: impl Into<String>, path: impl Into<String>) -> Self {
        self.localized.single = Some(LocalizedPath::new(locale, path));
        self
    }

    /// Set the multi-valued localized path declaration.
    pub fn localized_paths(mut self, paths: impl IntoIterator<Item = LocalizedPath>) -> Self {
        self.localized.many = Some(paths.into_iter().collect());
        self
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}

/// The controller/method pair a route dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handler {
    pub controller: String,
    pub method: String,
}

impl Handler {
    pub fn new(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
        }
    }

    pub fn of(controller: &ControllerDescriptor, method: &MethodDescriptor) -> Self {
        Self::new(&controller.name, &method.name)
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.method)
    }
}
