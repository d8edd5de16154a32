//! Expanded routes and the ordered route list
//!
//! An [`ExpandedRoute`] is immutable once built. A [`RouteList`] only grows;
//! its order is the order in which routes were expanded, which is also the
//! order a first-match router tries them in.

use crate::engine::Segment;
use crate::{Handler, HttpMethod, Priority};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A concrete, matchable URL pattern bound to one handler.
#[derive(Debug, Clone)]
pub struct ExpandedRoute {
    url_pattern: String,
    http_methods: BTreeSet<HttpMethod>,
    priority: Priority,
    handler: Handler,
    segments: Vec<Segment>,
}

impl ExpandedRoute {
    pub(crate) fn new(
        url_pattern: String,
        http_methods: BTreeSet<HttpMethod>,
        priority: Priority,
        handler: Handler,
        segments: Vec<Segment>,
    ) -> Self {
        Self {
            url_pattern,
            http_methods,
            priority,
            handler,
            segments,
        }
    }

    pub fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    /// Accepted HTTP methods. Empty means every method.
    pub fn http_methods(&self) -> &BTreeSet<HttpMethod> {
        &self.http_methods
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Whether this route accepts `method`.
    pub fn allows(&self, method: HttpMethod) -> bool {
        self.http_methods.is_empty() || self.http_methods.contains(&method)
    }

    /// Whether `uri` matches the pattern. The query string is ignored.
    pub fn can_handle(&self, uri: &str) -> bool {
        self.extract_params(uri).is_some()
    }

    /// Match `uri` and return its captured parameters.
    pub fn extract_params(&self, uri: &str) -> Option<HashMap<String, String>> {
        let path = uri.split_once('?').map_or(uri, |(path, _)| path);
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = HashMap::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    if let Some(name) = name {
                        params.insert(name.clone(), parts[index.min(parts.len())..].join("/"));
                    }
                    return Some(params);
                }
                Segment::Static(text) => {
                    if parts.get(index) != Some(&text.as_str()) {
                        return None;
                    }
                }
                Segment::Param { name, constraint } => {
                    let value = parts.get(index)?;
                    if constraint.as_ref().is_some_and(|re| !re.is_match(value)) {
                        return None;
                    }
                    params.insert(name.clone(), value.to_string());
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

impl fmt::Display for ExpandedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.http_methods.is_empty() {
            write!(f, "* {} -> {}", self.url_pattern, self.handler)
        } else {
            let methods: Vec<&str> = self.http_methods.iter().map(HttpMethod::as_str).collect();
            write!(f, "{} {} -> {}", methods.join("|"), self.url_pattern, self.handler)
        }
    }
}

/// Append-only, ordered list of expanded routes.
#[derive(Debug, Clone, Default)]
pub struct RouteList {
    routes: Vec<ExpandedRoute>,
}

impl RouteList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: ExpandedRoute) {
        self.routes.push(route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpandedRoute> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[ExpandedRoute] {
        &self.routes
    }

    /// URL patterns in list order.
    pub fn patterns(&self) -> Vec<&str> {
        self.routes.iter().map(ExpandedRoute::url_pattern).collect()
    }

    /// The first route, in list order, that can handle `uri`.
    pub fn route_for(&self, uri: &str) -> Option<&ExpandedRoute> {
        self.routes.iter().find(|route| route.can_handle(uri))
    }

    /// The first route, in list order, that accepts `method` and can handle `uri`.
    pub fn route_for_method(&self, method: HttpMethod, uri: &str) -> Option<&ExpandedRoute> {
        self.routes
            .iter()
            .find(|route| route.allows(method) && route.can_handle(uri))
    }

    /// Routes ordered by priority; equal priorities keep list order.
    pub fn sorted_by_priority(&self) -> Vec<&ExpandedRoute> {
        let mut sorted: Vec<&ExpandedRoute> = self.routes.iter().collect();
        sorted.sort_by_key(|route| route.priority);
        sorted
    }

    pub fn into_vec(self) -> Vec<ExpandedRoute> {
        self.routes
    }
}

impl Extend<ExpandedRoute> for RouteList {
    fn extend<I: IntoIterator<Item = ExpandedRoute>>(&mut self, iter: I) {
        self.routes.extend(iter);
    }
}

impl FromIterator<ExpandedRoute> for RouteList {
    fn from_iter<I: IntoIterator<Item = ExpandedRoute>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RouteList {
    type Item = ExpandedRoute;
    type IntoIter = std::vec::IntoIter<ExpandedRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteList {
    type Item = &'a ExpandedRoute;
    type IntoIter = std::slice::Iter<'a, ExpandedRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
