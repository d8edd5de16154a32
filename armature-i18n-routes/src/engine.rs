// Route construction: builder, engine trait and the default pattern engine

use crate::{
    ControllerDescriptor, ExpandedRoute, Handler, HttpMethod, MethodDescriptor, Priority, Result,
    RoutesError,
};
use regex::Regex;
use std::collections::BTreeSet;

/// Collects everything needed to build one route.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    pattern: String,
    http_methods: BTreeSet<HttpMethod>,
    priority: Priority,
    handler: Option<Handler>,
}

impl RouteBuilder {
    pub fn for_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            http_methods: BTreeSet::new(),
            priority: Priority::DEFAULT,
            handler: None,
        }
    }

    /// Restrict the route to these HTTP methods. An empty set accepts all.
    pub fn with(mut self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        self.http_methods.extend(methods);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Bind the route to a controller method.
    pub fn is(mut self, controller: &ControllerDescriptor, method: &MethodDescriptor) -> Self {
        self.handler = Some(Handler::of(controller, method));
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn http_methods(&self) -> &BTreeSet<HttpMethod> {
        &self.http_methods
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }
}

/// The routing collaborator: turns a finished [`RouteBuilder`] into a route.
pub trait RoutingEngine {
    fn builder_for(&self, url_pattern: &str) -> RouteBuilder {
        RouteBuilder::for_pattern(url_pattern)
    }

    fn build(&self, rule: RouteBuilder) -> Result<ExpandedRoute>;
}

impl<T: RoutingEngine + ?Sized> RoutingEngine for &T {
    fn builder_for(&self, url_pattern: &str) -> RouteBuilder {
        (**self).builder_for(url_pattern)
    }

    fn build(&self, rule: RouteBuilder) -> Result<ExpandedRoute> {
        (**self).build(rule)
    }
}

/// Default engine compiling patterns into matchable segments.
///
/// Supported segment forms:
/// - `users`: static text
/// - `{id}` or `:id`: one segment, captured as `id`
/// - `{id:[0-9]+}`: one segment matching the regex, captured as `id`
/// - `{path*}` or `*`: the remaining segments, must come last
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRouter;

impl PatternRouter {
    pub fn new() -> Self {
        Self
    }
}

impl RoutingEngine for PatternRouter {
    fn build(&self, rule: RouteBuilder) -> Result<ExpandedRoute> {
        let segments = compile(&rule.pattern)?;
        let handler = rule
            .handler
            .ok_or_else(|| RoutesError::MissingHandler(rule.pattern.clone()))?;

        Ok(ExpandedRoute::new(
            rule.pattern,
            rule.http_methods,
            rule.priority,
            handler,
            segments,
        ))
    }
}

/// One compiled pattern segment.
#[derive(Debug, Clone)]
pub(crate) enum Segment {
    Static(String),
    Param {
        name: String,
        constraint: Option<Regex>,
    },
    CatchAll(Option<String>),
}

pub(crate) fn compile(pattern: &str) -> Result<Vec<Segment>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let mut segments = Vec::with_capacity(parts.len());

    for (index, part) in parts.iter().enumerate() {
        let segment = compile_segment(pattern, part)?;
        if matches!(segment, Segment::CatchAll(_)) && index + 1 != parts.len() {
            return Err(RoutesError::invalid_pattern(
                pattern,
                "a catch-all must be the last segment",
            ));
        }
        segments.push(segment);
    }

    Ok(segments)
}

fn compile_segment(pattern: &str, part: &str) -> Result<Segment> {
    if part == "*" {
        return Ok(Segment::CatchAll(None));
    }

    if let Some(name) = part.strip_prefix(':') {
        return param(pattern, name, None);
    }

    if let Some(inner) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
        if let Some((name, regex)) = inner.split_once(':') {
            return param(pattern, name, Some(regex));
        }

        if let Some(name) = inner.strip_suffix('*') {
            if !is_identifier(name) {
                return Err(RoutesError::invalid_pattern(
                    pattern,
                    format!("invalid catch-all name `{}`", name),
                ));
            }
            return Ok(Segment::CatchAll(Some(name.to_string())));
        }

        return param(pattern, inner, None);
    }

    if part.contains(['{', '}']) {
        return Err(RoutesError::invalid_pattern(
            pattern,
            format!("parameters must span a whole segment, found `{}`", part),
        ));
    }

    Ok(Segment::Static(part.to_string()))
}

fn param(pattern: &str, name: &str, regex: Option<&str>) -> Result<Segment> {
    if !is_identifier(name) {
        return Err(RoutesError::invalid_pattern(
            pattern,
            format!("invalid parameter name `{}`", name),
        ));
    }

    let constraint = match regex {
        Some(re) if re.is_empty() => {
            return Err(RoutesError::invalid_pattern(
                pattern,
                format!("empty constraint for `{}`", name),
            ));
        }
        Some(re) => Some(
            Regex::new(&format!("^(?:{})$", re))
                .map_err(|e| RoutesError::invalid_pattern(pattern, e.to_string()))?,
        ),
        None => None,
    };

    Ok(Segment::Param {
        name: name.to_string(),
        constraint,
    })
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}
