//! Canonical (untranslated) URIs for controller methods
//!
//! [`PathAnnotationUris`] derives URIs from declared paths, falling back to
//! the `/<controller>/<method>` naming convention:
//!
//! | controller path | method path     | canonical URI              |
//! |-----------------|-----------------|----------------------------|
//! | `/prefix`       | none            | `/prefix/withoutPath`      |
//! | `/prefix`       | `/absolutePath` | `/prefix/absolutePath`     |
//! | none            | none            | `/convention/withoutPath`  |
//! | none            | `/absolutePath` | `/absolutePath`            |

use crate::localized::fix_leading_slash;
use crate::{ControllerDescriptor, MethodDescriptor, Result, RoutesError};

const CONTROLLER_SUFFIX: &str = "Controller";

/// Source of the base URL patterns for one action method.
pub trait CanonicalUriProvider {
    fn uris_for(
        &self,
        method: &MethodDescriptor,
        controller: &ControllerDescriptor,
    ) -> Result<Vec<String>>;
}

impl<F> CanonicalUriProvider for F
where
    F: Fn(&MethodDescriptor, &ControllerDescriptor) -> Result<Vec<String>>,
{
    fn uris_for(
        &self,
        method: &MethodDescriptor,
        controller: &ControllerDescriptor,
    ) -> Result<Vec<String>> {
        self(method, controller)
    }
}

/// Declared-path and naming-convention URI provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAnnotationUris;

impl PathAnnotationUris {
    /// The prefix every URI of `controller` starts with.
    ///
    /// The declared path with its trailing slashes removed, or
    /// `/<name>` where `name` is the type name without its `Controller`
    /// suffix and with a lower-case first letter.
    pub fn controller_prefix(controller: &ControllerDescriptor) -> Result<String> {
        if let Some(path) = &controller.path {
            let trimmed = path.trim_end_matches('/');
            if trimmed.is_empty() {
                return Ok(String::new());
            }
            return Ok(fix_leading_slash(trimmed).into_owned());
        }

        let name = controller.name.trim();
        let base = name.strip_suffix(CONTROLLER_SUFFIX).unwrap_or(name);
        if base.is_empty() {
            return Err(RoutesError::InvalidDescriptor(format!(
                "controller `{}` declares no path and has no usable name",
                controller.name
            )));
        }

        Ok(format!("/{}", lowercase_first(base)))
    }
}

impl CanonicalUriProvider for PathAnnotationUris {
    fn uris_for(
        &self,
        method: &MethodDescriptor,
        controller: &ControllerDescriptor,
    ) -> Result<Vec<String>> {
        if !method.paths.is_empty() {
            let prefix = controller
                .path
                .as_deref()
                .map(|p| p.trim_end_matches('/'))
                .filter(|p| !p.is_empty())
                .map(|p| fix_leading_slash(p).into_owned())
                .unwrap_or_default();

            return Ok(method
                .paths
                .iter()
                .map(|path| format!("{}{}", prefix, fix_leading_slash(path)))
                .collect());
        }

        if method.name.trim().is_empty() {
            return Err(RoutesError::InvalidDescriptor(format!(
                "a method of `{}` declares no path and has no name",
                controller.name
            )));
        }

        let prefix = Self::controller_prefix(controller)?;
        Ok(vec![format!("{}/{}", prefix, method.name)])
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
