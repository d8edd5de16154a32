// Armature - locale-aware routing
//
// Re-exports the locale model and the localized route expander so
// applications depend on a single crate.

pub use armature_i18n as i18n;
pub use armature_i18n_routes::*;

pub use armature_i18n::{Locale, MessageBundle, Messages};

// Prelude for common imports
pub mod prelude {
    pub use crate::{Locale, MessageBundle, Messages};
    pub use armature_i18n_routes::prelude::*;
}
