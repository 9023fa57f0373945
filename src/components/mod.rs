//! Markup shared across routes.

mod document;
mod shell;
mod spinner;

pub use document::document;
pub use shell::{NavLink, NavigationShell};
pub use spinner::spinner;
