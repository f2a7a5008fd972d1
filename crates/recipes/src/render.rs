//! Template rendering for recipe file bodies
//!
//! Thin wrapper around minijinja: templates are rendered against the run's
//! variable map. Undefined variables should use the `default` filter in the
//! template rather than relying on lenient undefined handling.

use ashiba_engine::{Error, Result};
use indexmap::IndexMap;
use minijinja::Environment;

/// Render a template string against the run variables
pub(crate) fn render(template: &str, vars: &IndexMap<String, String>) -> Result<String> {
    let env = Environment::new();
    env.render_str(template, vars).map_err(|e| Error::Template {
        message: e.to_string(),
    })
}
