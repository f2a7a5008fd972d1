//! Recipe units
//!
//! A recipe is a named configuration procedure executed exactly once per
//! orchestration run. The entry point is a plain function pointer resolved
//! when the orchestrator is built, so the fixed recipe order is checked at
//! compile time rather than by dynamic name lookup.

use crate::context::RecipeContext;
use crate::error::Result;

/// Entry point of a recipe
pub type RecipeFn = fn(&mut RecipeContext<'_>) -> Result<()>;

/// A named, independently loadable configuration unit
///
/// Recipes are pure orchestration glue: they declare dependencies, emit
/// configuration files, and register deferred callbacks. A recipe must not
/// rely on another recipe having run first except through the ordering the
/// orchestrator enforces.
#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    name: &'static str,
    summary: &'static str,
    run: RecipeFn,
}

impl Recipe {
    /// Define a recipe
    pub const fn new(name: &'static str, summary: &'static str, run: RecipeFn) -> Self {
        Self { name, summary, run }
    }

    /// The recipe's name, used for ordering, logging, and errors
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description for catalog listings
    #[must_use]
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Execute the recipe body
    pub fn execute(&self, ctx: &mut RecipeContext<'_>) -> Result<()> {
        (self.run)(ctx)
    }
}
