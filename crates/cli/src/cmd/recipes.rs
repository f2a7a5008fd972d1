//! `ashiba recipes` - list the built-in catalog

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

/// List available recipes in their default load order
#[derive(Args)]
pub struct RecipesCommand {}

impl RecipesCommand {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        for recipe in ashiba_recipes::catalog() {
            println!("{:<10} {}", recipe.name().bold(), recipe.summary());
        }
        Ok(())
    }
}
