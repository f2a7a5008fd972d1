//! CI workflow recipe

use ashiba_engine::{RecipeContext, Result};

const WORKFLOW: &str = r"name: ci

on:
  push:
    branches: [main]
  pull_request:

jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: dtolnay/rust-toolchain@stable
      - run: cargo fmt --check
      - run: cargo clippy -- -D warnings
      - run: cargo test
";

pub(crate) fn run(ctx: &mut RecipeContext<'_>) -> Result<()> {
    ctx.files()
        .create_file(".github/workflows/ci.yml", WORKFLOW)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use ashiba_engine::{AbsPath, HookRegistry, Manifest, ProjectFiles, RealSystem};
    use indexmap::IndexMap;
    use tempfile::TempDir;

    #[test]
    fn writes_workflow() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let system = RealSystem;
        let mut manifest = Manifest::new();
        let mut registry = HookRegistry::new();
        let vars = IndexMap::new();

        let mut ctx = RecipeContext::new(
            ProjectFiles::new(&system, &root),
            &mut manifest,
            &mut registry,
            &vars,
        );
        run(&mut ctx).unwrap();

        let workflow =
            std::fs::read_to_string(temp.path().join(".github/workflows/ci.yml")).unwrap();
        assert!(workflow.contains("cargo test"));
    }
}
