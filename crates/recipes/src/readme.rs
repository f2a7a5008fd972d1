//! Usage documentation recipe
//!
//! Appends run instructions to the README, creating it if the base recipe
//! was not part of the run, and defers a final note until everything else
//! has finished.

use crate::render::render;
use ashiba_engine::{Phase, RecipeContext, Result};

const USAGE: &str = r#"
## Running

```sh
cargo run
```

The service listens on port {{ port | default("8080") }}.
"#;

const NEXT_STEPS: &str = "
## Next steps

Dependencies are installed and generators have run; edit `src/main.rs`
to add your routes.
";

pub(crate) fn run(ctx: &mut RecipeContext<'_>) -> Result<()> {
    let vars = ctx.variables().clone();
    let usage = render(USAGE, &vars)?;

    if ctx.files().exists("README.md")? {
        ctx.files().append_file("README.md", &usage)?;
    } else {
        ctx.files().create_file("README.md", &usage)?;
    }

    ctx.defer(Phase::PostGenerate, |phase| {
        phase.files().append_file("README.md", NEXT_STEPS)
    })?;
    Ok(())
}
