//! Execution contexts handed to recipes and deferred callbacks
//!
//! A [`RecipeContext`] gives a recipe body its three capabilities: dependency
//! declaration, file mutation, and callback deferral. A [`PhaseContext`] is
//! the narrower drain-time context with file mutation only; declaring a
//! dependency after the installer has run would be meaningless.

use crate::error::{Error, Result};
use crate::hooks::HookRegistry;
use crate::manifest::{Dependency, Manifest};
use crate::phase::Phase;
use crate::system::System;
use ashiba_core::path::{AbsPath, RelPath};
use indexmap::IndexMap;
use std::path::PathBuf;

/// Where injected content lands relative to its anchor line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectAt {
    /// Insert immediately before the anchor
    Before,
    /// Insert immediately after the anchor
    After,
}

/// File mutation capability scoped to the project root
///
/// All paths are project-relative; absolute paths and `..` traversal are
/// rejected loudly. Operations are immediate and synchronous.
pub struct ProjectFiles<'a> {
    system: &'a dyn System,
    project_root: &'a AbsPath,
}

impl<'a> ProjectFiles<'a> {
    /// Create a file capability rooted at `project_root`
    pub fn new(system: &'a dyn System, project_root: &'a AbsPath) -> Self {
        Self {
            system,
            project_root,
        }
    }

    /// The project root all relative paths resolve against
    #[must_use]
    pub fn project_root(&self) -> &AbsPath {
        self.project_root
    }

    fn resolve(&self, path: &str) -> Result<AbsPath> {
        let rel = RelPath::new(PathBuf::from(path))?;
        Ok(self.project_root.join(&rel))
    }

    /// Create (or overwrite) a file with the given content
    pub fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve(path)?;
        tracing::debug!(path, "Writing file");
        self.system.write_file(&target, content.as_bytes())
    }

    /// Read a UTF-8 file's contents
    pub fn read_file(&self, path: &str) -> Result<String> {
        let target = self.resolve(path)?;
        let bytes = self.system.read_file(&target)?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            path: target,
            source: e,
        })
    }

    /// Copy a file within the project
    pub fn copy_file(&self, from: &str, to: &str) -> Result<()> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        tracing::debug!(from = %from, to = %to, "Copying file");
        self.system.copy_file(&from, &to)
    }

    /// Remove a file
    pub fn remove_file(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        tracing::debug!(path, "Removing file");
        self.system.remove_file(&target)
    }

    /// Append content to an existing file
    pub fn append_file(&self, path: &str, content: &str) -> Result<()> {
        let existing = self.read_file(path)?;
        let target = self.resolve(path)?;
        let mut updated = existing;
        updated.push_str(content);
        self.system.write_file(&target, updated.as_bytes())
    }

    /// Inject content before or after the first line containing `anchor`
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AnchorNotFound`] if no line contains the anchor.
    pub fn inject_into_file(
        &self,
        path: &str,
        anchor: &str,
        content: &str,
        at: InjectAt,
    ) -> Result<()> {
        let target = self.resolve(path)?;
        let existing = self.read_file(path)?;

        let mut lines: Vec<&str> = existing.lines().collect();
        let position = lines
            .iter()
            .position(|line| line.contains(anchor))
            .ok_or_else(|| Error::AnchorNotFound {
                path: target.clone(),
                anchor: anchor.to_string(),
            })?;

        let index = match at {
            InjectAt::Before => position,
            InjectAt::After => position + 1,
        };
        lines.insert(index, content);

        let mut updated = lines.join("\n");
        if existing.ends_with('\n') {
            updated.push('\n');
        }
        tracing::debug!(path, anchor, "Injecting into file");
        self.system.write_file(&target, updated.as_bytes())
    }

    /// Check whether a project file exists
    pub fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.system.exists(&self.resolve(path)?))
    }

    /// Create a directory (and parents) inside the project
    pub fn create_dir_all(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        self.system.create_dir_all(&target)
    }
}

/// Context passed to a recipe body during loading
///
/// Carries the full capability set: the manifest, project files, template
/// variables, and deferral against the hook registry.
pub struct RecipeContext<'a> {
    files: ProjectFiles<'a>,
    manifest: &'a mut Manifest,
    registry: &'a mut HookRegistry,
    variables: &'a IndexMap<String, String>,
}

impl<'a> RecipeContext<'a> {
    /// Assemble a recipe context from its parts
    pub fn new(
        files: ProjectFiles<'a>,
        manifest: &'a mut Manifest,
        registry: &'a mut HookRegistry,
        variables: &'a IndexMap<String, String>,
    ) -> Self {
        Self {
            files,
            manifest,
            registry,
            variables,
        }
    }

    /// File mutation capability
    #[must_use]
    pub fn files(&self) -> &ProjectFiles<'a> {
        &self.files
    }

    /// Declare a dependency with a bare version requirement
    pub fn dependency(&mut self, name: &str, version: &str) {
        self.manifest.declare(name, Dependency::new(version));
    }

    /// Declare a dependency with features
    pub fn dependency_with(&mut self, name: &str, version: &str, features: &[&str]) {
        self.manifest
            .declare(name, Dependency::new(version).with_features(features));
    }

    /// Look up a template variable
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// All template variables, in configuration order
    #[must_use]
    pub fn variables(&self) -> &IndexMap<String, String> {
        self.variables
    }

    /// Register a deferred callback for a later phase
    ///
    /// Ownership of the callback transfers to the hook registry; it is
    /// invoked at most once when the phase drains.
    pub fn defer<F>(&mut self, phase: Phase, callback: F) -> Result<()>
    where
        F: FnOnce(&mut PhaseContext<'_>) -> Result<()> + 'static,
    {
        self.registry.register(phase, Box::new(callback))
    }
}

/// Context passed to deferred callbacks during a phase drain
pub struct PhaseContext<'a> {
    files: ProjectFiles<'a>,
}

impl<'a> PhaseContext<'a> {
    /// Assemble a phase context
    pub fn new(system: &'a dyn System, project_root: &'a AbsPath) -> Self {
        Self {
            files: ProjectFiles::new(system, project_root),
        }
    }

    /// File mutation capability
    #[must_use]
    pub fn files(&self) -> &ProjectFiles<'a> {
        &self.files
    }
}
