//! Error types for the orchestration engine
//!
//! This module defines all error types used throughout the engine.
//! We use `thiserror` for structured error handling with good error messages.

use crate::phase::Phase;
use ashiba_core::path::AbsPath;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the orchestration engine
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading a file
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a file
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error copying a file
    #[error("Failed to copy {from} to {to}: {source}")]
    FileCopy {
        from: AbsPath,
        to: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error removing a file
    #[error("Failed to remove {path}: {source}")]
    FileRemove {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a directory
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: AbsPath,
        #[source]
        source: std::io::Error,
    },

    /// Invalid UTF-8 encountered while mutating a text file
    #[error("Invalid UTF-8 in {path}: {source}")]
    InvalidUtf8 {
        path: AbsPath,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Injection anchor was not found in the target file
    #[error("Anchor '{anchor}' not found in {path}")]
    AnchorNotFound { path: AbsPath, anchor: String },

    /// A recipe could not be executed
    #[error("Recipe '{name}' failed: {source}")]
    RecipeFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A recipe name did not resolve against the catalog
    #[error("Unknown recipe: '{name}'")]
    UnknownRecipe { name: String },

    /// A deferred callback failed during a phase drain
    #[error("Callback {index} for phase '{phase}' failed: {source}")]
    CallbackFailed {
        phase: Phase,
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Callbacks cannot be registered for the immediate phase
    #[error("Phase '{phase}' does not accept deferred callbacks")]
    NotDeferrable { phase: Phase },

    /// Registration attempted after the phase was drained (logic bug)
    #[error("Cannot register callback for phase '{phase}': phase already drained")]
    PhaseClosed { phase: Phase },

    /// A phase was drained twice (logic bug)
    #[error("Phase '{phase}' has already been drained")]
    PhaseAlreadyDrained { phase: Phase },

    /// An external step (installer or generator) reported failure
    ///
    /// The message carries the external tool's diagnostic output verbatim.
    #[error("External step '{step}' failed: {message}")]
    ExternalStep { step: String, message: String },

    /// Orchestrator driven outside its state machine
    #[error("Invalid orchestrator state: {message}")]
    InvalidState { message: String },

    /// Template rendering error
    #[error("Template rendering failed: {message}")]
    Template { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the core crate (path validation)
    #[error(transparent)]
    Core(#[from] ashiba_core::Error),
}
