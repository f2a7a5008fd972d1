//! Lifecycle phases of a scaffolding run
//!
//! A run moves through three phases: recipe bodies execute immediately,
//! then deferred callbacks run after the dependency installer and after the
//! generator step. Phases are ordered and monotonic within one run.

use std::fmt;

/// A point in the orchestration timeline
///
/// `Immediate` is the phase in which recipe bodies themselves run; only the
/// two deferred phases accept callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Work performed directly by a recipe body at load time
    Immediate,
    /// After the external dependency installer has completed
    PostInstall,
    /// After the external generator step has completed
    PostGenerate,
}

impl Phase {
    /// The deferred phases, in drain order
    pub const DEFERRED: [Phase; 2] = [Phase::PostInstall, Phase::PostGenerate];

    /// Whether callbacks may be registered for this phase
    #[must_use]
    pub fn is_deferred(self) -> bool {
        !matches!(self, Phase::Immediate)
    }

    /// Stable name for logging and error messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Immediate => "immediate",
            Phase::PostInstall => "post-install",
            Phase::PostGenerate => "post-generate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
