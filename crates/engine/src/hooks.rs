//! Hook registry for deferred actions
//!
//! Recipes register callbacks against a deferred [`Phase`]; the orchestrator
//! drains each phase exactly once, invoking callbacks in registration order.
//!
//! ## Execution Model
//!
//! - Callbacks are owned by the registry from registration until invocation
//! - Each callback is invoked at most once, then discarded
//! - Draining aborts on the first callback failure and propagates it; later
//!   callbacks in that phase never run (partial configuration is worse than
//!   a loud early failure)
//! - Registering against an already-drained phase is a logic bug and fails
//!   loudly, as does draining a phase twice

use crate::context::PhaseContext;
use crate::error::{Error, Result};
use crate::phase::Phase;

/// A deferred unit of work, invoked at most once during a phase drain
pub type Callback = Box<dyn FnOnce(&mut PhaseContext<'_>) -> Result<()>>;

/// Per-phase callback queue
#[derive(Default)]
struct PhaseQueue {
    callbacks: Vec<Callback>,
    drained: bool,
}

/// Ordered registry of deferred callbacks, keyed by lifecycle phase
///
/// Owned by the orchestrator for the duration of one run; there is no global
/// state. Execution is single-threaded, so no locking is required.
#[derive(Default)]
pub struct HookRegistry {
    post_install: PhaseQueue,
    post_generate: PhaseQueue,
}

impl HookRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn queue_mut(&mut self, phase: Phase) -> Result<&mut PhaseQueue> {
        match phase {
            Phase::Immediate => Err(Error::NotDeferrable { phase }),
            Phase::PostInstall => Ok(&mut self.post_install),
            Phase::PostGenerate => Ok(&mut self.post_generate),
        }
    }

    /// Append a callback to the queue for `phase`
    ///
    /// # Errors
    ///
    /// Fails if `phase` is not deferrable or has already been drained.
    pub fn register(&mut self, phase: Phase, callback: Callback) -> Result<()> {
        let queue = self.queue_mut(phase)?;
        if queue.drained {
            return Err(Error::PhaseClosed { phase });
        }
        queue.callbacks.push(callback);
        tracing::trace!(phase = %phase, pending = queue.callbacks.len(), "Registered callback");
        Ok(())
    }

    /// Number of callbacks currently queued for `phase`
    #[must_use]
    pub fn pending(&self, phase: Phase) -> usize {
        match phase {
            Phase::Immediate => 0,
            Phase::PostInstall => self.post_install.callbacks.len(),
            Phase::PostGenerate => self.post_generate.callbacks.len(),
        }
    }

    /// Whether `phase` has already been drained
    #[must_use]
    pub fn is_drained(&self, phase: Phase) -> bool {
        match phase {
            Phase::Immediate => false,
            Phase::PostInstall => self.post_install.drained,
            Phase::PostGenerate => self.post_generate.drained,
        }
    }

    /// Invoke every callback queued for `phase`, in registration order
    ///
    /// Clears the queue and closes the phase. Draining a phase with zero
    /// callbacks is a no-op returning 0. The first failing callback aborts
    /// the drain and is propagated; remaining callbacks are discarded.
    ///
    /// # Errors
    ///
    /// Fails if `phase` was already drained, or if a callback fails.
    pub fn drain(&mut self, phase: Phase, ctx: &mut PhaseContext<'_>) -> Result<usize> {
        let queue = self.queue_mut(phase)?;
        if queue.drained {
            return Err(Error::PhaseAlreadyDrained { phase });
        }
        queue.drained = true;

        let callbacks = std::mem::take(&mut queue.callbacks);
        let count = callbacks.len();
        tracing::debug!(phase = %phase, count, "Draining phase");

        for (index, callback) in callbacks.into_iter().enumerate() {
            callback(ctx).map_err(|e| Error::CallbackFailed {
                phase,
                index,
                source: Box::new(e),
            })?;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::system::DryRunSystem;
    use ashiba_core::path::AbsPath;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn drains_in_registration_order() {
        let system = DryRunSystem::new();
        let root = AbsPath::new("/project".into()).unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut registry = HookRegistry::new();
        for i in 0..5 {
            let order = Rc::clone(&order);
            registry
                .register(
                    Phase::PostInstall,
                    Box::new(move |_ctx| {
                        order.borrow_mut().push(i);
                        Ok(())
                    }),
                )
                .unwrap();
        }

        let mut ctx = PhaseContext::new(&system, &root);
        let count = registry.drain(Phase::PostInstall, &mut ctx).unwrap();
        assert_eq!(count, 5);
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
        assert_eq!(registry.pending(Phase::PostInstall), 0);
    }

    #[test]
    fn drain_of_empty_phase_is_noop() {
        let system = DryRunSystem::new();
        let root = AbsPath::new("/project".into()).unwrap();
        let mut registry = HookRegistry::new();

        let mut ctx = PhaseContext::new(&system, &root);
        assert_eq!(registry.drain(Phase::PostGenerate, &mut ctx).unwrap(), 0);
    }

    #[test]
    fn register_after_drain_is_rejected() {
        let system = DryRunSystem::new();
        let root = AbsPath::new("/project".into()).unwrap();
        let mut registry = HookRegistry::new();

        let mut ctx = PhaseContext::new(&system, &root);
        registry.drain(Phase::PostInstall, &mut ctx).unwrap();

        let err = registry
            .register(Phase::PostInstall, Box::new(|_| Ok(())))
            .unwrap_err();
        assert!(matches!(err, Error::PhaseClosed { phase: Phase::PostInstall }));
    }

    #[test]
    fn double_drain_is_rejected() {
        let system = DryRunSystem::new();
        let root = AbsPath::new("/project".into()).unwrap();
        let mut registry = HookRegistry::new();

        let mut ctx = PhaseContext::new(&system, &root);
        registry.drain(Phase::PostInstall, &mut ctx).unwrap();
        let err = registry.drain(Phase::PostInstall, &mut ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::PhaseAlreadyDrained { phase: Phase::PostInstall }
        ));
    }

    #[test]
    fn immediate_phase_rejects_registration() {
        let mut registry = HookRegistry::new();
        let err = registry
            .register(Phase::Immediate, Box::new(|_| Ok(())))
            .unwrap_err();
        assert!(matches!(err, Error::NotDeferrable { phase: Phase::Immediate }));
    }

    #[test]
    fn failing_callback_aborts_remaining() {
        let system = DryRunSystem::new();
        let root = AbsPath::new("/project".into()).unwrap();
        let invoked = Rc::new(RefCell::new(Vec::new()));
        let mut registry = HookRegistry::new();

        {
            let invoked = Rc::clone(&invoked);
            registry
                .register(
                    Phase::PostInstall,
                    Box::new(move |_| {
                        invoked.borrow_mut().push("first");
                        Ok(())
                    }),
                )
                .unwrap();
        }
        registry
            .register(
                Phase::PostInstall,
                Box::new(|_| {
                    Err(Error::Template {
                        message: "boom".into(),
                    })
                }),
            )
            .unwrap();
        {
            let invoked = Rc::clone(&invoked);
            registry
                .register(
                    Phase::PostInstall,
                    Box::new(move |_| {
                        invoked.borrow_mut().push("third");
                        Ok(())
                    }),
                )
                .unwrap();
        }

        let mut ctx = PhaseContext::new(&system, &root);
        let err = registry.drain(Phase::PostInstall, &mut ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::CallbackFailed { phase: Phase::PostInstall, index: 1, .. }
        ));
        assert_eq!(*invoked.borrow(), vec!["first"]);
        // The phase is closed even after a failed drain.
        assert!(registry.is_drained(Phase::PostInstall));
    }
}
