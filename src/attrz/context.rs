//! Scoped access contexts.
//!
//! Some hosts must switch into an elevated context (a different credential set,
//! an address-space mode, a privileged handle) before the store may touch the
//! attribute directories, and must switch back afterwards no matter how the
//! operation ends. [`ContextGuard`] ties the switch-back to `Drop`, so it runs on
//! success, on early `?` returns, and on unwinding.

use tracing::trace;

pub trait AccessContext {
    /// Whatever is needed to undo [`AccessContext::enter`].
    type Saved;

    fn enter(&self) -> Self::Saved;

    fn restore(&self, saved: Self::Saved);

    /// Enters the context and returns a guard that restores it when dropped.
    fn scoped(&self) -> ContextGuard<'_, Self>
    where
        Self: Sized,
    {
        ContextGuard::new(self)
    }
}

/// Context for hosts that need no switching.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl AccessContext for NoContext {
    type Saved = ();

    fn enter(&self) -> Self::Saved {}

    fn restore(&self, _saved: Self::Saved) {}
}

#[must_use = "the context is restored as soon as the guard is dropped"]
pub struct ContextGuard<'a, C: AccessContext> {
    ctx: &'a C,
    saved: Option<C::Saved>,
}

impl<'a, C: AccessContext> ContextGuard<'a, C> {
    pub fn new(ctx: &'a C) -> Self {
        trace!("entering access context");
        let saved = ctx.enter();
        Self {
            ctx,
            saved: Some(saved),
        }
    }
}

impl<C: AccessContext> Drop for ContextGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.ctx.restore(saved);
            trace!("restored access context");
        }
    }
}
