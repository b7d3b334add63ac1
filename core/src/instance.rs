use std::fmt;
use std::future::Future;
use std::rc::Rc;

use summon_types::LaunchOptions;

use crate::settlement::{ResultHandle, Settlement};

/// Stable list identity for an instance.
///
/// Keys are allocated in creation order, start at 0, and are never reused
/// for the lifetime of the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceKey(u64);

impl InstanceKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One outstanding request, as seen by the component rendering it.
///
/// Cloning is cheap and every clone refers to the same request. The rendered
/// component reads [`args`](Self::args) and eventually calls exactly one of
/// [`resolve`](Self::resolve), [`resolve_with`](Self::resolve_with) or
/// [`reject`](Self::reject); only the first call has any effect.
pub struct Instance<R, A, E> {
    key: InstanceKey,
    args: Rc<A>,
    options: Rc<LaunchOptions>,
    settlement: Settlement<R, E>,
}

impl<R, A, E> Clone for Instance<R, A, E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            args: Rc::clone(&self.args),
            options: Rc::clone(&self.options),
            settlement: self.settlement.clone(),
        }
    }
}

impl<R, A, E> Instance<R, A, E> {
    pub(crate) fn new(
        key: InstanceKey,
        args: A,
        options: Rc<LaunchOptions>,
        settlement: Settlement<R, E>,
    ) -> Self {
        Self {
            key,
            args: Rc::new(args),
            options,
            settlement,
        }
    }

    #[must_use]
    pub fn key(&self) -> InstanceKey {
        self.key
    }

    /// Arguments the request was started with.
    #[must_use]
    pub fn args(&self) -> &A {
        &self.args
    }

    /// Options of the owning registry.
    #[must_use]
    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// True once `resolve` or `resolve_with` was called, even if the
    /// chained future has not completed yet. `reject` leaves it false.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.settlement.is_resolving()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.settlement.is_settled()
    }

    /// The open result handle, or `None` once the request has settled.
    #[must_use]
    pub fn result(&self) -> Option<ResultHandle<R, E>> {
        self.is_pending().then(|| self.settlement.handle())
    }

    pub fn resolve(&self, value: R) {
        self.settlement.resolve(value);
    }

    /// Resolve with the eventual outcome of another future.
    ///
    /// The instance stays in the registry, with `is_resolving() == true`,
    /// until `future` completes. The future runs as a local task, so this
    /// must be called inside a `tokio::task::LocalSet`.
    pub fn resolve_with<F>(&self, future: F)
    where
        R: 'static,
        E: 'static,
        F: Future<Output = Result<R, E>> + 'static,
    {
        self.settlement.resolve_with(future);
    }

    pub fn reject(&self, error: E) {
        self.settlement.reject(error);
    }
}

impl<R, A, E> fmt::Debug for Instance<R, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("key", &self.key)
            .field("pending", &self.is_pending())
            .field("is_resolving", &self.is_resolving())
            .finish_non_exhaustive()
    }
}
