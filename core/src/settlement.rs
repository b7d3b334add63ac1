//! Settle-once result slot shared by an instance and its result handles.
//!
//! State moves `Pending -> Chained -> Settled` or `Pending -> Settled`, never
//! backwards. The first resolve/reject wins; later calls are ignored.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

type SettledHook = Box<dyn FnOnce()>;

enum State<R, E> {
    Pending,
    /// Locked to a spawned future; settles when that task finishes.
    Chained,
    Settled(Result<R, E>),
}

struct Slot<R, E> {
    state: State<R, E>,
    resolving: bool,
    wakers: Vec<Waker>,
    on_settled: Option<SettledHook>,
}

impl<R, E> Slot<R, E> {
    fn register(&mut self, waker: &Waker) {
        if !self.wakers.iter().any(|known| known.will_wake(waker)) {
            self.wakers.push(waker.clone());
        }
    }
}

pub(crate) struct Settlement<R, E> {
    slot: Rc<RefCell<Slot<R, E>>>,
}

impl<R, E> Clone for Settlement<R, E> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<R, E> Settlement<R, E> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                state: State::Pending,
                resolving: false,
                wakers: Vec::new(),
                on_settled: None,
            })),
        }
    }

    /// Install the hook run once, right after the outcome is stored.
    pub(crate) fn on_settled(&self, hook: impl FnOnce() + 'static) {
        self.slot.borrow_mut().on_settled = Some(Box::new(hook));
    }

    pub(crate) fn handle(&self) -> ResultHandle<R, E> {
        ResultHandle {
            settlement: self.clone(),
        }
    }

    pub(crate) fn is_resolving(&self) -> bool {
        self.slot.borrow().resolving
    }

    pub(crate) fn is_settled(&self) -> bool {
        matches!(self.slot.borrow().state, State::Settled(_))
    }

    /// Flip `resolving` and report whether the slot was still open.
    fn begin_resolve(&self) -> bool {
        let mut slot = self.slot.borrow_mut();
        if !matches!(slot.state, State::Pending) {
            tracing::trace!("ignoring resolve on an already resolved instance");
            return false;
        }
        slot.resolving = true;
        true
    }

    pub(crate) fn resolve(&self, value: R) {
        if self.begin_resolve() {
            self.settle(Ok(value));
        }
    }

    pub(crate) fn reject(&self, error: E) {
        if !matches!(self.slot.borrow().state, State::Pending) {
            tracing::trace!("ignoring reject on an already resolved instance");
            return;
        }
        self.settle(Err(error));
    }

    fn settle(&self, outcome: Result<R, E>) {
        let (wakers, hook) = {
            let mut slot = self.slot.borrow_mut();
            if matches!(slot.state, State::Settled(_)) {
                return;
            }
            slot.state = State::Settled(outcome);
            (mem::take(&mut slot.wakers), slot.on_settled.take())
        };
        for waker in wakers {
            waker.wake();
        }
        if let Some(hook) = hook {
            hook();
        }
    }

    pub(crate) fn same_slot(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<R: 'static, E: 'static> Settlement<R, E> {
    /// Lock the outcome to `future`. `is_resolving` flips now; the future is
    /// driven on the current `LocalSet` and its output settles the slot,
    /// whether or not any handle is awaited.
    ///
    /// # Panics
    ///
    /// Panics when called outside a `tokio::task::LocalSet`.
    pub(crate) fn resolve_with<F>(&self, future: F)
    where
        F: Future<Output = Result<R, E>> + 'static,
    {
        if !self.begin_resolve() {
            return;
        }
        self.slot.borrow_mut().state = State::Chained;

        let settlement = self.clone();
        tokio::task::spawn_local(async move {
            let outcome = future.await;
            settlement.settle(outcome);
        });
    }
}

impl<R: Clone, E: Clone> Settlement<R, E> {
    fn peek(&self) -> Option<Result<R, E>> {
        match &self.slot.borrow().state {
            State::Settled(outcome) => Some(outcome.clone()),
            State::Pending | State::Chained => None,
        }
    }

    fn poll_outcome(&self, cx: &mut Context<'_>) -> Poll<Result<R, E>> {
        let mut slot = self.slot.borrow_mut();
        if let State::Settled(outcome) = &slot.state {
            return Poll::Ready(outcome.clone());
        }
        slot.register(cx.waker());
        Poll::Pending
    }
}

/// Awaitable outcome of one launched request.
///
/// Every clone observes the same outcome: the value passed to `resolve`, or
/// the error passed to `reject`, unchanged. Handles only observe; settlement
/// never depends on a handle being polled or kept alive.
///
/// Cloning a handle has no bounds, but awaiting it or calling
/// [`try_outcome`](Self::try_outcome) requires `R: Clone` and `E: Clone`,
/// since every clone receives its own copy of the outcome.
pub struct ResultHandle<R, E> {
    settlement: Settlement<R, E>,
}

impl<R, E> Clone for ResultHandle<R, E> {
    fn clone(&self) -> Self {
        Self {
            settlement: self.settlement.clone(),
        }
    }
}

impl<R, E> ResultHandle<R, E> {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settlement.is_settled()
    }

    /// Whether both handles belong to the same request.
    #[must_use]
    pub fn same_request(&self, other: &Self) -> bool {
        self.settlement.same_slot(&other.settlement)
    }
}

impl<R: Clone, E: Clone> ResultHandle<R, E> {
    /// The outcome if already settled, without polling anything.
    #[must_use]
    pub fn try_outcome(&self) -> Option<Result<R, E>> {
        self.settlement.peek()
    }
}

impl<R: Clone, E: Clone> Future for ResultHandle<R, E> {
    type Output = Result<R, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.settlement.poll_outcome(cx)
    }
}

impl<R, E> fmt::Debug for ResultHandle<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandle")
            .field("settled", &self.is_settled())
            .finish_non_exhaustive()
    }
}
