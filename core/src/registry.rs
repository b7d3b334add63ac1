//! Ordered collection of live instances.
//!
//! Membership is driven purely by settlement: `create` appends, and the hook
//! installed by `create` removes. There is no public remove, so a request
//! cannot leave the list without being resolved or rejected first.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use summon_types::LaunchOptions;
use tokio::sync::watch;

use crate::instance::{Instance, InstanceKey};
use crate::settlement::{ResultHandle, Settlement};

struct RegistryState<R, A, E> {
    instances: Vec<Instance<R, A, E>>,
    next_key: u64,
}

/// Pending requests in creation order.
///
/// Clones share the same list. Every append and removal bumps a revision
/// published through [`subscribe`](Self::subscribe), so a render loop can
/// wait for changes instead of redrawing blindly.
pub struct PendingInstanceRegistry<R, A, E> {
    state: Rc<RefCell<RegistryState<R, A, E>>>,
    options: Rc<LaunchOptions>,
    revision: Rc<watch::Sender<u64>>,
}

impl<R, A, E> Clone for PendingInstanceRegistry<R, A, E> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            options: Rc::clone(&self.options),
            revision: Rc::clone(&self.revision),
        }
    }
}

impl<R, A, E> PendingInstanceRegistry<R, A, E> {
    #[must_use]
    pub fn new(options: LaunchOptions) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Rc::new(RefCell::new(RegistryState {
                instances: Vec::new(),
                next_key: 0,
            })),
            options: Rc::new(options),
            revision: Rc::new(revision),
        }
    }

    #[must_use]
    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().instances.is_empty()
    }

    /// The oldest live instance.
    #[must_use]
    pub fn first(&self) -> Option<Instance<R, A, E>> {
        self.state.borrow().instances.first().cloned()
    }

    /// Snapshot of the live instances in key order.
    ///
    /// The snapshot holds no borrow on the registry, so callers may resolve
    /// or reject while iterating it.
    #[must_use]
    pub fn instances(&self) -> Vec<Instance<R, A, E>> {
        self.state.borrow().instances.clone()
    }

    /// Keys of the live instances in order.
    #[must_use]
    pub fn keys(&self) -> Vec<InstanceKey> {
        self.state
            .borrow()
            .instances
            .iter()
            .map(Instance::key)
            .collect()
    }

    /// Monotonic change counter; bumps on every append and removal.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl<R: 'static, A: 'static, E: 'static> PendingInstanceRegistry<R, A, E> {
    /// Append a new instance for `args` and return its result handle.
    ///
    /// Always creates; singleton gating lives in the launch controller.
    pub fn create(&self, args: A) -> ResultHandle<R, E> {
        let settlement = Settlement::new();
        let (key, live) = {
            let mut state = self.state.borrow_mut();
            let key = InstanceKey::new(state.next_key);
            state.next_key += 1;
            state.instances.push(Instance::new(
                key,
                args,
                Rc::clone(&self.options),
                settlement.clone(),
            ));
            (key, state.instances.len())
        };

        let state = Rc::downgrade(&self.state);
        let revision = Rc::clone(&self.revision);
        settlement.on_settled(move || remove_settled(&state, &revision, key));

        bump(&self.revision);
        tracing::debug!(%key, live, "instance created");
        settlement.handle()
    }
}

fn bump(revision: &watch::Sender<u64>) {
    revision.send_modify(|rev| *rev += 1);
}

fn remove_settled<R, A, E>(
    state: &Weak<RefCell<RegistryState<R, A, E>>>,
    revision: &watch::Sender<u64>,
    key: InstanceKey,
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let (removed, live) = {
        let mut state = state.borrow_mut();
        // Keys are never reused, so the key identifies this exact instance.
        let removed = state
            .instances
            .iter()
            .position(|instance| instance.key() == key)
            .map(|index| state.instances.remove(index));
        (removed, state.instances.len())
    };
    // Dropped outside the borrow: args may own arbitrary values.
    if removed.is_some() {
        bump(revision);
        tracing::debug!(%key, live, "instance settled and removed");
    } else {
        tracing::trace!(%key, "settled instance already removed");
    }
}
