use summon_types::LaunchOptions;

use crate::registry::PendingInstanceRegistry;
use crate::settlement::ResultHandle;

/// Outcome of [`LaunchController::launch`].
///
/// In singleton mode a launch that collides with a live request joins it:
/// the caller receives the original request's handle and its own arguments
/// come back unused in `discarded_args`.
#[derive(Debug)]
pub enum Launch<R, A, E> {
    Created(ResultHandle<R, E>),
    Joined {
        handle: ResultHandle<R, E>,
        discarded_args: A,
    },
}

impl<R, A, E> Launch<R, A, E> {
    #[must_use]
    pub fn handle(&self) -> &ResultHandle<R, E> {
        match self {
            Launch::Created(handle) | Launch::Joined { handle, .. } => handle,
        }
    }

    #[must_use]
    pub fn into_handle(self) -> ResultHandle<R, E> {
        match self {
            Launch::Created(handle) | Launch::Joined { handle, .. } => handle,
        }
    }

    #[must_use]
    pub fn is_joined(&self) -> bool {
        matches!(self, Launch::Joined { .. })
    }
}

/// Public entry point for launching requests against a registry.
pub struct LaunchController<R, A, E> {
    registry: PendingInstanceRegistry<R, A, E>,
}

impl<R, A, E> Clone for LaunchController<R, A, E> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<R, A, E> LaunchController<R, A, E> {
    #[must_use]
    pub fn new(options: LaunchOptions) -> Self {
        Self::from_registry(PendingInstanceRegistry::new(options))
    }

    #[must_use]
    pub fn from_registry(registry: PendingInstanceRegistry<R, A, E>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &PendingInstanceRegistry<R, A, E> {
        &self.registry
    }
}

impl<R: 'static, A: 'static, E: 'static> LaunchController<R, A, E> {
    /// Launch a request and report whether it joined an existing one.
    pub fn launch(&self, args: A) -> Launch<R, A, E> {
        if self.registry.options().singleton()
            && let Some(handle) = self.registry.first().and_then(|live| live.result())
        {
            tracing::debug!("singleton request already pending; joining it");
            return Launch::Joined {
                handle,
                discarded_args: args,
            };
        }
        Launch::Created(self.registry.create(args))
    }

    /// Launch a request and return its result handle.
    ///
    /// With `singleton` set and a request already pending, this returns the
    /// pending request's handle and ignores `args`. Use
    /// [`launch`](Self::launch) to observe that case.
    pub fn start(&self, args: A) -> ResultHandle<R, E> {
        self.launch(args).into_handle()
    }
}
