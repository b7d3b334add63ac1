//! Self-hosted binding: the launcher mounts its own overlay layer.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use thiserror::Error;

use summon_core::{Launch, LaunchController, LaunchOptions, PendingInstanceRegistry, ResultHandle};

use crate::bound::BoundRenderer;
use crate::overlay::{LayerId, OverlayHost, OverlayLayer};
use crate::view::InstanceView;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("launcher is already mounted")]
    AlreadyActive,
}

/// Launcher that renders itself into an [`OverlayHost`] while active.
///
/// Requests can only be started between [`activate`](Self::activate) and
/// the matching [`Mount::deactivate`].
pub struct SelfHosted<R, A, E, V> {
    renderer: Rc<BoundRenderer<R, A, E, V>>,
    active: Rc<Cell<bool>>,
}

impl<R, A, E, V> SelfHosted<R, A, E, V>
where
    V: InstanceView<R, A, E>,
{
    #[must_use]
    pub fn new(options: LaunchOptions, view: V) -> Self {
        Self {
            renderer: Rc::new(BoundRenderer::new(options, view)),
            active: Rc::new(Cell::new(false)),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    #[must_use]
    pub fn controller(&self) -> &LaunchController<R, A, E> {
        self.renderer.controller()
    }

    #[must_use]
    pub fn registry(&self) -> &PendingInstanceRegistry<R, A, E> {
        self.renderer.registry()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.renderer.is_animating()
    }
}

impl<R: 'static, A: 'static, E: 'static, V> SelfHosted<R, A, E, V>
where
    V: InstanceView<R, A, E> + 'static,
{
    /// Attach the controller layer to `host`.
    pub fn activate(&self, host: &OverlayHost) -> Result<Mount, MountError> {
        if self.active.get() {
            return Err(MountError::AlreadyActive);
        }
        let layer = host.attach(Rc::new(ControllerLayer {
            renderer: Rc::clone(&self.renderer),
        }));
        self.active.set(true);
        tracing::debug!(layer = layer.raw(), "launcher mounted");
        Ok(Mount {
            host: host.clone(),
            layer,
            active: Rc::clone(&self.active),
        })
    }

    /// Start a request. Returns `None` while the launcher is not mounted.
    pub fn start(&self, args: A) -> Option<ResultHandle<R, E>> {
        self.launch(args).map(Launch::into_handle)
    }

    pub fn launch(&self, args: A) -> Option<Launch<R, A, E>> {
        if !self.active.get() {
            tracing::debug!("start ignored: launcher is not mounted");
            return None;
        }
        Some(self.renderer.launch(args))
    }
}

impl<R, A, E, V> fmt::Debug for SelfHosted<R, A, E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfHosted")
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}

struct ControllerLayer<R, A, E, V> {
    renderer: Rc<BoundRenderer<R, A, E, V>>,
}

impl<R, A, E, V> OverlayLayer for ControllerLayer<R, A, E, V>
where
    V: InstanceView<R, A, E>,
{
    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.renderer.draw(area, buf);
    }

    fn handle_key(&self, key: KeyEvent) -> bool {
        self.renderer.handle_key(key)
    }

    fn advance(&self, delta: Duration) {
        self.renderer.advance(delta);
    }
}

/// An active mount. Dropping it detaches the layer.
#[derive(Debug)]
pub struct Mount {
    host: OverlayHost,
    layer: LayerId,
    active: Rc<Cell<bool>>,
}

impl Mount {
    #[must_use]
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn deactivate(self) {
        drop(self);
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.host.detach(self.layer);
        self.active.set(false);
        tracing::debug!(layer = self.layer.raw(), "launcher unmounted");
    }
}
