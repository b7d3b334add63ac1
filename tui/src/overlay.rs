//! Persistent overlay container drawn above the host's own UI.
//!
//! This is the terminal counterpart of a document body: self-hosted
//! launchers attach one layer here while active. The host draws the
//! container last each frame and offers it keys before its own handling.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

/// Stable identifier for a layer attached to one [`OverlayHost`].
///
/// IDs are never reused for the lifetime of the host.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LayerId(u64);

impl LayerId {
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

pub trait OverlayLayer {
    fn render(&self, area: Rect, buf: &mut Buffer);

    fn handle_key(&self, _key: KeyEvent) -> bool {
        false
    }

    fn advance(&self, _delta: Duration) {}
}

#[derive(Default)]
struct HostState {
    layers: Vec<(LayerId, Rc<dyn OverlayLayer>)>,
    next_id: u64,
}

/// Ordered stack of overlay layers; later layers draw on top.
///
/// Clones share the same stack.
#[derive(Clone, Default)]
pub struct OverlayHost {
    state: Rc<RefCell<HostState>>,
}

impl OverlayHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, layer: Rc<dyn OverlayLayer>) -> LayerId {
        let mut state = self.state.borrow_mut();
        let id = LayerId(state.next_id);
        state.next_id += 1;
        state.layers.push((id, layer));
        tracing::debug!(layer = id.raw(), count = state.layers.len(), "overlay layer attached");
        id
    }

    /// Remove a layer. Returns `false` if it was not attached.
    pub fn detach(&self, id: LayerId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            state
                .layers
                .iter()
                .position(|(layer_id, _)| *layer_id == id)
                .map(|index| state.layers.remove(index))
        };
        if removed.is_some() {
            tracing::debug!(layer = id.raw(), "overlay layer detached");
        }
        removed.is_some()
    }

    #[must_use]
    pub fn contains(&self, id: LayerId) -> bool {
        self.state
            .borrow()
            .layers
            .iter()
            .any(|(layer_id, _)| *layer_id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().layers.is_empty()
    }

    // Layers may attach or detach while handling a call, so every walk
    // works on a snapshot.
    fn snapshot(&self) -> Vec<Rc<dyn OverlayLayer>> {
        self.state
            .borrow()
            .layers
            .iter()
            .map(|(_, layer)| Rc::clone(layer))
            .collect()
    }

    /// Offer a key to layers from the top down; the first taker wins.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        self.snapshot()
            .iter()
            .rev()
            .any(|layer| layer.handle_key(key))
    }

    pub fn advance(&self, delta: Duration) {
        for layer in self.snapshot() {
            layer.advance(delta);
        }
    }
}

impl Widget for &OverlayHost {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for layer in self.snapshot() {
            layer.render(area, buf);
        }
    }
}

impl fmt::Debug for OverlayHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let ids: Vec<LayerId> = state.layers.iter().map(|(id, _)| *id).collect();
        f.debug_struct("OverlayHost").field("layers", &ids).finish()
    }
}
