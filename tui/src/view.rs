use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use summon_core::Instance;

const DEFAULT_WIDTH: u16 = 48;
const DEFAULT_HEIGHT: u16 = 7;

/// Caller-supplied visual definition for one live instance.
///
/// The adapter calls [`render`](Self::render) once per live instance per
/// frame, in key order, so later instances draw on top. The view settles
/// the request through the instance it is given; the adapter never looks at
/// what was drawn.
pub trait InstanceView<R, A, E> {
    fn render(&self, instance: &Instance<R, A, E>, area: Rect, buf: &mut Buffer);

    /// Where this instance sits inside `viewport`. Defaults to a centered box.
    fn area(&self, _instance: &Instance<R, A, E>, viewport: Rect) -> Rect {
        centered_rect(viewport, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Handle a key routed to this instance. Return `true` if consumed.
    fn handle_key(&self, _instance: &Instance<R, A, E>, _key: KeyEvent) -> bool {
        false
    }
}

/// Render-only view backed by a closure.
#[derive(Debug, Clone)]
pub struct TemplateView<F> {
    render: F,
    width: u16,
    height: u16,
}

/// Wrap a render closure as an [`InstanceView`].
pub fn template<F>(render: F) -> TemplateView<F> {
    TemplateView {
        render,
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
    }
}

impl<F> TemplateView<F> {
    /// Size of the centered box each instance gets.
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl<R, A, E, F> InstanceView<R, A, E> for TemplateView<F>
where
    F: Fn(&Instance<R, A, E>, Rect, &mut Buffer),
{
    fn render(&self, instance: &Instance<R, A, E>, area: Rect, buf: &mut Buffer) {
        (self.render)(instance, area, buf);
    }

    fn area(&self, _instance: &Instance<R, A, E>, viewport: Rect) -> Rect {
        centered_rect(viewport, self.width, self.height)
    }
}

/// A `width` x `height` rect centered in `viewport`, clamped to fit.
#[must_use]
pub fn centered_rect(viewport: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(viewport.width);
    let height = height.min(viewport.height);
    Rect {
        x: viewport.x + (viewport.width - width) / 2,
        y: viewport.y + (viewport.height - height) / 2,
        width,
        height,
    }
}
