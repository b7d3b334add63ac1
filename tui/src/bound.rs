use std::cell::RefCell;
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Clear, Widget};

use summon_core::{Launch, LaunchController, LaunchOptions, PendingInstanceRegistry, ResultHandle};

use crate::effects::apply_transition_effect;
use crate::transition::TransitionTracker;
use crate::view::InstanceView;

/// Host-provided binding: a widget that renders every live instance.
///
/// The embedding draw code owns placement and lifetime; render
/// `&BoundRenderer` wherever the instances should appear.
pub struct BoundRenderer<R, A, E, V> {
    controller: LaunchController<R, A, E>,
    view: V,
    transitions: RefCell<TransitionTracker<R, A, E>>,
}

impl<R, A, E, V> BoundRenderer<R, A, E, V>
where
    V: InstanceView<R, A, E>,
{
    #[must_use]
    pub fn new(options: LaunchOptions, view: V) -> Self {
        let transitions = TransitionTracker::new(options.transition().cloned());
        Self {
            controller: LaunchController::new(options),
            view,
            transitions: RefCell::new(transitions),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &LaunchController<R, A, E> {
        &self.controller
    }

    #[must_use]
    pub fn registry(&self) -> &PendingInstanceRegistry<R, A, E> {
        self.controller.registry()
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Route a key to the topmost (most recent) live instance.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        let Some(top) = self.registry().instances().pop() else {
            return false;
        };
        self.view.handle_key(&top, key)
    }

    /// Advance enter/leave effects by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut transitions = self.transitions.borrow_mut();
        transitions.sync(&self.registry().instances());
        transitions.advance(delta);
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.borrow().is_animating()
    }

    pub(crate) fn draw(&self, area: Rect, buf: &mut Buffer) {
        let live = self.registry().instances();
        let mut transitions = self.transitions.borrow_mut();
        transitions.sync(&live);

        let elements = transitions.elements();
        tracing::trace!(live = live.len(), drawn = elements.len(), "rendering instances");
        for element in elements {
            let base = self.view.area(element.instance, area);
            let rect = element
                .effect
                .map_or(base, |effect| apply_transition_effect(effect, base, area))
                .intersection(area);
            if rect.is_empty() {
                continue;
            }
            Clear.render(rect, buf);
            self.view.render(element.instance, rect, buf);
        }
    }
}

impl<R: 'static, A: 'static, E: 'static, V> BoundRenderer<R, A, E, V>
where
    V: InstanceView<R, A, E>,
{
    pub fn start(&self, args: A) -> ResultHandle<R, E> {
        self.controller.start(args)
    }

    pub fn launch(&self, args: A) -> Launch<R, A, E> {
        self.controller.launch(args)
    }
}

impl<R, A, E, V> Widget for &BoundRenderer<R, A, E, V>
where
    V: InstanceView<R, A, E>,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.draw(area, buf);
    }
}
