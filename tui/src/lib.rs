//! ratatui presentation for Summon launchers.
//!
//! Two binding modes, picked by constructor:
//!
//! - [`BoundRenderer`]: host-provided. The caller's own draw code renders it
//!   as a widget wherever it wants the live instances to appear.
//! - [`SelfHosted`]: attaches its own layer to an [`OverlayHost`] on
//!   [`activate`](SelfHosted::activate) and detaches it when the returned
//!   [`Mount`] is deactivated or dropped.
//!
//! Both render one element per live instance, in key order, through a
//! caller-supplied [`InstanceView`].

mod bound;
mod effects;
mod overlay;
mod self_hosted;
mod transition;
mod view;

pub use bound::BoundRenderer;
pub use effects::apply_transition_effect;
pub use overlay::{LayerId, OverlayHost, OverlayLayer};
pub use self_hosted::{Mount, MountError, SelfHosted};
pub use transition::{TransitionTracker, TrackedElement};
pub use view::{InstanceView, TemplateView, centered_rect, template};
