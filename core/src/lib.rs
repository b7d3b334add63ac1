//! Promise-driven lifecycle manager for imperatively launched components.
//!
//! A caller [`start`](LaunchController::start)s a request and gets back a
//! [`ResultHandle`]. The request lives in a [`PendingInstanceRegistry`] as an
//! [`Instance`] until the rendered component settles it with
//! [`Instance::resolve`], [`Instance::resolve_with`] or [`Instance::reject`].
//! Settlement removes the instance from the registry in the same call, so
//! "in the registry" and "pending" always mean the same thing.
//!
//! ```text
//! start(args) -> LaunchController -> (singleton gate) -> Registry::create
//!                                                            |
//!   render loop <- instances() snapshot <- ordered Vec <-----+
//!        |
//!        v
//!   view calls resolve/reject -> settlement hook -> removed from Vec
//! ```
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Drive it from one
//! UI thread, typically a tokio current-thread runtime with a `LocalSet`.

mod controller;
mod instance;
mod registry;
mod settlement;

pub use controller::{Launch, LaunchController};
pub use instance::{Instance, InstanceKey};
pub use registry::PendingInstanceRegistry;
pub use settlement::ResultHandle;
pub use summon_types::LaunchOptions;
