//! Core data types for Summon.
//!
//! Pure configuration and animation types with no IO, no async, and no
//! rendering dependency. Shared by the registry (`summon-core`), the config
//! loader, and the terminal binding.

mod options;
mod transition;

pub use options::LaunchOptions;
pub use transition::{
    EffectKind, ParseEffectKindError, TransitionConfig, TransitionEffect, TransitionPhase,
};
