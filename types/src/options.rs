use serde::Deserialize;

use crate::transition::TransitionConfig;

/// Registry-wide launch configuration.
///
/// Shared by reference with every instance the registry creates, so all
/// instances of one registry observe identical options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LaunchOptions {
    /// Allow at most one outstanding request at a time. Default: false.
    #[serde(default)]
    pub singleton: bool,
    /// Enter/leave effects for the presentation layer. Default: none.
    #[serde(default)]
    pub transition: Option<TransitionConfig>,
}

impl LaunchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    pub fn with_transition(mut self, transition: TransitionConfig) -> Self {
        self.transition = Some(transition);
        self
    }

    #[must_use]
    pub fn singleton(&self) -> bool {
        self.singleton
    }

    #[must_use]
    pub fn transition(&self) -> Option<&TransitionConfig> {
        self.transition.as_ref()
    }
}
