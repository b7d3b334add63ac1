//! Enter/leave bookkeeping for the rendered list.
//!
//! The tracker diffs successive live snapshots by key. Settled instances
//! are retained only while their leave effect runs, and are merged back in
//! key order so they keep their former position.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use summon_core::{Instance, InstanceKey};
use summon_types::{TransitionConfig, TransitionEffect};

/// One element to draw this frame.
#[derive(Debug)]
pub struct TrackedElement<'a, R, A, E> {
    pub instance: &'a Instance<R, A, E>,
    pub effect: Option<&'a TransitionEffect>,
}

pub struct TransitionTracker<R, A, E> {
    config: Option<TransitionConfig>,
    live: Vec<Instance<R, A, E>>,
    entering: HashMap<InstanceKey, TransitionEffect>,
    leaving: Vec<(Instance<R, A, E>, TransitionEffect)>,
}

impl<R, A, E> TransitionTracker<R, A, E> {
    #[must_use]
    pub fn new(config: Option<TransitionConfig>) -> Self {
        Self {
            config,
            live: Vec::new(),
            entering: HashMap::new(),
            leaving: Vec::new(),
        }
    }

    /// Record the current live snapshot, starting effects for the diff.
    pub fn sync(&mut self, live: &[Instance<R, A, E>]) {
        let current: HashSet<InstanceKey> = live.iter().map(Instance::key).collect();
        let previous: HashSet<InstanceKey> = self.live.iter().map(Instance::key).collect();

        if let Some(config) = &self.config {
            for instance in live.iter().filter(|i| !previous.contains(&i.key())) {
                if let Some(effect) = config.enter_effect() {
                    self.entering.insert(instance.key(), effect);
                }
            }
            for gone in self.live.iter().filter(|i| !current.contains(&i.key())) {
                self.entering.remove(&gone.key());
                if let Some(effect) = config.leave_effect() {
                    self.leaving.push((gone.clone(), effect));
                }
            }
        }

        self.live = live.to_vec();
    }

    pub fn advance(&mut self, delta: Duration) {
        for effect in self.entering.values_mut() {
            effect.advance(delta);
        }
        self.entering.retain(|_, effect| !effect.is_finished());

        for (_, effect) in &mut self.leaving {
            effect.advance(delta);
        }
        self.leaving.retain(|(_, effect)| !effect.is_finished());
    }

    /// Whether any enter or leave effect is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.entering.is_empty() || !self.leaving.is_empty()
    }

    #[must_use]
    pub fn leaving_len(&self) -> usize {
        self.leaving.len()
    }

    /// Live and leaving elements, ordered by key.
    #[must_use]
    pub fn elements(&self) -> Vec<TrackedElement<'_, R, A, E>> {
        let mut elements: Vec<TrackedElement<'_, R, A, E>> = self
            .live
            .iter()
            .map(|instance| TrackedElement {
                instance,
                effect: self.entering.get(&instance.key()),
            })
            .chain(self.leaving.iter().map(|(instance, effect)| TrackedElement {
                instance,
                effect: Some(effect),
            }))
            .collect();
        elements.sort_by_key(|element| element.instance.key());
        elements
    }
}
