//! List transition configuration and per-element effect state.
//!
//! A transition only changes *where* an element is drawn while it enters or
//! leaves the live sequence. It never affects ordering or identity.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_DURATION_MS: u64 = 180;

const fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

/// The kind of rect effect played on enter or leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum EffectKind {
    PopScale,
    SlideUp,
    Shake,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [EffectKind::PopScale, EffectKind::SlideUp, EffectKind::Shake];

    const NAMES: &'static [&'static str] = &["pop_scale", "slide_up", "shake"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectKind::PopScale => "pop_scale",
            EffectKind::SlideUp => "slide_up",
            EffectKind::Shake => "shake",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition effect '{raw}'; expected one of: {expected:?}")]
pub struct ParseEffectKindError {
    raw: String,
    expected: &'static [&'static str],
}

impl ParseEffectKindError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for EffectKind {
    type Err = ParseEffectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseEffectKindError {
                raw: s.to_string(),
                expected: EffectKind::NAMES,
            })
    }
}

impl TryFrom<String> for EffectKind {
    type Error = ParseEffectKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Enter/leave animation settings forwarded to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransitionConfig {
    /// Effect for elements appended to the live sequence.
    #[serde(default)]
    pub enter: Option<EffectKind>,
    /// Effect for elements removed after settlement.
    #[serde(default)]
    pub leave: Option<EffectKind>,
    /// Length of each effect in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl TransitionConfig {
    #[must_use]
    pub fn new(enter: Option<EffectKind>, leave: Option<EffectKind>, duration: Duration) -> Self {
        Self {
            enter,
            leave,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[must_use]
    pub fn enter_effect(&self) -> Option<TransitionEffect> {
        self.enter
            .map(|kind| TransitionEffect::enter(kind, self.duration()))
    }

    #[must_use]
    pub fn leave_effect(&self) -> Option<TransitionEffect> {
        self.leave
            .map(|kind| TransitionEffect::leave(kind, self.duration()))
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter: Some(EffectKind::PopScale),
            leave: None,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Enter,
    Leave,
}

/// Running effect for one element.
///
/// Time only moves when the host calls [`advance`](Self::advance), so render
/// passes stay deterministic.
#[derive(Debug, Clone)]
pub struct TransitionEffect {
    kind: EffectKind,
    phase: TransitionPhase,
    elapsed: Duration,
    duration: Duration,
}

impl TransitionEffect {
    #[must_use]
    pub fn new(kind: EffectKind, phase: TransitionPhase, duration: Duration) -> Self {
        Self {
            kind,
            phase,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    #[must_use]
    pub fn enter(kind: EffectKind, duration: Duration) -> Self {
        Self::new(kind, TransitionPhase::Enter, duration)
    }

    #[must_use]
    pub fn leave(kind: EffectKind, duration: Duration) -> Self {
        Self::new(kind, TransitionPhase::Leave, duration)
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
    }

    /// Fraction of the effect played, in `0.0..=1.0`. Zero-length effects
    /// are complete from the start.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// How "present" the element is: rises 0→1 on enter, falls 1→0 on leave.
    #[must_use]
    pub fn presence(&self) -> f32 {
        match self.phase {
            TransitionPhase::Enter => self.progress(),
            TransitionPhase::Leave => 1.0 - self.progress(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }
}
