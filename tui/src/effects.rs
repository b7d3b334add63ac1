//! Rect transforms for enter/leave transitions.
//!
//! Enter motions ease out and come to rest on the element's own rect. Leave
//! motions start from that rect and ease in as they carry the element away.
//! The result is always clamped inside the viewport.

use std::f32::consts::TAU;

use ratatui::layout::Rect;

use summon_types::{EffectKind, TransitionEffect, TransitionPhase};

const POP_ENTER_FROM: f32 = 0.6;
const POP_LEAVE_TO: f32 = 0.5;
const MAX_SLIDE: u16 = 6;
const SHAKE_AMPLITUDE: f32 = 3.0;

/// Scale about the rect's center, then shift by whole cells.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    scale: f32,
    dx: i32,
    dy: i32,
}

impl Motion {
    const REST: Motion = Motion {
        scale: 1.0,
        dx: 0,
        dy: 0,
    };
}

/// Where an element with resting rect `base` is drawn at this point of `effect`.
#[must_use]
pub fn apply_transition_effect(effect: &TransitionEffect, base: Rect, viewport: Rect) -> Rect {
    let t = effect.progress();
    let motion = match (effect.kind(), effect.phase()) {
        (EffectKind::PopScale, TransitionPhase::Enter) => Motion {
            scale: POP_ENTER_FROM + (1.0 - POP_ENTER_FROM) * ease_out(t),
            ..Motion::REST
        },
        (EffectKind::PopScale, TransitionPhase::Leave) => Motion {
            scale: 1.0 - (1.0 - POP_LEAVE_TO) * ease_in(t),
            ..Motion::REST
        },
        // Rises into place from below.
        (EffectKind::SlideUp, TransitionPhase::Enter) => Motion {
            dy: cells(slide_distance(base) * (1.0 - ease_out(t))),
            ..Motion::REST
        },
        // Keeps rising past its rest position.
        (EffectKind::SlideUp, TransitionPhase::Leave) => Motion {
            dy: -cells(slide_distance(base) * ease_in(t)),
            ..Motion::REST
        },
        // Attention shake: strongest on arrival, settles to rest.
        (EffectKind::Shake, TransitionPhase::Enter) => Motion {
            dx: cells(wobble(t, 4.0) * SHAKE_AMPLITUDE * (1.0 - t)),
            ..Motion::REST
        },
        // Refusal shake: builds up until the element is gone.
        (EffectKind::Shake, TransitionPhase::Leave) => Motion {
            dx: cells(wobble(t, 3.0) * SHAKE_AMPLITUDE * ease_in(t)),
            ..Motion::REST
        },
    };
    place(base, motion, viewport)
}

fn place(base: Rect, motion: Motion, viewport: Rect) -> Rect {
    let width = scaled(base.width, motion.scale).min(viewport.width);
    let height = scaled(base.height, motion.scale).min(viewport.height);
    let x = i32::from(base.x) + i32::from((base.width - width.min(base.width)) / 2) + motion.dx;
    let y = i32::from(base.y) + i32::from((base.height - height.min(base.height)) / 2) + motion.dy;
    Rect {
        x: clamp_axis(x, viewport.x, viewport.width, width),
        y: clamp_axis(y, viewport.y, viewport.height, height),
        width,
        height,
    }
}

fn clamp_axis(pos: i32, start: u16, extent: u16, size: u16) -> u16 {
    let min = i32::from(start);
    let max = (min + i32::from(extent) - i32::from(size)).max(min);
    pos.clamp(min, max) as u16
}

/// Never collapses a non-empty side to zero.
fn scaled(len: u16, scale: f32) -> u16 {
    if len == 0 {
        return 0;
    }
    ((f32::from(len) * scale).round() as u16).clamp(1, len)
}

fn slide_distance(base: Rect) -> f32 {
    f32::from((base.height / 2).clamp(1, MAX_SLIDE))
}

fn wobble(t: f32, oscillations: f32) -> f32 {
    f32::sin(t * TAU * oscillations)
}

fn cells(offset: f32) -> i32 {
    offset.round() as i32
}

fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}
