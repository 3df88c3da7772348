//! Step validation and heading smoothing.

use vt_core::{Vec2, normalize_angle};

use crate::TileCollisionGrid;

/// Outcome of one [`MovementSolver::step`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Committed position: the candidate if it was accepted, otherwise the
    /// unchanged starting position.
    pub next:    Vec2,
    pub blocked: bool,
}

/// Validates straight-line steps against a [`TileCollisionGrid`].
///
/// Borrowed for the duration of one tick; holds no state of its own.
#[derive(Copy, Clone)]
pub struct MovementSolver<'a> {
    grid: &'a TileCollisionGrid,
}

impl<'a> MovementSolver<'a> {
    pub fn new(grid: &'a TileCollisionGrid) -> Self {
        Self { grid }
    }

    /// Move `speed` units from `pos` along `heading`.
    ///
    /// The candidate's tile decides everything: a building (or leaving the
    /// map) rejects the whole step, there is no partial movement or sliding.
    pub fn step(&self, pos: Vec2, heading: f32, speed: f32) -> StepResult {
        let candidate = pos + Vec2::from_heading(heading) * speed;
        if self.grid.classify(candidate.x, candidate.z).is_walkable() {
            StepResult { next: candidate, blocked: false }
        } else {
            StepResult { next: pos, blocked: true }
        }
    }
}

/// Turn `current` a fraction `gain` of the way towards `target`.
///
/// The difference is wrapped into (−π, π] before scaling so the agent always
/// turns the short way round, even across the ±π seam.  The result is
/// normalized.
#[inline]
pub fn steer(current: f32, target: f32, gain: f32) -> f32 {
    normalize_angle(current + normalize_angle(target - current) * gain)
}
