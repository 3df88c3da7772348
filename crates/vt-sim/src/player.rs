//! The player avatar: same movement contract as agents, driven by input.

use vt_core::Vec2;
use vt_grid::{MovementSolver, StepResult, TileCollisionGrid};

/// Input magnitudes below this are treated as "no input".
const DEAD_ZONE: f32 = 1e-4;

/// Position and facing of the player, exposed read-only to agent logic.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerController {
    position: Vec2,
    facing:   f32,
}

impl PlayerController {
    pub fn new(position: Vec2) -> Self {
        Self { position, facing: 0.0 }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Move along `input` (a direction on the ground plane; magnitudes above
    /// 1 are capped) for `dt` seconds at `speed`.
    ///
    /// A blocked step leaves the position unchanged but still turns the
    /// player towards the input.
    pub fn drive(&mut self, grid: &TileCollisionGrid, input: Vec2, speed: f32, dt: f64) -> StepResult {
        let magnitude = input.length();
        if magnitude < DEAD_ZONE {
            return StepResult { next: self.position, blocked: false };
        }
        self.facing = Vec2::ZERO.heading_to(input);
        let distance = speed * magnitude.min(1.0) * dt as f32;
        let step = MovementSolver::new(grid).step(self.position, self.facing, distance);
        self.position = step.next;
        step
    }
}
