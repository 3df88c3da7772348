//! World and agent configuration.
//!
//! Plain numeric data supplied by the host at world construction.  Every
//! field has a default matching the shipped world; with the `serde` feature a
//! partial JSON document can override any subset (`#[serde(default)]`).

use crate::{CoreError, CoreResult};

// ── Policies ──────────────────────────────────────────────────────────────────

/// How an idle agent picks a conversation partner among eligible candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairingPolicy {
    /// First eligible candidate in registry order, regardless of distance.
    #[default]
    FirstMatch,
    /// Closest eligible candidate; ties broken by registry order.
    Nearest,
}

/// Relative weights of the three outcomes of an idle decision roll.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionWeights {
    /// Stay idle and show an emote.
    pub emote: f64,
    /// Start walking to a random point.
    pub walk:  f64,
    /// Stay idle quietly.
    pub rest:  f64,
}

impl Default for DecisionWeights {
    fn default() -> Self {
        Self { emote: 0.2, walk: 0.5, rest: 0.3 }
    }
}

impl DecisionWeights {
    /// Weights in roll order: emote, walk, rest.
    pub fn as_array(&self) -> [f64; 3] {
        [self.emote, self.walk, self.rest]
    }
}

/// An inclusive range of seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwellRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DwellRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }
}

// ── GridConfig ────────────────────────────────────────────────────────────────

/// Dimensions and generation rule of the tile collision grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Tiles along x.
    pub width:             u32,
    /// Tiles along z.
    pub depth:             u32,
    /// World units per tile edge.
    pub tile_size:         f32,
    /// Every `road_stride`-th row and column is road.
    pub road_stride:       u32,
    /// Tiles within this distance of the grid centre are park.
    pub park_radius_tiles: f32,
    /// Chance that a building tile is turned into an open plaza.
    pub plaza_chance:      f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width:             48,
            depth:             48,
            tile_size:         2.0,
            road_stride:       6,
            park_radius_tiles: 5.0,
            plaza_chance:      0.08,
        }
    }
}

impl GridConfig {
    /// Half the world extent along x, in world units.  The world is centred on
    /// the origin.
    #[inline]
    pub fn half_extent_x(&self) -> f32 {
        self.width as f32 * self.tile_size * 0.5
    }

    /// Half the world extent along z, in world units.
    #[inline]
    pub fn half_extent_z(&self) -> f32 {
        self.depth as f32 * self.tile_size * 0.5
    }
}

// ── AgentTuning ───────────────────────────────────────────────────────────────

/// Movement, dwell, and conversation timing for non-player characters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentTuning {
    /// World units per second while walking.
    pub walk_speed:                 f32,
    /// World units per second for the player avatar.
    pub player_speed:               f32,
    /// Fraction of the remaining heading error corrected each tick.
    pub turn_gain:                  f32,
    /// A walk ends once the agent is closer than this to its target.
    pub arrival_threshold:          f32,
    /// Maximum distance between two agents that may start a conversation.
    pub interaction_radius:         f32,
    pub pairing_policy:             PairingPolicy,
    pub decision_weights:           DecisionWeights,
    /// Idle dwell after rolling an emote.
    pub emote_dwell_secs:           f64,
    pub walk_dwell:                 DwellRange,
    pub idle_dwell:                 DwellRange,
    /// Idle dwell after a blocked step.
    pub blocked_backoff_secs:       f64,
    /// How long one line of dialogue stays on screen.
    pub speak_secs:                 f64,
    /// Cooldown after a conversation ends normally or its partner left.
    pub conversation_cooldown_secs: f64,
    /// Cooldown after a celebratory early exit.
    pub celebration_cooldown_secs:  f64,
    /// How long the celebratory emote is shown.
    pub celebration_emote_secs:     f64,
    /// Cooldown given to the survivor when its partner is removed.
    pub partner_lost_cooldown_secs: f64,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            walk_speed:                 2.0,
            player_speed:               4.0,
            turn_gain:                  0.1,
            arrival_threshold:          0.5,
            interaction_radius:         5.0,
            pairing_policy:             PairingPolicy::FirstMatch,
            decision_weights:           DecisionWeights::default(),
            emote_dwell_secs:           4.0,
            walk_dwell:                 DwellRange::new(4.0, 8.0),
            idle_dwell:                 DwellRange::new(2.0, 4.0),
            blocked_backoff_secs:       1.0,
            speak_secs:                 3.5,
            conversation_cooldown_secs: 10.0,
            celebration_cooldown_secs:  15.0,
            celebration_emote_secs:     2.0,
            partner_lost_cooldown_secs: 2.0,
        }
    }
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Everything the agent core needs to know about the world it runs in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub grid:        GridConfig,
    pub agents:      AgentTuning,
    /// Number of agents spawned at world initialization.
    pub agent_count: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid:        GridConfig::default(),
            agents:      AgentTuning::default(),
            agent_count: 24,
        }
    }
}

impl WorldConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        let g = &self.grid;
        if g.width == 0 || g.depth == 0 {
            return Err(CoreError::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                g.width, g.depth
            )));
        }
        if g.tile_size.is_nan() || g.tile_size <= 0.0 {
            return Err(CoreError::Config(format!("tile_size must be positive, got {}", g.tile_size)));
        }
        if g.road_stride == 0 {
            return Err(CoreError::Config("road_stride must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&g.plaza_chance) {
            return Err(CoreError::Config(format!(
                "plaza_chance must be within [0, 1], got {}",
                g.plaza_chance
            )));
        }

        let a = &self.agents;
        if a.walk_speed < 0.0 || a.player_speed < 0.0 {
            return Err(CoreError::Config("speeds must be non-negative".into()));
        }
        if !(0.0..=1.0).contains(&a.turn_gain) || a.turn_gain == 0.0 {
            return Err(CoreError::Config(format!("turn_gain must be within (0, 1], got {}", a.turn_gain)));
        }
        if a.interaction_radius < 0.0 || a.arrival_threshold < 0.0 {
            return Err(CoreError::Config("radii must be non-negative".into()));
        }
        let w = a.decision_weights.as_array();
        if w.iter().any(|x| !x.is_finite() || *x < 0.0) || w.iter().sum::<f64>() <= 0.0 {
            return Err(CoreError::Config(format!("invalid decision weights {w:?}")));
        }
        for (name, range) in [("walk_dwell", a.walk_dwell), ("idle_dwell", a.idle_dwell)] {
            if range.min_secs < 0.0 || range.max_secs < range.min_secs {
                return Err(CoreError::Config(format!(
                    "{name} must satisfy 0 <= min <= max, got {}..{}",
                    range.min_secs, range.max_secs
                )));
            }
        }
        let durations = [
            a.emote_dwell_secs,
            a.blocked_backoff_secs,
            a.speak_secs,
            a.conversation_cooldown_secs,
            a.celebration_cooldown_secs,
            a.celebration_emote_secs,
            a.partner_lost_cooldown_secs,
        ];
        if durations.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(CoreError::Config("durations must be finite and non-negative".into()));
        }
        Ok(())
    }
}
