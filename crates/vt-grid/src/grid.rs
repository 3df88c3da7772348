//! The static tile collision grid.
//!
//! # Layout
//!
//! Tiles are stored row-major (`tiles[tz * width + tx]`).  The grid is centred
//! on the world origin, so tile `(0, 0)` covers the `−x, −z` corner:
//!
//! ```text
//! tx = floor((x + half_extent_x) / tile_size)
//! tz = floor((z + half_extent_z) / tile_size)
//! ```
//!
//! Nothing mutates a grid after construction; the simulation shares it by
//! reference with every agent evaluation in a tick.

use tracing::info;

use vt_core::{GridConfig, SimRng, Vec2};

use crate::{GridError, GridResult};

// ── TileKind ──────────────────────────────────────────────────────────────────

/// Static classification of one world cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Road,
    Building,
    /// Parks and plazas.
    Open,
}

impl TileKind {
    /// `true` for tiles an agent may stand on.
    #[inline]
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Building)
    }

    fn from_ascii(c: char) -> GridResult<Self> {
        match c {
            '=' => Ok(TileKind::Road),
            '#' => Ok(TileKind::Building),
            '.' => Ok(TileKind::Open),
            other => Err(GridError::UnknownTile(other)),
        }
    }
}

// ── TileCollisionGrid ─────────────────────────────────────────────────────────

/// Read-only Road / Building / Open map used for movement validation.
#[derive(Clone, Debug)]
pub struct TileCollisionGrid {
    width:     u32,
    depth:     u32,
    tile_size: f32,
    tiles:     Vec<TileKind>,
}

impl TileCollisionGrid {
    /// Generate the town layout from `config`, consuming plaza rolls from `rng`.
    ///
    /// Rule, evaluated per tile centre:
    ///
    /// 1. within `park_radius_tiles` of the grid centre → `Open` (park);
    /// 2. either index a multiple of `road_stride` → `Road`;
    /// 3. otherwise `Building`, turned into an `Open` plaza with probability
    ///    `plaza_chance`.
    pub fn generate(config: &GridConfig, rng: &mut SimRng) -> GridResult<Self> {
        if config.width == 0 || config.depth == 0 || config.road_stride == 0 {
            return Err(vt_core::CoreError::Config(format!(
                "cannot generate a {}x{} grid with road stride {}",
                config.width, config.depth, config.road_stride
            ))
            .into());
        }

        let centre_x = config.width as f32 * 0.5;
        let centre_z = config.depth as f32 * 0.5;
        let park_r_sq = config.park_radius_tiles * config.park_radius_tiles;

        let mut tiles = Vec::with_capacity(config.width as usize * config.depth as usize);
        for tz in 0..config.depth {
            for tx in 0..config.width {
                let dx = tx as f32 + 0.5 - centre_x;
                let dz = tz as f32 + 0.5 - centre_z;
                let kind = if dx * dx + dz * dz <= park_r_sq {
                    TileKind::Open
                } else if tx % config.road_stride == 0 || tz % config.road_stride == 0 {
                    TileKind::Road
                } else if rng.gen_bool(config.plaza_chance) {
                    TileKind::Open
                } else {
                    TileKind::Building
                };
                tiles.push(kind);
            }
        }

        let grid = Self::from_tiles(config.width, config.depth, config.tile_size, tiles)?;
        info!(
            width     = grid.width,
            depth     = grid.depth,
            roads     = grid.count(TileKind::Road),
            buildings = grid.count(TileKind::Building),
            open      = grid.count(TileKind::Open),
            "generated tile grid"
        );
        Ok(grid)
    }

    /// Wrap an explicit row-major tile vector.
    pub fn from_tiles(width: u32, depth: u32, tile_size: f32, tiles: Vec<TileKind>) -> GridResult<Self> {
        let expected = width as usize * depth as usize;
        if tiles.len() != expected {
            return Err(GridError::TileCountMismatch { expected, got: tiles.len() });
        }
        if tile_size.is_nan() || tile_size <= 0.0 {
            return Err(vt_core::CoreError::Config(format!("tile_size must be positive, got {tile_size}")).into());
        }
        Ok(Self { width, depth, tile_size, tiles })
    }

    /// Parse a hand-drawn map: `=` road, `#` building, `.` open.
    ///
    /// The first row is `tz = 0` (the `−z` edge).  Handy for tests and small
    /// fixed scenes.
    pub fn from_ascii(rows: &[&str], tile_size: f32) -> GridResult<Self> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(GridError::RaggedRow { row, expected: width, got });
            }
            for c in line.chars() {
                tiles.push(TileKind::from_ascii(c)?);
            }
        }
        Self::from_tiles(width as u32, rows.len() as u32, tile_size, tiles)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    pub fn half_extent_x(&self) -> f32 {
        self.width as f32 * self.tile_size * 0.5
    }

    #[inline]
    pub fn half_extent_z(&self) -> f32 {
        self.depth as f32 * self.tile_size * 0.5
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Tile coordinates containing `pos`, or `None` when it lies off the map.
    #[inline]
    pub fn tile_of(&self, pos: Vec2) -> Option<(u32, u32)> {
        let fx = ((pos.x + self.half_extent_x()) / self.tile_size).floor();
        let fz = ((pos.z + self.half_extent_z()) / self.tile_size).floor();
        // NaN fails both comparisons and falls through to None.
        if fx >= 0.0 && fz >= 0.0 && fx < self.width as f32 && fz < self.depth as f32 {
            Some((fx as u32, fz as u32))
        } else {
            None
        }
    }

    /// Kind of tile `(tx, tz)`; out-of-range coordinates are `Building`.
    #[inline]
    pub fn tile(&self, tx: u32, tz: u32) -> TileKind {
        if tx >= self.width || tz >= self.depth {
            return TileKind::Building;
        }
        self.tiles[tz as usize * self.width as usize + tx as usize]
    }

    /// Classify a world position.  Anything outside the grid is `Building`.
    #[inline]
    pub fn classify(&self, x: f32, z: f32) -> TileKind {
        match self.tile_of(Vec2::new(x, z)) {
            Some((tx, tz)) => self.tile(tx, tz),
            None => TileKind::Building,
        }
    }

    #[inline]
    pub fn is_walkable(&self, pos: Vec2) -> bool {
        self.classify(pos.x, pos.z).is_walkable()
    }

    /// World-space centre of tile `(tx, tz)`.
    #[inline]
    pub fn tile_centre(&self, tx: u32, tz: u32) -> Vec2 {
        Vec2::new(
            (tx as f32 + 0.5) * self.tile_size - self.half_extent_x(),
            (tz as f32 + 0.5) * self.tile_size - self.half_extent_z(),
        )
    }

    /// Number of tiles of `kind`.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Uniformly random walkable position, or `None` after `attempts` misses.
    ///
    /// Samples the continuous world rectangle, so larger open areas attract
    /// proportionally more spawns.
    pub fn random_walkable(&self, rng: &mut SimRng, attempts: usize) -> Option<Vec2> {
        let hx = self.half_extent_x();
        let hz = self.half_extent_z();
        (0..attempts)
            .map(|_| Vec2::new(rng.gen_range(-hx..hx), rng.gen_range(-hz..hz)))
            .find(|&p| self.is_walkable(p))
    }

    /// First walkable tile centre in row-major order, used when random
    /// sampling keeps missing on a mostly built-up map.
    pub fn first_walkable(&self) -> Option<Vec2> {
        let i = self.tiles.iter().position(|t| t.is_walkable())?;
        let w = self.width as usize;
        Some(self.tile_centre((i % w) as u32, (i / w) as u32))
    }
}
