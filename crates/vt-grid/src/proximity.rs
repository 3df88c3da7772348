//! R-tree proximity index over agent positions.
//!
//! Built once per tick from the agents eligible for pairing, then queried by
//! every one of them.  Replaces an O(n²) all-pairs scan with an
//! O(n log n) build plus small radius queries.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use vt_core::{AgentId, Vec2};

/// Entry stored in the R-tree: a 2-D `[x, z]` point with its agent.
#[derive(Clone, Debug)]
struct AgentEntry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

/// Spatial index answering "which agents are within r of here?".
pub struct ProximityIndex {
    tree: RTree<AgentEntry>,
}

impl ProximityIndex {
    /// Bulk-load from `(id, position)` pairs.
    pub fn build(points: impl IntoIterator<Item = (AgentId, Vec2)>) -> Self {
        let entries = points
            .into_iter()
            .map(|(id, p)| AgentEntry { point: [p.x, p.z], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All indexed agents within `radius` (inclusive) of `pos`, other than
    /// `exclude`, as `(id, squared distance)` in ascending `AgentId` order.
    pub fn within(&self, pos: Vec2, radius: f32, exclude: AgentId) -> Vec<(AgentId, f32)> {
        let query = [pos.x, pos.z];
        let mut hits: Vec<(AgentId, f32)> = self
            .tree
            .locate_within_distance(query, radius * radius)
            .filter(|e| e.id != exclude)
            .map(|e| (e.id, e.distance_2(&query)))
            .collect();
        hits.sort_unstable_by_key(|&(id, _)| id);
        hits
    }
}
