//! Placement of a single landmark structure on the generated terrain.

use verdant_geom::{Aabb, Vec3};

use crate::config::Structure;
use crate::rng::range_f32;
use crate::scatter::PlacementInstance;
use crate::terrain::TerrainGrid;

const SALT_X: u32 = 0x51A7_0001;
const SALT_Z: u32 = 0x51A7_0002;

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedAnchor {
    pub name: String,
    pub position: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructurePlacement {
    pub origin: Vec3,
    pub footprint: Aabb,
    pub anchors: Vec<PlacedAnchor>,
}

impl StructurePlacement {
    pub fn anchor(&self, name: &str) -> Option<&PlacedAnchor> {
        self.anchors.iter().find(|a| a.name == name)
    }
}

/// Picks a structure origin inside the grid, leaving a margin of one
/// footprint on each side, and drops every non-pinned anchor onto the ground.
///
/// Returns `None` when the grid has no vertices.
pub fn place(grid: &TerrainGrid, cfg: &Structure, seed: u32) -> Option<StructurePlacement> {
    if grid.is_empty() {
        return None;
    }
    let size = Vec3::new(cfg.size[0], cfg.size[1], cfg.size[2]);
    let s = seed ^ cfg.seed_salt;
    let x = range_f32(s, 0, 0, SALT_X, size.x, grid.width() as f32 - size.x);
    let z = range_f32(s, 0, 0, SALT_Z, size.z, grid.height() as f32 - size.z);
    let origin = Vec3::new(x, cfg.base_offset, z);

    let anchors = cfg
        .anchors
        .iter()
        .map(|a| {
            let local = Vec3::new(a.offset[0], a.offset[1], a.offset[2]);
            let p = origin + local;
            let position = if a.pinned {
                p
            } else {
                p.with_y(grid.height_at(p.x, p.z) + cfg.base_offset)
            };
            PlacedAnchor {
                name: a.name.clone(),
                position,
            }
        })
        .collect();

    let placement = StructurePlacement {
        origin,
        footprint: Aabb::from_center_size(origin, size),
        anchors,
    };
    log::debug!(
        target: "structure",
        "placed at ({:.2}, {:.2}, {:.2}) with {} anchors",
        origin.x,
        origin.y,
        origin.z,
        placement.anchors.len()
    );
    Some(placement)
}

/// Removes placements whose XZ position falls inside the footprint; returns
/// how many were removed.
pub fn clear_footprint(instances: &mut Vec<PlacementInstance>, footprint: &Aabb) -> usize {
    let before = instances.len();
    instances.retain(|i| !footprint.contains_xz(i.position));
    before - instances.len()
}
