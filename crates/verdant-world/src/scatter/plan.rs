use verdant_geom::Vec3;
use verdant_mesh::VertexId;

use super::{PlacementInstance, VegetationCategory};
use crate::config::Prefabs;
use crate::rng::hash2;

const PREFAB_PICK_SEED: u32 = 0x5EED_0F0B;

/// Prefab names per category plus the vertical offset of the map the
/// vegetation is instantiated into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrefabTable {
    grass: Vec<String>,
    tree: Vec<String>,
    bush: Vec<String>,
    flower: Vec<String>,
    base_offset: f32,
}

impl PrefabTable {
    pub fn from_config(prefabs: &Prefabs, base_offset: f32) -> Self {
        Self {
            grass: prefabs.grass.clone(),
            tree: prefabs.tree.clone(),
            bush: prefabs.bush.clone(),
            flower: prefabs.flower.clone(),
            base_offset,
        }
    }

    pub fn set(&mut self, category: VegetationCategory, names: Vec<String>) {
        *self.names_mut(category) = names;
    }

    #[inline]
    pub fn base_offset(&self) -> f32 {
        self.base_offset
    }

    pub fn names(&self, category: VegetationCategory) -> &[String] {
        match category {
            VegetationCategory::Grass => &self.grass,
            VegetationCategory::Tree => &self.tree,
            VegetationCategory::Bush => &self.bush,
            VegetationCategory::Flower => &self.flower,
        }
    }

    fn names_mut(&mut self, category: VegetationCategory) -> &mut Vec<String> {
        match category {
            VegetationCategory::Grass => &mut self.grass,
            VegetationCategory::Tree => &mut self.tree,
            VegetationCategory::Bush => &mut self.bush,
            VegetationCategory::Flower => &mut self.flower,
        }
    }

    /// Variant for a vertex, stable across runs. `None` when the category has
    /// no prefab registered.
    pub fn pick(&self, category: VegetationCategory, vertex: VertexId) -> Option<&str> {
        let names = self.names(category);
        if names.is_empty() {
            return None;
        }
        let h = hash2(vertex.0 as i32, category as i32, PREFAB_PICK_SEED);
        Some(names[h as usize % names.len()].as_str())
    }
}

/// One prefab to instantiate.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceSpawn {
    pub prefab: String,
    pub vertex: VertexId,
    pub category: VegetationCategory,
    pub position: Vec3,
    pub scale: f32,
    pub rotation_degrees: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstancePlan {
    pub spawns: Vec<InstanceSpawn>,
    pub skipped: usize,
}

impl InstancePlan {
    /// Binds placements to prefabs and lifts them by `y_offset` plus the
    /// table's base offset. Placements whose category has no prefab are
    /// counted in `skipped`.
    pub fn resolve(instances: &[PlacementInstance], table: &PrefabTable, y_offset: f32) -> Self {
        let mut plan = InstancePlan {
            spawns: Vec::with_capacity(instances.len()),
            skipped: 0,
        };
        for inst in instances {
            let Some(prefab) = table.pick(inst.category, inst.vertex) else {
                plan.skipped += 1;
                continue;
            };
            plan.spawns.push(InstanceSpawn {
                prefab: prefab.to_owned(),
                vertex: inst.vertex,
                category: inst.category,
                position: inst
                    .position
                    .with_y(inst.position.y + y_offset + table.base_offset),
                scale: inst.scale,
                rotation_degrees: inst.rotation_degrees,
            });
        }
        plan
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spawns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
    }
}
