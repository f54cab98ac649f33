use super::ScatterParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VegetationCategory {
    Grass,
    Tree,
    Bush,
    Flower,
}

impl VegetationCategory {
    pub const ALL: [VegetationCategory; 4] = [
        VegetationCategory::Grass,
        VegetationCategory::Tree,
        VegetationCategory::Bush,
        VegetationCategory::Flower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VegetationCategory::Grass => "grass",
            VegetationCategory::Tree => "tree",
            VegetationCategory::Bush => "bush",
            VegetationCategory::Flower => "flower",
        }
    }
}

/// The four noise signals sampled at one position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSignals {
    pub density: f32,
    pub cluster: f32,
    pub kind: f32,
    pub detail: f32,
}

impl NoiseSignals {
    #[inline]
    pub fn final_density(&self) -> f32 {
        self.density * 0.6 + self.cluster * 0.4
    }
}

/// Accepted placement before it is bound to a vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementDecision {
    pub category: VegetationCategory,
    pub scale: f32,
    pub rotation_degrees: f32,
}

/// Why a candidate produced no placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Slope,
    Density,
    CategoryThreshold,
}

pub const GLOBAL_DENSITY_THRESHOLD: f32 = -0.2;

/// Picks a category from the type signal `t` and normalized height `h`.
/// Every comparison is strict and the first match wins.
pub fn classify(t: f32, h: f32) -> VegetationCategory {
    use VegetationCategory::*;
    if h > 0.7 {
        if t > 0.5 { Tree } else { Grass }
    } else if h > 0.4 {
        if t > 0.6 {
            Tree
        } else if t > 0.2 {
            Bush
        } else {
            Grass
        }
    } else if t > 0.7 {
        Tree
    } else if t > 0.3 {
        Bush
    } else if t > -0.2 {
        Grass
    } else {
        Flower
    }
}

/// Category-specific density floor; flowers only pass the global test.
pub fn category_threshold(category: VegetationCategory, params: &ScatterParams) -> Option<f32> {
    match category {
        VegetationCategory::Tree => Some(0.5 - params.tree_density),
        VegetationCategory::Bush => Some(0.3 - params.bush_density),
        VegetationCategory::Grass => Some(0.1 - params.grass_density),
        VegetationCategory::Flower => None,
    }
}

/// Density, classification and transform for one candidate whose slope has
/// already been accepted.
pub fn decide(
    signals: NoiseSignals,
    normalized_height: f32,
    params: &ScatterParams,
) -> Result<PlacementDecision, Rejection> {
    let final_density = signals.final_density();
    if final_density <= GLOBAL_DENSITY_THRESHOLD {
        return Err(Rejection::Density);
    }
    let category = classify(signals.kind, normalized_height);
    if let Some(threshold) = category_threshold(category, params) {
        if final_density <= threshold {
            return Err(Rejection::CategoryThreshold);
        }
    }
    Ok(PlacementDecision {
        category,
        scale: 0.7 + signals.detail * 0.6,
        rotation_degrees: signals.detail * 360.0,
    })
}
