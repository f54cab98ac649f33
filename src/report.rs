use std::error::Error;

use verdant_runtime::Generation;
use verdant_world::config::GenConfig;
use verdant_world::scatter::count_by_category;
use verdant_world::{
    Gradient, InstancePlan, PrefabTable, ScatterParams, VegetationScatterer, elevation_uniform,
};

pub fn print_summary(cfg: &GenConfig, generation: &Generation) {
    let grid = &generation.grid;
    let mesh = grid.mesh();
    println!("terrain   {}x{}", grid.width(), grid.height());
    println!(
        "mesh      {} vertices, {} edges, {} faces",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );
    let range = grid.range();
    if range.is_empty() {
        println!("elevation (empty)");
    } else {
        println!("elevation [{:.3}, {:.3}]", range.min, range.max);
    }

    let st = &generation.scatter_stats;
    println!(
        "scatter   sampled={} placed={} rejected: slope={} density={} category={}",
        st.sampled, st.placed, st.rejected_slope, st.rejected_density, st.rejected_category
    );
    for (category, n) in count_by_category(&generation.placements) {
        println!("  {:<8}{}", category.name(), n);
    }

    let table = PrefabTable::from_config(&cfg.vegetation.prefabs, cfg.structure.base_offset);
    let plan = InstancePlan::resolve(&generation.placements, &table, cfg.vegetation.y_offset);
    println!("prefabs   {} spawns, {} without prefab", plan.len(), plan.skipped);

    match &generation.structure {
        Some(s) => {
            println!(
                "structure origin ({:.2}, {:.2}, {:.2}), cleared {} placements",
                s.origin.x, s.origin.y, s.origin.z, generation.cleared
            );
            for a in &s.anchors {
                println!(
                    "  {:<12}({:.2}, {:.2}, {:.2})",
                    a.name, a.position.x, a.position.y, a.position.z
                );
            }
        }
        None => println!("structure none"),
    }
    if let Some(p) = generation.spawn {
        println!("spawn     ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
    }

    let ramp = Gradient::from_config(&cfg.colour).bake(cfg.colour.ramp_width);
    let uniform = elevation_uniform(range);
    if let (Some(lo), Some(hi)) = (ramp.first(), ramp.last()) {
        println!(
            "ramp      {} texels {:?} .. {:?}, uniform ({:.3}, {:.3})",
            ramp.len(),
            lo,
            hi,
            uniform[0],
            uniform[1]
        );
    }

    let t = &generation.timings;
    println!(
        "timings   grid={}us elevation={}us scatter={}us structure={}us total={}us",
        t.build_grid_us,
        t.assign_elevation_us,
        t.scatter_us,
        t.place_structure_us,
        t.total_us()
    );
}

/// Re-runs the scatter at stride 1 through both neighbour searches and fails
/// when they disagree.
pub fn cross_check(cfg: &GenConfig, generation: &Generation) -> Result<(), Box<dyn Error>> {
    let grid = &generation.grid;
    let params = ScatterParams {
        sample_distance: 1.0,
        ..ScatterParams::from_config(&cfg.vegetation)
    };
    let mut scatterer = VegetationScatterer::new(&cfg.vegetation);
    let hashed = scatterer.scatter(grid.mesh(), grid.range(), &params);
    let hashed_us = scatterer.last_stats().duration_us;
    let reference = scatterer.scatter_reference(grid.mesh(), grid.range(), &params);
    let reference_us = scatterer.last_stats().duration_us;
    if hashed != reference {
        let first = hashed
            .iter()
            .zip(&reference)
            .position(|(a, b)| a != b)
            .unwrap_or(hashed.len().min(reference.len()));
        return Err(format!(
            "reference scatter mismatch: {} vs {} placements, first difference at #{}",
            hashed.len(),
            reference.len(),
            first
        )
        .into());
    }
    log::info!(
        "reference scatter matches: {} placements (hashed {}us, all-pairs {}us)",
        hashed.len(),
        hashed_us,
        reference_us
    );
    Ok(())
}
