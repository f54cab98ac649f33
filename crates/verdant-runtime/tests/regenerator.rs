use verdant_geom::Vec3;
use verdant_runtime::{CancelFlag, RegenOutcome, Regenerator, Stage, StepResult};
use verdant_world::config::GenConfig;

fn small_config(seed: i32) -> GenConfig {
    let mut cfg = GenConfig::default();
    cfg.terrain.width = 24;
    cfg.terrain.height = 17;
    cfg.terrain.noise.seed = seed;
    cfg.vegetation.seed = seed;
    cfg
}

fn completed(outcome: RegenOutcome) -> Box<verdant_runtime::Generation> {
    match outcome {
        RegenOutcome::Completed(g) => g,
        RegenOutcome::Cancelled { after } => panic!("unexpected cancel after {after:?}"),
    }
}

#[test]
fn step_walks_stages_in_order() {
    let mut regen = Regenerator::new(small_config(1));
    assert_eq!(regen.stage(), Stage::Idle);
    let mut seen = Vec::new();
    let generation = loop {
        match regen.step() {
            StepResult::Pending(stage) => seen.push(stage),
            StepResult::Finished(g) => break g,
        }
    };
    assert_eq!(
        seen,
        vec![
            Stage::BuildGrid,
            Stage::AssignElevation,
            Stage::Scatter,
            Stage::PlaceStructure
        ]
    );
    assert_eq!(regen.stage(), Stage::Done);
    assert_eq!(generation.grid.mesh().vertex_count(), 24 * 17);
    assert_eq!(generation.grid.mesh().face_count(), 23 * 16);
}

#[test]
fn spawn_only_on_first_generation() {
    let mut regen = Regenerator::new(small_config(2));
    let flag = CancelFlag::new();
    assert!(!regen.has_started());
    let first = completed(regen.run(&flag));
    assert_eq!(first.spawn, Some(Vec3::new(12.0, 10.0, 8.0)));
    assert!(regen.has_started());
    let second = completed(regen.run(&flag));
    assert_eq!(second.spawn, None);
    assert_eq!(regen.generations(), 2);
}

#[test]
fn cancelled_before_start_does_nothing() {
    let mut regen = Regenerator::new(small_config(3));
    let flag = CancelFlag::new();
    flag.cancel();
    match regen.run(&flag) {
        RegenOutcome::Cancelled { after } => assert_eq!(after, Stage::Idle),
        RegenOutcome::Completed(_) => panic!("should have been cancelled"),
    }
    assert_eq!(regen.stage(), Stage::Idle);
    assert!(!regen.has_started());
}

#[test]
fn cancellation_lands_between_stages_and_resets() {
    let mut regen = Regenerator::new(small_config(4));
    let outcome = regen.run_until(|stage| stage == Stage::Scatter);
    match outcome {
        RegenOutcome::Cancelled { after } => assert_eq!(after, Stage::Scatter),
        RegenOutcome::Completed(_) => panic!("should have been cancelled"),
    }
    assert_eq!(regen.stage(), Stage::Idle);
    assert_eq!(regen.generations(), 0);

    // A later full run still gets the first-run spawn point
    let g = completed(regen.run(&CancelFlag::new()));
    assert!(g.spawn.is_some());
}

#[test]
fn update_config_resets_mid_generation() {
    let mut regen = Regenerator::new(small_config(5));
    let _ = regen.step();
    let _ = regen.step();
    assert_eq!(regen.stage(), Stage::AssignElevation);
    let mut cfg = small_config(5);
    cfg.terrain.width = 9;
    cfg.terrain.height = 9;
    regen.update_config(cfg);
    assert_eq!(regen.stage(), Stage::Idle);
    let g = completed(regen.run(&CancelFlag::new()));
    assert_eq!(g.grid.width(), 9);
    assert_eq!(g.grid.mesh().vertex_count(), 81);
}

#[test]
fn same_config_regenerates_identically() {
    let flag = CancelFlag::new();
    let a = completed(Regenerator::new(small_config(6)).run(&flag));
    let b = completed(Regenerator::new(small_config(6)).run(&flag));
    assert_eq!(a.grid.range(), b.grid.range());
    assert_eq!(a.placements, b.placements);
    assert_eq!(a.structure, b.structure);
}

#[test]
fn structure_clears_its_footprint() {
    let mut cfg = small_config(7);
    cfg.terrain.width = 40;
    cfg.terrain.height = 40;
    cfg.vegetation.sample_distance = 1.0;
    let g = completed(Regenerator::new(cfg).run(&CancelFlag::new()));
    let s = g.structure.as_ref().expect("structure enabled by default");
    assert!(g.placements.iter().all(|p| !s.footprint.contains_xz(p.position)));
    assert_eq!(
        g.scatter_stats.placed as usize,
        g.placements.len() + g.cleared
    );
}

#[test]
fn disabled_structure_keeps_all_placements() {
    let mut cfg = small_config(8);
    cfg.structure.enable = false;
    let g = completed(Regenerator::new(cfg).run(&CancelFlag::new()));
    assert!(g.structure.is_none());
    assert_eq!(g.cleared, 0);
    assert_eq!(g.scatter_stats.placed as usize, g.placements.len());
}

#[test]
fn empty_terrain_completes_without_structure() {
    let mut cfg = small_config(9);
    cfg.terrain.width = 0;
    let g = completed(Regenerator::new(cfg).run(&CancelFlag::new()));
    assert!(g.grid.is_empty());
    assert!(g.placements.is_empty());
    assert!(g.structure.is_none());
    assert_eq!(g.spawn, Some(Vec3::new(0.0, 10.0, 8.0)));
}

#[test]
fn triangulated_generation_has_two_triangles_per_quad() {
    let g = completed(Regenerator::new(small_config(10)).run(&CancelFlag::new()));
    let tri = g.triangulate();
    assert_eq!(tri.vertex_count(), 24 * 17);
    assert_eq!(tri.triangle_count(), 2 * 23 * 16);
}
