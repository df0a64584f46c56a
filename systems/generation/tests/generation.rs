use std::collections::HashSet;

use grid_rescue_core::{CellCoord, GridConfig, Layout, ObstacleKind};
use grid_rescue_system_generation::{
    connectivity::{is_reachable, BlockedCells},
    generate, GenerationTuning,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn assert_layout_valid(config: &GridConfig, layout: &Layout, tuning: &GenerationTuning) {
    let size = config.size();

    assert_ne!(layout.agent, layout.target, "agent must not start on the target");
    assert!(size.contains(layout.agent), "agent {:?} out of bounds", layout.agent);
    assert!(size.contains(layout.target), "target {:?} out of bounds", layout.target);
    assert!(
        layout.obstacles.len() <= config.obstacle_count() as usize,
        "generator placed more obstacles than requested"
    );

    let mut covered: HashSet<CellCoord> = HashSet::new();
    let mut bulky = 0;
    for obstacle in &layout.obstacles {
        let footprint = obstacle.footprint();
        assert!(
            size.contains_rect(footprint),
            "obstacle {obstacle:?} extends beyond the grid"
        );
        if obstacle.kind().is_bulky() {
            bulky += 1;
            let anchor = obstacle.anchor();
            assert!(anchor.column() + 1 < size.columns());
            assert!(anchor.row() + 1 < size.rows());
        }
        for cell in footprint.cells() {
            assert!(covered.insert(cell), "footprints overlap at {cell:?}");
        }
    }

    assert!(bulky <= tuning.max_bulky, "too many bulky obstacles: {bulky}");
    assert!(!covered.contains(&layout.agent), "obstacle covers the agent");
    assert!(!covered.contains(&layout.target), "obstacle covers the target");

    let blocked = BlockedCells::from_obstacles(size, &layout.obstacles);
    assert!(
        is_reachable(size, layout.agent, layout.target, |cell| blocked.contains(cell)),
        "generated layout seals the target off"
    );
}

#[test]
fn layouts_hold_invariants_across_seeds_and_sizes() {
    let tuning = GenerationTuning::default();
    for columns in 3..=10 {
        for rows in 3..=10 {
            let config = GridConfig::new(columns, rows, u32::MAX);
            for seed in 0..6 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed * 31 + u64::from(columns * rows));
                let layout = generate(&config, &tuning, &mut rng);
                assert_layout_valid(&config, &layout, &tuning);
            }
        }
    }
}

#[test]
fn moderate_density_fills_every_slot() {
    let tuning = GenerationTuning::default();
    let config = GridConfig::new(8, 8, 10);
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = generate(&config, &tuning, &mut rng);
        assert_layout_valid(&config, &layout, &tuning);
        assert_eq!(
            layout.obstacles.len(),
            10,
            "seed {seed} under-filled a sparse grid"
        );
    }
}

#[test]
fn lead_with_bulky_places_a_fallen_tree_when_room_allows() {
    let tuning = GenerationTuning::default();
    let config = GridConfig::new(10, 10, 5);
    for seed in 0..30 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = generate(&config, &tuning, &mut rng);
        assert!(
            layout
                .obstacles
                .iter()
                .any(|obstacle| obstacle.kind() == ObstacleKind::FallenTree),
            "seed {seed} produced no bulky obstacle"
        );
    }
}

#[test]
fn bulky_cap_is_respected() {
    let tuning = GenerationTuning {
        max_bulky: 1,
        ..GenerationTuning::default()
    };
    let config = GridConfig::new(10, 10, 30);
    for seed in 0..30 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = generate(&config, &tuning, &mut rng);
        assert_layout_valid(&config, &layout, &tuning);
    }
}

#[test]
fn exhausted_budget_returns_smaller_valid_set() {
    let tuning = GenerationTuning {
        attempts_per_pass: 3,
        max_passes: 2,
        ..GenerationTuning::default()
    };
    let config = GridConfig::new(10, 10, 50);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let layout = generate(&config, &tuning, &mut rng);

    assert!(layout.obstacles.len() <= 3);
    assert_layout_valid(&config, &layout, &tuning);
}

#[test]
fn smallest_grid_still_places_single_cell_obstacles() {
    let tuning = GenerationTuning::default();
    let config = GridConfig::new(3, 3, 4);
    for seed in 0..40 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = generate(&config, &tuning, &mut rng);
        assert_layout_valid(&config, &layout, &tuning);
        assert!(
            !layout.obstacles.is_empty(),
            "seed {seed} gave up on a 3x3 grid"
        );
    }
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let tuning = GenerationTuning::default();
    let config = GridConfig::default();
    let first = generate(&config, &tuning, &mut ChaCha8Rng::seed_from_u64(42));
    let second = generate(&config, &tuning, &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(first, second);
}
