use geo::Point;
use gridkde::{
    DensityMap, EstimatorConfig, GeohashGrid, GeohashPrecision, GridCellId, GridEstimator,
    GridIndex, GridLevel, ProcessingMode, VirtualGrid, WeightedPoint,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_maps_close(a: &DensityMap<GridCellId>, b: &DensityMap<GridCellId>, tolerance: f64) {
    assert_eq!(a.len(), b.len(), "maps cover different cells");
    for (cell, value) in a.iter() {
        let other = b
            .get(cell)
            .unwrap_or_else(|| panic!("cell {} missing from second map", cell));
        assert!(
            (value - other).abs() <= tolerance,
            "cell {}: {} vs {}",
            cell,
            value,
            other
        );
    }
}

#[test]
fn test_two_point_scenario() {
    init_logging();
    let estimator = GridEstimator::new(VirtualGrid::new());
    let points = [Point::new(1.0, 1.0), Point::new(1.0, 1.3)];

    let map = estimator
        .estimate(&points, 0.2, Some(GridLevel::Grid0_1))
        .expect("estimation failed")
        .expect("expected a non-empty density map");

    assert!(!map.is_empty());
    assert!((map.total() - 2.0).abs() < 2e-3, "total={}", map.total());

    // the row between the two points is reached by both kernels
    let grid = VirtualGrid::new();
    let shared = grid
        .cell_containing(1.05, 1.15, GridLevel::Grid0_1)
        .expect("cell on grid");
    let single_left = estimator
        .estimate(&points[..1], 0.2, Some(GridLevel::Grid0_1))
        .unwrap()
        .unwrap();
    let single_right = estimator
        .estimate(&points[1..], 0.2, Some(GridLevel::Grid0_1))
        .unwrap()
        .unwrap();
    let expected = single_left.get(&shared).unwrap() + single_right.get(&shared).unwrap();
    assert!((map.get(&shared).unwrap() - expected).abs() < 1e-12);
}

#[test]
fn test_union_is_sum_of_parts() {
    init_logging();
    let estimator = GridEstimator::new(VirtualGrid::new());
    let a = vec![
        WeightedPoint::new(12.301, 45.002, 2.0),
        WeightedPoint::new(12.317, 45.011, 1.0),
        WeightedPoint::new(12.322, 44.996, 4.5),
    ];
    let b = vec![
        WeightedPoint::new(12.309, 45.007, 0.5),
        WeightedPoint::new(12.301, 45.002, 3.0),
    ];
    let union: Vec<WeightedPoint> = a.iter().chain(b.iter()).copied().collect();
    let level = Some(GridLevel::Grid0_001);
    let h = 0.008;

    let map_a = estimator.estimate(&a, h, level).unwrap().unwrap();
    let map_b = estimator.estimate(&b, h, level).unwrap().unwrap();
    let map_union = estimator.estimate(&union, h, level).unwrap().unwrap();

    let mut summed = map_a.clone();
    summed.merge(map_b);
    assert_maps_close(&map_union, &summed, 1e-12);
}

#[test]
fn test_weights_scale_linearly() {
    let estimator = GridEstimator::new(VirtualGrid::new());
    let points = vec![
        WeightedPoint::new(-71.06, 42.36, 1.0),
        WeightedPoint::new(-71.05, 42.35, 2.0),
        WeightedPoint::new(-71.08, 42.37, 0.25),
    ];
    let k = 3.5;
    let scaled: Vec<WeightedPoint> = points.iter().map(|p| p.scaled(k)).collect();

    let base = estimator
        .estimate(&points, 0.02, Some(GridLevel::Grid0_005))
        .unwrap()
        .unwrap();
    let bigger = estimator
        .estimate(&scaled, 0.02, Some(GridLevel::Grid0_005))
        .unwrap()
        .unwrap();

    assert_eq!(base.len(), bigger.len());
    for (cell, value) in base.iter() {
        let other = bigger.get(cell).unwrap();
        assert!((other - k * value).abs() <= 1e-12 * other.abs().max(1.0));
    }
    assert!((bigger.total() - k * base.total()).abs() < 1e-9);
}

#[test]
fn test_unweighted_points_match_unit_weights() {
    let estimator = GridEstimator::new(VirtualGrid::new());
    let plain = [Point::new(2.0, 3.0), Point::new(2.02, 3.01)];
    let weighted = [WeightedPoint::unit(2.0, 3.0), WeightedPoint::unit(2.02, 3.01)];

    let a = estimator.estimate(&plain, 0.03, None).unwrap().unwrap();
    let b = estimator.estimate(&weighted, 0.03, None).unwrap().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_default_level_is_used() {
    let estimator = GridEstimator::new(VirtualGrid::new());
    let map = estimator
        .estimate(&[(0.5, 0.5)], 0.01, None)
        .unwrap()
        .unwrap();
    assert!(map.cells().all(|c| c.level() == Some(GridLevel::Grid0_005)));
}

#[test]
fn test_geohash_grid_conserves_mass() {
    init_logging();
    let estimator = GridEstimator::new(GeohashGrid::new());
    let points = [
        WeightedPoint::new(-74.0060, 40.7128, 1.0),
        WeightedPoint::new(-73.9857, 40.7484, 2.0),
    ];

    let map = estimator
        .estimate(&points, 0.01, Some(GeohashPrecision::new(6).unwrap()))
        .unwrap()
        .unwrap();

    assert!((map.total() - 3.0).abs() < 3e-3, "total={}", map.total());
    assert!(map.cells().all(|hash| hash.len() == 6));

    let grid = GeohashGrid::new();
    for hash in map.cells() {
        let b = grid.cell_bounds(hash).unwrap();
        let near_any = points.iter().any(|p| {
            b.x_max >= p.x() - 0.01 && b.x_min <= p.x() + 0.01 && b.y_max >= p.y() - 0.01 && b.y_min <= p.y() + 0.01
        });
        assert!(near_any, "cell {} is outside every kernel", hash);
    }
}

#[test]
fn test_sequential_config_is_default() {
    let estimator = GridEstimator::new(VirtualGrid::new());
    assert_eq!(estimator.config().processing_mode, ProcessingMode::Sequential);
}

#[test]
fn test_parallel_mode_matches_sequential() {
    init_logging();
    let points: Vec<WeightedPoint> = (0..200)
        .map(|i| {
            let t = i as f64;
            WeightedPoint::new(5.0 + (t * 0.37).sin() * 0.05, 7.0 + (t * 0.11).cos() * 0.05, 1.0 + (i % 3) as f64)
        })
        .collect();

    let sequential = GridEstimator::new(VirtualGrid::new());
    let parallel = GridEstimator::new(VirtualGrid::new())
        .with_config(
            EstimatorConfig::default()
                .with_processing_mode(ProcessingMode::Parallel)
                .with_parallel_min_points(1),
        )
        .unwrap();

    let level = Some(GridLevel::Grid0_01);
    let a = sequential.estimate(&points, 0.03, level).unwrap().unwrap();
    let b = parallel.estimate(&points, 0.03, level).unwrap().unwrap();

    // summation order differs between workers
    assert_maps_close(&a, &b, 1e-9);
}
