use rand::rngs::StdRng;
use rand::SeedableRng;

use city_sim::simulation::{
    build_initial_network, carve_river, component_count, generate_terrain, grow_region,
    lay_arterials, lay_branch_roads, stamp_farm, CellType, CityMap, GridPos, RegionFill, TerrainParams,
    WaterBodyKind,
};

fn single_lake() -> TerrainParams {
    TerrainParams {
        water_bodies: (1, 1),
        water_kind: Some(WaterBodyKind::Lake),
        ..TerrainParams::barren()
    }
}

#[test]
fn test_single_lake_is_one_body() {
    for seed in 0..20 {
        let mut map = CityMap::new(40, 30);
        let mut rng = StdRng::seed_from_u64(seed);
        let report = generate_terrain(&mut map, &single_lake(), &mut rng);

        assert_eq!(report.lakes, 1);
        assert_eq!(report.rivers, 0);
        let water = map.water_cells().len();
        assert!((1..=40).contains(&water), "lake of {water} cells");
        assert_eq!(map.count_of(CellType::Water), water);
        assert_eq!(map.connected_regions(CellType::Water), 1);
    }
}

#[test]
fn test_region_growth_respects_budget() {
    let mut map = CityMap::new(40, 30);
    let mut rng = StdRng::seed_from_u64(4);

    let claimed = grow_region(&mut map, GridPos::new(20, 15), 9, 1.0, RegionFill::Water, &mut rng);
    assert_eq!(claimed.len(), 9);
    assert_eq!(claimed[0], GridPos::new(20, 15));
    assert_eq!(map.water_cells(), claimed.as_slice());

    let lonely = grow_region(
        &mut map,
        GridPos::new(5, 5),
        30,
        0.0,
        RegionFill::Terrain {
            cell_type: CellType::Forest,
            variants: 3,
        },
        &mut rng,
    );
    assert_eq!(lonely, vec![GridPos::new(5, 5)]);
    let tree = map.building(GridPos::new(5, 5)).expect("on the grid");
    assert_eq!(tree.cell_type, CellType::Forest);
    assert!(tree.variant < 3);
}

#[test]
fn test_region_growth_skips_taken_cells() {
    let mut map = CityMap::new(20, 20);
    assert!(map.claim_road(GridPos::new(10, 10)));
    let mut rng = StdRng::seed_from_u64(2);

    let claimed = grow_region(&mut map, GridPos::new(10, 10), 20, 1.0, RegionFill::Water, &mut rng);
    assert!(claimed.is_empty());
    assert_eq!(map.cell(GridPos::new(10, 10)), Some(CellType::Road));
}

#[test]
fn test_river_stamps_three_by_three() {
    let mut map = CityMap::new(20, 20);
    let mut rng = StdRng::seed_from_u64(6);

    let claimed = carve_river(&mut map, GridPos::new(10, 10), 1, 5, &mut rng);
    assert_eq!(claimed.len(), 9);
    for x in 9..=11 {
        for y in 9..=11 {
            assert_eq!(map.cell(GridPos::new(x, y)), Some(CellType::Water));
        }
    }
}

#[test]
fn test_river_stays_connected_and_on_grid() {
    for seed in 0..20 {
        let mut map = CityMap::new(30, 30);
        let mut rng = StdRng::seed_from_u64(seed);
        let claimed = carve_river(&mut map, GridPos::new(2, 27), 40, 2, &mut rng);

        assert!(!claimed.is_empty());
        assert!(claimed.iter().all(|&pos| map.in_bounds(pos)));
        assert_eq!(map.connected_regions(CellType::Water), 1);
    }
}

#[test]
fn test_farm_fills_rectangle() {
    let mut map = CityMap::new(20, 20);
    assert!(map.claim_water(GridPos::new(3, 4)));
    let mut rng = StdRng::seed_from_u64(12);

    let claimed = stamp_farm(&mut map, GridPos::new(2, 3), 5, 4, 3, &mut rng);
    assert_eq!(claimed, 19);
    assert_eq!(map.count_of(CellType::Farm), 19);
    assert_eq!(map.cell(GridPos::new(3, 4)), Some(CellType::Water));

    let farm = map.building(GridPos::new(6, 6)).expect("on the grid");
    assert_eq!(farm.cell_type, CellType::Farm);
    assert_eq!(farm.density, 0);

    // clipped at the grid edge
    let clipped = stamp_farm(&mut map, GridPos::new(18, 18), 5, 5, 3, &mut rng);
    assert_eq!(clipped, 4);
}

#[test]
fn test_tiny_grids_still_get_terrain() {
    let mut map = CityMap::new(4, 3);
    let mut rng = StdRng::seed_from_u64(0);
    let report = generate_terrain(&mut map, &single_lake(), &mut rng);
    assert_eq!(report.lakes, 1);
    assert!(!map.water_cells().is_empty());

    let mut empty = CityMap::new(0, 0);
    let report = generate_terrain(&mut empty, &TerrainParams::default(), &mut rng);
    assert_eq!(report.lakes + report.rivers + report.forests + report.farms, 0);
}

#[test]
fn test_arterials_cross_in_the_middle() {
    let mut map = CityMap::new(21, 11);
    let laid = lay_arterials(&mut map);
    assert_eq!(laid, 21 + 11 - 1);
    assert_eq!(map.cell(GridPos::new(10, 5)), Some(CellType::Road));
    assert_eq!(map.cell(GridPos::new(0, 5)), Some(CellType::Road));
    assert_eq!(map.cell(GridPos::new(10, 0)), Some(CellType::Road));
    assert_eq!(component_count(&map), 1);
}

#[test]
fn test_initial_network_routes_around_terrain() {
    let mut map = CityMap::new(80, 45);
    let mut rng = StdRng::seed_from_u64(31);
    generate_terrain(&mut map, &TerrainParams::default(), &mut rng);
    let water_before = map.water_cells().to_vec();

    let laid = build_initial_network(&mut map, 30, &mut rng);
    assert_eq!(laid, map.roads().len());
    assert_eq!(map.count_of(CellType::Road), laid);
    assert_eq!(map.water_cells(), water_before.as_slice());
    assert!(map.roads().iter().all(|&pos| map.is(pos, CellType::Road)));
}

/// Row and column of the arterials on a 41x21 map
const ARTERIAL_ROW: i32 = 10;
const ARTERIAL_COLUMN: i32 = 20;

/// Lays arterials, runs `prepare`, then lays `count` branches. Returns the
/// map and the branch cells in the order they were laid.
fn lay_branches(seed: u64, count: u32, prepare: impl Fn(&mut CityMap)) -> (CityMap, Vec<GridPos>) {
    let mut map = CityMap::new(41, 21);
    let arterial = lay_arterials(&mut map);
    prepare(&mut map);
    let mut rng = StdRng::seed_from_u64(seed);
    let laid = lay_branch_roads(&mut map, count, &mut rng);
    let branch = map.roads()[arterial..].to_vec();
    assert_eq!(branch.len(), laid);
    (map, branch)
}

#[test]
fn test_even_branches_leave_the_horizontal_arterial() {
    for seed in 0..40 {
        let (_, cells) = lay_branches(seed, 1, |_| {});
        let Some(first) = cells.first() else {
            continue;
        };
        let sign = first.y - ARTERIAL_ROW;
        assert!(sign == 1 || sign == -1, "branch starts at {first:?}");
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(*cell, GridPos::new(first.x, ARTERIAL_ROW + sign * (i as i32 + 1)));
        }
        assert!(cells.len() <= 15);
    }
}

#[test]
fn test_odd_branches_leave_the_vertical_arterial() {
    for seed in 0..40 {
        let (_, even) = lay_branches(seed, 1, |_| {});
        let (_, both) = lay_branches(seed, 2, |_| {});
        assert!(both.starts_with(&even));

        let odd = &both[even.len()..];
        let Some(first) = odd.first() else {
            continue;
        };
        let sign = first.x - ARTERIAL_COLUMN;
        assert!(sign == 1 || sign == -1, "branch starts at {first:?}");
        for (i, cell) in odd.iter().enumerate() {
            assert_eq!(*cell, GridPos::new(ARTERIAL_COLUMN + sign * (i as i32 + 1), first.y));
        }
    }
}

#[test]
fn test_branches_stop_at_water() {
    let walls = |map: &mut CityMap| {
        for x in 0..41 {
            map.claim_water(GridPos::new(x, ARTERIAL_ROW - 3));
            map.claim_water(GridPos::new(x, ARTERIAL_ROW + 3));
        }
        for y in 0..21 {
            map.claim_water(GridPos::new(ARTERIAL_COLUMN - 3, y));
            map.claim_water(GridPos::new(ARTERIAL_COLUMN + 3, y));
        }
    };

    for seed in 0..20 {
        let (map, cells) = lay_branches(seed, 30, walls);
        for cell in &cells {
            assert!(
                (cell.y - ARTERIAL_ROW).abs() <= 2 || (cell.x - ARTERIAL_COLUMN).abs() <= 2,
                "road at {cell:?} lies past the water"
            );
        }
        assert!(map.water_cells().iter().all(|&pos| map.is(pos, CellType::Water)));
        assert_eq!(map.count_of(CellType::Road), map.roads().len());
        assert_eq!(component_count(&map), 1);
    }
}
