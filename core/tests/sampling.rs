//! Visible-sample cache properties: the K cap, subset validity, in-window
//! stability, whole-subset recomputation on expiry, and the defensive
//! bound on resident region keys.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use zotlayer_core::sampler::ZotSampler;
use zotlayer_core::{
    BlockCoordinate, Building, BuildingKind, GridMap, Location, MapQuery, RegionKey, RenderConfig,
    Zot,
};

fn map_with_marked_buildings(count: i32) -> Arc<GridMap> {
    let map = GridMap::new(40, 40);
    for i in 0..count {
        let coordinate = BlockCoordinate::new(i % 10, i / 10);
        let building = Building::with_zots(BuildingKind::Residential, vec![Zot::NoPower]);
        map.place_building(coordinate, Arc::new(building));
    }
    Arc::new(map)
}

fn region(x0: i32, y0: i32, x1: i32, y1: i32) -> RegionKey {
    RegionKey::new(BlockCoordinate::new(x0, y0), BlockCoordinate::new(x1, y1))
}

fn short_window_config(window_ms: u64) -> RenderConfig {
    RenderConfig {
        sample_window_ms: window_ms,
        ..RenderConfig::default()
    }
}

#[test]
fn never_returns_more_than_k_locations() {
    // 30 qualifying buildings, K = 5.
    let sampler = ZotSampler::new(map_with_marked_buildings(30), &RenderConfig::default(), 42);
    let picked = sampler.sample(region(0, 0, 9, 9)).unwrap();
    assert_eq!(picked.len(), 5);
}

#[test]
fn every_result_is_inside_the_region_and_qualifying() {
    let sampler = ZotSampler::new(map_with_marked_buildings(30), &RenderConfig::default(), 42);
    let key = region(0, 0, 4, 2);
    for location in sampler.sample(key).unwrap() {
        assert!(
            key.contains(location.coordinate),
            "sampled location {:?} is outside the queried region",
            location.coordinate
        );
        assert!(location.building.has_zots());
    }
}

#[test]
fn buildings_without_zots_never_qualify() {
    let map = GridMap::new(10, 10);
    map.place_building(
        BlockCoordinate::new(1, 1),
        Arc::new(Building::new(BuildingKind::Commercial)),
    );
    map.place_building(
        BlockCoordinate::new(2, 2),
        Arc::new(Building::with_zots(
            BuildingKind::Industrial,
            vec![Zot::Pollution],
        )),
    );
    let sampler = ZotSampler::new(Arc::new(map), &RenderConfig::default(), 42);
    let picked = sampler.sample(region(0, 0, 9, 9)).unwrap();
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].coordinate, BlockCoordinate::new(2, 2));
}

#[test]
fn fewer_qualifying_than_k_returns_all_of_them() {
    let sampler = ZotSampler::new(map_with_marked_buildings(3), &RenderConfig::default(), 42);
    let picked = sampler.sample(region(0, 0, 9, 9)).unwrap();
    assert_eq!(picked.len(), 3);
}

#[test]
fn empty_region_returns_empty_list() {
    let sampler = ZotSampler::new(map_with_marked_buildings(10), &RenderConfig::default(), 42);
    assert!(sampler.sample(region(20, 20, 30, 30)).unwrap().is_empty());
}

/// The anti-flicker guarantee: inside one window, repeated gets return the
/// identical list — same elements, same order — even though a recompute
/// would likely pick differently.
#[test]
fn repeated_gets_within_window_are_identical() {
    let sampler = ZotSampler::new(map_with_marked_buildings(30), &RenderConfig::default(), 42);
    let key = region(0, 0, 9, 9);
    let first = sampler.sample(key).unwrap();
    for _ in 0..20 {
        let again = sampler.sample(key).unwrap();
        let first_keys: Vec<_> = first.iter().map(Location::key).collect();
        let again_keys: Vec<_> = again.iter().map(Location::key).collect();
        assert_eq!(first_keys, again_keys, "sampled list changed mid-window");
    }
}

/// After expiry the subset is recomputed. The new pick is random, so only
/// subset VALIDITY is asserted, never a specific subset.
#[test]
fn post_expiry_result_is_a_valid_subset() {
    let map = map_with_marked_buildings(30);
    let sampler = ZotSampler::new(
        Arc::clone(&map) as Arc<dyn MapQuery>,
        &short_window_config(30),
        42,
    );
    let key = region(0, 0, 9, 9);
    sampler.sample(key).unwrap();

    std::thread::sleep(Duration::from_millis(50));

    let picked = sampler.sample(key).unwrap();
    assert_eq!(picked.len(), 5);
    for location in &picked {
        assert!(key.contains(location.coordinate));
        assert!(location.building.has_zots());
    }
}

#[test]
fn distinct_region_keys_are_bounded_by_capacity() {
    let config = RenderConfig {
        region_capacity: 3,
        ..RenderConfig::default()
    };
    let sampler = ZotSampler::new(map_with_marked_buildings(30), &config, 42);
    for i in 0..10 {
        sampler.sample(region(0, 0, i, i)).unwrap();
    }
    assert!(
        sampler.resident_regions() <= 3,
        "resident regions {} exceed capacity 3",
        sampler.resident_regions()
    );
}

struct FlakyMap {
    inner: GridMap,
    fail_next: AtomicBool,
}

impl MapQuery for FlakyMap {
    fn locations_in(
        &self,
        from: BlockCoordinate,
        to: BlockCoordinate,
    ) -> anyhow::Result<Vec<Location>> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("map store unavailable");
        }
        self.inner.locations_in(from, to)
    }
}

/// A spatial-query failure must surface to the caller AND must not be
/// cached as an empty result — the very next call retries the query.
#[test]
fn query_failure_propagates_and_is_not_cached() {
    let inner = GridMap::new(10, 10);
    inner.place_building(
        BlockCoordinate::new(1, 1),
        Arc::new(Building::with_zots(
            BuildingKind::Civic,
            vec![Zot::HighCrime],
        )),
    );
    let map = Arc::new(FlakyMap {
        inner,
        fail_next: AtomicBool::new(true),
    });
    let sampler = ZotSampler::new(map, &RenderConfig::default(), 42);
    let key = region(0, 0, 9, 9);

    assert!(sampler.sample(key).is_err());
    // Same window, but the failure was not cached: the retry succeeds.
    let picked = sampler.sample(key).unwrap();
    assert_eq!(picked.len(), 1);
}
