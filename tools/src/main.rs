//! zot-runner: headless frame runner for the zot overlay renderer.
//!
//! Builds a seeded in-memory city, lets the simulation side churn zot
//! sets between frames, and renders into a recording canvas so the
//! sampling/caching behavior can be watched from a terminal.
//!
//! Usage:
//!   zot-runner --seed 12345 --frames 40 --width 40 --height 30
//!   zot-runner --config render.json --dump-frame

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use zotlayer_core::{
    BlockCoordinate, Building, BuildingKind, FixedView, GridMap, RecordingCanvas, RegionKey,
    RenderConfig, SpriteAtlas, SpriteHandle, Zot, ZotRenderer,
};

/// Atlas that pretends every zot has art: the handle id is the zot's
/// position in `Zot::ALL`.
struct StubAtlas;

impl SpriteAtlas for StubAtlas {
    fn sprite_for(&self, zot: Zot, width: f64, height: f64) -> Option<SpriteHandle> {
        let id = Zot::ALL.iter().position(|z| *z == zot)? as u32;
        Some(SpriteHandle { id, width, height })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let frames = parse_arg(&args, "--frames", 20u64);
    let width = parse_arg(&args, "--width", 40i32);
    let height = parse_arg(&args, "--height", 30i32);
    let frame_delay_ms = parse_arg(&args, "--frame-delay-ms", 100u64);
    let dump_frame = args.iter().any(|a| a == "--dump-frame");

    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => {
            let json = std::fs::read_to_string(&w[1])
                .with_context(|| format!("reading config file {}", w[1]))?;
            RenderConfig::from_json(&json)?
        }
        None => RenderConfig::default(),
    };
    log::debug!("render config: {config:?}");

    println!("zot-runner");
    println!("  seed:    {seed}");
    println!("  frames:  {frames}");
    println!("  map:     {width}x{height}");
    println!();

    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let map = Arc::new(seeded_city(&mut rng, width, height));
    let locations = map.all_locations();
    let by_kind = |kind: BuildingKind| {
        locations
            .iter()
            .filter(|l| l.building.kind == kind)
            .count()
    };
    println!(
        "placed {} buildings (res={} com={} ind={} civ={}), {} currently carrying zots",
        map.building_count(),
        by_kind(BuildingKind::Residential),
        by_kind(BuildingKind::Commercial),
        by_kind(BuildingKind::Industrial),
        by_kind(BuildingKind::Civic),
        locations.iter().filter(|l| l.building.has_zots()).count()
    );

    let view = Arc::new(FixedView::new(0.0, 0.0, 32.0));
    let mut renderer = ZotRenderer::new(map.clone(), Arc::new(StubAtlas), view, config, seed)?;
    renderer.set_visible_region(Some(RegionKey::new(
        BlockCoordinate::new(0, 0),
        BlockCoordinate::new(width - 1, height - 1),
    )));

    let mut canvas = RecordingCanvas::new();
    for frame in 0..frames {
        renderer.render(&mut canvas)?;
        let (regions, choices) = renderer.cache_sizes();
        println!(
            "frame {frame:>3}: markers={} phase={:>5.1} cached_regions={regions} cached_choices={choices}",
            canvas.sprite_count(),
            renderer.phase_degrees(),
        );

        churn_zots(&map, &mut rng);
        std::thread::sleep(Duration::from_millis(frame_delay_ms));
    }

    if dump_frame {
        println!("{}", canvas.to_json()?);
    }

    renderer.stop();
    println!();
    println!("done: {frames} frames rendered");
    Ok(())
}

/// Scatter buildings over roughly a third of the grid and give about half
/// of them an initial zot or two.
fn seeded_city(rng: &mut Pcg64Mcg, width: i32, height: i32) -> GridMap {
    let kinds = [
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Industrial,
        BuildingKind::Civic,
    ];
    let map = GridMap::new(width, height);
    let target = (width as usize * height as usize) / 3;
    for _ in 0..target {
        let coordinate =
            BlockCoordinate::new(rng.gen_range(0..width), rng.gen_range(0..height));
        let kind = *kinds.choose(rng).unwrap_or(&BuildingKind::Residential);
        let building = Building::new(kind);
        if rng.gen_bool(0.5) {
            let count = rng.gen_range(1..=2);
            for zot in Zot::ALL.choose_multiple(rng, count) {
                building.add_zot(*zot);
            }
        }
        map.place_building(coordinate, Arc::new(building));
    }
    map
}

/// Between frames the "simulation" retires and raises some zots, the way
/// the real game would outside the renderer's control.
fn churn_zots(map: &GridMap, rng: &mut Pcg64Mcg) {
    for location in map.all_locations() {
        if rng.gen_bool(0.05) {
            location.building.clear_zots();
        }
        if rng.gen_bool(0.05) {
            if let Some(zot) = Zot::ALL.choose(rng) {
                location.building.add_zot(*zot);
            }
        }
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
