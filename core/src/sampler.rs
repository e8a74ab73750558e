//! Visible-sample cache — which buildings in the viewport show a marker.
//!
//! The map can hold thousands of buildings with zots; drawing them all
//! would be noise and re-picking every frame would flicker. So each
//! distinct visible region gets a bounded random subset that stays FIXED
//! for one time window, then is recomputed wholesale on the next access.

use crate::cache::TimedCache;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::map::{Location, MapQuery};
use crate::rng::{self, random_sample};
use crate::types::RegionKey;
use rand_pcg::Pcg64Mcg;
use std::sync::{Arc, Mutex};

pub struct ZotSampler {
    map: Arc<dyn MapQuery>,
    cache: TimedCache<RegionKey, Vec<Location>>,
    sample_cap: usize,
    rng: Mutex<Pcg64Mcg>,
}

impl ZotSampler {
    pub fn new(map: Arc<dyn MapQuery>, config: &RenderConfig, master_seed: u64) -> Self {
        Self {
            map,
            // Region keys are few in practice (one per viewport position),
            // but rapid panning mints fresh keys, so cap residency anyway.
            cache: TimedCache::new(config.sample_window(), Some(config.region_capacity)),
            sample_cap: config.sample_cap,
            rng: Mutex::new(rng::stream(master_seed, rng::SAMPLER_STREAM)),
        }
    }

    /// The locations to draw for this region. Never more than K; stable
    /// (same elements, same order) for a full window per region key.
    /// A spatial-query failure propagates uncached, so the next call
    /// retries instead of serving an empty frame for a whole window.
    pub fn sample(&self, region: RegionKey) -> RenderResult<Vec<Location>> {
        self.cache.get_or_compute(region, || {
            let locations = self
                .map
                .locations_in(region.from, region.to)
                .map_err(RenderError::SpatialQuery)?;
            let qualifying: Vec<Location> = locations
                .into_iter()
                .filter(|location| location.building.has_zots())
                .collect();
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            let picked = random_sample(&qualifying, self.sample_cap, &mut *rng);
            log::trace!(
                "sampled {} of {} qualifying locations for region ({},{})..({},{})",
                picked.len(),
                qualifying.len(),
                region.from.x,
                region.from.y,
                region.to.x,
                region.to.y,
            );
            Ok(picked)
        })
    }

    pub fn resident_regions(&self) -> usize {
        self.cache.len()
    }
}
