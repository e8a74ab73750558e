//! Zot-choice cache — which of a building's zots is on display.
//!
//! A building can carry several zots at once but shows one at a time. The
//! choice sticks for its own window, deliberately longer than (and not a
//! multiple of) the sample window, so the set of marked buildings and the
//! markers they show rotate out of step instead of all swapping at once.
//!
//! This cache is keyed by every location ever sampled in a session, not
//! just the current viewport, so residency is hard-capped with LRU
//! eviction.

use crate::cache::TimedCache;
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::map::{Location, LocationKey};
use crate::rng::{self, random_choice};
use crate::zot::Zot;
use rand_pcg::Pcg64Mcg;
use std::sync::{Arc, Mutex};

pub struct ZotChooser {
    cache: TimedCache<LocationKey, Option<Zot>>,
    rng: Mutex<Pcg64Mcg>,
}

impl ZotChooser {
    pub fn new(config: &RenderConfig, master_seed: u64) -> Self {
        Self {
            cache: TimedCache::new(config.choice_window(), Some(config.choice_capacity)),
            rng: Mutex::new(rng::stream(master_seed, rng::CHOOSER_STREAM)),
        }
    }

    /// The zot this location currently displays. `None` means the building
    /// had no zots at (re)selection time; that emptiness is itself cached
    /// for the window, which is fine — it is a value, not a failure.
    pub fn choose(&self, location: &Location) -> RenderResult<Option<Zot>> {
        let building = Arc::clone(&location.building);
        self.cache.get_or_compute(location.key(), || {
            let zots = building.zots();
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            Ok(random_choice(&zots, &mut *rng))
        })
    }

    pub fn resident_choices(&self) -> usize {
        self.cache.len()
    }
}
