//! The zot overlay renderer.
//!
//! ORCHESTRATION PER FRAME (fixed order):
//!   1. Clear the canvas. No visible region set → done, zero markers.
//!   2. Visible-sample cache: bounded random subset of marked buildings
//!      for the region, stable for its window.
//!   3. Zot-choice cache: one zot per sampled location, on its own window.
//!   4. Sprite atlas lookup; missing art skips the location silently.
//!   5. Draw a white/red ellipse backdrop, then the sprite on top, both at
//!      the same bobbed y so every marker floats in sync off the single
//!      shared phase.
//!
//! RULES:
//!   - render() is driven externally at arbitrary cadence and is never
//!     invoked concurrently with itself.
//!   - setVisibleRegion may race render() from another control path; the
//!     region is a Copy snapshot behind a mutex, stale by at most one
//!     update.
//!   - Missing data is never an error. Only a spatial-query failure
//!     escapes render(), and it is never cached.

use crate::canvas::{Canvas, Color, SpriteAtlas, SpriteHandle};
use crate::chooser::ZotChooser;
use crate::clock::AnimationClock;
use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::map::MapQuery;
use crate::sampler::ZotSampler;
use crate::types::{BlockCoordinate, RegionKey};
use crate::view::ViewState;
use std::sync::{Arc, Mutex};

pub struct ZotRenderer {
    sampler: ZotSampler,
    chooser: ZotChooser,
    clock: AnimationClock,
    atlas: Arc<dyn SpriteAtlas>,
    view: Arc<dyn ViewState>,
    visible: Mutex<Option<RegionKey>>,
    bob_amplitude: f64,
}

impl ZotRenderer {
    /// Build the renderer and start its animation clock. The clock runs
    /// until [`stop`](Self::stop) (or drop); it has no tie to the caches
    /// or the render cadence.
    pub fn new(
        map: Arc<dyn MapQuery>,
        atlas: Arc<dyn SpriteAtlas>,
        view: Arc<dyn ViewState>,
        config: RenderConfig,
        master_seed: u64,
    ) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            sampler: ZotSampler::new(map, &config, master_seed),
            chooser: ZotChooser::new(&config, master_seed),
            clock: AnimationClock::start(config.tick_period(), config.phase_step_degrees),
            atlas,
            view,
            visible: Mutex::new(None),
            bob_amplitude: config.bob_amplitude,
        })
    }

    /// Update the region subsequent frames should cover. `None` blanks the
    /// overlay. Callable from a different control path than render().
    pub fn set_visible_region(&self, region: Option<RegionKey>) {
        *self.visible.lock().unwrap_or_else(|e| e.into_inner()) = region;
    }

    pub fn visible_region(&self) -> Option<RegionKey> {
        *self.visible.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current bob phase in degrees. Read-only; the clock owns it.
    pub fn phase_degrees(&self) -> f64 {
        self.clock.phase_degrees()
    }

    /// Halt the animation clock. Idempotent; after this returns the phase
    /// never moves again. The caches keep serving.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Draw one frame. Clears first, then draws one marker per sampled
    /// location that has both a chosen zot and a sprite.
    pub fn render(&self, canvas: &mut dyn Canvas) -> RenderResult<()> {
        canvas.clear();

        let Some(region) = self.visible_region() else {
            log::debug!("render: no visible region, background only");
            return Ok(());
        };

        let locations = self.sampler.sample(region)?;
        let phase = self.clock.phase_degrees();
        let block_size = self.view.block_size();
        let mut drawn = 0usize;

        for location in &locations {
            let Some(zot) = self.chooser.choose(location)? else {
                continue;
            };
            let Some(sprite) = self.atlas.sprite_for(zot, block_size, block_size) else {
                // No art for this zot at this size. Nothing to draw.
                continue;
            };
            self.draw_zot(canvas, sprite, location.coordinate, phase);
            drawn += 1;
        }

        log::debug!(
            "render: region=({},{})..({},{}) sampled={} drawn={drawn} phase={phase:.0}",
            region.from.x,
            region.from.y,
            region.to.x,
            region.to.y,
            locations.len(),
        );
        Ok(())
    }

    fn draw_zot(
        &self,
        canvas: &mut dyn Canvas,
        sprite: SpriteHandle,
        coordinate: BlockCoordinate,
        phase_degrees: f64,
    ) {
        let tx = coordinate.x as f64 - self.view.block_offset_x();
        let ty = coordinate.y as f64 - self.view.block_offset_y();
        let block_size = self.view.block_size();

        // Float one block above the building, bobbing on the shared phase.
        let y = (ty - 1.0) * block_size
            + phase_degrees.to_radians().sin() * block_size * self.bob_amplitude;

        self.draw_outline(canvas, tx, block_size, y);
        canvas.draw_sprite(sprite, tx * block_size, y);
    }

    /// Filled white ellipse with a red stroke, a quarter block proud of
    /// the sprite on every side, drawn first so the sprite sits on top.
    fn draw_outline(&self, canvas: &mut dyn Canvas, tx: f64, block_size: f64, y: f64) {
        let quarter_block = block_size * 0.25;
        let half_block = block_size * 0.5;

        let x = tx * block_size - quarter_block;
        let outline_y = y - quarter_block;
        let diameter = block_size + half_block;

        canvas.fill_ellipse(Color::WHITE, x, outline_y, diameter, diameter);
        canvas.stroke_ellipse(Color::RED, x, outline_y, diameter, diameter);
    }

    /// Resident entry counts (regions, choices). For capacity monitoring.
    pub fn cache_sizes(&self) -> (usize, usize) {
        (
            self.sampler.resident_regions(),
            self.chooser.resident_choices(),
        )
    }
}
