//! zotlayer-core — the zot overlay layer of the city map view.
//!
//! Buildings in the simulation accumulate "zots": need/complaint markers
//! (no power, no workers, too much traffic, ...). This crate decides which
//! of them to surface each frame and draws them bobbing above their
//! buildings.
//!
//! The interesting part is not the blitting, it is the sampling layer:
//! bounded, time-windowed, randomized selection over a map that changes
//! constantly, shared between the polling render loop and a free-running
//! animation clock. Two instances of one [`cache::TimedCache`] primitive
//! carry the whole design:
//!   - [`sampler::ZotSampler`]: region → at most K marked locations,
//!     fixed for 10 s per region so markers do not flicker.
//!   - [`chooser::ZotChooser`]: location → one displayed zot, on its own
//!     15 s window, LRU-capped at 10 000 residents.
//!
//! The map model, sprite decoding, and projection math live with the
//! parent game; this crate consumes them through the [`map::MapQuery`],
//! [`canvas::SpriteAtlas`], [`canvas::Canvas`], and [`view::ViewState`]
//! seams.

pub mod cache;
pub mod canvas;
pub mod chooser;
pub mod clock;
pub mod config;
pub mod error;
pub mod map;
pub mod renderer;
pub mod rng;
pub mod sampler;
pub mod types;
pub mod view;
pub mod zot;

pub use canvas::{Canvas, Color, DrawOp, RecordingCanvas, SpriteAtlas, SpriteHandle};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use map::{Building, BuildingKind, GridMap, Location, LocationKey, MapQuery};
pub use renderer::ZotRenderer;
pub use types::{BlockCoordinate, RegionKey};
pub use view::{FixedView, ViewState};
pub use zot::Zot;
