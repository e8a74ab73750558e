//! Draw-target and sprite seams.
//!
//! The real game hands the renderer a hardware canvas and a decoded sprite
//! atlas; neither lives in this crate. `Canvas` and `SpriteAtlas` are the
//! capabilities the renderer consumes, and `RecordingCanvas` is the
//! headless implementation the runner and the tests draw into.

use crate::zot::Zot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const RED: Color = Color {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Opaque handle to a decoded sprite. The id is meaningful only to the
/// atlas that issued it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpriteHandle {
    pub id: u32,
    pub width: f64,
    pub height: f64,
}

/// Sprite resolution. `None` means no art exists for that zot at that
/// size — the renderer skips the marker, it is not an error.
pub trait SpriteAtlas: Send + Sync {
    fn sprite_for(&self, zot: Zot, width: f64, height: f64) -> Option<SpriteHandle>;
}

/// The surface markers are drawn onto, cleared once per frame.
pub trait Canvas {
    fn clear(&mut self);
    fn fill_ellipse(&mut self, color: Color, x: f64, y: f64, width: f64, height: f64);
    fn stroke_ellipse(&mut self, color: Color, x: f64, y: f64, width: f64, height: f64);
    fn draw_sprite(&mut self, sprite: SpriteHandle, x: f64, y: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Clear,
    FillEllipse {
        color: Color,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeEllipse {
        color: Color,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    DrawSprite {
        sprite: SpriteHandle,
        x: f64,
        y: f64,
    },
}

/// Canvas that records every call in order instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn sprite_ops(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::DrawSprite { .. }))
            .collect()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprite_ops().len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.ops)
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn fill_ellipse(&mut self, color: Color, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillEllipse {
            color,
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_ellipse(&mut self, color: Color, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::StrokeEllipse {
            color,
            x,
            y,
            width,
            height,
        });
    }

    fn draw_sprite(&mut self, sprite: SpriteHandle, x: f64, y: f64) {
        self.ops.push(DrawOp::DrawSprite { sprite, x, y });
    }
}
