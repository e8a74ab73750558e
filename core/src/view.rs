//! View geometry seam. Pan offsets and block size belong to the parent
//! map view; the renderer reads them once per frame and owns none of the
//! projection math.

pub trait ViewState: Send + Sync {
    /// Horizontal pan, in blocks, of the viewport's left edge.
    fn block_offset_x(&self) -> f64;
    /// Vertical pan, in blocks, of the viewport's top edge.
    fn block_offset_y(&self) -> f64;
    /// Edge length of one block in surface pixels.
    fn block_size(&self) -> f64;
}

/// Fixed geometry for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedView {
    pub offset_x: f64,
    pub offset_y: f64,
    pub block_size: f64,
}

impl FixedView {
    pub fn new(offset_x: f64, offset_y: f64, block_size: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            block_size,
        }
    }
}

impl ViewState for FixedView {
    fn block_offset_x(&self) -> f64 {
        self.offset_x
    }

    fn block_offset_y(&self) -> f64 {
        self.offset_y
    }

    fn block_size(&self) -> f64 {
        self.block_size
    }
}
