/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create canvas dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Top-left placement of a layer relative to the canvas origin.
///
/// Offsets may be negative; pixels falling outside the canvas are clipped at paint time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Horizontal offset in pixels.
    pub x: i64,
    /// Vertical offset in pixels.
    pub y: i64,
}

impl Offset {
    /// Placement at the canvas origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create an offset.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}
