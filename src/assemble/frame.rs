use crate::foundation::core::{Canvas, Offset};
use crate::foundation::math::scale_px;

/// Overlay geometry variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Portrait card frame.
    Standard,
    /// Landscape frame used by `Battle` cards.
    WideHorizontal,
}

impl FrameKind {
    /// Pick the frame for a card's `Type(s)` field.
    pub fn for_types(types: &str) -> Self {
        if types.contains("Battle") {
            FrameKind::WideHorizontal
        } else {
            FrameKind::Standard
        }
    }

    /// Directory name of this frame's overlays under the assets root.
    pub fn dir_name(self) -> &'static str {
        match self {
            FrameKind::Standard => "standard",
            FrameKind::WideHorizontal => "wide_horizontal",
        }
    }

    /// Canvas size, number-width multiplier and number axis for this frame.
    pub fn geometry(self) -> FrameGeometry {
        match self {
            FrameKind::Standard => FrameGeometry {
                kind: self,
                canvas: STANDARD_CANVAS,
                width_mult: 1.0,
                number_axis: NumberAxis::Horizontal,
            },
            FrameKind::WideHorizontal => FrameGeometry {
                kind: self,
                canvas: WIDE_CANVAS,
                width_mult: BATTLE_WIDTH_MULT,
                number_axis: NumberAxis::Vertical,
            },
        }
    }
}

/// Size of a standard card at print resolution.
pub const STANDARD_CANVAS: Canvas = Canvas::new(1500, 2100);
/// Size of a `Battle` card at print resolution.
pub const WIDE_CANVAS: Canvas = Canvas::new(2814, 2010);
/// Scale applied to digit advances on the wide frame.
pub const BATTLE_WIDTH_MULT: f64 = 1.34;

/// Direction digits of the collection number advance in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberAxis {
    /// Left to right.
    Horizontal,
    /// Top to bottom (rotated frames).
    Vertical,
}

/// Resolved frame layout for one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Which overlay set to use.
    pub kind: FrameKind,
    /// Output canvas.
    pub canvas: Canvas,
    /// Multiplier applied to cumulative digit widths.
    pub width_mult: f64,
    /// Axis digits advance along.
    pub number_axis: NumberAxis,
}

/// Pixel widths of the digits in the number-stamp font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Numbering {
    widths: [u32; 10],
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            widths: [26, 14, 23, 22, 25, 22, 23, 21, 23, 25],
        }
    }
}

impl Numbering {
    /// Use a custom width table, indexed by digit.
    pub fn with_widths(widths: [u32; 10]) -> Self {
        Self { widths }
    }

    /// Registered width of `digit`, or `None` for non-digits.
    pub fn width(&self, digit: char) -> Option<u32> {
        digit.to_digit(10).map(|d| self.widths[d as usize])
    }

    /// Place each digit of `number` along the frame's number axis.
    ///
    /// Digit `i` sits at the scaled sum of the widths of digits `0..i`. Non-digit characters are
    /// skipped.
    pub fn layout(&self, number: &str, geometry: &FrameGeometry) -> Vec<(char, Offset)> {
        let mut out = Vec::with_capacity(number.len());
        let mut advance = 0u32;
        for ch in number.chars() {
            let Some(width) = self.width(ch) else {
                continue;
            };
            let along = scale_px(advance, geometry.width_mult);
            let offset = match geometry.number_axis {
                NumberAxis::Horizontal => Offset::new(along, 0),
                NumberAxis::Vertical => Offset::new(0, along),
            };
            out.push((ch, offset));
            advance += width;
        }
        out
    }
}

/// Zero-pad a 1-based collection number to the digit count of `total`.
pub fn pad_number(number: usize, total: usize) -> String {
    let width = total.max(1).to_string().len();
    format!("{number:0width$}")
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/frame.rs"]
mod tests;
