//! Which overlay images a card gets, and where.

use std::path::PathBuf;

use crate::assemble::frame::{FrameGeometry, FrameKind, Numbering, pad_number};
use crate::foundation::core::Offset;
use crate::foundation::naming::normalize_filename;
use crate::metadata::record::{CardRecord, Category};

/// Border used unless a Poker archetype selects a color-specific one.
pub const DEFAULT_BORDER: &str = "black";

/// Poker-archetype borders keyed by trimmed color identity.
const POKER_BORDERS: [(&str, &str); 6] = [
    ("W", "fold"),
    ("U", "echo"),
    ("B", "necro"),
    ("R", "joker"),
    ("G", "wild"),
    ("Colorless", "glass"),
];

/// Pick the border image name for an archetype and color identity.
pub fn select_border(archetype: &str, color_identity: &str) -> &'static str {
    if !archetype.contains("Poker") {
        return DEFAULT_BORDER;
    }
    let color = color_identity.trim();
    POKER_BORDERS
        .iter()
        .find(|(key, _)| *key == color)
        .map_or(DEFAULT_BORDER, |(_, border)| border)
}

/// One overlay image, addressed relative to its frame directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayAsset {
    /// `borders/{name}.png`
    Border(&'static str),
    /// `collection/set_name.png`
    SetIcon,
    /// `years/{year}.png`
    Year(i32),
    /// `rarities/{rarity}.png`, rarity lower-cased.
    Rarity(String),
    /// `numbers/{digit}.png`
    Digit(char),
    /// `overlays/foil.png`
    Foil,
}

impl OverlayAsset {
    /// Path below the assets root for this overlay in `frame`.
    pub fn rel_path(&self, frame: FrameKind) -> PathBuf {
        let file = match self {
            OverlayAsset::Border(name) => format!("borders/{name}.png"),
            OverlayAsset::SetIcon => "collection/set_name.png".to_string(),
            OverlayAsset::Year(year) => format!("years/{year}.png"),
            OverlayAsset::Rarity(rarity) => format!("rarities/{rarity}.png"),
            OverlayAsset::Digit(digit) => format!("numbers/{digit}.png"),
            OverlayAsset::Foil => "overlays/foil.png".to_string(),
        };
        PathBuf::from(frame.dir_name()).join(file)
    }
}

/// One item to stamp: a record, its owning front (for backsides) and its collection number.
#[derive(Clone, Copy, Debug)]
pub struct StampJob<'a> {
    /// Collection the item belongs to.
    pub category: Category,
    /// The record being stamped.
    pub record: &'a CardRecord,
    /// Front record when `record` is a backside.
    pub parent: Option<&'a CardRecord>,
    /// 1-based collection number; backsides share their front's.
    pub number: usize,
    /// Size of the numbering range, used for zero-padding.
    pub total: usize,
}

impl<'a> StampJob<'a> {
    /// Job for a front-facing record.
    pub fn front(category: Category, record: &'a CardRecord, number: usize, total: usize) -> Self {
        Self {
            category,
            record,
            parent: None,
            number,
            total,
        }
    }

    /// Job for a backside of this job's record.
    pub fn backside(&self, backside: &'a CardRecord) -> Self {
        Self {
            parent: Some(self.record),
            record: backside,
            ..*self
        }
    }

    /// Whether this job stamps a backside.
    pub fn is_backside(&self) -> bool {
        self.parent.is_some()
    }

    /// Normalized file stem of the artwork and the output.
    pub fn file_name(&self) -> String {
        normalize_filename(&self.record.name)
    }

    /// Archetype driving border selection; backsides use their front's.
    pub fn archetype(&self) -> &str {
        &self.parent.unwrap_or(self.record).archetype
    }

    /// Lower-cased rarity stamp name.
    pub fn rarity(&self) -> String {
        match self.category {
            Category::Tokens => "token".to_string(),
            Category::BasicLands => "land".to_string(),
            Category::Cards | Category::AltArts => {
                self.parent.unwrap_or(self.record).rarity.to_lowercase()
            }
        }
    }

    /// Zero-padded collection number.
    pub fn padded_number(&self) -> String {
        pad_number(self.number, self.total)
    }
}

/// An overlay and its placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedLayer {
    /// Overlay image.
    pub asset: OverlayAsset,
    /// Placement on the canvas.
    pub offset: Offset,
}

/// Frame and ordered overlays for one job, artwork excluded.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlan {
    /// Frame layout.
    pub geometry: FrameGeometry,
    /// Overlays bottom to top.
    pub layers: Vec<PlannedLayer>,
}

impl OverlayPlan {
    /// Assets in paint order.
    pub fn assets(&self) -> impl Iterator<Item = &OverlayAsset> {
        self.layers.iter().map(|l| &l.asset)
    }
}

/// Plan the overlays for `job`: border, set icon, year, rarity, digits, then foil for foil
/// alt-arts.
pub fn plan_overlays(job: &StampJob<'_>, numbering: &Numbering) -> OverlayPlan {
    let geometry = FrameKind::for_types(&job.record.types).geometry();
    let record = job.record;

    let mut layers = vec![
        PlannedLayer {
            asset: OverlayAsset::Border(select_border(job.archetype(), &record.color_identity)),
            offset: Offset::ORIGIN,
        },
        PlannedLayer {
            asset: OverlayAsset::SetIcon,
            offset: Offset::ORIGIN,
        },
        PlannedLayer {
            asset: OverlayAsset::Year(record.year()),
            offset: Offset::ORIGIN,
        },
        PlannedLayer {
            asset: OverlayAsset::Rarity(job.rarity()),
            offset: Offset::ORIGIN,
        },
    ];

    for (digit, offset) in numbering.layout(&job.padded_number(), &geometry) {
        layers.push(PlannedLayer {
            asset: OverlayAsset::Digit(digit),
            offset,
        });
    }

    if job.category == Category::AltArts && job.file_name().contains("Foil") {
        layers.push(PlannedLayer {
            asset: OverlayAsset::Foil,
            offset: Offset::ORIGIN,
        });
    }

    OverlayPlan { geometry, layers }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/overlays.rs"]
mod tests;
