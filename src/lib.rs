//! cardstamp stamps collection info onto trading-card artwork in batch.
//!
//! A run reads five CSV sources into card collections, then for every card composites a border,
//! set icon, year, rarity and zero-padded collection number over the card's artwork and writes a
//! finished PNG. Finished cards can then be packed into contact sheets for printing.
//!
//! # Pipeline overview
//!
//! 1. **Load**: CSV sources -> [`Collections`] (tokens named, backsides linked to their fronts)
//! 2. **Plan**: [`StampJob`] -> [`OverlayPlan`] (frame, border, stamps and digit offsets)
//! 3. **Composite**: overlays + artwork -> [`LayerStack`] -> merged RGBA image
//! 4. **Tile** (optional): processed cards -> 6x4 contact sheets via [`Tiler`]
//! 5. **Report** (optional): artwork files missing from the sources or the output, [`Report`]
//!
//! Everything runs on one thread; items are processed one at a time in a fixed order, so two runs
//! over the same inputs produce identical files.
#![forbid(unsafe_code)]

mod assemble;
mod assets;
mod compose;
mod config;
mod foundation;
mod metadata;
mod report;

pub use assemble::assembler::{Assembler, ItemOutcome, RunStats, numbering_range};
pub use assemble::frame::{
    BATTLE_WIDTH_MULT, FrameGeometry, FrameKind, NumberAxis, Numbering, STANDARD_CANVAS,
    WIDE_CANVAS, pad_number,
};
pub use assemble::overlays::{
    DEFAULT_BORDER, OverlayAsset, OverlayPlan, PlannedLayer, StampJob, plan_overlays,
    select_border,
};
pub use assemble::tiling::{TileGrid, TileStats, Tiler};
pub use assets::decode::{decode_image, load_rgba, save_png};
pub use assets::store::AssetStore;
pub use compose::composite::{Rgba8, masked_paste};
pub use compose::layer::{Layer, LayerStack};
pub use config::{RunOptions, SheetRange, SourcePaths, StampConfig};
pub use foundation::core::{Canvas, Offset};
pub use foundation::error::{StampError, StampResult};
pub use foundation::naming::{
    FilenameSubstitution, FilenameVariants, RIGHT_SINGLE_QUOTE, canonical_stem,
    normalize_filename,
};
pub use metadata::loader::{
    Collections, SourceRows, build_collections, color_words, described_name, load, read_rows,
    read_rows_from_path, token_full_name,
};
pub use metadata::record::{
    CardRecord, Category, DATE_FORMAT, RawRow, RecordId, parse_date, sorted_records,
};
pub use report::{Report, png_stems};
