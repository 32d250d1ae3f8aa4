//! Packing processed cards into fixed-size contact sheets.

use std::path::PathBuf;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assemble::assembler::banner;
use crate::assemble::frame::{FrameKind, STANDARD_CANVAS};
use crate::assets::decode::save_png;
use crate::assets::store::AssetStore;
use crate::compose::layer::LayerStack;
use crate::config::{RunOptions, SheetRange, StampConfig};
use crate::foundation::core::{Canvas, Offset};
use crate::foundation::error::StampResult;
use crate::foundation::naming::normalize_filename;
use crate::metadata::loader::Collections;
use crate::metadata::record::{CardRecord, Category, sorted_records};

/// Cell layout of a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    /// Cells per row.
    pub columns: u32,
    /// Rows per sheet.
    pub rows: u32,
    /// Size of one cell; Battle cards are resized to it.
    pub cell: Canvas,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            columns: 6,
            rows: 4,
            cell: STANDARD_CANVAS,
        }
    }
}

impl TileGrid {
    /// Cells per sheet.
    pub fn capacity(&self) -> u32 {
        self.columns * self.rows
    }

    /// Full sheet size.
    pub fn sheet_canvas(&self) -> Canvas {
        Canvas::new(self.columns * self.cell.width, self.rows * self.cell.height)
    }

    /// Top-left corner of cell `slot`, filled row by row.
    pub fn cell_offset(&self, slot: u32) -> Offset {
        let col = slot % self.columns;
        let row = slot / self.columns;
        Offset::new(
            i64::from(col * self.cell.width),
            i64::from(row * self.cell.height),
        )
    }
}

/// Per-run tiling counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileStats {
    /// Card images placed on written or pending sheets.
    pub placed: u64,
    /// Sheets counted but not written because they precede the start sheet.
    pub skipped_sheets: u32,
    /// Items whose processed image was missing or unreadable.
    pub missing: Vec<String>,
    /// Sheets written, in order.
    pub sheets: Vec<PathBuf>,
}

fn sheet_label(category: Category) -> &'static str {
    match category {
        Category::Cards => "Card",
        Category::Tokens => "Token",
        Category::BasicLands => "Basic Land",
        Category::AltArts => "Alt Art",
    }
}

/// Position within the current category's sheets.
struct SheetCursor {
    category: Category,
    grid: TileGrid,
    dir: PathBuf,
    sheet: u32,
    slot: u32,
    stack: LayerStack,
}

impl SheetCursor {
    fn new(category: Category, grid: TileGrid, dir: PathBuf) -> Self {
        Self {
            category,
            grid,
            dir,
            sheet: 1,
            slot: 0,
            stack: LayerStack::new(grid.sheet_canvas()),
        }
    }

    /// Count a slot on a sheet below the start of the range.
    fn skip_slot(&mut self, stats: &mut TileStats) {
        self.slot += 1;
        if self.slot == self.grid.capacity() {
            tracing::info!("Skipping {} Tile Set {}", sheet_label(self.category), self.sheet);
            stats.skipped_sheets += 1;
            self.sheet += 1;
            self.slot = 0;
        }
    }

    fn place(&mut self, image: RgbaImage, stats: &mut TileStats) -> StampResult<()> {
        self.stack.add_layer(image, self.grid.cell_offset(self.slot));
        stats.placed += 1;
        self.slot += 1;
        if self.slot == self.grid.capacity() {
            self.flush(false, stats)?;
            self.sheet += 1;
            self.slot = 0;
        }
        Ok(())
    }

    fn flush(&mut self, final_sheet: bool, stats: &mut TileStats) -> StampResult<()> {
        let stack = std::mem::replace(&mut self.stack, LayerStack::new(self.grid.sheet_canvas()));
        let Some(sheet) = stack.merge() else {
            return Ok(());
        };

        let label = sheet_label(self.category);
        if final_sheet {
            tracing::info!("Creating {label} Tile Set {} (Final Tileset).", self.sheet);
        } else {
            tracing::info!("Creating {label} Tile Set {}.", self.sheet);
        }
        let path = self
            .dir
            .join(format!("{}{}.png", self.category.sheet_prefix(), self.sheet));
        save_png(&path, &sheet)?;
        stats.sheets.push(path);
        Ok(())
    }
}

/// Tiles processed card images onto sheets, one sheet series per category.
#[derive(Debug)]
pub struct Tiler<'a> {
    config: &'a StampConfig,
    options: &'a RunOptions,
    range: SheetRange,
    grid: TileGrid,
    store: AssetStore,
}

impl<'a> Tiler<'a> {
    /// Create a tiler over the default 6x4 grid.
    pub fn new(config: &'a StampConfig, options: &'a RunOptions, range: SheetRange) -> Self {
        Self {
            config,
            options,
            range,
            grid: TileGrid::default(),
            store: AssetStore::new(&config.assets_dir, config.filename_variants.clone()),
        }
    }

    /// Replace the sheet grid.
    pub fn with_grid(mut self, grid: TileGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Tile every enabled category.
    pub fn run(&mut self, collections: &Collections) -> StampResult<TileStats> {
        let mut stats = TileStats::default();
        for category in Category::ALL {
            if self.options.includes(category) {
                self.tile_category(collections, category, &mut stats)?;
            }
        }
        tracing::info!(
            placed = stats.placed,
            sheets = stats.sheets.len(),
            missing = stats.missing.len(),
            "tile run finished"
        );
        Ok(stats)
    }

    fn tile_category(
        &mut self,
        collections: &Collections,
        category: Category,
        stats: &mut TileStats,
    ) -> StampResult<()> {
        let only_updated = self.options.only_updated && category == Category::Cards;
        tracing::info!("{}", banner(category, only_updated));

        let mut items: Vec<(&CardRecord, bool)> = Vec::new();
        for record in sorted_records(collections.get(category).values()) {
            if only_updated && !record.updated {
                continue;
            }
            let front_wanted = self.options.wants(&record.name);
            if front_wanted {
                items.push((record, false));
            }
            for backside in &record.backsides {
                if front_wanted || self.options.wants(&backside.name) {
                    items.push((backside, true));
                }
            }
        }

        let dir = self.config.sheets_dir(self.options.quarantine);
        let mut cursor = SheetCursor::new(category, self.grid, dir);
        for (record, is_backside) in items {
            if self.range.is_past(cursor.sheet) {
                break;
            }
            if cursor.sheet < self.range.start {
                cursor.skip_slot(stats);
                continue;
            }

            let indent = if is_backside { "\t" } else { "" };
            tracing::debug!("{indent}Tiling \"{}\".", record.name);
            match self.load_cell(record) {
                Some(image) => cursor.place(image, stats)?,
                None => stats.missing.push(record.name.clone()),
            }
        }
        cursor.flush(true, stats)
    }

    /// Load a processed card, rotated and resized to the cell if it is a `Battle`.
    fn load_cell(&self, record: &CardRecord) -> Option<RgbaImage> {
        let source = self.config.output_dir(self.options.quarantine);
        let file_name = normalize_filename(&record.name);
        let image = match self.store.open_card(&source, &file_name) {
            Ok(Some(image)) => image,
            Ok(None) => {
                tracing::warn!("Couldn't find \"{file_name}\" in \"{}\".", source.display());
                return None;
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(
                    %reason,
                    "Card file \"{file_name}\" cannot be opened or is otherwise corrupted."
                );
                return None;
            }
        };

        if FrameKind::for_types(&record.types) == FrameKind::WideHorizontal {
            let rotated = imageops::rotate270(&image);
            return Some(imageops::resize(
                &rotated,
                self.grid.cell.width,
                self.grid.cell.height,
                FilterType::Lanczos3,
            ));
        }
        Some(image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/tiling.rs"]
mod tests;
