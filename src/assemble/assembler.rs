use std::path::PathBuf;

use image::RgbaImage;

use crate::assemble::frame::Numbering;
use crate::assemble::overlays::{OverlayPlan, StampJob, plan_overlays};
use crate::assets::decode::save_png;
use crate::assets::store::AssetStore;
use crate::compose::layer::LayerStack;
use crate::config::{RunOptions, StampConfig};
use crate::foundation::core::Offset;
use crate::foundation::error::{StampError, StampResult};
use crate::metadata::loader::Collections;
use crate::metadata::record::{Category, sorted_records};

/// What happened to one stamped item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Written to the contained path.
    Saved(PathBuf),
    /// No artwork under any filename candidate.
    MissingArtwork,
    /// An overlay image was missing; nothing was written.
    MissingOverlay(PathBuf),
    /// Artwork or an overlay could not be decoded, or the output could not be written. Holds the
    /// full error chain.
    Unreadable(String),
}

/// Per-run counters and the names of skipped items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Items written.
    pub processed: u64,
    /// Items with no artwork on disk.
    pub missing_artwork: Vec<String>,
    /// Items skipped because an overlay image was missing.
    pub missing_overlays: Vec<String>,
    /// Items skipped because an image could not be decoded or written.
    pub unreadable: Vec<String>,
    /// Output paths in processing order.
    pub written: Vec<PathBuf>,
}

impl RunStats {
    fn record(&mut self, name: &str, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Saved(path) => {
                self.processed += 1;
                self.written.push(path);
            }
            ItemOutcome::MissingArtwork => self.missing_artwork.push(name.to_string()),
            ItemOutcome::MissingOverlay(_) => self.missing_overlays.push(name.to_string()),
            ItemOutcome::Unreadable(_) => self.unreadable.push(name.to_string()),
        }
    }
}

/// Stamps collection info onto every selected card of a run.
///
/// Items are processed one at a time in (creation date, name) order per category; backsides
/// follow their front and share its number. An item whose artwork or overlays are missing or
/// unreadable, or whose output cannot be written, is logged and skipped; the run always continues.
#[derive(Debug)]
pub struct Assembler<'a> {
    config: &'a StampConfig,
    options: &'a RunOptions,
    store: AssetStore,
    numbering: Numbering,
}

impl<'a> Assembler<'a> {
    /// Create an assembler reading overlays from `config.assets_dir`.
    pub fn new(config: &'a StampConfig, options: &'a RunOptions) -> Self {
        Self {
            config,
            options,
            store: AssetStore::new(&config.assets_dir, config.filename_variants.clone()),
            numbering: Numbering::default(),
        }
    }

    /// Replace the digit width table.
    pub fn with_numbering(mut self, numbering: Numbering) -> Self {
        self.numbering = numbering;
        self
    }

    /// Overlay cache and card resolver used by this run.
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Directory this run writes processed cards to.
    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir(self.options.quarantine)
    }

    /// Stamp every enabled category.
    pub fn run(&mut self, collections: &Collections) -> RunStats {
        let mut stats = RunStats::default();
        for category in Category::ALL {
            if self.options.includes(category) {
                self.run_category(collections, category, &mut stats);
            }
        }
        tracing::info!(
            processed = stats.processed,
            missing_artwork = stats.missing_artwork.len(),
            missing_overlays = stats.missing_overlays.len(),
            unreadable = stats.unreadable.len(),
            "stamp run finished"
        );
        stats
    }

    fn run_category(
        &mut self,
        collections: &Collections,
        category: Category,
        stats: &mut RunStats,
    ) {
        let only_updated = self.options.only_updated && category == Category::Cards;
        tracing::info!("{}", banner(category, only_updated));

        let (first, total) = numbering_range(collections, category);
        let records = sorted_records(collections.get(category).values());
        for (idx, record) in records.into_iter().enumerate() {
            if only_updated && !record.updated {
                continue;
            }

            let job = StampJob::front(category, record, first + idx, total);
            let front_wanted = self.options.wants(&record.name);
            if front_wanted {
                let outcome = self.stamp(&job);
                stats.record(&record.name, outcome);
            }
            for backside in &record.backsides {
                if front_wanted || self.options.wants(&backside.name) {
                    let outcome = self.stamp(&job.backside(backside));
                    stats.record(&backside.name, outcome);
                }
            }
        }
    }

    /// Stamp one item and write it to the output directory.
    pub fn stamp(&mut self, job: &StampJob<'_>) -> ItemOutcome {
        let file_name = job.file_name();
        let artwork = match self.store.open_card(&self.config.artwork_dir, &file_name) {
            Ok(artwork) => artwork,
            Err(err) => return unreadable(job, err),
        };
        let Some(artwork) = artwork else {
            tracing::warn!(
                "Couldn't find \"{file_name}\" in \"{}\".",
                self.config.artwork_dir.display()
            );
            return ItemOutcome::MissingArtwork;
        };

        let stack = match self.build_stack(job, artwork) {
            Ok(stack) => stack,
            Err(StampError::MissingAsset { path }) => {
                tracing::warn!(
                    name = %job.record.name,
                    path = %path.display(),
                    "missing overlay, skipping card"
                );
                return ItemOutcome::MissingOverlay(path);
            }
            Err(err) => return unreadable(job, err),
        };

        let Some(merged) = stack.merge() else {
            return ItemOutcome::MissingArtwork;
        };
        let out_path = self.output_dir().join(format!("{file_name}.png"));
        if let Err(err) = save_png(&out_path, &merged) {
            return unreadable(job, err);
        }

        let indent = if job.is_backside() { "\t" } else { "" };
        tracing::info!("{indent}Successfully processed \"{}\".", job.record.name);
        ItemOutcome::Saved(out_path)
    }

    /// Plan the overlays for `job` without loading any image.
    pub fn plan(&self, job: &StampJob<'_>) -> OverlayPlan {
        plan_overlays(job, &self.numbering)
    }

    /// Build the full layer stack for `job`: overlays in plan order, artwork inserted at the
    /// bottom.
    pub fn build_stack(&mut self, job: &StampJob<'_>, artwork: RgbaImage) -> StampResult<LayerStack> {
        let plan = self.plan(job);
        let mut stack = LayerStack::new(plan.geometry.canvas);
        for layer in &plan.layers {
            let image = self.store.overlay(&layer.asset.rel_path(plan.geometry.kind))?;
            stack.add_layer(image, layer.offset);
        }
        stack.insert_at_bottom(artwork, Offset::ORIGIN);
        Ok(stack)
    }
}

fn unreadable(job: &StampJob<'_>, err: StampError) -> ItemOutcome {
    let reason = format!("{err:#}");
    tracing::warn!(name = %job.record.name, %reason, "cannot process card, skipping");
    ItemOutcome::Unreadable(reason)
}

/// Log banner announcing a category.
pub(crate) fn banner(category: Category, only_updated: bool) -> String {
    let updated = if only_updated { " UPDATED" } else { "" };
    format!("----- PROCESSING{updated} {} -----", category.label())
}

/// First collection number and padding total for `category`.
///
/// Cards and basic lands share one range; basic lands continue after the last card.
pub fn numbering_range(collections: &Collections, category: Category) -> (usize, usize) {
    match category {
        Category::Cards => (1, collections.mainline_total()),
        Category::BasicLands => (collections.cards.len() + 1, collections.mainline_total()),
        Category::Tokens => (1, collections.tokens.len()),
        Category::AltArts => (1, collections.alt_arts.len()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/assembler.rs"]
mod tests;
