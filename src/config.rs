//! Run configuration: where sources, assets and outputs live, plus per-run options.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{StampError, StampResult};
use crate::foundation::naming::FilenameVariants;
use crate::metadata::record::Category;

/// Paths of the five tabular sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcePaths {
    /// Primary cards.
    pub cards: PathBuf,
    /// Tokens.
    pub tokens: PathBuf,
    /// Backsides of double-faced primary cards.
    pub transform_backsides: PathBuf,
    /// Basic lands.
    pub basic_lands: PathBuf,
    /// Alternate arts (and their backsides).
    pub alt_arts: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        let sheet = |name: &str| {
            PathBuf::from("spreadsheets").join(format!("The One Set Cards Ranked - {name}.csv"))
        };
        Self {
            cards: sheet("Card Ratings"),
            tokens: sheet("Tokens"),
            transform_backsides: sheet("Transform Backsides"),
            basic_lands: sheet("Basic Lands"),
            alt_arts: sheet("Alt Arts"),
        }
    }
}

/// Filesystem layout of a run. Relative paths resolve against the working directory unless
/// rebased with [`StampConfig::rebased`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Tabular sources.
    pub sources: SourcePaths,
    /// Root of the overlay image tree (`standard/...`, `wide_horizontal/...`).
    pub assets_dir: PathBuf,
    /// Unprocessed artwork, one PNG per card named after its normalized display name.
    pub artwork_dir: PathBuf,
    /// Processed cards.
    pub results_dir: PathBuf,
    /// Tiled contact sheets.
    pub tilings_dir: PathBuf,
    /// Subdirectory name used for provisional output.
    pub quarantine_dir: String,
    /// Run log, truncated at the start of every run.
    pub log_path: PathBuf,
    /// Reconciliation report.
    pub report_path: PathBuf,
    /// Alternate spellings tried when a card file is not found.
    pub filename_variants: FilenameVariants,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            sources: SourcePaths::default(),
            assets_dir: PathBuf::from("images"),
            artwork_dir: PathBuf::from("cards/unprocessed_cards"),
            results_dir: PathBuf::from("cards/processed_cards"),
            tilings_dir: PathBuf::from("cards/card_tilings"),
            quarantine_dir: "quarantine".to_string(),
            log_path: PathBuf::from("log.txt"),
            report_path: PathBuf::from("report.txt"),
            filename_variants: FilenameVariants::default(),
        }
    }
}

impl StampConfig {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> StampResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| StampError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StampResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StampError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject configurations that would write outside the results tree.
    pub fn validate(&self) -> StampResult<()> {
        let q = self.quarantine_dir.as_str();
        if q.is_empty() || q.contains(['/', '\\']) || q == "." || q == ".." {
            return Err(StampError::validation(
                "quarantine_dir must be a single directory name",
            ));
        }
        Ok(())
    }

    /// Resolve every relative path against `root`.
    pub fn rebased(mut self, root: &Path) -> Self {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        rebase(&mut self.sources.cards);
        rebase(&mut self.sources.tokens);
        rebase(&mut self.sources.transform_backsides);
        rebase(&mut self.sources.basic_lands);
        rebase(&mut self.sources.alt_arts);
        rebase(&mut self.assets_dir);
        rebase(&mut self.artwork_dir);
        rebase(&mut self.results_dir);
        rebase(&mut self.tilings_dir);
        rebase(&mut self.log_path);
        rebase(&mut self.report_path);
        self
    }

    /// Directory processed cards are written to (and read from when tiling).
    pub fn output_dir(&self, quarantine: bool) -> PathBuf {
        if quarantine {
            self.results_dir.join(&self.quarantine_dir)
        } else {
            self.results_dir.clone()
        }
    }

    /// Directory tiled sheets are written to.
    pub fn sheets_dir(&self, quarantine: bool) -> PathBuf {
        if quarantine {
            self.tilings_dir.join(&self.quarantine_dir)
        } else {
            self.tilings_dir.clone()
        }
    }
}

/// Per-run switches, usually taken from CLI flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// Process primary cards (and their backsides).
    pub cards: bool,
    /// Process tokens.
    pub tokens: bool,
    /// Process basic lands.
    pub basic_lands: bool,
    /// Process alt-arts.
    pub alt_arts: bool,
    /// Skip primary cards whose `Updated` flag is `FALSE`.
    pub only_updated: bool,
    /// When non-empty, only items whose display name is listed are processed.
    pub only_names: Vec<String>,
    /// Write into the quarantine subdirectory.
    pub quarantine: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            cards: true,
            tokens: true,
            basic_lands: true,
            alt_arts: true,
            only_updated: false,
            only_names: Vec::new(),
            quarantine: false,
        }
    }
}

impl RunOptions {
    /// Whether `category` is enabled for this run.
    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Cards => self.cards,
            Category::Tokens => self.tokens,
            Category::BasicLands => self.basic_lands,
            Category::AltArts => self.alt_arts,
        }
    }

    /// Whether the item named `name` passes the explicit name filter.
    pub fn wants(&self, name: &str) -> bool {
        self.only_names.is_empty() || self.only_names.iter().any(|n| n == name)
    }
}

/// Sheet range selection for tiling runs (1-based, inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetRange {
    /// First sheet to write; earlier sheets are counted but skipped.
    pub start: u32,
    /// Last sheet to write, if bounded.
    pub end: Option<u32>,
}

impl Default for SheetRange {
    fn default() -> Self {
        Self { start: 1, end: None }
    }
}

impl SheetRange {
    /// Create a validated range.
    pub fn new(start: u32, end: Option<u32>) -> StampResult<Self> {
        if start == 0 {
            return Err(StampError::validation("sheet numbers start at 1"));
        }
        if let Some(end) = end
            && end < start
        {
            return Err(StampError::validation(format!(
                "end sheet {end} is before start sheet {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether sheet `n` comes after the range.
    pub fn is_past(self, n: u32) -> bool {
        self.end.is_some_and(|end| n > end)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
