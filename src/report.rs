//! Reconciliation of the artwork directory against loaded metadata and processed output.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::config::StampConfig;
use crate::foundation::error::StampResult;
use crate::foundation::naming::canonical_stem;
use crate::metadata::loader::Collections;

/// Artwork files that no collection names, and artwork files with no processed counterpart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Artwork stems absent from every collection, backsides included.
    pub not_in_sources: Vec<String>,
    /// Artwork stems absent from the results directory.
    pub not_processed: Vec<String>,
}

impl Report {
    /// Compare the artwork directory against `collections` and the results directory.
    pub fn build(config: &StampConfig, collections: &Collections) -> StampResult<Self> {
        let artwork = png_stems(&config.artwork_dir)?;
        let processed = png_stems(&config.results_dir)?;
        let known = collections.file_names();

        Ok(Self {
            not_in_sources: artwork.difference(&known).cloned().collect(),
            not_processed: artwork.difference(&processed).cloned().collect(),
        })
    }

    /// Plain-text rendering with one banner per section.
    pub fn render(&self) -> String {
        let mut out = String::from("----- UNPROCESSED CARDS NOT IN SPREADSHEETS -----\n\n");
        for name in &self.not_in_sources {
            let _ = writeln!(out, "{name}");
        }
        out.push_str("\n\n----- CARDS NOT PROCESSED -----\n\n");
        for name in &self.not_processed {
            let _ = writeln!(out, "{name}");
        }
        out
    }

    /// Write the rendered report to `path`, replacing any previous report.
    pub fn write(&self, path: &Path) -> StampResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create report dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.render())
            .with_context(|| format!("write report '{}'", path.display()))?;
        tracing::info!("----- PROCESSED REPORT -----");
        Ok(())
    }
}

/// Canonical stems of the `.png` files directly inside `dir`. A missing directory is empty.
pub fn png_stems(dir: &Path) -> StampResult<BTreeSet<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("list '{}'", dir.display()))
                .into());
        }
    };

    let mut out = BTreeSet::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(stem) = name.strip_suffix(".png") {
            out.insert(canonical_stem(stem));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/report.rs"]
mod tests;
