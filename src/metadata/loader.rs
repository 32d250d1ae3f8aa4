use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::config::SourcePaths;
use crate::foundation::error::{StampError, StampResult};
use crate::foundation::naming::normalize_filename;
use crate::metadata::record::{CardRecord, Category, RawRow, RecordId};

/// Single-letter color codes and their names.
const COLOR_WORDS: [(char, &str); 5] = [
    ('W', "White"),
    ('U', "Blue"),
    ('B', "Black"),
    ('R', "Red"),
    ('G', "Green"),
];

const COLORLESS: &str = "Colorless";

/// Rows read from each of the five sources, before linking.
#[derive(Clone, Debug, Default)]
pub struct SourceRows {
    /// Primary card rows.
    pub cards: Vec<RawRow>,
    /// Token rows.
    pub tokens: Vec<RawRow>,
    /// Transform backside rows, each naming its front in `Front Card Name`.
    pub transform_backsides: Vec<RawRow>,
    /// Basic land rows.
    pub basic_lands: Vec<RawRow>,
    /// Alt-art rows; a non-empty `Front Card Name` marks a backside.
    pub alt_arts: Vec<RawRow>,
}

impl SourceRows {
    /// Read all five sources from disk.
    pub fn read(paths: &SourcePaths) -> StampResult<Self> {
        Ok(Self {
            cards: read_rows_from_path(&paths.cards)?,
            tokens: read_rows_from_path(&paths.tokens)?,
            transform_backsides: read_rows_from_path(&paths.transform_backsides)?,
            basic_lands: read_rows_from_path(&paths.basic_lands)?,
            alt_arts: read_rows_from_path(&paths.alt_arts)?,
        })
    }
}

/// Loaded metadata, keyed by display name.
#[derive(Clone, Debug, Default)]
pub struct Collections {
    /// Primary cards, each owning its transform backsides.
    pub cards: BTreeMap<String, CardRecord>,
    /// Tokens under their synthesized full names.
    pub tokens: BTreeMap<String, CardRecord>,
    /// Basic lands under `{name} - {descriptor}`.
    pub basic_lands: BTreeMap<String, CardRecord>,
    /// Alt-arts under `{name} - {descriptor}`, each owning its backsides.
    pub alt_arts: BTreeMap<String, CardRecord>,
    /// Tokens dropped because their color identity could not be read.
    pub dropped_tokens: Vec<String>,
}

impl Collections {
    /// The collection for `category`.
    pub fn get(&self, category: Category) -> &BTreeMap<String, CardRecord> {
        match category {
            Category::Cards => &self.cards,
            Category::Tokens => &self.tokens,
            Category::BasicLands => &self.basic_lands,
            Category::AltArts => &self.alt_arts,
        }
    }

    /// Size of the shared cards + basic lands numbering range.
    pub fn mainline_total(&self) -> usize {
        self.cards.len() + self.basic_lands.len()
    }

    /// Normalized file stems of every loaded item, backsides included.
    pub fn file_names(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for category in Category::ALL {
            for record in self.get(category).values() {
                out.insert(normalize_filename(&record.name));
                for backside in &record.backsides {
                    out.insert(normalize_filename(&backside.name));
                }
            }
        }
        out
    }
}

/// Parse CSV rows (header line first) from any reader.
pub fn read_rows<R: Read>(reader: R) -> StampResult<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RawRow = result.context("parse CSV record")?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse the CSV file at `path`.
pub fn read_rows_from_path(path: &Path) -> StampResult<Vec<RawRow>> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("open source '{}'", path.display()))?;
    read_rows(f).map_err(|err| match err {
        StampError::Other(e) => StampError::Other(e.context(format!("'{}'", path.display()))),
        other => other,
    })
}

/// Read every source in `paths` and build the four collections.
pub fn load(paths: &SourcePaths) -> StampResult<Collections> {
    let rows = SourceRows::read(paths)?;
    build_collections(&rows)
}

/// Space-separated color names for a color identity string, with a trailing space.
///
/// `Colorless` anywhere in the identity wins. Any unknown letter, or an identity with no letters,
/// is malformed.
pub fn color_words(identity: &str) -> StampResult<String> {
    if identity.contains(COLORLESS) {
        return Ok(format!("{COLORLESS} "));
    }

    let mut out = String::new();
    for ch in identity.trim().chars() {
        let (_, word) = COLOR_WORDS
            .iter()
            .find(|(code, _)| *code == ch)
            .ok_or_else(|| {
                StampError::malformed(format!("unknown color \"{ch}\" in \"{identity}\""))
            })?;
        out.push_str(word);
        out.push(' ');
    }

    if out.is_empty() {
        return Err(StampError::malformed("empty color identity"));
    }
    Ok(out)
}

/// Full display name of a token: `{colors}{supertypes} {name} {types}[ - {descriptor}]`.
pub fn token_full_name(row: &RawRow) -> StampResult<String> {
    let colors = color_words(&row.color_identity)?;
    let descriptor = row.descriptor.trim();
    let descriptor = if descriptor.is_empty() {
        String::new()
    } else {
        format!(" - {descriptor}")
    };
    Ok(format!(
        "{colors}{} {} {}{descriptor}",
        row.supertypes, row.card_name, row.types
    ))
}

/// `{name} - {descriptor}`, the display name of basic lands and alt-arts.
pub fn described_name(name: &str, descriptor: &str) -> String {
    format!("{name} - {descriptor}")
}

/// Owns records while backsides are linked to fronts by id.
#[derive(Default)]
struct RecordArena {
    records: Vec<CardRecord>,
    ids_by_name: HashMap<String, RecordId>,
}

impl RecordArena {
    fn insert(&mut self, record: CardRecord) {
        if let Some(prev) = self.ids_by_name.insert(record.name.clone(), record.id) {
            tracing::warn!(name = %record.name, ?prev, "duplicate row replaces earlier entry");
        }
        self.records.push(record);
    }

    fn attach(&mut self, front_name: &str, mut backside: CardRecord) -> StampResult<()> {
        let front_id = *self.ids_by_name.get(front_name).ok_or_else(|| {
            StampError::malformed(format!(
                "backside \"{}\" names missing front \"{front_name}\"",
                backside.name
            ))
        })?;
        backside.front = Some(front_id);
        let front = self
            .records
            .iter_mut()
            .find(|r| r.id == front_id)
            .ok_or_else(|| StampError::malformed(format!("dangling record id {front_id:?}")))?;
        front.backsides.push(backside);
        Ok(())
    }

    fn into_map(self) -> BTreeMap<String, CardRecord> {
        let mut out = BTreeMap::new();
        for record in self.records {
            if self.ids_by_name.get(&record.name) == Some(&record.id) {
                out.insert(record.name.clone(), record);
            }
        }
        out
    }
}

/// Link rows into collections. Ids are assigned in source order, unique across categories.
pub fn build_collections(rows: &SourceRows) -> StampResult<Collections> {
    let mut next = 0u32;
    let mut take_id = || {
        let id = RecordId(next);
        next += 1;
        id
    };
    let named = |rows: &[RawRow]| -> Vec<RawRow> {
        rows.iter()
            .filter(|r| !r.card_name.is_empty())
            .cloned()
            .collect()
    };

    let mut cards = RecordArena::default();
    for row in named(&rows.cards) {
        let record = CardRecord::from_row(take_id(), row.card_name.clone(), &row)?;
        cards.insert(record);
    }
    for row in named(&rows.transform_backsides) {
        let backside = CardRecord::from_row(take_id(), row.card_name.clone(), &row)?;
        cards.attach(&row.front_card_name, backside)?;
    }

    let mut tokens = BTreeMap::new();
    let mut dropped_tokens = Vec::new();
    for row in named(&rows.tokens) {
        let name = match token_full_name(&row) {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(%err, "Token \"{}\" has an invalid color identity.", row.card_name);
                dropped_tokens.push(row.card_name.clone());
                continue;
            }
        };
        let record = CardRecord::from_row(take_id(), name.clone(), &row)?;
        tokens.insert(name, record);
    }

    let mut basic_lands = BTreeMap::new();
    for row in named(&rows.basic_lands) {
        let name = described_name(&row.card_name, &row.descriptor);
        let record = CardRecord::from_row(take_id(), name.clone(), &row)?;
        basic_lands.insert(name, record);
    }

    let mut alt_arts = RecordArena::default();
    let mut alt_backsides = Vec::new();
    for row in named(&rows.alt_arts) {
        let name = described_name(&row.card_name, &row.descriptor);
        let record = CardRecord::from_row(take_id(), name, &row)?;
        let front_name = row.front_card_name.trim();
        if front_name.is_empty() {
            alt_arts.insert(record);
        } else {
            let front = described_name(front_name, &row.front_card_descriptor);
            alt_backsides.push((front, record));
        }
    }
    for (front, backside) in alt_backsides {
        alt_arts.attach(&front, backside)?;
    }

    let out = Collections {
        cards: cards.into_map(),
        tokens,
        basic_lands,
        alt_arts: alt_arts.into_map(),
        dropped_tokens,
    };
    tracing::info!(
        cards = out.cards.len(),
        tokens = out.tokens.len(),
        basic_lands = out.basic_lands.len(),
        alt_arts = out.alt_arts.len(),
        "loaded metadata"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/loader.rs"]
mod tests;
