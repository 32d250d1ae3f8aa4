use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::foundation::error::{StampError, StampResult};

/// Date format used by the `Date Created` column.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// One row of a tabular source, addressed by column header.
///
/// Columns absent from a given source deserialize as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    /// `Card Name`.
    #[serde(rename = "Card Name", default)]
    pub card_name: String,
    /// `Front Card Name` (backsides only).
    #[serde(rename = "Front Card Name", default)]
    pub front_card_name: String,
    /// `Front Card Descriptor` (alt-art backsides only).
    #[serde(rename = "Front Card Descriptor", default)]
    pub front_card_descriptor: String,
    /// `Descriptor`.
    #[serde(rename = "Descriptor", default)]
    pub descriptor: String,
    /// `Rarity`.
    #[serde(rename = "Rarity", default)]
    pub rarity: String,
    /// `Color Identity`.
    #[serde(rename = "Color Identity", default)]
    pub color_identity: String,
    /// `Type(s)`.
    #[serde(rename = "Type(s)", default)]
    pub types: String,
    /// `Supertype(s)`.
    #[serde(rename = "Supertype(s)", default)]
    pub supertypes: String,
    /// `Date Created`, `MM/DD/YYYY`.
    #[serde(rename = "Date Created", default)]
    pub date_created: String,
    /// `Archetype`.
    #[serde(rename = "Archetype", default)]
    pub archetype: String,
    /// `Updated`, `TRUE` or `FALSE`.
    #[serde(rename = "Updated", default)]
    pub updated: String,
}

/// Identifier assigned to every record at load time, unique within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u32);

/// The four collections produced by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Primary cards (with transform backsides).
    Cards,
    /// Tokens.
    Tokens,
    /// Basic lands.
    BasicLands,
    /// Alternate-art printings (with their own backsides).
    AltArts,
}

impl Category {
    /// All categories in processing order.
    pub const ALL: [Category; 4] = [
        Category::Cards,
        Category::Tokens,
        Category::BasicLands,
        Category::AltArts,
    ];

    /// Upper-case label used in log banners.
    pub fn label(self) -> &'static str {
        match self {
            Category::Cards => "CARDS",
            Category::Tokens => "TOKENS",
            Category::BasicLands => "BASIC LANDS",
            Category::AltArts => "ALT ARTS",
        }
    }

    /// File-name prefix for tiled sheets.
    pub fn sheet_prefix(self) -> &'static str {
        match self {
            Category::Cards => "cards",
            Category::Tokens => "tokens",
            Category::BasicLands => "basic_lands",
            Category::AltArts => "alt_arts",
        }
    }
}

/// A loaded card, token, basic land or alt-art, plus any backsides it owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRecord {
    /// Load-time identifier.
    pub id: RecordId,
    /// Owning front record, for backsides.
    pub front: Option<RecordId>,
    /// Unique display name; also the source of the artwork/output file name.
    pub name: String,
    /// Raw `Card Name` as written in the source.
    pub base_name: String,
    /// `Descriptor`.
    pub descriptor: String,
    /// `Rarity`.
    pub rarity: String,
    /// `Color Identity`.
    pub color_identity: String,
    /// `Supertype(s)`.
    pub supertypes: String,
    /// `Type(s)`.
    pub types: String,
    /// Parsed `Date Created`.
    pub created: NaiveDate,
    /// `Archetype`.
    pub archetype: String,
    /// `Updated` flag; only an explicit `FALSE` clears it.
    pub updated: bool,
    /// Backsides in source order.
    pub backsides: Vec<CardRecord>,
}

impl CardRecord {
    /// Build a record from a source row under the given display name.
    pub fn from_row(id: RecordId, name: String, row: &RawRow) -> StampResult<Self> {
        let created = parse_date(&row.date_created).map_err(|_| {
            StampError::malformed(format!(
                "\"{name}\" has an invalid creation date \"{}\"",
                row.date_created
            ))
        })?;

        Ok(Self {
            id,
            front: None,
            name,
            base_name: row.card_name.clone(),
            descriptor: row.descriptor.clone(),
            rarity: row.rarity.clone(),
            color_identity: row.color_identity.clone(),
            supertypes: row.supertypes.clone(),
            types: row.types.clone(),
            created,
            archetype: row.archetype.clone(),
            updated: !row.updated.trim().eq_ignore_ascii_case("FALSE"),
            backsides: Vec::new(),
        })
    }

    /// Calendar year of creation, used to pick the year stamp.
    pub fn year(&self) -> i32 {
        self.created.year()
    }

    /// Ordering key: creation date, then display name.
    pub fn sort_key(&self) -> (NaiveDate, &str) {
        (self.created, self.name.as_str())
    }
}

/// Parse a `MM/DD/YYYY` date.
pub fn parse_date(s: &str) -> StampResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| StampError::malformed(format!("invalid date \"{s}\": {e}")))
}

/// Sort records ascending by (creation date, display name).
pub fn sorted_records<'a>(items: impl IntoIterator<Item = &'a CardRecord>) -> Vec<&'a CardRecord> {
    let mut out: Vec<&CardRecord> = items.into_iter().collect();
    out.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/record.rs"]
mod tests;
