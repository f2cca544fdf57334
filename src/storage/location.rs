use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hotels are numbered 1..=4, shelves 1..=6. Together with the three
/// sections this is the full 72-slot grid of the facility. Slots are never
/// created or destroyed; only their occupancy changes.
pub const HOTELS: RangeInclusive<u8> = 1..=4;
pub const SHELVES: RangeInclusive<u8> = 1..=6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("hotel {0} is outside the storage grid (1-4)")]
    Hotel(u8),
    #[error("unknown section {0:?} (expected A, B or C)")]
    Section(String),
    #[error("shelf {0} is outside the storage grid (1-6)")]
    Shelf(u8),
}

/// Section letter within a hotel. Stored as the `storage_section` enum type
/// in Postgres.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type, Serialize, Deserialize,
)]
#[sqlx(type_name = "storage_section")]
pub enum Section {
    A,
    B,
    C,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::A, Section::B, Section::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
            Section::C => "C",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Section::A),
            "B" => Ok(Section::B),
            "C" => Ok(Section::C),
            other => Err(LocationError::Section(other.to_string())),
        }
    }
}

/// One addressable (hotel, section, shelf) coordinate in the storage grid.
///
/// The canonical string form is the location code `H<hotel>-<section>-<shelf>`
/// (e.g. `H1-A-3`), which is what gets printed on shelf labels and encoded in
/// location QR codes. [`StorageSlot::parse`] is the inverse of [`fmt::Display`]
/// for every slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StorageSlot {
    pub hotel: u8,
    pub section: Section,
    pub shelf: u8,
}

static LOCATION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)H(\d+)-([A-Z])-(\d+)").expect("location code pattern"));

impl StorageSlot {
    /// Build a slot address, rejecting coordinates outside the grid.
    pub fn new(hotel: u8, section: Section, shelf: u8) -> Result<Self, LocationError> {
        if !HOTELS.contains(&hotel) {
            return Err(LocationError::Hotel(hotel));
        }
        if !SHELVES.contains(&shelf) {
            return Err(LocationError::Shelf(shelf));
        }
        Ok(Self {
            hotel,
            section,
            shelf,
        })
    }

    /// Extract the first valid location code from free-form text, e.g. a
    /// search query or the decoded contents of a scanned QR label. The match
    /// is case-insensitive on the `H` and the section letter.
    ///
    /// `None` means "this is not a location query" and callers fall back to
    /// name/plate search; it is never a hard error.
    pub fn parse(text: &str) -> Option<Self> {
        LOCATION_CODE.captures_iter(text).find_map(|caps| {
            let hotel: u8 = caps[1].parse().ok()?;
            let section: Section = caps[2].parse().ok()?;
            let shelf: u8 = caps[3].parse().ok()?;
            Self::new(hotel, section, shelf).ok()
        })
    }

    /// Canonical `H<hotel>-<section>-<shelf>` form.
    pub fn location_code(&self) -> String {
        self.to_string()
    }

    /// Every slot in the grid, hotel-major order.
    pub fn all() -> impl Iterator<Item = StorageSlot> {
        HOTELS.flat_map(|hotel| {
            Section::ALL.into_iter().flat_map(move |section| {
                SHELVES.map(move |shelf| StorageSlot {
                    hotel,
                    section,
                    shelf,
                })
            })
        })
    }
}

impl fmt::Display for StorageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}-{}-{}", self.hotel, self.section, self.shelf)
    }
}
