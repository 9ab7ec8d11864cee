//! Microplate geometry and well naming.
//!
//! Wells are named by row letters and a zero-padded column (`A01`, `P24`,
//! `AF48`). Rows beyond `Z` continue as `AA`, `AB`, ... which covers the
//! 32 rows of a 1536-well plate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised for plate formats and well names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlateError {
    /// Plate size other than 96, 384 or 1536
    #[error("Unsupported plate format: {0} (supported: 96, 384, 1536)")]
    UnsupportedFormat(u32),

    /// Well name that does not match `[A-Za-z]+[0-9]+`
    #[error("Invalid well format: {0}")]
    InvalidWell(String),
}

/// Standard microplate formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PlateFormat {
    /// 8 x 12
    Wells96,
    /// 16 x 24
    #[default]
    Wells384,
    /// 32 x 48
    Wells1536,
}

impl PlateFormat {
    /// Number of rows
    pub fn rows(self) -> u32 {
        match self {
            PlateFormat::Wells96 => 8,
            PlateFormat::Wells384 => 16,
            PlateFormat::Wells1536 => 32,
        }
    }

    /// Number of columns
    pub fn columns(self) -> u32 {
        match self {
            PlateFormat::Wells96 => 12,
            PlateFormat::Wells384 => 24,
            PlateFormat::Wells1536 => 48,
        }
    }

    /// Wells per plate
    pub fn wells(self) -> u32 {
        self.rows() * self.columns()
    }

    /// Map a global, zero-based well index onto a plate and row-major position
    pub fn well_for_index(self, index: usize) -> WellId {
        let per_plate = self.wells() as usize;
        let columns = self.columns() as usize;
        let plate = index / per_plate + 1;
        let within = index % per_plate;
        WellId {
            plate: plate as u32,
            position: WellPosition {
                row: (within / columns + 1) as u32,
                column: (within % columns + 1) as u32,
            },
        }
    }

    /// Inverse of [`PlateFormat::well_for_index`]; `None` if the well is off-plate
    pub fn index_of(self, well: &WellId) -> Option<usize> {
        let WellPosition { row, column } = well.position;
        if well.plate == 0
            || row == 0
            || column == 0
            || row > self.rows()
            || column > self.columns()
        {
            return None;
        }
        let per_plate = self.wells() as usize;
        Some(
            (well.plate as usize - 1) * per_plate
                + (row as usize - 1) * self.columns() as usize
                + (column as usize - 1),
        )
    }
}

impl TryFrom<u32> for PlateFormat {
    type Error = PlateError;

    fn try_from(wells: u32) -> Result<Self, Self::Error> {
        match wells {
            96 => Ok(PlateFormat::Wells96),
            384 => Ok(PlateFormat::Wells384),
            1536 => Ok(PlateFormat::Wells1536),
            other => Err(PlateError::UnsupportedFormat(other)),
        }
    }
}

impl From<PlateFormat> for u32 {
    fn from(format: PlateFormat) -> Self {
        format.wells()
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wells())
    }
}

/// Well position within a plate; row and column are 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct WellPosition {
    /// Row number (A = 1, Z = 26, AA = 27)
    pub row: u32,
    /// Column number
    pub column: u32,
}

impl WellPosition {
    /// Create a position from 1-based row and column numbers
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Row letters for this position
    pub fn row_letters(&self) -> String {
        row_letters(self.row)
    }
}

/// Convert a 1-based row number to letters (1 -> A, 27 -> AA)
pub fn row_letters(mut row: u32) -> String {
    let mut letters = Vec::new();
    while row > 0 {
        let rem = (row - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        row = (row - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Convert row letters to a 1-based row number (A -> 1, AA -> 27); case-insensitive
pub fn row_number(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let value = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        acc.checked_mul(26)?.checked_add(value)
    })
}

impl fmt::Display for WellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.row_letters(), self.column)
    }
}

impl FromStr for WellPosition {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (letters, digits) = trimmed.split_at(split);

        let invalid = || PlateError::InvalidWell(s.to_string());
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let row = row_number(letters).ok_or_else(invalid)?;
        let column: u32 = digits.parse().map_err(|_| invalid())?;
        if column == 0 {
            return Err(invalid());
        }
        Ok(WellPosition { row, column })
    }
}

impl From<WellPosition> for String {
    fn from(position: WellPosition) -> Self {
        position.to_string()
    }
}

impl TryFrom<String> for WellPosition {
    type Error = PlateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A well on a numbered plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WellId {
    /// Plate number (1-based)
    pub plate: u32,
    /// Position on the plate
    pub position: WellPosition,
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.plate, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plate_dimensions() {
        assert_eq!(PlateFormat::Wells96.wells(), 96);
        assert_eq!(PlateFormat::Wells384.wells(), 384);
        assert_eq!(PlateFormat::Wells1536.wells(), 1536);
        assert_eq!(PlateFormat::try_from(200), Err(PlateError::UnsupportedFormat(200)));
    }

    #[test]
    fn test_well_for_index() {
        let format = PlateFormat::Wells384;
        assert_eq!(format.well_for_index(0).position.to_string(), "A01");
        assert_eq!(format.well_for_index(23).position.to_string(), "A24");
        assert_eq!(format.well_for_index(24).position.to_string(), "B01");
        assert_eq!(format.well_for_index(383).position.to_string(), "P24");

        let next_plate = format.well_for_index(384);
        assert_eq!(next_plate.plate, 2);
        assert_eq!(next_plate.position.to_string(), "A01");

        let last_1536 = PlateFormat::Wells1536.well_for_index(1535);
        assert_eq!(last_1536.position.to_string(), "AF48");
    }

    #[test]
    fn test_row_letters() {
        assert_eq!(row_letters(1), "A");
        assert_eq!(row_letters(26), "Z");
        assert_eq!(row_letters(27), "AA");
        assert_eq!(row_letters(32), "AF");
        assert_eq!(row_number("aa"), Some(27));
        assert_eq!(row_number(""), None);
        assert_eq!(row_number("A1"), None);
    }

    #[test]
    fn test_parse_well() {
        assert_eq!("A01".parse::<WellPosition>().unwrap(), WellPosition::new(1, 1));
        assert_eq!("AB12".parse::<WellPosition>().unwrap(), WellPosition::new(28, 12));
        assert_eq!("p7".parse::<WellPosition>().unwrap(), WellPosition::new(16, 7));
        assert!("12".parse::<WellPosition>().is_err());
        assert!("A".parse::<WellPosition>().is_err());
        assert!("A0".parse::<WellPosition>().is_err());
        assert!("A1B".parse::<WellPosition>().is_err());
    }

    #[test]
    fn test_well_ordering_is_row_major() {
        let mut wells: Vec<WellPosition> = ["B01", "AA01", "A02", "A01"]
            .iter()
            .map(|w| w.parse().unwrap())
            .collect();
        wells.sort();
        let names: Vec<String> = wells.iter().map(|w| w.to_string()).collect();
        assert_eq!(names, vec!["A01", "A02", "B01", "AA01"]);
    }

    proptest! {
        #[test]
        fn prop_index_roundtrip(index in 0usize..20_000, format_idx in 0usize..3) {
            let format =
                [PlateFormat::Wells96, PlateFormat::Wells384, PlateFormat::Wells1536][format_idx];
            let well = format.well_for_index(index);
            prop_assert_eq!(format.index_of(&well), Some(index));
            let reparsed: WellPosition = well.position.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, well.position);
        }
    }
}
