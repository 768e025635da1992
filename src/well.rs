//! Core types for the **96-well plate grid**.
//!
//! A [`Well`] is a validated coordinate on an 8×12 plate: row letter `A`–`H`
//! plus column number 1–12. Malformed coordinates are rejected when parsed,
//! so the rest of the crate never sees a well string it cannot emit.
//!
//! # Canonical order
//! Tag plates are numbered down the columns (tag 1 = `A1`, tag 2 = `B1`, …,
//! tag 9 = `A2`), so the canonical enumeration order of a plate is ascending
//! column, then ascending row within the column: `A1, B1, …, H1, A2, …, H12`.
//! `Ord` on [`Well`] implements exactly this order and every part of the
//! crate (repeat annotation, output emission, matrix rows) relies on it.
use core::fmt;
use std::str::FromStr;

/// Number of plates per library/run.
pub const PLATE_COUNT: u8 = 4;
/// Rows per plate (`A`–`H`).
pub const ROWS: u8 = 8;
/// Columns per plate (1–12).
pub const COLS: u8 = 12;
/// Wells per plate.
pub const WELLS_PER_PLATE: usize = (ROWS as usize) * (COLS as usize);

/// A validated well coordinate on an 8×12 plate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Well {
    /// Row letter, `b'A'..=b'H'`.
    row: u8,
    /// Column number, `1..=12`.
    col: u8,
}

impl Well {
    /// Build a well from a row letter and 1-based column number.
    ///
    /// Returns `None` when either part is off the plate.
    pub fn new(row: char, col: u8) -> Option<Well> {
        let row = row.to_ascii_uppercase();
        if !('A'..='H').contains(&row) || !(1..=COLS).contains(&col) {
            return None;
        }
        Some(Well { row: row as u8, col })
    }

    /// Row letter (`'A'`–`'H'`).
    pub fn row(&self) -> char {
        self.row as char
    }

    /// Column number (1–12).
    pub fn col(&self) -> u8 {
        self.col
    }

    /// All 96 wells of one plate in canonical (column-major) order.
    pub fn grid() -> impl Iterator<Item = Well> {
        (1..=COLS).flat_map(|col| (b'A'..=b'A' + ROWS - 1).map(move |row| Well { row, col }))
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row as char, self.col)
    }
}

impl FromStr for Well {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let row = chars
            .next()
            .ok_or_else(|| "empty well coordinate".to_string())?;
        let col: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("malformed well coordinate: {s:?}"))?;
        Well::new(row, col).ok_or_else(|| format!("well coordinate off the plate: {s:?}"))
    }
}

impl Ord for Well {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.col, self.row).cmp(&(other.col, other.row))
    }
}

impl PartialOrd for Well {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
